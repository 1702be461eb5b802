use reqwest::{Client, RequestBuilder, Response};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use crate::error::{Error, Result};
use tracing::debug;

pub const API_KEY_HEADER: &str = "x-api-key";

pub struct HttpClient {
    client: Client,
    headers: HeaderMap,  // Sent with every request
}

impl HttpClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let value = HeaderValue::from_str(api_key).map_err(|_| {
            Error::Authentication("API key contains characters not allowed in a header".to_string())
        })?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);

        debug!(header_key = API_KEY_HEADER, "Adding API key header");

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            headers,
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        debug!(
            url = url,
            headers = ?self.headers.keys().collect::<Vec<_>>(),
            "Creating GET request"
        );

        // Apply headers to each request
        self.client.get(url).headers(self.headers.clone())
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "Response received"
        );

        Ok(response)
    }
}
