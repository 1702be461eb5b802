use etsy_reviews::config::Settings;
use etsy_reviews::models::PageRequest;
use etsy_reviews::{Error, EtsyApi};
use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key-123";

fn settings(server: &MockServer) -> Settings {
    Settings::with_base_url(format!("{}/v3/application", server.uri()))
}

fn shop_json(name: &str) -> Value {
    json!({
        "shop_id": 5551234,
        "shop_name": name,
        "user_id": 42,
        "title": "Handmade ceramics",
        "url": format!("https://www.etsy.com/shop/{name}"),
        "review_count": 150,
        "review_average": 4.8,
        "num_favorites": 921
    })
}

async fn mount_shop_lookup(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v3/application/shops"))
        .and(query_param("shop_name", name))
        .and(query_param("limit", "1"))
        .and(header("x-api-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_shop_with_exact_name() {
    let server = MockServer::start().await;
    mount_shop_lookup(&server, "CeramicsByAda", json!({
        "count": 1,
        "results": [shop_json("CeramicsByAda")]
    }))
    .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let shop = api.resolve_shop("CeramicsByAda").await.unwrap();

    assert_eq!(shop.shop_name, "CeramicsByAda");
    assert_eq!(shop.shop_id, 5551234);
    assert_eq!(shop.review_count, 150);
    assert_eq!(shop.review_average, Some(4.8));
    assert_eq!(shop.num_favorites, Some(921));
}

#[tokio::test]
async fn empty_lookup_is_shop_not_found() {
    let server = MockServer::start().await;
    mount_shop_lookup(&server, "Ghost", json!({ "count": 0, "results": [] })).await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let err = api.resolve_shop("Ghost").await.unwrap_err();

    assert!(matches!(err, Error::ShopNotFound { ref name } if name == "Ghost"));
}

#[tokio::test]
async fn name_mismatch_is_shop_not_found() {
    let server = MockServer::start().await;
    mount_shop_lookup(&server, "ceramicsbyada", json!({
        "count": 1,
        "results": [shop_json("CeramicsByAda")]
    }))
    .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let err = api.resolve_shop("ceramicsbyada").await.unwrap_err();

    assert!(matches!(err, Error::ShopNotFound { .. }));
}

#[tokio::test]
async fn rejected_key_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/application/shops"))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"error\":\"Invalid API key\"}"))
        .mount(&server)
        .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let err = api.resolve_shop("CeramicsByAda").await.unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
}

#[tokio::test]
async fn review_page_maps_results_and_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/application/shops/5551234/reviews"))
        .and(query_param("offset", "100"))
        .and(query_param("limit", "100"))
        .and(header("x-api-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 150,
            "results": [
                {
                    "shop_id": 5551234,
                    "listing_id": 1001,
                    "transaction_id": 9,
                    "buyer_user_id": 777,
                    "rating": 5,
                    "review": "Beautiful glaze",
                    "language": "en",
                    "image_url_fullxfull": null,
                    "create_timestamp": 1690000000,
                    "update_timestamp": 1690000000
                },
                {
                    "shop_id": 5551234,
                    "listing_id": 1002,
                    "transaction_id": 10,
                    "buyer_user_id": null,
                    "rating": null,
                    "review": null,
                    "language": "en",
                    "create_timestamp": 1690000500,
                    "update_timestamp": 1690000600
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let page = api
        .fetch_review_page(5551234, PageRequest::new(100, 100))
        .await
        .unwrap();

    assert_eq!(page.total, 150);
    assert_eq!(page.reviews.len(), 2);
    assert_eq!(page.reviews[0].listing_id, 1001);
    assert_eq!(page.reviews[0].buyer_user_id, "777");
    assert_eq!(page.reviews[0].rating, Some(5));
    assert_eq!(page.reviews[0].review, "Beautiful glaze");
    assert_eq!(page.reviews[1].rating, None);
    assert_eq!(page.reviews[1].create_timestamp, 1690000500);
}

#[tokio::test]
async fn review_page_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/application/shops/5551234/reviews"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();
    let err = api
        .fetch_review_page(5551234, PageRequest::new(0, 100))
        .await
        .unwrap_err();

    match err {
        Error::ApiResponse { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected ApiResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn ping_reports_service_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/application/openapi-ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "application_id": 1 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/application/openapi-ping"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = EtsyApi::new(&settings(&server), KEY).unwrap();

    assert!(api.check_connectivity().await);
    assert!(!api.check_connectivity().await);
}

#[tokio::test]
async fn ping_is_false_when_host_is_unreachable() {
    let api = EtsyApi::new(&Settings::with_base_url("http://127.0.0.1:9/v3/application"), KEY).unwrap();

    assert!(!api.check_connectivity().await);
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.api.key_env = "ETSY_REVIEWS_TEST_KEY_NEVER_SET".to_string();

    let err = EtsyApi::from_env(&settings).err().unwrap();
    assert!(matches!(err, Error::Authentication(_)));

    let err = EtsyApi::new(&settings, "   ").err().unwrap();
    assert!(matches!(err, Error::Authentication(_)));
}
