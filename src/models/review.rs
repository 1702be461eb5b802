use serde::{Deserialize, Deserializer, Serialize};

/// One buyer review. Field order is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub listing_id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub buyer_user_id: String,
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub review: String,
    pub create_timestamp: i64,
}

// The API sends buyer ids as integers, older payloads as strings, and null
// for deleted accounts.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Number(n)) => n.to_string(),
        Some(Id::Text(s)) => s,
        None => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
