use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Contact form as posted by the site.
// Fields that are missing or not JSON strings come through as None.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "honeypot_field")]
    pub honeypot: Option<String>, // hidden field, humans leave it empty
}

impl ContactForm {
    // Objects decode field by field, any other non-null JSON value
    // carries no fields at all. `null` and invalid JSON are decode faults.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(serde::de::Error::custom("request body is null")),
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// Bots fill the field with whatever they have, a non-empty list counts too
fn honeypot_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Array(items) if !items.is_empty() => Some(Value::Array(items).to_string()),
        _ => None,
    })
}

// Record inserted into the inquiries table, created_at is left to the database
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SubmitSuccess {
    pub success: bool,
    pub message: String,
}

impl SubmitSuccess {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Message sent successfully!".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
