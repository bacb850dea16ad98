//! Lenient field decoders for backend payloads whose scalar types drift
//! between backend revisions.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `"42"`, `42` or `42.0` and yields the textual form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
    })
}

/// Like [`string_or_number`], but `null` and missing values become an empty string.
pub fn string_or_number_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Integer(n)) => n.to_string(),
        Some(TextOrNumber::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "string_or_number_or_empty")]
        stamp: String,
    }

    #[test]
    fn test_accepts_text_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"id":"abc","stamp":1700000000}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.stamp, "1700000000");

        let p: Probe = serde_json::from_str(r#"{"id":17}"#).unwrap();
        assert_eq!(p.id, "17");
        assert_eq!(p.stamp, "");
    }

    #[test]
    fn test_null_stamp_is_empty() {
        let p: Probe = serde_json::from_str(r#"{"id":"x","stamp":null}"#).unwrap();
        assert_eq!(p.stamp, "");
    }
}
