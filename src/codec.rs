//! Serialized value codec.
//!
//! Cookies hold text; the hooks hold typed values. A [`Codec`] turns a
//! `serde_json::Value` into cookie text and back, and the typed helpers in this
//! module bridge to `T` through serde.
//!
//! A cookie whose text decodes to `null` is reported as absent, exactly like a
//! cookie that does not exist.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::CookieError;

pub trait Codec {
    fn encode(&self, value: &Value) -> Result<String, CookieError>;
    fn decode(&self, text: &str) -> Result<Value, CookieError>;
}

/// JSON text codec. This is what both the server and the browser side use by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<String, CookieError> {
        serde_json::to_string(value).map_err(CookieError::Encode)
    }

    fn decode(&self, text: &str) -> Result<Value, CookieError> {
        serde_json::from_str(text).map_err(CookieError::Decode)
    }
}

pub(crate) fn encode_value<T: Serialize>(codec: &dyn Codec, value: &T) -> Result<String, CookieError> {
    let value = serde_json::to_value(value).map_err(CookieError::Encode)?;
    codec.encode(&value)
}

pub(crate) fn decode_value<T: DeserializeOwned>(codec: &dyn Codec, text: &str) -> Result<Option<T>, CookieError> {
    match codec.decode(text)? {
        Value::Null => Ok(None),
        value => serde_json::from_value(value).map(Some).map_err(CookieError::Decode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        font_size: u32,
    }

    #[test]
    fn strings_are_quoted() {
        assert_eq!(encode_value(&JsonCodec, &"hi").unwrap(), "\"hi\"");
        assert_eq!(decode_value::<String>(&JsonCodec, "\"hi\"").unwrap(), Some("hi".to_string()));
    }

    #[test]
    fn structs_survive_the_trip() {
        let prefs = Prefs { theme: "dark".into(), font_size: 14 };
        let text = encode_value(&JsonCodec, &prefs).unwrap();
        assert_eq!(decode_value::<Prefs>(&JsonCodec, &text).unwrap(), Some(prefs));
    }

    #[test]
    fn null_is_absent() {
        assert_eq!(decode_value::<String>(&JsonCodec, "null").unwrap(), None);
    }

    #[test]
    fn malformed_text_is_a_decode_error() {
        let err = decode_value::<String>(&JsonCodec, "{not json").unwrap_err();
        assert!(matches!(err, CookieError::Decode(_)));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = decode_value::<u32>(&JsonCodec, "\"twelve\"").unwrap_err();
        assert!(matches!(err, CookieError::Decode(_)));
    }
}
