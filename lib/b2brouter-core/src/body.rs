//! Body and query-string serialization utilities.

use bytes::Bytes;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::Result;

/// Parameters of a single API call, keyed by name.
///
/// Sent as a query string for GET/DELETE and as a JSON object otherwise.
pub type Params = Map<String, Value>;

/// Content type used for request bodies and content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use b2brouter_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Invoice { number: String }
///
/// let invoice = Invoice { number: "INV-1".to_string() };
/// let bytes = to_json(&invoice).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"number":"INV-1"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Convert any serializable value into [`Params`].
///
/// # Errors
///
/// Returns an error if the value does not serialize, or serializes to
/// something other than a JSON object (parameters must be named).
pub fn to_params<T: serde::Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(crate::Error::validation(format!(
            "parameters must serialize to a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Flatten parameters into ordered `(name, value)` query pairs.
///
/// Nested values use bracket notation: arrays become `key[0]`, `key[1]`, …
/// and objects become `key[field]`. Booleans render as `1`/`0` and `null`
/// entries are omitted.
///
/// # Example
///
/// ```
/// use b2brouter_core::to_query_pairs;
/// use serde_json::json;
///
/// let params = json!({"a": 1, "b": "x", "tags": ["p", "q"]});
/// let pairs = to_query_pairs(params.as_object().unwrap());
/// assert_eq!(pairs, vec![
///     ("a".to_string(), "1".to_string()),
///     ("b".to_string(), "x".to_string()),
///     ("tags[0]".to_string(), "p".to_string()),
///     ("tags[1]".to_string(), "q".to_string()),
/// ]);
/// ```
#[must_use]
pub fn to_query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (name, value) in params {
        flatten_into(&mut pairs, name.clone(), value);
    }
    pairs
}

/// Serialize parameters to an `application/x-www-form-urlencoded` query string.
///
/// # Example
///
/// ```
/// use b2brouter_core::to_query_string;
/// use serde_json::json;
///
/// let params = json!({"a": 1, "b": "x y"});
/// assert_eq!(to_query_string(params.as_object().unwrap()), "a=1&b=x+y");
/// ```
#[must_use]
pub fn to_query_string(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query_pairs(params))
        .finish()
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten_into(pairs, format!("{key}[{field}]"), item);
            }
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g. `invoice.contact.name`).
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use b2brouter_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Invoice { id: u64 }
///
/// let invoice: Invoice = from_json(br#"{"id":42}"#).expect("deserialize");
/// assert_eq!(invoice, Invoice { id: 42 });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
    }

    #[test]
    fn to_json_serialize() {
        let bytes = to_json(&json!({"number": "INV-1", "total": 1500})).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"number":"INV-1","total":1500}"#);
    }

    #[test]
    fn to_params_from_struct() {
        #[derive(serde::Serialize)]
        struct Filter {
            state: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            page: Option<u32>,
        }

        let params = to_params(&Filter {
            state: "sent".to_string(),
            page: None,
        })
        .expect("params");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("state"), Some(&json!("sent")));
    }

    #[test]
    fn to_params_rejects_non_objects() {
        let err = to_params(&vec![1, 2]).expect_err("array is not a parameter map");
        assert!(err.to_string().contains("got an array"), "{err}");

        assert!(to_params(&()).expect("unit").is_empty());
    }

    #[test]
    fn query_string_scalars_keep_insertion_order() {
        let query = to_query_string(&params(json!({"b": "x", "a": 1, "ok": true, "no": false})));
        assert_eq!(query, "b=x&a=1&ok=1&no=0");
    }

    #[test]
    fn query_string_skips_null() {
        let query = to_query_string(&params(json!({"a": null, "b": 2})));
        assert_eq!(query, "b=2");
    }

    #[test]
    fn query_string_nested_values() {
        let query = to_query_string(&params(json!({
            "filter": {"state": "sent", "ids": [1, 2]}
        })));
        assert_eq!(
            query,
            "filter%5Bstate%5D=sent&filter%5Bids%5D%5B0%5D=1&filter%5Bids%5D%5B1%5D=2"
        );
    }

    #[test]
    fn query_string_percent_encodes() {
        let query = to_query_string(&params(json!({"q": "a&b=c", "name": "Acme Corp"})));
        assert_eq!(query, "q=a%26b%3Dc&name=Acme+Corp");
    }

    #[test]
    fn query_string_empty_params() {
        assert_eq!(to_query_string(&Params::new()), "");
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Contact {
            #[allow(dead_code)]
            name: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Invoice {
            #[allow(dead_code)]
            contact: Contact,
        }

        let err = from_json::<Invoice>(br#"{"contact":{}}"#).expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("contact"), "Expected path 'contact' in error: {msg}");
        assert!(msg.contains("name"), "Expected field 'name' mentioned in error: {msg}");
    }
}
