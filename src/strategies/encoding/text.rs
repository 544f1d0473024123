//! JSON round trips
//!
//! Two variants over `serde_json`: [`JsonText`] goes through a serialized
//! string, [`JsonTree`] through an in-memory `serde_json::Value` tree. Both
//! check the eligibility marker on the root kind only, and both ignore
//! unknown fields when decoding.

use super::{require_encodable, Codec};
use crate::error::CloneResult;
use crate::reflect::Reflect;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Round trip through JSON text
#[derive(Debug, Default, Clone)]
pub struct JsonText;

impl<T> Codec<T> for JsonText
where
    T: Reflect + Serialize + DeserializeOwned,
{
    type Blob = String;

    fn encode(&self, source: &T) -> CloneResult<String> {
        require_encodable(source.kind())?;
        let text = serde_json::to_string(source)?;
        log::trace!("encoded {} as {} bytes of JSON", source.kind().name, text.len());
        Ok(text)
    }

    fn decode(&self, blob: String) -> CloneResult<T> {
        Ok(serde_json::from_str(&blob)?)
    }
}

/// Round trip through a JSON value tree
#[derive(Debug, Default, Clone)]
pub struct JsonTree;

impl<T> Codec<T> for JsonTree
where
    T: Reflect + Serialize + DeserializeOwned,
{
    type Blob = serde_json::Value;

    fn encode(&self, source: &T) -> CloneResult<serde_json::Value> {
        require_encodable(source.kind())?;
        Ok(serde_json::to_value(source)?)
    }

    fn decode(&self, blob: serde_json::Value) -> CloneResult<T> {
        Ok(serde_json::from_value(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloneError;
    use crate::model::{self, Customer};

    #[test]
    fn test_text_round_trip_preserves_values() {
        let source = model::create_sample_graph();
        let codec = JsonText;
        let text = Codec::<Customer>::encode(&codec, &source).unwrap();
        let decoded: Customer = codec.decode(text).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_text_decode_ignores_unknown_fields() {
        let text = r#"{
            "id": "Customer2",
            "first_name": "Ada",
            "last_name": "Byron",
            "loyalty_tier": "gold",
            "address": {"street": "1 Main St", "city": "Salem", "zip": "97301", "state": null}
        }"#;
        let decoded: Customer = JsonText.decode(text.to_string()).unwrap();
        assert_eq!(decoded.last_name, "Byron");
        assert_eq!(decoded.address.unwrap().borrow().city, "Salem");
    }

    #[test]
    fn test_text_decode_rejects_malformed_input() {
        let result: CloneResult<Customer> = JsonText.decode("{\"id\": ".to_string());
        assert!(matches!(result, Err(CloneError::Decode(_))));
    }

    #[test]
    fn test_tree_round_trip_preserves_values() {
        let source = model::create_sample_graph();
        let tree = Codec::<Customer>::encode(&JsonTree, &source).unwrap();
        assert_eq!(tree["address"]["state"]["code"], "OR");
        let decoded: Customer = JsonTree.decode(tree).unwrap();
        assert_eq!(decoded, source);
    }
}
