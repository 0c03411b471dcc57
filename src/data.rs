//! Persisted menu state
//!
//! [`Data`] mirrors the item tree: numbers store their raw position, string
//! editors their text and groups a map from child title to child data.
//! Serialized with `serde_json` it is a plain JSON document:
//!
//! ```text
//! {"Mix": {"Level": 1.0, "Pan": 0.0}, "Name": {"Name": "Init            ", "Patch": 3.0}}
//! ```

use alloc::{collections::BTreeMap, string::String};

use serde::{Deserialize, Serialize};

/// Persisted state of an item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    /// Raw position of a number-like item
    Number(f32),
    /// Text of a string editor
    Text(String),
    /// Children of a group keyed by title
    Map(BTreeMap<String, Data>),
}

impl Data {
    /// Whether there is nothing to persist (an empty map)
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Map(map) if map.is_empty())
    }

    /// The data as a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, Data>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_shape() {
        let mut inner = BTreeMap::new();
        inner.insert(String::from("Pan"), Data::Number(0.5));
        let mut map = BTreeMap::new();
        map.insert(String::from("Mix"), Data::Map(inner));
        map.insert(String::from("Name"), Data::Text(String::from("Init")));

        let json = serde_json::to_string(&Data::Map(map.clone())).unwrap();
        assert_eq!(json, r#"{"Mix":{"Pan":0.5},"Name":"Init"}"#);

        let parsed: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Data::Map(map));
    }

    #[test]
    fn test_integers_parse_as_numbers() {
        let parsed: Data = serde_json::from_str(r#"{"Patch": 3}"#).unwrap();
        let map = parsed.as_map().unwrap();
        assert_eq!(map.get("Patch"), Some(&Data::Number(3.0)));
    }

    #[test]
    fn test_is_empty() {
        assert!(Data::Map(BTreeMap::new()).is_empty());
        assert!(!Data::Number(0.0).is_empty());
    }
}
