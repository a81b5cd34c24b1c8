//! Core data model for extracted symbols and their per-name aggregates.
//!
//! - `SymbolRecord`: one function/symbol line reported by the debugger.
//! - `AggregateRecord`: every occurrence of one name folded together.
//! - `AggregateMap`: name → aggregate, written as a JSON object in first-seen order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One extracted function/symbol.
///
/// The address is kept as the raw token (e.g. `0x0000000000001139`); it is only
/// ever compared or displayed, never interpreted as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub signature: String,
}

impl SymbolRecord {
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self { address: address.into(), name: name.into(), signature: signature.into() }
    }
}

/// Every occurrence of a single symbol name.
///
/// `signature` is the one seen first; `count` always equals `addresses.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub addresses: Vec<String>,
    pub signature: String,
    pub count: usize,
}

impl AggregateRecord {
    /// Start an aggregate from the first occurrence of a name.
    pub fn first(record: &SymbolRecord) -> Self {
        Self {
            addresses: vec![record.address.clone()],
            signature: record.signature.clone(),
            count: 1,
        }
    }

    /// Fold a later occurrence in. The signature is left as-is.
    pub fn push(&mut self, record: &SymbolRecord) {
        self.addresses.push(record.address.clone());
        self.count += 1;
    }
}

/// Mapping of symbol name to its aggregate, serialized in insertion order.
///
/// Equality ignores ordering; callers must not depend on key order.
pub type AggregateMap = IndexMap<String, AggregateRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_map_serializes_in_insertion_order() {
        let mut map = AggregateMap::new();
        map.insert("zeta".into(), AggregateRecord::first(&SymbolRecord::new("0x2", "zeta", "s")));
        map.insert("alpha".into(), AggregateRecord::first(&SymbolRecord::new("0x1", "alpha", "s")));

        let json = serde_json::to_string(&map).unwrap();
        let zeta = json.find("zeta").unwrap();
        let alpha = json.find("alpha").unwrap();
        assert!(zeta < alpha, "expected first-seen order in {json}");
    }

    #[test]
    fn aggregate_map_equality_ignores_order() {
        let main = AggregateRecord::first(&SymbolRecord::new("0x1", "main", "int"));
        let helper = AggregateRecord::first(&SymbolRecord::new("0x2", "helper", "void"));
        let forward: AggregateMap =
            [("main".to_string(), main.clone()), ("helper".to_string(), helper.clone())].into();
        let reverse: AggregateMap =
            [("helper".to_string(), helper), ("main".to_string(), main)].into();
        assert_eq!(forward, reverse);

        let json = serde_json::to_string(&reverse).unwrap();
        let decoded: AggregateMap = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["helper", "main"]);
    }

    #[test]
    fn symbol_record_signature_defaults_to_empty() {
        let rec: SymbolRecord =
            serde_json::from_str(r#"{"address":"0x00000000","name":"main"}"#).unwrap();
        assert_eq!(rec.signature, "");
    }
}
