//! Point lookups over a listing.

use crate::model::SymbolRecord;

/// Find the first record whose address or name equals `key` exactly.
pub fn find<'a>(records: &'a [SymbolRecord], key: &str) -> Option<&'a SymbolRecord> {
    records.iter().find(|r| r.address == key || r.name == key)
}
