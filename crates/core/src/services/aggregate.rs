//! Folds repeated occurrences of a symbol name into one aggregate.

use crate::model::{AggregateMap, AggregateRecord, SymbolRecord};

/// Group `records` by name in input order.
///
/// The first occurrence fixes the signature; later occurrences only add their
/// address and bump the count, even when their signature differs.
pub fn aggregate(records: &[SymbolRecord]) -> AggregateMap {
    let mut out = AggregateMap::new();
    for record in records {
        out.entry(record.name.clone())
            .and_modify(|existing| existing.push(record))
            .or_insert_with(|| AggregateRecord::first(record));
    }
    out
}
