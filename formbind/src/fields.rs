//! Effective field names of records.
//!
//! Tables are built once per record type and cached by `ConstTypeId`, so a
//! key only costs a hash lookup per field segment.

use alloc::sync::Arc;
use std::collections::HashMap;

use formbind_core::{ConstTypeId, RecordDef, Shape};
use parking_lot::RwLock;

/// Marks a field as unreachable under the configured tag name.
pub const IGNORE_MARKER: &str = "-";

type NameTable = HashMap<&'static str, usize>;

/// Per-record `effective name → field index` tables.
#[derive(Default)]
pub(crate) struct FieldNameCache {
    tables: RwLock<HashMap<ConstTypeId, Arc<NameTable>>>,
}

impl FieldNameCache {
    /// Index into `record.fields` of the field answering to `name`.
    pub(crate) fn lookup(
        &self,
        shape: &'static Shape,
        record: &RecordDef,
        tag_name: Option<&str>,
        name: &str,
    ) -> Option<usize> {
        // Fast path: check read lock first
        if let Some(table) = self.tables.read().get(&shape.id) {
            return table.get(name).copied();
        }

        let table = Arc::new(build(record, tag_name));
        debug!(
            "built field table for {}: {} names",
            shape.type_identifier,
            table.len()
        );
        let index = table.get(name).copied();
        self.tables.write().entry(shape.id).or_insert(table);
        index
    }

    pub(crate) fn clear(&self) {
        self.tables.write().clear();
    }
}

impl Clone for FieldNameCache {
    fn clone(&self) -> Self {
        FieldNameCache {
            tables: RwLock::new(self.tables.read().clone()),
        }
    }
}

/// Effective name of each field: the tag value when a tag name is set and the
/// field carries that tag, the declared name otherwise. On duplicates the
/// first declared field wins.
fn build(record: &RecordDef, tag_name: Option<&str>) -> NameTable {
    let mut table = NameTable::with_capacity(record.fields.len());
    for (index, field) in record.fields.iter().enumerate() {
        let name = match tag_name.and_then(|tag| field.tag(tag)) {
            Some(IGNORE_MARKER) => continue,
            Some(renamed) => renamed,
            None => field.name,
        };
        table.entry(name).or_insert(index);
    }
    table
}
