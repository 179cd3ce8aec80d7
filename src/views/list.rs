// src/views/list.rs

use crate::domain::PropertyRecord;

/// One line of the property list. `label` is the 1-based position shown to
/// the user; actions address the record by `record.id`.
#[derive(Debug)]
pub struct ListRow<'a> {
    pub label: usize,
    pub record: &'a PropertyRecord,
}

pub fn list_rows(records: &[PropertyRecord]) -> Vec<ListRow<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| ListRow {
            label: i + 1,
            record,
        })
        .collect()
}
