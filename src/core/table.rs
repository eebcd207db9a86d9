use crate::domain::model::{Record, Table, IMAGE_KEY, LINK_KEY, TITLE_KEY};
use std::collections::BTreeSet;

const LEADING_COLUMNS: [&str; 3] = [TITLE_KEY, LINK_KEY, IMAGE_KEY];

/// 所有記錄鍵值的聯集。Title、Link、Image 排在最前，其餘依字母排序
pub fn columns(records: &[Record]) -> Vec<String> {
    let discovered: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.data.keys().map(String::as_str))
        .filter(|key| !LEADING_COLUMNS.contains(key))
        .collect();

    LEADING_COLUMNS
        .iter()
        .copied()
        .filter(|key| records.iter().any(|record| record.contains_key(key)))
        .chain(discovered)
        .map(str::to_string)
        .collect()
}

pub fn flatten(records: &[Record]) -> Table {
    let columns = columns(records);
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(str::to_string))
                .collect()
        })
        .collect();

    Table { columns, rows }
}
