//! Table Tools


pub mod types;

pub use types::*;

use crate::error::{Result, WibbleError};
use std::collections::HashSet;

/// Build a table from a list, one column per field in order.
///
/// All fields must have the same length and resolve to distinct names.
pub fn lst_tbl(lst: List) -> Result<Table> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(lst.len());
    let mut nrow = None;

    for (name, values) in lst.resolved(0) {
        let expected = *nrow.get_or_insert(values.len());
        if values.len() != expected {
            return Err(WibbleError::mismatch(&name, expected, values.len()));
        }
        if !seen.insert(name.clone()) {
            return Err(WibbleError::DuplicateColumn(name));
        }
        columns.push(Column { name, values });
    }

    Ok(Table { columns })
}

/// Merge list fields into an existing table.
///
/// A field named like an existing column replaces it in place; other fields
/// are appended. Unnamed fields are numbered after the existing columns
/// (`V{ncol + n}`), so they never overwrite data already in the table. Field lengths must match the table's row count; a table with
/// no columns takes the length of the first field.
pub fn add_data(mut data: Table, lst: List) -> Result<Table> {
    let mut nrow = (data.ncol() > 0).then(|| data.nrow());
    let mut seen = HashSet::new();
    let offset = data.ncol();

    for (name, values) in lst.resolved(offset) {
        let expected = *nrow.get_or_insert(values.len());
        if values.len() != expected {
            return Err(WibbleError::mismatch(&name, expected, values.len()));
        }
        if !seen.insert(name.clone()) {
            return Err(WibbleError::DuplicateColumn(name));
        }

        match data.position(&name) {
            Some(idx) => data.columns[idx].values = values,
            None => data.columns.push(Column { name, values }),
        }
    }

    Ok(data)
}

/// Build a table from `data`, then merge `dots` into it.
pub fn dots_tbl(data: List, dots: List) -> Result<Table> {
    add_data(lst_tbl(data)?, dots)
}
