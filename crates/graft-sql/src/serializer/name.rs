use graft_core::schema::db::TableId;

use indexmap::IndexMap;

/// Decides how table and column references are rendered in SQL text.
///
/// A single-table statement renders bare column names. Once a statement is
/// known to span more than one table, every column is rendered
/// qualifier-prefixed and every table carries its qualifier. SQL dialects
/// forbid mixing the two forms within one statement, so the mode is fixed
/// *before* any text is emitted: builders scan the whole statement for
/// referenced tables first and construct the provider already in the right
/// mode. One instance per statement build; never shared.
#[derive(Debug)]
pub struct TableNames {
    /// Qualifier per referenced table, in statement order (target table
    /// first). `None` means single-table mode.
    qualifiers: Option<IndexMap<TableId, String>>,
}

impl TableNames {
    pub fn single_table() -> Self {
        Self { qualifiers: None }
    }

    pub fn multi_table(qualifiers: impl IntoIterator<Item = (TableId, String)>) -> Self {
        Self {
            qualifiers: Some(qualifiers.into_iter().collect()),
        }
    }

    pub fn is_multi_table(&self) -> bool {
        self.qualifiers.is_some()
    }

    /// The qualifier a column of `table` is prefixed with, if any.
    pub fn qualifier(&self, table: TableId) -> Option<&str> {
        self.qualifiers
            .as_ref()
            .and_then(|qualifiers| qualifiers.get(&table))
            .map(String::as_str)
    }

    /// Every referenced table with its qualifier, in statement order. Empty
    /// in single-table mode.
    pub fn tables(&self) -> impl Iterator<Item = (TableId, &str)> {
        self.qualifiers
            .iter()
            .flatten()
            .map(|(table, qualifier)| (*table, qualifier.as_str()))
    }
}
