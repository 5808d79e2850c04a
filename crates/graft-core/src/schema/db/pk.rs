use super::ColumnId;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimaryKey {
    /// Columns composing the primary key, in key order
    pub columns: Vec<ColumnId>,
}
