use super::Row;
use crate::{err, stmt::Value, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Database-generated keys, one per submitted row, in submission order
    Keys(Vec<Value>),

    /// Operation result, as a row set
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn keys(keys: Vec<Value>) -> Self {
        Self {
            rows: Rows::Keys(keys),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_keys(&self) -> bool {
        matches!(self, Self::Keys(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            _ => Err(err!("expected an update count; rows={self:?}")),
        }
    }

    pub fn into_keys(self) -> Result<Vec<Value>> {
        match self {
            Self::Keys(keys) => Ok(keys),
            _ => Err(err!("expected generated keys; rows={self:?}")),
        }
    }

    pub fn into_values(self) -> Result<Vec<Row>> {
        match self {
            Self::Values(rows) => Ok(rows),
            _ => Err(err!("expected a row set; rows={self:?}")),
        }
    }
}
