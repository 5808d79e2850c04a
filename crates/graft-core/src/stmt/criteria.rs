use super::Criterion;
use crate::schema::db::ColumnId;

/// Connective between two adjacent criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    #[default]
    And,
    Or,
}

/// An ordered sequence of criteria, read-only once built.
///
/// The connective attached to the first criterion is ignored when rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    items: Vec<(Connective, Criterion)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: Criterion) -> Self {
        self.items.push((Connective::And, criterion));
        self
    }

    pub fn or(mut self, criterion: Criterion) -> Self {
        self.items.push((Connective::Or, criterion));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Connective, &Criterion)> {
        self.items.iter().map(|(conn, criterion)| (*conn, criterion))
    }

    /// Every column referenced by any criterion, on either side of a
    /// comparison, in discovery order. May contain duplicates.
    pub fn referenced_columns(&self) -> Vec<ColumnId> {
        let mut columns = vec![];
        for (_, criterion) in &self.items {
            criterion.for_each_column(&mut |id| columns.push(id));
        }
        columns
    }
}

impl From<Criterion> for Criteria {
    fn from(criterion: Criterion) -> Self {
        Self::new().and(criterion)
    }
}

impl FromIterator<Criterion> for Criteria {
    fn from_iter<T: IntoIterator<Item = Criterion>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |criteria, criterion| criteria.and(criterion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::db::{ColumnId, TableId};

    fn col(table: usize, index: usize) -> ColumnId {
        ColumnId {
            table: TableId(table),
            index,
        }
    }

    #[test]
    fn referenced_columns_cover_both_operands() {
        let criteria = Criteria::new()
            .and(Criterion::eq(col(0, 1), col(1, 0)))
            .and(Criterion::is_null(col(0, 2)))
            .or(Criterion::not(Criterion::gt(col(1, 3), 10i64)));

        assert_eq!(
            vec![col(0, 1), col(1, 0), col(0, 2), col(1, 3)],
            criteria.referenced_columns()
        );
    }
}
