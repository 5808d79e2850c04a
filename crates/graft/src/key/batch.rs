use super::KeyStrategy;

use graft_core::driver::Connection;
use graft_core::schema::db::{ColumnId, Schema, TableId};
use graft_core::stmt::Value;
use graft_core::{Error, Result};

use graft_sql::{Flavor, Insert, Serializer, Statement};

/// Batched entity insertion with identifier management.
///
/// Iteration over the batch is strictly sequential: the identifier of
/// entity *k* is fixed before entity *k*'s parameter row joins the batch
/// and before entity *k+1* is touched, so sequence-allocation order always
/// matches submission order. That ordering is what keeps after-insert key
/// correlation positionally valid.
pub struct BatchInsert<'a, T> {
    schema: &'a Schema,
    flavor: Flavor,
    table: TableId,
    columns: Vec<ColumnId>,

    /// Reads an entity's column values, aligned with `columns`
    values: Box<dyn Fn(&T) -> Vec<Value>>,

    strategy: KeyStrategy<T>,
}

impl<'a, T> std::fmt::Debug for BatchInsert<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchInsert")
            .field("flavor", &self.flavor)
            .field("table", &self.table)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl<'a, T> BatchInsert<'a, T> {
    pub fn new(
        schema: &'a Schema,
        flavor: Flavor,
        table: TableId,
        columns: Vec<ColumnId>,
        values: impl Fn(&T) -> Vec<Value> + 'static,
        strategy: KeyStrategy<T>,
    ) -> Result<Self> {
        let table_def = schema.table(table);
        let auto_increment = table_def.columns.iter().find(|c| c.auto_increment);

        match &strategy {
            KeyStrategy::AfterInsert { .. } => {
                let Some(generated) = auto_increment else {
                    return Err(Error::invalid_mapping(format!(
                        "`{}` has no generated key column to read back",
                        table_def.name
                    )));
                };
                if columns.contains(&generated.id) {
                    return Err(Error::invalid_mapping(format!(
                        "generated key column `{}.{}` must not be inserted explicitly",
                        table_def.name, generated.name,
                    )));
                }
            }
            KeyStrategy::Assigned | KeyStrategy::BeforeInsert { .. } => {
                if let Some(generated) = auto_increment {
                    return Err(Error::invalid_mapping(format!(
                        "`{}.{}` is database-generated; client-side identifiers cannot be used",
                        table_def.name, generated.name,
                    )));
                }
                if let Some(pk) = &table_def.primary_key {
                    for pk_column in &pk.columns {
                        if !columns.contains(pk_column) {
                            return Err(Error::invalid_mapping(format!(
                                "inserted columns must include key column `{}.{}`",
                                table_def.name,
                                table_def.column(*pk_column).name,
                            )));
                        }
                    }
                }
            }
        }

        Ok(Self {
            schema,
            flavor,
            table,
            columns,
            values: Box::new(values),
            strategy,
        })
    }

    /// Insert the batch, fixing or reading back identifiers per the
    /// entity type's strategy. Returns the number of inserted rows.
    pub fn execute(&mut self, connection: &mut dyn Connection, entities: &mut [T]) -> Result<u64> {
        if entities.is_empty() {
            return Ok(0);
        }

        let mut insert = Insert::new(self.table, self.columns.clone());
        for entity in entities.iter_mut() {
            if let KeyStrategy::BeforeInsert { sequence, set } = &mut self.strategy {
                let id = sequence.next()?;
                set(entity, id);
            }
            insert = insert.row((self.values)(entity));
        }

        let serializer = Serializer::new(self.schema, self.flavor);
        let mut stmt = serializer.prepare(&Statement::Insert(insert))?;
        stmt.want_generated_keys = self.strategy.is_after_insert();

        let response = connection.execute(&stmt)?;

        match &self.strategy {
            KeyStrategy::AfterInsert { set } => {
                let keys = response.rows.into_keys()?;
                if keys.len() != entities.len() {
                    return Err(Error::key_count(entities.len(), keys.len()));
                }
                for (entity, key) in entities.iter_mut().zip(keys) {
                    set(entity, key);
                }
                Ok(entities.len() as u64)
            }
            _ => response.rows.into_count(),
        }
    }
}
