use graft_core::driver::Row;
use graft_core::schema::db::{Column, ColumnId, Schema, Table};
use graft_core::schema::mapping::JoinNode;
use graft_core::stmt::{Key, Type};
use graft_core::{Error, Result};

use graft_sql::Binding;

/// Assembles an entity's database identifier, simple or composite, and
/// disassembles identifier lists back into per-column values.
///
/// Both directions run over the table's primary-key columns in key order:
/// `assemble` reads a row into a [`Key`], `column_values` turns a key list
/// into the bindings a WHERE/IN clause needs.
#[derive(Debug, Clone)]
pub struct KeyAssembler {
    columns: Vec<KeyColumn>,
}

#[derive(Debug, Clone)]
struct KeyColumn {
    id: ColumnId,

    /// The label the column carries in result rows
    label: String,

    /// `table.column`, for diagnostics
    name: String,

    ty: Type,
}

impl KeyAssembler {
    /// An assembler reading rows labeled with bare column names.
    pub fn for_table(table: &Table) -> Result<Self> {
        Self::build(table, |column| column.name.clone())
    }

    /// An assembler reading rows labeled the way a join node's SELECT
    /// assembly labels them.
    pub fn for_node(schema: &Schema, node: &JoinNode) -> Result<Self> {
        let table = schema.table(node.table());
        Self::build(table, |column| node.column_label(column))
    }

    fn build(table: &Table, label: impl Fn(&Column) -> String) -> Result<Self> {
        let Some(pk) = &table.primary_key else {
            return Err(Error::invalid_mapping(format!(
                "table `{}` has no primary key",
                table.name
            )));
        };

        let columns = pk
            .columns
            .iter()
            .map(|id| {
                let column = table.column(*id);
                KeyColumn {
                    id: column.id,
                    label: label(column),
                    name: format!("{}.{}", table.name, column.name),
                    ty: column.ty,
                }
            })
            .collect();

        Ok(Self { columns })
    }

    /// How many columns compose the key.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Decode the identifier from a row. A null in any key column yields
    /// `None`: the entity is absent on this row, which is not an error.
    pub fn assemble(&self, row: &Row, ordinal: Option<usize>) -> Result<Option<Key>> {
        let mut values = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            let value = row
                .get(&column.label)
                .ok_or_else(|| Error::missing_column(&column.label, ordinal))?;
            if value.is_null() {
                return Ok(None);
            }
            if value.is_list() || !value.is_a(column.ty) {
                return Err(Error::column_decode(
                    &column.name,
                    column.ty,
                    value.clone(),
                    ordinal,
                ));
            }
            values.push(value.clone());
        }

        Ok(Some(Key::new(values)))
    }

    /// The reverse of [`assemble`](Self::assemble): per primary-key column,
    /// the value(s) a WHERE/IN clause binds for the given identifiers.
    ///
    /// Exactly one identifier yields scalar bindings; more than one yields
    /// per-column lists aligned by identifier position. Downstream
    /// parameter binding treats the two shapes differently, which is why
    /// the single-identifier case does not produce singleton lists.
    pub fn column_values(&self, keys: &[Key]) -> Result<Vec<(ColumnId, Binding)>> {
        for key in keys {
            if key.len() != self.columns.len() {
                return Err(Error::invalid_statement(format!(
                    "identifier has {} values but the key has {} columns",
                    key.len(),
                    self.columns.len(),
                )));
            }
            for (column, value) in self.columns.iter().zip(key.values()) {
                if value.is_null() || value.is_list() || !value.is_a(column.ty) {
                    return Err(Error::invalid_binding(
                        &column.name,
                        column.ty,
                        value.clone(),
                    ));
                }
            }
        }

        match keys {
            [] => Err(Error::invalid_statement(
                "at least one identifier is required",
            )),
            [key] => Ok(self
                .columns
                .iter()
                .zip(key.values())
                .map(|(column, value)| (column.id, Binding::Scalar(value.clone())))
                .collect()),
            keys => Ok(self
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let values = keys.iter().map(|key| key.values()[i].clone()).collect();
                    (column.id, Binding::List(values))
                })
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::stmt::Value;

    fn schema() -> Schema {
        Schema::builder()
            .table("events", |t| {
                t.column("id", Type::I64).primary_key();
                t.column("region", Type::Text).primary_key();
                t.column("payload", Type::Text).nullable();
            })
            .build()
            .unwrap()
    }

    #[test]
    fn assembles_composite_keys_in_key_order() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();
        assert_eq!(2, assembler.arity());

        let row = Row::from_pairs([
            ("region", Value::from("us-east")),
            ("id", Value::from(7i64)),
            ("payload", Value::Null),
        ]);

        let key = assembler.assemble(&row, None).unwrap().unwrap();
        assert_eq!(
            Key::new(vec![Value::from(7i64), Value::from("us-east")]),
            key
        );
    }

    #[test]
    fn null_key_column_means_absent() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();

        let row = Row::from_pairs([
            ("id", Value::from(7i64)),
            ("region", Value::Null),
        ]);

        assert_eq!(None, assembler.assemble(&row, None).unwrap());
    }

    #[test]
    fn decode_mismatch_names_column_and_row() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();

        let row = Row::from_pairs([
            ("id", Value::from("seven")),
            ("region", Value::from("us-east")),
        ]);

        let err = assembler.assemble(&row, Some(12)).unwrap_err();
        assert!(err.is_decode());
        let rendered = err.to_string();
        assert!(rendered.contains("events.id"), "{rendered}");
        assert!(rendered.contains("row 12"), "{rendered}");
    }

    #[test]
    fn single_identifier_binds_scalars() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();

        let key = Key::new(vec![Value::from(7i64), Value::from("us-east")]);
        let bindings = assembler.column_values(std::slice::from_ref(&key)).unwrap();

        assert_eq!(2, bindings.len());
        assert_eq!(Binding::Scalar(Value::from(7i64)), bindings[0].1);
        assert_eq!(Binding::Scalar(Value::from("us-east")), bindings[1].1);
    }

    #[test]
    fn identifier_lists_bind_aligned_lists() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();

        let keys = [
            Key::new(vec![Value::from(1i64), Value::from("a")]),
            Key::new(vec![Value::from(2i64), Value::from("b")]),
            Key::new(vec![Value::from(3i64), Value::from("c")]),
        ];
        let bindings = assembler.column_values(&keys).unwrap();

        assert_eq!(
            Binding::List(vec![
                Value::from(1i64),
                Value::from(2i64),
                Value::from(3i64)
            ]),
            bindings[0].1
        );
        assert_eq!(
            Binding::List(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c")
            ]),
            bindings[1].1
        );
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let schema = schema();
        let assembler = KeyAssembler::for_table(schema.table_named("events").unwrap()).unwrap();

        let err = assembler
            .column_values(&[Key::from(Value::from(1i64))])
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
