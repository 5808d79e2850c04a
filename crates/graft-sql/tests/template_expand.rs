use graft_core::stmt::{Type, Value};

use graft_sql::{Bindings, Flavor, SqlTemplate};

use pretty_assertions::assert_eq;

/// The union of every parameter's recorded indexes must be exactly
/// `1..=total`, with no gaps and no collisions.
fn assert_contiguous(expanded: &graft_sql::ExpandedSql) {
    let mut all: Vec<usize> = expanded
        .parameters()
        .flat_map(|(_, indexes)| indexes.iter().copied())
        .collect();
    all.sort_unstable();
    let expected: Vec<usize> = (1..=expanded.placeholder_count()).collect();
    assert_eq!(expected, all);
}

#[test]
fn collection_binding_expands_to_its_cardinality() {
    let template =
        SqlTemplate::parse("select * from t where b = :B and c = :C").unwrap();
    let bindings = Bindings::new()
        .list("B", [20i64, 30, 40])
        .scalar("C", 23i64);

    let expanded = template.expand(&bindings, Flavor::Mysql).unwrap();

    assert_eq!("select * from t where b = ?, ?, ? and c = ?", expanded.sql());
    assert_eq!(4, expanded.placeholder_count());
    assert_eq!(Some(&[1usize, 2, 3][..]), expanded.indexes("B"));
    assert_eq!(Some(&[4usize][..]), expanded.indexes("C"));
    assert_eq!(
        &[
            Value::from(20i64),
            Value::from(30i64),
            Value::from(40i64),
            Value::from(23i64),
        ],
        expanded.values()
    );
    assert_contiguous(&expanded);
}

#[test]
fn repeated_parameters_accumulate_indexes_left_to_right() {
    let template = SqlTemplate::parse(
        "select * from t where b1 = :B and c1 = :C and b2 = :B and c2 = :C",
    )
    .unwrap();
    let bindings = Bindings::new()
        .list("B", [20i64, 30, 40])
        .list("C", [50i64, 60]);

    let expanded = template.expand(&bindings, Flavor::Mysql).unwrap();

    assert_eq!(
        "select * from t where b1 = ?, ?, ? and c1 = ?, ? and b2 = ?, ?, ? and c2 = ?, ?",
        expanded.sql()
    );
    assert_eq!(10, expanded.placeholder_count());
    assert_eq!(Some(&[1usize, 2, 3, 6, 7, 8][..]), expanded.indexes("B"));
    assert_eq!(Some(&[4usize, 5, 9, 10][..]), expanded.indexes("C"));
    assert_contiguous(&expanded);

    // Both occurrences of B scatter the same bound collection.
    assert_eq!(expanded.values()[0], expanded.values()[5]);
    assert_eq!(expanded.values()[2], expanded.values()[7]);
}

#[test]
fn scalar_next_to_a_collection_stays_a_single_placeholder() {
    // A singleton identifier binds as a scalar even when another parameter
    // in the same template is simultaneously multi-valued.
    let template =
        SqlTemplate::parse("delete from t where id = :id and region in (:regions)").unwrap();
    let bindings = Bindings::new()
        .scalar("id", 7i64)
        .list("regions", ["us-east", "eu-west"]);

    let expanded = template.expand(&bindings, Flavor::Mysql).unwrap();

    assert_eq!(
        "delete from t where id = ? and region in (?, ?)",
        expanded.sql()
    );
    assert_eq!(Some(&[1usize][..]), expanded.indexes("id"));
    assert_eq!(Some(&[2usize, 3][..]), expanded.indexes("regions"));
    assert_contiguous(&expanded);
}

#[test]
fn expansion_is_shape_specific() {
    let template = SqlTemplate::parse("select * from t where a in (:ids)").unwrap();

    let three = template
        .expand(&Bindings::new().list("ids", [1i64, 2, 3]), Flavor::Mysql)
        .unwrap();
    let one = template
        .expand(&Bindings::new().list("ids", [1i64]), Flavor::Mysql)
        .unwrap();

    assert_eq!(3, three.placeholder_count());
    assert_eq!(1, one.placeholder_count());
    assert_ne!(three.sql(), one.sql());
}

#[test]
fn prepared_statement_infers_value_types() {
    let template = SqlTemplate::parse("select * from t where a = :a and b in (:b)").unwrap();
    let bindings = Bindings::new()
        .scalar("a", "x")
        .list("b", [true, false]);

    let prepared = template
        .expand(&bindings, Flavor::Mysql)
        .unwrap()
        .into_prepared();

    assert_eq!("select * from t where a = ? and b in (?, ?)", prepared.sql);
    assert_eq!(Type::Text, prepared.params[0].ty);
    assert_eq!(Type::Bool, prepared.params[1].ty);
    assert_eq!(3, prepared.params.len());
}
