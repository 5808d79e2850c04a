use graft::driver::Row;
use graft::inflate::{downcast, inflater, wirer, TreeInflater};
use graft::key::KeyAssembler;
use graft::schema::db::Schema;
use graft::schema::mapping::{JoinNodeId, JoinTree};
use graft::stmt::{Type, Value};

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct User {
    id: i64,
    name: String,
    orders: Vec<Rc<RefCell<Order>>>,
}

#[derive(Debug)]
struct Order {
    id: i64,
    total: i64,
    items: Vec<Rc<RefCell<Item>>>,
}

#[derive(Debug)]
struct Item {
    id: i64,
    sku: String,
}

fn schema() -> Schema {
    Schema::builder()
        .table("users", |t| {
            t.column("id", Type::I64).primary_key();
            t.column("name", Type::Text);
        })
        .table("orders", |t| {
            t.column("id", Type::I64).primary_key();
            t.column("user_id", Type::I64);
            t.column("total", Type::I64);
        })
        .table("items", |t| {
            t.column("id", Type::I64).primary_key();
            t.column("order_id", Type::I64);
            t.column("sku", Type::Text);
        })
        .build()
        .unwrap()
}

/// users ← orders tree, nodes aliased t0 and t1.
fn two_level_tree(schema: &Schema) -> (JoinTree, JoinNodeId) {
    let users = schema.table_named("users").unwrap();
    let orders = schema.table_named("orders").unwrap();

    let mut builder = JoinTree::builder(schema);
    let root = builder
        .root(users.id, &[users.columns[0].id, users.columns[1].id])
        .unwrap();
    let child = builder
        .join_many(
            root,
            orders.id,
            &[orders.columns[0].id, orders.columns[2].id],
            &[(users.columns[0].id, orders.columns[1].id)],
        )
        .unwrap();
    (builder.build().unwrap(), child)
}

fn two_level_inflater<'a>(schema: &Schema, tree: &'a JoinTree, child: JoinNodeId) -> TreeInflater<'a> {
    let user_keys = KeyAssembler::for_node(schema, tree.root()).unwrap();
    let order_keys = KeyAssembler::for_node(schema, tree.node(child)).unwrap();

    let users = inflater::<User, _, _>(
        move |row, ordinal| user_keys.assemble(row, ordinal),
        |row, _| {
            Ok(User {
                id: row.get("t0_id").unwrap().clone().to_i64()?,
                name: row.get("t0_name").unwrap().clone().to_string()?,
                orders: vec![],
            })
        },
    );
    let orders = inflater::<Order, _, _>(
        move |row, ordinal| order_keys.assemble(row, ordinal),
        |row, _| {
            Ok(Order {
                id: row.get("t1_id").unwrap().clone().to_i64()?,
                total: row.get("t1_total").unwrap().clone().to_i64()?,
                items: vec![],
            })
        },
    );
    let wire = wirer::<User, Order, _>(|user, order| user.orders.push(order));

    TreeInflater::new(tree)
        .root(users)
        .child(child, orders, wire)
        .unwrap()
}

fn user_order_row(user: i64, name: &str, order: Option<(i64, i64)>) -> Row {
    Row::from_pairs([
        ("t0_id", Value::from(user)),
        ("t0_name", Value::from(name)),
        ("t1_id", order.map(|(id, _)| Value::from(id)).unwrap_or(Value::Null)),
        (
            "t1_total",
            order.map(|(_, total)| Value::from(total)).unwrap_or(Value::Null),
        ),
    ])
}

#[test]
fn fan_out_collapses_to_one_parent() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    // One "one" row repeated once per "many" row.
    let rows = vec![
        user_order_row(1, "alice", Some((10, 100))),
        user_order_row(1, "alice", Some((11, 250))),
        user_order_row(1, "alice", Some((12, 75))),
    ];

    let roots = engine.inflate(&rows).unwrap();
    assert_eq!(1, roots.len());

    let user = downcast::<User>(&roots[0]).unwrap();
    let user = user.borrow();
    assert_eq!("alice", user.name);
    assert_eq!(3, user.orders.len());

    let order_ids: Vec<i64> = user.orders.iter().map(|o| o.borrow().id).collect();
    assert_eq!(vec![10, 11, 12], order_ids);
}

#[test]
fn repeated_rows_do_not_double_append() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    let row = user_order_row(1, "alice", Some((10, 100)));
    let roots = engine.inflate(&[row.clone(), row]).unwrap();

    assert_eq!(1, roots.len());
    let user = downcast::<User>(&roots[0]).unwrap();
    assert_eq!(1, user.borrow().orders.len());
}

#[test]
fn null_child_identifier_skips_the_node() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    let rows = vec![
        user_order_row(1, "alice", None),
        user_order_row(2, "bob", Some((20, 40))),
    ];

    let roots = engine.inflate(&rows).unwrap();
    assert_eq!(2, roots.len());

    let alice = downcast::<User>(&roots[0]).unwrap();
    assert!(alice.borrow().orders.is_empty());

    let bob = downcast::<User>(&roots[1]).unwrap();
    assert_eq!(1, bob.borrow().orders.len());
}

#[test]
fn roots_come_back_in_first_seen_order() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    let rows = vec![
        user_order_row(3, "carol", Some((30, 10))),
        user_order_row(1, "alice", Some((10, 20))),
        user_order_row(3, "carol", Some((31, 30))),
        user_order_row(2, "bob", Some((21, 40))),
    ];

    let roots = engine.inflate(&rows).unwrap();
    let ids: Vec<i64> = roots
        .iter()
        .map(|root| downcast::<User>(root).unwrap().borrow().id)
        .collect();
    assert_eq!(vec![3, 1, 2], ids);
}

#[test]
fn a_second_pass_starts_from_a_fresh_identity_map() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    let rows = vec![user_order_row(1, "alice", Some((10, 100)))];

    let first = engine.inflate(&rows).unwrap();
    let second = engine.inflate(&rows).unwrap();

    let a = downcast::<User>(&first[0]).unwrap();
    let b = downcast::<User>(&second[0]).unwrap();
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(1, b.borrow().orders.len());
}

#[test]
fn decode_failure_carries_the_row_ordinal() {
    let schema = schema();
    let (tree, child) = two_level_tree(&schema);
    let engine = two_level_inflater(&schema, &tree, child);

    let rows = vec![
        user_order_row(1, "alice", Some((10, 100))),
        Row::from_pairs([
            ("t0_id", Value::from("not-an-id")),
            ("t0_name", Value::from("mallory")),
            ("t1_id", Value::Null),
            ("t1_total", Value::Null),
        ]),
    ];

    let err = engine.inflate(&rows).unwrap_err();
    assert!(err.is_decode());
    let rendered = err.to_string();
    assert!(rendered.contains("users.id"), "{rendered}");
    assert!(rendered.contains("row 1"), "{rendered}");
}

#[test]
fn unbound_nodes_are_a_configuration_error() {
    let schema = schema();
    let (tree, _) = two_level_tree(&schema);

    let user_keys = KeyAssembler::for_node(&schema, tree.root()).unwrap();
    let engine = TreeInflater::new(&tree).root(inflater::<User, _, _>(
        move |row, ordinal| user_keys.assemble(row, ordinal),
        |_, _| unreachable!("never inflated"),
    ));

    let err = engine.inflate(&[]).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn absent_mid_level_skips_the_whole_subtree() {
    let schema = schema();
    let users = schema.table_named("users").unwrap();
    let orders = schema.table_named("orders").unwrap();
    let items = schema.table_named("items").unwrap();

    let mut builder = JoinTree::builder(&schema);
    let root = builder
        .root(users.id, &[users.columns[0].id, users.columns[1].id])
        .unwrap();
    let mid = builder
        .join_many(
            root,
            orders.id,
            &[orders.columns[0].id, orders.columns[2].id],
            &[(users.columns[0].id, orders.columns[1].id)],
        )
        .unwrap();
    let leaf = builder
        .join_many(
            mid,
            items.id,
            &[items.columns[0].id, items.columns[2].id],
            &[(orders.columns[0].id, items.columns[1].id)],
        )
        .unwrap();
    let tree = builder.build().unwrap();

    let user_keys = KeyAssembler::for_node(&schema, tree.root()).unwrap();
    let order_keys = KeyAssembler::for_node(&schema, tree.node(mid)).unwrap();
    let item_keys = KeyAssembler::for_node(&schema, tree.node(leaf)).unwrap();

    let engine = TreeInflater::new(&tree)
        .root(inflater::<User, _, _>(
            move |row, ordinal| user_keys.assemble(row, ordinal),
            |row, _| {
                Ok(User {
                    id: row.get("t0_id").unwrap().clone().to_i64()?,
                    name: row.get("t0_name").unwrap().clone().to_string()?,
                    orders: vec![],
                })
            },
        ))
        .child(
            mid,
            inflater::<Order, _, _>(
                move |row, ordinal| order_keys.assemble(row, ordinal),
                |row, _| {
                    Ok(Order {
                        id: row.get("t1_id").unwrap().clone().to_i64()?,
                        total: row.get("t1_total").unwrap().clone().to_i64()?,
                        items: vec![],
                    })
                },
            ),
            wirer::<User, Order, _>(|user, order| user.orders.push(order)),
        )
        .unwrap()
        .child(
            leaf,
            inflater::<Item, _, _>(
                move |row, ordinal| item_keys.assemble(row, ordinal),
                |row, _| {
                    Ok(Item {
                        id: row.get("t2_id").unwrap().clone().to_i64()?,
                        sku: row.get("t2_sku").unwrap().clone().to_string()?,
                    })
                },
            ),
            wirer::<Order, Item, _>(|order, item| order.items.push(item)),
        )
        .unwrap();

    // The order is absent; the item columns still carry values, but with an
    // unresolved parent the leaf must not inflate or wire.
    let rows = vec![Row::from_pairs([
        ("t0_id", Value::from(1i64)),
        ("t0_name", Value::from("alice")),
        ("t1_id", Value::Null),
        ("t1_total", Value::Null),
        ("t2_id", Value::from(99i64)),
        ("t2_sku", Value::from("stray")),
    ])];

    let roots = engine.inflate(&rows).unwrap();
    assert_eq!(1, roots.len());
    let user = downcast::<User>(&roots[0]).unwrap();
    assert!(user.borrow().orders.is_empty());
}

#[test]
fn item_graphs_nest_two_levels_deep() {
    let schema = schema();
    let users = schema.table_named("users").unwrap();
    let orders = schema.table_named("orders").unwrap();
    let items = schema.table_named("items").unwrap();

    let mut builder = JoinTree::builder(&schema);
    let root = builder
        .root(users.id, &[users.columns[0].id, users.columns[1].id])
        .unwrap();
    let mid = builder
        .join_many(
            root,
            orders.id,
            &[orders.columns[0].id, orders.columns[2].id],
            &[(users.columns[0].id, orders.columns[1].id)],
        )
        .unwrap();
    let leaf = builder
        .join_many(
            mid,
            items.id,
            &[items.columns[0].id, items.columns[2].id],
            &[(orders.columns[0].id, items.columns[1].id)],
        )
        .unwrap();
    let tree = builder.build().unwrap();

    let user_keys = KeyAssembler::for_node(&schema, tree.root()).unwrap();
    let order_keys = KeyAssembler::for_node(&schema, tree.node(mid)).unwrap();
    let item_keys = KeyAssembler::for_node(&schema, tree.node(leaf)).unwrap();

    let engine = TreeInflater::new(&tree)
        .root(inflater::<User, _, _>(
            move |row, ordinal| user_keys.assemble(row, ordinal),
            |row, _| {
                Ok(User {
                    id: row.get("t0_id").unwrap().clone().to_i64()?,
                    name: row.get("t0_name").unwrap().clone().to_string()?,
                    orders: vec![],
                })
            },
        ))
        .child(
            mid,
            inflater::<Order, _, _>(
                move |row, ordinal| order_keys.assemble(row, ordinal),
                |row, _| {
                    Ok(Order {
                        id: row.get("t1_id").unwrap().clone().to_i64()?,
                        total: row.get("t1_total").unwrap().clone().to_i64()?,
                        items: vec![],
                    })
                },
            ),
            wirer::<User, Order, _>(|user, order| user.orders.push(order)),
        )
        .unwrap()
        .child(
            leaf,
            inflater::<Item, _, _>(
                move |row, ordinal| item_keys.assemble(row, ordinal),
                |row, _| {
                    Ok(Item {
                        id: row.get("t2_id").unwrap().clone().to_i64()?,
                        sku: row.get("t2_sku").unwrap().clone().to_string()?,
                    })
                },
            ),
            wirer::<Order, Item, _>(|order, item| order.items.push(item)),
        )
        .unwrap();

    // One order fans out over two items; the user row repeats twice.
    let row = |item: i64, sku: &str| {
        Row::from_pairs([
            ("t0_id", Value::from(1i64)),
            ("t0_name", Value::from("alice")),
            ("t1_id", Value::from(10i64)),
            ("t1_total", Value::from(100i64)),
            ("t2_id", Value::from(item)),
            ("t2_sku", Value::from(sku)),
        ])
    };
    let rows = vec![row(100, "bolt"), row(101, "nut")];

    let roots = engine.inflate(&rows).unwrap();
    assert_eq!(1, roots.len());

    let user = downcast::<User>(&roots[0]).unwrap();
    let user = user.borrow();
    assert_eq!(1, user.orders.len());

    let order = user.orders[0].borrow();
    let skus: Vec<String> = order.items.iter().map(|i| i.borrow().sku.clone()).collect();
    assert_eq!(vec!["bolt".to_string(), "nut".to_string()], skus);
}
