mod common;

use common::{assert_gap_free, render, text};
use sqlweave_core::{
    BuildError, Delete, Expr, Flavor, Insert, PlaceholderStrategy, RenderOptions, Select, Sorting,
    SqlValue, Update,
};

fn nested_filter() -> Expr {
    Expr::and(vec![
        Expr::eq("status", "active"),
        Expr::or(vec![
            Expr::between("age", 18, 30),
            Expr::and(vec![Expr::like("name", "a%"), Expr::is_not_null("email")]),
        ]),
        Expr::lt("score", 100),
    ])
}

#[test]
fn test_nested_markers_are_sequential_per_flavor() {
    for (flavor, prefix) in [
        (Flavor::Postgres, "$"),
        (Flavor::SqlServer, "@p"),
        (Flavor::Oracle, ":"),
        (Flavor::DocumentStore, "@p"),
    ] {
        let (sql, params) = render(&nested_filter(), flavor);
        assert_eq!(assert_gap_free(&sql, prefix), params.len(), "{flavor}");
    }
}

#[test]
fn test_values_follow_marker_order() {
    let (sql, params) = render(&nested_filter(), Flavor::Postgres);
    assert_eq!(
        sql,
        "(status = $1) AND ((age BETWEEN $2 AND $3) OR ((name LIKE $4) AND (email IS NOT NULL))) AND (score < $5)"
    );
    assert_eq!(
        params,
        vec![
            text("active"),
            SqlValue::Int(18),
            SqlValue::Int(30),
            text("a%"),
            SqlValue::Int(100)
        ]
    );
}

#[test]
fn test_same_tree_renders_for_every_flavor() {
    let filter = Expr::eq("id", 1);
    let rendered: Vec<String> = Flavor::ALL
        .into_iter()
        .map(|flavor| render(&filter, flavor).0)
        .collect();
    assert_eq!(
        rendered,
        vec!["id = ?", "id = ?", "id = $1", "id = @p1", "id = :1", "id = @p1"]
    );
}

#[test]
fn test_filter_shared_between_statements() {
    let filter = Expr::and(vec![Expr::eq("tenant", 3), Expr::is_null("deleted_at")]);

    let (select, _) = Select::new("docs")
        .with_flavor(Flavor::Postgres)
        .with_filter(filter.clone())
        .build(&RenderOptions::default());
    let (delete, _) = Delete::new("docs")
        .with_flavor(Flavor::Postgres)
        .with_filter(filter.clone())
        .build(&RenderOptions::default());
    let (update, params) = Update::new("docs")
        .with_flavor(Flavor::Postgres)
        .with_set("title", "x")
        .with_filter(filter)
        .build(&RenderOptions::default())
        .unwrap();

    assert_eq!(
        select,
        "SELECT * FROM docs WHERE (tenant = $1) AND (deleted_at IS NULL)"
    );
    assert_eq!(
        delete,
        "DELETE FROM docs WHERE (tenant = $1) AND (deleted_at IS NULL)"
    );
    assert_eq!(
        update,
        "UPDATE docs SET title=$1 WHERE (tenant = $2) AND (deleted_at IS NULL)"
    );
    assert_eq!(params, vec![text("x"), SqlValue::Int(3)]);
}

#[test]
fn test_single_comparison_is_not_wrapped() {
    let leaf = Expr::eq("id", 1);
    let (select, _) = Select::new("docs")
        .with_flavor(Flavor::Postgres)
        .with_filter(leaf.clone())
        .build(&RenderOptions::default());
    let (delete, _) = Delete::new("docs")
        .with_filter(leaf.clone())
        .build(&RenderOptions::default());
    let (update, _) = Update::new("docs")
        .with_flavor(Flavor::Oracle)
        .with_set("title", "x")
        .with_filter(leaf.clone())
        .build(&RenderOptions::default())
        .unwrap();

    assert_eq!(select, "SELECT * FROM docs WHERE id = $1");
    assert_eq!(delete, "DELETE FROM docs WHERE id = ?");
    assert_eq!(update, "UPDATE docs SET title=:1 WHERE id = :2");

    // A composite of one still wraps its child.
    let (select, _) = Select::new("docs")
        .with_filter(Expr::and(vec![leaf]))
        .build(&RenderOptions::default());
    assert_eq!(select, "SELECT * FROM docs WHERE (id = ?)");
}

#[test]
fn test_custom_placeholder_on_insert() {
    let strategy = PlaceholderStrategy::from_fn("named", || {
        Box::new(|field: &str| format!(":{field}"))
    });
    let (sql, _) = Insert::new("users")
        .with_placeholder(strategy)
        .with_value("name", "n")
        .with_value("email", "e")
        .build(&RenderOptions::default())
        .unwrap();
    assert_eq!(sql, "INSERT INTO users (name,email) VALUES (:name,:email)");
}

#[test]
fn test_pagination_variants() {
    let page = |flavor: Flavor| {
        Select::new("t")
            .with_flavor(flavor)
            .with_sort(Sorting::parse("id"))
            .with_limit(20)
            .with_offset(40)
            .build(&RenderOptions::default())
            .0
    };
    assert_eq!(page(Flavor::Sqlite), "SELECT * FROM t ORDER BY id LIMIT 40,20");
    assert_eq!(
        page(Flavor::Postgres),
        "SELECT * FROM t ORDER BY id LIMIT 20 OFFSET 40"
    );
    assert_eq!(
        page(Flavor::SqlServer),
        "SELECT * FROM t ORDER BY id OFFSET 40 ROWS FETCH NEXT 20 ROWS ONLY"
    );
    assert_eq!(
        page(Flavor::DocumentStore),
        "SELECT * FROM t c ORDER BY c.id OFFSET 40 LIMIT 20 WITH cross_partition=true"
    );
}

#[test]
fn test_reset_pagination() {
    let (sql, _) = Select::new("t")
        .with_limit(5)
        .with_offset(5)
        .reset_pagination()
        .build(&RenderOptions::default());
    assert_eq!(sql, "SELECT * FROM t");
}

#[test]
fn test_empty_write_statements_fail_before_execution() {
    assert!(matches!(
        Insert::new("t").build(&RenderOptions::default()),
        Err(BuildError::EmptyValues(_))
    ));
    assert!(matches!(
        Update::new("t").build(&RenderOptions::default()),
        Err(BuildError::EmptyAssignments(_))
    ));
}
