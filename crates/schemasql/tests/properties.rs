//! Behaviour of the public API on realistic table shapes.

use schemasql::{
    BuilderConfig, CachedSchemaProvider, Column, Filter, ParamRole, SchemaProvider,
    SchemaSqlError, SchemaSqlResult, Selector, StatementBuilder, StaticSchemaProvider,
    TableSchema, build_insert, build_select_from, build_update,
};
use std::sync::Arc;

fn orders() -> TableSchema {
    TableSchema::new(
        "Orders",
        vec![
            Column::new("OrderId", "int identity", 0).primary_key(true),
            Column::new("CustomerId", "int", 1),
            Column::new("Amount", "decimal", 2).nullable(true),
        ],
    )
    .unwrap()
}

/// A spread of shapes: identity keys, natural keys, composite keys, keyless.
fn catalog() -> Vec<TableSchema> {
    vec![
        orders(),
        TableSchema::new(
            "Customers",
            vec![
                Column::new("Code", "char", 0).primary_key(true),
                Column::new("Name", "nvarchar", 1),
                Column::new("RowVersion", "bigint identity", 2),
            ],
        )
        .unwrap(),
        TableSchema::new(
            "OrderLines",
            vec![
                Column::new("OrderId", "int", 0).primary_key(true),
                Column::new("LineNo", "int", 1).primary_key(true),
                Column::new("Sku", "varchar", 2),
                Column::new("Qty", "int", 3),
            ],
        )
        .unwrap(),
        TableSchema::new(
            "AuditLog",
            vec![
                Column::new("At", "datetime2", 0),
                Column::new("Message", "nvarchar", 1),
            ],
        )
        .unwrap(),
    ]
}

#[test]
fn insertable_and_auto_columns_partition_every_table() {
    for t in catalog() {
        let insertable = t.insertable_column_names();
        let auto = t.auto_column_names();
        assert_eq!(insertable.len() + auto.len(), t.len(), "{}", t.table_name());
        assert!(insertable.iter().all(|c| !auto.contains(c)));
    }
}

#[test]
fn insert_placeholders_match_insertable_columns() {
    for t in catalog() {
        let stmt = build_insert(&t, "dbo").unwrap();
        assert_eq!(stmt.sql.matches('?').count(), t.insertable_column_names().len());
        let bound: Vec<_> = stmt.param_columns().collect();
        assert_eq!(bound, t.insertable_column_names());
    }
}

#[test]
fn update_placeholders_put_values_before_keys() {
    for t in catalog() {
        let stmt = match build_update(&t, "dbo") {
            Ok(stmt) => stmt,
            Err(SchemaSqlError::NoKeyColumns(name)) => {
                assert_eq!(name, "AuditLog");
                continue;
            }
            Err(e) => panic!("unexpected error for {}: {e}", t.table_name()),
        };
        let expected = t.non_key_column_names().len() + t.key_column_names().len();
        assert_eq!(stmt.sql.matches('?').count(), expected);
        assert_eq!(stmt.placeholder_count(), expected);

        let first_key = stmt
            .params
            .iter()
            .position(|p| p.role == ParamRole::Key)
            .unwrap();
        assert!(stmt.params[..first_key].iter().all(|p| p.role == ParamRole::Value));
        assert!(stmt.params[first_key..].iter().all(|p| p.role == ParamRole::Key));

        let set_end = stmt.sql.find(" FROM ").unwrap();
        let where_start = stmt.sql.find(" WHERE ").unwrap();
        assert!(set_end < where_start);
    }
}

#[test]
fn keyless_update_never_emits_unconditional_sql() {
    let t = TableSchema::new("AuditLog", vec![Column::new("Message", "nvarchar", 0)]).unwrap();
    assert_eq!(
        build_update(&t, "dbo").unwrap_err(),
        SchemaSqlError::NoKeyColumns("AuditLog".into())
    );
}

#[test]
fn orders_scenario() {
    let t = orders();
    assert_eq!(
        build_insert(&t, "dbo").unwrap().sql,
        "INSERT INTO dbo.Orders(CustomerId, Amount) VALUES (?, ?)"
    );
    assert_eq!(
        build_update(&t, "dbo").unwrap().sql,
        "UPDATE table SET table.CustomerId=?, table.Amount=? FROM dbo.Orders table WHERE OrderId=?"
    );
}

#[test]
fn filter_clause_shape_and_errors() -> SchemaSqlResult<()> {
    let mut f = Filter::new();
    f.clause("and", "=", ["a", "b"])?;
    assert_eq!(f.to_string(), "( a = ? AND b = ? )");
    assert_eq!(f.to_string().matches('?').count(), 2);

    assert!(matches!(
        Filter::new().clause("and", "xor", ["a"]),
        Err(SchemaSqlError::InvalidOperator(_))
    ));
    assert!(matches!(
        Filter::new().clause("xor", "=", ["a"]),
        Err(SchemaSqlError::InvalidJoiner(_))
    ));
    Ok(())
}

#[test]
fn leading_conjunction_is_an_error() {
    let mut f = Filter::new();
    let err = f.and_("and", "=", ["a"]).unwrap_err();
    assert!(matches!(err, SchemaSqlError::EmptyFilterConjunction("AND")));
    assert!(err.is_validation());
    assert!(f.is_empty());
}

#[test]
fn selector_distinct_appears_once() -> SchemaSqlResult<()> {
    let mut s = Selector::default();
    s.column_list(&["a"], &["a"], &[])?;
    assert_eq!(s.to_string().matches("DISTINCT t.a").count(), 1);
    Ok(())
}

#[test]
fn select_statement_carries_filter_binding_order() -> SchemaSqlResult<()> {
    let mut s = Selector::default();
    s.column_list(&["OrderId"], &[], &[("Amount", "total")])?
        .calc("t.Amount", " * 0.2")?;
    let mut f = Filter::new();
    f.clause("and", "between", ["t.Amount"])?
        .and_("or", "=", ["t.CustomerId", "t.OrderId"])?;

    let stmt = build_select_from("Orders", "dbo", &s, Some(&f))?;
    assert_eq!(
        stmt.sql,
        "SELECT t.OrderId, t.Amount AS total, t.Amount * 0.2 FROM dbo.Orders t \
         WHERE ( t.Amount BETWEEN ? AND ? ) AND ( t.CustomerId = ? OR t.OrderId = ? )"
    );
    let roles: Vec<_> = stmt.params.iter().map(|p| p.role).collect();
    assert_eq!(
        roles,
        [
            ParamRole::RangeStart,
            ParamRole::RangeEnd,
            ParamRole::Comparison,
            ParamRole::Comparison
        ]
    );
    Ok(())
}

#[test]
fn schemas_from_same_catalog_state_are_equal() {
    let a = orders();
    let b = orders();
    assert_eq!(a, b);
    assert_eq!(a.columns(), b.columns());
}

#[test]
fn schema_survives_serde() {
    let json = serde_json::to_string(&orders()).unwrap();
    let back: TableSchema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, orders());
    assert_eq!(back.auto_column_names(), ["OrderId"]);
}

#[test]
fn deserialization_enforces_invariants() {
    let json = r#"{"table_name":"T","columns":[
        {"name":"a","type_name":"int","ordinal_position":0},
        {"name":"a","type_name":"int","ordinal_position":1}
    ]}"#;
    assert!(serde_json::from_str::<TableSchema>(json).is_err());
}

#[tokio::test]
async fn cached_provider_shares_one_schema_across_tasks() {
    let provider: Arc<CachedSchemaProvider<StaticSchemaProvider>> =
        Arc::new(CachedSchemaProvider::new(catalog().into_iter().collect()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let p = Arc::clone(&provider);
        handles.push(tokio::spawn(async move { p.get("OrderLines").await }));
    }
    for h in handles {
        let schema = h.await.unwrap().unwrap();
        assert_eq!(schema.key_column_names(), ["OrderId", "LineNo"]);
    }
    assert_eq!(provider.cached_len(), 1);
}

#[tokio::test]
async fn builder_over_shared_provider() {
    let provider: Arc<dyn SchemaProvider> = Arc::new(catalog().into_iter().collect::<StaticSchemaProvider>());
    let builder = StatementBuilder::new(provider, BuilderConfig::new()).unwrap();

    let stmt = builder.update_for("OrderLines").await.unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE table SET table.Sku=?, table.Qty=? FROM dbo.OrderLines table WHERE OrderId=? AND LineNo=?"
    );
    assert!(
        builder
            .update_for("AuditLog")
            .await
            .unwrap_err()
            .to_string()
            .contains("no primary key")
    );
}
