//! Integration tests against a live PostgreSQL.
//!
//! Skipped unless `DATABASE_URL` is set (a `.env` file is honoured).

use schemasql::{BuilderConfig, CachedSchemaProvider, SchemaProvider, StatementBuilder};
use schemasql_catalog::{
    CatalogConfig, CatalogConnection, PgCatalogProvider, SchemaSnapshot, SnapshotConfig,
    SnapshotLoad,
};

fn config(namespace: &str) -> Option<CatalogConfig> {
    let _ = dotenvy::dotenv();
    match CatalogConfig::from_env() {
        Ok(config) => Some(config.namespace(namespace)),
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping catalog test");
            None
        }
    }
}

async fn setup(conn: &CatalogConnection, ns: &str) -> Result<(), Box<dyn std::error::Error>> {
    conn.client()
        .batch_execute(&format!(
            r#"
DROP SCHEMA IF EXISTS {ns} CASCADE;
CREATE SCHEMA {ns};
CREATE TABLE {ns}.orders (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    customer_id BIGINT NOT NULL,
    amount NUMERIC(12, 2)
);
CREATE TABLE {ns}.order_lines (
    order_id BIGINT NOT NULL,
    line_no INT NOT NULL,
    sku TEXT NOT NULL,
    PRIMARY KEY (order_id, line_no)
);
CREATE TABLE {ns}.audit_log (
    seq SERIAL,
    message TEXT
);
CREATE TABLE {ns}."order items" (
    id BIGSERIAL PRIMARY KEY,
    "unit price" NUMERIC(12, 2)
);
"#
        ))
        .await?;
    Ok(())
}

async fn teardown(conn: &CatalogConnection, ns: &str) -> Result<(), Box<dyn std::error::Error>> {
    conn.client()
        .batch_execute(&format!("DROP SCHEMA IF EXISTS {ns} CASCADE"))
        .await?;
    Ok(())
}

#[tokio::test]
async fn describes_live_tables() -> Result<(), Box<dyn std::error::Error>> {
    let ns = "schemasql_it_describe";
    let Some(config) = config(ns) else {
        return Ok(());
    };
    let conn = CatalogConnection::connect(&config).await?;
    setup(&conn, ns).await?;

    let provider = PgCatalogProvider::new(&conn, ns);

    let orders = provider.table_schema("orders").await?;
    assert_eq!(orders.key_column_names(), ["id"]);
    assert_eq!(orders.auto_column_names(), ["id"]);
    assert_eq!(orders.insertable_column_names(), ["customer_id", "amount"]);
    assert!(orders.column("amount").is_some_and(|c| c.is_nullable()));

    let lines = provider.table_schema("order_lines").await?;
    assert_eq!(lines.key_column_names(), ["order_id", "line_no"]);

    let audit = provider.table_schema("audit_log").await?;
    assert!(audit.key_column_names().is_empty());
    assert_eq!(audit.auto_column_names(), ["seq"]);

    let missing = provider.table_schema("nope").await.unwrap_err();
    assert!(missing.is_schema_not_found());

    let mut tables = provider.list_tables().await?;
    tables.sort();
    assert_eq!(tables, ["audit_log", "order items", "order_lines", "orders"]);

    let items = provider.table_schema("order items").await?;
    assert_eq!(items.table_name(), r#""order items""#);
    assert_eq!(items.insertable_column_names(), [r#""unit price""#]);
    assert_eq!(provider.table_schema(r#""order items""#).await?, items);

    teardown(&conn, ns).await?;
    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn builds_statements_from_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let ns = "schemasql_it_build";
    let Some(config) = config(ns) else {
        return Ok(());
    };
    let conn = CatalogConnection::connect(&config).await?;
    setup(&conn, ns).await?;

    let provider = CachedSchemaProvider::new(PgCatalogProvider::new(&conn, ns));
    let builder = StatementBuilder::new(provider, BuilderConfig::new().target_schema(ns))?;

    let insert = builder.insert_for("orders").await?;
    assert_eq!(
        insert.sql,
        format!("INSERT INTO {ns}.orders(customer_id, amount) VALUES (?, ?)")
    );
    let update = builder.update_for("order_lines").await?;
    assert_eq!(
        update.sql,
        format!(
            "UPDATE table SET table.sku=? FROM {ns}.order_lines table WHERE order_id=? AND line_no=?"
        )
    );
    assert!(builder.update_for("audit_log").await.is_err());

    teardown(&conn, ns).await?;
    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn snapshot_refreshes_then_hits() -> Result<(), Box<dyn std::error::Error>> {
    let ns = "schemasql_it_snapshot";
    let Some(config) = config(ns) else {
        return Ok(());
    };
    let conn = CatalogConnection::connect(&config).await?;
    setup(&conn, ns).await?;

    let dir = std::env::temp_dir().join(format!("schemasql-it-{}", std::process::id()));
    let snapshot_config = SnapshotConfig::new().cache_dir(&dir).namespace(ns);
    let _ = std::fs::remove_dir_all(&dir);

    let (first, load) = SchemaSnapshot::load_or_refresh(&conn, &snapshot_config).await?;
    assert_eq!(load, SnapshotLoad::Refreshed);
    assert_eq!(first.tables.len(), 4);
    assert!(first.table(r#""order items""#).is_some());

    let (second, load) = SchemaSnapshot::load_or_refresh(&conn, &snapshot_config).await?;
    assert_eq!(load, SnapshotLoad::CacheHit);
    assert_eq!(second.fingerprint, first.fingerprint);

    conn.client()
        .batch_execute(&format!("ALTER TABLE {ns}.orders ADD COLUMN note TEXT"))
        .await?;
    let (third, load) = SchemaSnapshot::load_or_refresh(&conn, &snapshot_config).await?;
    assert_eq!(load, SnapshotLoad::Refreshed);
    assert!(third.table("orders").is_some_and(|t| t.has_column("note")));

    let provider = third.into_provider();
    assert!(provider.table_schema("order_lines").await.is_ok());

    let _ = std::fs::remove_dir_all(&dir);
    teardown(&conn, ns).await?;
    conn.close().await?;
    Ok(())
}
