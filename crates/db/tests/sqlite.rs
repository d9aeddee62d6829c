//! Gateway operations against a real SQLite database.
//!
//! Each test gets its own throwaway database file attached as `saq`.

use db::repository::{read_cocktails, read_stocks_in_shops, write_alcool, write_cocktaildetails};
use db::schema::init_schema;
use db::{ConnectionProvider, DbError, Row, SqlValue, SqliteConfig, SqliteProvider, Statement};
use tempfile::TempDir;

fn provider_for(dir: &TempDir, max_connections: u32) -> SqliteProvider {
    SqliteProvider::new(SqliteConfig {
        database_path: dir.path().join("saq.db"),
        max_connections,
    })
    .expect("provider")
}

async fn fresh_provider() -> (TempDir, SqliteProvider) {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = provider_for(&dir, 5);
    init_schema(&provider).await.expect("schema");
    (dir, provider)
}

/// Run `sql` once per parameter set and commit.
async fn seed(provider: &SqliteProvider, sql: &str, rows: &[&[&str]]) {
    let mut conn = provider.connect().await.expect("connect");
    for params in rows {
        let statement = Statement::new(sql, params.iter().map(|p| p.to_string()).collect());
        conn.execute(&statement).await.expect("seed insert");
    }
    conn.commit().await.expect("commit");
    conn.close().await.expect("close");
}

async fn query(provider: &SqliteProvider, sql: &str) -> Vec<Row> {
    let mut conn = provider.connect().await.expect("connect");
    let rows = conn
        .fetch_all(&Statement::new(sql, Vec::new()))
        .await
        .expect("query");
    conn.close().await.expect("close");
    rows
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn seed_catalogue(provider: &SqliteProvider) {
    seed(
        provider,
        "INSERT INTO [saq].[ListAlcools] VALUES (?, ?, ?, ?, ?)",
        &[&["1", "Gin", "Spirit", "40", "UK"], &["2", "Rhum", "Spirit", "40", "Cuba"]],
    )
    .await;
    seed(
        provider,
        "INSERT INTO [saq].[Cocktails] VALUES (?, ?)",
        &[&["10", "1"], &["20", "2"]],
    )
    .await;
    seed(
        provider,
        "INSERT INTO [saq].[CocktailDetails] VALUES (?, ?, ?, ?, ?, ?)",
        &[
            &["10", "Negroni", "Gin", "1", "Campari, vermouth", "Remuer"],
            &["20", "Mojito", "Rhum", "2", "Menthe, lime", "Piler"],
            // No matching Cocktails row; dropped by the inner join.
            &["30", "Gimlet", "Gin", "1", "Lime", "Secouer"],
        ],
    )
    .await;
}

#[tokio::test]
async fn read_cocktails_matches_alcools_through_inner_join() {
    let (_dir, provider) = fresh_provider().await;
    seed_catalogue(&provider).await;

    let rows = read_cocktails(&provider, &strings(&["Gin"])).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        Row::new(vec![
            SqlValue::from("Negroni"),
            SqlValue::from("Gin"),
            SqlValue::from("Campari, vermouth"),
            SqlValue::from("Remuer"),
        ])
    );

    let both = read_cocktails(&provider, &strings(&["Gin", "Rhum"])).await.unwrap();
    assert_eq!(both.len(), 2);
}

#[tokio::test]
async fn read_cocktails_with_no_alcools_is_an_error() {
    let (_dir, provider) = fresh_provider().await;
    seed_catalogue(&provider).await;

    let result = read_cocktails(&provider, &[]).await;
    assert!(matches!(result, Err(DbError::EmptyInList)));
}

#[tokio::test]
async fn read_stocks_excludes_empty_stock() {
    let (_dir, provider) = fresh_provider().await;
    seed_catalogue(&provider).await;
    seed(
        &provider,
        "INSERT INTO [saq].[Magasins] VALUES (?, ?, ?)",
        &[&["100", "SAQ Atwater", "Montréal"], &["200", "SAQ Limoilou", "Québec"]],
    )
    .await;
    seed(
        &provider,
        "INSERT INTO [saq].[Stocks_Alcool_Magasins] VALUES (?, ?, ?, ?)",
        &[&["100", "1", "1", "En stock"], &["200", "1", "0", "Rupture"]],
    )
    .await;

    let rows = read_stocks_in_shops(&provider, &strings(&["Gin"])).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some(&SqlValue::from("SAQ Atwater")));
    assert_eq!(rows[0].get(2), Some(&SqlValue::Integer(1)));
    assert_eq!(rows[0].get(4), Some(&SqlValue::from("Negroni")));
    assert_eq!(rows[0].len(), 8);
}

#[tokio::test]
async fn write_alcool_uses_integer_max_plus_one() {
    let (_dir, provider) = fresh_provider().await;
    // Text max would be "2"; the integer cast makes it 10.
    seed(
        &provider,
        "INSERT INTO [saq].[ListAlcools] (IDAlcool, NomAlcool) VALUES (?, ?)",
        &[&["1", "Gin"], &["2", "Rhum"], &["10", "Tequila"]],
    )
    .await;

    let msg = write_alcool(&provider, "Vodka", "Spirit", "40", "Russia")
        .await
        .unwrap();
    assert!(msg.contains("Vodka"));

    let rows = query(
        &provider,
        "SELECT IDAlcool, TypeAlcool, [Degré], Pays FROM [saq].[ListAlcools] WHERE NomAlcool = 'Vodka'",
    )
    .await;
    assert_eq!(
        rows,
        vec![Row::new(vec![
            SqlValue::from("11"),
            SqlValue::from("Spirit"),
            SqlValue::from("40"),
            SqlValue::from("Russia"),
        ])]
    );
}

#[tokio::test]
async fn write_alcool_into_empty_table_gets_null_id() {
    let (_dir, provider) = fresh_provider().await;

    write_alcool(&provider, "Vodka", "Spirit", "40", "Russia")
        .await
        .unwrap();

    let rows = query(&provider, "SELECT IDAlcool FROM [saq].[ListAlcools]").await;
    assert_eq!(rows, vec![Row::new(vec![SqlValue::Null])]);
}

#[tokio::test]
async fn written_cocktail_details_are_readable() {
    let (_dir, provider) = fresh_provider().await;
    seed_catalogue(&provider).await;
    // The next detail id will be 31.
    seed(&provider, "INSERT INTO [saq].[Cocktails] VALUES (?, ?)", &[&["31", "1"]]).await;

    let msg = write_cocktaildetails(&provider, "Gin Fizz", "Gin", "1", "Citron, soda", "Secouer")
        .await
        .unwrap();
    assert_eq!(msg, "The Gin Fizz was added to this table.");

    let rows = read_cocktails(&provider, &strings(&["Gin"])).await.unwrap();
    let names: Vec<_> = rows
        .iter()
        .filter_map(|r| r.get(0).and_then(SqlValue::as_text))
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(names.contains(&"Gin Fizz"));
    assert!(names.contains(&"Negroni"));
}

#[tokio::test]
async fn closing_without_commit_discards_writes() {
    let (_dir, provider) = fresh_provider().await;

    let mut conn = provider.connect().await.unwrap();
    conn.execute(&Statement::new(
        "INSERT INTO [saq].[Magasins] VALUES (?, ?, ?)",
        strings(&["1", "SAQ Express", "Laval"]),
    ))
    .await
    .unwrap();
    conn.close().await.unwrap();

    assert!(query(&provider, "SELECT * FROM [saq].[Magasins]").await.is_empty());
}

#[tokio::test]
async fn init_schema_is_idempotent() {
    let (_dir, provider) = fresh_provider().await;
    assert_eq!(init_schema(&provider).await.unwrap(), 5);
}

#[tokio::test]
async fn schema_and_writes_persist_in_database_file() {
    let dir = tempfile::tempdir().unwrap();

    let first = provider_for(&dir, 2);
    init_schema(&first).await.unwrap();
    write_alcool(&first, "Vodka", "Spirit", "40", "Russia")
        .await
        .unwrap();
    first.close().await;

    assert!(dir.path().join("saq.db").exists());

    // A brand-new pool on the same file sees the committed row.
    let second = provider_for(&dir, 2);
    let rows = query(&second, "SELECT NomAlcool FROM [saq].[ListAlcools]").await;
    assert_eq!(rows, vec![Row::new(vec![SqlValue::from("Vodka")])]);
    second.close().await;
}

#[tokio::test]
async fn rolled_back_session_returns_its_connection() {
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_for(&dir, 1);
    init_schema(&provider).await.unwrap();

    for _ in 0..3 {
        let mut conn = provider.connect().await.unwrap();
        conn.execute(&Statement::new(
            "INSERT INTO [saq].[Magasins] VALUES (?, ?, ?)",
            strings(&["1", "SAQ Express", "Laval"]),
        ))
        .await
        .unwrap();
        conn.close().await.unwrap();
    }

    // With a single pooled connection this only succeeds if every close gave it back.
    assert!(query(&provider, "SELECT * FROM [saq].[Magasins]").await.is_empty());
}
