use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/guide.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Минимальный bootstrap схемы: создать отсутствующие таблицы и колонки
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    // a001_category
    ensure_table(
        conn,
        "a001_category",
        r#"
            CREATE TABLE a001_category (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                hidden INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // a002_subcategory
    ensure_table(
        conn,
        "a002_subcategory",
        r#"
            CREATE TABLE a002_subcategory (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                category_id TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                hidden INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // a003_location
    ensure_table(
        conn,
        "a003_location",
        r#"
            CREATE TABLE a003_location (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                hidden INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // a004_business: images и tags хранятся как JSON-массивы в TEXT
    ensure_table(
        conn,
        "a004_business",
        r#"
            CREATE TABLE a004_business (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                whatsapp TEXT NOT NULL DEFAULT '',
                instagram TEXT NOT NULL DEFAULT '',
                tripadvisor TEXT,
                website TEXT,
                logo TEXT,
                images TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '[]',
                rating REAL NOT NULL DEFAULT 0,
                review_count INTEGER NOT NULL DEFAULT 0,
                is_premium INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'pending',
                category_id TEXT,
                subcategory_id TEXT,
                location_id TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // Колонки, добавленные после первых версий схемы
    ensure_column(conn, "a004_business", "tripadvisor", "TEXT").await?;
    ensure_column(conn, "a004_business", "location_id", "TEXT").await?;

    Ok(())
}

async fn ensure_table(conn: &DatabaseConnection, table: &str, create_sql: &str) -> anyhow::Result<()> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let exists = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;

    if exists.is_empty() {
        tracing::info!("Creating {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn ensure_column(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
    definition: &str,
) -> anyhow::Result<()> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let cols = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    let has_column = cols.iter().any(|row| {
        let name: String = row.try_get("", "name").unwrap_or_default();
        name == column
    });
    if !has_column {
        tracing::info!("Adding {} column to {}", column, table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("ALTER TABLE {} ADD COLUMN {} {};", table, column, definition),
        ))
        .await?;
    }
    Ok(())
}
