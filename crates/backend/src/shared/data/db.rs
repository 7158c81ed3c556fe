use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Tables owned by this service. Idempotent; runs on every start.
const SCHEMA: &[(&str, &str)] = &[
    (
        "a025_metric_goal",
        r#"
        CREATE TABLE IF NOT EXISTS a025_metric_goal (
            id TEXT PRIMARY KEY NOT NULL,
            metric_type TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            value REAL NOT NULL,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "idx_a025_metric_goal_period",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_a025_metric_goal_period
            ON a025_metric_goal (metric_type, year, month);
        "#,
    ),
    (
        "p910_funnel_counters",
        r#"
        CREATE TABLE IF NOT EXISTS p910_funnel_counters (
            date TEXT NOT NULL,
            funnel TEXT NOT NULL,
            leads REAL NOT NULL DEFAULT 0,
            mqls REAL NOT NULL DEFAULT 0,
            agendamentos REAL NOT NULL DEFAULT 0,
            reunioes REAL NOT NULL DEFAULT 0,
            vendas REAL NOT NULL DEFAULT 0,
            investimento REAL NOT NULL DEFAULT 0,
            faturamento REAL NOT NULL DEFAULT 0,
            cash_collect REAL NOT NULL DEFAULT 0,
            updated_at TEXT,
            PRIMARY KEY (date, funnel)
        );
        "#,
    ),
];

/// Connect to the SQLite file at `db_file`, create missing tables and keep
/// the connection for [`get_connection`].
pub async fn initialize_database(db_file: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database at {}", absolute_path.display());
    let mut opts = ConnectOptions::new(db_url);
    opts.sqlx_logging(false);
    let conn = Database::connect(opts).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring {}", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

/// Fresh in-memory database with the schema applied. One connection only:
/// every pooled SQLite memory connection would be a separate database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name;".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        assert!(names.contains(&"a025_metric_goal".to_string()));
        assert!(names.contains(&"p910_funnel_counters".to_string()));
    }
}
