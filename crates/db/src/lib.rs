//! PostgreSQL pool factory and migration runner.

use std::time::Duration;

use bookstore_kernel::settings::DatabaseSettings;
use bookstore_kernel::Migration;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Errors raised while bootstrapping the database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to connect to database at {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const LEDGER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT        NOT NULL,
        id         TEXT        NOT NULL,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (module, id)
    )
"#;

/// Typed connection options for the configured server. TLS is disabled.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
        .ssl_mode(PgSslMode::Disable)
}

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
}

/// Build the shared pool and ping the server once.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let connect_err = |source| DbError::Connect {
        host: settings.host.clone(),
        port: settings.port,
        source,
    };

    let pool = pool_options(settings)
        .connect_with(connect_options(settings))
        .await
        .map_err(connect_err)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(connect_err)?;

    tracing::info!(
        target: "bookstore-db",
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "connected to the database"
    );

    Ok(pool)
}

/// Apply every migration not yet recorded in `schema_migrations`.
///
/// Each migration runs in its own transaction together with its ledger row.
/// Returns the number of migrations applied by this call.
pub async fn run_migrations(
    pool: &PgPool,
    migrations: &[(String, Migration)],
) -> Result<usize, DbError> {
    sqlx::raw_sql(LEDGER_DDL).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let migration_err = |source| DbError::Migration {
            module: module.clone(),
            id: migration.id,
            source,
        };

        let already_applied: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM schema_migrations WHERE module = $1 AND id = $2)",
        )
        .bind(module)
        .bind(migration.id)
        .fetch_one(pool)
        .await?;

        if already_applied {
            tracing::debug!(target: "bookstore-db", %module, id = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(migration_err)?;
        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES ($1, $2)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .map_err(migration_err)?;
        tx.commit().await?;

        tracing::info!(target: "bookstore-db", %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            host: "db.internal".to_string(),
            port: 6543,
            user: "librarian".to_string(),
            password: "secret".to_string(),
            name: "catalogue".to_string(),
            ..DatabaseSettings::default()
        }
    }

    #[test]
    fn connect_options_follow_settings() {
        let options = connect_options(&settings());

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "librarian");
        assert_eq!(options.get_database(), Some("catalogue"));
    }

    #[test]
    fn connect_error_names_the_target() {
        let err = DbError::Connect {
            host: "db.internal".to_string(),
            port: 6543,
            source: sqlx::Error::PoolTimedOut,
        };
        assert!(err.to_string().contains("db.internal:6543"));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn migrations_are_applied_once() {
        let mut database = DatabaseSettings::default();
        if let Ok(host) = std::env::var("DB_HOST") {
            database.host = host;
        }
        let pool = connect(&database).await.unwrap();
        let migrations = vec![(
            "db_selftest".to_string(),
            Migration {
                id: "001_selftest",
                up: "CREATE TABLE IF NOT EXISTS db_selftest_marker (id INT)",
            },
        )];

        run_migrations(&pool, &migrations).await.unwrap();
        assert_eq!(run_migrations(&pool, &migrations).await.unwrap(), 0);
    }
}
