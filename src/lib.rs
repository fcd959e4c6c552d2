//! Book catalogue service library
//!
//! Wires the books module onto the kernel registry and exposes the bootstrap
//! entrypoints shared by the `bookstore` binary and the CLI.

pub mod modules;

use anyhow::Context;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use sqlx::PgPool;

/// Re-export commonly used types
pub use modules::*;

/// Connect to the database, register modules and bring the schema up to date.
async fn prepare(settings: &Settings) -> anyhow::Result<(PgPool, ModuleRegistry, usize)> {
    let pool = bookstore_db::connect(&settings.database)
        .await
        .context("failed to connect to the database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &pool);

    let applied = bookstore_db::run_migrations(&pool, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations up to date");

    Ok((pool, registry, applied))
}

/// Apply pending schema migrations and return how many ran.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let (pool, _registry, applied) = prepare(settings).await?;
    pool.close().await;
    Ok(applied)
}

/// Connect, migrate, run the module lifecycle and serve HTTP until Ctrl-C.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let (pool, registry, _) = prepare(settings).await?;
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookstore_http::start_server(&registry, settings).await;

    registry.stop_all().await?;
    pool.close().await;

    served
}
