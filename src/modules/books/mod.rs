pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Migration, Module};

use repository::BookRepository;

/// Book catalogue module, served under `/books`
pub struct BooksModule {
    repository: Arc<dyn BookRepository>,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }
}

/// Schema for the `books` table. Identifiers are generated by the database.
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS books (
                id           TEXT             PRIMARY KEY DEFAULT gen_random_uuid()::text,
                title        TEXT             NOT NULL,
                author       TEXT             NOT NULL,
                publisher    TEXT             NOT NULL,
                language     TEXT             NOT NULL,
                price        DOUBLE PRECISION NOT NULL,
                is_available BOOLEAN          NOT NULL,
                description  TEXT             NOT NULL DEFAULT ''
            );
            "#,
    }]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.repository))
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module over the given repository
pub fn create_module(repository: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}
