pub mod books;

use std::sync::Arc;

use bookstore_kernel::ModuleRegistry;
use sqlx::PgPool;

/// Register every service module, wiring each to the shared pool
pub fn register_all(registry: &mut ModuleRegistry, pool: &PgPool) {
    let repository = Arc::new(books::repository::PgBookRepository::new(pool.clone()));
    registry.register(books::create_module(repository));
}
