//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use migrations::{
    run_storage_migrations, storage_migrations, Migration, Migrator, PostgresMigrator,
    ACADEMIC_SEMESTERS_COLLECTION, USERS_COLLECTION,
};
pub use postgres::{PostgresConfig, PostgresStorage};
