pub mod app_config;
pub mod database;
pub mod memory;
pub mod redis_repo;

pub use database::DbClient;
pub use memory::InMemoryDocumentStore;
pub use redis_repo::RedisClient;
