//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_alumni_repository;
mod in_memory_employment_store;
mod postgres_alumni_repository;
mod postgres_employment_store;
mod store_timeout;

pub use in_memory_alumni_repository::InMemoryAlumniRepository;
pub use in_memory_employment_store::InMemoryEmploymentRecordStore;
pub use postgres_alumni_repository::PostgresAlumniRepository;
pub use postgres_employment_store::PostgresEmploymentRecordStore;
pub use store_timeout::DEFAULT_STORE_TIMEOUT;
