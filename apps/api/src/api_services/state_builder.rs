use std::sync::Arc;
use std::time::Duration;

use alumnet_application::{
    AlumniRepository, AlumniService, EmploymentRecordStore, EmploymentService, OwnershipResolver,
};
use alumnet_infrastructure::{
    InMemoryAlumniRepository, InMemoryEmploymentRecordStore, PostgresAlumniRepository,
    PostgresEmploymentRecordStore,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Which adapter family backs the record stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    InMemory,
}

impl StoreBackend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::InMemory => "memory",
        }
    }
}

/// Storage adapters shared by the alumni and employment services.
#[derive(Clone)]
pub struct RecordStores {
    pub backend: StoreBackend,
    pub alumni_repository: Arc<dyn AlumniRepository>,
    pub employment_store: Arc<dyn EmploymentRecordStore>,
}

impl RecordStores {
    pub fn postgres(pool: &PgPool, timeout: Duration) -> Self {
        Self {
            backend: StoreBackend::Postgres,
            alumni_repository: Arc::new(PostgresAlumniRepository::with_timeout(
                pool.clone(),
                timeout,
            )),
            employment_store: Arc::new(PostgresEmploymentRecordStore::with_timeout(
                pool.clone(),
                timeout,
            )),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            alumni_repository: Arc::new(InMemoryAlumniRepository::new()),
            employment_store: Arc::new(InMemoryEmploymentRecordStore::new()),
        }
    }
}

pub fn build_app_state(stores: RecordStores, bootstrap_token: String) -> AppState {
    let ownership_resolver = OwnershipResolver::new(stores.alumni_repository.clone());
    let store_backend = stores.backend;

    AppState {
        employment_service: EmploymentService::new(
            ownership_resolver,
            stores.employment_store.clone(),
            stores.alumni_repository.clone(),
        ),
        alumni_service: AlumniService::new(stores.alumni_repository, stores.employment_store),
        bootstrap_token,
        store_backend,
    }
}
