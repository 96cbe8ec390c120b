use alumnet_application::{AlumniService, EmploymentService};

use crate::api_services::StoreBackend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub employment_service: EmploymentService,
    pub alumni_service: AlumniService,
    pub bootstrap_token: String,
    pub store_backend: StoreBackend,
}
