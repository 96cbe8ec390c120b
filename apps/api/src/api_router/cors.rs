use alumnet_core::AppError;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Methods used by the employment, alumni and auth routes.
const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the credentialed CORS layer for a comma-separated list of frontend origins.
pub(super) fn build_cors_layer(frontend_origins: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(frontend_origins)?))
        .allow_credentials(true)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE]))
}

fn parse_origins(frontend_origins: &str) -> Result<Vec<HeaderValue>, AppError> {
    let origins = frontend_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(AppError::Validation(
                    "FRONTEND_URL cannot be a wildcard when session cookies are used".to_owned(),
                ));
            }

            HeaderValue::from_str(origin.trim_end_matches('/')).map_err(|error| {
                AppError::Validation(format!("invalid FRONTEND_URL origin '{origin}': {error}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(AppError::Validation(
            "FRONTEND_URL must name at least one origin".to_owned(),
        ));
    }

    Ok(origins)
}
