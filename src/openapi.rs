use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{ClassInput, ClassSchedule, ClassType};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            return;
        };
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_classes,
        crate::handlers::get_ical,
        crate::handlers::list_all_classes,
        crate::handlers::get_class,
        crate::handlers::create_class,
        crate::handlers::update_class,
        crate::handlers::delete_class
    ),
    components(schemas(ClassSchedule, ClassInput, ClassType)),
    tags(
        (name = "schedule", description = "Public class schedule"),
        (name = "admin", description = "Class management (token required only when APP_AUTH_TOKEN is set)"),
        (name = "health", description = "Liveness and readiness probes")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_crud_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/classes"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/admin/classes/{id}"));
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
