//! OpenAPI documentation configuration

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Declares the `bearer_auth` scheme referenced by protected operations
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employees API",
        version = "0.1.0",
        description = "Employee records with pagination, skill search and salary statistics, backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/employees", api = domain_employees::ApiDoc),
        (path = "/api/auth", api = domain_users::ApiDoc)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employees", description = "Employee records, search and salary statistics"),
        (name = "Auth", description = "Login, registration and the current user")
    )
)]
pub struct ApiDoc;
