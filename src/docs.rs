use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bursar_models::{AccountView, RegisterRequest, TokenRequest, TokenResponse};

use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::token,
        crate::modules::auth::controller::me,
        crate::modules::accounts::controller::list_accounts,
    ),
    components(
        schemas(
            AccountView,
            RegisterRequest,
            TokenRequest,
            TokenResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration, tokens and the current account"),
        (name = "Accounts", description = "Account listing with filters, sorting and pagination")
    ),
    info(
        title = "Bursar API",
        version = "0.1.0",
        description = "Account registration and token authentication for a school-management backend.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
