//! API router with the OpenAPI document

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::common::{DetailBody, EmptyData};
use super::middleware::{admin_middleware, auth_middleware, AuthState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health, users};
use super::SharedAccountService;
use crate::application::AccountService;
use crate::config::CorsConfig;
use crate::domain::AccountRepositoryInterface;
use crate::infrastructure::crypto::JwtConfig;

/// Router state. Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub service: SharedAccountService,
    pub auth: AuthState,
}

impl ApiState {
    pub fn new(accounts: Arc<dyn AccountRepositoryInterface>, jwt_config: JwtConfig) -> Self {
        Self {
            service: Arc::new(AccountService::new(accounts.clone(), jwt_config.clone())),
            auth: AuthState {
                jwt_config,
                accounts,
            },
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthHandlerState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<ApiState> for users::UsersState {
    fn from_ref(s: &ApiState) -> Self {
        users::UsersState {
            service: Arc::clone(&s.service),
        }
    }
}

/// Security scheme modifier for OpenAPI
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
                        .description(Some("Token returned by POST /login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        auth::login,
        users::list_example_users,
        users::update_own_language,
        users::set_user_active,
        users::set_user_language,
        users::set_user_role,
        users::patch_user,
    ),
    components(
        schemas(
            EmptyData,
            DetailBody,
            health::HealthResponse,
            health::RootResponse,
            auth::LoginRequest,
            auth::LoginData,
            users::UpdateOwnLanguageRequest,
            users::SetActiveRequest,
            users::SetLanguageRequest,
            users::SetRoleRequest,
            users::PatchUserRequest,
            users::OwnLanguageData,
            users::UserActiveData,
            users::UserLanguageData,
            users::UserRoleData,
            users::PatchedUserData,
            users::ExampleUserDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Login issuing bearer tokens"),
        (name = "Users", description = "Self-service profile and demo accounts"),
        (name = "Admin Users", description = "Account management for admins and superadmins"),
    ),
    info(
        title = "Auth Control API",
        version = "0.1.0",
        description = "Authentication and user management"
    )
)]
pub struct ApiDoc;

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if cors.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router with all routes
pub fn create_api_router(state: ApiState, cors: &CorsConfig) -> Router {
    let auth_state = state.auth.clone();

    // Public routes
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/users/examples", get(users::list_example_users))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );

    // Any active account. route_layer keeps unmatched paths out of auth.
    let self_routes = Router::new()
        .route("/users/me", put(users::update_own_language))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    // Admin / superadmin only; auth_middleware runs first
    let admin_routes = Router::new()
        .route("/users/{user_id}", patch(users::patch_user))
        .route("/users/{user_id}/active", put(users::set_user_active))
        .route("/users/{user_id}/language", put(users::set_user_language))
        .route("/users/{user_id}/role", put(users::set_user_role))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(self_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
