/// Application state and router configuration
///
/// This module builds the Axum router with all routes and middleware.
///
/// # Route layout
///
/// - `/health` - public
/// - `/v1/auth/{register,login,refresh}` - public
/// - `/v1/auth/profile` - any authenticated account
/// - `/v1/tenants/..`, `/v1/messages`, `/v1/dashboard/..` - owners only
/// - `/v1/me/..` - tenants only

use crate::config::Config;
use crate::middleware::security::{security_headers, SecurityHeaders};
use crate::routes;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use rentledger_shared::auth::middleware::{create_jwt_middleware, require_owner, require_tenant};
use rentledger_shared::services::{AccountService, LedgerService, TenantService};
use rentledger_shared::store::RecordStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Record store the services run against
    pub store: Arc<dyn RecordStore>,

    /// Registration, login and profiles
    pub accounts: AccountService,

    /// Payments, status and aggregates
    pub ledger: LedgerService,

    /// Tenant details, family members and messages
    pub tenants: TenantService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state over `store`
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self {
            accounts: AccountService::new(store.clone()),
            ledger: LedgerService::new(store.clone()),
            tenants: TenantService::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }

    /// Returns JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete application router
pub fn build_router(state: AppState) -> Router {
    let jwt = create_jwt_middleware(state.config.jwt.secret.clone());

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .merge(
            Router::new()
                .route("/profile", get(routes::auth::profile))
                .layer(middleware::from_fn(jwt.clone())),
        );

    let owner_routes = Router::new()
        .route("/tenants", get(routes::tenants::list_tenants))
        .route(
            "/tenants/:tenant_id",
            get(routes::tenants::get_tenant).put(routes::tenants::update_tenant),
        )
        .route(
            "/tenants/:tenant_id/family-members",
            post(routes::family::add_family_member),
        )
        .route(
            "/tenants/:tenant_id/family-members/:member_id",
            put(routes::family::update_family_member).delete(routes::family::remove_family_member),
        )
        .route(
            "/tenants/:tenant_id/payments",
            get(routes::payments::payment_history).post(routes::payments::add_payment),
        )
        .route(
            "/tenants/:tenant_id/payments/status",
            get(routes::payments::period_status),
        )
        .route(
            "/tenants/:tenant_id/payments/:payment_id",
            get(routes::payments::get_payment)
                .put(routes::payments::update_payment)
                .patch(routes::payments::update_payment)
                .delete(routes::payments::remove_payment),
        )
        .route("/messages", post(routes::messages::send_message))
        .route("/dashboard/summary", get(routes::dashboard::summary))
        .route("/dashboard/tenants", get(routes::dashboard::tenant_overview))
        .layer(middleware::from_fn(require_owner))
        .layer(middleware::from_fn(jwt.clone()));

    let tenant_routes = Router::new()
        .route("/me", get(routes::me::me))
        .route("/me/status", get(routes::me::status))
        .route("/me/payments", get(routes::me::payments))
        .layer(middleware::from_fn(require_tenant))
        .layer(middleware::from_fn(jwt));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(owner_routes)
        .merge(tenant_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/v1", v1_routes)
        .layer(cors_layer(&state.config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn_with_state(
            SecurityHeaders::new(state.config.api.production),
            security_headers,
        ))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.api.cors_origins;

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
