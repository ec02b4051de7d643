/// Common test utilities for integration tests
///
/// Builds the full router over a fresh in-memory store seeded with the demo
/// owner (John Doe) and two tenants for June 2025, and provides helpers to
/// drive it with JSON requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rentledger_api::app::{build_router, AppState};
use rentledger_api::config::{ApiConfig, Config, JwtConfig, LogFormat, StoreBackend, StoreConfig};
use rentledger_shared::auth::jwt::issue_token_pair;
use rentledger_shared::ledger::period::Period;
use rentledger_shared::models::tenant::Tenant;
use rentledger_shared::models::user::Role;
use rentledger_shared::store::seed::seed_demo_data;
use rentledger_shared::store::{MemoryStore, RecordStore};
use serde_json::Value;
use tower::Service as _;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<dyn RecordStore>,
    pub app: axum::Router,
    pub period: Period,
    pub owner_id: Uuid,
    pub owner_token: String,
    /// Alice Smith, A-101: fully paid for `period`
    pub alice: Tenant,
    pub alice_token: String,
    /// Michael Johnson, B-204: partially paid for `period`
    pub michael: Tenant,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        seed_demo_data: true,
        log_format: LogFormat::Text,
    }
}

impl TestContext {
    /// Creates a new test context over a seeded in-memory store
    pub async fn new() -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let period = Period::new(6, 2025)?;

        let owner_id = seed_demo_data(store.as_ref(), period)
            .await?
            .ok_or_else(|| anyhow::anyhow!("fresh store should be seeded"))?;

        let tenants = store.list_tenants_for_owner(owner_id).await?;
        let [alice, michael]: [Tenant; 2] = tenants
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected two demo tenants"))?;

        let owner_token = issue_token_pair(owner_id, Role::Owner, TEST_SECRET)?.access_token;
        let alice_token = issue_token_pair(alice.id, Role::Tenant, TEST_SECRET)?.access_token;

        let app = build_router(AppState::new(store.clone(), test_config()));

        Ok(TestContext {
            store,
            app,
            period,
            owner_id,
            owner_token,
            alice,
            alice_token,
            michael,
        })
    }

    /// Sends a request and returns the status with the parsed JSON body
    ///
    /// Empty bodies come back as `Value::Null`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .call(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body ({}): {}", status, String::from_utf8_lossy(&bytes))
            })
        };

        (status, json)
    }

    /// GET as the demo owner
    pub async fn owner_get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(&self.owner_token), None).await
    }

    /// `?month=6&year=2025` for the seeded period
    pub fn period_query(&self) -> String {
        format!("month={}&year={}", self.period.month, self.period.year)
    }
}
