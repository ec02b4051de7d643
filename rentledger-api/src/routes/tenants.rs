/// Owner endpoints for tenant details
///
/// # Endpoints
///
/// - `GET /v1/tenants?month=&year=` - The owner's tenants with their status
/// - `GET /v1/tenants/:tenant_id` - One tenant's full record
/// - `PUT /v1/tenants/:tenant_id` - Edit name, email and house number
///
/// A tenant belonging to another owner is reported as not found.

use super::PeriodQuery;
use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rentledger_shared::{
    auth::middleware::AuthContext,
    ledger::summary::{current_period_status, PeriodStatus},
    models::tenant::{Tenant, TenantUpdate},
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// A tenant record with its standing for the selected period
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantListEntry {
    #[serde(flatten)]
    pub tenant: Tenant,

    pub current_status: PeriodStatus,
}

/// Lists the owner's tenants in signup order
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<TenantListEntry>>> {
    let period = query.period()?;
    let tenants = state.tenants.list_tenants(auth.user_id).await?;

    let entries = tenants
        .into_iter()
        .map(|tenant| TenantListEntry {
            current_status: current_period_status(&tenant, period),
            tenant,
        })
        .collect();

    Ok(Json(entries))
}

pub async fn get_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
) -> ApiResult<Json<Tenant>> {
    Ok(Json(state.tenants.tenant(auth.user_id, tenant_id).await?))
}

/// Edits a tenant's details
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Malformed email or overlong fields
/// - `409 Conflict`: Email belongs to another account
pub async fn update_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    JsonBody(req): JsonBody<TenantUpdate>,
) -> ApiResult<Json<Tenant>> {
    req.validate()?;

    let tenant = state
        .tenants
        .update_details(auth.user_id, tenant_id, req)
        .await?;
    Ok(Json(tenant))
}
