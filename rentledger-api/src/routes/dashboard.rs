/// Owner dashboard
///
/// - `GET /v1/dashboard/summary?month=&year=` - Collected and pending totals
/// - `GET /v1/dashboard/tenants?month=&year=` - One status row per tenant
///
/// Both default to the current month and year.

use super::PeriodQuery;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rentledger_shared::{
    auth::middleware::AuthContext,
    ledger::summary::{OwnerSummary, TenantStatusRow},
};

pub async fn summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<OwnerSummary>> {
    let summary = state
        .ledger
        .owner_summary(auth.user_id, query.period()?)
        .await?;
    Ok(Json(summary))
}

pub async fn tenant_overview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<TenantStatusRow>>> {
    let rows = state
        .ledger
        .tenant_overview(auth.user_id, query.period()?)
        .await?;
    Ok(Json(rows))
}
