/// Tenant self-service endpoints
///
/// - `GET /v1/me` - The tenant's full record
/// - `GET /v1/me/status?month=&year=` - Standing for a period (default: current)
/// - `GET /v1/me/payments?month=&year=` - Own payment history, newest first

use super::PeriodQuery;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rentledger_shared::{
    auth::middleware::AuthContext, ledger::payment::Payment, models::tenant::Tenant,
    services::PeriodReport,
};

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Tenant>> {
    Ok(Json(state.tenants.tenant_self(auth.user_id).await?))
}

pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PeriodReport>> {
    let report = state.ledger.own_status(auth.user_id, query.period()?).await?;
    Ok(Json(report))
}

pub async fn payments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<Payment>>> {
    let history = state.ledger.own_history(auth.user_id, query.filter()).await?;
    Ok(Json(history))
}
