/// Payment endpoints
///
/// # Endpoints
///
/// - `POST /v1/tenants/:tenant_id/payments` - Record a payment (201)
/// - `GET /v1/tenants/:tenant_id/payments?month=&year=` - History, newest first
/// - `GET /v1/tenants/:tenant_id/payments/status?month=&year=` - Period status
/// - `GET|PUT|PATCH|DELETE /v1/tenants/:tenant_id/payments/:payment_id`
///
/// Clients send the bill components and the amount paid. `totalDue` and
/// `balance` are always computed by the server; any values sent for them
/// are ignored.

use super::PeriodQuery;
use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rentledger_shared::{
    auth::middleware::AuthContext,
    ledger::payment::{Payment, PaymentInput, PaymentUpdate},
    services::PeriodReport,
};
use uuid::Uuid;

/// Records a payment for one of the owner's tenants
///
/// # Request
///
/// ```json
/// {
///   "month": 6,
///   "year": 2025,
///   "rent": 18000,
///   "electricityBill": 1500,
///   "waterCharge": 400,
///   "amountPaid": 10000
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: A field is missing, negative or not finite
/// - `404 Not Found`: Unknown tenant
pub async fn add_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    JsonBody(req): JsonBody<PaymentInput>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let payment = state.ledger.add_payment(auth.user_id, tenant_id, req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((tenant_id, payment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Payment>> {
    Ok(Json(state.ledger.payment(auth.user_id, tenant_id, payment_id).await?))
}

/// Applies a partial update; omitted fields keep their values
pub async fn update_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((tenant_id, payment_id)): Path<(Uuid, Uuid)>,
    JsonBody(req): JsonBody<PaymentUpdate>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .ledger
        .update_payment(auth.user_id, tenant_id, payment_id, req)
        .await?;
    Ok(Json(payment))
}

pub async fn remove_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((tenant_id, payment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .ledger
        .remove_payment(auth.user_id, tenant_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Payment history, optionally filtered by year and/or month
pub async fn payment_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<Payment>>> {
    let history = state
        .ledger
        .payment_history(auth.user_id, tenant_id, query.filter())
        .await?;
    Ok(Json(history))
}

/// Status for the requested period, defaulting to the current one
pub async fn period_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PeriodReport>> {
    let report = state
        .ledger
        .period_status(auth.user_id, tenant_id, query.period()?)
        .await?;
    Ok(Json(report))
}
