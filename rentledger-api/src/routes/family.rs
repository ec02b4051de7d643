/// Family member endpoints
///
/// - `POST /v1/tenants/:tenant_id/family-members`
/// - `PUT /v1/tenants/:tenant_id/family-members/:member_id`
/// - `DELETE /v1/tenants/:tenant_id/family-members/:member_id`

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rentledger_shared::{
    auth::middleware::AuthContext,
    models::family_member::{FamilyMember, FamilyMemberUpdate, NewFamilyMember},
};
use uuid::Uuid;
use validator::Validate;

pub async fn add_family_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    JsonBody(req): JsonBody<NewFamilyMember>,
) -> ApiResult<(StatusCode, Json<FamilyMember>)> {
    req.validate()?;

    let member = state
        .tenants
        .add_family_member(auth.user_id, tenant_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_family_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((tenant_id, member_id)): Path<(Uuid, Uuid)>,
    JsonBody(req): JsonBody<FamilyMemberUpdate>,
) -> ApiResult<Json<FamilyMember>> {
    req.validate()?;

    let member = state
        .tenants
        .update_family_member(auth.user_id, tenant_id, member_id, req)
        .await?;
    Ok(Json(member))
}

/// Removes a family member and returns the removed entry
pub async fn remove_family_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((tenant_id, member_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<FamilyMember>> {
    let member = state
        .tenants
        .remove_family_member(auth.user_id, tenant_id, member_id)
        .await?;
    Ok(Json(member))
}
