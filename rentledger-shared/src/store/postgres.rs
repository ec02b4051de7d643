/// PostgreSQL record store
///
/// Owners and tenants share the `users` table. Tenant rows carry the
/// household, payments and messages as JSONB arrays, so a tenant document is
/// read and written as a single row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::RecordStore;
use crate::db::pool::health_check;
use crate::error::{StoreError, StoreResult};
use crate::ledger::payment::Payment;
use crate::models::family_member::FamilyMember;
use crate::models::message::Message;
use crate::models::tenant::Tenant;
use crate::models::user::{normalize_email, Role, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, house_number, owner_id, \
     family_members, payments, messages, created_at, updated_at";

/// Raw `users` row
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    house_number: Option<String>,
    owner_id: Option<Uuid>,
    family_members: Json<Vec<FamilyMember>>,
    payments: Json<Vec<Payment>>,
    messages: Json<Vec<Message>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn to_user(&self) -> StoreResult<User> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e: String| StoreError::Corrupt(format!("user {}: {}", self.id, e)))?;

        Ok(User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    fn into_tenant(self) -> StoreResult<Tenant> {
        let (house_number, owner_id) = match (self.house_number, self.owner_id) {
            (Some(house), Some(owner)) => (house, owner),
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "tenant {} is missing house number or owner",
                    self.id
                )))
            }
        };

        Ok(Tenant {
            id: self.id,
            name: self.name,
            email: self.email,
            house_number,
            owner_id,
            family_members: self.family_members.0,
            payments: self.payments.0,
            messages: self.messages.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateEmail(email.to_string())
        }
        _ => StoreError::Database(err),
    }
}

/// [`RecordStore`] backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool; run migrations before first use
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self, user, tenant), fields(user_id = %user.id, role = %user.role))]
    async fn create_user(&self, mut user: User, tenant: Option<Tenant>) -> StoreResult<User> {
        user.email = normalize_email(&user.email);

        let (house_number, owner_id, family, payments, messages) = match tenant {
            Some(t) => (
                Some(t.house_number),
                Some(t.owner_id),
                t.family_members,
                t.payments,
                t.messages,
            ),
            None => (None, None, Vec::new(), Vec::new(), Vec::new()),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, house_number, owner_id,
                               family_members, payments, messages, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(house_number)
        .bind(owner_id)
        .bind(Json(family))
        .bind(Json(payments))
        .bind(Json(messages))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user.email))?;

        debug!("User inserted");
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(UserRow::to_user).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(UserRow::to_user).transpose()
    }

    async fn find_tenant(&self, id: Uuid) -> StoreResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND role = 'tenant'",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_tenant).transpose()
    }

    async fn list_tenants_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Tenant>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE owner_id = $1 AND role = 'tenant' ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_tenant).collect()
    }

    #[instrument(skip(self, tenant), fields(tenant_id = %tenant.id))]
    async fn save_tenant(&self, tenant: &Tenant) -> StoreResult<()> {
        let email = normalize_email(&tenant.email);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, house_number = $4,
                family_members = $5, payments = $6, messages = $7, updated_at = $8
            WHERE id = $1 AND role = 'tenant'
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&email)
        .bind(&tenant.house_number)
        .bind(Json(&tenant.family_members))
        .bind(Json(&tenant.payments))
        .bind(Json(&tenant.messages))
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &email))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Tenant",
                id: tenant.id,
            });
        }

        debug!("Tenant saved");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }
}
