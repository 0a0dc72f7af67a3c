//! SurrealDB implementation of [`StaffRepository`].
//!
//! `clear_user_links` backs the destructive relink pass: the stored
//! back-reference is derived state, recomputed from phone matches.

use chrono::{DateTime, Utc};
use medsync_core::error::MedsyncResult;
use medsync_core::models::staff::{CreateStaff, Staff, StaffStatus, UpdateStaff};
use medsync_core::repository::{PaginatedResult, Pagination, StaffRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct StaffRow {
    name: String,
    phone: Option<String>,
    email: Option<String>,
    user_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct StaffRowWithId {
    record_id: String,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    user_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<StaffStatus, DbError> {
    match s {
        "Active" => Ok(StaffStatus::Active),
        "Inactive" => Ok(StaffStatus::Inactive),
        other => Err(DbError::Decode(format!("unknown staff status: {other}"))),
    }
}

fn status_to_string(s: &StaffStatus) -> &'static str {
    match s {
        StaffStatus::Active => "Active",
        StaffStatus::Inactive => "Inactive",
    }
}

fn parse_opt_uuid(raw: Option<String>) -> Result<Option<Uuid>, DbError> {
    raw.map(|s| {
        Uuid::parse_str(&s).map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))
    })
    .transpose()
}

impl StaffRow {
    fn into_staff(self, id: Uuid) -> Result<Staff, DbError> {
        Ok(Staff {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            user_id: parse_opt_uuid(self.user_id)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl StaffRowWithId {
    fn try_into_staff(self) -> Result<Staff, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Staff {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            user_id: parse_opt_uuid(self.user_id)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Staff repository.
#[derive(Clone)]
pub struct SurrealStaffRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStaffRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StaffRepository for SurrealStaffRepository<C> {
    async fn create(&self, input: CreateStaff) -> MedsyncResult<Staff> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('staff', $id) SET \
                 name = $name, phone = $phone, email = $email, \
                 user_id = $user_id, status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("phone", input.phone))
            .bind(("email", input.email))
            .bind(("user_id", input.user_id.map(|u| u.to_string())))
            .bind(("status", status_to_string(&input.status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MedsyncResult<Staff> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('staff', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateStaff) -> MedsyncResult<Staff> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.phone.is_some() {
            sets.push("phone = $phone");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.user_id.is_some() {
            sets.push("user_id = $user_id");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('staff', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(phone) = input.phone {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("phone", phone));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(user_id) = input.user_id {
            builder = builder.bind(("user_id", user_id.map(|u| u.to_string())));
        }
        if let Some(ref status) = input.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn list(&self, pagination: Pagination) -> MedsyncResult<PaginatedResult<Staff>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM staff GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM staff \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_staff())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn set_user_link(&self, id: Uuid, user_id: Option<Uuid>) -> MedsyncResult<Staff> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('staff', $id) SET \
                 user_id = $user_id, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.map(|u| u.to_string())))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn clear_user_links(&self) -> MedsyncResult<u64> {
        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM staff \
                 WHERE user_id != NONE GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let cleared = count_rows.first().map(|r| r.total).unwrap_or(0);

        self.db
            .query(
                "UPDATE staff SET user_id = NONE, \
                 updated_at = time::now() \
                 WHERE user_id != NONE",
            )
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(cleared)
    }
}
