//! SurrealDB implementation of [`PatientRepository`].

use chrono::{DateTime, Utc};
use medsync_core::error::MedsyncResult;
use medsync_core::models::patient::{CreatePatient, Patient, PatientStatus, UpdatePatient};
use medsync_core::repository::{PaginatedResult, Pagination, PatientRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct PatientRow {
    email: Option<String>,
    phone: Option<String>,
    status: String,
    name: String,
    last_name: String,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct PatientRowWithId {
    record_id: String,
    email: Option<String>,
    phone: Option<String>,
    status: String,
    name: String,
    last_name: String,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<PatientStatus, DbError> {
    match s {
        "Active" => Ok(PatientStatus::Active),
        "Inactive" => Ok(PatientStatus::Inactive),
        other => Err(DbError::Decode(format!("unknown patient status: {other}"))),
    }
}

fn status_to_string(s: &PatientStatus) -> &'static str {
    match s {
        PatientStatus::Active => "Active",
        PatientStatus::Inactive => "Inactive",
    }
}

impl PatientRow {
    fn into_patient(self, id: Uuid) -> Result<Patient, DbError> {
        Ok(Patient {
            id,
            email: self.email,
            phone: self.phone,
            status: parse_status(&self.status)?,
            name: self.name,
            last_name: self.last_name,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl PatientRowWithId {
    fn try_into_patient(self) -> Result<Patient, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Patient {
            id,
            email: self.email,
            phone: self.phone,
            status: parse_status(&self.status)?,
            name: self.name,
            last_name: self.last_name,
            address: self.address,
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

/// SurrealDB implementation of the Patient repository.
#[derive(Clone)]
pub struct SurrealPatientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPatientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PatientRepository for SurrealPatientRepository<C> {
    async fn create(&self, input: CreatePatient) -> MedsyncResult<Patient> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('patient', $id) SET \
                 email = $email, phone = $phone, \
                 status = $status, \
                 name = $name, last_name = $last_name, \
                 address = $address",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("status", status_to_string(&input.status).to_string()))
            .bind(("name", input.name))
            .bind(("last_name", input.last_name))
            .bind(("address", input.address))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<PatientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row.into_patient(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MedsyncResult<Patient> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('patient', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PatientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row.into_patient(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdatePatient) -> MedsyncResult<Patient> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.phone.is_some() {
            sets.push("phone = $phone");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('patient', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(email) = input.email {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("email", email));
        }
        if let Some(phone) = input.phone {
            builder = builder.bind(("phone", phone));
        }
        if let Some(ref status) = input.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<PatientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row.into_patient(id)?)
    }

    async fn list(&self, pagination: Pagination) -> MedsyncResult<PaginatedResult<Patient>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM patient GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM patient \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PatientRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_patient())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
