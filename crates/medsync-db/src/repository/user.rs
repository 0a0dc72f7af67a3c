//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time.
//!
//! Emails are lowercased at this boundary so the unique index and all
//! lookups are case-insensitive without a functional index.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use medsync_core::error::MedsyncResult;
use medsync_core::models::user::{CreateUser, UpdateUser, User, UserRole};
use medsync_core::repository::{PaginatedResult, Pagination, UserRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    patient_id: Option<String>,
    first_name: String,
    last_name: String,
    address: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    patient_id: Option<String>,
    first_name: String,
    last_name: String,
    address: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<UserRole, DbError> {
    match s {
        "Admin" => Ok(UserRole::Admin),
        "Doctor" => Ok(UserRole::Doctor),
        "Receptionist" => Ok(UserRole::Receptionist),
        "Patient" => Ok(UserRole::Patient),
        other => Err(DbError::Decode(format!("unknown user role: {other}"))),
    }
}

fn role_to_string(r: &UserRole) -> &'static str {
    match r {
        UserRole::Admin => "Admin",
        UserRole::Doctor => "Doctor",
        UserRole::Receptionist => "Receptionist",
        UserRole::Patient => "Patient",
    }
}

fn parse_opt_uuid(raw: Option<String>) -> Result<Option<Uuid>, DbError> {
    raw.map(|s| {
        Uuid::parse_str(&s).map_err(|e| DbError::Decode(format!("invalid patient UUID: {e}")))
    })
    .transpose()
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            email: self.email,
            phone: self.phone,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            patient_id: parse_opt_uuid(self.patient_id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(User {
            id,
            email: self.email,
            phone: self.phone,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            patient_id: parse_opt_uuid(self.patient_id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            password_hash: self.password_hash,
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

/// Row struct for forward-pointer projections.
#[derive(Debug, SurrealValue)]
struct PatientIdRow {
    patient_id: String,
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Crypto(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Map a unique-index rejection on `user.email` to a conflict error.
fn map_create_error(e: surrealdb::Error) -> DbError {
    if e.to_string().contains("idx_user_email") {
        DbError::UniqueViolation {
            entity: "user".into(),
        }
    } else {
        DbError::Surreal(e)
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> MedsyncResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, phone = $phone, \
                 role = $role, is_active = $is_active, \
                 patient_id = $patient_id, \
                 first_name = $first_name, last_name = $last_name, \
                 address = $address, \
                 password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email.trim().to_ascii_lowercase()))
            .bind(("phone", input.phone))
            .bind(("role", role_to_string(&input.role).to_string()))
            .bind(("is_active", true))
            .bind(("patient_id", input.patient_id.map(|p| p.to_string())))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("address", input.address))
            .bind(("password_hash", password_hash))
            .await
            .map_err(map_create_error)?;

        let mut result = result.check().map_err(map_create_error)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MedsyncResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn find_by_email(&self, email: &str) -> MedsyncResult<Option<User>> {
        let needle = email.trim().to_ascii_lowercase();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", needle))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn find_by_patient_id(&self, patient_id: Uuid) -> MedsyncResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE patient_id = $patient_id",
            )
            .bind(("patient_id", patient_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> MedsyncResult<User> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.phone.is_some() {
            sets.push("phone = $phone");
        }
        if input.role.is_some() {
            sets.push("role = $role");
        }
        if input.is_active.is_some() {
            sets.push("is_active = $is_active");
        }
        if input.patient_id.is_some() {
            sets.push("patient_id = $patient_id");
        }
        if input.first_name.is_some() {
            sets.push("first_name = $first_name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('user', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(email) = input.email {
            builder = builder.bind(("email", email.trim().to_ascii_lowercase()));
        }
        if let Some(phone) = input.phone {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("phone", phone));
        }
        if let Some(ref role) = input.role {
            builder = builder.bind(("role", role_to_string(role).to_string()));
        }
        if let Some(is_active) = input.is_active {
            builder = builder.bind(("is_active", is_active));
        }
        if let Some(patient_id) = input.patient_id {
            builder = builder.bind(("patient_id", patient_id.map(|p| p.to_string())));
        }
        if let Some(first_name) = input.first_name {
            builder = builder.bind(("first_name", first_name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }

        let result = builder.await.map_err(map_create_error)?;
        let mut result = result.check().map_err(map_create_error)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn set_patient_id(&self, id: Uuid, patient_id: Uuid) -> MedsyncResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 patient_id = $patient_id, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("patient_id", patient_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn list(&self, pagination: Pagination) -> MedsyncResult<PaginatedResult<User>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        pagination: Pagination,
    ) -> MedsyncResult<PaginatedResult<User>> {
        let role_str = role_to_string(&role).to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM user \
                 WHERE role = $role GROUP ALL",
            )
            .bind(("role", role_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE role = $role \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("role", role_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn linked_patient_ids(&self) -> MedsyncResult<Vec<Uuid>> {
        let mut result = self
            .db
            .query("SELECT patient_id FROM user WHERE patient_id != NONE")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PatientIdRow> = result.take(0).map_err(DbError::from)?;
        let ids = rows
            .into_iter()
            .map(|row| {
                Uuid::parse_str(&row.patient_id)
                    .map_err(|e| DbError::Decode(format!("invalid patient UUID: {e}")))
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(ids)
    }
}
