//! SurrealDB repository implementations.

mod patient;
mod staff;
mod user;

pub use patient::SurrealPatientRepository;
pub use staff::SurrealStaffRepository;
pub use user::SurrealUserRepository;
