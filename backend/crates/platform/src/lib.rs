//! Platform Crate - Technical Infrastructure
//!
//! Domain-free building blocks shared by the backend crates:
//! - Password policy and hashing (Argon2id)
//! - Bearer credential parsing for the `Authorization` header
//! - A clock abstraction so expiry logic can be tested

pub mod bearer;
pub mod clock;
pub mod password;
