//! Shared Kernel - vocabulary used by every backend crate
//!
//! - Error classification ([`error::kind::ErrorKind`]) and the unified
//!   [`error::app_error::AppError`] that renders HTTP responses
//! - Typed record identifiers ([`id::RecordId`])
//!
//! Only things whose meaning is identical across domains live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
