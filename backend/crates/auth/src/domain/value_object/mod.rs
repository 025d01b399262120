//! Value Object Module

pub mod username;
