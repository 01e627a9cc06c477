//! Business logic services

pub mod bank;
pub mod sessions;
