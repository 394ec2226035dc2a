//! Expiration tracking for occupational health exams (ASO), safety trainings,
//! and compliance documents, surfaced as per-tenant alert windows.

pub mod alerts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
