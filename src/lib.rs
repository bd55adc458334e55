//! Campus placement service: job postings, applications, eligibility checks,
//! and interview scheduling behind a small HTTP surface.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
