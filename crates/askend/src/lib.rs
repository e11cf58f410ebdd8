//! Business rules behind the Askend filler experience: demographic survey matching, JSON
//! column normalization, dashboard assembly, and sign-up form validation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
