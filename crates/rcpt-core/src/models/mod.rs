//! Data models for receipts, submissions, and configuration.

pub mod amount;
pub mod config;
pub mod receipt;
pub mod submission;
