//! Underwriting pipeline for small-business microfinance applications.
//!
//! An application passes a KYC document gate, is scored for credit, ESG and social
//! signals, and is mapped onto a loan-term tier by the decision engine.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod underwriting;
