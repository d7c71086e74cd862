//! Monthly Payroll Engine
//!
//! This crate computes an employee's monthly salary from their salary policy,
//! attendance, approved adjustments and persisted salary record: prorated
//! earnings, statutory deductions, net pay and cost-to-company projections,
//! each step recorded in an audit trace. It also serves the calculation over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
