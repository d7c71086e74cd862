//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for computing monthly
//! salaries for one employee or a whole organisation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRecordRequest, BatchCalculationRequest, CalculationRequest,
    SalaryAdjustmentRequest, SalaryPolicyRequest, SalaryRecordRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
