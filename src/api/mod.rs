//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints through which the (out-of-scope)
//! administration UI drives the salary record lifecycle.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AmendSalaryRequest, BulkDeleteRequest, BulkPayRequest, CreateSalaryRequest, GenerateRequest,
    ListParams, PayRequest, PayoutParams, PeriodParams, YearParams,
};
pub use response::{ApiError, ApiErrorResponse, DeleteManyResponse, MissingEmployeesResponse};
pub use state::AppState;
