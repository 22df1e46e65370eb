//! Error handling for the broker
//!
//! This module defines the error taxonomy used throughout the broker and the
//! single place where those errors are mapped onto HTTP responses.

mod helpers;
mod response;
mod types;

pub use response::{
    AUTHORIZATION_DENIED_MESSAGE, ErrorResponse, MISSING_PARAMETERS_MESSAGE, TOKEN_FAILURE_MESSAGE,
};
pub use types::{BrokerError, Result, UpstreamService};
