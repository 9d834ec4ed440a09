//! Unified error system for the Whelk storefront
//!
//! This module provides:
//! - [`ErrorCode`]: standardized error codes shared with the host service
//! - [`AppError`]: rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Product/catalog errors
//! - 9xxx: System errors

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
