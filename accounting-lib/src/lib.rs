pub mod category;
pub mod config;
mod error;
pub mod expense;
pub mod tracing;
pub mod user;

use crate::error::HandlerError;

/// Resource ids arrive as raw path segments; anything that does not parse as
/// an integer is a client error, never a routing miss.
pub(crate) fn parse_id(raw: &str) -> Result<i32, HandlerError> {
    raw.trim().parse().map_err(|_| HandlerError::Validation)
}
