//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::PageholdError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &PageholdError) -> String {
    format!("error: {}", e)
}
