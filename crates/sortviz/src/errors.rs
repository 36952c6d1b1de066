//! Error handling and exit codes.

use sortviz_core::constants::exit_codes;
use sortviz_core::VizError;

/// Exit code for an error reaching the top level.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<VizError>() {
        Some(VizError::Network { .. }) => exit_codes::ERROR_NETWORK,
        Some(VizError::Validation(_)) => exit_codes::ERROR_CONFIG,
        Some(VizError::Stale { .. }) | None => exit_codes::ERROR_GENERIC,
    }
}
