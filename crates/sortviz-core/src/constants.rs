//! Constants for backend access, form limits, playback timing and projection.

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SORTVIZ_API_URL";

/// Backend base URL used when no override is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Smallest array size accepted by the run form.
pub const MIN_ARRAY_SIZE: usize = 10;

/// Largest array size accepted by the run form.
pub const MAX_ARRAY_SIZE: usize = 200;

/// Default array size for a new session.
pub const DEFAULT_ARRAY_SIZE: usize = 40;

/// Step used by the size +/- keys.
pub const ARRAY_SIZE_STEP: usize = 10;

/// Smallest input size accepted by the prediction form.
pub const MIN_PREDICT_SIZE: u64 = 2;

/// Largest input size accepted by the prediction form.
pub const MAX_PREDICT_SIZE: u64 = 100_000;

/// Default input size for the prediction form.
pub const DEFAULT_PREDICT_SIZE: u64 = 500;

/// Duration divided by the speed to get the per-frame interval.
///
/// Speed 40 gives one frame every 100 ms.
pub const BASE_FRAME_DURATION_MS: u64 = 4000;

/// Slowest animation speed offered by the controls.
pub const MIN_SPEED: u32 = 10;

/// Fastest animation speed offered by the controls.
pub const MAX_SPEED: u32 = 100;

/// Default animation speed.
pub const DEFAULT_SPEED: u32 = 40;

/// Step used by the speed +/- keys.
pub const SPEED_STEP: u32 = 10;

/// Input size at which a predicted runtime is valid.
pub const PROJECTION_REFERENCE_N: u64 = 500;

/// Input sizes sampled by the projected runtime curve.
pub const PROJECTION_SAMPLE_SIZES: [u64; 6] = [100, 200, 400, 800, 1600, 3200];

/// Exponent used for complexity classes missing from the table.
pub const DEFAULT_PROJECTION_EXPONENT: f64 = 1.0;

/// Allowed deviation of a probability distribution's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

/// Algorithm used by the run form when none is configured.
pub const DEFAULT_ALGORITHM: &str = "quick_sort";

/// Algorithms compared when the user has not picked a set.
pub const DEFAULT_COMPARISON_ALGORITHMS: [&str; 3] = ["bubble_sort", "merge_sort", "quick_sort"];

/// Default number of history records requested.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Backend unreachable, non-success status or undecodable response.
    pub const ERROR_NETWORK: i32 = 2;
    /// Invalid configuration or input.
    pub const ERROR_CONFIG: i32 = 4;
}
