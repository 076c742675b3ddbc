//! Reader error types.

use crate::domain::ApiId;

/// The configured station ID is not in the station directory.
///
/// This is a configuration error: retrying will not help.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{station_id} is not a valid measuring station ID")]
pub struct NoStationError {
    pub station_id: ApiId,
}
