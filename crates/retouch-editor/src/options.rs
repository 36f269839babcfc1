use retouch_imgproc::warp::ProjectionMode;
use serde::Deserialize;

use crate::accumulator::EditMode;

#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(remote = "ProjectionMode", rename_all = "lowercase")]
enum ProjectionModeDef {
    Forward,
    Backward,
}

/// Initial settings of an edit session.
///
/// Missing fields take their default values when deserialized.
///
/// # Example
///
/// ```
/// use retouch_editor::{EditMode, SessionOptions};
///
/// let options: SessionOptions =
///     serde_json::from_str(r#"{ "edit_mode": "intensity", "radius": 5 }"#).unwrap();
///
/// assert_eq!(options.edit_mode, EditMode::Intensity);
/// assert_eq!(options.radius, 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Equalization radius, values below 1 are raised to 1.
    pub radius: usize,
    /// Transform edited by gestures.
    pub edit_mode: EditMode,
    /// Sampling direction used for projection.
    #[serde(deserialize_with = "ProjectionModeDef::deserialize")]
    pub projection_mode: ProjectionMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            radius: 3,
            edit_mode: EditMode::Geometric,
            projection_mode: ProjectionMode::Forward,
        }
    }
}
