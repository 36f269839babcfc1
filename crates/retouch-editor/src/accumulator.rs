//! Two-part transform state driven by pointer gestures.
//!
//! Both the geometric and the intensity transform are split into a `committed` part, which
//! persists across gestures, and an `in_progress` part, which tracks the gesture currently being
//! dragged. Ending a gesture folds the in-progress part into the committed one.
//!
//! Every transition of [`TransformAccumulator`] replaces its [`TransformSnapshot`] by a new value;
//! snapshots handed out to callers never change.

use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec2};
use retouch_imgproc::{intensity::IntensityMapper, warp::get_scale_matrix_about};

/// Lower bound of the intensity line angle, in radians (5 degrees).
pub const MIN_INTENSITY_ANGLE: f32 = 5.0 / 180.0 * std::f32::consts::PI;

/// Upper bound of the intensity line angle, in radians (85 degrees).
pub const MAX_INTENSITY_ANGLE: f32 = 85.0 / 180.0 * std::f32::consts::PI;

/// Smallest scale factor a single geometric gesture may produce.
pub const MIN_GESTURE_SCALE: f32 = 1e-3;

/// Gestures anchored closer than this to the scaling center are ignored.
pub const MIN_ANCHOR_DISTANCE: f32 = 1e-3;

/// Which transform a gesture edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Uniform scaling about the image center.
    #[default]
    #[serde(alias = "scale")]
    Geometric,
    /// Affine remap of the luma channel.
    Intensity,
}

impl std::fmt::Display for EditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EditMode::Geometric => write!(f, "scale"),
            EditMode::Intensity => write!(f, "intensity"),
        }
    }
}

/// Committed and in-progress geometric transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricTransform {
    /// Transform accumulated over all finished gestures.
    pub committed: Mat4,
    /// Transform of the gesture being dragged, identity when idle.
    pub in_progress: Mat4,
}

impl Default for GeometricTransform {
    fn default() -> Self {
        Self {
            committed: Mat4::IDENTITY,
            in_progress: Mat4::IDENTITY,
        }
    }
}

impl GeometricTransform {
    /// The transform to project with: committed first, then in-progress.
    pub fn effective(&self) -> Mat4 {
        self.in_progress * self.committed
    }

    fn with_in_progress(self, in_progress: Mat4) -> Self {
        Self {
            in_progress,
            ..self
        }
    }

    fn commit(self) -> Self {
        Self {
            committed: self.effective(),
            in_progress: Mat4::IDENTITY,
        }
    }
}

/// Committed and in-progress intensity transforms.
///
/// The effective remap is `Y' = Y * (in_progress_scale * committed_scale) + (in_progress_bias +
/// committed_bias)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityTransform {
    /// Slope accumulated over all finished gestures.
    pub committed_scale: f32,
    /// Intercept accumulated over all finished gestures.
    pub committed_bias: f32,
    /// Slope factor of the gesture being dragged, 1 when idle.
    pub in_progress_scale: f32,
    /// Intercept offset of the gesture being dragged, 0 when idle.
    pub in_progress_bias: f32,
}

impl Default for IntensityTransform {
    fn default() -> Self {
        Self {
            committed_scale: 1.0,
            committed_bias: 0.0,
            in_progress_scale: 1.0,
            in_progress_bias: 0.0,
        }
    }
}

impl IntensityTransform {
    /// The effective slope `M`.
    pub fn effective_scale(&self) -> f32 {
        self.in_progress_scale * self.committed_scale
    }

    /// The effective intercept `B`.
    pub fn effective_bias(&self) -> f32 {
        self.in_progress_bias + self.committed_bias
    }

    /// The pixel mapper for the effective remap.
    pub fn mapper(&self) -> IntensityMapper {
        IntensityMapper::new(self.effective_scale(), self.effective_bias())
    }

    /// Recompute the in-progress part from a drag expressed as fractions of the image size.
    ///
    /// `vertical` rotates the line by up to 45 degrees per unit, clamped to
    /// [[`MIN_INTENSITY_ANGLE`], [`MAX_INTENSITY_ANGLE`]]. `horizontal` shifts the line along the
    /// input axis without changing its slope.
    fn with_drag(self, vertical: f32, horizontal: f32) -> Self {
        let theta = (self.committed_scale.atan() + vertical * FRAC_PI_4)
            .clamp(MIN_INTENSITY_ANGLE, MAX_INTENSITY_ANGLE);

        let total_scale = theta.tan();
        let total_bias = self.committed_bias - total_scale * horizontal;

        Self {
            in_progress_scale: total_scale / self.committed_scale,
            in_progress_bias: total_bias - self.committed_bias,
            ..self
        }
    }

    fn commit(self) -> Self {
        Self {
            committed_scale: self.in_progress_scale * self.committed_scale,
            committed_bias: self.in_progress_bias + self.committed_bias,
            in_progress_scale: 1.0,
            in_progress_bias: 0.0,
        }
    }
}

/// An immutable view of both transforms at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformSnapshot {
    /// The geometric transform state.
    pub geometric: GeometricTransform,
    /// The intensity transform state.
    pub intensity: IntensityTransform,
}

/// Whether a gesture is being dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No pointer is held down.
    #[default]
    Idle,
    /// A pointer is held down.
    Dragging {
        /// The transform the gesture edits.
        mode: EditMode,
        /// Where the pointer went down, in image coordinates.
        anchor: Vec2,
    },
}

/// Finite-state machine over [`GestureState`] producing [`TransformSnapshot`]s.
///
/// Updates and ends received while idle, or updates for the wrong mode, are ignored and reported
/// by returning `false`.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use retouch_editor::accumulator::{EditMode, TransformAccumulator};
///
/// let mut acc = TransformAccumulator::new();
/// let center = Vec2::new(50.0, 50.0);
///
/// acc.begin_gesture(EditMode::Geometric, Vec2::new(60.0, 50.0));
/// acc.update_geometric(Vec2::new(70.0, 50.0), center);
/// acc.end_gesture();
///
/// let m = acc.snapshot().geometric.committed;
/// assert_eq!(m.transform_point3(glam::Vec3::new(60.0, 50.0, 0.0)).x, 70.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransformAccumulator {
    state: GestureState,
    snapshot: TransformSnapshot,
}

impl TransformAccumulator {
    /// Create an idle accumulator with identity transforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current gesture state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a gesture is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// The current transforms.
    pub fn snapshot(&self) -> TransformSnapshot {
        self.snapshot
    }

    /// Start a gesture editing `mode`, anchored at `anchor`.
    ///
    /// Ignored while another gesture is active.
    pub fn begin_gesture(&mut self, mode: EditMode, anchor: Vec2) -> bool {
        if self.is_dragging() {
            return false;
        }

        log::debug!("begin {} gesture at ({}, {})", mode, anchor.x, anchor.y);
        self.state = GestureState::Dragging { mode, anchor };
        true
    }

    /// Recompute the in-progress geometric transform for the pointer at `current`.
    ///
    /// The transform is a uniform scale about `center` by the ratio of the pointer distances to
    /// `center` now and at the anchor.
    pub fn update_geometric(&mut self, current: Vec2, center: Vec2) -> bool {
        let GestureState::Dragging {
            mode: EditMode::Geometric,
            anchor,
        } = self.state
        else {
            return false;
        };

        let initial_distance = (anchor - center).length();
        if initial_distance < MIN_ANCHOR_DISTANCE {
            log::debug!("gesture anchored on the center, ignoring update");
            return false;
        }

        let factor = ((current - center).length() / initial_distance).max(MIN_GESTURE_SCALE);

        self.snapshot = TransformSnapshot {
            geometric: self
                .snapshot
                .geometric
                .with_in_progress(get_scale_matrix_about(center, factor)),
            ..self.snapshot
        };
        true
    }

    /// Recompute the in-progress intensity transform.
    ///
    /// `vertical` and `horizontal` are the signed pointer displacements since the anchor as a
    /// fraction of the image height and width.
    pub fn update_intensity(&mut self, vertical: f32, horizontal: f32) -> bool {
        if !matches!(
            self.state,
            GestureState::Dragging {
                mode: EditMode::Intensity,
                ..
            }
        ) {
            return false;
        }

        self.snapshot = TransformSnapshot {
            intensity: self.snapshot.intensity.with_drag(vertical, horizontal),
            ..self.snapshot
        };
        true
    }

    /// Fold the in-progress transform of the active gesture into the committed one.
    pub fn end_gesture(&mut self) -> bool {
        let GestureState::Dragging { mode, .. } = self.state else {
            return false;
        };

        self.snapshot = match mode {
            EditMode::Geometric => TransformSnapshot {
                geometric: self.snapshot.geometric.commit(),
                ..self.snapshot
            },
            EditMode::Intensity => TransformSnapshot {
                intensity: self.snapshot.intensity.commit(),
                ..self.snapshot
            },
        };
        self.state = GestureState::Idle;

        log::debug!("end {} gesture", mode);
        true
    }

    /// Drop every transform and return to idle.
    pub fn reset_all(&mut self) {
        self.state = GestureState::Idle;
        self.snapshot = TransformSnapshot::default();
    }
}
