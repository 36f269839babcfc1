use glam::Vec2;
use retouch_imgproc::{enhance::EqualizationRadius, warp::ProjectionMode};

use crate::accumulator::EditMode;

/// The effective intensity remap `y = slope * x + intercept` over normalized luma.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformLine {
    /// The effective slope `M`.
    pub slope: f32,
    /// The effective intercept `B`.
    pub intercept: f32,
}

impl TransformLine {
    /// The two points where the line crosses the border of the unit box `[0, 1] x [0, 1]`.
    ///
    /// Returns `None` when the line misses the box or only touches it in a single point.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::Vec2;
    /// use retouch_editor::TransformLine;
    ///
    /// let line = TransformLine { slope: 2.0, intercept: -0.5 };
    /// assert_eq!(
    ///     line.endpoints_in_unit_box(),
    ///     Some([Vec2::new(0.25, 0.0), Vec2::new(0.75, 1.0)])
    /// );
    /// ```
    pub fn endpoints_in_unit_box(&self) -> Option<[Vec2; 2]> {
        let (m, b) = (self.slope, self.intercept);
        let inside = |v: f32| (0.0..=1.0).contains(&v);

        let mut endpoints: Vec<Vec2> = Vec::with_capacity(4);

        // bottom and top borders
        for y in [0.0, 1.0] {
            let x = (y - b) / m;
            if inside(x) {
                endpoints.push(Vec2::new(x, y));
            }
        }

        // left and right borders, skipping corners already found
        for x in [0.0, 1.0] {
            let y = m * x + b;
            let p = Vec2::new(x, y);
            if inside(y) && !endpoints.contains(&p) {
                endpoints.push(p);
            }
        }

        match endpoints.as_slice() {
            [p, q] => Some([*p, *q]),
            _ => None,
        }
    }
}

/// What the editor shows next to the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionStatus {
    /// Transform edited by gestures.
    pub edit_mode: EditMode,
    /// Sampling direction used for projection.
    pub projection_mode: ProjectionMode,
    /// Equalization radius.
    pub radius: EqualizationRadius,
    /// Effective intensity remap.
    pub line: TransformLine,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}  radius {}  {}",
            self.edit_mode, self.radius, self.projection_mode
        )
    }
}
