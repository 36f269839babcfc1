use glam::Vec2;
use retouch_image::RasterImage;
use retouch_imgproc::{
    enhance::{equalize_local, EqualizationRadius},
    warp::{project, ProjectionMode},
};

use crate::{
    accumulator::{EditMode, GestureState, TransformAccumulator},
    command::Command,
    error::EditorError,
    options::SessionOptions,
    status::{SessionStatus, TransformLine},
};

/// An interactive editing session over one image.
///
/// The session owns three buffers of the same size:
///
/// * `original` - the input image, never modified.
/// * `base` - the working image, rewritten by equalization and restored by reset.
/// * `displayed` - `base` re-projected under the current transforms, recomputed after every
///   change.
///
/// Pointer coordinates are image-local. The renderer reads [`EditSession::displayed`] and clears
/// its dirty flag through [`EditSession::take_displayed_dirty`].
pub struct EditSession {
    original: RasterImage,
    base: RasterImage,
    displayed: RasterImage,
    accumulator: TransformAccumulator,
    edit_mode: EditMode,
    projection_mode: ProjectionMode,
    radius: EqualizationRadius,
    initial_radius: EqualizationRadius,
}

impl EditSession {
    /// Start a session with the default options.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyImage`] if the image has no pixels.
    pub fn new(image: RasterImage) -> Result<Self, EditorError> {
        Self::with_options(image, SessionOptions::default())
    }

    /// Start a session with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyImage`] if the image has no pixels.
    ///
    /// # Example
    ///
    /// ```
    /// use retouch_editor::{EditMode, EditSession, SessionOptions};
    /// use retouch_image::{ImageSize, Pixel, RasterImage};
    ///
    /// let size = ImageSize { width: 8, height: 6 };
    /// let image = RasterImage::from_size_pixel(size, Pixel::opaque(40, 80, 120)).unwrap();
    ///
    /// let options = SessionOptions { edit_mode: EditMode::Intensity, ..Default::default() };
    /// let mut session = EditSession::with_options(image.clone(), options).unwrap();
    ///
    /// assert_eq!(session.displayed().as_slice(), image.as_slice());
    /// assert!(session.take_displayed_dirty());
    /// assert_eq!(session.status().to_string(), "intensity  radius 3  forward");
    /// ```
    pub fn with_options(image: RasterImage, options: SessionOptions) -> Result<Self, EditorError> {
        if image.is_empty() {
            return Err(EditorError::EmptyImage);
        }

        let radius = EqualizationRadius::new(options.radius);
        let mut session = Self {
            base: image.clone(),
            displayed: image.clone(),
            original: image,
            accumulator: TransformAccumulator::new(),
            edit_mode: options.edit_mode,
            projection_mode: options.projection_mode,
            radius,
            initial_radius: radius,
        };
        session.reproject()?;

        log::debug!(
            "new session on a {} image: {}",
            session.original.size(),
            session.status()
        );

        Ok(session)
    }

    /// The input image.
    pub fn original(&self) -> &RasterImage {
        &self.original
    }

    /// The working image.
    pub fn base(&self) -> &RasterImage {
        &self.base
    }

    /// The image to show.
    pub fn displayed(&self) -> &RasterImage {
        &self.displayed
    }

    /// Return whether the displayed image changed since the last call, and clear the flag.
    pub fn take_displayed_dirty(&mut self) -> bool {
        self.displayed.take_dirty()
    }

    /// The transform state.
    pub fn accumulator(&self) -> &TransformAccumulator {
        &self.accumulator
    }

    /// Transform edited by gestures.
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Sampling direction used for projection.
    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Equalization radius.
    pub fn radius(&self) -> EqualizationRadius {
        self.radius
    }

    /// Snapshot of the modes, radius and intensity line.
    pub fn status(&self) -> SessionStatus {
        let intensity = self.accumulator.snapshot().intensity;
        SessionStatus {
            edit_mode: self.edit_mode,
            projection_mode: self.projection_mode,
            radius: self.radius,
            line: TransformLine {
                slope: intensity.effective_scale(),
                intercept: intensity.effective_bias(),
            },
        }
    }

    /// Start a gesture at `(x, y)` in the current edit mode.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.accumulator.begin_gesture(self.edit_mode, Vec2::new(x, y));
    }

    /// Move the pointer of the active gesture to `(x, y)` and re-project.
    ///
    /// Ignored when no gesture is active.
    ///
    /// # Errors
    ///
    /// Propagates projection errors. The transform state is updated regardless, so a
    /// [`retouch_image::ImageError::NonInvertibleTransform`] only costs the current frame.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), EditorError> {
        let GestureState::Dragging { mode, anchor } = self.accumulator.state() else {
            return Ok(());
        };

        let current = Vec2::new(x, y);
        let updated = match mode {
            EditMode::Geometric => self.accumulator.update_geometric(current, self.center()),
            EditMode::Intensity => {
                let delta = current - anchor;
                let vertical = delta.y / self.original.height() as f32;
                let horizontal = delta.x / self.original.width() as f32;
                self.accumulator.update_intensity(vertical, horizontal)
            }
        };

        if updated {
            self.reproject()?;
        }

        Ok(())
    }

    /// End the active gesture, keeping its transform.
    pub fn pointer_up(&mut self) {
        self.accumulator.end_gesture();
    }

    /// Run a discrete command.
    ///
    /// Commands are ignored while a gesture is active.
    ///
    /// # Errors
    ///
    /// Propagates equalization and projection errors.
    pub fn apply_command(&mut self, command: Command) -> Result<(), EditorError> {
        if self.accumulator.is_dragging() {
            log::debug!("ignoring {:?} during a gesture", command);
            return Ok(());
        }

        log::debug!("command {:?}", command);

        match command {
            Command::GeometricMode => self.edit_mode = EditMode::Geometric,
            Command::IntensityMode => self.edit_mode = EditMode::Intensity,
            Command::ForwardProjection => {
                self.projection_mode = ProjectionMode::Forward;
                self.reproject()?;
            }
            Command::BackwardProjection => {
                self.projection_mode = ProjectionMode::Backward;
                self.reproject()?;
            }
            Command::Equalize => {
                let now = std::time::Instant::now();
                equalize_local(&self.original, &mut self.base, self.radius)?;
                log::info!(
                    "equalized with radius {} in {:?}",
                    self.radius,
                    now.elapsed()
                );
                self.reproject()?;
            }
            Command::IncreaseRadius => self.radius.increment(),
            Command::DecreaseRadius => self.radius.decrement(),
            Command::Reset => {
                self.accumulator.reset_all();
                self.radius = self.initial_radius;
                self.base.copy_from(&self.original)?;
                log::info!("restored the original image");
                self.reproject()?;
            }
        }

        Ok(())
    }

    /// Center of the geometric scaling, on the pixel grid.
    fn center(&self) -> Vec2 {
        Vec2::new(
            (self.original.width() / 2) as f32,
            (self.original.height() / 2) as f32,
        )
    }

    fn reproject(&mut self) -> Result<(), EditorError> {
        let snapshot = self.accumulator.snapshot();
        project(
            &self.base,
            &mut self.displayed,
            &snapshot.geometric.effective(),
            self.projection_mode,
            &snapshot.intensity.mapper(),
        )?;
        Ok(())
    }
}
