use approx::assert_relative_eq;
use glam::Vec2;
use retouch_editor::{
    accumulator::TransformSnapshot, Command, EditMode, EditSession, EditorError, SessionOptions,
};
use retouch_image::{ImageSize, Pixel, RasterImage};
use retouch_imgproc::{
    enhance::{equalize_local, EqualizationRadius},
    warp::{get_scale_matrix_about, ProjectionMode},
};

fn pattern(width: usize, height: usize) -> Result<RasterImage, EditorError> {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(Pixel::opaque(
                (x * 17 % 256) as u8,
                (y * 29 % 256) as u8,
                ((x + y) * 11 % 256) as u8,
            ));
        }
    }
    Ok(RasterImage::from_pixels(
        ImageSize { width, height },
        &pixels,
    )?)
}

#[test]
fn empty_image_is_rejected() -> Result<(), EditorError> {
    let image = RasterImage::new([0, 3].into(), vec![])?;
    assert!(matches!(
        EditSession::new(image),
        Err(EditorError::EmptyImage)
    ));
    Ok(())
}

#[test]
fn starts_with_identity_display() -> Result<(), EditorError> {
    let image = pattern(6, 5)?;
    let mut session = EditSession::new(image.clone())?;

    assert_eq!(session.displayed().as_slice(), image.as_slice());
    assert!(session.take_displayed_dirty());
    assert_eq!(session.edit_mode(), EditMode::Geometric);
    assert_eq!(session.projection_mode(), ProjectionMode::Forward);
    assert_eq!(session.radius(), EqualizationRadius::new(3));

    // moving without a gesture does nothing
    session.pointer_move(3.0, 3.0)?;
    assert!(!session.take_displayed_dirty());

    Ok(())
}

#[test]
fn geometric_gestures_compose() -> Result<(), EditorError> {
    let mut session = EditSession::new(pattern(20, 20)?)?;
    let center = Vec2::new(10.0, 10.0);

    session.pointer_down(12.0, 10.0);
    session.pointer_move(14.0, 10.0)?;
    session.pointer_up();

    session.pointer_down(12.0, 10.0);
    session.pointer_move(16.0, 10.0)?;
    let during = session.accumulator().snapshot().geometric.effective();
    session.pointer_up();

    let geometric = session.accumulator().snapshot().geometric;
    let expected = get_scale_matrix_about(center, 6.0);
    assert!(geometric.committed.abs_diff_eq(expected, 1e-4));
    assert!(geometric.committed.abs_diff_eq(during, 1e-6));
    assert_eq!(geometric.in_progress, glam::Mat4::IDENTITY);

    Ok(())
}

#[test]
fn intensity_gestures_compose() -> Result<(), EditorError> {
    let options = SessionOptions {
        edit_mode: EditMode::Intensity,
        ..Default::default()
    };
    let mut session = EditSession::with_options(pattern(20, 20)?, options)?;

    // v = 0.1, h = 0.2
    session.pointer_down(0.0, 0.0);
    session.pointer_move(4.0, 2.0)?;
    let a = session.accumulator().snapshot().intensity;
    session.pointer_up();

    // v = -0.05, h = -0.1
    session.pointer_down(5.0, 5.0);
    session.pointer_move(3.0, 4.0)?;
    let b = session.accumulator().snapshot().intensity;
    session.pointer_up();

    let committed = session.accumulator().snapshot().intensity;
    assert_relative_eq!(
        committed.committed_scale,
        a.in_progress_scale * b.in_progress_scale,
        epsilon = 1e-5
    );
    assert_relative_eq!(
        committed.committed_bias,
        a.in_progress_bias + b.in_progress_bias,
        epsilon = 1e-5
    );

    // committing does not change the effective remap
    assert_relative_eq!(committed.effective_scale(), b.effective_scale(), epsilon = 1e-5);
    assert_relative_eq!(committed.effective_bias(), b.effective_bias(), epsilon = 1e-5);

    let line = session.status().line;
    assert_relative_eq!(line.slope, committed.committed_scale);
    assert_relative_eq!(line.intercept, committed.committed_bias);

    Ok(())
}

#[test]
fn full_vertical_drag_clamps_to_85_degrees() -> Result<(), EditorError> {
    let options = SessionOptions {
        edit_mode: EditMode::Intensity,
        ..Default::default()
    };
    let mut session = EditSession::with_options(pattern(20, 20)?, options)?;

    session.pointer_down(0.0, 0.0);
    session.pointer_move(0.0, 20.0)?;

    let slope = session.status().line.slope;
    assert_relative_eq!(slope.atan().to_degrees(), 85.0, epsilon = 1e-3);
    assert!(session.status().line.endpoints_in_unit_box().is_some());

    Ok(())
}

#[test]
fn shrinking_uses_the_projection_mode() -> Result<(), EditorError> {
    let image = pattern(8, 8)?;

    // forward: the last of the 2x2 sources landing on a cell wins
    for (mode, src_4, src_5) in [
        (ProjectionMode::Forward, (5, 5), (7, 7)),
        (ProjectionMode::Backward, (4, 4), (6, 6)),
    ] {
        let options = SessionOptions {
            projection_mode: mode,
            ..Default::default()
        };
        let mut session = EditSession::with_options(image.clone(), options)?;

        // half the distance to the center (4, 4)
        session.pointer_down(6.0, 4.0);
        session.pointer_move(5.0, 4.0)?;

        let displayed = session.displayed();
        assert_eq!(displayed.pixel(0, 0)?, Pixel::TRANSPARENT, "{mode}");
        assert_eq!(displayed.pixel(4, 4)?, image.pixel(src_4.0, src_4.1)?, "{mode}");
        assert_eq!(displayed.pixel(5, 5)?, image.pixel(src_5.0, src_5.1)?, "{mode}");
    }

    Ok(())
}

#[test]
fn projection_commands_reproject() -> Result<(), EditorError> {
    let mut session = EditSession::new(pattern(8, 8)?)?;
    session.take_displayed_dirty();

    session.apply_command(Command::BackwardProjection)?;
    assert_eq!(session.projection_mode(), ProjectionMode::Backward);
    assert!(session.take_displayed_dirty());

    session.apply_command(Command::ForwardProjection)?;
    assert_eq!(session.projection_mode(), ProjectionMode::Forward);
    assert!(session.take_displayed_dirty());

    // mode switches alone leave the display alone
    session.apply_command(Command::IntensityMode)?;
    assert_eq!(session.edit_mode(), EditMode::Intensity);
    assert!(!session.take_displayed_dirty());

    Ok(())
}

#[test]
fn equalize_reads_the_original() -> Result<(), EditorError> {
    let image = pattern(12, 10)?;
    let mut session = EditSession::new(image.clone())?;

    session.apply_command(Command::Equalize)?;
    let once = session.base().clone();

    let mut expected = image.clone();
    equalize_local(&image, &mut expected, EqualizationRadius::new(3))?;
    assert_eq!(once.as_slice(), expected.as_slice());
    assert_ne!(once.as_slice(), image.as_slice());

    session.apply_command(Command::Equalize)?;
    assert_eq!(session.base().as_slice(), once.as_slice());
    assert_eq!(session.displayed().as_slice(), once.as_slice());
    assert_eq!(session.original().as_slice(), image.as_slice());

    Ok(())
}

#[test]
fn radius_is_floored_at_one() -> Result<(), EditorError> {
    let mut session = EditSession::new(pattern(4, 4)?)?;

    for _ in 0..5 {
        session.apply_command(Command::DecreaseRadius)?;
    }
    assert_eq!(session.radius().get(), 1);

    session.apply_command(Command::IncreaseRadius)?;
    assert_eq!(session.radius().get(), 2);
    assert_eq!(session.status().to_string(), "scale  radius 2  forward");

    Ok(())
}

#[test]
fn commands_are_ignored_during_a_gesture() -> Result<(), EditorError> {
    let image = pattern(10, 10)?;
    let mut session = EditSession::new(image.clone())?;

    session.pointer_down(8.0, 5.0);
    session.apply_command(Command::IntensityMode)?;
    session.apply_command(Command::Equalize)?;
    session.apply_command(Command::IncreaseRadius)?;
    session.apply_command(Command::Reset)?;

    assert_eq!(session.edit_mode(), EditMode::Geometric);
    assert_eq!(session.base().as_slice(), image.as_slice());
    assert_eq!(session.radius().get(), 3);
    assert!(session.accumulator().is_dragging());

    session.pointer_up();
    session.apply_command(Command::IntensityMode)?;
    assert_eq!(session.edit_mode(), EditMode::Intensity);

    Ok(())
}

#[test]
fn reset_restores_everything() -> Result<(), EditorError> {
    let image = pattern(16, 12)?;
    let mut session = EditSession::new(image.clone())?;

    session.pointer_down(12.0, 6.0);
    session.pointer_move(14.0, 6.0)?;
    session.pointer_up();

    session.apply_command(Command::IntensityMode)?;
    session.pointer_down(0.0, 0.0);
    session.pointer_move(3.0, -2.0)?;
    session.pointer_up();

    session.apply_command(Command::IncreaseRadius)?;
    session.apply_command(Command::Equalize)?;
    assert_ne!(session.base().as_slice(), image.as_slice());

    session.apply_command(Command::Reset)?;

    assert_eq!(session.accumulator().snapshot(), TransformSnapshot::default());
    assert_eq!(session.radius().get(), 3);
    assert_eq!(session.base().as_slice(), image.as_slice());
    assert_eq!(session.displayed().as_slice(), image.as_slice());
    // the edit mode survives a reset
    assert_eq!(session.edit_mode(), EditMode::Intensity);

    Ok(())
}
