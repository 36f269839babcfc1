use glam::Mat4;
use retouch_image::{ImageError, Pixel, RasterImage};

use super::transform::{invert_transform, transform_point};
use crate::intensity::IntensityMapper;

/// Sampling direction used to re-project an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    /// Push every source pixel to its destination. May leave holes and collisions.
    #[default]
    Forward,
    /// Pull every destination pixel from its source through the inverse transform.
    Backward,
}

impl std::fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProjectionMode::Forward => write!(f, "forward"),
            ProjectionMode::Backward => write!(f, "backward"),
        }
    }
}

/// Maps a continuous coordinate to a pixel index by truncation, if it lies inside the image.
#[inline]
fn pixel_index(x: f32, y: f32, cols: usize, rows: usize) -> Option<(usize, usize)> {
    if x >= 0.0 && x < cols as f32 && y >= 0.0 && y < rows as f32 {
        Some((x as usize, y as usize))
    } else {
        None
    }
}

/// Re-projects `src` into `dst` under `transform`, remapping intensities on the way.
///
/// # Arguments
///
/// * `src` - The source RGBA image.
/// * `dst` - The destination RGBA image. Must have the size of `src`.
/// * `transform` - The 4x4 homogeneous transform mapping source to destination coordinates.
/// * `mode` - The sampling direction.
/// * `mapper` - The intensity remap applied to every copied pixel.
///
/// In [`ProjectionMode::Forward`] the destination is cleared to transparent and source pixels are
/// visited in row-major order; when several land on the same cell the last one wins. In
/// [`ProjectionMode::Backward`] every destination pixel samples its nearest source pixel, or
/// becomes transparent when it maps outside of the source.
///
/// On success `dst` is marked dirty.
///
/// # Errors
///
/// * [`ImageError::InvalidImageSize`] if the two images differ in size.
/// * [`ImageError::NonInvertibleTransform`] in backward mode if `transform` has no inverse.
///
/// In both cases `dst` is left untouched.
pub fn project(
    src: &RasterImage,
    dst: &mut RasterImage,
    transform: &Mat4,
    mode: ProjectionMode,
    mapper: &IntensityMapper,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    match mode {
        ProjectionMode::Forward => project_forward(src, dst, transform, mapper),
        ProjectionMode::Backward => project_backward(src, dst, transform, mapper)?,
    }

    // necessary for the renderer to pick up the new buffer
    dst.mark_dirty();

    Ok(())
}

fn project_forward(
    src: &RasterImage,
    dst: &mut RasterImage,
    transform: &Mat4,
    mapper: &IntensityMapper,
) {
    let (cols, rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();

    // cells nobody writes to stay transparent
    dst_data.fill(0);

    for y in 0..rows {
        for x in 0..cols {
            let Some((u, v)) = transform_point(transform, x as f32, y as f32) else {
                continue;
            };
            let Some((u, v)) = pixel_index(u, v, cols, rows) else {
                continue;
            };

            let src_idx = (y * cols + x) * 4;
            let dst_idx = (v * cols + u) * 4;
            mapper
                .apply(Pixel::from_slice(&src_data[src_idx..src_idx + 4]))
                .write_to(&mut dst_data[dst_idx..dst_idx + 4]);
        }
    }
}

fn project_backward(
    src: &RasterImage,
    dst: &mut RasterImage,
    transform: &Mat4,
    mapper: &IntensityMapper,
) -> Result<(), ImageError> {
    // invert once, not per pixel
    let inv = invert_transform(transform)?;

    let (cols, rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .chunks_exact_mut(4)
        .enumerate()
        .for_each(|(idx, dst_pixel)| {
            let (x, y) = (idx % cols, idx / cols);

            let sampled = transform_point(&inv, x as f32, y as f32)
                .and_then(|(u, v)| pixel_index(u, v, cols, rows))
                .map(|(u, v)| {
                    let src_idx = (v * cols + u) * 4;
                    mapper.apply(Pixel::from_slice(&src_data[src_idx..src_idx + 4]))
                });

            sampled.unwrap_or(Pixel::TRANSPARENT).write_to(dst_pixel);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{project, ProjectionMode};
    use crate::{
        color::ColorSpaceConverter, intensity::IntensityMapper, warp::get_scale_matrix_about,
    };
    use glam::{Mat4, Vec2, Vec3, Vec4};
    use retouch_image::{ImageError, ImageSize, Pixel, RasterImage};

    fn gradient(size: ImageSize) -> Result<RasterImage, ImageError> {
        let pixels = (0..size.area())
            .map(|i| {
                let i = i as u8;
                Pixel::new(i, i.wrapping_mul(7), 255 - i, 255 - i / 2)
            })
            .collect::<Vec<_>>();
        RasterImage::from_pixels(size, &pixels)
    }

    fn blank(size: ImageSize) -> Result<RasterImage, ImageError> {
        RasterImage::from_size_pixel(size, Pixel::opaque(1, 2, 3))
    }

    #[test]
    fn identity_reproduces_source() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let src = gradient(size)?;

        for mode in [ProjectionMode::Forward, ProjectionMode::Backward] {
            let mut dst = blank(size)?;
            project(
                &src,
                &mut dst,
                &Mat4::IDENTITY,
                mode,
                &IntensityMapper::identity(),
            )?;
            assert_eq!(dst.as_slice(), src.as_slice(), "{mode}");
            assert!(dst.is_dirty());
        }

        Ok(())
    }

    #[test]
    fn forward_expansion_leaves_holes() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;
        let m = get_scale_matrix_about(Vec2::ZERO, 2.0);

        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Forward,
            &IntensityMapper::identity(),
        )?;

        assert_eq!(dst.pixel(0, 0)?, src.pixel(0, 0)?);
        assert_eq!(dst.pixel(2, 2)?, src.pixel(1, 1)?);
        assert_eq!(dst.pixel(1, 0)?, Pixel::TRANSPARENT);
        assert_eq!(dst.pixel(3, 3)?, Pixel::TRANSPARENT);

        Ok(())
    }

    #[test]
    fn backward_expansion_fills_every_cell() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;
        let m = get_scale_matrix_about(Vec2::ZERO, 2.0);

        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Backward,
            &IntensityMapper::identity(),
        )?;

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(dst.pixel(x, y)?, src.pixel(x / 2, y / 2)?);
            }
        }

        Ok(())
    }

    #[test]
    fn backward_outside_is_transparent() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 2,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;
        let m = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));

        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Backward,
            &IntensityMapper::identity(),
        )?;

        assert_eq!(dst.pixel(0, 1)?, Pixel::TRANSPARENT);
        assert_eq!(dst.pixel(1, 0)?, Pixel::TRANSPARENT);
        assert_eq!(dst.pixel(2, 0)?, src.pixel(0, 0)?);
        assert_eq!(dst.pixel(3, 1)?, src.pixel(1, 1)?);

        Ok(())
    }

    #[test]
    fn forward_collisions_resolve_in_row_major_order() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;

        // (x, y) -> (x + y, 0): (1, 0) and (0, 1) collide on (1, 0)
        let m = Mat4::from_cols(Vec4::X, Vec4::X, Vec4::Z, Vec4::W);

        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Forward,
            &IntensityMapper::identity(),
        )?;

        assert_eq!(dst.pixel(0, 0)?, src.pixel(0, 0)?);
        assert_eq!(dst.pixel(1, 0)?, src.pixel(0, 1)?);
        assert_eq!(dst.pixel(2, 0)?, src.pixel(0, 2)?);
        assert_eq!(dst.pixel(1, 1)?, Pixel::TRANSPARENT);

        Ok(())
    }

    #[test]
    fn forward_shrink_keeps_the_largest_source_on_both_axes() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;
        let m = get_scale_matrix_about(Vec2::ZERO, 0.5);

        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Forward,
            &IntensityMapper::identity(),
        )?;

        // a separable shrink gives the same winner in row-major and column-major order
        assert_eq!(dst.pixel(0, 0)?, src.pixel(1, 1)?);
        assert_eq!(dst.pixel(1, 0)?, src.pixel(3, 1)?);
        assert_eq!(dst.pixel(0, 1)?, src.pixel(1, 3)?);
        assert_eq!(dst.pixel(1, 1)?, src.pixel(3, 3)?);
        assert_eq!(dst.pixel(2, 2)?, Pixel::TRANSPARENT);

        Ok(())
    }

    #[test]
    fn intensity_is_applied() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = RasterImage::from_size_pixel(size, Pixel::new(90, 90, 90, 60))?;
        let mapper = IntensityMapper::new(0.0, 1.0);

        for mode in [ProjectionMode::Forward, ProjectionMode::Backward] {
            let mut dst = blank(size)?;
            project(&src, &mut dst, &Mat4::IDENTITY, mode, &mapper)?;
            for p in dst.pixels() {
                assert_eq!(ColorSpaceConverter::luma(p), 255);
                assert_eq!(p.a, 60);
            }
        }

        Ok(())
    }

    #[test]
    fn backward_singular_transform() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = gradient(size)?;
        let mut dst = blank(size)?;
        let m = get_scale_matrix_about(Vec2::new(1.0, 1.0), 0.0);

        let res = project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Backward,
            &IntensityMapper::identity(),
        );
        assert_eq!(res, Err(ImageError::NonInvertibleTransform));
        assert!(!dst.is_dirty());
        assert!(dst.pixels().all(|p| p == Pixel::opaque(1, 2, 3)));

        // forward needs no inverse: everything collapses onto the center
        project(
            &src,
            &mut dst,
            &m,
            ProjectionMode::Forward,
            &IntensityMapper::identity(),
        )?;
        assert_eq!(dst.pixel(1, 1)?, src.pixel(1, 1)?);
        assert_eq!(dst.pixel(0, 0)?, Pixel::TRANSPARENT);

        Ok(())
    }

    #[test]
    fn size_mismatch() -> Result<(), ImageError> {
        let src = gradient([3, 2].into())?;
        let mut dst = blank([2, 3].into())?;

        let res = project(
            &src,
            &mut dst,
            &Mat4::IDENTITY,
            ProjectionMode::Forward,
            &IntensityMapper::identity(),
        );
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 2, 2, 3)));
        assert!(!dst.is_dirty());

        Ok(())
    }
}
