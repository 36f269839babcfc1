use glam::{Mat4, Vec2, Vec3, Vec4};
use retouch_image::ImageError;

/// Returns a 4x4 matrix scaling the image plane uniformly about a center point.
///
/// The matrix is `T(center) * S(factor, factor, 1) * T(-center)`.
///
/// # Arguments
///
/// * `center` - The fixed point of the scaling.
/// * `factor` - The scale factor.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use retouch_imgproc::warp::{get_scale_matrix_about, transform_point};
///
/// let m = get_scale_matrix_about(Vec2::new(2.0, 2.0), 2.0);
/// assert_eq!(transform_point(&m, 3.0, 2.0), Some((4.0, 2.0)));
/// assert_eq!(transform_point(&m, 2.0, 2.0), Some((2.0, 2.0)));
/// ```
pub fn get_scale_matrix_about(center: Vec2, factor: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(center.x, center.y, 0.0))
        * Mat4::from_scale(Vec3::new(factor, factor, 1.0))
        * Mat4::from_translation(Vec3::new(-center.x, -center.y, 0.0))
}

/// Applies a homogeneous transform to the image plane point `(x, y)`.
///
/// The point is lifted to `(x, y, 0, 1)`. A resulting `w` other than 1 divides x and y; a zero or
/// non finite `w` has no image and returns `None`.
#[inline]
pub fn transform_point(m: &Mat4, x: f32, y: f32) -> Option<(f32, f32)> {
    let p = *m * Vec4::new(x, y, 0.0, 1.0);

    if p.w == 1.0 {
        return Some((p.x, p.y));
    }

    if p.w == 0.0 || !p.w.is_finite() {
        return None;
    }

    Some((p.x / p.w, p.y / p.w))
}

/// Inverts a 4x4 homogeneous transform.
///
/// # Errors
///
/// Returns [`ImageError::NonInvertibleTransform`] if the matrix is singular or the inverse is not
/// finite.
pub fn invert_transform(m: &Mat4) -> Result<Mat4, ImageError> {
    let det = m.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::NonInvertibleTransform);
    }

    let inv = m.inverse();
    if !inv.is_finite() {
        return Err(ImageError::NonInvertibleTransform);
    }

    Ok(inv)
}
