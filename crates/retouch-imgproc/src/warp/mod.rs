//! Geometric re-projection of images under 4x4 homogeneous transforms.
//!
//! This module provides:
//!
//! - Forward and backward projection of an image into a buffer of the same size
//! - Scale-about-a-point matrix generation
//! - Point transformation and checked matrix inversion
//!
//! # Examples
//!
//! Zooming an image by 2x about its center:
//!
//! ```
//! use glam::Vec2;
//! use retouch_image::{ImageSize, Pixel, RasterImage};
//! use retouch_imgproc::intensity::IntensityMapper;
//! use retouch_imgproc::warp::{get_scale_matrix_about, project, ProjectionMode};
//!
//! let size = ImageSize { width: 8, height: 8 };
//! let src = RasterImage::from_size_pixel(size, Pixel::opaque(10, 20, 30)).unwrap();
//! let mut dst = RasterImage::from_size_pixel(size, Pixel::TRANSPARENT).unwrap();
//!
//! let m = get_scale_matrix_about(Vec2::new(4.0, 4.0), 2.0);
//! project(&src, &mut dst, &m, ProjectionMode::Backward, &IntensityMapper::identity()).unwrap();
//!
//! assert!(dst.pixels().all(|p| p == Pixel::opaque(10, 20, 30)));
//! ```

mod projection;
mod transform;

pub use projection::{project, ProjectionMode};
pub use transform::{get_scale_matrix_about, invert_transform, transform_point};
