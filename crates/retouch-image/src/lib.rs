#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// generic image container.
pub mod image;

/// rgba pixel type.
pub mod pixel;

/// renderer-facing image buffer with a dirty flag.
pub mod raster;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::Pixel;
pub use crate::raster::RasterImage;
