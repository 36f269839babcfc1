#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// local contrast enhancement module.
pub mod enhance;

/// sliding window histogram module.
pub mod histogram;

/// pixel intensity remapping module.
pub mod intensity;

/// image geometric transformations module.
pub mod warp;
