#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use retouch_image as image;

#[doc(inline)]
pub use retouch_imgproc as imgproc;

#[doc(inline)]
pub use retouch_editor as editor;
