use retouch_image::ImageError;

/// An error type for the edit session.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EditorError {
    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error when the session is created from an image without pixels.
    #[error("Cannot edit an empty image")]
    EmptyImage,
}
