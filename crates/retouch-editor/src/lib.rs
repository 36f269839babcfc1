#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// gesture state machine over the geometric and intensity transforms.
pub mod accumulator;

/// keyboard commands.
pub mod command;

/// Error types for the editor module.
pub mod error;

/// session configuration.
pub mod options;

/// edit session owning the image buffers.
pub mod session;

/// status surface shown next to the image.
pub mod status;

pub use crate::accumulator::{EditMode, TransformAccumulator, TransformSnapshot};
pub use crate::command::Command;
pub use crate::error::EditorError;
pub use crate::options::SessionOptions;
pub use crate::session::EditSession;
pub use crate::status::{SessionStatus, TransformLine};
