/// Discrete editing actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Make gestures edit the geometric transform.
    GeometricMode,
    /// Make gestures edit the intensity transform.
    IntensityMode,
    /// Project by pushing source pixels.
    ForwardProjection,
    /// Project by pulling destination pixels.
    BackwardProjection,
    /// Equalize the original image into the working image.
    Equalize,
    /// Grow the equalization radius by one.
    IncreaseRadius,
    /// Shrink the equalization radius by one.
    DecreaseRadius,
    /// Restore the original image and drop every transform.
    Reset,
}

impl Command {
    /// Map a keyboard key to its command, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// use retouch_editor::Command;
    ///
    /// assert_eq!(Command::from_key('e'), Some(Command::Equalize));
    /// assert_eq!(Command::from_key('_'), Some(Command::DecreaseRadius));
    /// assert_eq!(Command::from_key('q'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        let cmd = match key.to_ascii_uppercase() {
            'S' => Command::GeometricMode,
            'I' => Command::IntensityMode,
            'F' => Command::ForwardProjection,
            'B' => Command::BackwardProjection,
            'E' => Command::Equalize,
            '+' | '=' => Command::IncreaseRadius,
            '-' | '_' => Command::DecreaseRadius,
            'Z' => Command::Reset,
            _ => return None,
        };
        Some(cmd)
    }
}
