use crate::error::ImageError;

/// Width and height of an image, in pixels.
///
/// # Examples
///
/// ```
/// use retouch_image::ImageSize;
///
/// let size: ImageSize = [640, 480].into();
///
/// assert_eq!(size.area(), 307_200);
/// assert_eq!(size.to_string(), "640x480");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// A row-major buffer of `CHANNELS` interleaved samples per pixel.
///
/// The length of the buffer is checked once on construction and never changes afterwards, so
/// every accessor can rely on `data.len() == width * height * CHANNELS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap `data` as an image of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidChannelShape`] with the received and expected lengths when
    /// `data` does not hold exactly `CHANNELS` samples per pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use retouch_image::{Image, ImageError};
    ///
    /// let rgba = Image::<u8, 4>::new([3, 2].into(), vec![0; 24]).unwrap();
    /// assert_eq!((rgba.cols(), rgba.rows()), (3, 2));
    ///
    /// let short = Image::<u8, 4>::new([3, 2].into(), vec![0; 23]);
    /// assert_eq!(short, Err(ImageError::InvalidChannelShape(23, 24)));
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns, same as [`Image::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows, same as [`Image::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The interleaved samples.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The interleaved samples, writable. The length stays fixed.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}
