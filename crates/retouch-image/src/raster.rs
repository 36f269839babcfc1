use std::ops::Deref;

use crate::{
    error::ImageError,
    image::{Image, ImageSize},
    pixel::Pixel,
};

/// An RGBA8 image buffer shared with a renderer.
///
/// The `dirty` flag records that the pixels changed since the renderer last consumed the buffer.
/// Writers mark it through [`RasterImage::mark_dirty`]; the renderer clears it with
/// [`RasterImage::take_dirty`] after re-uploading.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    image: Image<u8, 4>,
    dirty: bool,
}

/// helper to dereference the inner image
impl Deref for RasterImage {
    type Target = Image<u8, 4>;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl From<Image<u8, 4>> for RasterImage {
    fn from(image: Image<u8, 4>) -> Self {
        Self {
            image,
            dirty: false,
        }
    }
}

impl RasterImage {
    /// Create a raster image from interleaved RGBA8 data.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match `size.width * size.height * 4`.
    ///
    /// # Example
    ///
    /// ```
    /// use retouch_image::{ImageSize, Pixel, RasterImage};
    ///
    /// let image = RasterImage::new(
    ///     ImageSize { width: 2, height: 1 },
    ///     vec![255, 0, 0, 255, 0, 255, 0, 255],
    /// ).unwrap();
    ///
    /// assert_eq!(image.pixel(1, 0).unwrap(), Pixel::opaque(0, 255, 0));
    /// assert!(!image.is_dirty());
    /// ```
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        Ok(Image::new(size, data)?.into())
    }

    /// Create a raster image from a row-major list of pixels.
    pub fn from_pixels(size: ImageSize, pixels: &[Pixel]) -> Result<Self, ImageError> {
        if pixels.len() != size.area() {
            return Err(ImageError::InvalidChannelShape(
                pixels.len() * 4,
                size.area() * 4,
            ));
        }

        let data = pixels.iter().flat_map(|&p| <[u8; 4]>::from(p)).collect();
        Self::new(size, data)
    }

    /// Create a raster image filled with a single pixel value.
    pub fn from_size_pixel(size: ImageSize, pixel: Pixel) -> Result<Self, ImageError> {
        Self::from_pixels(size, &vec![pixel; size.area()])
    }

    /// Get the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` lies outside of the image.
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel, ImageError> {
        let idx = self.offset(x, y)?;
        Ok(Pixel::from_slice(&self.image.as_slice()[idx..idx + 4]))
    }

    /// Iterate over the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.image.as_slice().chunks_exact(4).map(Pixel::from_slice)
    }

    /// Get the raw RGBA8 data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        self.image.as_slice_mut()
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size().area() == 0
    }

    /// Overwrite this buffer with the pixels of `src` and mark it dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the two images differ in size. Nothing is copied in that case.
    pub fn copy_from(&mut self, src: &RasterImage) -> Result<(), ImageError> {
        if src.size() != self.size() {
            return Err(ImageError::InvalidImageSize(
                src.width(),
                src.height(),
                self.width(),
                self.height(),
            ));
        }

        self.image.as_slice_mut().copy_from_slice(src.as_slice());
        self.dirty = true;
        Ok(())
    }

    /// Whether the buffer changed since the renderer last consumed it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the buffer as changed.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * 4)
    }
}
