use retouch_image::Pixel;

use crate::color::ColorSpaceConverter;

/// Affine remap of pixel luma: `Y' = clamp01(Y * scale + bias)`.
///
/// Luma is taken from the luma/chroma representation of the pixel and normalized to [0, 1];
/// chroma and opacity are left as they are. The mapper is a plain value: applying it has no side
/// effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityMapper {
    scale: f32,
    bias: f32,
}

impl Default for IntensityMapper {
    fn default() -> Self {
        Self::identity()
    }
}

impl IntensityMapper {
    /// Create a mapper with the effective slope `scale` and intercept `bias`.
    pub fn new(scale: f32, bias: f32) -> Self {
        Self { scale, bias }
    }

    /// The mapper that leaves every pixel untouched.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0)
    }

    /// The effective slope.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The effective intercept.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Whether this is exactly the identity remap.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.bias == 0.0
    }

    /// Apply the remap to an RGB pixel.
    ///
    /// The identity mapper returns the pixel unchanged, skipping the lossy color round trip.
    ///
    /// # Example
    ///
    /// ```
    /// use retouch_image::Pixel;
    /// use retouch_imgproc::intensity::IntensityMapper;
    ///
    /// let black = IntensityMapper::new(0.0, 0.0).apply(Pixel::opaque(200, 200, 200));
    /// assert_eq!(black, Pixel::opaque(1, 0, 1));
    ///
    /// let p = Pixel::new(12, 34, 56, 78);
    /// assert_eq!(IntensityMapper::identity().apply(p), p);
    /// ```
    #[inline]
    pub fn apply(&self, rgb: Pixel) -> Pixel {
        if self.is_identity() {
            return rgb;
        }

        let mut yuv = ColorSpaceConverter::luma_chroma_from_rgb(rgb);

        let y = yuv.r as f32 / 255.0;
        let y = (y * self.scale + self.bias).clamp(0.0, 1.0);
        yuv.r = (y * 255.0).round() as u8;

        ColorSpaceConverter::rgb_from_luma_chroma(yuv)
    }
}
