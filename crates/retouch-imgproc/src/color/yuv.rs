use retouch_image::{ImageError, Pixel, RasterImage};

/// RGB to YUV matrix, row-major.
#[rustfmt::skip]
const RGB_TO_YUV: [f64; 9] = [
     0.299,    0.587,    0.114,
    -0.14713, -0.28886,  0.436,
     0.615,   -0.51499, -0.10001,
];

/// Inverse of [`RGB_TO_YUV`], row-major (adjugate / determinant).
#[rustfmt::skip]
const YUV_TO_RGB: [f64; 9] = [
    1.0000000001179836, -1.1798384382383568e-05,  1.1398345757210222,
    1.0000039464605326, -0.3946460532621069,     -0.5805942338343951,
    0.9999796788806156,  2.0321119384367283,     -1.5112980663736013e-05,
];

#[inline]
fn mul3x3(m: &[f64; 9], a: f64, b: f64, c: f64) -> (f64, f64, f64) {
    (
        m[0] * a + m[1] * b + m[2] * c,
        m[3] * a + m[4] * b + m[5] * c,
        m[6] * a + m[7] * b + m[8] * c,
    )
}

/// Rounds half away from zero, then clamps to a byte.
#[inline]
fn to_u8(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB pixel into its luma/chroma (YUV) representation.
///
/// The returned pixel stores Y in `r`, U in `g` and V in `b`, all in [0, 255]. Luma in [0, 1] is
/// scaled by 255; the chroma channels in [-0.5, +0.5] are re-biased by 0.5 before scaling. Every
/// channel is rounded to the nearest integer and clamped, so the conversion is lossy. Opacity is
/// passed through.
///
/// # Example
///
/// ```
/// use retouch_image::Pixel;
/// use retouch_imgproc::color::ColorSpaceConverter;
///
/// let yuv = ColorSpaceConverter::luma_chroma_from_rgb(Pixel::opaque(128, 128, 128));
/// assert_eq!(yuv, Pixel::opaque(128, 128, 128));
/// ```
pub struct ColorSpaceConverter;

impl ColorSpaceConverter {
    /// Convert an RGB pixel to luma/chroma. See the type level documentation.
    #[inline]
    pub fn luma_chroma_from_rgb(rgb: Pixel) -> Pixel {
        let (y, u, v) = mul3x3(
            &RGB_TO_YUV,
            rgb.r as f64 / 255.0,
            rgb.g as f64 / 255.0,
            rgb.b as f64 / 255.0,
        );

        Pixel::new(
            to_u8(y * 255.0),
            to_u8((u + 0.5) * 255.0),
            to_u8((v + 0.5) * 255.0),
            rgb.a,
        )
    }

    /// Convert a luma/chroma pixel back to RGB.
    ///
    /// Inverse of [`ColorSpaceConverter::luma_chroma_from_rgb`] up to rounding and clamping.
    #[inline]
    pub fn rgb_from_luma_chroma(yuv: Pixel) -> Pixel {
        let (r, g, b) = mul3x3(
            &YUV_TO_RGB,
            yuv.r as f64 / 255.0,
            yuv.g as f64 / 255.0 - 0.5,
            yuv.b as f64 / 255.0 - 0.5,
        );

        Pixel::new(to_u8(r * 255.0), to_u8(g * 255.0), to_u8(b * 255.0), yuv.a)
    }

    /// Extract only the luma byte of an RGB pixel.
    #[inline]
    pub fn luma(rgb: Pixel) -> u8 {
        Self::luma_chroma_from_rgb(rgb).r
    }
}

/// Convert an RGB image to a luma/chroma image.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output luma/chroma image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use retouch_image::{ImageSize, Pixel, RasterImage};
/// use retouch_imgproc::color::luma_chroma_from_rgb_image;
///
/// let size = ImageSize { width: 4, height: 5 };
/// let image = RasterImage::from_size_pixel(size, Pixel::opaque(255, 255, 255)).unwrap();
/// let mut yuv = RasterImage::from_size_pixel(size, Pixel::TRANSPARENT).unwrap();
///
/// luma_chroma_from_rgb_image(&image, &mut yuv).unwrap();
///
/// assert_eq!(yuv.pixel(0, 0).unwrap().r, 255);
/// assert!(yuv.is_dirty());
/// ```
pub fn luma_chroma_from_rgb_image(
    src: &RasterImage,
    dst: &mut RasterImage,
) -> Result<(), ImageError> {
    convert_image(src, dst, ColorSpaceConverter::luma_chroma_from_rgb)
}

/// Convert a luma/chroma image to an RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_luma_chroma_image(
    src: &RasterImage,
    dst: &mut RasterImage,
) -> Result<(), ImageError> {
    convert_image(src, dst, ColorSpaceConverter::rgb_from_luma_chroma)
}

fn convert_image(
    src: &RasterImage,
    dst: &mut RasterImage,
    f: impl Fn(Pixel) -> Pixel,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    src.as_slice()
        .chunks_exact(4)
        .zip(dst.as_slice_mut().chunks_exact_mut(4))
        .for_each(|(src_pixel, dst_pixel)| {
            f(Pixel::from_slice(src_pixel)).write_to(dst_pixel);
        });

    dst.mark_dirty();

    Ok(())
}
