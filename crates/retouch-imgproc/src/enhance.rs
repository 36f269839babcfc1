use retouch_image::{ImageError, Pixel, RasterImage};

use crate::{color::ColorSpaceConverter, histogram::LumaHistogram};

/// Half side of the square neighborhood used by local equalization.
///
/// A radius `R` covers a `(2R + 1) x (2R + 1)` window. The radius is always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EqualizationRadius(usize);

impl Default for EqualizationRadius {
    fn default() -> Self {
        Self(3)
    }
}

impl EqualizationRadius {
    /// Create a radius, clamping values below 1 to 1.
    pub fn new(radius: usize) -> Self {
        Self(radius.max(1))
    }

    /// The radius in pixels.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Grow the radius by one pixel.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Shrink the radius by one pixel, never going below 1.
    pub fn decrement(&mut self) {
        self.0 = (self.0 - 1).max(1);
    }
}

impl std::fmt::Display for EqualizationRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Apply local histogram equalization to an RGB image.
///
/// For every pixel the luma histogram of the surrounding `(2R + 1) x (2R + 1)` window, clipped to
/// the image bounds, is equalized and the center luma remapped through it. Chroma and opacity are
/// kept. Pixels whose luma does not change are copied verbatim from `src`.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image. Must have the size of `src`.
/// * `radius` - The neighborhood radius.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use retouch_image::{ImageSize, Pixel, RasterImage};
/// use retouch_imgproc::enhance::{equalize_local, EqualizationRadius};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let src = RasterImage::from_size_pixel(size, Pixel::opaque(128, 128, 128)).unwrap();
/// let mut dst = RasterImage::from_size_pixel(size, Pixel::TRANSPARENT).unwrap();
///
/// equalize_local(&src, &mut dst, EqualizationRadius::new(1)).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// assert!(dst.is_dirty());
/// ```
pub fn equalize_local(
    src: &RasterImage,
    dst: &mut RasterImage,
    radius: EqualizationRadius,
) -> Result<(), ImageError> {
    check_sizes(src, dst)?;

    let yuv = src
        .pixels()
        .map(ColorSpaceConverter::luma_chroma_from_rgb)
        .collect::<Vec<_>>();
    let luma = yuv.iter().map(|p| p.r).collect::<Vec<_>>();
    let equalized = equalize_luma_plane(&luma, src.cols(), src.rows(), radius);

    src.as_slice()
        .chunks_exact(4)
        .zip(dst.as_slice_mut().chunks_exact_mut(4))
        .zip(yuv.iter().zip(equalized.iter()))
        .for_each(|((src_pixel, dst_pixel), (&yuv_pixel, &y))| {
            if y == yuv_pixel.r {
                dst_pixel.copy_from_slice(src_pixel);
            } else {
                ColorSpaceConverter::rgb_from_luma_chroma(Pixel { r: y, ..yuv_pixel })
                    .write_to(dst_pixel);
            }
        });

    dst.mark_dirty();

    Ok(())
}

/// Apply local histogram equalization to an image already in luma/chroma form.
///
/// Only the luma channel (`r`) is rewritten; chroma and opacity are copied unchanged.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn equalize_local_luma_chroma(
    src: &RasterImage,
    dst: &mut RasterImage,
    radius: EqualizationRadius,
) -> Result<(), ImageError> {
    check_sizes(src, dst)?;

    let luma = src.pixels().map(|p| p.r).collect::<Vec<_>>();
    let equalized = equalize_luma_plane(&luma, src.cols(), src.rows(), radius);

    src.as_slice()
        .chunks_exact(4)
        .zip(dst.as_slice_mut().chunks_exact_mut(4))
        .zip(equalized.iter())
        .for_each(|((src_pixel, dst_pixel), &y)| {
            dst_pixel.copy_from_slice(src_pixel);
            dst_pixel[0] = y;
        });

    dst.mark_dirty();

    Ok(())
}

fn check_sizes(src: &RasterImage, dst: &RasterImage) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Equalizes a row-major luma plane with a histogram sliding along each row.
fn equalize_luma_plane(
    luma: &[u8],
    cols: usize,
    rows: usize,
    radius: EqualizationRadius,
) -> Vec<u8> {
    let mut out = vec![0u8; luma.len()];
    if cols == 0 || rows == 0 {
        return out;
    }

    let r = radius.get();

    for cy in 0..rows {
        let y0 = cy.saturating_sub(r);
        let y1 = (cy + r).min(rows - 1);

        let add_column = |hist: &mut LumaHistogram, x: usize| {
            (y0..=y1).for_each(|y| hist.add(luma[y * cols + x]));
        };
        let remove_column = |hist: &mut LumaHistogram, x: usize| {
            (y0..=y1).for_each(|y| hist.remove(luma[y * cols + x]));
        };

        // window for cx = 0
        let mut hist = LumaHistogram::new();
        (0..=r.min(cols - 1)).for_each(|x| add_column(&mut hist, x));

        for cx in 0..cols {
            if cx > 0 {
                if cx + r < cols {
                    add_column(&mut hist, cx + r);
                }
                if cx > r {
                    remove_column(&mut hist, cx - r - 1);
                }
            }

            let idx = cy * cols + cx;
            out[idx] = hist.equalize(luma[idx]);
        }
    }

    out
}
