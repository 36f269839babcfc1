/// A 256-bin histogram of 8-bit luma values that supports incremental updates.
///
/// Bins are added and removed one sample at a time so that a window can slide over an image
/// without rebuilding the histogram from scratch.
///
/// # Example
///
/// ```
/// use retouch_imgproc::histogram::LumaHistogram;
///
/// let mut hist = LumaHistogram::new();
/// for v in [10, 10, 20, 30] {
///     hist.add(v);
/// }
///
/// assert_eq!(hist.count(), 4);
/// assert_eq!(hist.cdf(20), 3);
/// assert_eq!(hist.cdf_min(), 2);
///
/// // (3 - 2) * 255 / (4 - 2)
/// assert_eq!(hist.equalize(20), 127);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LumaHistogram {
    bins: [u32; 256],
    count: u32,
}

impl Default for LumaHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl LumaHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self {
            bins: [0; 256],
            count: 0,
        }
    }

    /// Add one sample to the histogram.
    #[inline]
    pub fn add(&mut self, value: u8) {
        self.bins[value as usize] += 1;
        self.count += 1;
    }

    /// Remove one sample from the histogram.
    ///
    /// PRECONDITION: `value` was previously added.
    #[inline]
    pub fn remove(&mut self, value: u8) {
        debug_assert!(self.bins[value as usize] > 0);
        self.bins[value as usize] -= 1;
        self.count -= 1;
    }

    /// The number of samples in the histogram.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Cumulative count of all samples less than or equal to `value`.
    pub fn cdf(&self, value: u8) -> u32 {
        self.bins[..=value as usize].iter().sum()
    }

    /// Cumulative count at the lowest non-empty bin, or 0 if the histogram is empty.
    pub fn cdf_min(&self) -> u32 {
        self.bins.iter().copied().find(|&c| c > 0).unwrap_or(0)
    }

    /// Remap `value` through the equalization curve of the histogram.
    ///
    /// Returns `255 * (cdf(value) - cdf_min) / (count - cdf_min)` rounded down, or `value` itself
    /// when every sample falls into the lowest bin.
    pub fn equalize(&self, value: u8) -> u8 {
        let cdf_min = self.cdf_min();
        if self.count <= cdf_min {
            return value;
        }

        let num = 255 * (self.cdf(value).saturating_sub(cdf_min)) as u64;
        let den = (self.count - cdf_min) as u64;

        (num / den).min(255) as u8
    }
}
