/// A pixel with three 8-bit color channels and an 8-bit opacity.
///
/// The color channels hold R, G, B for RGB images. Images converted to luma/chroma reuse the same
/// layout and store Y, U, V in `r`, `g`, `b` respectively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// First color channel (red, or luma).
    pub r: u8,
    /// Second color channel (green, or chroma U).
    pub g: u8,
    /// Third color channel (blue, or chroma V).
    pub b: u8,
    /// Opacity, 0 is fully transparent.
    pub a: u8,
}

impl Pixel {
    /// A fully transparent pixel.
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    /// Create a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build a pixel from the first four values of an interleaved channel slice.
    ///
    /// PRECONDITION: `chunk.len() >= 4`.
    #[inline]
    pub fn from_slice(chunk: &[u8]) -> Self {
        Self::new(chunk[0], chunk[1], chunk[2], chunk[3])
    }

    /// Write the pixel into the first four values of an interleaved channel slice.
    ///
    /// PRECONDITION: `chunk.len() >= 4`.
    #[inline]
    pub fn write_to(self, chunk: &mut [u8]) {
        chunk[0] = self.r;
        chunk[1] = self.g;
        chunk[2] = self.b;
        chunk[3] = self.a;
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(c: [u8; 4]) -> Self {
        Pixel::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}

#[cfg(test)]
mod tests {
    use super::Pixel;

    #[test]
    fn pixel_slice_roundtrip() {
        let mut buf = [0u8; 8];
        Pixel::new(1, 2, 3, 4).write_to(&mut buf[4..]);
        assert_eq!(buf, [0, 0, 0, 0, 1, 2, 3, 4]);
        assert_eq!(Pixel::from_slice(&buf[4..]), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn pixel_transparent() {
        assert_eq!(<[u8; 4]>::from(Pixel::TRANSPARENT), [0, 0, 0, 0]);
        assert_eq!(Pixel::opaque(9, 8, 7).a, 255);
    }
}
