//! 8-bit RGBA palette color
//!
//! Palette entries arrive from the decoder as straight (non-premultiplied)
//! 8-bit channels. Distance calculations work on the 16-bit premultiplied
//! expansion, so that conversion lives here.

/// Full-scale value of a 16-bit channel.
pub const FULL_SCALE: u32 = 0xFFFF;

/// A color with straight (non-premultiplied) 8-bit channels.
///
/// This is the representation used for palette entries (PLTE + tRNS) and for
/// 4-byte pixels in direct-color buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    ///
    /// # Example
    /// ```
    /// use lossy_filter::Rgba;
    /// let red = Rgba::opaque(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a byte array [R, G, B, A].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array [R, G, B, A].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Expand to 16-bit channels with color premultiplied by alpha.
    ///
    /// Each 8-bit channel is widened by byte replication (`v * 0x101`), then
    /// the color channels are scaled by `a / 255`. Alpha is widened the same
    /// way, so opaque colors map to `0xFFFF`.
    ///
    /// # Example
    /// ```
    /// use lossy_filter::Rgba;
    /// assert_eq!(Rgba::opaque(255, 128, 0).to_rgba16(), [0xFFFF, 0x8080, 0, 0xFFFF]);
    /// assert_eq!(Rgba::new(255, 255, 255, 0).to_rgba16(), [0, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn to_rgba16(self) -> [u32; 4] {
        let a = self.a as u32;
        let premultiply = |v: u8| (v as u32 * 0x101) * a / 0xFF;
        [
            premultiply(self.r),
            premultiply(self.g),
            premultiply(self.b),
            a * 0x101,
        ]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(color: Rgba) -> Self {
        color.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_expansion_is_byte_replication() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let [r, g, b, a] = Rgba::opaque(v, v, v).to_rgba16();
            let expected = v as u32 * 0x101;
            assert_eq!((r, g, b), (expected, expected, expected));
            assert_eq!(a, FULL_SCALE);
        }
    }

    #[test]
    fn test_half_alpha_premultiplies() {
        // 0xFFFF * 128 / 255 = 32896
        let [r, g, b, a] = Rgba::new(255, 0, 255, 128).to_rgba16();
        assert_eq!(r, 32896);
        assert_eq!(g, 0);
        assert_eq!(b, 32896);
        assert_eq!(a, 128 * 0x101);
    }

    #[test]
    fn test_byte_array_conversions() {
        let color = Rgba::from([1, 2, 3, 4]);
        assert_eq!(color, Rgba::new(1, 2, 3, 4));
        let bytes: [u8; 4] = color.into();
        assert_eq!(bytes, [1, 2, 3, 4]);
    }
}
