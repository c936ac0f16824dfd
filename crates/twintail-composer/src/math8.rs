use crate::color::Rgb;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// A scale of 255 leaves the value untouched, a scale of 0 always yields 0.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale every channel of a color by the same factor
#[inline]
pub const fn scale_rgb(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_is_identity() {
        for value in 0..=255u8 {
            assert_eq!(scale8(value, 255), value);
        }
    }

    #[test]
    fn zero_scale_is_black() {
        for value in 0..=255u8 {
            assert_eq!(scale8(value, 0), 0);
        }
    }

    #[test]
    fn half_scale() {
        assert_eq!(scale8(255, 127), 127);
        assert_eq!(scale8(200, 127), 100);
    }
}
