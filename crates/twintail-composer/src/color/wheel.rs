use crate::color::Rgb;

/// Map a position on the 0-255 color wheel to a fully saturated color
///
/// The wheel goes red -> green -> blue -> red. Output matches the usual
/// `colorwheel` helper found in LED libraries, channel for channel.
pub const fn colorwheel(position: u8) -> Rgb {
    match position {
        0..=84 => Rgb {
            r: 255 - position * 3,
            g: position * 3,
            b: 0,
        },
        85..=169 => {
            let p = position - 85;
            Rgb {
                r: 0,
                g: 255 - p * 3,
                b: p * 3,
            }
        }
        _ => {
            let p = position - 170;
            Rgb {
                r: p * 3,
                g: 0,
                b: 255 - p * 3,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_points() {
        assert_eq!(colorwheel(0), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(colorwheel(85), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(colorwheel(170), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(colorwheel(255), Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn segment_edges() {
        assert_eq!(colorwheel(84), Rgb { r: 3, g: 252, b: 0 });
        assert_eq!(colorwheel(169), Rgb { r: 0, g: 3, b: 252 });
    }
}
