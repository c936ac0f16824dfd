mod utils;
mod wheel;

use smart_leds::RGB8;

pub use utils::{rgb_from_u32, rgb_to_u32};
pub use wheel::colorwheel;

pub type Rgb = RGB8;

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const TEAL: Rgb = Rgb { r: 0, g: 255, b: 126 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
