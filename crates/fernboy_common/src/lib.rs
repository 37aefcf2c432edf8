pub mod button;

pub use button::{Button, Buttons};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn gray(level: u8) -> Color {
        Color::new_rgb(level, level, level)
    }

    /// Decode a little-endian CGB palette entry (`0bbbbbgggggrrrrr`).
    ///
    /// Each 5-bit channel is widened to 8 bits by replicating its top bits
    /// into the low end, so 0x1F maps to 0xFF and 0 stays 0.
    #[inline]
    pub const fn from_rgb555(value: u16) -> Color {
        const fn widen(c: u16) -> u8 {
            let c = (c & 0x1F) as u8;
            (c << 3) | (c >> 2)
        }
        Color::new_rgb(widen(value), widen(value >> 5), widen(value >> 10))
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}
