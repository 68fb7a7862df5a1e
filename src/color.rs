//! RGBA tint colors parsed from chat metadata.

/// 8-bit RGBA color. Chat platforms hand colors over as hex strings;
/// anything that fails to parse is dropped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Returns `None` for
    /// anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 | 4 => {
                let r = nibble(0)?;
                let g = nibble(1)?;
                let b = nibble(2)?;
                let a = if hex.len() == 4 { nibble(3)? * 17 } else { 255 };
                Some(Self::rgba(r * 17, g * 17, b * 17, a))
            }
            6 | 8 => {
                let r = byte(0)?;
                let g = byte(2)?;
                let b = byte(4)?;
                let a = if hex.len() == 8 { byte(6)? } else { 255 };
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl Default for Color {
    /// Neutral grey worn by users with no color metadata.
    fn default() -> Self {
        Self::rgb(0x96, 0x96, 0x96)
    }
}
