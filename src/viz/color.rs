/*
    YearWheel
    https://github.com/yearwheel/yearwheel

    Copyright 2025 YearWheel AB

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

/// A [VizColor] represents a color in 32-bit RGBA format.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VizColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for VizColor {
    fn default() -> VizColor {
        VizColor::TRANSPARENT
    }
}

#[rustfmt::skip]
impl VizColor {
    pub const TRANSPARENT: VizColor = VizColor { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: VizColor = VizColor { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: VizColor = VizColor { r: 0, g: 0, b: 0, a: 255 };
    /// Default body text color of the product (`#333333`).
    pub const TEXT: VizColor = VizColor { r: 0x33, g: 0x33, b: 0x33, a: 255 };
    /// Muted gray used for week cells and season arcs.
    pub const MUTED: VizColor = VizColor { r: 0x94, g: 0xA3, b: 0xB8, a: 255 };

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> VizColor {
        VizColor { r, g, b, a }
    }

    pub fn from_value(value: u8, alpha: u8) -> VizColor {
        VizColor {
            r: value,
            g: value,
            b: value,
            a: alpha,
        }
    }
}

impl VizColor {
    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string. Items reference colors
    /// authored in the external data layer, so a malformed string falls back
    /// to the default text color rather than failing the pass.
    pub fn from_hex(hex: &str) -> Option<VizColor> {
        let hex = hex.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(VizColor {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: 255,
            }),
            8 => Some(VizColor {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    pub fn from_hex_or_text(hex: &str) -> VizColor {
        VizColor::from_hex(hex).unwrap_or_else(|| {
            log::warn!("unparsable color '{hex}'; using default text color");
            VizColor::TEXT
        })
    }

    /// Relative luminance in `[0, 1]` (WCAG coefficients).
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// Black-or-white contrast color for text drawn over this color.
    pub fn contrast_text(&self) -> VizColor {
        if self.luminance() > 0.5 {
            VizColor::from_rgba8(0x0F, 0x17, 0x2A, 255)
        }
        else {
            VizColor::WHITE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_rgb_and_rgba() {
        assert_eq!(VizColor::from_hex("#36C5F0"), Some(VizColor::from_rgba8(0x36, 0xC5, 0xF0, 255)));
        assert_eq!(VizColor::from_hex("#00000080"), Some(VizColor::from_rgba8(0, 0, 0, 0x80)));
        assert_eq!(VizColor::from_hex("not-a-color"), None);
        assert_eq!(VizColor::from_hex("#FFF"), None);
    }

    #[test]
    fn contrast_flips_on_luminance() {
        assert_eq!(VizColor::WHITE.contrast_text(), VizColor::from_rgba8(0x0F, 0x17, 0x2A, 255));
        assert_eq!(VizColor::BLACK.contrast_text(), VizColor::WHITE);
    }
}
