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

//! The per-render options snapshot. Everything here is a value; cosmetic
//! state (zoom, selection) is replaced wholesale between passes rather than
//! poked into a live instance.

use crate::{WheelHashSet, WheelRenderError};

/// Fallback palette used when the caller supplies no colors of their own.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#EF4444", "#F59E0B", "#10B981", "#0EA5E9", "#6366F1", "#A855F7", "#EC4899", "#64748B",
];

/// What the week band cells display. The external options record carries
/// the mode as a kebab-case string.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WeekRingDisplayMode {
    /// ISO week numbers, `1..=53`.
    #[default]
    WeekNumbers,
    /// The Monday of each week, rendered `d/M`.
    Dates,
}

/// Options snapshot consumed per render pass.
///
/// `zoomed_month` and `zoomed_quarter` restrict rendering (and hit testing)
/// to the sectors intersecting that scope; month zoom wins if both are set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WheelOptions {
    pub display_year: i32,
    pub title: String,
    /// Item fill colors, cycled by index. The product ships at least eight;
    /// shorter palettes cycle with a warning, an empty palette is an error.
    pub palette: Vec<String>,
    /// Internal render resolution in pixels (wheel width; the surface is
    /// taller by a quarter to make room for the title).
    pub size: f32,
    pub show_year_events: bool,
    pub show_week_ring: bool,
    pub show_month_ring: bool,
    pub show_ring_names: bool,
    pub show_seasons: bool,
    pub show_labels: bool,
    pub week_ring_display_mode: WeekRingDisplayMode,
    /// `0..=11`, or `None` for the full year.
    pub zoomed_month: Option<u8>,
    /// `0..=3`, or `None` for the full year.
    pub zoomed_quarter: Option<u8>,
    pub selected_item_ids: WheelHashSet<String>,
    pub readonly: bool,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            display_year: 2025,
            title: String::new(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            size: 2000.0,
            show_year_events: true,
            show_week_ring: true,
            show_month_ring: true,
            show_ring_names: false,
            show_seasons: false,
            show_labels: true,
            week_ring_display_mode: WeekRingDisplayMode::default(),
            zoomed_month: None,
            zoomed_quarter: None,
            selected_item_ids: WheelHashSet::default(),
            readonly: false,
        }
    }
}

impl WheelOptions {
    pub fn validate(&self) -> Result<(), WheelRenderError> {
        if self.palette.is_empty() {
            return Err(WheelRenderError::EmptyPalette);
        }
        if self.palette.len() < 8 {
            log::warn!(
                "palette has {} colors (expected at least 8); cycling anyway",
                self.palette.len()
            );
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(WheelRenderError::InvalidDimensions);
        }
        Ok(())
    }

    /// Palette color for the given index, cycled.
    pub fn palette_color(&self, index: usize) -> &str {
        &self.palette[index % self.palette.len()]
    }
}
