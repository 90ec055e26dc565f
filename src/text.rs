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

//! Text fitting strategies and the measurement seam.
//!
//! All measurement flows through [TextMeasure]; the production
//! implementation wraps a `rusttype` font, and the *same* metrics object is
//! handed to both the raster and the vector backend, so exported vector
//! output always matches on-screen raster layout. Text layout never fails:
//! every strategy has a defined overflow fallback.

use std::f32::consts::PI;

use crate::{
    types::RingOrientation,
    viz::{TextAnchor, TextRun, VizColor, VizPoint2d},
    WheelRenderError,
};

use rusttype::{point, Font, Scale};

/// Width measurement for laid-out text. One implementation is shared by
/// composition and both backends.
pub trait TextMeasure {
    /// Width in surface pixels of `text` at font `size`.
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Production metrics backed by a `rusttype` font.
pub struct FontMetrics {
    font: Font<'static>,
}

impl FontMetrics {
    pub fn from_vec(data: Vec<u8>) -> Result<FontMetrics, WheelRenderError> {
        Font::try_from_vec(data)
            .map(|font| FontMetrics { font })
            .ok_or(WheelRenderError::BadFontData)
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);

        let mut min_x = 0i32;
        let mut max_x = 0i32;
        for glyph in self.font.layout(text, scale, point(0.0, 0.0)) {
            if let Some(bounding_box) = glyph.pixel_bounding_box() {
                min_x = min_x.min(bounding_box.min.x);
                max_x = max_x.max(bounding_box.max.x);
            }
        }

        (max_x - min_x) as f32
    }
}

/// Deterministic measurer for tests and headless use: every character
/// advances `factor × size` pixels.
pub struct FixedAdvanceMeasure {
    pub factor: f32,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        FixedAdvanceMeasure { factor: 0.6 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.factor * size
    }
}

/// The sector geometry a text strategy places into: identical to the filled
/// wedge's geometry, so text placement and fills can never disagree.
#[derive(Copy, Clone, Debug)]
pub struct SectorTextGeom {
    pub center: VizPoint2d<f32>,
    pub start_radius: f32,
    pub width: f32,
    /// Start angle in radians, canvas space.
    pub start_angle: f32,
    /// End angle in radians, canvas space.
    pub end_angle: f32,
}

impl SectorTextGeom {
    fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) / 2.0
    }

    fn angle_len(&self) -> f32 {
        (self.end_angle - self.start_angle).abs()
    }

    /// Candidate placement radius shared by the title strategies.
    fn middle_radius(&self) -> f32 {
        self.start_radius + self.width / 2.2
    }
}

/// Title strategy: month names and dominant ring labels. Fits when the
/// measured width stays under the candidate placement radius; on overflow
/// the text is pushed outward by one full band width and switches from
/// white to the base text color so it stays legible outside the fill.
pub fn fit_title(
    text: &str,
    geom: &SectorTextGeom,
    font_size: f32,
    base_color: VizColor,
    measure: &dyn TextMeasure,
) -> TextRun {
    let text = text.to_uppercase();
    let mid_angle = geom.mid_angle();
    let middle_radius = geom.middle_radius();
    let text_width = measure.text_width(&text, font_size);

    let (radius, color) = if text_width < middle_radius {
        (middle_radius, VizColor::WHITE)
    }
    else {
        (middle_radius + geom.width, base_color)
    };

    TextRun {
        text,
        origin: VizPoint2d::from_polar(&geom.center, radius, mid_angle),
        rotation: mid_angle + PI / 2.0,
        anchor: TextAnchor::Center,
        color,
        size: font_size,
        bold: true,
    }
}

/// Small-title strategy: the year-event band and other narrow rings. The fit
/// test is against the sector's arc length rather than the radius; the
/// rotation divisor is 2.06 on fit and 1 on overflow, matching the smaller
/// font's optical rotation center.
pub fn fit_small_title(
    text: &str,
    geom: &SectorTextGeom,
    font_size: f32,
    base_color: VizColor,
    measure: &dyn TextMeasure,
) -> TextRun {
    let text = text.to_uppercase();
    let mid_angle = geom.mid_angle();
    let middle_radius = geom.middle_radius();
    let arc_length = geom.start_radius * geom.angle_len();
    let text_width = measure.text_width(&text, font_size);

    let (radius, rotation, color) = if text_width < arc_length {
        (middle_radius, mid_angle + PI / 2.06, VizColor::WHITE)
    }
    else {
        (middle_radius + geom.width, mid_angle + PI, base_color)
    };

    TextRun {
        text,
        origin: VizPoint2d::from_polar(&geom.center, radius, mid_angle),
        rotation,
        anchor: TextAnchor::End,
        color,
        size: font_size,
        bold: true,
    }
}

/// List strategy: free-form multi-line labels inside one ring. A vertical
/// ring distributes the lines evenly across the sector's angular span, each
/// rotated tangentially; a horizontal ring stacks them as vertically
/// centered lines at the sector's mid-angle.
pub fn fit_list(
    lines: &[String],
    orientation: RingOrientation,
    geom: &SectorTextGeom,
    font_size: f32,
) -> Vec<TextRun> {
    if lines.is_empty() {
        return Vec::new();
    }

    let radius = geom.start_radius + geom.width / 2.0;

    match orientation {
        RingOrientation::Vertical => {
            let step = geom.angle_len() / (lines.len() + 1) as f32;
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let line_angle = geom.start_angle + step * (i + 1) as f32;
                    TextRun {
                        text: line.clone(),
                        origin: VizPoint2d::from_polar(&geom.center, radius, line_angle),
                        rotation: line_angle,
                        anchor: TextAnchor::Start,
                        color: VizColor::WHITE,
                        size: font_size,
                        bold: true,
                    }
                })
                .collect()
        }
        RingOrientation::Horizontal => {
            let mid_angle = geom.mid_angle();
            let anchor = VizPoint2d::from_polar(&geom.center, radius, mid_angle);
            let line_height = font_size * 1.2;
            let top = -(lines.len() as f32 - 1.0) / 2.0;
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| TextRun {
                    text: line.clone(),
                    origin: VizPoint2d::new(anchor.x, anchor.y + (top + i as f32) * line_height),
                    rotation: 0.0,
                    anchor: TextAnchor::Center,
                    color: VizColor::WHITE,
                    size: font_size,
                    bold: true,
                })
                .collect()
        }
    }
}
