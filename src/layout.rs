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

//! Radial band layout: every dimension of the wheel is a fixed proportion of
//! the internal render size, and the available radial budget is divided among
//! the activity rings by a gently decreasing allocation that consumes the
//! budget exactly.

use crate::viz::VizPoint2d;

/// All size-proportional dimensions of one wheel surface.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelMetrics {
    pub size: f32,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels; taller than wide to fit the title row.
    pub height: f32,
    pub center: VizPoint2d<f32>,
    /// Hub radius; nothing is drawn inside it except the year text.
    pub min_radius: f32,
    /// Outer edge of the outermost band.
    pub max_radius: f32,
    /// Gap between reserved bands.
    pub standard_gap: f32,
    /// Spacing between adjacent activity rings.
    pub ring_spacing: f32,
    pub year_event_width: f32,
    pub month_width: f32,
    pub week_width: f32,
    pub title_font: f32,
    pub year_font: f32,
    pub year_event_font: f32,
    pub month_font: f32,
    pub week_font: f32,
    pub list_font: f32,
    pub ring_name_font: f32,
}

impl WheelMetrics {
    pub fn new(size: f32) -> WheelMetrics {
        WheelMetrics {
            size,
            width: size,
            height: size + size / 4.0,
            center: VizPoint2d::new(size / 2.0, size / 5.0 + size / 2.0),
            min_radius: size / 15.0,
            max_radius: size / 2.0 - size / 30.0,
            standard_gap: size / 200.0,
            ring_spacing: size / 300.0,
            year_event_width: size / 40.0,
            month_width: size / 25.0,
            week_width: size / 35.0,
            title_font: size / 20.0,
            year_font: size / 30.0,
            year_event_font: size / 90.0,
            month_font: size / 60.0,
            week_font: size / 70.0,
            list_font: size / 150.0,
            ring_name_font: size / 80.0,
        }
    }
}

/// One radial band: `[start_radius, start_radius + width)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Band {
    pub start_radius: f32,
    pub width: f32,
}

impl Band {
    pub fn new(start_radius: f32, width: f32) -> Band {
        Band { start_radius, width }
    }

    pub fn end_radius(&self) -> f32 {
        self.start_radius + self.width
    }

    pub fn mid_radius(&self) -> f32 {
        self.start_radius + self.width / 2.0
    }
}

/// The planned radial layout of one wheel, outer bands to inner:
/// year-event band, month-name band, the activity rings, then the week band
/// against the hub. Activity bands are ordered innermost first, parallel to
/// the visible ring list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RingBands {
    pub year_events: Option<Band>,
    pub months: Option<Band>,
    pub weeks: Option<Band>,
    pub activity: Vec<Band>,
}

/// Divide `budget` among `count` rings with fixed `spacing` between them,
/// innermost first. Ring `i` of the remaining budget takes `1/(count−i) ×
/// 1.1`; the last ring absorbs whatever is left, so the total including
/// spacing consumes the budget exactly, with no drift from rounding.
pub fn allocate_ring_widths(budget: f32, count: usize, spacing: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }

    let mut widths = Vec::with_capacity(count);
    let mut remaining = budget - spacing * (count - 1) as f32;

    for i in 0..count {
        let width = if i != count - 1 {
            remaining * (1.0 / (count - i) as f32) * 1.1
        }
        else {
            remaining
        };
        widths.push(width);
        remaining -= width;
    }

    widths
}

/// Plan the full radial layout for `ring_count` visible activity rings and
/// the enabled reserved bands.
pub fn plan_rings(
    metrics: &WheelMetrics,
    ring_count: usize,
    show_year_events: bool,
    show_month_ring: bool,
    show_week_ring: bool,
) -> RingBands {
    let mut bands = RingBands::default();
    let mut outer = metrics.max_radius;

    if show_year_events {
        bands.year_events = Some(Band::new(outer - metrics.year_event_width, metrics.year_event_width));
        outer -= metrics.year_event_width + metrics.standard_gap;
    }

    if show_month_ring {
        bands.months = Some(Band::new(outer - metrics.month_width, metrics.month_width));
        outer -= metrics.month_width + metrics.standard_gap;
    }

    let mut inner = metrics.min_radius;
    if show_week_ring {
        bands.weeks = Some(Band::new(inner, metrics.week_width));
        inner += metrics.week_width + metrics.standard_gap;
    }

    let budget = outer - inner;
    if budget <= 0.0 {
        log::warn!("no radial budget left for {} activity rings", ring_count);
        return bands;
    }

    let widths = allocate_ring_widths(budget, ring_count, metrics.ring_spacing);
    let mut start = inner;
    for width in widths {
        bands.activity.push(Band::new(start, width));
        start += width + metrics.ring_spacing;
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_consume_budget_exactly() {
        // 4 rings, 400px budget, 4px spacing: widths sum to 400 − 12 = 388.
        let widths = allocate_ring_widths(400.0, 4, 4.0);
        assert_eq!(widths.len(), 4);
        let sum: f32 = widths.iter().sum();
        assert!((sum - 388.0).abs() < 1e-3, "sum was {sum}");
        assert!((sum + 3.0 * 4.0 - 400.0).abs() < 1e-3);
    }

    #[test]
    fn allocation_decreases_gently() {
        let widths = allocate_ring_widths(400.0, 4, 4.0);
        // 1/(N−i)×1.1 hands the first ring slightly more than an even split
        // and tapers from there; only the final remainder ring breaks the
        // monotone taper.
        assert!(widths[0] > widths[1]);
        assert!(widths[1] > widths[2]);
        for w in &widths {
            assert!(*w > 0.0);
        }
    }

    #[test]
    fn single_ring_takes_whole_budget() {
        let widths = allocate_ring_widths(250.0, 1, 4.0);
        assert_eq!(widths, vec![250.0]);
    }

    #[test]
    fn no_rings_no_widths() {
        assert!(allocate_ring_widths(250.0, 0, 4.0).is_empty());
    }

    #[test]
    fn budget_exact_for_many_ring_counts() {
        for count in 1..=12 {
            let budget = 973.0;
            let spacing = 3.5;
            let widths = allocate_ring_widths(budget, count, spacing);
            let sum: f32 = widths.iter().sum();
            let total = sum + spacing * (count - 1) as f32;
            assert!((total - budget).abs() < 1e-2, "count {count}: total {total}");
        }
    }

    #[test]
    fn bands_never_overlap() {
        let metrics = WheelMetrics::new(2000.0);
        let bands = plan_rings(&metrics, 5, true, true, true);

        let mut ordered: Vec<Band> = Vec::new();
        ordered.push(bands.weeks.unwrap());
        ordered.extend(bands.activity.iter().copied());
        ordered.push(bands.months.unwrap());
        ordered.push(bands.year_events.unwrap());

        for pair in ordered.windows(2) {
            assert!(
                pair[0].end_radius() <= pair[1].start_radius + 1e-3,
                "band [{}, {}] overlaps [{}, {}]",
                pair[0].start_radius,
                pair[0].end_radius(),
                pair[1].start_radius,
                pair[1].end_radius()
            );
        }
        assert!(ordered.last().unwrap().end_radius() <= metrics.max_radius + 1e-3);
        assert!(ordered[0].start_radius >= metrics.min_radius);
    }

    #[test]
    fn disabled_bands_free_their_budget() {
        let metrics = WheelMetrics::new(2000.0);
        let with_all = plan_rings(&metrics, 3, true, true, true);
        let without = plan_rings(&metrics, 3, false, false, false);

        let sum = |bands: &RingBands| bands.activity.iter().map(|b| b.width).sum::<f32>();
        assert!(sum(&without) > sum(&with_all));
        assert!(without.year_events.is_none());
        assert!(without.months.is_none());
        assert!(without.weeks.is_none());
    }
}
