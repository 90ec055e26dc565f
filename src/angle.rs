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

//! Date-to-angle mapping for a display year.
//!
//! Dates map linearly onto degrees: January 1st is 0° and angles grow through
//! the year. Date angles never include rotation; the canvas-convention
//! correction and the wheel rotation offset are applied when geometry is
//! built, so panning or rotating the wheel never re-maps a single date.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Minimum angular footprint of an item, in degrees. Sub-degree wedges are
/// unclickable and invisible; spans below this widen to exactly this value,
/// centered on the original midpoint.
pub const MIN_SPAN_DEG: f32 = 3.0;

/// Canvas convention places 0° at 3 o'clock; subtracting a quarter turn puts
/// the wheel's date 0° (January 1st) at 12 o'clock.
pub const CANVAS_OFFSET_DEG: f32 = -90.0;

/// The product's resting rotation offset. Applied, together with any
/// animation offset, as a whole-wheel rotation.
pub const BASE_ROTATION_DEG: f32 = -15.0;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November",
    "December",
];

/// January 1st and December 31st of `year`, or `None` if the year is outside
/// the supported calendar range.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((start, end))
}

/// Map a date to a whole-degree angle within `[year_start, year_end]`:
/// `round((date − year_start) / (year_end − year_start) × 360)`.
///
/// Monotonic non-decreasing in `date` and normalized to `[0, 360)`; December
/// 31st rounds to the full turn and is clamped one degree inside the circle
/// so the result stays normalized.
pub fn angle(date: NaiveDate, year_start: NaiveDate, year_end: NaiveDate) -> f32 {
    let total = (year_end - year_start).num_days() as f32;
    let elapsed = (date - year_start).num_days() as f32;
    ((elapsed / total) * 360.0).round().clamp(0.0, 359.0)
}

/// Unrounded, unclamped variant used for reserved-band boundaries, so that
/// month, quarter and week cells tile `[0°, 360°]` exactly.
pub fn fractional_angle(date: NaiveDate, year_start: NaiveDate, year_end: NaiveDate) -> f32 {
    let total = (year_end - year_start).num_days() as f32;
    let elapsed = (date - year_start).num_days() as f32;
    (elapsed / total) * 360.0
}

/// Invert the date mapping: the date within `year` closest to `angle_deg`
/// (degrees in date space). Used to derive new boundary dates from drag
/// angles; angles past the year edges clamp to the edges.
pub fn date_at(angle_deg: f32, year: i32) -> Option<NaiveDate> {
    let (year_start, year_end) = year_bounds(year)?;
    let total = (year_end - year_start).num_days() as f32;
    let days = ((angle_deg / 360.0) * total).round();
    let days = days.clamp(0.0, total) as u64;
    year_start.checked_add_days(Days::new(days))
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    }
    else {
        normalized
    }
}

/// Wraparound-safe containment test for a normalized angle within a
/// normalized `[start, end]` range.
pub fn angular_contains(start: f32, end: f32, angle: f32) -> bool {
    if start <= end {
        angle >= start && angle <= end
    }
    else {
        angle >= start || angle <= end
    }
}

/// Apply the minimum-span policy: spans narrower than [MIN_SPAN_DEG] widen to
/// exactly [MIN_SPAN_DEG] centered on the original midpoint. Returns the
/// (possibly widened) span and whether widening happened. Inputs are raw
/// (unnormalized) angles so the result can dip below 0° near January 1st.
pub fn widen_min_span(start: f32, end: f32) -> (f32, f32, bool) {
    if (end - start).abs() < MIN_SPAN_DEG {
        let mid = (start + end) / 2.0;
        (mid - MIN_SPAN_DEG / 2.0, mid + MIN_SPAN_DEG / 2.0, true)
    }
    else {
        (start, end, false)
    }
}

/// One month cell of the month-name band.
#[derive(Clone, Debug)]
pub struct MonthSegment {
    /// Month index, `0..=11`.
    pub month: u32,
    pub name: &'static str,
    pub start_deg: f32,
    pub end_deg: f32,
}

/// The twelve month cells of `year`, tiling `[0°, 360°]`.
pub fn month_segments(year: i32) -> Vec<MonthSegment> {
    let Some((year_start, year_end)) = year_bounds(year) else {
        return Vec::new();
    };

    (0..12u32)
        .filter_map(|month| {
            let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
            let next_first = if month == 11 {
                // December closes the circle
                return Some(MonthSegment {
                    month,
                    name: MONTH_NAMES[month as usize],
                    start_deg: fractional_angle(first, year_start, year_end),
                    end_deg: 360.0,
                });
            }
            else {
                NaiveDate::from_ymd_opt(year, month + 2, 1)?
            };
            Some(MonthSegment {
                month,
                name: MONTH_NAMES[month as usize],
                start_deg: fractional_angle(first, year_start, year_end),
                end_deg: fractional_angle(next_first, year_start, year_end),
            })
        })
        .collect()
}

/// Angular range of a quarter (`0..=3`) of `year`.
pub fn quarter_span(year: i32, quarter: u8) -> Option<(f32, f32)> {
    let (year_start, year_end) = year_bounds(year)?;
    let first = NaiveDate::from_ymd_opt(year, quarter as u32 * 3 + 1, 1)?;
    let end_deg = if quarter >= 3 {
        360.0
    }
    else {
        let next = NaiveDate::from_ymd_opt(year, quarter as u32 * 3 + 4, 1)?;
        fractional_angle(next, year_start, year_end)
    };
    Some((fractional_angle(first, year_start, year_end), end_deg))
}

/// Angular range of a month (`0..=11`) of `year`.
pub fn month_span(year: i32, month: u8) -> Option<(f32, f32)> {
    let segments = month_segments(year);
    segments
        .get(month as usize)
        .map(|segment| (segment.start_deg, segment.end_deg))
}

/// One week cell of the week band.
#[derive(Clone, Debug)]
pub struct WeekSegment {
    /// ISO week number.
    pub week: u32,
    /// The Monday the week starts on (may fall in the previous year).
    pub monday: NaiveDate,
    pub start_deg: f32,
    pub end_deg: f32,
}

/// ISO week cells overlapping `year`, clamped to the year's angular range.
pub fn week_segments(year: i32) -> Vec<WeekSegment> {
    let Some((year_start, year_end)) = year_bounds(year) else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut monday = year_start.week(Weekday::Mon).first_day();
    while monday <= year_end {
        let sunday = match monday.checked_add_days(Days::new(6)) {
            Some(d) => d,
            None => break,
        };
        segments.push(WeekSegment {
            week: monday.iso_week().week(),
            monday,
            start_deg: fractional_angle(monday.max(year_start), year_start, year_end),
            end_deg: fractional_angle(sunday.min(year_end), year_start, year_end),
        });
        monday = match monday.checked_add_days(Days::new(7)) {
            Some(d) => d,
            None => break,
        };
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> (NaiveDate, NaiveDate) {
        year_bounds(2025).unwrap()
    }

    #[test]
    fn angle_is_monotonic_and_normalized() {
        let (ys, ye) = bounds();
        let mut previous = -1.0f32;
        let mut date = ys;
        while date <= ye {
            let a = angle(date, ys, ye);
            assert!(a >= previous, "angle regressed at {date}");
            assert!((0.0..360.0).contains(&a), "angle {a} out of range at {date}");
            previous = a;
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn january_first_is_zero() {
        let (ys, ye) = bounds();
        assert_eq!(angle(ys, ys, ye), 0.0);
    }

    #[test]
    fn short_span_widens_to_three_degrees_about_midpoint() {
        let (ys, ye) = bounds();
        let start = angle(ys, ys, ye);
        let end = angle(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(), ys, ye);
        assert!((end - start).abs() < MIN_SPAN_DEG);

        let mid = (start + end) / 2.0;
        let (ws, we, widened) = widen_min_span(start, end);
        assert!(widened);
        assert!((we - ws - MIN_SPAN_DEG).abs() < 1e-6);
        assert!(((ws + we) / 2.0 - mid).abs() < 1e-6);
    }

    #[test]
    fn wide_span_is_untouched() {
        let (s, e, widened) = widen_min_span(10.0, 40.0);
        assert!(!widened);
        assert_eq!((s, e), (10.0, 40.0));
    }

    #[test]
    fn date_at_inverts_angle() {
        let (ys, ye) = bounds();
        for day in [1u32, 90, 180, 300] {
            let date = ys + chrono::Days::new(day as u64);
            let a = fractional_angle(date, ys, ye);
            assert_eq!(date_at(a, 2025), Some(date));
        }
        assert_eq!(date_at(-20.0, 2025), Some(ys));
        assert_eq!(date_at(400.0, 2025), Some(ye));
    }

    #[test]
    fn month_segments_tile_the_circle() {
        let segments = month_segments(2025);
        assert_eq!(segments.len(), 12);
        assert_eq!(segments[0].start_deg, 0.0);
        assert_eq!(segments[11].end_deg, 360.0);
        for pair in segments.windows(2) {
            assert!((pair[0].end_deg - pair[1].start_deg).abs() < 1e-4);
        }
    }

    #[test]
    fn week_segments_cover_iso_weeks() {
        let segments = week_segments(2025);
        // 2025 begins mid-week; the first cell is week 1 clamped to January 1st.
        assert_eq!(segments[0].week, 1);
        assert_eq!(segments[0].start_deg, 0.0);
        assert!(segments.len() >= 52 && segments.len() <= 54);
        assert!(segments.last().unwrap().end_deg <= 360.0);
    }

    #[test]
    fn angular_containment_wraps() {
        assert!(angular_contains(350.0, 10.0, 5.0));
        assert!(angular_contains(350.0, 10.0, 355.0));
        assert!(!angular_contains(350.0, 10.0, 180.0));
        assert!(angular_contains(10.0, 40.0, 25.0));
    }
}
