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

//! Cross-year segmentation: items live on independently paged year documents,
//! and an activity spanning a year boundary is stored as one segment per
//! page, linked by a shared group id. This module scopes the full item set to
//! one display year, clamping display ranges to the year while preserving the
//! full range of the whole linked group.

use crate::{
    angle::year_bounds,
    types::{Item, WheelStructure},
    WheelHashMap,
    WheelHashSet,
};

use chrono::NaiveDate;

/// An item scoped to a display year. `display_*` is the clamped range used
/// for placement; `full_*` is the range of the whole activity, spanning every
/// linked segment when the item carries a group id.
#[derive(Clone, Debug, PartialEq)]
pub struct YearScopedItem {
    pub item: Item,
    pub display_start: NaiveDate,
    pub display_end: NaiveDate,
    pub full_start: NaiveDate,
    pub full_end: NaiveDate,
    pub cross_year: bool,
}

impl YearScopedItem {
    /// The clamped display range as ISO date strings.
    pub fn display_range(&self) -> (String, String) {
        (self.display_start.to_string(), self.display_end.to_string())
    }

    /// The full (unclamped, group-wide) range as ISO date strings.
    pub fn full_range(&self) -> (String, String) {
        (self.full_start.to_string(), self.full_end.to_string())
    }
}

/// Parse an item's dates, normalizing a reversed range. `None` excludes the
/// item from the pass.
pub(crate) fn parse_item_dates(item: &Item) -> Option<(NaiveDate, NaiveDate)> {
    let start = match item.start_date.parse::<NaiveDate>() {
        Ok(date) => date,
        Err(_) => {
            log::warn!("item '{}' has unparsable start date '{}'; skipping", item.id, item.start_date);
            return None;
        }
    };
    let end = match item.end_date.parse::<NaiveDate>() {
        Ok(date) => date,
        Err(_) => {
            log::warn!("item '{}' has unparsable end date '{}'; skipping", item.id, item.end_date);
            return None;
        }
    };
    if end < start {
        log::warn!("item '{}' has a reversed date range; swapping", item.id);
        return Some((end, start));
    }
    Some((start, end))
}

/// Build the map of cross-year group id to the min/max range over every
/// member segment, scanning the full item set across all pages.
pub fn group_ranges(items: &[Item]) -> WheelHashMap<String, (NaiveDate, NaiveDate)> {
    let mut ranges: WheelHashMap<String, (NaiveDate, NaiveDate)> = WheelHashMap::default();

    for item in items {
        let Some(group_id) = &item.cross_year_group_id else {
            continue;
        };
        let Some((start, end)) = parse_item_dates(item) else {
            continue;
        };

        ranges
            .entry(group_id.clone())
            .and_modify(|range| {
                range.0 = range.0.min(start);
                range.1 = range.1.max(end);
            })
            .or_insert((start, end));
    }

    ranges
}

/// Scope `items` (the full set across all paged years) to `display_year`.
///
/// Items overlapping the year are kept; a cross-year item (dates outside the
/// year, or any item carrying a group id) gets its display range clamped to
/// the year bounds while the full range is taken from the whole linked group.
/// A group id with no other member degrades to the item's own range.
pub fn segment_for_year(items: &[Item], display_year: i32) -> Vec<YearScopedItem> {
    let Some((year_start, year_end)) = year_bounds(display_year) else {
        log::warn!("display year {display_year} is outside the supported calendar range");
        return Vec::new();
    };

    let ranges = group_ranges(items);
    let mut scoped = Vec::new();

    for item in items {
        let Some((start, end)) = parse_item_dates(item) else {
            continue;
        };

        // Keep the item only if its range overlaps the display year
        if end < year_start || start > year_end {
            continue;
        }

        let has_group = item.cross_year_group_id.is_some();
        let cross_year = start < year_start || end > year_end || has_group;

        let (full_start, full_end) = match &item.cross_year_group_id {
            Some(group_id) => ranges.get(group_id).copied().unwrap_or((start, end)),
            None => (start, end),
        };

        scoped.push(YearScopedItem {
            item: item.clone(),
            display_start: start.max(year_start),
            display_end: end.min(year_end),
            full_start,
            full_end,
            cross_year,
        });
    }

    scoped
}

/// Filter scoped items down to those whose ring, activity group and label
/// (when present) are all visible.
pub fn filter_renderable(scoped: Vec<YearScopedItem>, structure: &WheelStructure) -> Vec<YearScopedItem> {
    let visible_rings: WheelHashSet<&str> = structure
        .rings
        .iter()
        .filter(|r| r.visible)
        .map(|r| r.id.as_str())
        .collect();
    let visible_groups: WheelHashSet<&str> = structure
        .activity_groups
        .iter()
        .filter(|a| a.visible)
        .map(|a| a.id.as_str())
        .collect();
    let visible_labels: WheelHashSet<&str> = structure
        .labels
        .iter()
        .filter(|l| l.visible)
        .map(|l| l.id.as_str())
        .collect();

    scoped
        .into_iter()
        .filter(|entry| {
            let item = &entry.item;
            if !visible_rings.contains(item.ring_id.as_str()) {
                return false;
            }
            if !visible_groups.contains(item.activity_id.as_str()) {
                return false;
            }
            // Label is optional - only filter by label if the item has one
            if let Some(label_id) = &item.label_id {
                if !visible_labels.contains(label_id.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityGroup, Label, Ring, RingKind, RingOrientation};

    fn item(id: &str, start: &str, end: &str, group: Option<&str>) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            ring_id: "r1".to_string(),
            activity_id: "a1".to_string(),
            label_id: None,
            start_date: start.to_string(),
            end_date: end.to_string(),
            cross_year_group_id: group.map(|g| g.to_string()),
            description: None,
            status: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn plain_item_passes_through_unclamped() {
        let items = vec![item("i1", "2025-03-01", "2025-04-15", None)];
        let scoped = segment_for_year(&items, 2025);
        assert_eq!(scoped.len(), 1);
        let entry = &scoped[0];
        assert!(!entry.cross_year);
        assert_eq!(entry.display_start, date("2025-03-01"));
        assert_eq!(entry.display_end, date("2025-04-15"));
        assert_eq!(entry.full_start, entry.display_start);
        assert_eq!(entry.full_end, entry.display_end);
    }

    #[test]
    fn items_outside_the_year_are_dropped() {
        let items = vec![
            item("i1", "2024-01-01", "2024-12-31", None),
            item("i2", "2026-02-01", "2026-02-02", None),
        ];
        assert!(segment_for_year(&items, 2025).is_empty());
    }

    #[test]
    fn unparsable_dates_exclude_only_that_item() {
        let items = vec![
            item("bad", "not-a-date", "2025-02-01", None),
            item("good", "2025-03-01", "2025-03-10", None),
        ];
        let scoped = segment_for_year(&items, 2025);
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].item.id, "good");
    }

    #[test]
    fn linked_segments_share_the_group_range() {
        // Segment on the 2024 page and its linked continuation on the 2025
        // page; both resolve the full range Dec 15 2024 - Jan 20 2025.
        let items = vec![
            item("seg24", "2024-12-15", "2025-01-10", Some("g1")),
            item("seg25", "2025-01-10", "2025-01-20", Some("g1")),
        ];

        let scoped_2025 = segment_for_year(&items, 2025);
        assert_eq!(scoped_2025.len(), 2);
        for entry in &scoped_2025 {
            assert!(entry.cross_year);
            assert_eq!(entry.full_start, date("2024-12-15"));
            assert_eq!(entry.full_end, date("2025-01-20"));
        }

        let seg24 = scoped_2025.iter().find(|e| e.item.id == "seg24").unwrap();
        assert_eq!(seg24.display_start, date("2025-01-01"));
        assert_eq!(seg24.display_end, date("2025-01-10"));

        let scoped_2024 = segment_for_year(&items, 2024);
        assert_eq!(scoped_2024.len(), 1);
        assert_eq!(scoped_2024[0].full_end, date("2025-01-20"));
        assert_eq!(scoped_2024[0].display_end, date("2024-12-31"));
    }

    #[test]
    fn display_range_is_subset_full_range_is_superset() {
        let items = vec![item("i1", "2024-11-20", "2025-02-10", None)];
        let scoped = segment_for_year(&items, 2025);
        let entry = &scoped[0];
        assert!(entry.cross_year);
        assert!(entry.display_start >= date("2025-01-01"));
        assert!(entry.display_end <= date("2025-12-31"));
        assert!(entry.full_start <= entry.display_start);
        assert!(entry.full_end >= entry.display_end);
    }

    #[test]
    fn dangling_group_id_degrades_to_own_range() {
        let items = vec![item("solo", "2025-06-01", "2025-06-10", Some("ghost"))];
        let scoped = segment_for_year(&items, 2025);
        let entry = &scoped[0];
        // Group flag still marks it cross-year, but the range is its own
        assert!(entry.cross_year);
        assert_eq!(entry.full_start, date("2025-06-01"));
        assert_eq!(entry.full_end, date("2025-06-10"));
    }

    #[test]
    fn visibility_filtering_respects_ring_group_and_label() {
        let structure = WheelStructure {
            rings: vec![
                Ring {
                    id: "r1".to_string(),
                    name: "Marketing".to_string(),
                    kind: RingKind::Inner,
                    visible: true,
                    orientation: RingOrientation::Vertical,
                },
                Ring {
                    id: "hidden".to_string(),
                    name: "Hidden".to_string(),
                    kind: RingKind::Inner,
                    visible: false,
                    orientation: RingOrientation::Vertical,
                },
            ],
            activity_groups: vec![ActivityGroup {
                id: "a1".to_string(),
                name: "Campaigns".to_string(),
                color: "#EF4444".to_string(),
                visible: true,
            }],
            labels: vec![Label {
                id: "l1".to_string(),
                name: "Urgent".to_string(),
                color: "#F59E0B".to_string(),
                visible: false,
            }],
            items: Vec::new(),
        };

        let mut on_hidden_ring = item("i1", "2025-01-10", "2025-01-20", None);
        on_hidden_ring.ring_id = "hidden".to_string();
        let mut with_hidden_label = item("i2", "2025-02-01", "2025-02-05", None);
        with_hidden_label.label_id = Some("l1".to_string());
        let plain = item("i3", "2025-03-01", "2025-03-05", None);

        let scoped = segment_for_year(&[on_hidden_ring, with_hidden_label, plain], 2025);
        let renderable = filter_renderable(scoped, &structure);
        assert_eq!(renderable.len(), 1);
        assert_eq!(renderable[0].item.id, "i3");
    }
}
