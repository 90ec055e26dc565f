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

//! Interaction resolution: polar hit testing over the rendered sector set,
//! click anchors for externally-owned tooltips, drag zone classification and
//! the command objects the engine emits instead of mutating items.
//!
//! The engine never owns callbacks; callers hand in an [EventSink] and
//! receive explicit [WheelEvent] values whose identity is stable across
//! render passes.

use crate::{
    angle::{angular_contains, normalize_degrees, year_bounds, CANVAS_OFFSET_DEG},
    types::{Item, WheelStructure},
    viz::{ElementInfo, ElementKind, SectorBounds, VizPoint2d, VizRect, WheelDisplayList, WheelShape},
};

use chrono::NaiveDate;

/// A request to move an item's boundary dates. The engine emits patches; the
/// external data layer applies them.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDatePatch {
    pub item_id: String,
    pub new_start: String,
    pub new_end: String,
}

/// Command objects dispatched to the caller per interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum WheelEvent {
    /// A click resolved to a single item, with its screen anchor point.
    ItemClicked {
        item: Item,
        anchor: VizPoint2d<f32>,
    },
    /// A click resolved to a cluster placeholder of overlapping narrow items.
    ClusterClicked {
        member_ids: Vec<String>,
        anchor: VizPoint2d<f32>,
    },
    DragStarted {
        item_id: String,
    },
    /// The item's end boundary moved, possibly into the next display year.
    ExtendForward {
        item_id: String,
        new_end: NaiveDate,
    },
    /// The item's start boundary moved, possibly into the previous display year.
    ExtendBackward {
        item_id: String,
        new_start: NaiveDate,
    },
    /// A boundary change propagated to every segment of a cross-year group.
    GroupBoundaryChanged {
        group_id: String,
        patches: Vec<ItemDatePatch>,
    },
}

/// The stable event seam between the engine and its host.
pub trait EventSink {
    fn dispatch(&mut self, event: WheelEvent);
}

impl EventSink for Vec<WheelEvent> {
    fn dispatch(&mut self, event: WheelEvent) {
        self.push(event);
    }
}

/// Where on an item a drag grabs it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragZone {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Convert a surface point to polar coordinates in date space: radius from
/// the wheel center, and degrees with the canvas correction and the current
/// wheel rotation removed.
pub fn point_to_date_polar(center: &VizPoint2d<f32>, point: &VizPoint2d<f32>, rotation_deg: f32) -> (f32, f32) {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let radius = (dx * dx + dy * dy).sqrt();
    let canvas_deg = dy.atan2(dx).to_degrees();
    let date_deg = normalize_degrees(canvas_deg - CANVAS_OFFSET_DEG - rotation_deg);
    (radius, date_deg)
}

fn is_interactive(info: &ElementInfo) -> bool {
    matches!(info.kind, ElementKind::Activity | ElementKind::YearEvent)
        && (info.item_id.is_some() || !info.members.is_empty())
}

/// Resolve a surface point to the topmost interactive element under it.
/// `rotation_deg` is the current whole-wheel rotation (base offset plus any
/// animation offset).
pub fn hit_test<'a>(
    list: &'a WheelDisplayList,
    point: &VizPoint2d<f32>,
    rotation_deg: f32,
) -> Option<&'a ElementInfo> {
    let (radius, date_deg) = point_to_date_polar(&list.center, point, rotation_deg);

    let mut hit: Option<&ElementInfo> = None;
    for element in list.iter() {
        if !matches!(element.shape, WheelShape::Sector(_)) || !is_interactive(&element.info) {
            continue;
        }
        let Some(bounds) = &element.info.bounds else {
            continue;
        };
        if radius < bounds.inner_radius || radius > bounds.outer_radius {
            continue;
        }
        if angular_contains(bounds.start_angle, bounds.end_angle, date_deg) {
            // Later elements paint on top; keep the last match
            hit = Some(&element.info);
        }
    }
    hit
}

/// Compute a screen-space anchor point from stored sector geometry: the
/// sector's mid-angle corrected for the canvas zero-angle convention, and
/// its mid-radius scaled from the internal render resolution to the
/// viewport. A sector that is not currently rendered resolves to the
/// viewport's center point.
pub fn resolve_click_anchor(
    bounds: Option<&SectorBounds>,
    internal_resolution: f32,
    viewport: &VizRect<f32>,
) -> VizPoint2d<f32> {
    let center = viewport.center();
    let Some(bounds) = bounds else {
        return center;
    };
    if internal_resolution <= 0.0 {
        return center;
    }

    let angle = bounds.mid_angle() - 90.0;
    let radius = bounds.mid_radius() * (viewport.width() / internal_resolution);
    let rad = angle.to_radians();

    VizPoint2d::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Anchor for a specific item in the current render, falling back to the
/// viewport center when the item is not rendered (e.g. a different zoom
/// scope is active).
pub fn anchor_for_item(list: &WheelDisplayList, item_id: &str, viewport: &VizRect<f32>) -> VizPoint2d<f32> {
    let bounds = list
        .iter()
        .filter(|e| matches!(e.shape, WheelShape::Sector(_)))
        .find(|e| e.info.item_id.as_deref() == Some(item_id))
        .and_then(|e| e.info.bounds.as_ref());

    resolve_click_anchor(bounds, list.dimensions.x as f32, viewport)
}

/// Resolve a click on the surface to an event, or `None` when the click hit
/// no interactive element. Item hits carry the resolved item record looked
/// up fresh from the structure.
pub fn click_event(
    list: &WheelDisplayList,
    structure: &WheelStructure,
    point: &VizPoint2d<f32>,
    rotation_deg: f32,
    viewport: &VizRect<f32>,
) -> Option<WheelEvent> {
    let info = hit_test(list, point, rotation_deg)?;
    let anchor = resolve_click_anchor(info.bounds.as_ref(), list.dimensions.x as f32, viewport);

    if !info.members.is_empty() {
        return Some(WheelEvent::ClusterClicked {
            member_ids: info.members.clone(),
            anchor,
        });
    }

    let item_id = info.item_id.as_deref()?;
    match structure.item(item_id) {
        Some(item) => Some(WheelEvent::ItemClicked {
            item: item.clone(),
            anchor,
        }),
        None => {
            log::debug!("clicked element references unknown item '{item_id}'");
            None
        }
    }
}

/// Pixel depth of the resize grab zones at the item's edges. Zoomed scopes
/// magnify sectors, so the zones grow with them.
fn resize_zone_px(month_zoom: bool, quarter_zoom: bool) -> f32 {
    if month_zoom {
        30.0
    }
    else if quarter_zoom {
        25.0
    }
    else {
        20.0
    }
}

/// Classify where a (rotation-corrected) click grabs an item: near either
/// edge it resizes, otherwise it moves. Very small sectors are move-only.
pub fn classify_drag_zone(
    bounds: &SectorBounds,
    date_deg: f32,
    month_zoom: bool,
    quarter_zoom: bool,
) -> DragZone {
    let span_rad = bounds.span().to_radians();
    let avg_radius = bounds.mid_radius();
    let total_arc = span_rad * avg_radius;

    let mut relative = normalize_degrees(date_deg - bounds.start_angle);
    if relative > bounds.span() {
        // Wraparound artifacts land in the middle
        relative = bounds.span() / 2.0;
    }
    let arc_position = relative.to_radians() * avg_radius;

    let mut zone = resize_zone_px(month_zoom, quarter_zoom);
    if total_arc < 80.0 {
        zone = zone.min(total_arc * 0.3);
    }

    if total_arc < zone * 2.2 {
        DragZone::Move
    }
    else if arc_position < zone {
        DragZone::ResizeStart
    }
    else if total_arc - arc_position < zone {
        DragZone::ResizeEnd
    }
    else {
        DragZone::Move
    }
}

/// The boundary date a drag angle resolves to. Unlike the date mapper this
/// is deliberately unclamped, so dragging past the year edge crosses into
/// the adjacent display year.
pub fn boundary_date(date_deg: f32, display_year: i32) -> Option<NaiveDate> {
    let (year_start, year_end) = year_bounds(display_year)?;
    let total = (year_end - year_start).num_days() as f32;
    let days = ((date_deg / 360.0) * total).round() as i64;
    year_start.checked_add_signed(chrono::Duration::days(days))
}

/// Build the extend event for a resize drag released at `date_deg`.
pub fn extend_event(item_id: &str, zone: DragZone, date_deg: f32, display_year: i32) -> Option<WheelEvent> {
    let date = boundary_date(date_deg, display_year)?;
    match zone {
        DragZone::ResizeEnd => Some(WheelEvent::ExtendForward {
            item_id: item_id.to_string(),
            new_end: date,
        }),
        DragZone::ResizeStart => Some(WheelEvent::ExtendBackward {
            item_id: item_id.to_string(),
            new_start: date,
        }),
        DragZone::Move => None,
    }
}

/// Propagate a boundary change to every item sharing `group_id`: the
/// earliest segment absorbs a new group start, the latest segment a new
/// group end. Returns patches for the segments whose dates change; an
/// unknown group id yields no patches.
pub fn propagate_group_boundary(
    items: &[Item],
    group_id: &str,
    new_start: Option<NaiveDate>,
    new_end: Option<NaiveDate>,
) -> Vec<ItemDatePatch> {
    let members: Vec<(&Item, NaiveDate, NaiveDate)> = items
        .iter()
        .filter(|i| i.cross_year_group_id.as_deref() == Some(group_id))
        .filter_map(|i| crate::segment::parse_item_dates(i).map(|(s, e)| (i, s, e)))
        .collect();

    if members.is_empty() {
        log::debug!("group boundary update for unknown group '{group_id}'");
        return Vec::new();
    }

    let earliest = members.iter().min_by_key(|(_, start, _)| *start).map(|(i, _, _)| i.id.clone());
    let latest = members.iter().max_by_key(|(_, _, end)| *end).map(|(i, _, _)| i.id.clone());

    let mut patches = Vec::new();
    for (item, start, end) in &members {
        let mut patched_start = *start;
        let mut patched_end = *end;

        if let (Some(new_start), Some(earliest)) = (new_start, &earliest) {
            if item.id == *earliest {
                patched_start = new_start;
            }
        }
        if let (Some(new_end), Some(latest)) = (new_end, &latest) {
            if item.id == *latest {
                patched_end = new_end;
            }
        }

        if patched_start != *start || patched_end != *end {
            patches.push(ItemDatePatch {
                item_id: item.id.clone(),
                new_start: patched_start.to_string(),
                new_end: patched_end.to_string(),
            });
        }
    }

    patches
}
