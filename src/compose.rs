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

//! The draw program: one pure function from a wheel structure and an options
//! snapshot to a display list. Both backends execute this list verbatim, so
//! on-screen raster output and exported vector output are literal executions
//! of the same program.
//!
//! Paint order is title/year text, season arcs, the reserved bands (year
//! events, month names, weeks), then each activity ring's sectors.

use crate::{
    angle::{
        angle,
        month_segments,
        month_span,
        normalize_degrees,
        quarter_span,
        week_segments,
        widen_min_span,
        year_bounds,
        CANVAS_OFFSET_DEG,
        MIN_SPAN_DEG,
    },
    layout::{plan_rings, Band, WheelMetrics},
    segment::{filter_renderable, segment_for_year, YearScopedItem},
    text::{fit_list, fit_small_title, fit_title, SectorTextGeom, TextMeasure},
    types::{Ring, RingKind, RingOrientation, WeekRingDisplayMode, WheelOptions, WheelStructure},
    viz::{
        ElementFlags,
        ElementInfo,
        ElementKind,
        SectorBounds,
        TextAnchor,
        TextRun,
        VizColor,
        VizDimensions,
        VizPoint2d,
        VizSector,
        WheelDisplayList,
        WheelElement,
    },
    WheelRenderError,
};

use chrono::Datelike;

/// Angular inset between month cells, degrees per edge.
const MONTH_SPACING_DEG: f32 = 0.5;
/// Angular inset between adjacent sectors in the same activity or week ring.
const SECTOR_SPACING_DEG: f32 = 0.4;

/// Alternating month cell fills.
const MONTH_CELL_COLORS: [VizColor; 2] = [
    VizColor { r: 0x33, g: 0x41, b: 0x55, a: 255 },
    VizColor { r: 0x3B, g: 0x42, b: 0x52, a: 255 },
];

/// Translucent fill for the season arcs behind the year-event band.
const SEASON_COLOR: VizColor = VizColor { r: 0x94, g: 0xA3, b: 0xB8, a: 64 };

// Fixed band indices; activity rings follow, and the last band is the text
// overlay so titles always paint on top.
const BAND_SEASONS: usize = 0;
const BAND_YEAR_EVENTS: usize = 1;
const BAND_MONTHS: usize = 2;
const BAND_WEEKS: usize = 3;
const BAND_RINGS: usize = 4;

/// The angular range visible under the current zoom scope, in date-space
/// degrees. Month zoom wins over quarter zoom.
pub fn zoom_scope(options: &WheelOptions) -> Option<(f32, f32)> {
    if let Some(month) = options.zoomed_month {
        return month_span(options.display_year, month.min(11));
    }
    if let Some(quarter) = options.zoomed_quarter {
        return quarter_span(options.display_year, quarter.min(3));
    }
    None
}

/// Clamp a raw angular range to the zoom scope. `None` means the range is
/// entirely outside the scope and the sector is not rendered this pass.
fn clamp_to_scope(start: f32, end: f32, scope: Option<(f32, f32)>) -> Option<(f32, f32)> {
    match scope {
        None => Some((start, end)),
        Some((scope_start, scope_end)) => {
            if end <= scope_start || start >= scope_end {
                None
            }
            else {
                Some((start.max(scope_start), end.min(scope_end)))
            }
        }
    }
}

/// What a sector draws through the text fitter, if anything.
enum SectorText {
    None,
    Title(String),
    SmallTitle(String),
    List(Vec<String>, RingOrientation),
}

struct SectorParams {
    band: Band,
    /// Raw angular range, date-space degrees.
    start_deg: f32,
    end_deg: f32,
    spacing_deg: f32,
    color: VizColor,
    flags: ElementFlags,
    kind: ElementKind,
    item_id: Option<String>,
    ring_id: Option<String>,
    members: Vec<String>,
    text: SectorText,
    font_size: f32,
}

/// Draw one annular wedge and hand the identical geometry to the selected
/// text strategy, so every visual strategy reuses one geometry computation.
fn emit_sector(
    list: &mut WheelDisplayList,
    band_index: usize,
    metrics: &WheelMetrics,
    base_text_color: VizColor,
    measure: &dyn TextMeasure,
    p: SectorParams,
) {
    // Inset both edges, then shift into canvas space
    let inset_start = p.start_deg + p.spacing_deg;
    let inset_end = p.end_deg - p.spacing_deg;
    if inset_end <= inset_start {
        log::trace!("sector collapsed by spacing inset; skipping fill");
        return;
    }
    let a0 = (inset_start + CANVAS_OFFSET_DEG).to_radians();
    let a1 = (inset_end + CANVAS_OFFSET_DEG).to_radians();

    let sector = VizSector::from_angles(
        &metrics.center,
        a0,
        a1,
        p.band.start_radius,
        p.band.end_radius(),
    );

    let bounds = SectorBounds::new(
        normalize_degrees(p.start_deg),
        normalize_degrees(p.end_deg),
        p.band.start_radius,
        p.band.end_radius(),
    );

    let info = ElementInfo {
        kind: p.kind,
        item_id: p.item_id,
        ring_id: p.ring_id,
        members: p.members,
        bounds: Some(bounds),
    };

    list.push(band_index, WheelElement::new(sector, p.color, p.flags.clone(), info.clone()));

    let geom = SectorTextGeom {
        center: metrics.center,
        start_radius: p.band.start_radius,
        width: p.band.width,
        start_angle: a0,
        end_angle: a1,
    };

    let runs: Vec<TextRun> = match p.text {
        SectorText::None => Vec::new(),
        SectorText::Title(text) => vec![fit_title(&text, &geom, p.font_size, base_text_color, measure)],
        SectorText::SmallTitle(text) => {
            vec![fit_small_title(&text, &geom, p.font_size, base_text_color, measure)]
        }
        SectorText::List(lines, orientation) => fit_list(&lines, orientation, &geom, p.font_size),
    };

    for run in runs {
        list.push(band_index, WheelElement::new(run, VizColor::TRANSPARENT, p.flags.clone(), info.clone()));
    }
}

/// A ring item with its resolved angular placement.
struct PlacedItem<'a> {
    entry: &'a YearScopedItem,
    start_deg: f32,
    end_deg: f32,
    raw_span: f32,
    widened: bool,
}

/// Collapse runs of overlapping below-minimum items into clusters. Items
/// whose raw span is at or above the minimum never cluster; a lone narrow
/// item stays an ordinary widened sector.
fn cluster_narrow_items<'a>(mut placed: Vec<PlacedItem<'a>>) -> Vec<Vec<PlacedItem<'a>>> {
    placed.sort_by(|a, b| a.start_deg.partial_cmp(&b.start_deg).unwrap_or(std::cmp::Ordering::Equal));

    let mut groups: Vec<Vec<PlacedItem>> = Vec::new();
    for item in placed {
        let narrow = item.raw_span < MIN_SPAN_DEG;
        if let Some(group) = groups.last_mut() {
            let group_narrow = group.iter().all(|g| g.raw_span < MIN_SPAN_DEG);
            let group_end = group.iter().map(|g| g.end_deg).fold(f32::MIN, f32::max);
            if narrow && group_narrow && item.start_deg < group_end {
                group.push(item);
                continue;
            }
        }
        groups.push(vec![item]);
    }
    groups
}

/// Run the draw program once: compose the full display list for one
/// (structure, options) snapshot. Pure; the same inputs always produce an
/// identical list.
pub fn build_display_list(
    structure: &WheelStructure,
    options: &WheelOptions,
    measure: &dyn TextMeasure,
) -> Result<WheelDisplayList, WheelRenderError> {
    options.validate()?;

    let metrics = WheelMetrics::new(options.size);
    let base_text_color = VizColor::TEXT;

    let inner_rings: Vec<&Ring> = structure.visible_rings(RingKind::Inner).collect();
    let outer_rings: Vec<&Ring> = structure.visible_rings(RingKind::Outer).collect();

    let bands = plan_rings(
        &metrics,
        inner_rings.len(),
        options.show_year_events,
        options.show_month_ring,
        options.show_week_ring,
    );

    let band_count = BAND_RINGS + inner_rings.len() + 1;
    let overlay_band = band_count - 1;
    let dimensions = VizDimensions::new(metrics.width as u32, metrics.height as u32);
    let mut list = WheelDisplayList::new(dimensions, metrics.center, band_count);

    let scope = zoom_scope(options);

    // Title and year text
    if !options.title.is_empty() {
        list.push(
            overlay_band,
            WheelElement::new(
                TextRun {
                    text: options.title.clone(),
                    origin: VizPoint2d::new(metrics.size / 2.0, metrics.size / 9.0),
                    rotation: 0.0,
                    anchor: TextAnchor::Center,
                    color: base_text_color,
                    size: metrics.title_font,
                    bold: true,
                },
                VizColor::TRANSPARENT,
                ElementFlags::NONE,
                ElementInfo {
                    kind: ElementKind::TitleText,
                    ..Default::default()
                },
            ),
        );
    }
    list.push(
        overlay_band,
        WheelElement::new(
            TextRun {
                text: options.display_year.to_string(),
                origin: VizPoint2d::new(metrics.center.x, metrics.center.y + metrics.size / 500.0),
                rotation: 0.0,
                anchor: TextAnchor::Center,
                color: base_text_color,
                size: metrics.year_font,
                bold: true,
            },
            VizColor::TRANSPARENT,
            ElementFlags::NONE,
            ElementInfo {
                kind: ElementKind::YearText,
                ..Default::default()
            },
        ),
    );

    let Some((year_start, year_end)) = year_bounds(options.display_year) else {
        log::warn!("display year {} out of calendar range; rendering empty wheel", options.display_year);
        return Ok(list);
    };

    // Season arcs behind the outermost reserved band. When the year-event
    // band is hidden the arcs fall back to the month band and drop their
    // labels.
    if options.show_seasons {
        if let Some(band) = bands.year_events.or(bands.months) {
            let labelled = bands.year_events.is_some();
            for quarter in 0..4u8 {
                let Some((q_start, q_end)) = quarter_span(options.display_year, quarter) else {
                    continue;
                };
                let Some((start, end)) = clamp_to_scope(q_start, q_end, scope) else {
                    continue;
                };
                emit_sector(
                    &mut list,
                    BAND_SEASONS,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: MONTH_SPACING_DEG,
                        color: SEASON_COLOR,
                        flags: ElementFlags::BAND,
                        kind: ElementKind::Season,
                        item_id: None,
                        ring_id: None,
                        members: Vec::new(),
                        text: if labelled {
                            SectorText::Title(format!("Q{}", quarter + 1))
                        }
                        else {
                            SectorText::None
                        },
                        font_size: metrics.week_font,
                    },
                );
            }
        }
    }

    // Scope items to the display year and drop invisible ones
    let scoped = filter_renderable(segment_for_year(&structure.items, options.display_year), structure);

    // Year-event band: items on visible outer rings, sorted by start date
    if options.show_year_events {
        if let Some(band) = bands.year_events {
            let mut events: Vec<&YearScopedItem> = scoped
                .iter()
                .filter(|e| outer_rings.iter().any(|r| r.id == e.item.ring_id))
                .collect();
            events.sort_by(|a, b| a.display_start.cmp(&b.display_start));

            for (index, event) in events.iter().enumerate() {
                let raw_start = angle(event.display_start, year_start, year_end);
                let raw_end = angle(event.display_end, year_start, year_end);
                let (start, end, widened) = widen_min_span(raw_start, raw_end);
                let Some((start, end)) = clamp_to_scope(start, end, scope) else {
                    continue;
                };

                let mut flags = ElementFlags::NONE;
                flags.set(ElementFlags::WIDENED, widened);
                flags.set(ElementFlags::CROSS_YEAR, event.cross_year);
                flags.set(ElementFlags::SELECTED, options.selected_item_ids.contains(&event.item.id));

                emit_sector(
                    &mut list,
                    BAND_YEAR_EVENTS,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: 0.0,
                        color: VizColor::from_hex_or_text(options.palette_color(index)),
                        flags,
                        kind: ElementKind::YearEvent,
                        item_id: Some(event.item.id.clone()),
                        ring_id: Some(event.item.ring_id.clone()),
                        members: Vec::new(),
                        text: SectorText::SmallTitle(event.item.name.clone()),
                        font_size: metrics.year_event_font,
                    },
                );
            }
        }
    }

    // Month-name band
    if options.show_month_ring {
        if let Some(band) = bands.months {
            for segment in month_segments(options.display_year) {
                let Some((start, end)) = clamp_to_scope(segment.start_deg, segment.end_deg, scope) else {
                    continue;
                };
                emit_sector(
                    &mut list,
                    BAND_MONTHS,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: MONTH_SPACING_DEG,
                        color: MONTH_CELL_COLORS[segment.month as usize % 2],
                        flags: ElementFlags::BAND,
                        kind: ElementKind::MonthCell,
                        item_id: None,
                        ring_id: None,
                        members: Vec::new(),
                        text: SectorText::Title(segment.name.to_string()),
                        font_size: metrics.month_font,
                    },
                );
            }
        }
    }

    // Week band
    if options.show_week_ring {
        if let Some(band) = bands.weeks {
            for segment in week_segments(options.display_year) {
                let Some((start, end)) = clamp_to_scope(segment.start_deg, segment.end_deg, scope) else {
                    continue;
                };
                let label = match options.week_ring_display_mode {
                    WeekRingDisplayMode::WeekNumbers => segment.week.to_string(),
                    WeekRingDisplayMode::Dates => {
                        format!("{}/{}", segment.monday.day(), segment.monday.month())
                    }
                };
                emit_sector(
                    &mut list,
                    BAND_WEEKS,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: SECTOR_SPACING_DEG,
                        color: VizColor::MUTED,
                        flags: ElementFlags::BAND,
                        kind: ElementKind::WeekCell,
                        item_id: None,
                        ring_id: None,
                        members: Vec::new(),
                        text: SectorText::SmallTitle(label),
                        font_size: metrics.week_font,
                    },
                );
            }
        }
    }

    // Activity rings, innermost first
    for (ring_index, ring) in inner_rings.iter().enumerate() {
        let Some(band) = bands.activity.get(ring_index).copied() else {
            log::warn!("no band allocated for ring '{}'", ring.id);
            continue;
        };
        let band_index = BAND_RINGS + ring_index;

        let mut placed: Vec<PlacedItem> = Vec::new();
        for entry in scoped.iter().filter(|e| e.item.ring_id == ring.id) {
            let raw_start = angle(entry.display_start, year_start, year_end);
            let raw_end = angle(entry.display_end, year_start, year_end);
            let raw_span = (raw_end - raw_start).abs();
            let (start, end, widened) = widen_min_span(raw_start, raw_end);
            placed.push(PlacedItem {
                entry,
                start_deg: start,
                end_deg: end,
                raw_span,
                widened,
            });
        }

        for group in cluster_narrow_items(placed) {
            if group.len() >= 2 {
                // Cluster placeholder spanning the union of its members
                let start = group.iter().map(|g| g.start_deg).fold(f32::MAX, f32::min);
                let end = group.iter().map(|g| g.end_deg).fold(f32::MIN, f32::max);
                let Some((start, end)) = clamp_to_scope(start, end, scope) else {
                    continue;
                };
                let members: Vec<String> = group.iter().map(|g| g.entry.item.id.clone()).collect();
                let color = group
                    .first()
                    .and_then(|g| structure.activity_group(&g.entry.item.activity_id))
                    .map(|a| VizColor::from_hex_or_text(&a.color))
                    .unwrap_or(VizColor::MUTED);

                log::debug!("clustering {} narrow items on ring '{}'", members.len(), ring.id);

                emit_sector(
                    &mut list,
                    band_index,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: SECTOR_SPACING_DEG,
                        color,
                        flags: ElementFlags::CLUSTER,
                        kind: ElementKind::Activity,
                        item_id: None,
                        ring_id: Some(ring.id.clone()),
                        members,
                        text: SectorText::SmallTitle(format!("+{}", group.len())),
                        font_size: metrics.list_font,
                    },
                );
                continue;
            }

            for item in group {
                let Some((start, end)) = clamp_to_scope(item.start_deg, item.end_deg, scope) else {
                    continue;
                };
                let entry = item.entry;
                let color = structure
                    .activity_group(&entry.item.activity_id)
                    .map(|a| VizColor::from_hex_or_text(&a.color))
                    .unwrap_or_else(|| {
                        log::debug!("item '{}' references unknown activity group", entry.item.id);
                        VizColor::MUTED
                    });

                let mut flags = ElementFlags::NONE;
                flags.set(ElementFlags::WIDENED, item.widened);
                flags.set(ElementFlags::CROSS_YEAR, entry.cross_year);
                flags.set(ElementFlags::SELECTED, options.selected_item_ids.contains(&entry.item.id));

                let mut lines = vec![entry.item.name.clone()];
                if options.show_labels {
                    if let Some(label) = entry.item.label_id.as_deref().and_then(|id| structure.label(id)) {
                        lines.push(label.name.clone());
                    }
                }

                emit_sector(
                    &mut list,
                    band_index,
                    &metrics,
                    base_text_color,
                    measure,
                    SectorParams {
                        band,
                        start_deg: start,
                        end_deg: end,
                        spacing_deg: SECTOR_SPACING_DEG,
                        color,
                        flags,
                        kind: ElementKind::Activity,
                        item_id: Some(entry.item.id.clone()),
                        ring_id: Some(ring.id.clone()),
                        members: Vec::new(),
                        text: SectorText::List(lines, ring.orientation),
                        font_size: metrics.list_font,
                    },
                );
            }
        }

        // Ring name label at 12 o'clock
        if options.show_ring_names {
            let geom = SectorTextGeom {
                center: metrics.center,
                start_radius: band.start_radius,
                width: band.width,
                start_angle: (-4.0 + CANVAS_OFFSET_DEG).to_radians(),
                end_angle: (4.0 + CANVAS_OFFSET_DEG).to_radians(),
            };
            let run = fit_title(&ring.name, &geom, metrics.ring_name_font, base_text_color, measure);
            list.push(
                overlay_band,
                WheelElement::new(
                    run,
                    VizColor::TRANSPARENT,
                    ElementFlags::NONE,
                    ElementInfo {
                        kind: ElementKind::RingName,
                        ring_id: Some(ring.id.clone()),
                        ..Default::default()
                    },
                ),
            );
        }
    }

    log::trace!(
        "composed display list: {} elements in {} bands",
        list.len(),
        list.band_count()
    );

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        text::FixedAdvanceMeasure,
        types::{ActivityGroup, Item, Label, RingOrientation},
    };

    fn ring(id: &str, kind: RingKind) -> Ring {
        Ring {
            id: id.to_string(),
            name: format!("Ring {id}"),
            kind,
            visible: true,
            orientation: RingOrientation::Vertical,
        }
    }

    fn item(id: &str, ring: &str, start: &str, end: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            ring_id: ring.to_string(),
            activity_id: "a1".to_string(),
            label_id: None,
            start_date: start.to_string(),
            end_date: end.to_string(),
            cross_year_group_id: None,
            description: None,
            status: None,
        }
    }

    fn structure() -> WheelStructure {
        WheelStructure {
            rings: vec![ring("r1", RingKind::Inner), ring("outer", RingKind::Outer)],
            activity_groups: vec![ActivityGroup {
                id: "a1".to_string(),
                name: "Group".to_string(),
                color: "#EF4444".to_string(),
                visible: true,
            }],
            labels: vec![Label {
                id: "l1".to_string(),
                name: "Urgent".to_string(),
                color: "#F59E0B".to_string(),
                visible: true,
            }],
            items: vec![
                item("i1", "r1", "2025-03-01", "2025-04-15"),
                item("e1", "outer", "2025-06-01", "2025-06-20"),
            ],
        }
    }

    fn options() -> WheelOptions {
        WheelOptions {
            title: "Marketing 2025".to_string(),
            ..Default::default()
        }
    }

    fn activity_elements(list: &WheelDisplayList) -> Vec<&WheelElement> {
        list.iter()
            .filter(|e| e.info.kind == ElementKind::Activity && matches!(e.shape, crate::viz::WheelShape::Sector(_)))
            .collect()
    }

    #[test]
    fn same_inputs_produce_identical_lists() {
        let structure = structure();
        let opts = options();
        let measure = FixedAdvanceMeasure::default();
        let a = build_display_list(&structure, &opts, &measure).unwrap();
        let b = build_display_list(&structure, &opts, &measure).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn composes_all_layers() {
        let list = build_display_list(&structure(), &options(), &FixedAdvanceMeasure::default()).unwrap();

        let kinds: Vec<ElementKind> = list.iter().map(|e| e.info.kind).collect();
        assert!(kinds.contains(&ElementKind::TitleText));
        assert!(kinds.contains(&ElementKind::YearText));
        assert!(kinds.contains(&ElementKind::MonthCell));
        assert!(kinds.contains(&ElementKind::WeekCell));
        assert!(kinds.contains(&ElementKind::YearEvent));
        assert!(kinds.contains(&ElementKind::Activity));
    }

    #[test]
    fn empty_palette_is_an_error() {
        let mut opts = options();
        opts.palette.clear();
        let err = build_display_list(&structure(), &opts, &FixedAdvanceMeasure::default());
        assert!(matches!(err, Err(WheelRenderError::EmptyPalette)));
    }

    #[test]
    fn short_item_is_widened_and_flagged() {
        let mut s = structure();
        s.items = vec![item("short", "r1", "2025-01-01", "2025-01-03")];
        let list = build_display_list(&s, &options(), &FixedAdvanceMeasure::default()).unwrap();

        let sectors = activity_elements(&list);
        assert_eq!(sectors.len(), 1);
        let element = sectors[0];
        assert!(element.flags.contains(ElementFlags::WIDENED));
        let bounds = element.info.bounds.as_ref().unwrap();
        assert!((bounds.span() - MIN_SPAN_DEG).abs() < 1e-3);
    }

    #[test]
    fn overlapping_narrow_items_cluster() {
        let mut s = structure();
        s.items = vec![
            item("n1", "r1", "2025-05-10", "2025-05-10"),
            item("n2", "r1", "2025-05-10", "2025-05-11"),
        ];
        let list = build_display_list(&s, &options(), &FixedAdvanceMeasure::default()).unwrap();

        let sectors = activity_elements(&list);
        assert_eq!(sectors.len(), 1);
        let cluster = sectors[0];
        assert!(cluster.flags.contains(ElementFlags::CLUSTER));
        assert_eq!(cluster.info.members.len(), 2);
        assert!(cluster.info.item_id.is_none());
    }

    #[test]
    fn wide_items_never_cluster() {
        let mut s = structure();
        s.items = vec![
            item("wide", "r1", "2025-05-01", "2025-07-01"),
            item("narrow", "r1", "2025-05-10", "2025-05-10"),
        ];
        let list = build_display_list(&s, &options(), &FixedAdvanceMeasure::default()).unwrap();

        let sectors = activity_elements(&list);
        assert_eq!(sectors.len(), 2);
        assert!(sectors.iter().all(|e| !e.flags.contains(ElementFlags::CLUSTER)));
    }

    #[test]
    fn month_zoom_drops_sectors_outside_the_scope() {
        let mut opts = options();
        let full = build_display_list(&structure(), &opts, &FixedAdvanceMeasure::default()).unwrap();
        opts.zoomed_month = Some(0);
        let zoomed = build_display_list(&structure(), &opts, &FixedAdvanceMeasure::default()).unwrap();

        // The March-April item and the June event are outside January
        assert!(activity_elements(&zoomed).is_empty());
        assert!(!activity_elements(&full).is_empty());
        let month_cells = |l: &WheelDisplayList| {
            l.iter()
                .filter(|e| e.info.kind == ElementKind::MonthCell && matches!(e.shape, crate::viz::WheelShape::Sector(_)))
                .count()
        };
        assert_eq!(month_cells(&zoomed), 1);
        assert_eq!(month_cells(&full), 12);
    }

    #[test]
    fn selection_set_marks_elements() {
        let mut opts = options();
        opts.selected_item_ids.insert("i1".to_string());
        let list = build_display_list(&structure(), &opts, &FixedAdvanceMeasure::default()).unwrap();
        let selected = activity_elements(&list)
            .iter()
            .any(|e| e.flags.contains(ElementFlags::SELECTED));
        assert!(selected);
    }

    #[test]
    fn ring_bands_never_overlap_across_elements() {
        let list = build_display_list(&structure(), &options(), &FixedAdvanceMeasure::default()).unwrap();
        // Every activity sector lies strictly inside the reserved band gap
        for e in activity_elements(&list) {
            let b = e.info.bounds.as_ref().unwrap();
            let metrics = WheelMetrics::new(2000.0);
            assert!(b.inner_radius >= metrics.min_radius);
            assert!(b.outer_radius <= metrics.max_radius);
        }
    }
}
