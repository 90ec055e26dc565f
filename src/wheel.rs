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

//! A [Wheel] is a cache of the last composed display list plus a dirty flag,
//! nothing more: all render inputs are immutable values and the render
//! itself is the pure [crate::compose::build_display_list].
//!
//! Two update channels exist by design. Structural updates (ring/item data)
//! flow through full replacement of the [WheelStructure]. Cosmetic updates
//! (zoom, selection, rotation) replace only the corresponding option values,
//! so a drag in progress is never interrupted by an unrelated rebuild -
//! and rotation, being a pure display offset applied by the backends, does
//! not even invalidate the cached list.

use crate::{
    angle::BASE_ROTATION_DEG,
    compose::build_display_list,
    interact::{
        classify_drag_zone,
        click_event,
        extend_event,
        hit_test,
        point_to_date_polar,
        DragZone,
        EventSink,
        WheelEvent,
    },
    text::TextMeasure,
    types::{WheelOptions, WheelStructure},
    viz::{VizPoint2d, VizRect, WheelDisplayList},
    WheelHashSet,
    WheelRenderError,
};

pub struct Wheel {
    structure: WheelStructure,
    options: WheelOptions,
    rotation_deg: f32,
    cache: Option<WheelDisplayList>,
    dirty: bool,
}

impl Wheel {
    pub fn new(structure: WheelStructure, options: WheelOptions) -> Wheel {
        Wheel {
            structure,
            options,
            rotation_deg: BASE_ROTATION_DEG,
            cache: None,
            dirty: true,
        }
    }

    pub fn structure(&self) -> &WheelStructure {
        &self.structure
    }

    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Structural update: replace the full data set.
    pub fn replace_structure(&mut self, structure: WheelStructure) {
        self.structure = structure;
        self.dirty = true;
    }

    /// Replace the whole options snapshot.
    pub fn replace_options(&mut self, options: WheelOptions) {
        if options != self.options {
            self.options = options;
            self.dirty = true;
        }
    }

    /// Cosmetic update: zoom scope.
    pub fn set_zoom(&mut self, month: Option<u8>, quarter: Option<u8>) {
        if self.options.zoomed_month != month || self.options.zoomed_quarter != quarter {
            self.options.zoomed_month = month;
            self.options.zoomed_quarter = quarter;
            self.dirty = true;
        }
    }

    /// Cosmetic update: selection set.
    pub fn set_selection(&mut self, selected: WheelHashSet<String>) {
        if self.options.selected_item_ids != selected {
            self.options.selected_item_ids = selected;
            self.dirty = true;
        }
    }

    /// Cosmetic update: whole-wheel rotation in degrees (base offset plus
    /// animation). Applied as a backend transform, so the cached display
    /// list stays valid.
    pub fn set_rotation_deg(&mut self, rotation_deg: f32) {
        self.rotation_deg = rotation_deg;
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    /// The current display list, recomposing only when an input changed.
    pub fn display_list(&mut self, measure: &dyn TextMeasure) -> Result<&WheelDisplayList, WheelRenderError> {
        if self.dirty || self.cache.is_none() {
            let list = build_display_list(&self.structure, &self.options, measure)?;
            self.cache = Some(list);
            self.dirty = false;
        }
        // The cache is Some after the rebuild above
        Ok(self.cache.as_ref().expect("display list cache"))
    }

    /// The last composed list, if any, without recomposing.
    pub fn cached_list(&self) -> Option<&WheelDisplayList> {
        self.cache.as_ref()
    }

    /// Resolve a click against the last render and dispatch the resulting
    /// event. Returns whether anything interactive was hit.
    pub fn handle_click(
        &self,
        point: &VizPoint2d<f32>,
        viewport: &VizRect<f32>,
        sink: &mut dyn EventSink,
    ) -> bool {
        let Some(list) = self.cache.as_ref() else {
            return false;
        };
        match click_event(list, &self.structure, point, self.rotation_deg, viewport) {
            Some(event) => {
                sink.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Resolve a mouse-down against the last render into a drag start,
    /// dispatching [WheelEvent::DragStarted] for item hits. Readonly wheels
    /// never start drags.
    pub fn begin_drag(&self, point: &VizPoint2d<f32>, sink: &mut dyn EventSink) -> Option<(String, DragZone)> {
        if self.options.readonly {
            return None;
        }
        let list = self.cache.as_ref()?;
        let info = hit_test(list, point, self.rotation_deg)?;
        let item_id = info.item_id.clone()?;
        let bounds = info.bounds.as_ref()?;

        let (_, date_deg) = point_to_date_polar(&list.center, point, self.rotation_deg);
        let zone = classify_drag_zone(
            bounds,
            date_deg,
            self.options.zoomed_month.is_some(),
            self.options.zoomed_quarter.is_some(),
        );

        sink.dispatch(WheelEvent::DragStarted {
            item_id: item_id.clone(),
        });
        Some((item_id, zone))
    }

    /// Resolve a drag release into an extend event for resize drags,
    /// dispatching it to the sink. Move drags produce no boundary change
    /// here; the host owns item repositioning.
    pub fn complete_drag(
        &self,
        item_id: &str,
        zone: DragZone,
        point: &VizPoint2d<f32>,
        sink: &mut dyn EventSink,
    ) -> bool {
        let Some(list) = self.cache.as_ref() else {
            return false;
        };
        let (_, date_deg) = point_to_date_polar(&list.center, point, self.rotation_deg);
        match extend_event(item_id, zone, date_deg, self.options.display_year) {
            Some(event) => {
                sink.dispatch(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        text::FixedAdvanceMeasure,
        types::{ActivityGroup, Item, Ring, RingKind, RingOrientation},
    };

    fn structure() -> WheelStructure {
        WheelStructure {
            rings: vec![Ring {
                id: "r1".to_string(),
                name: "Ring".to_string(),
                kind: RingKind::Inner,
                visible: true,
                orientation: RingOrientation::Vertical,
            }],
            activity_groups: vec![ActivityGroup {
                id: "a1".to_string(),
                name: "Group".to_string(),
                color: "#EF4444".to_string(),
                visible: true,
            }],
            labels: Vec::new(),
            items: vec![Item {
                id: "i1".to_string(),
                name: "Item".to_string(),
                ring_id: "r1".to_string(),
                activity_id: "a1".to_string(),
                label_id: None,
                start_date: "2025-03-01".to_string(),
                end_date: "2025-05-31".to_string(),
                cross_year_group_id: None,
                description: None,
                status: None,
            }],
        }
    }

    #[test]
    fn cache_rebuilds_only_when_dirty() {
        let mut wheel = Wheel::new(structure(), WheelOptions::default());
        let measure = FixedAdvanceMeasure::default();

        assert!(wheel.is_dirty());
        wheel.display_list(&measure).unwrap();
        assert!(!wheel.is_dirty());

        // Identical cosmetic values do not dirty the cache
        wheel.set_zoom(None, None);
        assert!(!wheel.is_dirty());

        wheel.set_zoom(Some(2), None);
        assert!(wheel.is_dirty());
    }

    #[test]
    fn rotation_is_a_pure_display_offset() {
        let mut wheel = Wheel::new(structure(), WheelOptions::default());
        let measure = FixedAdvanceMeasure::default();
        let before = wheel.display_list(&measure).unwrap().clone();

        wheel.set_rotation_deg(37.0);
        assert!(!wheel.is_dirty());
        assert_eq!(wheel.display_list(&measure).unwrap(), &before);
    }

    #[test]
    fn structural_replacement_dirties() {
        let mut wheel = Wheel::new(structure(), WheelOptions::default());
        let measure = FixedAdvanceMeasure::default();
        wheel.display_list(&measure).unwrap();

        wheel.replace_structure(structure());
        assert!(wheel.is_dirty());
    }

    #[test]
    fn readonly_wheels_never_start_drags() {
        let mut options = WheelOptions::default();
        options.readonly = true;
        let mut wheel = Wheel::new(structure(), options);
        let measure = FixedAdvanceMeasure::default();
        wheel.display_list(&measure).unwrap();

        let mut events: Vec<WheelEvent> = Vec::new();
        let center = wheel.cached_list().unwrap().center;
        assert!(wheel.begin_drag(&center, &mut events).is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn drag_release_dispatches_extend_events() {
        let mut wheel = Wheel::new(structure(), WheelOptions::default());
        let measure = FixedAdvanceMeasure::default();
        wheel.display_list(&measure).unwrap();

        let mut events: Vec<WheelEvent> = Vec::new();
        let list = wheel.cached_list().unwrap();
        // Release straight up from center (12 o'clock): with the base
        // rotation of −15°, that is date angle 15° ≈ mid January.
        let point = VizPoint2d::new(list.center.x, list.center.y - 500.0);
        let handled = wheel.complete_drag("i1", DragZone::ResizeEnd, &point, &mut events);
        assert!(handled);
        assert!(matches!(events[0], WheelEvent::ExtendForward { .. }));
    }
}
