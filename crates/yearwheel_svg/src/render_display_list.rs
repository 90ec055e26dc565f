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

use crate::render_elements::{svg_render_element, RenderNode};

use yearwheel::viz::{ElementKind, WheelDisplayList};

use svg::{
    node::element::Group,
    Document,
};

/// Render a display list as a rotated group plus a fixed overlay group: the
/// title and year text stay put while the wheel pivots about its center.
pub fn render_display_list_as_svg(display_list: &WheelDisplayList, rotation_deg: f32) -> (Group, Group) {
    let center = display_list.center;

    // Rotate around the wheel center
    let mut rotated = Group::new().set(
        "transform",
        format!("rotate({:.3} {:.3} {:.3})", rotation_deg, center.x, center.y),
    );
    let mut fixed = Group::new();

    for element in display_list.iter() {
        let stays_fixed = matches!(element.info.kind, ElementKind::TitleText | ElementKind::YearText);
        match (stays_fixed, svg_render_element(element)) {
            (false, RenderNode::Path(path)) => rotated = rotated.add(path),
            (false, RenderNode::Text(text)) => rotated = rotated.add(text),
            (true, RenderNode::Path(path)) => fixed = fixed.add(path),
            (true, RenderNode::Text(text)) => fixed = fixed.add(text),
        }
    }

    (rotated, fixed)
}

/// Build a complete SVG document for the display list, sized to the exact
/// pixel dimensions the list was composed for so vector exports always match
/// the raster surface.
pub fn document_from_display_list(display_list: &WheelDisplayList, rotation_deg: f32) -> Document {
    let width = display_list.dimensions.x;
    let height = display_list.dimensions.y;

    log::trace!("building {}x{} svg document from {} elements", width, height, display_list.len());

    let (rotated, fixed) = render_display_list_as_svg(display_list, rotation_deg);

    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", format!("0 0 {width} {height}"))
        .add(rotated)
        .add(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yearwheel::{
        compose::build_display_list,
        text::FixedAdvanceMeasure,
        types::{ActivityGroup, Item, Ring, RingKind, RingOrientation, WheelOptions, WheelStructure},
    };

    fn wheel() -> (WheelStructure, WheelOptions) {
        let structure = WheelStructure {
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
                name: "Launch".to_string(),
                ring_id: "r1".to_string(),
                activity_id: "a1".to_string(),
                label_id: None,
                start_date: "2025-02-01".to_string(),
                end_date: "2025-06-30".to_string(),
                cross_year_group_id: None,
                description: None,
                status: None,
            }],
        };
        let options = WheelOptions {
            title: "Plan".to_string(),
            size: 400.0,
            ..Default::default()
        };
        (structure, options)
    }

    #[test]
    fn serialization_is_deterministic() {
        let (structure, options) = wheel();
        let list = build_display_list(&structure, &options, &FixedAdvanceMeasure::default()).unwrap();

        let a = document_from_display_list(&list, -15.0).to_string();
        let b = document_from_display_list(&list, -15.0).to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn document_contains_paths_text_and_fills() {
        let (structure, options) = wheel();
        let list = build_display_list(&structure, &options, &FixedAdvanceMeasure::default()).unwrap();
        let text = document_from_display_list(&list, -15.0).to_string();

        assert!(text.contains("<path"));
        assert!(text.contains("<text"));
        // The activity group fill color survives serialization
        assert!(text.contains("#EF4444"));
        // The wheel rotation is a group transform
        assert!(text.contains("rotate(-15"));
        assert!(text.contains("viewBox"));
    }

    #[test]
    fn title_text_is_not_rotated_with_the_wheel() {
        let (structure, options) = wheel();
        let list = build_display_list(&structure, &options, &FixedAdvanceMeasure::default()).unwrap();
        let (_, fixed) = render_display_list_as_svg(&list, -15.0);
        let fixed_text = fixed.to_string();
        assert!(fixed_text.contains("PLAN") || fixed_text.contains("Plan"));
    }
}
