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

use yearwheel::viz::{TextAnchor, TextRun, VizArc, VizColor, VizSector, WheelElement, WheelShape};

use svg::node::{
    element::{path::Data, Path, Text},
    Value,
};

#[derive(Clone, Debug)]
pub enum RenderNode {
    Path(Path),
    Text(Text),
}

pub fn viz_color_to_value(color: VizColor) -> Value {
    if color.a == 0 {
        // Fully transparent, return 'none' to prevent rendering
        Value::from("none")
    }
    else if color.a < 255 {
        // Convert to rgba() string if alpha is present
        Value::from(format!(
            "rgba({}, {}, {}, {:.3})",
            color.r,
            color.g,
            color.b,
            color.a as f32 / 255.0 // Alpha normalized to [0.0, 1.0]
        ))
    }
    else {
        // Convert to hex string if fully opaque
        Value::from(format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b))
    }
}

fn svg_render_arc_chain(mut data: Data, arcs: &[VizArc], line_to: bool) -> Data {
    for (i, arc) in arcs.iter().enumerate() {
        if i == 0 {
            data = if line_to {
                data.line_to((arc.start.x, arc.start.y))
            }
            else {
                data.move_to((arc.start.x, arc.start.y))
            };
        }
        data = data.cubic_curve_to(((arc.cp1.x, arc.cp1.y), (arc.cp2.x, arc.cp2.y), (arc.end.x, arc.end.y)));
    }
    data
}

fn svg_render_sector(mut data: Data, sector: &VizSector) -> Data {
    data = svg_render_arc_chain(data, &sector.outer, false);
    data = svg_render_arc_chain(data, &sector.inner, true);
    if let Some(first) = sector.outer.first() {
        data = data.line_to((first.start.x, first.start.y));
    }
    data
}

fn svg_render_text(run: &TextRun) -> Text {
    let anchor = match run.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Center => "middle",
        TextAnchor::End => "end",
    };

    Text::new(run.text.clone())
        .set(
            "transform",
            format!(
                "translate({:.3} {:.3}) rotate({:.3})",
                run.origin.x,
                run.origin.y,
                run.rotation.to_degrees()
            ),
        )
        .set("font-family", "Arial, sans-serif")
        .set("font-size", run.size)
        .set("font-weight", if run.bold { "bold" } else { "normal" })
        .set("text-anchor", anchor)
        .set("dominant-baseline", "middle")
        .set("fill", viz_color_to_value(run.color))
}

/// Render one display list element as an SVG node.
pub fn svg_render_element(element: &WheelElement) -> RenderNode {
    match &element.shape {
        WheelShape::Sector(sector) => {
            let data = svg_render_sector(Data::new(), sector).close();
            RenderNode::Path(
                Path::new()
                    .set("d", data)
                    .set("fill", viz_color_to_value(element.color))
                    .set("stroke", "none"),
            )
        }
        WheelShape::Text(run) => RenderNode::Text(svg_render_text(run)),
    }
}
