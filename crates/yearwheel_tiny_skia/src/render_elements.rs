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

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::{skia_color, text::skia_render_text_run};
use yearwheel::{
    text::FontMetrics,
    viz::{VizArc, VizSector, WheelElement, WheelShape},
};

#[inline]
fn skia_render_arc_chain(path: &mut PathBuilder, arcs: &[VizArc], line_to: bool) {
    for (i, arc) in arcs.iter().enumerate() {
        if i == 0 {
            if line_to {
                path.line_to(arc.start.x, arc.start.y);
            }
            else {
                path.move_to(arc.start.x, arc.start.y);
            }
        }
        path.cubic_to(arc.cp1.x, arc.cp1.y, arc.cp2.x, arc.cp2.y, arc.end.x, arc.end.y);
    }
}

/// Append a closed annular wedge to the path: the outer arc chain forward,
/// a line down to the inner radius, the inner chain backward, and close.
#[inline]
pub fn skia_render_sector(path: &mut PathBuilder, sector: &VizSector) {
    skia_render_arc_chain(path, &sector.outer, false);
    skia_render_arc_chain(path, &sector.inner, true);
    if let Some(first) = sector.outer.first() {
        path.line_to(first.start.x, first.start.y);
    }
}

/// Render a single display list element. Sector fills use the element color;
/// text runs are rasterized through the shared font, or skipped with a log
/// message when no font was supplied.
pub fn skia_render_element(
    pixmap: &mut Pixmap,
    paint: &mut Paint,
    transform: &Transform,
    font: Option<&FontMetrics>,
    element: &WheelElement,
) {
    match &element.shape {
        WheelShape::Sector(sector) => {
            let mut path = PathBuilder::new();
            skia_render_sector(&mut path, sector);
            path.close();

            paint.set_color(skia_color(element.color));

            if let Some(path) = path.finish() {
                if !path.is_empty() {
                    pixmap.fill_path(&path, paint, FillRule::Winding, *transform, None);
                }
            }
        }
        WheelShape::Text(run) => match font {
            Some(font) => skia_render_text_run(pixmap, font.font(), run, transform),
            None => log::debug!("no font supplied; skipping text run '{}'", run.text),
        },
    }
}
