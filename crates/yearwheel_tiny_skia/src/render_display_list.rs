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

use tiny_skia::{Paint, Pixmap, Transform};

use crate::render_elements::skia_render_element;
use yearwheel::{
    text::FontMetrics,
    viz::{ElementKind, WheelDisplayList},
};

/// Execute a display list against a pixmap. `rotation_deg` is the
/// whole-wheel rotation (base offset plus animation); the title and year
/// text stay fixed while everything else pivots about the wheel center.
pub fn render_display_list(
    pixmap: &mut Pixmap,
    font: Option<&FontMetrics>,
    rotation_deg: f32,
    display_list: &WheelDisplayList,
) -> Result<(), String> {
    if pixmap.width() != display_list.dimensions.x || pixmap.height() != display_list.dimensions.y {
        return Err(format!(
            "pixmap is {}x{} but the display list was composed for {}x{}",
            pixmap.width(),
            pixmap.height(),
            display_list.dimensions.x,
            display_list.dimensions.y,
        ));
    }

    // Rotate around the wheel center
    let rotated = Transform::from_rotate_at(rotation_deg, display_list.center.x, display_list.center.y);
    let fixed = Transform::identity();

    let mut paint = Paint::default();
    paint.anti_alias = true;

    for element in display_list.iter() {
        let transform = match element.info.kind {
            ElementKind::TitleText | ElementKind::YearText => &fixed,
            _ => &rotated,
        };
        skia_render_element(pixmap, &mut paint, transform, font, element);
    }

    Ok(())
}
