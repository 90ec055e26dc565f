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

    Text rasterization using rusttype. Each run is laid out into a small
    glyph pixmap, then composited with the run's anchor offset, rotation and
    the whole-wheel transform. All placement decisions were already made by
    the core fitter; this only draws.
*/

use rusttype::{point, Font, Scale};
use tiny_skia::{BlendMode, FilterQuality, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use yearwheel::viz::{TextAnchor, TextRun};

/// Tight pixel bounds of `text` at `size`: (min_x, min_y, width, height).
fn layout_bounds(font: &Font, text: &str, size: f32) -> (i32, i32, i32, i32) {
    let scale = Scale::uniform(size);

    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for glyph in font.layout(text, scale, point(0.0, 0.0)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            min_x = min_x.min(bb.min.x);
            max_x = max_x.max(bb.max.x);
            min_y = min_y.min(bb.min.y);
            max_y = max_y.max(bb.max.y);
        }
    }

    if min_x > max_x {
        (0, 0, 0, 0)
    }
    else {
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Rasterize one resolved text run onto the pixmap.
pub(crate) fn skia_render_text_run(pixmap: &mut Pixmap, font: &Font, run: &TextRun, wheel_transform: &Transform) {
    let (min_x, min_y, width, height) = layout_bounds(font, &run.text, run.size);
    if width <= 0 || height <= 0 {
        return;
    }

    let Some(mut text_pixmap) = Pixmap::new(width as u32, height as u32) else {
        log::warn!("could not allocate {}x{} text pixmap", width, height);
        return;
    };

    // Draw each glyph into the text pixmap, offset so the tight bounds start
    // at the pixmap origin.
    let scale = Scale::uniform(run.size);
    let color = run.color;
    for glyph in font.layout(&run.text, scale, point(0.0, 0.0)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        let origin_x = bb.min.x - min_x;
        let origin_y = bb.min.y - min_y;

        glyph.draw(|px, py, alpha| {
            let alpha = alpha.clamp(0.0, 1.0);
            let Some(pixel) = PremultipliedColorU8::from_rgba(
                (color.r as f32 * alpha * (color.a as f32 / 255.0)) as u8,
                (color.g as f32 * alpha * (color.a as f32 / 255.0)) as u8,
                (color.b as f32 * alpha * (color.a as f32 / 255.0)) as u8,
                (color.a as f32 * alpha) as u8,
            ) else {
                return;
            };

            let x = origin_x + px as i32;
            let y = origin_y + py as i32;
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let index = (y as u32 * text_pixmap.width() + x as u32) as usize;
            text_pixmap.pixels_mut()[index] = pixel;
        });
    }

    // Anchor offset, then rotation about the origin, then the wheel transform
    let anchor_dx = match run.anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Center => -(width as f32) / 2.0,
        TextAnchor::End => -(width as f32),
    };
    let anchor_dy = -(height as f32) / 2.0;

    let transform = Transform::from_translate(anchor_dx, anchor_dy)
        .post_concat(Transform::from_rotate(run.rotation.to_degrees()))
        .post_concat(Transform::from_translate(run.origin.x, run.origin.y))
        .post_concat(*wheel_transform);

    pixmap.draw_pixmap(
        0,
        0,
        text_pixmap.as_ref(),
        &PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        },
        transform,
        None,
    );
}
