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

//! Dual-surface rendering and export.
//!
//! A [DualSurface] owns the active raster surface and the shared font
//! metrics. One display list - one execution of the core draw program - is
//! rendered to the raster surface for display, and *replayed* against a
//! fresh vector surface of identical pixel dimensions for SVG export. There
//! is no separately maintained export path: every artifact is a literal
//! execution of the same program against a different backend.

use yearwheel::{
    text::{FixedAdvanceMeasure, FontMetrics, TextMeasure},
    viz::WheelDisplayList,
    WheelRenderError,
};

use chrono::NaiveDate;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format '{0}'")]
    UnsupportedFormat(String),
    #[error("The render surface could not be created")]
    BadSurface,
    #[error("The display list could not be rendered: {0}")]
    Render(String),
    #[error("The artifact could not be encoded: {0}")]
    Encode(String),
    #[error(transparent)]
    Wheel(#[from] WheelRenderError),
}

/// The artifact formats the engine can produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ExportFormat {
    #[strum(serialize = "png")]
    Png,
    /// PNG matted onto a white background instead of transparency.
    #[strum(serialize = "png-white")]
    PngWhite,
    /// JPEG, always matted white (the format has no alpha).
    #[strum(serialize = "jpeg")]
    Jpeg,
    /// Serialized vector text.
    #[strum(serialize = "svg")]
    Svg,
}

impl ExportFormat {
    /// Parse a caller-supplied format name. Unknown names are reported, not
    /// fatal: no artifact is produced and the caller decides what to do.
    pub fn parse(name: &str) -> Result<ExportFormat, ExportError> {
        name.parse::<ExportFormat>()
            .map_err(|_| ExportError::UnsupportedFormat(name.to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png | ExportFormat::PngWhite => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png | ExportFormat::PngWhite => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

/// One produced export.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Build the conventional file name: `YearWheel_<sanitized-title>_<ISO-date>.<ext>`,
/// where whitespace runs in the title collapse to underscores and an empty
/// title drops its segment entirely.
pub fn file_name(title: &str, format: ExportFormat, date: NaiveDate) -> String {
    let title_part = if title.trim().is_empty() {
        String::new()
    }
    else {
        let sanitized: Vec<&str> = title.split_whitespace().collect();
        format!("{}_", sanitized.join("_"))
    };
    format!("YearWheel_{}{}.{}", title_part, date, format.extension())
}

/// [file_name] stamped with today's date.
pub fn file_name_today(title: &str, format: ExportFormat) -> String {
    file_name(title, format, chrono::Local::now().date_naive())
}

/// The active raster surface plus the shared text-measurement seam.
pub struct DualSurface {
    pixmap: Pixmap,
    font: Option<FontMetrics>,
    fallback_measure: FixedAdvanceMeasure,
    rotation_deg: f32,
}

impl DualSurface {
    /// Create a surface for display lists composed at `size` pixels wide.
    /// The surface is a quarter taller than wide, matching the core metrics.
    pub fn new(size: u32) -> Result<DualSurface, ExportError> {
        let pixmap = Pixmap::new(size, size + size / 4).ok_or(ExportError::BadSurface)?;
        Ok(DualSurface {
            pixmap,
            font: None,
            fallback_measure: FixedAdvanceMeasure::default(),
            rotation_deg: 0.0,
        })
    }

    /// Attach the font both backends will lay out and draw with.
    pub fn with_font_data(mut self, data: Vec<u8>) -> Result<DualSurface, ExportError> {
        self.font = Some(FontMetrics::from_vec(data)?);
        Ok(self)
    }

    /// The measurement seam to hand to the draw program. Falls back to a
    /// fixed-advance measurer when no font is attached (text runs are then
    /// skipped during rasterization).
    pub fn measure(&self) -> &dyn TextMeasure {
        match &self.font {
            Some(font) => font,
            None => &self.fallback_measure,
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    /// Execute the display list against the raster surface. This is the
    /// on-screen render; exports replay the same list.
    pub fn render(&mut self, list: &WheelDisplayList, rotation_deg: f32) -> Result<(), ExportError> {
        self.rotation_deg = rotation_deg;
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        yearwheel_tiny_skia::render_display_list(&mut self.pixmap, self.font.as_ref(), rotation_deg, list)
            .map_err(ExportError::Render)
    }

    /// Produce an artifact in `format` from the given display list. Vector
    /// output replays the list against a fresh vector surface of identical
    /// dimensions; raster output encodes the raster surface, which the
    /// caller rendered from the same list.
    pub fn export(
        &self,
        list: &WheelDisplayList,
        format: ExportFormat,
        title: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Png => self.encode_png(false)?,
            ExportFormat::PngWhite => self.encode_png(true)?,
            ExportFormat::Jpeg => self.encode_jpeg()?,
            ExportFormat::Svg => {
                // Fresh vector surface, same program, same dimensions
                let document = yearwheel_svg::document_from_display_list(list, self.rotation_deg);
                document.to_string().into_bytes()
            }
        };

        log::debug!("exported {} bytes as {}", bytes.len(), format);

        Ok(ExportArtifact {
            file_name: file_name_today(title, format),
            mime: format.mime(),
            bytes,
        })
    }

    /// Parse-and-export convenience for callers holding a format string.
    pub fn export_named(
        &self,
        list: &WheelDisplayList,
        format_name: &str,
        title: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let format = ExportFormat::parse(format_name)?;
        self.export(list, format, title)
    }

    fn encode_png(&self, white_background: bool) -> Result<Vec<u8>, ExportError> {
        let pixmap = if white_background {
            let mut matted = Pixmap::new(self.pixmap.width(), self.pixmap.height()).ok_or(ExportError::BadSurface)?;
            matted.fill(tiny_skia::Color::WHITE);
            matted.draw_pixmap(
                0,
                0,
                self.pixmap.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            matted
        }
        else {
            self.pixmap.clone()
        };

        pixmap.encode_png().map_err(|e| ExportError::Encode(e.to_string()))
    }

    fn encode_jpeg(&self) -> Result<Vec<u8>, ExportError> {
        let width = self.pixmap.width();
        let height = self.pixmap.height();

        // Composite the premultiplied RGBA surface over white and drop alpha
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for pixel in self.pixmap.pixels() {
            let inverse_alpha = 255 - pixel.alpha() as u16;
            rgb.push((pixel.red() as u16 + inverse_alpha).min(255) as u8);
            rgb.push((pixel.green() as u16 + inverse_alpha).min(255) as u8);
            rgb.push((pixel.blue() as u16 + inverse_alpha).min(255) as u8);
        }

        let mut bytes = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 100);
        image::ImageEncoder::write_image(encoder, &rgb, width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yearwheel::{
        compose::build_display_list,
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
                color: "#10B981".to_string(),
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
            title: "Team Plan".to_string(),
            size: 400.0,
            ..Default::default()
        };
        (structure, options)
    }

    fn rendered_surface() -> (DualSurface, WheelDisplayList) {
        let (structure, options) = wheel();
        let mut surface = DualSurface::new(400).unwrap();
        let list = build_display_list(&structure, &options, surface.measure()).unwrap();
        surface.render(&list, -15.0).unwrap();
        (surface, list)
    }

    #[test]
    fn unsupported_format_is_reported_not_fatal() {
        let err = ExportFormat::parse("pdf").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref name) if name == "pdf"));
    }

    #[test]
    fn format_names_round_trip() {
        for (name, format) in [
            ("png", ExportFormat::Png),
            ("png-white", ExportFormat::PngWhite),
            ("jpeg", ExportFormat::Jpeg),
            ("svg", ExportFormat::Svg),
        ] {
            assert_eq!(ExportFormat::parse(name).unwrap(), format);
            assert_eq!(format.to_string(), name);
        }
    }

    #[test]
    fn file_names_follow_the_convention() {
        let date: NaiveDate = "2025-08-07".parse().unwrap();
        assert_eq!(
            file_name("Team  Plan 2025", ExportFormat::Png, date),
            "YearWheel_Team_Plan_2025_2025-08-07.png"
        );
        assert_eq!(file_name("", ExportFormat::Jpeg, date), "YearWheel_2025-08-07.jpg");
        assert_eq!(file_name("  ", ExportFormat::Svg, date), "YearWheel_2025-08-07.svg");
    }

    #[test]
    fn png_export_produces_png_bytes() {
        let (surface, list) = rendered_surface();
        let artifact = surface.export(&list, ExportFormat::Png, "Team Plan").unwrap();
        assert_eq!(&artifact.bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(artifact.mime, "image/png");
        assert!(artifact.file_name.starts_with("YearWheel_Team_Plan_"));
    }

    #[test]
    fn jpeg_export_produces_jpeg_bytes() {
        let (surface, list) = rendered_surface();
        let artifact = surface.export(&list, ExportFormat::Jpeg, "Team Plan").unwrap();
        assert_eq!(&artifact.bytes[..2], &[0xFF, 0xD8]);
        assert!(artifact.file_name.ends_with(".jpg"));
    }

    #[test]
    fn svg_export_replays_the_same_display_list() {
        let (surface, list) = rendered_surface();
        let artifact = surface.export(&list, ExportFormat::Svg, "Team Plan").unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("#10B981"));
        // Export inherits the on-screen rotation
        assert!(text.contains("rotate(-15"));
    }

    #[test]
    fn exports_are_idempotent() {
        let (surface, list) = rendered_surface();
        let a = surface.export(&list, ExportFormat::Png, "t").unwrap();
        let b = surface.export(&list, ExportFormat::Png, "t").unwrap();
        assert_eq!(a.bytes, b.bytes);

        let sa = surface.export(&list, ExportFormat::Svg, "t").unwrap();
        let sb = surface.export(&list, ExportFormat::Svg, "t").unwrap();
        assert_eq!(sa.bytes, sb.bytes);
    }

    #[test]
    fn white_matte_fills_the_background() {
        let (surface, _list) = rendered_surface();
        let matted = surface.encode_png(true).unwrap();
        let plain = surface.encode_png(false).unwrap();
        assert_ne!(matted, plain);
    }
}
