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

//! Methods to construct cubic Bézier approximations of circular arcs, and the
//! element types carried by a wheel display list.
//!
//! Annular sectors are the unit of drawing on the wheel. A sector spanning
//! more than a quadrant is split into quadrant-sized arc segments so the
//! cubic approximation stays within tolerance; derived constants follow
//! https://spencermortensen.com/articles/bezier-circle/

use std::{
    f32::consts::FRAC_PI_2,
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul},
};

use crate::viz::color::VizColor;

use bitflags::bitflags;
use num_traits::Num;

bitflags! {
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ElementFlags: u32 {
        // No flags set
        const NONE = 0b0000_0000;
        /// This element is a reserved-band background cell, not an activity
        const BAND = 0b0000_0001;
        /// This element is part of the current selection set
        const SELECTED = 0b0000_0010;
        /// This element's item crosses a year boundary
        const CROSS_YEAR = 0b0000_0100;
        /// This element aggregates multiple overlapping narrow items
        const CLUSTER = 0b0000_1000;
        /// This element's span was widened to the minimum angular footprint
        const WIDENED = 0b0001_0000;
    }
}

/// A [VizDimensions] represents the width and height of a rectangular region, such as a pixmap.
pub type VizDimensions = VizPoint2d<u32>;

/// A [VizPoint2d] represents a point in 2D space.
/// It is generic across numeric types, using `num_traits`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizPoint2d<T> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy + Default + Display> Display for VizPoint2d<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Num + Copy + Default> From<(T, T)> for VizPoint2d<T> {
    fn from(tuple: (T, T)) -> Self {
        VizPoint2d { x: tuple.0, y: tuple.1 }
    }
}

impl<T: Num + Copy + Default> VizPoint2d<T> {
    pub fn new(x: T, y: T) -> Self {
        VizPoint2d { x, y }
    }

    pub fn to_tuple(&self) -> (T, T) {
        (self.x, self.y)
    }

    pub fn scale(&self, factor: T) -> VizPoint2d<T> {
        VizPoint2d {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl VizPoint2d<f32> {
    /// The point at `radius` from `center` along `angle` (radians).
    #[inline]
    pub fn from_polar(center: &VizPoint2d<f32>, radius: f32, angle: f32) -> VizPoint2d<f32> {
        VizPoint2d {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    }
}

/// A [VizRect] represents a rectangle in 2D space, defined by its top-left
/// and bottom-right corners. It is generic across numeric types, using
/// `num_traits`.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizRect<T: Num + Copy + PartialOrd + Default> {
    pub top_left: VizPoint2d<T>,
    pub bottom_right: VizPoint2d<T>,
}

impl<T: Num + Copy + PartialOrd + Default> VizRect<T> {
    pub fn new(top_left: VizPoint2d<T>, bottom_right: VizPoint2d<T>) -> VizRect<T> {
        VizRect { top_left, bottom_right }
    }

    pub fn from_tuple(top_left: (T, T), bottom_right: (T, T)) -> VizRect<T> {
        VizRect {
            top_left: VizPoint2d::from(top_left),
            bottom_right: VizPoint2d::from(bottom_right),
        }
    }

    pub fn width(&self) -> T {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> T {
        self.bottom_right.y - self.top_left.y
    }

    /// Return whether the specified point is within Self
    pub fn contains_point(&self, point: &VizPoint2d<T>) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }
}

impl<T> VizRect<T>
where
    T: Num + Copy + Add<T, Output = T> + Div<T, Output = T> + From<f32> + PartialOrd + Default,
{
    pub fn center(&self) -> VizPoint2d<T> {
        VizPoint2d::new(
            self.top_left.x + self.width() / T::from(2.0),
            self.top_left.y + self.height() / T::from(2.0),
        )
    }
}

impl From<(f32, f32, f32, f32)> for VizRect<f32> {
    fn from(tuple: (f32, f32, f32, f32)) -> Self {
        VizRect {
            top_left: VizPoint2d::new(tuple.0, tuple.1),
            bottom_right: VizPoint2d::new(tuple.2, tuple.3),
        }
    }
}

impl<T, Rhs> Mul<Rhs> for VizPoint2d<T>
where
    T: Num + Copy + Default + Mul<Rhs, Output = T>,
    Rhs: Num + Copy + Default + Mul<T>,
{
    type Output = VizPoint2d<<T as Mul<Rhs>>::Output>;
    fn mul(self, rhs: Rhs) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// A [VizArc] represents a cubic Bézier curve in 2D space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizArc {
    pub start: VizPoint2d<f32>, // Start point of arc
    pub end:   VizPoint2d<f32>, // End point of arc
    pub cp1:   VizPoint2d<f32>, // 1st control point
    pub cp2:   VizPoint2d<f32>, // 2nd control point
}

impl VizArc {
    /// Calculate cubic Bézier parameters from a center point, radius, and start and end angles.
    /// This assumes the curve represents a segment of a circle no longer than a quadrant;
    /// [VizSector::from_angles] splits longer spans before calling this.
    pub fn from_angles(center: &VizPoint2d<f32>, radius: f32, start_angle: f32, end_angle: f32) -> VizArc {
        // Calculate start and end points with simple trigonometry
        let x1 = center.x + radius * start_angle.cos();
        let y1 = center.y + radius * start_angle.sin();
        let x4 = center.x + radius * end_angle.cos();
        let y4 = center.y + radius * end_angle.sin();

        // Compute relative vectors
        let ax = x1 - center.x;
        let ay = y1 - center.y;
        let bx = x4 - center.x;
        let by = y4 - center.y;

        // Circular cubic approximation using (4/3).
        // q1 = |A|^2 = ax² + ay²
        // q2 = q1 + (A · B) = q1 + ax*bx + ay*by
        let q1 = ax * ax + ay * ay;
        let q2 = q1 + ax * bx + ay * by;
        let denom = ax * by - ay * bx;
        let k2 = if denom.abs() < f32::EPSILON {
            0.0
        }
        else {
            (4.0 / 3.0) * ((2.0 * q1 * q2).sqrt() - q2) / denom
        };

        // Reapply center offset
        let (x2, y2) = (center.x + ax - k2 * ay, center.y + ay + k2 * ax);
        let (x3, y3) = (center.x + bx + k2 * by, center.y + by - k2 * bx);

        VizArc {
            start: VizPoint2d { x: x1, y: y1 },
            end:   VizPoint2d { x: x4, y: y4 },
            cp1:   VizPoint2d { x: x2, y: y2 },
            cp2:   VizPoint2d { x: x3, y: y3 },
        }
    }

    /// Approximate the arc from `start_angle` to `end_angle` as a chain of
    /// quadrant-or-shorter cubic segments, in sweep order.
    pub fn chain_from_angles(
        center: &VizPoint2d<f32>,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    ) -> Vec<VizArc> {
        let sweep = end_angle - start_angle;
        let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;

        (0..segments)
            .map(|i| {
                let a0 = start_angle + step * i as f32;
                let a1 = if i + 1 == segments {
                    end_angle
                }
                else {
                    start_angle + step * (i + 1) as f32
                };
                VizArc::from_angles(center, radius, a0, a1)
            })
            .collect()
    }
}

/// A [VizSector] represents an arc with thickness, or an 'annular sector':
/// the filled wedge between two radii and two angles. The outer arc chain
/// runs forward (start to end angle) and the inner chain backward, so a
/// closed fill path can be produced by walking outer then inner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizSector {
    pub start: f32, // The angle at which the sector starts (radians)
    pub end:   f32, // The angle at which the sector ends (radians)
    pub outer: Vec<VizArc>,
    pub inner: Vec<VizArc>,
}

impl VizSector {
    /// Calculate a [VizSector] from a center point, start and end angles in
    /// radians, and an inner and outer radius.
    pub fn from_angles(
        center: &VizPoint2d<f32>,
        start_angle: f32,
        end_angle: f32,
        inner_radius: f32,
        outer_radius: f32,
    ) -> VizSector {
        let outer = VizArc::chain_from_angles(center, outer_radius, start_angle, end_angle);
        let inner = VizArc::chain_from_angles(center, inner_radius, end_angle, start_angle);

        VizSector {
            start: start_angle,
            end: end_angle,
            outer,
            inner,
        }
    }
}

/// Where a text run is anchored relative to its origin point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    Start,
    #[default]
    Center,
    End,
}

/// A fully resolved piece of text: the fitting strategies decide placement
/// during composition, so backends only ever draw runs, never re-measure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    pub text: String,
    /// Anchor point on the surface.
    pub origin: VizPoint2d<f32>,
    /// Rotation about the origin, in radians.
    pub rotation: f32,
    pub anchor: TextAnchor,
    pub color: VizColor,
    /// Font size in surface pixels.
    pub size: f32,
    pub bold: bool,
}

/// A shape that can be rendered on a wheel surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelShape {
    Sector(VizSector),
    Text(TextRun),
}

/// The raw angular/radial extent of a sector, kept alongside the Bézier
/// geometry so interaction can resolve a rendered element back to data.
/// Angles are degrees in date space (0° = January 1st), normalized to
/// `[0, 360)`; the canvas correction and wheel rotation are applied only
/// when geometry is built.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectorBounds {
    pub start_angle: f32,
    pub end_angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl SectorBounds {
    pub fn new(start_angle: f32, end_angle: f32, inner_radius: f32, outer_radius: f32) -> SectorBounds {
        SectorBounds {
            start_angle,
            end_angle,
            inner_radius,
            outer_radius,
        }
    }

    pub fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Angular span in degrees, wraparound-safe.
    pub fn span(&self) -> f32 {
        let span = self.end_angle - self.start_angle;
        if span < 0.0 {
            span + 360.0
        }
        else {
            span
        }
    }
}

/// The element vocabulary of the wheel draw program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Non-interactive decoration (hub, gridlines)
    #[default]
    Decor,
    /// The wheel title above the hub
    TitleText,
    /// The display year in the hub
    YearText,
    /// One of the four quarter arcs
    Season,
    /// A calendar event in the outer year-event band
    YearEvent,
    /// A month cell in the month-name band
    MonthCell,
    /// A week cell in the week band
    WeekCell,
    /// An item sector in an activity ring
    Activity,
    /// A ring name label
    RingName,
}

/// A [ElementInfo] carries the metadata needed to resolve a rendered element
/// back to the data that produced it, for hit testing and click anchors.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementInfo {
    pub kind: ElementKind,
    /// The item this element was produced from, if any.
    pub item_id: Option<String>,
    /// The ring the element belongs to, if any.
    pub ring_id: Option<String>,
    /// Member item ids when this element is a cluster.
    pub members: Vec<String>,
    /// Raw sector extent, present for every sector-backed element.
    pub bounds: Option<SectorBounds>,
}

impl ElementInfo {
    pub fn decor() -> ElementInfo {
        ElementInfo::default()
    }
}

/// A [WheelElement] is one display list entry: a shape plus fill color,
/// render flags and back-reference metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelElement {
    pub shape: WheelShape,
    pub color: VizColor,
    pub flags: ElementFlags,
    pub info:  ElementInfo,
}

impl WheelElement {
    pub fn new(shape: impl Into<WheelShape>, color: VizColor, flags: ElementFlags, info: ElementInfo) -> WheelElement {
        WheelElement {
            shape: shape.into(),
            color,
            flags,
            info,
        }
    }
}

impl From<VizSector> for WheelShape {
    #[inline]
    fn from(sector: VizSector) -> WheelShape {
        WheelShape::Sector(sector)
    }
}

impl From<TextRun> for WheelShape {
    #[inline]
    fn from(run: TextRun) -> WheelShape {
        WheelShape::Text(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_arc_is_single_segment() {
        let center = VizPoint2d::new(0.0, 0.0);
        let chain = VizArc::chain_from_angles(&center, 100.0, 0.0, FRAC_PI_2);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn full_circle_splits_into_quadrants() {
        let center = VizPoint2d::new(0.0, 0.0);
        let chain = VizArc::chain_from_angles(&center, 100.0, 0.0, std::f32::consts::TAU);
        assert_eq!(chain.len(), 4);
        // Segment endpoints chain head to tail
        for pair in chain.windows(2) {
            assert!((pair[0].end.x - pair[1].start.x).abs() < 1e-3);
            assert!((pair[0].end.y - pair[1].start.y).abs() < 1e-3);
        }
    }

    #[test]
    fn sector_outer_runs_forward_inner_backward() {
        let center = VizPoint2d::new(0.0, 0.0);
        let sector = VizSector::from_angles(&center, 0.0, 1.0, 50.0, 100.0);
        let outer_first = sector.outer.first().unwrap();
        let inner_first = sector.inner.first().unwrap();
        // Outer starts at angle 0 on the outer radius
        assert!((outer_first.start.x - 100.0).abs() < 1e-3);
        // Inner starts at the end angle on the inner radius
        assert!((inner_first.start.x - 50.0 * 1.0f32.cos()).abs() < 1e-3);
    }

    #[test]
    fn bounds_span_wraps() {
        let b = SectorBounds::new(350.0, 10.0, 0.0, 1.0);
        assert!((b.span() - 20.0).abs() < 1e-6);
    }
}
