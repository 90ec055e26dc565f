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

//! Backend-agnostic visualization primitives: geometry shapes, colors and
//! the display list the backends interpret. Sector fills are expressed as
//! cubic Bézier approximations of circular arcs so both the raster and the
//! vector backend consume identical path geometry.

pub mod color;
pub mod display_list;
pub mod shapes;

pub use color::VizColor;
pub use display_list::{WheelDisplayList, WheelDisplayListIter};
pub use shapes::{
    ElementFlags,
    ElementInfo,
    ElementKind,
    SectorBounds,
    TextAnchor,
    TextRun,
    VizArc,
    VizDimensions,
    VizPoint2d,
    VizRect,
    VizSector,
    WheelElement,
    WheelShape,
};
