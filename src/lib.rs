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

//! # YearWheel engine
//!
//! `yearwheel` is the layout and rendering core of the YearWheel planner: it
//! projects a year of dated activities, organized into concentric rings, onto
//! a polar coordinate space and emits a backend-agnostic display list.
//!
//! The general principle is that a display year is rendered on a circle where
//! angle 0 corresponds to January 1st and angles grow clockwise through the
//! year. The engine itself never draws; [compose::build_display_list] is a
//! pure function from a [types::WheelStructure] and a [types::WheelOptions]
//! snapshot to a [viz::WheelDisplayList], which the backend crates interpret:
//!
//! - The `yearwheel_tiny_skia` crate rasterizes display lists into pixmaps.
//! - The `yearwheel_svg` crate serializes display lists to SVG documents.
//! - The `yearwheel_export` crate runs the same display list against both
//!   backends to produce PNG/JPEG/SVG artifacts that are guaranteed to match
//!   the on-screen rendering.
//!
//! Interaction is resolved back to data through the geometry recorded in the
//! display list (see [interact]); the engine emits command objects to a
//! caller-supplied event sink and never mutates items itself.

pub mod angle;
pub mod animate;
pub mod compose;
pub mod interact;
pub mod layout;
pub mod prelude;
pub mod segment;
pub mod text;
pub mod types;
pub mod viz;
pub mod wheel;

use std::hash::RandomState;

use thiserror::Error;

#[allow(unused)]
pub type WheelHashMap<K, V, S = RandomState> = std::collections::HashMap<K, V, S>;
#[allow(unused)]
pub type WheelHashSet<T, S = RandomState> = std::collections::HashSet<T, S>;

#[derive(Debug, Error)]
pub enum WheelRenderError {
    #[error("The wheel structure contains no visible rings")]
    NoVisibleRings,
    #[error("The options record contains an empty color palette")]
    EmptyPalette,
    #[error("Invalid dimensions were specified for the render surface")]
    InvalidDimensions,
    #[error("The supplied font data could not be parsed")]
    BadFontData,
}
