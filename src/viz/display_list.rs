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

//! A [WheelDisplayList] is a list of [WheelElement] objects to be rendered,
//! grouped by band so draw order (backgrounds first, text last) is a property
//! of the list rather than of the backends.

use crate::viz::shapes::{VizDimensions, VizPoint2d, WheelElement};

/// A [WheelDisplayList] is the output of one run of the draw program: every
/// element of the wheel, in paint order, plus the surface dimensions and
/// wheel center both backends must agree on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelDisplayList {
    /// Pixel dimensions of the surface this list was composed for.
    pub dimensions: VizDimensions,
    /// Wheel center on the surface; rotation transforms pivot here.
    pub center: VizPoint2d<f32>,
    bands: Vec<Vec<WheelElement>>,
}

impl WheelDisplayList {
    pub fn new(dimensions: VizDimensions, center: VizPoint2d<f32>, band_count: usize) -> WheelDisplayList {
        WheelDisplayList {
            dimensions,
            center,
            bands: vec![Vec::new(); band_count],
        }
    }

    /// Push a [WheelElement] onto the display list at the specified band.
    /// If the band does not exist, nothing will happen.
    pub fn push(&mut self, band: usize, element: WheelElement) {
        if band < self.bands.len() {
            self.bands[band].push(element);
        }
        else {
            log::debug!("push(): band {} out of range ({})", band, self.bands.len());
        }
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Return the total number of [WheelElement]s in the display list.
    pub fn len(&self) -> usize {
        self.bands.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a slice of the items in the display list at the specified band.
    pub fn band(&self, band: usize) -> Option<&[WheelElement]> {
        self.bands.get(band).map(|b| b.as_slice())
    }

    /// Return an Iterator that yields all the [WheelElement]s in the display
    /// list, in paint order, by band.
    pub fn iter(&self) -> WheelDisplayListIter {
        let mut outer = self.bands.iter();
        // Initialize inner iterator with the first band
        let inner = outer.next().map(|v| v.iter());
        WheelDisplayListIter { outer, inner }
    }
}

// Iterator struct
pub struct WheelDisplayListIter<'a> {
    outer: std::slice::Iter<'a, Vec<WheelElement>>,
    inner: Option<std::slice::Iter<'a, WheelElement>>,
}

impl<'a> Iterator for WheelDisplayListIter<'a> {
    type Item = &'a WheelElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = &mut self.inner {
                if let Some(next_item) = inner.next() {
                    return Some(next_item);
                }
            }

            // Move to the next outer band if the current inner is exhausted
            self.inner = self.outer.next().map(|v| v.iter());

            // If there are no more bands, break out
            if self.inner.is_none() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::{
        color::VizColor,
        shapes::{ElementFlags, ElementInfo, VizSector, WheelElement},
    };

    fn sector_element() -> WheelElement {
        let sector = VizSector::from_angles(&VizPoint2d::new(0.0, 0.0), 0.0, 1.0, 10.0, 20.0);
        WheelElement::new(sector, VizColor::WHITE, ElementFlags::NONE, ElementInfo::decor())
    }

    #[test]
    fn iteration_spans_bands_in_order() {
        let mut list = WheelDisplayList::new(VizDimensions::new(100, 100), VizPoint2d::new(50.0, 50.0), 3);
        list.push(2, sector_element());
        list.push(0, sector_element());
        list.push(0, sector_element());

        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().count(), 3);
        assert_eq!(list.band(0).unwrap().len(), 2);
        assert_eq!(list.band(1).unwrap().len(), 0);
        assert_eq!(list.band(2).unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_band_is_ignored() {
        let mut list = WheelDisplayList::new(VizDimensions::new(100, 100), VizPoint2d::new(50.0, 50.0), 1);
        list.push(5, sector_element());
        assert!(list.is_empty());
    }
}
