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

//! The wheel structure: rings, activity groups, labels and items for one
//! display year, as delivered by the external data layer. Dates arrive as
//! ISO-8601 strings and are parsed during segmentation; an item with an
//! unparsable date is excluded from the pass, never a reason to abort it.

/// The placement of a ring relative to the reserved calendar bands. The
/// external data layer stores the kind as a lowercase string.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RingKind {
    #[default]
    Inner,
    Outer,
}

/// Controls how the list text strategy lays out free-form labels inside a
/// ring: `Vertical` distributes lines along the sector arc, `Horizontal`
/// stacks them at the sector mid-angle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RingOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// One concentric band holding same-kind items. Authored externally and
/// read-only to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Ring {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: RingKind,
    pub visible: bool,
    pub orientation: RingOrientation,
}

/// An activity group determines the fill color of its member items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActivityGroup {
    pub id: String,
    pub name: String,
    /// Hex color string, e.g. `#36C5F0`.
    pub color: String,
    pub visible: bool,
}

/// An optional secondary tag on an item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
    pub visible: bool,
}

/// A dated activity. Items sharing a `cross_year_group_id` are segments of
/// one logical activity spanning a year boundary across paged year documents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub ring_id: String,
    pub activity_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_id: Option<String>,
    /// ISO-8601 date string (`YYYY-MM-DD`).
    pub start_date: String,
    /// ISO-8601 date string (`YYYY-MM-DD`).
    pub end_date: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cross_year_group_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
}

/// Aggregate of everything the engine needs to render one wheel. Items may
/// span multiple paged years; the cross-year segmenter scopes them to the
/// display year during composition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WheelStructure {
    pub rings: Vec<Ring>,
    pub activity_groups: Vec<ActivityGroup>,
    pub labels: Vec<Label>,
    pub items: Vec<Item>,
}

impl WheelStructure {
    /// Visible rings of the given kind, in authored order.
    pub fn visible_rings(&self, kind: RingKind) -> impl Iterator<Item = &Ring> {
        self.rings.iter().filter(move |r| r.visible && r.kind == kind)
    }

    pub fn ring(&self, id: &str) -> Option<&Ring> {
        self.rings.iter().find(|r| r.id == id)
    }

    pub fn activity_group(&self, id: &str) -> Option<&ActivityGroup> {
        self.activity_groups.iter().find(|a| a.id == id)
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ring_enums_round_trip_their_stored_strings() {
        assert_eq!(RingKind::from_str("outer").unwrap(), RingKind::Outer);
        assert_eq!(RingKind::Inner.to_string(), "inner");
        assert_eq!(RingOrientation::from_str("horizontal").unwrap(), RingOrientation::Horizontal);
        assert!(RingKind::from_str("sideways").is_err());
    }
}
