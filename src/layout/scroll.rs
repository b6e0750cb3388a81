//! Index-based scrolling.
//!
//! The viewport is addressed by the index of the first visible element plus a
//! pixel offset into it. Scrolling moves the index in whole elements; only a
//! no-op scroll keeps the pixel offset.

use std::str::FromStr;

use crate::config::MeasureFn;
use crate::error::TableError;
use crate::layout::resolve_size;
use crate::types::Axis;

/// Unit of a scroll command's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollUnit {
    /// Re-derive scrollbar state without moving.
    None,
    /// Signed number of elements.
    Line,
    /// Signed number of pages (as many elements as fit the viewport).
    Page,
    /// Fraction of the scroll range, 0 = start, 1 = end.
    Absolute,
}

impl FromStr for ScrollUnit {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "line" => Ok(Self::Line),
            "page" => Ok(Self::Page),
            "absolute" => Ok(Self::Absolute),
            _ => Err(TableError::Config(format!("Unknown scroll unit {s:?}"))),
        }
    }
}

/// Input of a scroll engine for one axis.
pub struct ScrollInput<'a> {
    pub axis: Axis,
    pub unit: ScrollUnit,
    pub value: f64,
    pub top_index: usize,
    pub pixel_offset: i32,
    /// Client extent of the content surface along the axis.
    pub viewport_extent: i32,
    pub sizes: &'a mut [i32],
    pub measure: Option<&'a mut MeasureFn>,
}

/// Result of a scroll engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOutput {
    pub top_index: usize,
    pub pixel_offset: i32,
    /// Scrollbar value in 0..=1.
    pub scrollbar_position: f64,
    /// Scrollbar thumb size as a fraction of the track, in 0..=1.
    pub thumb_size: f64,
}

/// Scroll algorithm for one axis.
pub trait ScrollEngine {
    fn process(&self, input: ScrollInput<'_>) -> ScrollOutput;
}

/// Scroll engine moving in whole elements.
///
/// The top index never exceeds the smallest index from which the remaining
/// elements fit the viewport, so scrolling to the end shows the last element
/// flush with the trailing edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScroll;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.round() as usize
    } else {
        0
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: usize) -> f64 {
    value as f64
}

impl StandardScroll {
    /// Smallest top index whose tail fits `extent`.
    fn max_top(
        sizes: &mut [i32],
        extent: i32,
        axis: Axis,
        mut measure: Option<&mut MeasureFn>,
    ) -> usize {
        let count = sizes.len();
        let mut used: i64 = 0;
        let mut top = count;
        while top > 0 {
            let size = resolve_size(sizes, top - 1, axis, measure.as_deref_mut());
            if used + i64::from(size) > i64::from(extent) {
                break;
            }
            used += i64::from(size);
            top -= 1;
        }
        top.min(count.saturating_sub(1))
    }

    /// Number of whole elements starting at `top` (going forward) or ending
    /// before `top` (going back) that fit `extent`, at least 1.
    fn page_len(
        sizes: &mut [i32],
        top: usize,
        forward: bool,
        extent: i32,
        axis: Axis,
        mut measure: Option<&mut MeasureFn>,
    ) -> usize {
        let mut used: i64 = 0;
        let mut n = 0;
        loop {
            let index = if forward {
                top + n
            } else {
                match top.checked_sub(n + 1) {
                    Some(i) => i,
                    None => break,
                }
            };
            if index >= sizes.len() {
                break;
            }
            let size = resolve_size(sizes, index, axis, measure.as_deref_mut());
            if used + i64::from(size) > i64::from(extent) {
                break;
            }
            used += i64::from(size);
            n += 1;
        }
        n.max(1)
    }

    /// Total size with unmeasured entries estimated by the measured average.
    fn estimated_total(sizes: &[i32]) -> f64 {
        let (sum, known) = sizes
            .iter()
            .filter(|s| **s >= 0)
            .fold((0.0, 0usize), |(sum, n), s| (sum + f64::from(*s), n + 1));
        if known == 0 {
            return 0.0;
        }
        let unknown = sizes.len() - known;
        sum + sum / as_f64(known) * as_f64(unknown)
    }
}

impl ScrollEngine for StandardScroll {
    fn process(&self, input: ScrollInput<'_>) -> ScrollOutput {
        let ScrollInput {
            axis,
            unit,
            value,
            top_index,
            pixel_offset,
            viewport_extent,
            sizes,
            mut measure,
        } = input;

        let max_top = Self::max_top(sizes, viewport_extent, axis, measure.as_deref_mut());
        let current = top_index.min(max_top);

        let top = match unit {
            ScrollUnit::None => current,
            ScrollUnit::Line => {
                let steps = to_count(value.abs());
                if value < 0.0 {
                    current.saturating_sub(steps)
                } else {
                    current.saturating_add(steps)
                }
            }
            ScrollUnit::Page => {
                let forward = value > 0.0;
                let mut top = current;
                for _ in 0..to_count(value.abs()) {
                    let len = Self::page_len(
                        sizes,
                        top,
                        forward,
                        viewport_extent,
                        axis,
                        measure.as_deref_mut(),
                    );
                    top = if forward {
                        top.saturating_add(len).min(max_top)
                    } else {
                        top.saturating_sub(len)
                    };
                }
                top
            }
            ScrollUnit::Absolute => to_count(value.clamp(0.0, 1.0) * as_f64(max_top)),
        }
        .min(max_top);

        let pixel_offset = if unit == ScrollUnit::None && top == top_index {
            pixel_offset
        } else {
            0
        };

        let total = Self::estimated_total(sizes);
        ScrollOutput {
            top_index: top,
            pixel_offset,
            scrollbar_position: if max_top == 0 {
                0.0
            } else {
                as_f64(top) / as_f64(max_top)
            },
            thumb_size: if total > 0.0 {
                (f64::from(viewport_extent) / total).clamp(0.0, 1.0)
            } else {
                1.0
            },
        }
    }
}

/// Scroll request produced by an input decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub axis: Axis,
    pub unit: ScrollUnit,
    pub value: f64,
}

impl ScrollCommand {
    pub fn new(axis: Axis, unit: ScrollUnit, value: f64) -> Self {
        Self { axis, unit, value }
    }
}

/// Wheel deltas in any unit; only their sign is used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
}

/// Navigation keys the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: NavKey,
    pub ctrl: bool,
}

/// Value change reported by a scrollbar widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollbarInput {
    /// Thumb dragged to a position in 0..=1.
    Value(f64),
    /// Arrow button, signed element count.
    Step(f64),
    /// Track click, signed page count.
    Page(f64),
}

/// Scrollbar widget controlled by the table.
pub trait ScrollbarWidget {
    fn set_value(&mut self, value: f64);
    fn set_thumb_size(&mut self, size: f64);
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// A wheel notch pages vertically; a purely horizontal wheel pages columns.
pub fn decode_wheel(input: &WheelInput) -> Option<ScrollCommand> {
    let dy = sign(input.delta_y);
    let dx = sign(input.delta_x);
    if dy != 0.0 {
        Some(ScrollCommand::new(Axis::Row, ScrollUnit::Page, dy))
    } else if dx != 0.0 {
        Some(ScrollCommand::new(Axis::Column, ScrollUnit::Page, dx))
    } else {
        None
    }
}

/// Arrows step one element, PageUp/PageDown page rows, Home/End jump to the
/// first/last row (columns with Ctrl).
pub fn decode_key(input: &KeyInput) -> ScrollCommand {
    let home_end_axis = if input.ctrl { Axis::Column } else { Axis::Row };
    match input.key {
        NavKey::ArrowUp => ScrollCommand::new(Axis::Row, ScrollUnit::Line, -1.0),
        NavKey::ArrowDown => ScrollCommand::new(Axis::Row, ScrollUnit::Line, 1.0),
        NavKey::ArrowLeft => ScrollCommand::new(Axis::Column, ScrollUnit::Line, -1.0),
        NavKey::ArrowRight => ScrollCommand::new(Axis::Column, ScrollUnit::Line, 1.0),
        NavKey::PageUp => ScrollCommand::new(Axis::Row, ScrollUnit::Page, -1.0),
        NavKey::PageDown => ScrollCommand::new(Axis::Row, ScrollUnit::Page, 1.0),
        NavKey::Home => ScrollCommand::new(home_end_axis, ScrollUnit::Absolute, 0.0),
        NavKey::End => ScrollCommand::new(home_end_axis, ScrollUnit::Absolute, 1.0),
    }
}

pub fn decode_scrollbar(axis: Axis, input: &ScrollbarInput) -> ScrollCommand {
    match *input {
        ScrollbarInput::Value(v) => ScrollCommand::new(axis, ScrollUnit::Absolute, v),
        ScrollbarInput::Step(n) => ScrollCommand::new(axis, ScrollUnit::Line, n),
        ScrollbarInput::Page(n) => ScrollCommand::new(axis, ScrollUnit::Page, n),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::UNMEASURED;

    fn run(sizes: &mut [i32], extent: i32, top: usize, unit: ScrollUnit, value: f64) -> ScrollOutput {
        StandardScroll.process(ScrollInput {
            axis: Axis::Row,
            unit,
            value,
            top_index: top,
            pixel_offset: 7,
            viewport_extent: extent,
            sizes,
            measure: None,
        })
    }

    #[test]
    fn test_page_forward_fits_whole_rows() {
        let mut sizes = [20; 1000];
        let out = run(&mut sizes, 205, 0, ScrollUnit::Page, 1.0);
        assert_eq!(out.top_index, 10);
        assert_eq!(out.pixel_offset, 0);
    }

    #[test]
    fn test_page_back_is_symmetric() {
        let mut sizes = [20; 1000];
        let out = run(&mut sizes, 205, 25, ScrollUnit::Page, -1.0);
        assert_eq!(out.top_index, 15);
        let out = run(&mut sizes, 205, 5, ScrollUnit::Page, -1.0);
        assert_eq!(out.top_index, 0);
    }

    #[test]
    fn test_oversized_element_still_pages_one() {
        let mut sizes = [500, 500, 500];
        let out = run(&mut sizes, 100, 0, ScrollUnit::Page, 1.0);
        assert_eq!(out.top_index, 1);
    }

    #[test]
    fn test_absolute_end_and_start() {
        let mut sizes = [20; 100];
        let end = run(&mut sizes, 200, 0, ScrollUnit::Absolute, 1.0);
        assert_eq!(end.top_index, 90);
        assert_eq!(end.scrollbar_position, 1.0);

        let start = run(&mut sizes, 200, end.top_index, ScrollUnit::Absolute, 0.0);
        assert_eq!(start.top_index, 0);
        assert_eq!(start.pixel_offset, 0);
        assert_eq!(start.scrollbar_position, 0.0);
    }

    #[test]
    fn test_line_clamps_to_range() {
        let mut sizes = [20; 10];
        assert_eq!(run(&mut sizes, 100, 0, ScrollUnit::Line, -3.0).top_index, 0);
        assert_eq!(run(&mut sizes, 100, 4, ScrollUnit::Line, 50.0).top_index, 5);
        assert_eq!(run(&mut sizes, 100, 2, ScrollUnit::Line, 1.0).top_index, 3);
    }

    #[test]
    fn test_none_keeps_offset_and_clamps_index() {
        let mut sizes = [20; 10];
        let kept = run(&mut sizes, 100, 3, ScrollUnit::None, 0.0);
        assert_eq!((kept.top_index, kept.pixel_offset), (3, 7));

        let clamped = run(&mut sizes, 100, 9, ScrollUnit::None, 0.0);
        assert_eq!((clamped.top_index, clamped.pixel_offset), (5, 0));
    }

    #[test]
    fn test_everything_fits() {
        let mut sizes = [20; 3];
        let out = run(&mut sizes, 100, 0, ScrollUnit::Page, 1.0);
        assert_eq!(out.top_index, 0);
        assert_eq!(out.scrollbar_position, 0.0);
        assert_eq!(out.thumb_size, 1.0);
    }

    #[test]
    fn test_empty_axis() {
        let mut sizes: [i32; 0] = [];
        let out = run(&mut sizes, 100, 4, ScrollUnit::Line, 1.0);
        assert_eq!(out.top_index, 0);
        assert_eq!(out.thumb_size, 1.0);
    }

    #[test]
    fn test_thumb_estimates_unmeasured() {
        let mut sizes = [10, 30, UNMEASURED, UNMEASURED];
        let total = StandardScroll::estimated_total(&sizes);
        assert_eq!(total, 80.0);
        let out = run(&mut sizes, 20, 0, ScrollUnit::None, 0.0);
        assert_eq!(out.thumb_size, 0.25);
    }

    #[test]
    fn test_decode_wheel_sign() {
        let down = decode_wheel(&WheelInput {
            delta_x: 0.0,
            delta_y: 120.0,
        });
        assert_eq!(down, Some(ScrollCommand::new(Axis::Row, ScrollUnit::Page, 1.0)));
        let left = decode_wheel(&WheelInput {
            delta_x: -3.0,
            delta_y: 0.0,
        });
        assert_eq!(left, Some(ScrollCommand::new(Axis::Column, ScrollUnit::Page, -1.0)));
        assert_eq!(decode_wheel(&WheelInput::default()), None);
    }

    #[test]
    fn test_decode_keys() {
        let key = |key, ctrl| decode_key(&KeyInput { key, ctrl });
        assert_eq!(
            key(NavKey::ArrowLeft, false),
            ScrollCommand::new(Axis::Column, ScrollUnit::Line, -1.0)
        );
        assert_eq!(
            key(NavKey::End, false),
            ScrollCommand::new(Axis::Row, ScrollUnit::Absolute, 1.0)
        );
        assert_eq!(
            key(NavKey::Home, true),
            ScrollCommand::new(Axis::Column, ScrollUnit::Absolute, 0.0)
        );
        assert_eq!(NavKey::from_key_name("PageDown"), Some(NavKey::PageDown));
        assert_eq!(NavKey::from_key_name("Enter"), None);
    }

    #[test]
    fn test_scroll_unit_from_str() {
        assert_eq!("page".parse::<ScrollUnit>().ok(), Some(ScrollUnit::Page));
        assert!("pixel".parse::<ScrollUnit>().is_err());
    }

    #[test]
    fn test_decode_scrollbar() {
        assert_eq!(
            decode_scrollbar(Axis::Column, &ScrollbarInput::Value(0.5)),
            ScrollCommand::new(Axis::Column, ScrollUnit::Absolute, 0.5)
        );
        assert_eq!(
            decode_scrollbar(Axis::Row, &ScrollbarInput::Page(-1.0)).unit,
            ScrollUnit::Page
        );
    }
}
