//! Scrolling through the controller: scroll units, viewport normalization,
//! scrollbar state and the wheel, key and scrollbar input handlers.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{pump, Harness, MockBackend, Table};
use gridtable::config::{DynamicConfig, TableOptions, ViewportPosition, UNMEASURED};
use gridtable::layout::{KeyInput, NavKey, ScrollbarInput, WheelInput};
use gridtable::structure::StructureController;
use gridtable::types::{Axis, CellKind, LayoutCellKind, Surface};
use gridtable::ScrollUnit;
use test_case::test_case;

/// 400x205 viewport over 100 rows of 20px and 20 columns of 50px.
fn table(h: &Harness, options: TableOptions) -> Table {
    h.rendered(options, DynamicConfig::uniform(100, 20, 20, 50))
}

fn position(table: &Table) -> (usize, usize) {
    let v = table.dynamic_config().viewport;
    (v.row_index, v.col_index)
}

fn wrapper_y(h: &Harness, table: &Table, row: usize) -> i32 {
    let slot = table
        .layout(Surface::Content)
        .unwrap()
        .cell(LayoutCellKind::Regular, row, 0)
        .unwrap();
    h.dom.node(slot.wrapper).rect.unwrap().y
}

// ============================================================================
// Scroll units
// ============================================================================

#[test]
fn test_page_down_moves_by_whole_rows_that_fit() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.scroll(Axis::Row, ScrollUnit::Page, 1.0);

    // ten 20px rows fit 205px
    assert_eq!(position(&t), (10, 0));
    assert!(t.pending_frame().is_some());
}

#[test]
fn test_scroll_to_end_is_idempotent() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.scroll(Axis::Row, ScrollUnit::Absolute, 1.0);
    assert_eq!(position(&t), (90, 0));
    t.scroll(Axis::Row, ScrollUnit::Absolute, 1.0);
    assert_eq!(position(&t), (90, 0));
    assert!(pump(&mut t));

    // the last row ends flush with the viewport: 10 rows, 200px
    assert_eq!(t.dynamic_config().viewport.row_pixel_offset, 0);
    assert_eq!(wrapper_y(&h, &t, 99), 180);

    t.scroll(Axis::Row, ScrollUnit::Absolute, 0.0);
    assert_eq!(position(&t), (0, 0));
}

#[test]
fn test_page_past_end_clamps() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.scroll(Axis::Row, ScrollUnit::Page, 20.0);
    assert_eq!(position(&t), (90, 0));
    t.scroll(Axis::Row, ScrollUnit::Line, -200.0);
    assert_eq!(position(&t), (0, 0));
}

#[test]
fn test_columns_scroll_independently() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.scroll(Axis::Column, ScrollUnit::Line, 3.0);
    assert_eq!(position(&t), (0, 3));
    t.scroll(Axis::Column, ScrollUnit::Absolute, 1.0);
    // eight 50px columns fit 400px
    assert_eq!(position(&t), (0, 12));
}

#[test]
fn test_absolute_middle_rounds() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());
    t.scroll(Axis::Row, ScrollUnit::Absolute, 0.5);
    assert_eq!(position(&t), (45, 0));
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_render_keeps_pixel_offset() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.set_viewport(ViewportPosition {
        row_index: 3,
        row_pixel_offset: 5,
        ..ViewportPosition::TOP_LEFT
    });
    assert!(pump(&mut t));

    assert_eq!(t.dynamic_config().viewport.row_pixel_offset, 5);
    assert_eq!(wrapper_y(&h, &t, 3), -5);

    t.scroll(Axis::Row, ScrollUnit::Line, 1.0);
    assert_eq!(position(&t), (4, 0));
    assert_eq!(t.dynamic_config().viewport.row_pixel_offset, 0);
}

#[test]
fn test_excess_offset_rolls_into_index() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.set_viewport(ViewportPosition {
        row_index: 0,
        row_pixel_offset: 45,
        col_index: 1,
        col_pixel_offset: -10,
    });
    assert!(pump(&mut t));

    let v = t.dynamic_config().viewport;
    assert_eq!((v.row_index, v.row_pixel_offset), (2, 5));
    assert_eq!((v.col_index, v.col_pixel_offset), (0, 40));
}

#[test]
fn test_viewport_past_last_page_is_clamped() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    t.set_viewport(ViewportPosition {
        row_index: 95,
        row_pixel_offset: 3,
        ..ViewportPosition::TOP_LEFT
    });
    assert!(pump(&mut t));

    let v = t.dynamic_config().viewport;
    assert_eq!((v.row_index, v.row_pixel_offset), (90, 0));
}

#[test]
fn test_unmeasured_rows_are_measured_on_demand() {
    let h = Harness::new(400, 205);
    let calls: Rc<RefCell<Vec<(Axis, usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let recorded = Rc::clone(&calls);
    let config = h
        .static_config(TableOptions::default())
        .with_measure(move |axis, start, sizes: &mut [i32]| {
            recorded.borrow_mut().push((axis, start, sizes.len()));
            for size in sizes.iter_mut().take(5) {
                *size = 25;
            }
        });
    let dynamic = DynamicConfig::new(vec![UNMEASURED; 100], vec![50; 20]);
    let mut t = StructureController::new(config, dynamic, MockBackend { dom: h.dom.clone() }).unwrap();
    assert!(pump(&mut t));

    let calls = calls.borrow();
    assert!(!calls.is_empty());
    assert!(calls.iter().all(|(axis, _, _)| *axis == Axis::Row));
    // the layout measures forward from the first visible row
    assert!(calls.contains(&(Axis::Row, 0, 100)));

    let heights = t.dynamic_config().row_heights();
    assert!(heights[..9].iter().all(|&height| height == 25));
    assert_eq!(heights[50], UNMEASURED);

    let regular = h.log().requests_of(CellKind::Regular);
    assert!(regular.iter().all(|r| r.height == 24));
}

// ============================================================================
// Scrollbars
// ============================================================================

#[test]
fn test_scrollbar_reflects_position_and_thumb() {
    let h = Harness::new(400, 205);
    let options = TableOptions {
        v_scrollbar_visible: true,
        ..TableOptions::default()
    };
    let mut t = table(&h, options);

    let bar = h.dom.scrollbar(Axis::Row).unwrap();
    assert_eq!(bar.value, 0.0);
    assert_eq!(bar.thumb_size, 205.0 / 2000.0);
    assert!(bar.updates >= 1);

    t.scroll(Axis::Row, ScrollUnit::Page, 1.0);
    assert_eq!(h.dom.scrollbar(Axis::Row).unwrap().value, 10.0 / 90.0);

    t.scroll(Axis::Row, ScrollUnit::Absolute, 1.0);
    assert_eq!(h.dom.scrollbar(Axis::Row).unwrap().value, 1.0);
}

#[test]
fn test_scrollbar_input_scrolls_its_axis() {
    let h = Harness::new(400, 205);
    let options = TableOptions {
        v_scrollbar_visible: true,
        h_scrollbar_visible: true,
        ..TableOptions::default()
    };
    let mut t = table(&h, options);

    assert!(t.handle_scrollbar(Axis::Column, &ScrollbarInput::Step(2.0)));
    assert_eq!(position(&t), (0, 2));
    assert!(t.handle_scrollbar(Axis::Row, &ScrollbarInput::Page(1.0)));
    assert!(t.dynamic_config().viewport.row_index > 0);
    assert!(t.handle_scrollbar(Axis::Row, &ScrollbarInput::Value(0.0)));
    assert_eq!(position(&t), (0, 2));
}

// ============================================================================
// Input handlers
// ============================================================================

#[test]
fn test_wheel_pages_rows_then_columns() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());

    assert!(t.handle_wheel(&WheelInput {
        delta_x: 0.0,
        delta_y: 120.0
    }));
    assert_eq!(position(&t), (10, 0));

    assert!(t.handle_wheel(&WheelInput {
        delta_x: 0.0,
        delta_y: -3.0
    }));
    assert_eq!(position(&t), (0, 0));

    assert!(t.handle_wheel(&WheelInput {
        delta_x: 1.0,
        delta_y: 0.0
    }));
    assert_eq!(position(&t), (0, 8));
}

#[test]
fn test_still_wheel_is_not_consumed() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());
    assert!(!t.handle_wheel(&WheelInput::default()));
    assert!(t.pending_frame().is_none());
}

#[test_case(NavKey::ArrowDown, false, (1, 0) ; "arrow down")]
#[test_case(NavKey::ArrowUp, false, (0, 0) ; "arrow up at top")]
#[test_case(NavKey::ArrowRight, false, (0, 1) ; "arrow right")]
#[test_case(NavKey::PageDown, false, (10, 0) ; "page down")]
#[test_case(NavKey::End, false, (90, 0) ; "end")]
#[test_case(NavKey::End, true, (0, 12) ; "ctrl end")]
#[test_case(NavKey::Home, false, (0, 0) ; "home")]
fn test_key_navigation(key: NavKey, ctrl: bool, expected: (usize, usize)) {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());
    assert!(t.handle_key(&KeyInput { key, ctrl }));
    assert_eq!(position(&t), expected);
}

#[test]
fn test_input_ignored_after_dispose() {
    let h = Harness::new(400, 205);
    let mut t = table(&h, TableOptions::default());
    t.dispose();

    assert!(!t.handle_wheel(&WheelInput {
        delta_x: 0.0,
        delta_y: 1.0
    }));
    assert!(!t.handle_key(&KeyInput {
        key: NavKey::PageDown,
        ctrl: false
    }));
    assert_eq!(position(&t), (0, 0));
}
