//! Tests for the tab drag state machine and drop resolution

mod common;

use common::{
    a, abc, b, c, d, down, keys, layout, move_to, start_drag, tab_center, test_model, up, wait,
    widths, Clock,
};
use shopdesk::commands::Cmd;
use shopdesk::messages::{LayoutMsg, Msg, PointerMsg};
use shopdesk::model::drag::{TRANSFER_PANEL_KEY, TRANSFER_PANEL_TYPE, TRANSFER_SOURCE_INDEX};
use shopdesk::model::{DragState, DropIndicator, Point};
use shopdesk::update::update;

// ============================================================================
// Press, click and threshold
// ============================================================================

#[test]
fn test_click_activates_tab() {
    let mut model = test_model(abc());
    let clock = Clock::new();
    let pos = tab_center(&model, 0, 1);

    down(&mut model, pos, &clock);
    assert!(matches!(model.drag, DragState::Armed(_)));

    let cmd = up(&mut model, pos, &clock);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.layout.groups()[0].active_index(), 1);
    assert!(model.drag.is_idle());
}

#[test]
fn test_small_movement_stays_armed() {
    let mut model = test_model(abc());
    let clock = Clock::new();
    let pos = tab_center(&model, 0, 0);

    down(&mut model, pos, &clock);
    move_to(&mut model, Point::new(pos.x + 2.0, pos.y + 1.0), &clock);
    assert!(matches!(model.drag, DragState::Armed(_)));

    move_to(&mut model, Point::new(pos.x + 10.0, pos.y), &clock);
    let session = model.session().unwrap();
    assert_eq!(session.panel.as_str(), "a");
    assert_eq!(session.source_group, 0);
    assert_eq!(session.source_index, 0);
    assert_eq!(session.transfer.get(TRANSFER_PANEL_TYPE), Some("shopParameters"));
}

#[test]
fn test_press_on_body_does_nothing() {
    let mut model = test_model(abc());
    let clock = Clock::new();
    assert_eq!(down(&mut model, Point::new(600.0, 400.0), &clock), None);
    assert!(model.drag.is_idle());
}

// ============================================================================
// Reorder within a group
// ============================================================================

#[test]
fn test_reorder_to_end_of_group() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    // Right of every tab, over the header: slot 3 resolves to index 2
    let target = Point::new(1000.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    assert_eq!(model.session().unwrap().slot, Some(3));
    assert_eq!(model.session().unwrap().resolved_index(), Some(2));

    let cmd = up(&mut model, target, &clock).unwrap();
    assert!(cmd.saves_layout());
    assert_eq!(model.layout.keys(), vec![vec!["b", "c", "a"]]);
    assert!(model.drag.is_idle());
}

#[test]
fn test_reorder_to_front_of_group() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    let target = Point::new(5.0, 16.0);
    start_drag(&mut model, 0, 2, target, &clock);
    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["c", "a", "b"]]);
    // The moved tab keeps the active one unchanged
    assert_eq!(model.layout.groups()[0].active_panel().unwrap().key.as_str(), "a");
}

#[test]
fn test_drop_on_own_position_is_noop() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    // Left half of b: slot 1, which for source 1 resolves to 1 again
    let b_tab = model.frames[0].tabs[1];
    let target = Point::new(b_tab.x + 5.0, 16.0);
    start_drag(&mut model, 0, 1, target, &clock);
    let cmd = up(&mut model, target, &clock);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.layout.keys(), vec![vec!["a", "b", "c"]]);
}

#[test]
fn test_tabs_shift_while_dragging() {
    let mut model = test_model(abc());
    let clock = Clock::new();
    let width_a = model.frames[0].tabs[0].width;

    start_drag(&mut model, 0, 0, Point::new(1000.0, 16.0), &clock);
    let offsets = model.session().unwrap().tab_offsets(0, 3);
    assert_eq!(offsets, vec![0.0, -width_a, -width_a]);
}

// ============================================================================
// Cross-group moves
// ============================================================================

#[test]
fn test_move_to_other_group_at_slot() {
    let mut model = test_model(layout(vec![vec![a(), b()], vec![c()]], &[5000, 5000]));
    let clock = Clock::new();

    // Just inside group 1's header, left of c's center
    let target = Point::new(610.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    assert_eq!(model.session().unwrap().target_group, Some(1));
    assert_eq!(model.session().unwrap().slot, Some(0));

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["b"], vec!["a", "c"]]);
    assert_eq!(model.layout.groups()[1].active_index(), 0);
    assert_eq!(widths(&model), vec![5000, 5000]);
}

#[test]
fn test_moving_last_tab_removes_group() {
    let mut model = test_model(layout(vec![vec![a()], vec![b(), c()]], &[4000, 6000]));
    let clock = Clock::new();

    let target = Point::new(1100.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    up(&mut model, target, &clock);

    assert_eq!(model.layout.keys(), vec![vec!["b", "c", "a"]]);
    assert_eq!(widths(&model), vec![10_000]);
    assert_eq!(model.frames.len(), 1);
}

// ============================================================================
// Splits
// ============================================================================

#[test]
fn test_right_edge_split_after_debounce() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    let target = Point::new(1190.0, 400.0);
    start_drag(&mut model, 0, 0, target, &clock);
    // Requested but not shown yet
    assert_eq!(model.indicator.current(), DropIndicator::None);
    assert!(model.indicator.has_pending());

    assert_eq!(wait(&mut model, &mut clock, 60), Some(Cmd::Redraw));
    assert_eq!(model.indicator.current(), DropIndicator::RightEdge(0));

    up(&mut model, target, &clock);
    assert_eq!(keys(&model), vec![vec!["b", "c"], vec!["a"]]);
    assert_eq!(widths(&model), vec![5000, 5000]);
    assert_eq!(model.indicator.current(), DropIndicator::None);
}

#[test]
fn test_release_before_debounce_does_not_split() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    let target = Point::new(1190.0, 400.0);
    start_drag(&mut model, 0, 0, target, &clock);
    clock.advance(20);
    up(&mut model, target, &clock);

    assert_eq!(model.layout.group_count(), 1);
    assert!(!model.indicator.has_pending());
}

#[test]
fn test_release_after_due_update_splits_without_tick() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    let target = Point::new(1190.0, 400.0);
    start_drag(&mut model, 0, 0, target, &clock);
    // The wake-up never arrives; the release itself is past the deadline
    clock.advance(60);
    assert_eq!(model.indicator.current(), DropIndicator::None);

    let cmd = up(&mut model, target, &clock).unwrap();
    assert!(cmd.saves_layout());
    assert_eq!(keys(&model), vec![vec!["b", "c"], vec!["a"]]);
    assert_eq!(model.indicator.current(), DropIndicator::None);
}

#[test]
fn test_left_edge_split() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    let target = Point::new(10.0, 400.0);
    start_drag(&mut model, 0, 2, target, &clock);
    wait(&mut model, &mut clock, 50);
    assert_eq!(model.indicator.current(), DropIndicator::LeftEdge(0));

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["c"], vec!["a", "b"]]);
}

#[test]
fn test_between_split_wins_over_cross_group_move() {
    let mut model = test_model(layout(
        vec![vec![a()], vec![b()], vec![c(), d()]],
        &[3333, 3333, 3334],
    ));
    let mut clock = Clock::new();

    // Near the left edge of the middle group, below the header
    let target = Point::new(410.0, 400.0);
    start_drag(&mut model, 2, 0, target, &clock);
    wait(&mut model, &mut clock, 60);
    assert_eq!(
        model.indicator.current(),
        DropIndicator::Between {
            group: 1,
            boundary: 1
        }
    );

    up(&mut model, target, &clock);
    assert_eq!(
        model.layout.keys(),
        vec![vec!["a"], vec!["c"], vec!["b"], vec!["d"]]
    );
    assert_eq!(widths(&model).iter().sum::<u32>(), 10_000);
    assert_eq!(widths(&model)[1], 2500);
}

#[test]
fn test_header_never_arms_split() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    let target = Point::new(1190.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    wait(&mut model, &mut clock, 60);
    assert_eq!(model.indicator.current(), DropIndicator::None);

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["b", "c", "a"]]);
}

#[test]
fn test_indicator_for_other_group_is_ignored() {
    let mut model = test_model(layout(vec![vec![a(), b()], vec![c()]], &[5000, 5000]));
    let mut clock = Clock::new();

    // Arm the right edge of group 1, then release over group 0's header
    start_drag(&mut model, 0, 0, Point::new(1190.0, 400.0), &clock);
    wait(&mut model, &mut clock, 60);
    assert_eq!(model.indicator.current(), DropIndicator::RightEdge(1));

    let release = Point::new(590.0, 16.0);
    up(&mut model, release, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["b", "a"], vec!["c"]]);
}

// ============================================================================
// Leave, cancel, aborted drops
// ============================================================================

#[test]
fn test_leave_clears_indicator_but_keeps_session() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    start_drag(&mut model, 0, 0, Point::new(1190.0, 400.0), &clock);
    wait(&mut model, &mut clock, 60);
    assert!(model.indicator.current().is_armed());

    update(&mut model, Msg::Pointer(PointerMsg::Leave));
    assert_eq!(model.indicator.current(), DropIndicator::None);
    assert!(model.drag.is_dragging());
    assert_eq!(model.session().unwrap().target_group, None);

    let target = Point::new(1000.0, 16.0);
    move_to(&mut model, target, &clock);
    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["b", "c", "a"]]);
}

#[test]
fn test_moving_outside_viewport_is_a_leave() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();

    start_drag(&mut model, 0, 0, Point::new(1190.0, 400.0), &clock);
    move_to(&mut model, Point::new(1300.0, 400.0), &clock);
    assert!(!model.indicator.has_pending());

    // The stale request never lands
    wait(&mut model, &mut clock, 60);
    assert_eq!(model.indicator.current(), DropIndicator::None);
    assert!(model.drag.is_dragging());
}

#[test]
fn test_cancel_clears_everything() {
    let mut model = test_model(abc());
    let mut clock = Clock::new();
    let before = model.layout.clone();

    start_drag(&mut model, 0, 0, Point::new(1190.0, 400.0), &clock);
    wait(&mut model, &mut clock, 60);
    move_to(&mut model, Point::new(10.0, 400.0), &clock);
    assert!(model.indicator.has_pending());

    update(&mut model, Msg::Pointer(PointerMsg::Cancel));
    assert!(model.drag.is_idle());
    assert_eq!(model.indicator.current(), DropIndicator::None);
    assert!(!model.indicator.has_pending());

    // A late tick has nothing to apply
    assert_eq!(wait(&mut model, &mut clock, 60), None);
    assert_eq!(model.layout, before);
}

#[test]
fn test_missing_payload_field_aborts_drop() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    let target = Point::new(1000.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    model
        .drag
        .session_mut()
        .unwrap()
        .transfer
        .remove(TRANSFER_PANEL_KEY);

    let cmd = up(&mut model, target, &clock);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.layout.keys(), vec![vec!["a", "b", "c"]]);
    assert!(model.drag.is_idle());
}

#[test]
fn test_unknown_panel_type_aborts_drop() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    let target = Point::new(1000.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    model
        .drag
        .session_mut()
        .unwrap()
        .transfer
        .set(TRANSFER_PANEL_TYPE, "salesChart");

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["a", "b", "c"]]);
    assert!(model.drag.is_idle());
}

#[test]
fn test_stale_source_index_aborts_drop() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    let target = Point::new(1000.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    model
        .drag
        .session_mut()
        .unwrap()
        .transfer
        .set(TRANSFER_SOURCE_INDEX, "7");

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["a", "b", "c"]]);
}

#[test]
fn test_layout_change_during_drag_aborts_drop() {
    let mut model = test_model(abc());
    let clock = Clock::new();

    let target = Point::new(1000.0, 16.0);
    start_drag(&mut model, 0, 0, target, &clock);
    update(
        &mut model,
        Msg::Layout(LayoutMsg::Reorder {
            group: 0,
            from: 0,
            to: 1,
        }),
    );
    assert_eq!(model.layout.keys(), vec![vec!["b", "a", "c"]]);

    up(&mut model, target, &clock);
    assert_eq!(model.layout.keys(), vec![vec!["b", "a", "c"]]);
    assert!(model.drag.is_idle());
}

// ============================================================================
// Splitter resize
// ============================================================================

#[test]
fn test_splitter_drag_resizes_adjacent_groups() {
    let mut model = test_model(layout(vec![vec![a(), b()], vec![c()]], &[5000, 5000]));
    let clock = Clock::new();

    down(&mut model, Point::new(600.0, 400.0), &clock);
    assert!(matches!(model.drag, DragState::Resizing(_)));

    move_to(&mut model, Point::new(660.0, 400.0), &clock);
    assert_eq!(widths(&model), vec![5500, 4500]);

    let cmd = up(&mut model, Point::new(660.0, 400.0), &clock).unwrap();
    assert!(cmd.saves_layout());
    assert!(model.drag.is_idle());
    assert_eq!(widths(&model), vec![5500, 4500]);
}

#[test]
fn test_splitter_drag_clamps_to_min_width() {
    let mut model = test_model(layout(vec![vec![a(), b()], vec![c()]], &[5000, 5000]));
    let clock = Clock::new();

    // Details needs 260px of the 1200px row
    down(&mut model, Point::new(600.0, 400.0), &clock);
    move_to(&mut model, Point::new(1150.0, 400.0), &clock);
    up(&mut model, Point::new(1150.0, 400.0), &clock);

    let right_px = model.frames[1].rect.width;
    assert!((right_px - 260.0).abs() < 0.5, "right group is {}px", right_px);
}
