//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use shopdesk::commands::Cmd;
use shopdesk::config::WorkspaceConfig;
use shopdesk::messages::{Msg, PointerMsg};
use shopdesk::model::{Layout, Panel, PanelKind, Point, Rect, Width, WorkspaceModel};
use shopdesk::update::update;

pub const VIEWPORT_WIDTH: f32 = 1200.0;
pub const VIEWPORT_HEIGHT: f32 = 800.0;

/// Panels `a`, `b`, `c` with distinct kinds
pub fn a() -> Panel {
    Panel::new("a", PanelKind::ShopParameters)
}

pub fn b() -> Panel {
    Panel::new("b", PanelKind::Inventory)
}

pub fn c() -> Panel {
    Panel::new("c", PanelKind::Details)
}

pub fn d() -> Panel {
    Panel::new("d", PanelKind::Assistant)
}

/// Build a layout from panel groups and basis-point widths
pub fn layout(groups: Vec<Vec<Panel>>, widths: &[u32]) -> Layout {
    Layout::new(
        groups,
        widths.iter().copied().map(Width::from_basis_points).collect(),
    )
    .unwrap()
}

/// `[[a, b, c]]` at full width
pub fn abc() -> Layout {
    layout(vec![vec![a(), b(), c()]], &[10_000])
}

/// Create a test model on a 1200x800 viewport
pub fn test_model(layout: Layout) -> WorkspaceModel {
    let mut model = WorkspaceModel::new(layout, WorkspaceConfig::default());
    model.set_viewport(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
    model
}

/// Center of a tab as currently laid out
pub fn tab_center(model: &WorkspaceModel, group: usize, index: usize) -> Point {
    let tab = model.frames[group].tabs[index];
    Point::new(tab.x + tab.width / 2.0, tab.y + tab.height / 2.0)
}

/// Virtual clock for pointer scripts
pub struct Clock {
    start: Instant,
    now: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self { start, now: start }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn advance(&mut self, ms: u64) -> Instant {
        self.now += Duration::from_millis(ms);
        self.now
    }

    pub fn elapsed_ms(&self) -> u128 {
        (self.now - self.start).as_millis()
    }
}

pub fn down(model: &mut WorkspaceModel, pos: Point, clock: &Clock) -> Option<Cmd> {
    update(
        model,
        Msg::Pointer(PointerMsg::Down {
            pos,
            at: clock.now(),
        }),
    )
}

pub fn move_to(model: &mut WorkspaceModel, pos: Point, clock: &Clock) -> Option<Cmd> {
    update(
        model,
        Msg::Pointer(PointerMsg::Move {
            pos,
            at: clock.now(),
        }),
    )
}

pub fn up(model: &mut WorkspaceModel, pos: Point, clock: &Clock) -> Option<Cmd> {
    update(
        model,
        Msg::Pointer(PointerMsg::Up {
            pos,
            at: clock.now(),
        }),
    )
}

/// Advance the clock and deliver the timer tick
pub fn wait(model: &mut WorkspaceModel, clock: &mut Clock, ms: u64) -> Option<Cmd> {
    let now = clock.advance(ms);
    update(model, Msg::Tick(now))
}

/// Press on a tab and drag it past the threshold to `to`
pub fn start_drag(
    model: &mut WorkspaceModel,
    group: usize,
    index: usize,
    to: Point,
    clock: &Clock,
) {
    let from = tab_center(model, group, index);
    down(model, from, clock);
    move_to(model, to, clock);
    assert!(model.drag.is_dragging(), "drag did not start");
}

/// Layout keys as owned strings, for comparisons
pub fn keys(model: &WorkspaceModel) -> Vec<Vec<String>> {
    model
        .layout
        .keys()
        .into_iter()
        .map(|g| g.into_iter().map(String::from).collect())
        .collect()
}

pub fn widths(model: &WorkspaceModel) -> Vec<u32> {
    model.layout.widths().iter().map(|w| w.basis_points()).collect()
}
