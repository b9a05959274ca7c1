//! Workspace geometry - group frames, tab strips, and splitter bars
//!
//! Frames are derived from the layout's widths and the viewport rectangle.
//! They are recomputed after every layout change and are what hit testing
//! and drag snapshots read from.

use super::layout::Layout;

// ============================================================================
// Primitives
// ============================================================================

/// A pointer position in workspace coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    /// Whether `py` falls inside the vertical extent
    pub fn contains_y(&self, py: f32) -> bool {
        py >= self.y && py < self.bottom()
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// Sizes used to lay out tab strips and splitters, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabMetrics {
    pub header_height: f32,
    pub splitter_width: f32,
    pub char_width: f32,
    pub tab_padding: f32,
    pub min_tab_width: f32,
}

impl Default for TabMetrics {
    fn default() -> Self {
        Self {
            header_height: 32.0,
            splitter_width: 6.0,
            char_width: 8.0,
            tab_padding: 12.0,
            min_tab_width: 48.0,
        }
    }
}

impl TabMetrics {
    /// Width of a tab showing `title`
    pub fn tab_width(&self, title: &str) -> f32 {
        let text = title.chars().count() as f32 * self.char_width;
        (text + self.tab_padding * 2.0).max(self.min_tab_width)
    }
}

// ============================================================================
// Frames
// ============================================================================

/// Screen placement of one group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupFrame {
    /// Whole group, header included
    pub rect: Rect,
    /// Tab strip band along the top
    pub header: Rect,
    /// One rect per tab, left to right
    pub tabs: Vec<Rect>,
}

impl GroupFrame {
    /// Index of the tab under `point`, if any
    pub fn tab_at(&self, point: Point) -> Option<usize> {
        self.tabs.iter().position(|r| r.contains_point(point))
    }
}

/// Represents a draggable splitter bar between two adjacent groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterBar {
    /// The hit-testing rectangle for this splitter
    pub rect: Rect,
    /// Boundary index: sits between group `boundary` and `boundary + 1`
    pub boundary: usize,
}

/// Lay groups out left to right according to their widths.
///
/// The last group runs to the viewport's right edge so rounding never
/// leaves a gap.
pub fn compute_frames(
    viewport: Rect,
    layout: &Layout,
    metrics: &TabMetrics,
) -> (Vec<GroupFrame>, Vec<SplitterBar>) {
    let count = layout.group_count();
    let mut frames = Vec::with_capacity(count);
    let mut splitters = Vec::with_capacity(count.saturating_sub(1));
    let mut offset = 0.0;

    for (i, (group, width)) in layout.groups().iter().zip(layout.widths()).enumerate() {
        let x = viewport.x + offset;
        let group_width = if i + 1 == count {
            viewport.right() - x
        } else {
            viewport.width * width.fraction()
        };

        let rect = Rect::new(x, viewport.y, group_width, viewport.height);
        let header = Rect::new(
            x,
            viewport.y,
            group_width,
            metrics.header_height.min(viewport.height),
        );

        let mut tab_x = x;
        let tabs = group
            .panels()
            .iter()
            .map(|panel| {
                let w = metrics.tab_width(panel.title());
                let tab = Rect::new(tab_x, header.y, w, header.height);
                tab_x += w;
                tab
            })
            .collect();

        if i + 1 < count {
            splitters.push(SplitterBar {
                rect: Rect::new(
                    x + group_width - metrics.splitter_width / 2.0,
                    viewport.y,
                    metrics.splitter_width,
                    viewport.height,
                ),
                boundary: i,
            });
        }

        frames.push(GroupFrame { rect, header, tabs });
        offset += group_width;
    }

    (frames, splitters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::panel::{Panel, PanelKind};

    #[test]
    fn test_tab_width_respects_minimum() {
        let metrics = TabMetrics::default();
        assert_eq!(metrics.tab_width(""), 48.0);
        // 9 chars * 8 + 24 padding
        assert_eq!(metrics.tab_width("Inventory"), 96.0);
    }

    #[test]
    fn test_frames_follow_widths() {
        let layout = Layout::with_even_widths(vec![
            vec![Panel::new("a", PanelKind::Inventory)],
            vec![Panel::new("b", PanelKind::Details)],
        ])
        .unwrap();
        let viewport = Rect::new(0.0, 0.0, 1000.0, 600.0);
        let (frames, splitters) = compute_frames(viewport, &layout, &TabMetrics::default());

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].rect.x, 0.0);
        assert_eq!(frames[0].rect.width, 500.0);
        assert_eq!(frames[1].rect.x, 500.0);
        assert_eq!(frames[1].rect.right(), 1000.0);
        assert_eq!(frames[0].header.height, 32.0);

        assert_eq!(splitters.len(), 1);
        assert_eq!(splitters[0].boundary, 0);
        assert!(splitters[0].rect.contains(500.0, 300.0));
    }

    #[test]
    fn test_tabs_are_laid_out_left_to_right() {
        let layout = Layout::default();
        let viewport = Rect::new(0.0, 0.0, 1200.0, 800.0);
        let (frames, _) = compute_frames(viewport, &layout, &TabMetrics::default());

        let tabs = &frames[0].tabs;
        assert_eq!(tabs.len(), 5);
        for pair in tabs.windows(2) {
            assert_eq!(pair[0].right(), pair[1].x);
        }
        assert_eq!(frames[0].tab_at(Point::new(tabs[2].x + 1.0, 10.0)), Some(2));
        assert_eq!(frames[0].tab_at(Point::new(5.0, 100.0)), None);
    }
}
