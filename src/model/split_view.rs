//! Split view - editor panes sharing the code area, divider lines, and
//! mouse-driven divider dragging

use super::editor::EditorState;
use crate::keymap::{MouseButton, MouseEvent, MouseKind};
use crate::messages::Direction;

/// Minimum pane width in cells
pub const MIN_REGION_WIDTH: usize = 10;
/// Minimum pane height in cells
pub const MIN_REGION_HEIGHT: usize = 5;

/// A rectangle in code-area cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

/// One pane of a split editor view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegion {
    /// Slot in the document manager shown by this pane
    pub document_index: usize,
    pub rect: Rect,
    pub is_active: bool,
    /// Cursor and viewport saved when the pane lost focus
    pub saved_view: Option<EditorState>,
}

/// A divider between panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine {
    /// Vertical lines separate left/right panes
    pub is_vertical: bool,
    /// Column (vertical) or row (horizontal) of the divider
    pub position: usize,
    /// Extent along the line: rows for vertical lines, columns otherwise
    pub start_pos: usize,
    pub end_pos: usize,
    pub is_dragging: bool,
}

impl SplitLine {
    fn contains_point(&self, x: usize, y: usize) -> bool {
        let (across, along) = if self.is_vertical { (x, y) } else { (y, x) };
        across.abs_diff(self.position) <= 1 && along >= self.start_pos && along < self.end_pos
    }

    /// Whether a pane edge lies on this line's extent
    fn spans(&self, rect: &Rect) -> bool {
        if self.is_vertical {
            rect.y >= self.start_pos && rect.bottom() <= self.end_pos
        } else {
            rect.x >= self.start_pos && rect.right() <= self.end_pos
        }
    }
}

/// Owns the panes of the split code area
#[derive(Debug, Clone, Default)]
pub struct SplitViewManager {
    /// Empty unless the code area is split
    regions: Vec<ViewRegion>,
    lines: Vec<SplitLine>,
    active: usize,
    dragging: Option<usize>,
    screen: (usize, usize),
}

impl SplitViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_splits(&self) -> bool {
        self.regions.len() > 1
    }

    pub fn regions(&self) -> &[ViewRegion] {
        &self.regions
    }

    pub fn lines(&self) -> &[SplitLine] {
        &self.lines
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.regions.is_empty()).then_some(self.active)
    }

    pub fn active_region(&self) -> Option<&ViewRegion> {
        self.regions.get(self.active)
    }

    pub fn active_region_mut(&mut self) -> Option<&mut ViewRegion> {
        self.regions.get_mut(self.active)
    }

    pub fn region_mut(&mut self, index: usize) -> Option<&mut ViewRegion> {
        self.regions.get_mut(index)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Drop back to a single unsplit code area
    pub fn reset(&mut self) {
        self.regions.clear();
        self.lines.clear();
        self.active = 0;
        self.dragging = None;
    }

    fn set_active(&mut self, index: usize) {
        self.active = index;
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.is_active = i == index;
        }
    }

    fn seed(&mut self, width: usize, height: usize, document_index: usize) {
        if self.regions.is_empty() {
            self.screen = (width, height);
            self.regions.push(ViewRegion {
                document_index,
                rect: Rect::new(0, 0, width, height),
                is_active: true,
                saved_view: None,
            });
            self.active = 0;
        }
    }

    /// Halve the active pane side by side. The new pane goes right and takes focus.
    pub fn split_vertical(&mut self, width: usize, height: usize, document_index: usize) -> bool {
        self.split(width, height, document_index, true)
    }

    /// Halve the active pane top and bottom. The new pane goes below and takes focus.
    pub fn split_horizontal(&mut self, width: usize, height: usize, document_index: usize) -> bool {
        self.split(width, height, document_index, false)
    }

    fn split(&mut self, width: usize, height: usize, document_index: usize, vertical: bool) -> bool {
        let was_empty = self.regions.is_empty();
        self.seed(width, height, document_index);

        let Some(active) = self.regions.get(self.active) else {
            return false;
        };
        let rect = active.rect;
        let document_index = active.document_index;
        let too_small = if vertical {
            rect.width < 2 * MIN_REGION_WIDTH
        } else {
            rect.height < 2 * MIN_REGION_HEIGHT
        };
        if too_small {
            if was_empty {
                self.reset();
            }
            return false;
        }

        let (kept, added, line) = if vertical {
            let half = rect.width / 2;
            (
                Rect::new(rect.x, rect.y, half, rect.height),
                Rect::new(rect.x + half, rect.y, rect.width - half, rect.height),
                SplitLine {
                    is_vertical: true,
                    position: rect.x + half,
                    start_pos: rect.y,
                    end_pos: rect.bottom(),
                    is_dragging: false,
                },
            )
        } else {
            let half = rect.height / 2;
            (
                Rect::new(rect.x, rect.y, rect.width, half),
                Rect::new(rect.x, rect.y + half, rect.width, rect.height - half),
                SplitLine {
                    is_vertical: false,
                    position: rect.y + half,
                    start_pos: rect.x,
                    end_pos: rect.right(),
                    is_dragging: false,
                },
            )
        };

        self.regions[self.active].rect = kept;
        self.regions.push(ViewRegion {
            document_index,
            rect: added,
            is_active: false,
            saved_view: None,
        });
        self.lines.push(line);
        self.set_active(self.regions.len() - 1);
        tracing::info!(
            "Split {}: {} regions",
            if vertical { "vertical" } else { "horizontal" },
            self.regions.len()
        );
        true
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Focus the nearest pane in `direction` that overlaps the active one
    pub fn focus(&mut self, direction: Direction) -> bool {
        let Some(active) = self.regions.get(self.active) else {
            return false;
        };
        let a = active.rect;

        let overlaps = |lo1: usize, hi1: usize, lo2: usize, hi2: usize| lo1 < hi2 && lo2 < hi1;
        let best = self
            .regions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.active)
            .filter_map(|(i, region)| {
                let r = region.rect;
                let distance = match direction {
                    Direction::Left if r.right() <= a.x && overlaps(r.y, r.bottom(), a.y, a.bottom()) => {
                        a.x - r.right()
                    }
                    Direction::Right if r.x >= a.right() && overlaps(r.y, r.bottom(), a.y, a.bottom()) => {
                        r.x - a.right()
                    }
                    Direction::Up if r.bottom() <= a.y && overlaps(r.x, r.right(), a.x, a.right()) => {
                        a.y - r.bottom()
                    }
                    Direction::Down if r.y >= a.bottom() && overlaps(r.x, r.right(), a.x, a.right()) => {
                        r.y - a.bottom()
                    }
                    _ => return None,
                };
                Some((distance, i))
            })
            .min();

        match best {
            Some((_, index)) => {
                self.set_active(index);
                true
            }
            None => false,
        }
    }

    pub fn focus_left_region(&mut self) -> bool {
        self.focus(Direction::Left)
    }

    pub fn focus_right_region(&mut self) -> bool {
        self.focus(Direction::Right)
    }

    pub fn focus_up_region(&mut self) -> bool {
        self.focus(Direction::Up)
    }

    pub fn focus_down_region(&mut self) -> bool {
        self.focus(Direction::Down)
    }

    // ========================================================================
    // Resizing
    // ========================================================================

    /// Move a divider to `target` (clamped). Panes on either side keep their
    /// minimum size or the move is refused.
    fn move_line(&mut self, index: usize, target: usize) -> bool {
        let (width, height) = self.screen;
        let Some(line) = self.lines.get(index).copied() else {
            return false;
        };
        let target = if line.is_vertical {
            target.clamp(MIN_REGION_WIDTH, width.saturating_sub(MIN_REGION_WIDTH).max(MIN_REGION_WIDTH))
        } else {
            target.clamp(MIN_REGION_HEIGHT, height.saturating_sub(MIN_REGION_HEIGHT).max(MIN_REGION_HEIGHT))
        };
        let old = line.position;
        if target == old {
            return false;
        }

        let fits = self.regions.iter().all(|region| {
            let r = region.rect;
            if !line.spans(&r) {
                return true;
            }
            if line.is_vertical {
                if r.right() == old {
                    return target >= r.x + MIN_REGION_WIDTH;
                }
                if r.x == old {
                    return r.right() >= target + MIN_REGION_WIDTH;
                }
            } else {
                if r.bottom() == old {
                    return target >= r.y + MIN_REGION_HEIGHT;
                }
                if r.y == old {
                    return r.bottom() >= target + MIN_REGION_HEIGHT;
                }
            }
            true
        });
        if !fits {
            return false;
        }

        for region in &mut self.regions {
            let r = &mut region.rect;
            if !line.spans(r) {
                continue;
            }
            if line.is_vertical {
                if r.right() == old {
                    r.width = target - r.x;
                } else if r.x == old {
                    r.width = r.right() - target;
                    r.x = target;
                }
            } else if r.bottom() == old {
                r.height = target - r.y;
            } else if r.y == old {
                r.height = r.bottom() - target;
                r.y = target;
            }
        }

        // Perpendicular dividers that end on this one follow it
        for (i, other) in self.lines.iter_mut().enumerate() {
            if i == index || other.is_vertical == line.is_vertical {
                continue;
            }
            if other.position < line.start_pos || other.position > line.end_pos {
                continue;
            }
            if other.start_pos == old {
                other.start_pos = target;
            }
            if other.end_pos == old {
                other.end_pos = target;
            }
        }

        self.lines[index].position = target;
        true
    }

    /// Grow (positive) or shrink (negative) the active pane by moving one
    /// of its dividers: right or bottom edge first, then left or top.
    pub fn resize_active(&mut self, delta: i32) -> bool {
        let Some(active) = self.regions.get(self.active) else {
            return false;
        };
        let a = active.rect;

        let edge = |is_vertical: bool, position: usize| {
            self.lines
                .iter()
                .position(|l| l.is_vertical == is_vertical && l.position == position && l.spans(&a))
        };
        let (index, signed) = if let Some(i) = edge(true, a.right()) {
            (i, delta)
        } else if let Some(i) = edge(false, a.bottom()) {
            (i, delta)
        } else if let Some(i) = edge(true, a.x) {
            (i, -delta)
        } else if let Some(i) = edge(false, a.y) {
            (i, -delta)
        } else {
            return false;
        };

        let position = self.lines[index].position as i64 + signed as i64;
        self.move_line(index, position.max(0) as usize)
    }

    /// Rescale every pane and divider to a new code-area size
    pub fn update_region_sizes(&mut self, width: usize, height: usize) {
        let (old_w, old_h) = self.screen;
        self.screen = (width, height);
        if self.regions.len() == 1 {
            self.regions[0].rect = Rect::new(0, 0, width, height);
            return;
        }
        if self.regions.is_empty() || old_w == 0 || old_h == 0 {
            return;
        }

        let sx = |v: usize| v * width / old_w;
        let sy = |v: usize| v * height / old_h;
        for region in &mut self.regions {
            let r = region.rect;
            let (x, y) = (sx(r.x), sy(r.y));
            region.rect = Rect::new(x, y, sx(r.right()) - x, sy(r.bottom()) - y);
        }
        for line in &mut self.lines {
            if line.is_vertical {
                line.position = sx(line.position);
                line.start_pos = sy(line.start_pos);
                line.end_pos = sy(line.end_pos);
            } else {
                line.position = sy(line.position);
                line.start_pos = sx(line.start_pos);
                line.end_pos = sx(line.end_pos);
            }
        }
    }

    // ========================================================================
    // Closing
    // ========================================================================

    /// Close a pane, merging its space into a neighbour that forms a rectangle.
    ///
    /// Closing down to one pane resets the split entirely. When the active
    /// pane closes, focus goes to the lowest remaining index.
    pub fn close_region(&mut self, index: usize) -> bool {
        if index >= self.regions.len() {
            return false;
        }
        if self.regions.len() <= 2 {
            self.reset();
            tracing::info!("Closed split, back to a single view");
            return true;
        }

        let closed = self.regions[index].rect;
        let neighbour = self.regions.iter().enumerate().find_map(|(i, region)| {
            let r = region.rect;
            if i == index {
                return None;
            }
            let same_rows = r.y == closed.y && r.height == closed.height;
            let same_cols = r.x == closed.x && r.width == closed.width;
            if same_rows && (r.right() == closed.x || closed.right() == r.x) {
                Some((i, true))
            } else if same_cols && (r.bottom() == closed.y || closed.bottom() == r.y) {
                Some((i, false))
            } else {
                None
            }
        });
        let Some((neighbour, vertical_edge)) = neighbour else {
            return false;
        };

        let n = self.regions[neighbour].rect;
        let merged = Rect::new(
            n.x.min(closed.x),
            n.y.min(closed.y),
            if vertical_edge { n.width + closed.width } else { n.width },
            if vertical_edge { n.height } else { n.height + closed.height },
        );
        let shared = if vertical_edge {
            n.right().min(closed.right())
        } else {
            n.bottom().min(closed.bottom())
        };
        self.lines.retain(|l| {
            !(l.is_vertical == vertical_edge
                && l.position == shared
                && l.spans(&merged)
                && (if vertical_edge {
                    l.start_pos == merged.y && l.end_pos == merged.bottom()
                } else {
                    l.start_pos == merged.x && l.end_pos == merged.right()
                }))
        });
        self.regions[neighbour].rect = merged;
        self.regions.remove(index);

        let active = if self.active == index {
            0
        } else if self.active > index {
            self.active - 1
        } else {
            self.active
        };
        self.set_active(active);
        self.dragging = None;
        tracing::info!("Closed split region {}, {} remain", index, self.regions.len());
        true
    }

    /// Keep pane document indices valid after a document slot is removed
    pub fn on_document_closed(&mut self, closed: usize, remaining: usize) {
        for region in &mut self.regions {
            if region.document_index > closed {
                region.document_index -= 1;
            } else if region.document_index == closed {
                region.document_index = closed.min(remaining.saturating_sub(1));
                region.saved_view = None;
            }
        }
    }

    // ========================================================================
    // Mouse dragging
    // ========================================================================

    /// Drive divider dragging. Returns whether the event was consumed.
    pub fn handle_mouse_event(
        &mut self,
        event: &MouseEvent,
        width: usize,
        height: usize,
        x_offset: usize,
        y_offset: usize,
    ) -> bool {
        if self.regions.is_empty() {
            return false;
        }
        if (width, height) != self.screen {
            self.update_region_sizes(width, height);
        }
        let x = (event.column as usize).saturating_sub(x_offset);
        let y = (event.row as usize).saturating_sub(y_offset);
        let inside = event.column as usize >= x_offset && event.row as usize >= y_offset;

        match (event.kind, self.dragging) {
            (MouseKind::Press(MouseButton::Left), _) if inside => {
                let Some(index) = self.lines.iter().position(|l| l.contains_point(x, y)) else {
                    return false;
                };
                self.dragging = Some(index);
                self.lines[index].is_dragging = true;
                true
            }
            (MouseKind::Drag(_) | MouseKind::Moved, Some(index)) => {
                let vertical = self.lines[index].is_vertical;
                self.move_line(index, if vertical { x } else { y });
                true
            }
            (MouseKind::Release(_), Some(_)) => {
                self.cancel_drag();
                true
            }
            _ => false,
        }
    }

    /// Clear an in-progress drag
    pub fn cancel_drag(&mut self) {
        if let Some(index) = self.dragging.take() {
            if let Some(line) = self.lines.get_mut(index) {
                line.is_dragging = false;
            }
        }
    }
}
