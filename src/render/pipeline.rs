use super::grid::GridSize;
use super::hud::HUD_ROWS;

/// Drawable terminal area in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: usize,
    pub rows: usize,
}

impl Viewport {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Area left for the animation once the HUD rows are taken.
    pub fn from_terminal(terminal_size: (u16, u16), show_hud: bool) -> Self {
        let cols = terminal_size.0 as usize;
        let rows = terminal_size.1 as usize;
        let reserved = if show_hud { HUD_ROWS } else { 0 };
        Self::new(cols, rows.saturating_sub(reserved))
    }
}

// --- Grid sizing ---

/// Resize hysteresis: small viewport jitter keeps the current grid.
pub const RESIZE_HYSTERESIS: usize = 4;

pub fn settle_grid_size(current: GridSize, next: GridSize) -> GridSize {
    if current.cols.abs_diff(next.cols) < RESIZE_HYSTERESIS
        && current.rows.abs_diff(next.rows) < RESIZE_HYSTERESIS
    {
        current
    } else {
        next
    }
}

/// Top-left origin that centres `grid` in `viewport`, pinned to 0 when it overflows.
pub fn frame_origin(grid: GridSize, viewport: Viewport) -> (usize, usize) {
    (
        viewport.cols.saturating_sub(grid.cols) / 2,
        viewport.rows.saturating_sub(grid.rows) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_changes_keep_current_grid() {
        let current = GridSize::new(110, 36);
        assert_eq!(settle_grid_size(current, GridSize::new(113, 33)), current);
        assert_eq!(
            settle_grid_size(current, GridSize::new(114, 36)),
            GridSize::new(114, 36)
        );
        assert_eq!(
            settle_grid_size(current, GridSize::new(110, 40)),
            GridSize::new(110, 40)
        );
    }

    #[test]
    fn hud_rows_are_reserved() {
        assert_eq!(Viewport::from_terminal((80, 24), true), Viewport::new(80, 22));
        assert_eq!(Viewport::from_terminal((80, 24), false), Viewport::new(80, 24));
        assert_eq!(Viewport::from_terminal((80, 1), true), Viewport::new(80, 0));
    }

    #[test]
    fn frames_larger_than_viewport_anchor_top_left() {
        let vp = Viewport::new(80, 22);
        assert_eq!(frame_origin(GridSize::new(60, 30), vp), (10, 0));
        assert_eq!(frame_origin(GridSize::new(200, 10), vp), (0, 6));
    }
}
