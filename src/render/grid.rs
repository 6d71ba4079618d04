use crate::math::clamp01;

pub const BLANK: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

/// One animation frame: a row-major character grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<char>,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![BLANK; size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.cols
    }

    pub fn height(&self) -> usize {
        self.size.rows
    }

    pub fn index_of(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.size.cols || y >= self.size.rows {
            return None;
        }
        Some(y * self.size.cols + x)
    }

    /// Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: isize, y: isize, glyph: char) {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = glyph;
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: isize, y: isize) -> Option<char> {
        self.index_of(x, y).map(|idx| self.cells[idx])
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [char] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.cells.chunks(self.size.cols)
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.size.cols + 1) * self.size.rows);
        for (row_idx, row) in self.rows().enumerate() {
            if row_idx > 0 {
                text.push('\n');
            }
            text.extend(row.iter());
        }
        text
    }
}

/// Maps a [0, 1] intensity onto a ramp ordered from emptiest to densest glyph.
pub fn map_intensity_to_glyph(ramp: &[char], intensity: f32) -> char {
    if ramp.is_empty() {
        return BLANK;
    }
    let max_idx = ramp.len() - 1;
    let idx = (clamp01(intensity) * max_idx as f32).floor() as usize;
    ramp[idx.min(max_idx)]
}
