use crate::grid::Grid;

/// Reusable ASCII snapshot of the bath.
///
/// The picture is a square of side `2 * r_escape + 2`: dash borders top and
/// bottom, interior rows framed by `|`. Occupied cells print as `*`, the
/// most recently attached ion as `#`. Rendering only reads the grid.
pub struct Snapshot {
    buf: String,
    r_escape: i32,
}

impl Snapshot {
    /// Allocate a buffer sized from the render bounds, not the bath width.
    pub fn new(r_escape: u32) -> Self {
        let side = 2 * r_escape as usize + 2;
        Self {
            // Every row carries a trailing newline.
            buf: String::with_capacity(side * (side + 1)),
            r_escape: r_escape as i32,
        }
    }

    /// Redraw from the current grid state and return the text.
    pub fn render(&mut self, grid: &Grid, last: (i32, i32)) -> &str {
        let r = self.r_escape;
        let half = grid.size() as i32 / 2;
        let occupied = |x: i32, y: i32| grid.get((x + half) as usize, (half - y) as usize);

        self.buf.clear();
        self.push_border();
        for i in -r..r {
            self.buf.push('|');
            for j in -r..r {
                let cell = if occupied(i, j) {
                    if (i, j) == last {
                        '#'
                    } else {
                        '*'
                    }
                } else {
                    ' '
                };
                self.buf.push(cell);
            }
            self.buf.push('|');
            self.buf.push('\n');
        }
        self.push_border();
        &self.buf
    }

    fn push_border(&mut self) {
        for _ in 0..2 * self.r_escape + 2 {
            self.buf.push('-');
        }
        self.buf.push('\n');
    }
}
