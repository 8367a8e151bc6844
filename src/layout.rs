use crate::constants::*;

/// Maps between board cells and window coordinates. nannou puts the origin at
/// the centre of the window with y pointing up, so row 0 sits at the bottom.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    rows: usize,
    cols: usize,
    screen_width: f32,
    screen_height: f32,
    square_width: f32,
    square_height: f32,
}

impl Layout {
    pub fn new(rows: usize, cols: usize, screen_width: u32, screen_height: u32) -> Self {
        let screen_width = screen_width as f32;
        let screen_height = screen_height as f32;
        let square_width = (screen_width - SCREEN_PADDING * 2.) / cols as f32 - SQUARE_MARGIN;
        let square_height = (screen_height - SCREEN_PADDING * 2.) / rows as f32 - SQUARE_MARGIN;

        // A board denser than the window would invert the geometry; clamp so
        // the mapping stays monotone even if the squares degenerate.
        if square_width < MIN_SQUARE_SIZE || square_height < MIN_SQUARE_SIZE {
            log::warn!("{rows}x{cols} board does not fit a {screen_width}x{screen_height} window");
        }

        Layout {
            rows,
            cols,
            screen_width,
            screen_height,
            square_width: square_width.max(MIN_SQUARE_SIZE),
            square_height: square_height.max(MIN_SQUARE_SIZE),
        }
    }

    pub fn square_width(&self) -> f32 {
        self.square_width
    }

    pub fn square_height(&self) -> f32 {
        self.square_height
    }

    /// Centre of the given cell.
    pub fn cell_to_xy(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.square_width / 2. + (self.square_width + SQUARE_MARGIN) * col as f32
                - self.screen_width / 2.
                + SCREEN_PADDING,
            self.square_height / 2. + (self.square_height + SQUARE_MARGIN) * row as f32
                - self.screen_height / 2.
                + SCREEN_PADDING,
        )
    }

    /// Cell under the given point, or `None` outside the board.
    pub fn xy_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = ((x + self.screen_width / 2. - SCREEN_PADDING)
            / (self.square_width + SQUARE_MARGIN))
            .floor() as i32;
        let row = ((y + self.screen_height / 2. - SCREEN_PADDING)
            / (self.square_height + SQUARE_MARGIN))
            .floor() as i32;

        if (0..self.cols as i32).contains(&col) && (0..self.rows as i32).contains(&row) {
            return Some((row as usize, col as usize));
        }

        None
    }
}
