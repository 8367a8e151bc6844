pub const SCREEN_PADDING: f32 = 100.;

pub const SQUARE_MARGIN: f32 = 2.;

/// Boards generated before giving up on a safe first click.
pub const MAX_REGEN_ATTEMPTS: usize = 1000;

/// Upper bound on configured board rows and columns. Keeps the cell count
/// far from usize overflow.
pub const MAX_BOARD_DIM: usize = 1024;

/// Squares degenerate to this size when the board outgrows the window.
pub const MIN_SQUARE_SIZE: f32 = 1.;
