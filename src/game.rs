use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Square {
    Empty,
    Nearby(u8),
    Mine,
}

pub struct Minesweeper {
    rows: usize,
    cols: usize,
    mines: usize,
    grid: Vec<Square>,
    opened: Vec<bool>,
    marked: Vec<bool>,
}

const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Minesweeper {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Self {
        assert!(mines < rows * cols);

        let mut rng = rand::rng();
        let mut is_mine = vec![false; rows * cols];
        let mut mines_left = mines;

        while mines_left > 0 {
            let pos = rng.random_range(0..rows * cols);
            if is_mine[pos] {
                continue;
            }
            is_mine[pos] = true;
            mines_left -= 1;
        }

        Self::from_mine_map(rows, cols, is_mine)
    }

    /// Deterministic board with mines at the given (row, col) positions.
    pub fn with_mines_at(rows: usize, cols: usize, positions: &[(usize, usize)]) -> Self {
        let mut is_mine = vec![false; rows * cols];
        for &(row, col) in positions {
            assert!(row < rows && col < cols);
            is_mine[row * cols + col] = true;
        }
        assert!(is_mine.iter().filter(|&&m| m).count() < rows * cols);

        Self::from_mine_map(rows, cols, is_mine)
    }

    fn from_mine_map(rows: usize, cols: usize, is_mine: Vec<bool>) -> Self {
        let mines = is_mine.iter().filter(|&&m| m).count();
        let grid = (0..rows * cols)
            .map(|idx| {
                if is_mine[idx] {
                    return Square::Mine;
                }

                let row = (idx / cols) as i32;
                let col = (idx % cols) as i32;
                let nearby = NEIGHBOURS
                    .iter()
                    .filter(|(d_row, d_col)| {
                        let n_row = row + d_row;
                        let n_col = col + d_col;
                        (0..rows as i32).contains(&n_row)
                            && (0..cols as i32).contains(&n_col)
                            && is_mine[n_row as usize * cols + n_col as usize]
                    })
                    .count() as u8;

                match nearby {
                    0 => Square::Empty,
                    n => Square::Nearby(n),
                }
            })
            .collect();

        Minesweeper {
            rows,
            cols,
            mines,
            grid,
            opened: vec![false; rows * cols],
            marked: vec![false; rows * cols],
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn open_count(&self) -> usize {
        self.opened.iter().filter(|&&open| open).count()
    }

    /// Opens the square and returns what was under it. Opening an `Empty`
    /// square cascades to its neighbours; the cascade opens `Nearby` squares
    /// but never propagates through them, and never touches a mine.
    pub fn click(&mut self, row: usize, col: usize) -> Square {
        let idx = self.index(row, col);
        if self.opened[idx] {
            return self.grid[idx];
        }

        match self.grid[idx] {
            Square::Nearby(_) | Square::Mine => {
                self.opened[idx] = true;
            }
            Square::Empty => {
                let mut stack = vec![(row, col)];

                while let Some((curr_row, curr_col)) = stack.pop() {
                    let curr = self.index(curr_row, curr_col);
                    if self.opened[curr] || matches!(self.grid[curr], Square::Mine) {
                        continue;
                    }

                    self.opened[curr] = true;
                    self.marked[curr] = false;

                    if matches!(self.grid[curr], Square::Nearby(_)) {
                        continue;
                    }

                    for (d_row, d_col) in NEIGHBOURS {
                        let next_row = curr_row as i32 + d_row;
                        let next_col = curr_col as i32 + d_col;
                        if (0..self.rows as i32).contains(&next_row)
                            && (0..self.cols as i32).contains(&next_col)
                        {
                            stack.push((next_row as usize, next_col as usize));
                        }
                    }
                }
            }
        }

        self.grid[idx]
    }

    pub fn square_state(&self, row: usize, col: usize) -> Square {
        self.grid[self.index(row, col)]
    }

    pub fn is_square_open(&self, row: usize, col: usize) -> bool {
        self.opened[self.index(row, col)]
    }

    pub fn is_square_marked(&self, row: usize, col: usize) -> bool {
        self.marked[self.index(row, col)]
    }

    pub fn mark(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        if self.opened[idx] {
            return;
        }

        self.marked[idx] = !self.marked[idx];
    }

    /// Checks if all squares except the mines are opened.
    pub fn is_board_completed(&self) -> bool {
        self.open_count() == self.rows * self.cols - self.mines
    }
}
