//! Maze generation and wall geometry.
//!
//! The simulation only ever sees the wall rectangles produced here; how the
//! maze is carved is irrelevant to it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::Rect;

/// Wall flags of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Cell {
    const CLOSED: Cell = Cell {
        north: true,
        east: true,
        south: true,
        west: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub cols: u32,
    pub rows: u32,
    cells: Vec<Cell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dir {
    North,
    East,
    South,
    West,
}

impl Maze {
    /// A maze with every wall standing.
    pub fn closed(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::CLOSED; cols as usize * rows as usize],
        }
    }

    /// A maze with only the outer boundary standing.
    pub fn open(cols: u32, rows: u32) -> Self {
        let mut maze = Self::closed(cols, rows);
        for row in 0..rows {
            for col in 0..cols {
                let cell = maze.cell_mut(col, row);
                cell.north = row == 0;
                cell.west = col == 0;
                cell.south = row == rows - 1;
                cell.east = col == cols - 1;
            }
        }
        maze
    }

    /// Carve a perfect maze (every cell reachable, no loops) with an
    /// iterative depth-first backtracker starting at `(0, 0)`.
    pub fn generate(cols: u32, rows: u32, rng: &mut impl Rng) -> Self {
        let mut maze = Self::closed(cols, rows);
        if cols == 0 || rows == 0 {
            return maze;
        }

        let mut visited = vec![false; cols as usize * rows as usize];
        let mut stack = vec![(0u32, 0u32)];
        visited[0] = true;

        while let Some(&(col, row)) = stack.last() {
            let mut options: Vec<(Dir, u32, u32)> = [Dir::North, Dir::East, Dir::South, Dir::West]
                .into_iter()
                .filter_map(|dir| maze.neighbour(col, row, dir).map(|(c, r)| (dir, c, r)))
                .filter(|&(_, c, r)| !visited[maze.index(c, r)])
                .collect();

            if options.is_empty() {
                stack.pop();
                continue;
            }

            options.shuffle(rng);
            let (dir, next_col, next_row) = options[0];
            maze.remove_wall(col, row, dir);
            visited[maze.index(next_col, next_row)] = true;
            stack.push((next_col, next_row));
        }

        maze
    }

    pub fn cell(&self, col: u32, row: u32) -> Cell {
        self.cells[self.index(col, row)]
    }

    fn cell_mut(&mut self, col: u32, row: u32) -> &mut Cell {
        let i = self.index(col, row);
        &mut self.cells[i]
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn neighbour(&self, col: u32, row: u32, dir: Dir) -> Option<(u32, u32)> {
        match dir {
            Dir::North if row > 0 => Some((col, row - 1)),
            Dir::East if col + 1 < self.cols => Some((col + 1, row)),
            Dir::South if row + 1 < self.rows => Some((col, row + 1)),
            Dir::West if col > 0 => Some((col - 1, row)),
            _ => None,
        }
    }

    fn remove_wall(&mut self, col: u32, row: u32, dir: Dir) {
        let Some((ncol, nrow)) = self.neighbour(col, row, dir) else {
            return;
        };
        match dir {
            Dir::North => {
                self.cell_mut(col, row).north = false;
                self.cell_mut(ncol, nrow).south = false;
            }
            Dir::East => {
                self.cell_mut(col, row).east = false;
                self.cell_mut(ncol, nrow).west = false;
            }
            Dir::South => {
                self.cell_mut(col, row).south = false;
                self.cell_mut(ncol, nrow).north = false;
            }
            Dir::West => {
                self.cell_mut(col, row).west = false;
                self.cell_mut(ncol, nrow).east = false;
            }
        }
    }

    /// One solid rectangle per standing wall segment, outer boundary included.
    ///
    /// Each segment is emitted once: cells contribute their north and west
    /// walls, the last row its south walls and the last column its east walls.
    /// Walls lie inside the cell they bound, so a cell's center is never
    /// covered by a wall.
    pub fn wall_rects(&self, cell_size: f32, thickness: f32) -> Vec<Rect> {
        let mut walls = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cell(col, row);
                let x = col as f32 * cell_size;
                let y = row as f32 * cell_size;
                if cell.north {
                    walls.push(Rect::new(x, y, cell_size, thickness));
                }
                if cell.west {
                    walls.push(Rect::new(x, y, thickness, cell_size));
                }
                if row == self.rows - 1 && cell.south {
                    walls.push(Rect::new(x, y + cell_size - thickness, cell_size, thickness));
                }
                if col == self.cols - 1 && cell.east {
                    walls.push(Rect::new(x + cell_size - thickness, y, thickness, cell_size));
                }
            }
        }
        walls
    }
}
