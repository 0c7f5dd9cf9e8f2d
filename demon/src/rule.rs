// rule.rs - Cyclic "eating" transition rule

use rayon::prelude::*;

use crate::grid::{State, StateGrid, wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    #[default]
    VonNeumann,
    Moore,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 2] = [Neighborhood::VonNeumann, Neighborhood::Moore];

    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::VonNeumann => "von Neumann",
            Neighborhood::Moore => "Moore",
        }
    }

    /// Neighbors in the order they are tried.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Neighborhood::VonNeumann => &PRIORITY[..4],
            Neighborhood::Moore => &PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    West,
    South,
    North,
    SouthEast,
    SouthWest,
    NorthEast,
    NorthWest,
}

impl Direction {
    /// `(dx, dy)` with y growing downwards.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
        }
    }
}

// First match wins, so this order shapes the spirals.
const PRIORITY: [Direction; 8] = [
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::North,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthEast,
    Direction::NorthWest,
];

/// True when `neighbor` is the cyclic successor of `state`.
#[inline]
pub fn can_eat(neighbor: State, state: State, num_states: usize) -> bool {
    (neighbor == 0 && state as usize == num_states - 1) || neighbor as usize == state as usize + 1
}

/// The first neighbor of `(x, y)` that eats it, with the state it carries.
pub fn eater(
    cells: &[State],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    num_states: usize,
    neighborhood: Neighborhood,
) -> Option<(Direction, State)> {
    let v = cells[y * width + x];
    neighborhood.directions().iter().find_map(|&dir| {
        let (dx, dy) = dir.offset();
        let nx = wrap(x as isize + dx, width);
        let ny = wrap(y as isize + dy, height);
        let n = cells[ny * width + nx];
        can_eat(n, v, num_states).then_some((dir, n))
    })
}

/// Next state of cell `(x, y)` read from `cells`.
pub fn next_state(
    cells: &[State],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    num_states: usize,
    neighborhood: Neighborhood,
) -> State {
    match eater(cells, width, height, x, y, num_states, neighborhood) {
        Some((_, n)) => n,
        None => cells[y * width + x],
    }
}

/// Compute one full generation into the back buffer, rows split across the
/// rayon pool. Does not swap.
pub fn apply_generation(grid: &mut StateGrid, neighborhood: Neighborhood, num_states: usize) {
    let width = grid.width();
    let height = grid.height();
    let (cur, next) = grid.split();

    next.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = next_state(cur, width, height, x, y, num_states, neighborhood);
        }
    });
}

/// Row-major single-threaded pass; kept as the reference the parallel pass
/// is checked against.
pub fn apply_generation_sequential(
    grid: &mut StateGrid,
    neighborhood: Neighborhood,
    num_states: usize,
) {
    let width = grid.width();
    let height = grid.height();
    let (cur, next) = grid.split();

    for y in 0..height {
        for x in 0..width {
            next[y * width + x] = next_state(cur, width, height, x, y, num_states, neighborhood);
        }
    }
}
