use demon::colormap::{ColorTable, Colormap};
use demon::grid::StateGrid;
use demon::params::SimulationParameters;
use demon::render::{Frame, FrameSink, SinkError};
use demon::rule::{Neighborhood, apply_generation, next_state};
use demon::sim::{IDLE_POLL_INTERVAL, SimulationLoop, Tick};
use proptest::prelude::*;

/// Keeps a copy of every frame it is shown.
#[derive(Default)]
struct CaptureSink {
    frames: Vec<Vec<u8>>,
}

impl FrameSink for CaptureSink {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        frame.check()?;
        self.frames.push(frame.pixels.to_vec());
        Ok(())
    }
}

/// A 12x10 field of zeros with a single 1 at (5, 5).
fn seeded_spot() -> StateGrid {
    let mut grid = StateGrid::new(12, 10);
    grid.fill(0);
    grid.set_cell(5, 5, 1);
    grid
}

#[test]
fn single_seed_eats_its_von_neumann_ring() {
    let params = SimulationParameters {
        num_states: 4,
        neighborhood: Neighborhood::VonNeumann,
        colormap: Colormap::Grayscale,
        running: true,
        ..Default::default()
    };
    let mut sim = SimulationLoop::from_grid(seeded_spot(), params);
    let mut sink = CaptureSink::default();
    sim.tick(params, &mut sink);

    let grid = sim.grid();
    assert_eq!(grid.cell(5, 5), 1);
    for (x, y) in [(6, 5), (4, 5), (5, 6), (5, 4)] {
        assert_eq!(grid.cell(x, y), 1);
    }
    for (x, y) in [(6, 6), (4, 4), (7, 5), (5, 7)] {
        assert_eq!(grid.cell(x, y), 0);
    }

    // The frame shows the grid from before the step: one lit cell.
    let frame = &sink.frames[0];
    let lit = frame.chunks_exact(4).filter(|q| q[0] != 0).count();
    assert_eq!(lit, 1);
    assert_eq!(&frame[(5 * 12 + 5) * 4..(5 * 12 + 5) * 4 + 4], &[64, 64, 64, 255]);
}

#[test]
fn single_seed_under_moore_fills_the_box() {
    let params = SimulationParameters {
        num_states: 4,
        neighborhood: Neighborhood::Moore,
        running: true,
        ..Default::default()
    };
    let mut sim = SimulationLoop::from_grid(seeded_spot(), params);
    sim.tick(params, &mut CaptureSink::default());

    for dy in -1..=1 {
        for dx in -1..=1 {
            assert_eq!(sim.grid().cell(5 + dx, 5 + dy), 1);
        }
    }
    let ones = sim.grid().current().iter().filter(|&&v| v == 1).count();
    assert_eq!(ones, 9);
}

#[test]
fn idle_loop_only_steps_after_reset() {
    let params = SimulationParameters::default();
    let mut sim = SimulationLoop::with_seed(32, 24, params, 21);
    let mut sink = CaptureSink::default();

    for _ in 0..5 {
        assert_eq!(sim.tick(params, &mut sink), Tick::Continue(IDLE_POLL_INTERVAL));
    }
    assert_eq!(sim.generation(), 1);
    let before = sim.grid().current().to_vec();

    for _ in 0..5 {
        sim.tick(params, &mut sink);
    }
    assert_eq!(sim.grid().current(), before.as_slice());

    sim.reset();
    for _ in 0..5 {
        sim.tick(params, &mut sink);
    }
    assert_eq!(sim.generation(), 1);
    assert_eq!(sink.frames.len(), 2);
}

#[test]
fn idle_loop_shows_a_hand_built_grid_once() {
    let params = SimulationParameters::default();
    let mut sim = SimulationLoop::from_grid(seeded_spot(), params);
    let mut sink = CaptureSink::default();

    for _ in 0..5 {
        assert_eq!(sim.tick(params, &mut sink), Tick::Continue(IDLE_POLL_INTERVAL));
    }
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sim.generation(), 1);
}

#[test]
fn same_seed_same_history() {
    let params = SimulationParameters {
        num_states: 8,
        neighborhood: Neighborhood::Moore,
        running: true,
        ..Default::default()
    };
    let mut a = SimulationLoop::with_seed(48, 32, params, 77);
    let mut b = SimulationLoop::with_seed(48, 32, params, 77);
    let (mut sa, mut sb) = (CaptureSink::default(), CaptureSink::default());
    for _ in 0..10 {
        a.tick(params, &mut sa);
        b.tick(params, &mut sb);
    }
    assert_eq!(a.grid().current(), b.grid().current());
    assert_eq!(sa.frames, sb.frames);
}

#[test]
fn long_run_stays_in_range() {
    let params = SimulationParameters {
        num_states: 5,
        running: true,
        ..Default::default()
    };
    let mut sim = SimulationLoop::with_seed(64, 48, params, 3);
    let mut sink = CaptureSink::default();
    for _ in 0..50 {
        sim.tick(params, &mut sink);
    }
    assert!(sim.grid().current().iter().all(|&v| v < 5));
    assert_eq!(sink.frames.len(), 50);
}

fn grid_strategy() -> impl Strategy<Value = (usize, usize, usize, Vec<u8>)> {
    (3usize..12, 3usize..12, 5usize..=30).prop_flat_map(|(w, h, n)| {
        (
            Just(w),
            Just(h),
            Just(n),
            prop::collection::vec(0..n as u8, w * h),
        )
    })
}

fn neighborhood_strategy() -> impl Strategy<Value = Neighborhood> {
    prop_oneof![Just(Neighborhood::VonNeumann), Just(Neighborhood::Moore)]
}

fn load(width: usize, height: usize, cells: &[u8]) -> StateGrid {
    let mut grid = StateGrid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set_cell(x, y, cells[y * width + x]);
        }
    }
    grid
}

proptest! {
    /// A cell only ever takes its own state or one its neighbors hold.
    #[test]
    fn prop_next_state_comes_from_neighborhood(
        (w, h, n, cells) in grid_strategy(),
        neighborhood in neighborhood_strategy(),
    ) {
        for y in 0..h {
            for x in 0..w {
                let next = next_state(&cells, w, h, x, y, n, neighborhood);
                let own = cells[y * w + x];
                let seen = neighborhood.directions().iter().any(|d| {
                    let (dx, dy) = d.offset();
                    let nx = (x as isize + dx).rem_euclid(w as isize) as usize;
                    let ny = (y as isize + dy).rem_euclid(h as isize) as usize;
                    cells[ny * w + nx] == next
                });
                prop_assert!(next == own || seen);
                prop_assert!(next == own || next as usize == (own as usize + 1) % n);
            }
        }
    }

    /// Stepping an identical buffer twice gives identical output.
    #[test]
    fn prop_generation_is_deterministic(
        (w, h, n, cells) in grid_strategy(),
        neighborhood in neighborhood_strategy(),
    ) {
        let mut a = load(w, h, &cells);
        let mut b = load(w, h, &cells);
        apply_generation(&mut a, neighborhood, n);
        apply_generation(&mut b, neighborhood, n);
        prop_assert_eq!(a.next(), b.next());
        prop_assert_eq!(a.current(), cells.as_slice());
    }

    /// Tables have one entry per state for every scheme.
    #[test]
    fn prop_table_size(n in 5usize..=30, idx in 0usize..4) {
        let table = ColorTable::build(n, Colormap::ALL[idx]);
        prop_assert_eq!(table.len(), n);
    }
}
