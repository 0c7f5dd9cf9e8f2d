// grid.rs - Double-buffered toroidal state grid

use rand::Rng;

// Default lattice size
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

pub type State = u8;

/// Wrap a coordinate that is at most one step outside `0..dim`.
#[inline]
pub fn wrap(x: isize, dim: usize) -> usize {
    if x < 0 {
        dim - 1
    } else if x as usize >= dim {
        0
    } else {
        x as usize
    }
}

/// Two equally sized state buffers over a fixed `width x height` torus.
///
/// The buffers live in fixed slots; `front` names the slot currently holding
/// the live generation and `swap` just flips it.
pub struct StateGrid {
    width: usize,
    height: usize,
    buffers: [Vec<State>; 2],
    front: usize,
    fresh: bool,
}

impl StateGrid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let len = width * height;
        Self {
            width,
            height,
            buffers: [vec![0; len], vec![0; len]],
            front: 0,
            fresh: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed every cell with an independent uniform state in `0..num_states`
    /// and mirror it into the back buffer.
    pub fn initialize<R: Rng + ?Sized>(&mut self, num_states: usize, rng: &mut R) {
        let front = self.front;
        for v in self.buffers[front].iter_mut() {
            *v = rng.random_range(0..num_states) as State;
        }
        let (a, b) = self.buffers.split_at_mut(1);
        if front == 0 {
            b[0].copy_from_slice(&a[0]);
        } else {
            a[0].copy_from_slice(&b[0]);
        }
        self.fresh = true;
    }

    /// Fill both buffers with a single state. Used to build scenarios.
    pub fn fill(&mut self, state: State) {
        for buf in self.buffers.iter_mut() {
            buf.fill(state);
        }
    }

    pub fn swap(&mut self) {
        self.front ^= 1;
    }

    pub fn cell(&self, x: isize, y: isize) -> State {
        let x = wrap(x, self.width);
        let y = wrap(y, self.height);
        self.current()[y * self.width + x]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: State) {
        let i = y * self.width + x;
        self.buffers[self.front][i] = state;
    }

    pub fn current(&self) -> &[State] {
        &self.buffers[self.front]
    }

    pub fn next(&self) -> &[State] {
        &self.buffers[self.front ^ 1]
    }

    /// Borrow the live buffer for reading and the back buffer for writing.
    pub fn split(&mut self) -> (&[State], &mut [State]) {
        let (a, b) = self.buffers.split_at_mut(1);
        if self.front == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Flag hand-loaded contents so the next tick shows them once.
    pub fn mark_fresh(&mut self) {
        self.fresh = true;
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Read and clear the freshly-initialized marker.
    pub fn take_fresh(&mut self) -> bool {
        std::mem::take(&mut self.fresh)
    }
}
