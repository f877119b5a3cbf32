use rand::Rng;
use rayon::prelude::*;
use crate::params::SimParams;
use crate::patterns::Pattern;
use crate::rule::RuleLut;

/// Reference stepper: a toroidal bit grid, bit `x % 32` of word
/// `y * stride_words + x / 32`, stepped from one buffer into the other.
pub struct Universe {
  params: SimParams,
  cells: Vec<u32>,
  next: Vec<u32>,
  generation: u64,
}

fn read(cells: &[u32], params: &SimParams, x: i64, y: i64) -> bool {
  let x = x.rem_euclid(params.width() as i64) as usize;
  let y = y.rem_euclid(params.height() as i64) as usize;
  cells[y * params.stride_words() as usize + x / 32] >> (x % 32) & 1 != 0
}

/// Kernel offsets, and whether the cell's own state is taken back out.
fn neighborhood(params: &SimParams) -> (Vec<(i64, i64)>, bool) {
  let kernel = params.kernel();
  let offsets = kernel.offsets()
    .map(|(dx, dy)| (dx as i64, dy as i64))
    .collect();
  (offsets, kernel.subtract_center() && kernel.covers_center())
}

fn count(
  cells: &[u32],
  params: &SimParams,
  offsets: &[(i64, i64)],
  subtract_self: bool,
  x: i64,
  y: i64,
) -> u32 {
  let raw = offsets.iter()
    .filter(|&&(dx, dy)| read(cells, params, x + dx, y + dy))
    .count() as u32;
  // the center offset is among `offsets`, so an alive cell counted itself
  if subtract_self && read(cells, params, x, y) {
    raw - 1
  } else {
    raw
  }
}

impl Universe {
  pub fn new(params: SimParams) -> Self {
    let words = params.grid_words();
    Self {
      params,
      cells: vec![0; words],
      next: vec![0; words],
      generation: 0,
    }
  }

  pub fn params(&self) -> &SimParams {
    &self.params
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Current generation, `stride_words` per row. Bits past the width are
  /// always zero.
  pub fn words(&self) -> &[u32] {
    &self.cells
  }

  /// Coordinates wrap around the torus.
  pub fn get(&self, x: i64, y: i64) -> bool {
    read(&self.cells, &self.params, x, y)
  }

  /// Coordinates wrap around the torus.
  pub fn set(&mut self, x: i64, y: i64, alive: bool) {
    let x = x.rem_euclid(self.params.width() as i64) as usize;
    let y = y.rem_euclid(self.params.height() as i64) as usize;
    let word = &mut self.cells[y * self.params.stride_words() as usize + x / 32];
    let mask = 1u32 << (x % 32);
    if alive {
      *word |= mask;
    } else {
      *word &= !mask;
    }
  }

  /// Kills every cell and restarts the generation counter.
  pub fn clear(&mut self) {
    self.cells.iter_mut().for_each(|w| *w = 0);
    self.generation = 0;
  }

  pub fn population(&self) -> u64 {
    self.cells.iter().map(|w| w.count_ones() as u64).sum()
  }

  /// The count the rule table is indexed with for cell `(x, y)`.
  pub fn neighbor_count(&self, x: i64, y: i64) -> u32 {
    let (offsets, subtract_self) = neighborhood(&self.params);
    count(&self.cells, &self.params, &offsets, subtract_self, x, y)
  }

  /// Advances one generation. Rows are computed in parallel from the
  /// current buffer into the other one, which then becomes current.
  pub fn step(&mut self, lut: &RuleLut) {
    let (offsets, subtract_self) = neighborhood(&self.params);
    let params = &self.params;
    let cells = &self.cells;
    let stride = params.stride_words() as usize;
    let width = params.width();

    self.next.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
      row.iter_mut().for_each(|w| *w = 0);
      for x in 0..width {
        let alive = read(cells, params, x as i64, y as i64);
        let n = count(cells, params, &offsets, subtract_self, x as i64, y as i64);
        if lut.next(alive, n) {
          row[(x / 32) as usize] |= 1 << (x % 32);
        }
      }
    });

    std::mem::swap(&mut self.cells, &mut self.next);
    self.generation += 1;
  }

  /// Switches to new parameters. With unchanged geometry only the kernel
  /// changes; otherwise the overlapping cells are carried over.
  pub fn reshape(&mut self, params: SimParams) {
    let old = self.params;
    let same_geometry = old.width() == params.width() &&
      old.height() == params.height() &&
      old.stride_words() == params.stride_words();
    if same_geometry {
      self.params = params;
      return;
    }

    let mut reshaped = Universe::new(params);
    reshaped.generation = self.generation;
    let w = old.width().min(params.width()) as i64;
    let h = old.height().min(params.height()) as i64;
    for y in 0..h {
      for x in 0..w {
        if self.get(x, y) {
          reshaped.set(x, y, true);
        }
      }
    }
    *self = reshaped;
  }

  /// Replaces the grid with cells alive with probability `density`.
  pub fn seed_random(&mut self, density: f64, rng: &mut impl Rng) {
    let density = density.max(0.0).min(1.0);
    self.clear();
    for y in 0..self.params.height() as i64 {
      for x in 0..self.params.width() as i64 {
        if rng.gen_bool(density) {
          self.set(x, y, true);
        }
      }
    }
  }

  pub fn seed_checkerboard(&mut self) {
    self.clear();
    for y in 0..self.params.height() as i64 {
      for x in 0..self.params.width() as i64 {
        if (x + y) % 2 == 0 {
          self.set(x, y, true);
        }
      }
    }
  }

  /// Sets the pattern's cells with its top-left corner at `(x, y)`.
  pub fn place(&mut self, pattern: &Pattern, x: i64, y: i64) {
    for &(dx, dy) in pattern.cells {
      self.set(x + dx as i64, y + dy as i64, true);
    }
  }
}
