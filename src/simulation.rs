use std::hash::BuildHasherDefault;
use std::sync::Arc;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHasher;
use tracing::{debug, info, warn};
use crate::config::LifeConfig;
use crate::error::Result;
use crate::kernel::Kernel;
use crate::params::SimParams;
use crate::patterns::GOSPER_GLIDER_GUN;
use crate::rule::{Rule, RuleLut, GAME_OF_LIFE};
use crate::universe::Universe;

/// Compiled tables kept for recently used rules.
const LUT_CACHE_SIZE: usize = 16;

/// Least recently used first.
type LutCache = IndexMap<Rule, RuleLut, BuildHasherDefault<FxHasher>>;

/// The immutable pair a generation is computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tables {
  pub lut: RuleLut,
  pub params: SimParams,
}

/// Owns the grid and the active tables.
///
/// Every configuration change is compiled to completion before a new
/// [`Tables`] is published, so a failed change leaves the previous tables
/// active, and a generation always runs against a single snapshot.
pub struct Simulation {
  tables: Arc<Tables>,
  rule: Rule,
  kernel: Kernel,
  universe: Universe,
  stride_align_words: u32,
  luts: LutCache,
  rng: StdRng,
}

impl Simulation {
  pub fn new(width: u32, height: u32) -> Result<Self> {
    let kernel = Kernel::classic();
    let params = SimParams::new(width, height, &kernel)?;
    Ok(Self::from_parts(GAME_OF_LIFE, kernel, params, 1, StdRng::from_entropy()))
  }

  pub fn from_config(config: &LifeConfig) -> Result<Self> {
    let (rule, kernel, params) = config.compile().map_err(|err| {
      warn!(%err, "rejected configuration");
      err
    })?;
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Ok(Self::from_parts(rule, kernel, params, config.stride_align_words, rng))
  }

  fn from_parts(
    rule: Rule,
    kernel: Kernel,
    params: SimParams,
    stride_align_words: u32,
    rng: StdRng,
  ) -> Self {
    let lut = rule.compile();
    let mut luts = LutCache::default();
    luts.insert(rule, lut);
    info!(%rule, extent = kernel.extent(), width = params.width(), height = params.height(),
      "simulation created");
    Self {
      tables: Arc::new(Tables { lut, params }),
      rule,
      kernel,
      universe: Universe::new(params),
      stride_align_words,
      luts,
      rng,
    }
  }

  /// Snapshot of the active tables. Stays valid across later changes.
  pub fn tables(&self) -> Arc<Tables> {
    Arc::clone(&self.tables)
  }

  pub fn rule(&self) -> &Rule {
    &self.rule
  }

  pub fn kernel(&self) -> &Kernel {
    &self.kernel
  }

  pub fn universe(&self) -> &Universe {
    &self.universe
  }

  pub fn universe_mut(&mut self) -> &mut Universe {
    &mut self.universe
  }

  fn publish(&mut self, tables: Tables) {
    self.universe.reshape(tables.params);
    self.tables = Arc::new(tables);
  }

  pub fn set_rule(&mut self, rule: Rule) {
    let lut = match self.luts.shift_remove(&rule) {
      Some(lut) => {
        debug!(%rule, "rule table cached");
        lut
      }
      None => rule.compile(),
    };
    if self.luts.len() >= LUT_CACHE_SIZE {
      if let Some(&oldest) = self.luts.keys().next() {
        self.luts.shift_remove(&oldest);
      }
    }
    self.luts.insert(rule, lut);
    self.rule = rule;
    let params = self.tables.params;
    self.publish(Tables { lut, params });
    info!(%rule, "rule published");
  }

  pub fn set_classic_rule(&mut self) {
    self.set_rule(GAME_OF_LIFE);
  }

  pub fn set_rule_ranges(&mut self, b0: i32, b1: i32, s0: i32, s1: i32) {
    self.set_rule(Rule::from_ranges(b0, b1, s0, s1));
  }

  pub fn set_rule_singles(&mut self, b: i32, s0: i32, s1: i32) {
    self.set_rule(Rule::from_singles(b, s0, s1));
  }

  /// On error the active rule is kept.
  pub fn set_rule_string(&mut self, rule: &str) -> Result<()> {
    match rule.parse::<Rule>() {
      Ok(parsed) => {
        self.set_rule(parsed);
        Ok(())
      }
      Err(err) => {
        warn!(rule, %err, "rejected rule");
        Err(err.into())
      }
    }
  }

  pub fn set_kernel(&mut self, kernel: Kernel) {
    let tables = Tables {
      lut: self.tables.lut,
      params: self.tables.params.with_kernel(&kernel),
    };
    self.kernel = kernel;
    self.publish(tables);
    info!(
      kernel = %kernel.to_hex(),
      extent = kernel.extent(),
      subtract_center = kernel.subtract_center(),
      "kernel published");
  }

  /// On error the active kernel is kept.
  pub fn set_kernel_hex(&mut self, hex: &str, subtract_center: bool, extent: u32) -> Result<()> {
    let kernel = Kernel::from_hex(hex, extent, subtract_center).map_err(|err| {
      warn!(hex, extent, %err, "rejected kernel");
      err
    })?;
    self.set_kernel(kernel);
    Ok(())
  }

  /// Cells inside both the old and the new bounds survive. The stride
  /// alignment the simulation was configured with is kept.
  pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
    let params = SimParams::aligned(width, height, self.stride_align_words, &self.kernel)
      .map_err(|err| {
        warn!(width, height, %err, "rejected grid size");
        err
      })?;
    let lut = self.tables.lut;
    self.publish(Tables { lut, params });
    info!(width, height, stride_words = params.stride_words(), "geometry published");
    Ok(())
  }

  /// One generation against the tables active when it starts.
  pub fn step(&mut self) {
    let tables = self.tables();
    self.universe.step(&tables.lut);
  }

  pub fn run(&mut self, generations: u64) {
    for _ in 0..generations {
      self.step();
    }
    debug!(
      generations,
      generation = self.universe.generation(),
      population = self.universe.population(),
      "run finished");
  }

  pub fn reset(&mut self) {
    self.universe.clear();
  }

  pub fn seed_random_sparse(&mut self, density: f64) {
    self.universe.seed_random(density, &mut self.rng);
  }

  pub fn seed_random_dense(&mut self) {
    self.seed_random_sparse(0.5);
  }

  pub fn seed_checkerboard(&mut self) {
    self.universe.seed_checkerboard();
  }

  /// Clears the grid and places a Gosper glider gun near the top-left.
  pub fn seed_glider_gun(&mut self) {
    self.universe.clear();
    self.universe.place(&GOSPER_GLIDER_GUN, 2, 2);
  }
}
