use lifekernel::*;
use tracing::{info, Level};

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .init();

  let config = LifeConfig { width: 256, height: 256, seed: Some(1), ..LifeConfig::default() };
  let mut sim = Simulation::from_config(&config)?;
  sim.seed_glider_gun();
  for _ in 0..10 {
    sim.run(30);
    info!(
      generation = sim.universe().generation(),
      population = sim.universe().population(),
      "gun");
  }

  sim.set_rule_string("B36/S23")?;
  sim.seed_random_sparse(0.2);
  sim.run(100);
  info!(rule = %sim.rule(), population = sim.universe().population(), "soup");
  Ok(())
}
