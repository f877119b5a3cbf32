use indexmap::IndexMap;
use crate::kernel::Kernel;
use crate::rule::{Rule, GAME_OF_LIFE};

/// A rule together with the neighborhood it is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
  pub rule: Rule,
  pub kernel: Kernel,
}

/// Built-in presets in display order.
pub fn presets() -> IndexMap<&'static str, Preset> {
  let moore = Kernel::classic();
  let mut map = IndexMap::new();
  map.insert("Life", Preset { rule: GAME_OF_LIFE, kernel: moore });
  map.insert("HighLife", Preset {
    rule: Rule::from_counts(&[3, 6], &[2, 3]),
    kernel: moore,
  });
  map.insert("Day & Night", Preset {
    rule: Rule::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
    kernel: moore,
  });
  map.insert("Life without Death", Preset {
    rule: Rule::from_singles(3, 0, 8),
    kernel: moore,
  });
  map.insert("Maze", Preset {
    rule: Rule::from_singles(3, 1, 5),
    kernel: moore,
  });
  // Larger than Life, radius 5, the cell counts itself
  if let Ok(kernel) = Kernel::moore(5) {
    map.insert("Bugs", Preset {
      rule: Rule::from_ranges(34, 45, 34, 58),
      kernel: kernel.with_subtract_center(false),
    });
  }
  map
}

/// Case-insensitive lookup by name.
pub fn preset(name: &str) -> Option<Preset> {
  presets()
    .into_iter()
    .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
    .map(|(_, preset)| preset)
}
