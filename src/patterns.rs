/// A seed pattern: live cells as `(x, y)` relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
  pub name: &'static str,
  pub width: u32,
  pub height: u32,
  pub cells: &'static [(u32, u32)],
}

/// Travels `(+1, +1)` every 4 generations.
pub const GLIDER: Pattern = Pattern {
  name: "Glider",
  width: 3,
  height: 3,
  cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
  name: "Blinker",
  width: 3,
  height: 1,
  cells: &[(0, 0), (1, 0), (2, 0)],
};

pub const BLOCK: Pattern = Pattern {
  name: "Block",
  width: 2,
  height: 2,
  cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const LIGHTWEIGHT_SPACESHIP: Pattern = Pattern {
  name: "Lightweight spaceship",
  width: 5,
  height: 4,
  cells: &[
    (1, 0), (4, 0),
    (0, 1),
    (0, 2), (4, 2),
    (0, 3), (1, 3), (2, 3), (3, 3),
  ],
};

/// Period 30, one glider per period.
pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
  name: "Gosper glider gun",
  width: 36,
  height: 9,
  cells: &[
    (24, 0),
    (22, 1), (24, 1),
    (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
    (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
    (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
    (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
    (10, 6), (16, 6), (24, 6),
    (11, 7), (15, 7),
    (12, 8), (13, 8),
  ],
};

pub const PATTERNS: &[Pattern] = &[
  GLIDER,
  BLINKER,
  BLOCK,
  LIGHTWEIGHT_SPACESHIP,
  GOSPER_GLIDER_GUN,
];
