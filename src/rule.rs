use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use std::sync::OnceLock;
use bytemuck::{Pod, Zeroable};
use itertools::Itertools;
use regex::Regex;
use crate::error::{ParseError, Section};

/// Largest neighbor count a 16x16 kernel can produce.
pub const MAX_COUNT: u32 = 256;

/// Width of a lookup table row, one column per count in `0..=MAX_COUNT`.
pub const NUM_COUNTS: usize = MAX_COUNT as usize + 1;

/// Set of neighbor counts in `0..=256`, one bit per count.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask([u64; 5]);

impl NeighborMask {
  pub const EMPTY: Self = Self([0; 5]);

  /// # Panics
  ///
  /// Panics if `count > 256`.
  pub fn insert(&mut self, count: u32) {
    assert!(count <= MAX_COUNT, "neighbor count {} out of range", count);
    self.0[(count >> 6) as usize] |= 1 << (count & 63);
  }

  /// Inserts every count of the closed interval `[lo, hi]` that lies in
  /// `0..=256`. Nothing is inserted when `lo > hi`.
  pub fn insert_range(&mut self, lo: i32, hi: i32) {
    if lo > hi {
      return;
    }
    let lo = lo.max(0);
    let hi = hi.min(MAX_COUNT as i32);
    for count in lo..=hi {
      self.insert(count as u32);
    }
  }

  pub fn contains(&self, count: u32) -> bool {
    count <= MAX_COUNT && self.0[(count >> 6) as usize] >> (count & 63) & 1 != 0
  }

  pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
    (0..=MAX_COUNT).filter(move |&count| self.contains(count))
  }

  pub fn len(&self) -> usize {
    self.0.iter().map(|w| w.count_ones() as usize).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.0.iter().all(|&w| w == 0)
  }

  /// Maximal runs of consecutive counts as closed `(lo, hi)` intervals.
  fn runs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
    self.iter()
      .map(|c| (c, c))
      .coalesce(|(a, b), (c, d)| {
        if b + 1 == c {
          Ok((a, d))
        } else {
          Err(((a, b), (c, d)))
        }
      })
  }
}

impl Debug for NeighborMask {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

/// A birth/survival rule over neighbor counts `0..=256`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rule {
  birth: NeighborMask,
  survival: NeighborMask,
}

/// B3/S23
pub const GAME_OF_LIFE: Rule = Rule {
  birth: NeighborMask([0b000001000, 0, 0, 0, 0]),
  survival: NeighborMask([0b000001100, 0, 0, 0, 0]),
};

impl Rule {
  pub fn new(birth: NeighborMask, survival: NeighborMask) -> Self {
    Self { birth, survival }
  }

  /// Birth in `[b0, b1]`, survival in `[s0, s1]`, both intersected with
  /// `0..=256`. An inverted interval is empty.
  pub fn from_ranges(b0: i32, b1: i32, s0: i32, s1: i32) -> Self {
    let mut rule = Self::default();
    rule.birth.insert_range(b0, b1);
    rule.survival.insert_range(s0, s1);
    rule
  }

  pub fn from_singles(b: i32, s0: i32, s1: i32) -> Self {
    Self::from_ranges(b, b, s0, s1)
  }

  /// # Panics
  ///
  /// Panics if a count is greater than 256.
  pub fn from_counts(birth: &[u32], survival: &[u32]) -> Self {
    let mut rule = Self::default();
    birth.iter().for_each(|&c| rule.birth.insert(c));
    survival.iter().for_each(|&c| rule.survival.insert(c));
    rule
  }

  pub fn birth(&self) -> &NeighborMask {
    &self.birth
  }

  pub fn survival(&self) -> &NeighborMask {
    &self.survival
  }

  pub fn compile(&self) -> RuleLut {
    RuleLut::from_predicates(
      |count| self.birth.contains(count),
      |count| self.survival.contains(count),
    )
  }
}

fn rule_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[Bb]([^/]*)/[Ss](.*)$").expect("rule pattern"))
}

fn term_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^([0-9]+)(?:-([0-9]+))?$").expect("term pattern"))
}

/// `23`, `3678`: the single-digit notation of the 8-neighbor rules.
fn is_digit_run(list: &str) -> bool {
  list.len() > 1 &&
    list.bytes().all(|b| (b'0'..=b'8').contains(&b)) &&
    list.bytes().tuple_windows().all(|(a, b)| a < b)
}

fn parse_count(digits: &str) -> Result<u32, ParseError> {
  let count: u32 = digits.parse()
    .map_err(|_| ParseError::InvalidNumber(digits.to_owned()))?;
  if count > MAX_COUNT {
    return Err(ParseError::OutOfRange(count));
  }
  Ok(count)
}

fn parse_list(list: &str, section: Section) -> Result<NeighborMask, ParseError> {
  if list.is_empty() {
    return Err(ParseError::EmptyList(section));
  }

  let mut mask = NeighborMask::EMPTY;
  if is_digit_run(list) {
    for b in list.bytes() {
      mask.insert((b - b'0') as u32);
    }
    return Ok(mask);
  }

  for token in list.split(|c: char| c == ',' || c == ' ') {
    let caps = term_regex().captures(token)
      .ok_or_else(|| ParseError::InvalidNumber(token.to_owned()))?;
    let lo = parse_count(&caps[1])?;
    let hi = match caps.get(2) {
      Some(hi) => parse_count(hi.as_str())?,
      None => lo,
    };
    if lo > hi {
      return Err(ParseError::InvertedRange { lo, hi });
    }
    mask.insert_range(lo as i32, hi as i32);
  }
  Ok(mask)
}

impl FromStr for Rule {
  type Err = ParseError;

  /// Parses `B<list>/S<list>`. Either the whole string is accepted or
  /// nothing is produced.
  fn from_str(s: &str) -> Result<Self, ParseError> {
    let s = s.trim();
    if s.is_empty() {
      return Err(ParseError::EmptyRule);
    }
    let caps = rule_regex().captures(s)
      .ok_or_else(|| ParseError::MissingMarkers(s.to_owned()))?;
    let birth = parse_list(&caps[1], Section::Birth)?;
    let survival = parse_list(&caps[2], Section::Survival)?;
    Ok(Self { birth, survival })
  }
}

fn write_mask(f: &mut fmt::Formatter, mask: &NeighborMask) -> fmt::Result {
  if mask.iter().all(|c| c <= 8) {
    for count in mask.iter() {
      write!(f, "{}", count)?;
    }
    return Ok(());
  }

  let terms = mask.runs()
    .map(|(lo, hi)| match hi - lo {
      0 => lo.to_string(),
      1 => format!("{},{}", lo, hi),
      _ => format!("{}-{}", lo, hi),
    })
    .join(",");
  // A lone 23 would read back as {2, 3}.
  if is_digit_run(&terms) {
    write!(f, "{}-{}", terms, terms)
  } else {
    write!(f, "{}", terms)
  }
}

/// Writes the form [`FromStr`] reads back, except that an empty set comes
/// out as an empty list, which does not parse.
impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "B")?;
    write_mask(f, &self.birth)?;
    write!(f, "/S")?;
    write_mask(f, &self.survival)
  }
}

/// Next-state table indexed by `[alive][count]`, laid out exactly as the
/// block the stepper reads.
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct RuleLut {
  next: [[u8; NUM_COUNTS]; 2],
}

impl RuleLut {
  pub fn from_predicates(
    born: impl Fn(u32) -> bool,
    survive: impl Fn(u32) -> bool,
  ) -> Self {
    let mut next = [[0u8; NUM_COUNTS]; 2];
    for count in 0..=MAX_COUNT {
      next[0][count as usize] = born(count) as u8;
      next[1][count as usize] = survive(count) as u8;
    }
    Self { next }
  }

  pub fn classic() -> Self {
    GAME_OF_LIFE.compile()
  }

  pub fn from_ranges(b0: i32, b1: i32, s0: i32, s1: i32) -> Self {
    Rule::from_ranges(b0, b1, s0, s1).compile()
  }

  pub fn from_singles(b: i32, s0: i32, s1: i32) -> Self {
    Rule::from_singles(b, s0, s1).compile()
  }

  /// Counts above 256 read the last column.
  pub fn next(&self, alive: bool, count: u32) -> bool {
    self.next[alive as usize][count.min(MAX_COUNT) as usize] != 0
  }

  pub fn row(&self, alive: bool) -> &[u8; NUM_COUNTS] {
    &self.next[alive as usize]
  }

  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }
}

impl Default for RuleLut {
  fn default() -> Self {
    Self::classic()
  }
}

impl FromStr for RuleLut {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, ParseError> {
    s.parse::<Rule>().map(|rule| rule.compile())
  }
}

impl Debug for RuleLut {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let counts = |alive: bool| {
      (0..=MAX_COUNT).filter(move |&c| self.next(alive, c)).collect_vec()
    };
    f.debug_struct("RuleLut")
      .field("born", &counts(false))
      .field("survive", &counts(true))
      .finish()
  }
}
