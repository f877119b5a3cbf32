use thiserror::Error;

/// A rejected rule string or kernel description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("empty rule string")]
  EmptyRule,

  #[error("rule {0:?} is not of the form B<list>/S<list>")]
  MissingMarkers(String),

  #[error("empty {0} list")]
  EmptyList(Section),

  #[error("invalid number {0:?}")]
  InvalidNumber(String),

  #[error("inverted range {lo}-{hi}")]
  InvertedRange { lo: u32, hi: u32 },

  #[error("neighbor count {0} is out of range 0..=256")]
  OutOfRange(u32),

  #[error("kernel hex length {0} is not 4 digits per row for 1..=16 rows")]
  KernelLength(usize),

  #[error("invalid hex digit {ch:?} at position {index}")]
  KernelDigit { ch: char, index: usize },
}

/// The two lists of a rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Birth,
  Survival,
}

impl std::fmt::Display for Section {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Birth => write!(f, "birth"),
      Self::Survival => write!(f, "survival"),
    }
  }
}

/// Values that are well-formed but cannot describe a valid simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("kernel extent {0} is out of range 1..=16")]
  KernelExtent(u32),

  #[error("kernel declares extent {declared} but encodes {parsed} rows")]
  ExtentMismatch { declared: u32, parsed: u32 },

  #[error("kernel radius {0} does not fit in 16 rows")]
  KernelRadius(u32),

  #[error("row stride of {stride} words cannot hold {width} cells (need {min})")]
  Stride { width: u32, stride: u32, min: u32 },

  #[error("grid of {width}x{height} cells is empty")]
  EmptyGrid { width: u32, height: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error(transparent)]
  Domain(#[from] DomainError),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
