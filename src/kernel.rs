//! Neighborhood kernels: up to 16 rows of 16-bit masks, where bit `j` of
//! row `r` marks the cell at offset `(j - c, r - c)`, `c = extent / 2`.

use itertools::Itertools;
use crate::error::{DomainError, LifeError, ParseError};

pub const MAX_EXTENT: u32 = 16;

/// Hex digits encoding one kernel row.
pub const DIGITS_PER_ROW: usize = 4;

/// Rows decoded from a kernel hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRows {
  /// Rows past `len` are zero.
  pub rows: [u16; MAX_EXTENT as usize],
  pub len: u32,
}

/// Decodes 4 hex digits per row, 1 to 16 rows, digits in either case.
pub fn parse_hex_rows(hex: &str) -> Result<HexRows, ParseError> {
  let nibbles = hex.chars()
    .enumerate()
    .map(|(index, ch)| {
      ch.to_digit(16)
        .map(|d| d as u16)
        .ok_or(ParseError::KernelDigit { ch, index })
    })
    .collect::<Result<Vec<_>, _>>()?;

  let n = nibbles.len();
  if n == 0 || n % DIGITS_PER_ROW != 0 || n / DIGITS_PER_ROW > MAX_EXTENT as usize {
    return Err(ParseError::KernelLength(n));
  }

  let mut rows = [0u16; MAX_EXTENT as usize];
  for (row, digits) in rows.iter_mut().zip(nibbles.chunks(DIGITS_PER_ROW)) {
    *row = digits.iter().fold(0, |acc, &d| acc << 4 | d);
  }
  Ok(HexRows { rows, len: (n / DIGITS_PER_ROW) as u32 })
}

/// Bit 0 <-> bit 15, bit 1 <-> bit 14, ...
pub fn reverse_bits16(v: u16) -> u16 {
  v.reverse_bits()
}

/// Mirrors the low `n` bits of `row`. Bits at or above `n` do not affect
/// the result and come out zero.
pub fn reverse_row(row: u16, n: u32) -> u16 {
  ((reverse_bits16(row) as u32) >> (16 - n.min(16))) as u16
}

fn row_mask(extent: u32) -> u16 {
  if extent >= 16 {
    !0
  } else {
    (1 << extent) - 1
  }
}

/// `2r + 1`, for radii that fit in [`MAX_EXTENT`] rows.
fn extent_of(radius: u32) -> Result<u32, DomainError> {
  if radius > (MAX_EXTENT - 1) / 2 {
    return Err(DomainError::KernelRadius(radius));
  }
  Ok(2 * radius + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kernel {
  rows: [u16; MAX_EXTENT as usize],
  extent: u32,
  subtract_center: bool,
}

impl Kernel {
  /// Bits and rows beyond `extent` are dropped.
  pub fn new(
    rows: [u16; MAX_EXTENT as usize],
    extent: u32,
    subtract_center: bool,
  ) -> Result<Self, DomainError> {
    if extent == 0 || extent > MAX_EXTENT {
      return Err(DomainError::KernelExtent(extent));
    }

    let mask = row_mask(extent);
    let mut masked = [0u16; MAX_EXTENT as usize];
    for (dst, src) in masked.iter_mut().zip(rows.iter()).take(extent as usize) {
      *dst = src & mask;
    }
    Ok(Self { rows: masked, extent, subtract_center })
  }

  /// The hex string must encode exactly `extent` rows.
  pub fn from_hex(hex: &str, extent: u32, subtract_center: bool) -> Result<Self, LifeError> {
    if extent == 0 || extent > MAX_EXTENT {
      return Err(DomainError::KernelExtent(extent).into());
    }
    let parsed = parse_hex_rows(hex)?;
    if parsed.len != extent {
      return Err(DomainError::ExtentMismatch { declared: extent, parsed: parsed.len }.into());
    }
    Ok(Self::new(parsed.rows, extent, subtract_center)?)
  }

  /// 3x3 Moore neighborhood without the center cell.
  pub fn classic() -> Self {
    let mut rows = [0u16; MAX_EXTENT as usize];
    rows[..3].copy_from_slice(&[0b111; 3]);
    Self { rows, extent: 3, subtract_center: true }
  }

  /// Full `(2r+1)x(2r+1)` square, center excluded.
  pub fn moore(radius: u32) -> Result<Self, DomainError> {
    let extent = extent_of(radius)?;
    let rows = [row_mask(extent); MAX_EXTENT as usize];
    Self::new(rows, extent, true)
  }

  /// Cells within Manhattan distance `radius`, center excluded.
  pub fn von_neumann(radius: u32) -> Result<Self, DomainError> {
    let extent = extent_of(radius)?;
    let r = radius as i32;
    let mut rows = [0u16; MAX_EXTENT as usize];
    for (y, row) in rows.iter_mut().enumerate().take(extent as usize) {
      let reach = r - (y as i32 - r).abs();
      for x in (r - reach)..=(r + reach) {
        *row |= 1 << x;
      }
    }
    Self::new(rows, extent, true)
  }

  pub fn rows(&self) -> &[u16; MAX_EXTENT as usize] {
    &self.rows
  }

  pub fn extent(&self) -> u32 {
    self.extent
  }

  pub fn subtract_center(&self) -> bool {
    self.subtract_center
  }

  pub fn with_subtract_center(self, subtract_center: bool) -> Self {
    Self { subtract_center, ..self }
  }

  pub fn center(&self) -> u32 {
    self.extent / 2
  }

  pub fn contains(&self, row: u32, col: u32) -> bool {
    row < self.extent && col < self.extent && self.rows[row as usize] >> col & 1 != 0
  }

  pub fn covers_center(&self) -> bool {
    self.contains(self.center(), self.center())
  }

  /// Number of cells the kernel covers.
  pub fn weight(&self) -> u32 {
    self.rows.iter().map(|r| r.count_ones()).sum()
  }

  /// Largest neighbor count the kernel can produce.
  pub fn max_count(&self) -> u32 {
    self.weight() - (self.subtract_center && self.covers_center()) as u32
  }

  /// `(dx, dy)` of every covered cell, the center included.
  pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
    let c = self.center() as i32;
    (0..self.extent)
      .cartesian_product(0..self.extent)
      .filter(move |&(row, col)| self.contains(row, col))
      .map(move |(row, col)| (col as i32 - c, row as i32 - c))
  }

  /// Horizontal mirror image.
  pub fn mirrored(&self) -> Self {
    let mut rows = self.rows;
    for row in rows.iter_mut().take(self.extent as usize) {
      *row = reverse_row(*row, self.extent);
    }
    Self { rows, ..*self }
  }

  /// Vertical mirror image.
  pub fn flipped(&self) -> Self {
    let mut rows = self.rows;
    rows[..self.extent as usize].reverse();
    Self { rows, ..*self }
  }

  /// Inverse of [`parse_hex_rows`], `extent` rows.
  pub fn to_hex(&self) -> String {
    self.rows[..self.extent as usize].iter()
      .map(|row| format!("{:04X}", row))
      .join("")
  }
}

impl Default for Kernel {
  fn default() -> Self {
    Self::classic()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn reverse_known_values() {
    assert_eq!(reverse_bits16(0b1000_0000_0000_0000), 0b0000_0000_0000_0001);
    assert_eq!(reverse_bits16(0), 0);
    assert_eq!(reverse_bits16(0xFFFF), 0xFFFF);
    assert_eq!(reverse_bits16(0x00F1), 0x8F00);
  }

  #[test]
  fn reverse_twice_is_identity() {
    for v in 0..=u16::MAX {
      assert_eq!(reverse_bits16(reverse_bits16(v)), v);
    }
  }

  #[test]
  fn reverse_row_ignores_high_bits() {
    for n in 1..=16 {
      for v in (0..=u16::MAX).step_by(97) {
        let low = v & row_mask(n);
        let reversed = reverse_row(v, n);
        assert_eq!(reversed, reverse_row(low, n));
        assert_eq!(reversed & !row_mask(n), 0);
        for j in 0..n {
          assert_eq!(reversed >> j & 1, low >> (n - 1 - j) & 1);
        }
      }
    }
  }

  #[test]
  fn parse_one_row() {
    let parsed = parse_hex_rows("000F").unwrap();
    assert_eq!(parsed.len, 1);
    assert_eq!(parsed.rows[0], 0xF);
    assert!(parsed.rows[1..].iter().all(|&r| r == 0));
  }

  #[test]
  fn parse_mixed_case() {
    let parsed = parse_hex_rows("abCDef01").unwrap();
    assert_eq!(parsed.len, 2);
    assert_eq!(&parsed.rows[..3], &[0xABCD, 0xEF01, 0]);
  }

  #[test]
  fn parse_every_row_count() {
    for rows in 1..=16 {
      let parsed = parse_hex_rows(&"8001".repeat(rows)).unwrap();
      assert_eq!(parsed.len, rows as u32);
      assert!(parsed.rows[..rows].iter().all(|&r| r == 0x8001));
      assert!(parsed.rows[rows..].iter().all(|&r| r == 0));
    }
  }

  #[test]
  fn parse_failures() {
    assert_eq!(parse_hex_rows(""), Err(ParseError::KernelLength(0)));
    assert_eq!(parse_hex_rows("000"), Err(ParseError::KernelLength(3)));
    assert_eq!(parse_hex_rows("000F0"), Err(ParseError::KernelLength(5)));
    assert_eq!(parse_hex_rows(&"0000".repeat(17)), Err(ParseError::KernelLength(68)));
    assert_eq!(parse_hex_rows("00G0"), Err(ParseError::KernelDigit { ch: 'G', index: 2 }));
    assert_eq!(parse_hex_rows("0x07"), Err(ParseError::KernelDigit { ch: 'x', index: 1 }));
  }

  #[test]
  fn from_hex_checks_extent() {
    let kernel = Kernel::from_hex("000700050007", 3, true).unwrap();
    assert_eq!(kernel.extent(), 3);
    assert!(!kernel.covers_center());
    assert_eq!(kernel.weight(), 8);

    assert_eq!(
      Kernel::from_hex("00070007", 3, true),
      Err(DomainError::ExtentMismatch { declared: 3, parsed: 2 }.into()));
    assert_eq!(Kernel::from_hex("0007", 0, true), Err(DomainError::KernelExtent(0).into()));
    assert_eq!(Kernel::from_hex("0007", 17, true), Err(DomainError::KernelExtent(17).into()));
    assert_eq!(Kernel::from_hex("00z7", 1, true), Err(ParseError::KernelDigit { ch: 'z', index: 2 }.into()));
  }

  #[test]
  fn new_masks_beyond_extent() {
    let kernel = Kernel::new([0xFFFF; 16], 3, false).unwrap();
    assert_eq!(kernel, Kernel::moore(1).unwrap().with_subtract_center(false));
    assert_eq!(kernel.to_hex(), "000700070007");
  }

  #[test]
  fn classic_kernel() {
    let kernel = Kernel::classic();
    assert_eq!(kernel, Kernel::moore(1).unwrap());
    assert_eq!(kernel, Kernel::default());
    assert!(kernel.covers_center());
    assert_eq!(kernel.weight(), 9);
    assert_eq!(kernel.max_count(), 8);
    assert_eq!(kernel.offsets().count(), 9);
    assert!(kernel.offsets().all(|(dx, dy)| dx.abs() <= 1 && dy.abs() <= 1));
  }

  #[test]
  fn large_kernels() {
    assert_eq!(Kernel::moore(7).unwrap().weight(), 225);
    assert_eq!(Kernel::moore(8), Err(DomainError::KernelRadius(8)));
    assert_eq!(Kernel::von_neumann(8), Err(DomainError::KernelRadius(8)));
    assert_eq!(Kernel::moore(1 << 31), Err(DomainError::KernelRadius(1 << 31)));
    assert_eq!(Kernel::von_neumann(u32::MAX), Err(DomainError::KernelRadius(u32::MAX)));
    assert_eq!(Kernel::von_neumann(1).unwrap().to_hex(), "000200070002");
    assert_eq!(Kernel::von_neumann(2).unwrap().weight(), 13);
    let full = Kernel::new([0xFFFF; 16], 16, true).unwrap();
    assert_eq!(full.max_count(), 255);
    assert_eq!(full.with_subtract_center(false).max_count(), 256);
  }

  #[test]
  fn orientation() {
    let kernel = Kernel::from_hex("000100020004", 3, false).unwrap();
    assert_eq!(kernel.mirrored().to_hex(), "000400020001");
    assert_eq!(kernel.flipped().to_hex(), "000400020001");
    assert_eq!(kernel.mirrored().mirrored(), kernel);
    assert_eq!(kernel.mirrored().flipped(), kernel);

    let kernel = Kernel::from_hex("0003", 1, false).unwrap();
    assert_eq!(kernel.to_hex(), "0001");
    assert_eq!(kernel.mirrored(), kernel);
  }

  #[test]
  fn offsets_follow_bits() {
    let kernel = Kernel::from_hex("000100000000", 3, false).unwrap();
    assert_eq!(kernel.offsets().collect_vec(), vec![(-1, -1)]);
    let kernel = Kernel::from_hex("000000000004", 3, false).unwrap();
    assert_eq!(kernel.offsets().collect_vec(), vec![(1, 1)]);
  }
}
