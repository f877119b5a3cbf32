use bytemuck::{Pod, Zeroable};
use crate::error::DomainError;
use crate::kernel::{Kernel, MAX_EXTENT};

/// Per-generation parameter block: grid geometry plus the packed kernel.
///
/// The only constructors validate the geometry, so a stride too narrow
/// for the width, or a kernel without its extent, is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct SimParams {
  width: u32,
  height: u32,
  stride_words: u32,
  extent: u32,
  subtract_center: u32,
  kernel_rows: [u16; MAX_EXTENT as usize],
  _pad: u32,
}

impl SimParams {
  /// Narrowest row stride in 32-bit words for `width` cells.
  pub fn min_stride_words(width: u32) -> u32 {
    width / 32 + (width % 32 != 0) as u32
  }

  pub fn new(width: u32, height: u32, kernel: &Kernel) -> Result<Self, DomainError> {
    Self::with_stride(width, height, Self::min_stride_words(width), kernel)
  }

  /// Stride rounded up to a multiple of `align_words`.
  pub fn aligned(
    width: u32,
    height: u32,
    align_words: u32,
    kernel: &Kernel,
  ) -> Result<Self, DomainError> {
    let align = align_words.max(1);
    let min = Self::min_stride_words(width);
    // min is at most 2^27: the result is either `align` or below 2^28
    let stride = (min / align + (min % align != 0) as u32) * align;
    Self::with_stride(width, height, stride, kernel)
  }

  pub fn with_stride(
    width: u32,
    height: u32,
    stride_words: u32,
    kernel: &Kernel,
  ) -> Result<Self, DomainError> {
    if width == 0 || height == 0 {
      return Err(DomainError::EmptyGrid { width, height });
    }
    let min = Self::min_stride_words(width);
    if stride_words < min {
      return Err(DomainError::Stride { width, stride: stride_words, min });
    }

    Ok(Self {
      width,
      height,
      stride_words,
      extent: kernel.extent(),
      subtract_center: kernel.subtract_center() as u32,
      kernel_rows: *kernel.rows(),
      _pad: 0,
    })
  }

  /// Same geometry, different kernel.
  pub fn with_kernel(&self, kernel: &Kernel) -> Self {
    Self {
      extent: kernel.extent(),
      subtract_center: kernel.subtract_center() as u32,
      kernel_rows: *kernel.rows(),
      ..*self
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn stride_words(&self) -> u32 {
    self.stride_words
  }

  pub fn extent(&self) -> u32 {
    self.extent
  }

  pub fn subtract_center(&self) -> bool {
    self.subtract_center != 0
  }

  pub fn kernel_rows(&self) -> &[u16; MAX_EXTENT as usize] {
    &self.kernel_rows
  }

  pub fn kernel(&self) -> Kernel {
    // extent was validated when the kernel was built
    Kernel::new(self.kernel_rows, self.extent, self.subtract_center()).unwrap_or_default()
  }

  /// Total storage words of one generation.
  pub fn grid_words(&self) -> usize {
    self.stride_words as usize * self.height as usize
  }

  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }
}
