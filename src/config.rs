use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::kernel::Kernel;
use crate::params::SimParams;
use crate::rule::Rule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
  /// Hex rows; `None` selects the full square of side `extent`.
  pub hex: Option<String>,
  pub extent: u32,
  pub subtract_center: bool,
  /// Apply the kernel horizontally mirrored.
  pub mirrored: bool,
}

impl Default for KernelConfig {
  fn default() -> Self {
    Self {
      hex: None,
      extent: 3,
      subtract_center: true,
      mirrored: false,
    }
  }
}

impl KernelConfig {
  pub fn build(&self) -> Result<Kernel> {
    let kernel = match &self.hex {
      Some(hex) => Kernel::from_hex(hex, self.extent, self.subtract_center)?,
      None => Kernel::new([!0; 16], self.extent, self.subtract_center)?,
    };
    Ok(if self.mirrored { kernel.mirrored() } else { kernel })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
  pub width: u32,
  pub height: u32,
  /// Row stride is rounded up to a multiple of this many words.
  pub stride_align_words: u32,
  pub rule: String,
  pub kernel: KernelConfig,
  /// Seed for random fills; `None` draws one from the OS.
  pub seed: Option<u64>,
}

impl Default for LifeConfig {
  fn default() -> Self {
    Self {
      width: 512,
      height: 512,
      stride_align_words: 1,
      rule: "B3/S23".to_owned(),
      kernel: KernelConfig::default(),
      seed: None,
    }
  }
}

impl LifeConfig {
  /// Validates every field; nothing is returned unless all of them are
  /// usable.
  pub fn compile(&self) -> Result<(Rule, Kernel, SimParams)> {
    let rule: Rule = self.rule.parse()?;
    let kernel = self.kernel.build()?;
    let params = SimParams::aligned(self.width, self.height, self.stride_align_words, &kernel)?;
    Ok((rule, kernel, params))
  }
}
