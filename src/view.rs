//! Camera state for whatever draws the grid. Pixel coordinates are
//! drawable pixels with the origin at the top-left corner; cell
//! coordinates are fractional grid cells.

use bytemuck::{Pod, Zeroable};
use crate::params::SimParams;

pub const DEFAULT_ALIVE_ARGB: u32 = 0xFFFF_FFFF;
pub const DEFAULT_DEAD_ARGB: u32 = 0xFF00_0000;

/// Zoom multiplier per unit of wheel delta.
const ZOOM_STEP: f32 = 1.1;

/// Per-frame block read by the renderer. Padding keeps the two-component
/// fields on 8-byte boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ViewParams {
  pub width: u32,
  pub height: u32,
  pub stride_words: u32,
  _pad0: u32,
  pub view_size_px: [u32; 2],
  pub center_cell: [f32; 2],
  pub zoom: f32,
  _pad1: u32,
  pub alive_argb: u32,
  pub dead_argb: u32,
}

impl ViewParams {
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
  view_size_px: [u32; 2],
  backing_scale: f32,
  center_cell: [f32; 2],
  /// Drawable pixels per cell.
  zoom: f32,
  pub min_zoom: f32,
  pub max_zoom: f32,
  pub alive_argb: u32,
  pub dead_argb: u32,
}

impl Camera {
  pub fn new(view_width: u32, view_height: u32) -> Self {
    Self {
      view_size_px: [view_width, view_height],
      backing_scale: 1.0,
      center_cell: [0.0, 0.0],
      zoom: 1.0,
      min_zoom: 1.0 / 64.0,
      max_zoom: 64.0,
      alive_argb: DEFAULT_ALIVE_ARGB,
      dead_argb: DEFAULT_DEAD_ARGB,
    }
  }

  pub fn view_size_px(&self) -> [u32; 2] {
    self.view_size_px
  }

  pub fn center_cell(&self) -> [f32; 2] {
    self.center_cell
  }

  pub fn zoom(&self) -> f32 {
    self.zoom
  }

  pub fn backing_scale(&self) -> f32 {
    self.backing_scale
  }

  pub fn resize_drawable(&mut self, width: u32, height: u32) {
    self.view_size_px = [width, height];
  }

  /// Rescales the drawable and the zoom so cells keep their on-screen
  /// size in points.
  pub fn set_backing_scale(&mut self, scale: f32) {
    if !(scale.is_finite() && scale > 0.0) {
      return;
    }
    let ratio = scale / self.backing_scale;
    let [w, h] = self.view_size_px;
    self.view_size_px = [
      (w as f32 * ratio).round() as u32,
      (h as f32 * ratio).round() as u32,
    ];
    self.zoom = self.clamp_zoom(self.zoom * ratio);
    self.backing_scale = scale;
  }

  /// Drags the content by `(dx, dy)` pixels.
  pub fn pan_by_pixels(&mut self, dx: f32, dy: f32) {
    self.center_cell[0] -= dx / self.zoom;
    self.center_cell[1] -= dy / self.zoom;
  }

  /// Zooms by `ZOOM_STEP ^ wheel_delta`, keeping the cell under `(mx, my)`
  /// in place.
  pub fn zoom_at_pixel(&mut self, mx: f32, my: f32, wheel_delta: f32) {
    let before = self.pixel_to_cell(mx, my);
    self.zoom = self.clamp_zoom(self.zoom * ZOOM_STEP.powf(wheel_delta));
    let after = self.pixel_to_cell(mx, my);
    self.center_cell[0] += before[0] - after[0];
    self.center_cell[1] += before[1] - after[1];
  }

  pub fn set_zoom(&mut self, zoom: f32) {
    if zoom.is_finite() && zoom > 0.0 {
      self.zoom = self.clamp_zoom(zoom);
    }
  }

  /// Centers a `width` x `height` grid and shows all of it.
  pub fn zoom_to_fit(&mut self, width: u32, height: u32) {
    let [vw, vh] = self.view_size_px;
    let fit = (vw as f32 / width.max(1) as f32).min(vh as f32 / height.max(1) as f32);
    self.set_zoom(fit);
    self.center_cell = [width as f32 / 2.0, height as f32 / 2.0];
  }

  /// Centers a `width` x `height` grid at one pixel per cell.
  pub fn reset_view(&mut self, width: u32, height: u32) {
    self.zoom = self.clamp_zoom(1.0);
    self.center_cell = [width as f32 / 2.0, height as f32 / 2.0];
  }

  pub fn pixel_to_cell(&self, px: f32, py: f32) -> [f32; 2] {
    let [vw, vh] = self.view_size_px;
    [
      self.center_cell[0] + (px - vw as f32 / 2.0) / self.zoom,
      self.center_cell[1] + (py - vh as f32 / 2.0) / self.zoom,
    ]
  }

  pub fn cell_to_pixel(&self, cx: f32, cy: f32) -> [f32; 2] {
    let [vw, vh] = self.view_size_px;
    [
      (cx - self.center_cell[0]) * self.zoom + vw as f32 / 2.0,
      (cy - self.center_cell[1]) * self.zoom + vh as f32 / 2.0,
    ]
  }

  pub fn view_params(&self, sim: &SimParams) -> ViewParams {
    ViewParams {
      width: sim.width(),
      height: sim.height(),
      stride_words: sim.stride_words(),
      _pad0: 0,
      view_size_px: self.view_size_px,
      center_cell: self.center_cell,
      zoom: self.zoom,
      _pad1: 0,
      alive_argb: self.alive_argb,
      dead_argb: self.dead_argb,
    }
  }

  fn clamp_zoom(&self, zoom: f32) -> f32 {
    zoom.max(self.min_zoom).min(self.max_zoom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kernel::Kernel;

  fn close(a: [f32; 2], b: [f32; 2]) -> bool {
    (a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3
  }

  #[test]
  fn layout() {
    assert_eq!(std::mem::size_of::<ViewParams>(), 48);
    let sim = SimParams::new(100, 50, &Kernel::classic()).unwrap();
    let mut camera = Camera::new(800, 600);
    camera.set_zoom(2.0);
    let view = camera.view_params(&sim);
    assert_eq!(view.stride_words, 4);
    assert_eq!(&view.as_bytes()[16..20], &800u32.to_ne_bytes());
    assert_eq!(&view.as_bytes()[32..36], &2.0f32.to_ne_bytes());
    assert_eq!(&view.as_bytes()[40..44], &DEFAULT_ALIVE_ARGB.to_ne_bytes());
  }

  #[test]
  fn pixel_cell_inverse() {
    let mut camera = Camera::new(640, 480);
    camera.reset_view(1000, 1000);
    camera.set_zoom(4.0);
    assert!(close(camera.pixel_to_cell(320.0, 240.0), [500.0, 500.0]));
    let cell = camera.pixel_to_cell(17.0, 401.0);
    assert!(close(camera.cell_to_pixel(cell[0], cell[1]), [17.0, 401.0]));
  }

  #[test]
  fn pan_moves_content_with_cursor() {
    let mut camera = Camera::new(100, 100);
    camera.set_zoom(2.0);
    let cell = camera.pixel_to_cell(10.0, 10.0);
    camera.pan_by_pixels(6.0, -4.0);
    assert!(close(camera.pixel_to_cell(16.0, 6.0), cell));
  }

  #[test]
  fn zoom_keeps_cursor_cell() {
    let mut camera = Camera::new(800, 600);
    camera.reset_view(256, 256);
    let cell = camera.pixel_to_cell(700.0, 100.0);
    camera.zoom_at_pixel(700.0, 100.0, 3.0);
    assert!((camera.zoom() - 1.1f32.powi(3)).abs() < 1e-5);
    assert!(close(camera.pixel_to_cell(700.0, 100.0), cell));
    camera.zoom_at_pixel(700.0, 100.0, -1000.0);
    assert_eq!(camera.zoom(), camera.min_zoom);
  }

  #[test]
  fn fit_and_clamp() {
    let mut camera = Camera::new(800, 400);
    camera.zoom_to_fit(200, 200);
    assert_eq!(camera.zoom(), 2.0);
    assert_eq!(camera.center_cell(), [100.0, 100.0]);
    camera.set_zoom(1000.0);
    assert_eq!(camera.zoom(), 64.0);
    camera.set_zoom(-1.0);
    assert_eq!(camera.zoom(), 64.0);
  }

  #[test]
  fn backing_scale_keeps_point_size() {
    let mut camera = Camera::new(400, 300);
    camera.set_zoom(3.0);
    camera.set_backing_scale(2.0);
    assert_eq!(camera.view_size_px(), [800, 600]);
    assert_eq!(camera.zoom(), 6.0);
    camera.set_backing_scale(0.0);
    assert_eq!(camera.backing_scale(), 2.0);
  }
}
