use lifekernel::patterns::{GLIDER, LIGHTWEIGHT_SPACESHIP};
use lifekernel::*;

fn alive(uni: &Universe) -> Vec<(i64, i64)> {
  let params = uni.params();
  let mut cells = vec![];
  for y in 0..params.height() as i64 {
    for x in 0..params.width() as i64 {
      if uni.get(x, y) {
        cells.push((x, y));
      }
    }
  }
  cells
}

fn shifted(cells: &[(i64, i64)], dx: i64, dy: i64, w: i64, h: i64) -> Vec<(i64, i64)> {
  let mut cells = cells.iter()
    .map(|&(x, y)| ((x + dx).rem_euclid(w), (y + dy).rem_euclid(h)))
    .collect::<Vec<_>>();
  cells.sort_by_key(|&(x, y)| (y, x));
  cells
}

#[test]
fn glider_travels() {
  let lut = RuleLut::classic();
  let mut uni = Universe::new(SimParams::new(16, 16, &Kernel::classic()).unwrap());
  uni.place(&GLIDER, 1, 1);
  let start = alive(&uni);

  for _ in 0..4 {
    uni.step(&lut);
  }
  assert_eq!(alive(&uni), shifted(&start, 1, 1, 16, 16));

  for _ in 0..60 {
    uni.step(&lut);
  }
  assert_eq!(alive(&uni), start);
  assert_eq!(uni.generation(), 64);
}

#[test]
fn glider_crosses_word_boundary() {
  let lut = RuleLut::classic();
  let params = SimParams::aligned(70, 20, 4, &Kernel::classic()).unwrap();
  let mut uni = Universe::new(params);
  uni.place(&GLIDER, 28, 3);
  let start = alive(&uni);
  for _ in 0..24 {
    uni.step(&lut);
  }
  assert_eq!(alive(&uni), shifted(&start, 6, 6, 70, 20));
}

#[test]
fn spaceship_travels() {
  let lut = RuleLut::classic();
  let mut uni = Universe::new(SimParams::new(40, 12, &Kernel::classic()).unwrap());
  uni.place(&LIGHTWEIGHT_SPACESHIP, 20, 4);
  let start = alive(&uni);
  for _ in 0..4 {
    uni.step(&lut);
  }
  assert_eq!(alive(&uni), shifted(&start, -2, 0, 40, 12));
}
