use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const BRICK_WIDTH: f64 = 85.0;
pub const BRICK_HEIGHT: f64 = 35.0;

/// Grid of bricks covering the heading, one extra row and two extra columns so
/// the staggered rows still reach the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallLayout {
    pub rows: u32,
    pub cols: u32,
}

impl WallLayout {
    pub fn for_box(width: f64, height: f64) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        Self {
            rows: (height / BRICK_HEIGHT).ceil() as u32 + 1,
            cols: (width / BRICK_WIDTH).ceil() as u32 + 2,
        }
    }

    pub fn len(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Brick whose landing starts the title reveal.
    pub fn trigger_index(&self) -> usize {
        self.len() / 2
    }

    /// Resting position (left, top) in px. Odd rows are shifted half a brick left.
    pub fn position(&self, index: usize) -> (f64, f64) {
        let cols = self.cols.max(1) as usize;
        let row = index / cols;
        let col = index % cols;
        let offset_x = if row % 2 == 0 { 0.0 } else { -BRICK_WIDTH / 2.0 };
        (offset_x + col as f64 * BRICK_WIDTH, row as f64 * BRICK_HEIGHT)
    }
}

/// Where a brick starts its flight, relative to its resting position.
#[derive(Debug, Clone, PartialEq)]
pub struct BrickFlight {
    pub left: f64,
    pub top: f64,
    pub from_x: f64,
    pub from_y: f64,
    pub rotation: f64,
    pub delay_ms: u32,
}

/// One flight per brick. Each brick comes in from a random side with a random
/// spin; the same seed always produces the same wall.
pub fn brick_flights(layout: &WallLayout, seed: u64) -> Vec<BrickFlight> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..layout.len())
        .map(|i| {
            let (left, top) = layout.position(i);
            let spread = (rng.gen::<f64>() - 0.5) * 600.0;
            let distance = 1000.0 + rng.gen::<f64>() * 400.0;
            let (from_x, from_y) = match rng.gen_range(0..4) {
                0 => (spread, -distance),
                1 => (distance, spread),
                2 => (spread, distance),
                _ => (-distance, spread),
            };
            BrickFlight {
                left,
                top,
                from_x,
                from_y,
                rotation: rng.gen::<f64>() * 720.0 - 360.0,
                delay_ms: super::timing::brick_delay_ms(i),
            }
        })
        .collect()
}
