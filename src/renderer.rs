use crate::map::MapGrid;
use crate::player::Player;
use crate::ray::Ray;

/// Distance thresholds mapping perpendicular wall distance to a shade bucket.
/// Scanned in order; bucket 0 is nearest/brightest, the last bucket catches
/// everything at or beyond the final threshold. Ordered data so adding buckets
/// or a non-linear falloff is a table edit, not new branches.
pub const SHADE_THRESHOLDS: [f32; 4] = [1.5, 3.0, 5.0, 7.0];

/// Number of wall shade buckets (the thresholds plus the darkest catch-all).
pub const SHADE_BUCKETS: usize = SHADE_THRESHOLDS.len() + 1;

#[inline]
pub fn shade_bucket(dist: f32) -> usize {
    for (bucket, threshold) in SHADE_THRESHOLDS.iter().enumerate() {
        if dist < *threshold {
            return bucket;
        }
    }
    SHADE_BUCKETS - 1
}

/// One column's worth of wall geometry: the pixel rows the wall slice spans
/// (inclusive) and its distance shade.
#[derive(Clone, Copy)]
pub struct Slice {
    pub top: usize,
    pub bottom: usize,
    pub shade: usize,
}

impl Slice {
    /// Project a perpendicular wall distance onto a vertical screen slice.
    /// Near-zero distances blow line_height past the screen; the clamp turns
    /// that into a full-height slice, which is the expected close-up case.
    pub fn project(perp_wall_dist: f32, screen_h: usize) -> Self {
        let h = screen_h as i32;
        let line_height = (screen_h as f32 / perp_wall_dist) as i32;
        let top = (h / 2 - line_height / 2).clamp(0, h - 1);
        let bottom = (h / 2 + line_height / 2).clamp(top, h - 1);
        Self {
            top: top as usize,
            bottom: bottom as usize,
            shade: shade_bucket(perp_wall_dist),
        }
    }
}

/// Per-frame wall geometry, one slice per screen column. Explicit object so
/// the column pass and the row pass hand off through it instead of globals;
/// overwritten in place every frame.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    slices: Vec<Slice>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slices: vec![
                Slice {
                    top: 0,
                    bottom: 0,
                    shade: SHADE_BUCKETS - 1
                };
                width
            ],
        }
    }

    /// Column pass: cast one ray per screen column and store its slice.
    pub fn compose(&mut self, map: &MapGrid, player: &Player) {
        for x in 0..self.width {
            let hit = Ray::new(player, x, self.width).march(map);
            self.slices[x] = Slice::project(hit.perp_wall_dist, self.height);
        }
    }

    #[inline]
    pub fn slice(&self, x: usize) -> Slice {
        self.slices[x]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}
