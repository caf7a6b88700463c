use crate::map::MapGrid;
use crate::player::Player;

/// Stands in for an infinite per-gridline step when a ray direction component
/// is exactly zero; that axis then never wins the DDA comparison.
const DELTA_SENTINEL: f32 = 1e30;

/// Which gridline orientation the ray crossed to enter the hit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    X, // vertical gridline
    Y, // horizontal gridline
}

/// One ray, cast for a single screen column. Transient: built, marched through
/// the grid, reduced to a wall slice, then discarded.
pub struct Ray {
    pub camera_x: f32, // [-1, 1) across the camera plane
    pub dir_x: f32,
    pub dir_y: f32,
    pub map_x: i32, // grid cell the ray is currently in
    pub map_y: i32,
    pub delta_dist_x: f32, // distance along the ray between successive gridlines
    pub delta_dist_y: f32,
    pub side_dist_x: f32, // accumulated distance to the next gridline per axis
    pub side_dist_y: f32,
    pub step_x: i32, // -1 or +1
    pub step_y: i32,
}

/// Interpolation parameter for column `x`: -1 at the left screen edge, 0 dead
/// ahead, approaching +1 at the right edge.
#[inline]
pub fn camera_x(x: usize, screen_w: usize) -> f32 {
    2.0 * x as f32 / screen_w as f32 - 1.0
}

/// Result of marching a ray to its first wall.
pub struct Hit {
    pub map_x: i32,
    pub map_y: i32,
    pub side: Side,
    /// Distance measured along the player's forward axis, not true Euclidean
    /// ray length. Using the raw length here would bow walls outward (fisheye).
    pub perp_wall_dist: f32,
}

impl Ray {
    pub fn new(player: &Player, column: usize, screen_w: usize) -> Self {
        let camera_x = camera_x(column, screen_w);
        let dir_x = player.dir_x + player.plane_x * camera_x;
        let dir_y = player.dir_y + player.plane_y * camera_x;

        let map_x = player.x as i32;
        let map_y = player.y as i32;

        let delta_dist_x = if dir_x != 0.0 {
            (1.0 / dir_x).abs()
        } else {
            DELTA_SENTINEL
        };
        let delta_dist_y = if dir_y != 0.0 {
            (1.0 / dir_y).abs()
        } else {
            DELTA_SENTINEL
        };

        // Step sign per axis, and distance from the player to the first
        // gridline crossing on that axis.
        let (step_x, side_dist_x) = if dir_x < 0.0 {
            (-1, (player.x - map_x as f32) * delta_dist_x)
        } else {
            (1, (map_x as f32 + 1.0 - player.x) * delta_dist_x)
        };
        let (step_y, side_dist_y) = if dir_y < 0.0 {
            (-1, (player.y - map_y as f32) * delta_dist_y)
        } else {
            (1, (map_y as f32 + 1.0 - player.y) * delta_dist_y)
        };

        Self {
            camera_x,
            dir_x,
            dir_y,
            map_x,
            map_y,
            delta_dist_x,
            delta_dist_y,
            side_dist_x,
            side_dist_y,
            step_x,
            step_y,
        }
    }

    /// DDA: step one gridline at a time along whichever axis is closer, until
    /// a wall cell is entered. The strict `<` favors X on exact diagonals;
    /// keep it strict, equal distances must advance Y.
    pub fn march(mut self, map: &MapGrid) -> Hit {
        let side = loop {
            let side = if self.side_dist_x < self.side_dist_y {
                self.side_dist_x += self.delta_dist_x;
                self.map_x += self.step_x;
                Side::X
            } else {
                self.side_dist_y += self.delta_dist_y;
                self.map_y += self.step_y;
                Side::Y
            };
            if map.is_wall(self.map_x, self.map_y) {
                break side;
            }
        };

        // Back out the last step: side_dist already points past the wall face.
        let perp_wall_dist = match side {
            Side::X => self.side_dist_x - self.delta_dist_x,
            Side::Y => self.side_dist_y - self.delta_dist_y,
        };

        Hit {
            map_x: self.map_x,
            map_y: self.map_y,
            side,
            perp_wall_dist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapGrid;

    const W: usize = 90;

    fn corridor_map() -> MapGrid {
        // Open corridor from (1,1) to (4,1); wall column at x = 5.
        MapGrid::parse(&[
            "11111111", //
            "1P000101",
            "10000101",
            "11111111",
        ])
        .unwrap()
    }

    #[test]
    fn camera_x_sweeps_the_plane() {
        assert_eq!(camera_x(0, W), -1.0);
        assert!(camera_x(W / 2, W).abs() < 1e-6);
        assert!(camera_x(W - 1, W) < 1.0);
        for x in 1..W {
            assert!(camera_x(x, W) > camera_x(x - 1, W));
        }
    }

    #[test]
    fn center_column_points_straight_ahead() {
        let map = corridor_map();
        let player = Player::at_start(&map);
        let ray = Ray::new(&player, W / 2, W);
        assert!((ray.dir_x - player.dir_x).abs() < 1e-6);
        assert!((ray.dir_y - player.dir_y).abs() < 1e-6);
    }

    #[test]
    fn zero_direction_component_uses_sentinel() {
        let map = corridor_map();
        let player = Player::at_start(&map); // dir (0, -1)
        let ray = Ray::new(&player, W / 2, W);
        assert!(ray.delta_dist_x >= 1e29);
        assert!((ray.delta_dist_y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn frontal_hit_distance_is_exact() {
        // Player at (1.5, 1.5) facing +X down the corridor; wall at col 5.
        let map = corridor_map();
        let mut player = Player::at_start(&map);
        player.dir_x = 1.0;
        player.dir_y = 0.0;
        player.plane_x = 0.0;
        player.plane_y = 0.66;

        let hit = Ray::new(&player, W / 2, W).march(&map);
        assert_eq!(hit.side, Side::X);
        assert_eq!((hit.map_x, hit.map_y), (5, 1));
        assert!(
            (hit.perp_wall_dist - 3.5).abs() < 1e-5,
            "perp_wall_dist = {}",
            hit.perp_wall_dist
        );
    }

    #[test]
    fn every_column_terminates_on_default_map() {
        let map = MapGrid::parse(&crate::map::DEFAULT_MAP).unwrap();
        let player = Player::at_start(&map);
        for x in 0..W {
            let hit = Ray::new(&player, x, W).march(&map);
            assert!(hit.map_x >= 0 && (hit.map_x as usize) < map.width());
            assert!(hit.map_y >= 0 && (hit.map_y as usize) < map.height());
            assert!(hit.perp_wall_dist >= 0.0);
        }
    }

    #[test]
    fn straight_north_walk_matches_manual_trace() {
        // Start at col 14, row 2, facing north. Straight up from (14.5, 2.5):
        // row 2 -> row 1 (floor) -> row 0 (boundary wall). side_dist_y runs
        // 0.5, 1.5, 2.5; backing out one delta gives perp distance 1.5.
        let map = MapGrid::parse(&[
            "1111111111111111",
            "1000000000000001",
            "10000000000000P1",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1000000000000001",
            "1111111111111111",
        ])
        .unwrap();
        assert_eq!(map.start(), (14, 2));

        let player = Player::at_start(&map); // dir (0,-1), plane (0.66, 0)
        let hit = Ray::new(&player, W / 2, W).march(&map);
        assert_eq!(hit.side, Side::Y);
        assert_eq!((hit.map_x, hit.map_y), (14, 0));
        assert!((hit.perp_wall_dist - 1.5).abs() < 1e-5);
    }
}
