use crate::map::MapGrid;

/// Camera plane magnitude. Longer plane = wider field of view.
pub const PLANE_LEN: f32 = 0.66;

pub struct Player {
    pub x: f32, // position in map space, continuous
    pub y: f32,
    pub dir_x: f32, // facing direction; (0, -1) = north in screen convention
    pub dir_y: f32,
    pub plane_x: f32, // camera plane, perpendicular to dir, co-rotates with it
    pub plane_y: f32,
}

impl Player {
    /// Spawn at the center of the map's start cell, facing north.
    pub fn at_start(map: &MapGrid) -> Self {
        let (col, row) = map.start();
        Self {
            x: col as f32 + 0.5,
            y: row as f32 + 0.5,
            dir_x: 0.0,
            dir_y: -1.0,
            plane_x: PLANE_LEN,
            plane_y: 0.0,
        }
    }

    /// Rotate dir and plane by the same angle so they stay perpendicular.
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let old_dir_x = self.dir_x;
        self.dir_x = self.dir_x * cos - self.dir_y * sin;
        self.dir_y = old_dir_x * sin + self.dir_y * cos;
        let old_plane_x = self.plane_x;
        self.plane_x = self.plane_x * cos - self.plane_y * sin;
        self.plane_y = old_plane_x * sin + self.plane_y * cos;
    }

    /// Move by (dx, dy), accepting each axis independently so the player
    /// slides along walls instead of stopping dead on diagonal contact.
    pub fn translate(&mut self, map: &MapGrid, dx: f32, dy: f32) {
        let new_x = self.x + dx;
        let new_y = self.y + dy;
        if !map.is_wall(self.x as i32, new_y as i32) {
            self.y = new_y;
        }
        if !map.is_wall(new_x as i32, self.y as i32) {
            self.x = new_x;
        }
    }
}
