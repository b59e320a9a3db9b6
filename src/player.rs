//! Player entity.

use crate::constants::{
    CAMERA_PLANE_SCALE, PLAYER_START_AMMO, PLAYER_START_DIR_X, PLAYER_START_DIR_Y,
    PLAYER_START_HEALTH, PLAYER_START_X, PLAYER_START_Y, PLAYER_MOVE_SPEED, PLAYER_TURN_SPEED,
};
use crate::level::Level;
use crate::mathutil::{cos, sin, sqrt};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub dir_x: f64,
    pub dir_y: f64,
    pub plane_x: f64,
    pub plane_y: f64,
    pub health: u8,
    pub ammo: u8,
    /// Vertical camera bobbing offset, consumed by the world renderer's
    /// `center_y` computation.
    pub view_height: f64,
}

impl Player {
    /// Starting pose, reused by both `Game::new()` and the game-over ->
    /// playing reset.
    pub fn spawn() -> Self {
        let dir_x = PLAYER_START_DIR_X;
        let dir_y = PLAYER_START_DIR_Y;
        let (plane_x, plane_y) = camera_plane(dir_x, dir_y);
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            dir_x,
            dir_y,
            plane_x,
            plane_y,
            health: PLAYER_START_HEALTH,
            ammo: PLAYER_START_AMMO,
            view_height: 0.0,
        }
    }

    /// Apply one tick of movement from the button bitmask, colliding
    /// against `level` so the player cannot walk through walls.
    pub fn apply_input(&mut self, buttons: u8, level: &Level) {
        use crate::constants::buttons::*;

        if buttons & LEFT != 0 {
            self.rotate(-PLAYER_TURN_SPEED);
        }
        if buttons & RIGHT != 0 {
            self.rotate(PLAYER_TURN_SPEED);
        }

        let mut step = 0.0;
        if buttons & UP != 0 {
            step += PLAYER_MOVE_SPEED;
        }
        if buttons & DOWN != 0 {
            step -= PLAYER_MOVE_SPEED;
        }
        if step != 0.0 {
            self.try_move(self.dir_x * step, self.dir_y * step, level);
        }
    }

    fn rotate(&mut self, angle: f64) {
        let (s, c) = (sin(angle), cos(angle));
        let old_dir_x = self.dir_x;
        self.dir_x = self.dir_x * c - self.dir_y * s;
        self.dir_y = old_dir_x * s + self.dir_y * c;
        let old_plane_x = self.plane_x;
        self.plane_x = self.plane_x * c - self.plane_y * s;
        self.plane_y = old_plane_x * s + self.plane_y * c;
    }

    fn try_move(&mut self, dx: f64, dy: f64, level: &Level) {
        let new_x = self.x + dx;
        let new_y = self.y + dy;
        if !level.is_wall(new_x as i32, self.y as i32) {
            self.x = new_x;
        }
        if !level.is_wall(self.x as i32, new_y as i32) {
            self.y = new_y;
        }
    }

    pub fn apply_damage(&mut self, amount: u8) -> bool {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before > 0 && self.health == 0
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        sqrt(dx * dx + dy * dy)
    }
}

fn camera_plane(dir_x: f64, dir_y: f64) -> (f64, f64) {
    // Perpendicular to direction, scaled to half the FOV tangent.
    (-dir_y * CAMERA_PLANE_SCALE, dir_x * CAMERA_PLANE_SCALE)
}
