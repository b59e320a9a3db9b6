//! Every tunable constant in one place, a pin table for gameplay knobs
//! the same way `assign_resources!` pins hardware: nothing below is
//! hardcoded again at its point of use.

/// Framebuffer width in pixels.
pub const FB_W: usize = 128;
/// Framebuffer height in pixels.
pub const FB_H: usize = 64;
/// Page-major framebuffer size: `(FB_H / 8) * FB_W`.
pub const FB_BYTES: usize = 1024;
/// One depth sample per screen column.
pub const DEPTH_COLS: usize = 128;
/// 1 weapon + up to 3 enemies.
pub const MAX_SPRITES: usize = 4;
/// Wall/sprite textures are 16x16, packed 2 bytes/row.
pub const TEXTURE_SIZE: usize = 16;
pub const TEXTURE_BYTES: usize = 32;

/// Tile map width in tiles.
pub const MAP_W: usize = 64;
/// Tile map height in tiles.
pub const MAP_H: usize = 57;
/// Two nibbles packed per byte, so each row is `MAP_W / 2` bytes.
pub const MAP_ROW_BYTES: usize = MAP_W / 2;
/// Wall tile nibble value.
pub const WALL_NIBBLE: u8 = 0x0F;

/// Target tick period: 20 Hz.
pub const TICK_MS: u64 = 50;

/// Input bitmask consumed by [`crate::Game::tick`].
pub mod buttons {
    pub const UP: u8 = 0x01;
    pub const DOWN: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
    pub const FIRE: u8 = 0x10;
}

// ── DDA / raycasting ─────────────────────────────────────────────────────

/// Maximum DDA steps per column before treating it as sky.
pub const DDA_MAX_STEPS: u32 = 12;
/// Clamp range for perpendicular wall distance.
pub const WALL_DIST_MIN: f64 = 0.1;
pub const WALL_DIST_MAX: f64 = 50.0;
/// Shade levels used by the Bayer dither (0..=4).
pub const SHADE_LEVELS: u8 = 5;
/// Far-plane distance used to normalize shade level.
pub const SHADE_FAR_DISTANCE: f64 = 50.0;

// ── Player ───────────────────────────────────────────────────────────────

/// Tiles per tick of forward/back movement, tuned for a responsive feel at
/// the 20 Hz tick rate without letting the player clip through a wall in
/// one step (see DESIGN.md).
pub const PLAYER_MOVE_SPEED: f64 = 0.08;
/// Radians per tick of turning.
pub const PLAYER_TURN_SPEED: f64 = 0.06;
/// Approximate 66° horizontal FOV: `tan(fov / 2)`.
pub const CAMERA_PLANE_SCALE: f64 = 0.66;
/// Starting player position/orientation (tile units).
pub const PLAYER_START_X: f64 = 3.5;
pub const PLAYER_START_Y: f64 = 3.5;
pub const PLAYER_START_DIR_X: f64 = 1.0;
pub const PLAYER_START_DIR_Y: f64 = 0.0;
pub const PLAYER_START_HEALTH: u8 = 100;
pub const PLAYER_START_AMMO: u8 = 50;

// ── Combat / AI ──────────────────────────────────────────────────────────

pub const COMBAT_HIT_DISTANCE: f64 = 50.0;
pub const COMBAT_CENTER_COL: i32 = 64;
pub const COMBAT_HIT_WINDOW: i32 = 2;
pub const AWARENESS_DISTANCE: f64 = 20.0;
pub const ATTACK_RANGE: f64 = 2.0;
pub const ENEMY_MOVE_SPEED: f64 = 0.035;
pub const ATTACK_COOLDOWN_MS: u64 = 1000;
pub const ATTACK_DAMAGE: u8 = 7;
pub const HIT_FRAMES: u8 = 3;

// ── Sprites ──────────────────────────────────────────────────────────────

pub const SPRITE_CULL_DISTANCE: f64 = 50.0;
pub const SPRITE_MIN_DISTANCE: f64 = 0.1;
pub const SPRITE_SCALE_NUMERATOR: f64 = 32.0;
pub const SPRITE_SCALE_MAX: f64 = 2.0;
pub const WEAPON_SCREEN_X: i32 = 96;
pub const WEAPON_SCREEN_Y: i32 = 48;
pub const WEAPON_SCALE: f64 = 1.5;

// ── Wave / flow ──────────────────────────────────────────────────────────

pub const WAVE_CLEAR_HOLD_MS: u64 = 1000;
pub const WAVE_COOLDOWN_MS: u64 = 2000;
pub const WAVE_START_OVERLAY_MS: u64 = 1000;
pub const WAVE_CLEAR_BLINK_PHASE_MS: u64 = 250;

// ── HUD / blinking ───────────────────────────────────────────────────────

pub const BLINK_PERIOD_MS: u64 = 500;
pub const LOW_HEALTH_THRESHOLD_PCT: u8 = 35;
