//! C4 — sprite renderer: camera-space projection, depth sort, per-column
//! occlusion, weapon overlay.

use crate::constants::{
    FB_H, FB_W, SPRITE_CULL_DISTANCE, SPRITE_MIN_DISTANCE, SPRITE_SCALE_MAX,
    SPRITE_SCALE_NUMERATOR, TEXTURE_SIZE, WEAPON_SCALE, WEAPON_SCREEN_X, WEAPON_SCREEN_Y,
};
use crate::depth::DepthBuffer;
use crate::dither::dither;
use crate::framebuffer::Framebuffer;
use crate::log::logd;
use crate::mathutil::floor;
use crate::player::Player;
use crate::sprite::{EnemyVisualState, Sprite, SpriteKind, SpriteTable};
use crate::texture::{self, TextureData};

pub(crate) struct Projected {
    pub(crate) screen_col: i32,
    pub(crate) distance: f64,
    pub(crate) scale: f64,
}

/// Project an enemy sprite into camera space.
/// Returns `None` if behind the camera, beyond the culling distance, or
/// off-screen.
pub(crate) fn project(player: &Player, sprite: &Sprite) -> Option<Projected> {
    let vx = sprite.x - player.x;
    let vy = sprite.y - player.y;

    let tx = vx * player.dir_x + vy * (-player.dir_y);
    let ty = vx * player.plane_x + vy * player.plane_y;

    if tx <= SPRITE_MIN_DISTANCE {
        return None;
    }
    let distance = player.distance_to(sprite.x, sprite.y);
    if distance > SPRITE_CULL_DISTANCE {
        return None;
    }

    let screen_col = floor(FB_W as f64 / 2.0 + (ty / tx) * (FB_W as f64 / 2.0)) as i32;
    if screen_col < 0 || screen_col >= FB_W as i32 {
        return None;
    }

    let scale = (SPRITE_SCALE_NUMERATOR / distance).min(SPRITE_SCALE_MAX);
    Some(Projected { screen_col, distance, scale })
}

fn texture_for(sprite: &Sprite) -> &'static TextureData {
    match (sprite.kind, sprite.enemy_state) {
        (SpriteKind::Weapon, _) => {
            if sprite.texture_id == 1 {
                &texture::SPRITE_WEAPON_FIRE
            } else {
                &texture::SPRITE_WEAPON_IDLE
            }
        }
        (SpriteKind::Enemy, EnemyVisualState::Hit) => &texture::SPRITE_ENEMY_HIT,
        (SpriteKind::Enemy, EnemyVisualState::Dead) => &texture::SPRITE_ENEMY_DEAD,
        (SpriteKind::Enemy, EnemyVisualState::Alive) => &texture::SPRITE_ENEMY_IDLE,
    }
}

/// Rasterize one sprite's scaled 16x16 texture centered at `(center_x,
/// center_y)`, occluding against `depth` per column unless `ignore_depth`
/// (used for the screen-fixed weapon sprite). `force_lit` floods the
/// bounding box solid (weapon flash / HIT flood).
#[allow(clippy::too_many_arguments)]
fn rasterize(
    fb: &mut Framebuffer,
    depth: &DepthBuffer,
    tex: &TextureData,
    center_x: i32,
    center_y: i32,
    scale: f64,
    distance: f64,
    ignore_depth: bool,
    force_lit: bool,
) {
    let size = (TEXTURE_SIZE as f64 * scale).max(1.0) as i32;
    let half = size / 2;
    let left = center_x - half;
    let top = center_y - half;

    for sy in 0..size {
        let y = top + sy;
        if y < 0 || y >= FB_H as i32 {
            continue;
        }
        let ty = ((sy as f64 / size as f64) * TEXTURE_SIZE as f64) as u32 & (TEXTURE_SIZE as u32 - 1);
        for sx in 0..size {
            let x = left + sx;
            if x < 0 || x >= FB_W as i32 {
                continue;
            }
            if !ignore_depth && !depth.is_nearer_than_wall(x as usize, distance) {
                continue;
            }
            if force_lit {
                fb.set_pixel(x, y);
                continue;
            }
            let tx = ((sx as f64 / size as f64) * TEXTURE_SIZE as f64) as u32 & (TEXTURE_SIZE as u32 - 1);
            if texture::sample(tex, tx, ty) && dither(2, x, y) {
                fb.set_pixel(x, y);
            }
        }
    }
}

/// Render all active enemy sprites back-to-front, then the weapon overlay
/// on top. `weapon_flash`/`hit_flood_enemy_id` are the
/// 1-frame overrides from the feedback system.
pub fn render_sprites(
    player: &Player,
    sprites: &SpriteTable,
    fb: &mut Framebuffer,
    depth: &DepthBuffer,
    weapon_flash: bool,
) {
    let mut visible: [(u8, Projected); 3] = core::array::from_fn(|_| {
        (0, Projected { screen_col: -1, distance: f64::MAX, scale: 0.0 })
    });
    let mut count = 0usize;

    for sprite in sprites.enemies() {
        if !sprite.active {
            continue;
        }
        if let Some(p) = project(player, sprite) {
            if count < visible.len() {
                visible[count] = (sprite.enemy_id, p);
                count += 1;
            }
        }
    }

    // Back-to-front painter's order: descending distance. Bubble sort is
    // fine for at most 3 entries.
    for i in 0..count {
        for j in 0..count.saturating_sub(1).saturating_sub(i) {
            if visible[j].1.distance < visible[j + 1].1.distance {
                visible.swap(j, j + 1);
            }
        }
    }

    for (enemy_id, proj) in visible.iter().take(count) {
        let Some(sprite) = sprites.enemies().find(|s| s.enemy_id == *enemy_id) else {
            continue;
        };
        let tex = texture_for(sprite);
        let recoil = if sprite.enemy_state == EnemyVisualState::Hit { 2 } else { 0 };
        let center_y = FB_H as i32 / 2 + recoil;
        rasterize(
            fb,
            depth,
            tex,
            proj.screen_col,
            center_y,
            proj.scale,
            proj.distance,
            false,
            sprite.enemy_state == EnemyVisualState::Hit,
        );
    }

    let weapon = sprites.weapon();
    let weapon_tex = texture_for(weapon);
    rasterize(
        fb,
        depth,
        weapon_tex,
        WEAPON_SCREEN_X,
        WEAPON_SCREEN_Y,
        WEAPON_SCALE,
        0.0,
        true,
        weapon_flash,
    );

    logd!("[SPRITE] rendered {} enemies + weapon", count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::AiState;

    fn player_at_origin_facing_px() -> Player {
        let mut p = Player::spawn();
        p.x = 0.0;
        p.y = 0.0;
        p.dir_x = 1.0;
        p.dir_y = 0.0;
        p.plane_x = 0.0;
        p.plane_y = 0.66;
        p
    }

    #[test]
    fn sprite_at_player_position_is_culled() {
        let player = player_at_origin_facing_px();
        let mut s = Sprite::enemy(0, 0.0, 0.0, 0);
        s.ai_state = AiState::Idle;
        assert!(project(&player, &s).is_none());
    }

    #[test]
    fn sprite_directly_ahead_projects_to_center_column() {
        let player = player_at_origin_facing_px();
        let s = Sprite::enemy(0, 5.0, 0.0, 0);
        let proj = project(&player, &s).expect("should project");
        assert!((proj.screen_col - FB_W as i32 / 2).abs() <= 1);
    }

    #[test]
    fn sprite_beyond_cull_distance_is_dropped() {
        let player = player_at_origin_facing_px();
        let s = Sprite::enemy(0, 1000.0, 0.0, 0);
        assert!(project(&player, &s).is_none());
    }

    #[test]
    fn occluded_column_suppresses_sprite_pixels() {
        let player = player_at_origin_facing_px();
        let mut sprites = SpriteTable::new(0);
        sprites.spawn_enemy(0, 5.0, 0.0, 0);
        let mut depth = DepthBuffer::new();
        // Wall much closer than the enemy across the whole screen.
        for c in 0..FB_W {
            depth.set(c, 1.0);
        }
        let mut fb = Framebuffer::new();
        render_sprites(&player, &sprites, &mut fb, &depth, false);
        assert_eq!(*fb.as_bytes(), [0u8; crate::constants::FB_BYTES]);
    }
}
