//! C3 — world renderer: DDA raycasting, per-column wall draw, depth
//! buffer population.

use crate::constants::{
    DDA_MAX_STEPS, FB_H, FB_W, SHADE_FAR_DISTANCE, SHADE_LEVELS, TEXTURE_SIZE, WALL_DIST_MAX,
    WALL_DIST_MIN,
};
use crate::depth::DepthBuffer;
use crate::dither::dither;
use crate::framebuffer::Framebuffer;
use crate::level::Level;
use crate::log::logd;
use crate::mathutil::{ceil, fabs, floor};
use crate::player::Player;
use crate::texture::{self, TextureData};

/// Which axis the DDA stepped across to register the hit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Vertical,
    Horizontal,
}

struct ColumnHit {
    distance: f64,
    side: Side,
    wall_x_frac: f64,
}

/// Cast one ray for screen column `x` using the classic DDA grid
/// traversal. Returns `None` if the DDA budget
/// (`DDA_MAX_STEPS`) is exhausted without a hit — the column is sky.
fn cast_ray(level: &Level, player: &Player, x: usize) -> Option<ColumnHit> {
    let camera_x = 2.0 * x as f64 / FB_W as f64 - 1.0;
    let ray_x = player.dir_x + player.plane_x * camera_x;
    let ray_y = player.dir_y + player.plane_y * camera_x;

    let mut map_x = floor(player.x) as i32;
    let mut map_y = floor(player.y) as i32;

    let delta_dist_x = if ray_x == 0.0 { f64::INFINITY } else { fabs(1.0 / ray_x) };
    let delta_dist_y = if ray_y == 0.0 { f64::INFINITY } else { fabs(1.0 / ray_y) };

    let (step_x, mut side_dist_x) = if ray_x < 0.0 {
        (-1, (player.x - map_x as f64) * delta_dist_x)
    } else {
        (1, (map_x as f64 + 1.0 - player.x) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if ray_y < 0.0 {
        (-1, (player.y - map_y as f64) * delta_dist_y)
    } else {
        (1, (map_y as f64 + 1.0 - player.y) * delta_dist_y)
    };

    let mut side = Side::Vertical;
    let mut hit = false;
    let mut steps = 0;
    while steps < DDA_MAX_STEPS {
        if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x += step_x;
            side = Side::Vertical;
        } else {
            side_dist_y += delta_dist_y;
            map_y += step_y;
            side = Side::Horizontal;
        }
        steps += 1;
        if level.is_wall(map_x, map_y) {
            hit = true;
            break;
        }
    }
    if !hit {
        return None;
    }

    let perp_dist = match side {
        Side::Vertical => (map_x as f64 - player.x + (1 - step_x) as f64 / 2.0) / ray_x,
        Side::Horizontal => (map_y as f64 - player.y + (1 - step_y) as f64 / 2.0) / ray_y,
    };
    let distance = perp_dist.clamp(WALL_DIST_MIN, WALL_DIST_MAX);

    let wall_x = match side {
        Side::Vertical => player.y + perp_dist * ray_y,
        Side::Horizontal => player.x + perp_dist * ray_x,
    };
    let wall_x_frac = wall_x - floor(wall_x);

    Some(ColumnHit { distance, side, wall_x_frac })
}

fn texture_for(level_texture_index: usize) -> &'static TextureData {
    match level_texture_index % 3 {
        0 => &texture::WALL_BRICK,
        1 => &texture::WALL_METAL,
        _ => &texture::WALL_STONE,
    }
}

/// Render the 3D world view into `fb`, populating `depth` per column.
///
/// `shake` is a screen-space pixel offset
/// applied to the whole world pass for this frame only.
pub fn render_world(
    level: &Level,
    player: &Player,
    fb: &mut Framebuffer,
    depth: &mut DepthBuffer,
    shake: (i32, i32),
) {
    depth.reset();

    for x in 0..FB_W {
        let Some(hit) = cast_ray(level, player, x) else {
            depth.set_far(x);
            continue;
        };
        depth.set(x, hit.distance);

        let height = FB_H as f64 / hit.distance;
        let center_y = FB_H as f64 / 2.0 + player.view_height / hit.distance;
        let top = center_y - height / 2.0;
        let bottom = center_y + height / 2.0;

        let mut shade = ((hit.distance / SHADE_FAR_DISTANCE) * SHADE_LEVELS as f64) as i32;
        if hit.side == Side::Horizontal {
            shade += 1;
        }
        let shade = shade.clamp(0, SHADE_LEVELS as i32 - 1) as u8;

        let texture_index = (x / 43).min(2); // coarse wall-material banding across the map
        let tex = texture_for(texture_index);
        let tx = (fabs(hit.wall_x_frac) * TEXTURE_SIZE as f64) as u32 & (TEXTURE_SIZE as u32 - 1);

        let screen_x = x as i32 + shake.0;
        let y_start = (ceil(top) as i32).max(0);
        let y_end = (floor(bottom) as i32).min(FB_H as i32 - 1);
        for screen_y in y_start..=y_end {
            let y = screen_y + shake.1;
            let ty = (((screen_y as f64 - top) / (bottom - top)) * TEXTURE_SIZE as f64) as u32
                & (TEXTURE_SIZE as u32 - 1);
            if texture::sample(tex, tx, ty) && dither(shade, screen_x, y) {
                fb.set_pixel(screen_x, y);
            }
        }
    }

    logd!("[DOOM-WORLD] rendered frame at ({}, {})", player.x, player.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::DEFAULT_LEVEL;

    fn center_player() -> Player {
        let mut p = Player::spawn();
        p.x = 4.0;
        p.y = 4.0;
        p
    }

    #[test]
    fn facing_into_open_space_hits_a_wall_within_budget() {
        let p = center_player();
        let hit = cast_ray(&DEFAULT_LEVEL, &p, FB_W / 2);
        assert!(hit.is_some());
    }

    #[test]
    fn axis_parallel_ray_does_not_divide_by_zero() {
        let mut p = center_player();
        p.dir_x = 1.0;
        p.dir_y = 0.0;
        p.plane_x = 0.0;
        p.plane_y = 0.66;
        // Column 64 has camera_x == 0, so ray_y == dir_y + plane_y*0 == 0.
        let hit = cast_ray(&DEFAULT_LEVEL, &p, FB_W / 2);
        assert!(hit.is_some());
    }

    #[test]
    fn render_clears_depth_buffer_every_call() {
        let p = center_player();
        let mut fb = Framebuffer::new();
        let mut depth = DepthBuffer::new();
        depth.set(5, 1.0);
        render_world(&DEFAULT_LEVEL, &p, &mut fb, &mut depth, (0, 0));
        // After a render, column 5's depth reflects this frame's cast, not
        // the stale value seeded above (it would only coincidentally match).
        assert_ne!(depth.get(5), 0xFF);
    }

    #[test]
    fn lit_pixel_implies_texture_bit_is_set() {
        let p = center_player();
        let mut fb = Framebuffer::new();
        let mut depth = DepthBuffer::new();
        render_world(&DEFAULT_LEVEL, &p, &mut fb, &mut depth, (0, 0));
        // Spot check: every lit pixel in the world band must correspond to
        // a genuine wall hit (depth != far) in its column.
        for x in 0..FB_W {
            let col_has_hit = depth.get(x) != crate::depth::FAR_DEPTH;
            if !col_has_hit {
                for y in 0..FB_H {
                    assert!(!fb.get_pixel(x as i32, y as i32));
                }
            }
        }
    }
}
