//! C5 — combat resolution and enemy AI.

use crate::constants::{
    ATTACK_DAMAGE, ATTACK_RANGE, AWARENESS_DISTANCE, COMBAT_CENTER_COL, COMBAT_HIT_DISTANCE,
    COMBAT_HIT_WINDOW, ENEMY_MOVE_SPEED,
};
use crate::level::Level;
use crate::log::{logd, logi};
use crate::player::Player;
use crate::sprite::{AiState, SpriteTable};
use crate::sprites_render::project;

/// Outcome of a single fire-button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireResult {
    pub fired: bool,
    pub hit_enemy_id: Option<u8>,
    pub out_of_ammo: bool,
}

/// Which side of the player a hit landed on, the dominant axis of
/// `(enemy - player)` at the moment the attack connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageDirection {
    Front,
    Back,
    Left,
    Right,
}

fn dominant_direction(dx: f64, dy: f64) -> DamageDirection {
    if dx.abs() >= dy.abs() {
        if dx < 0.0 {
            DamageDirection::Left
        } else {
            DamageDirection::Right
        }
    } else if dy < 0.0 {
        DamageDirection::Front
    } else {
        DamageDirection::Back
    }
}

/// Outcome of advancing every enemy's AI for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiTickResult {
    pub damage_dealt: u8,
    pub player_died: bool,
    /// Direction of the most recent attack to land this tick, if any.
    pub damage_direction: Option<DamageDirection>,
}

/// Resolve one edge-triggered fire input: consumes one ammo, then hit-tests
/// the nearest targetable enemy whose projected column falls within
/// `COMBAT_HIT_WINDOW` of the screen center.
/// Does nothing and reports `out_of_ammo` if the player has no ammo left.
pub fn fire(player: &mut Player, sprites: &mut SpriteTable) -> FireResult {
    if player.ammo == 0 {
        logi!("[COMBAT] fire ignored: out of ammo");
        return FireResult { fired: false, hit_enemy_id: None, out_of_ammo: true };
    }
    player.ammo -= 1;

    let mut best: Option<(u8, f64)> = None;
    for sprite in sprites.enemies() {
        if !sprite.is_targetable_enemy() {
            continue;
        }
        let Some(proj) = project(player, sprite) else {
            continue;
        };
        if proj.distance > COMBAT_HIT_DISTANCE {
            continue;
        }
        if (proj.screen_col - COMBAT_CENTER_COL).abs() > COMBAT_HIT_WINDOW {
            continue;
        }
        if best.is_none_or(|(_, d)| proj.distance < d) {
            best = Some((sprite.enemy_id, proj.distance));
        }
    }

    match best {
        Some((enemy_id, _)) => {
            if let Some(target) = sprites.by_enemy_id_mut(enemy_id) {
                target.register_hit();
            }
            logi!("[COMBAT] hit enemy {}", enemy_id);
            FireResult { fired: true, hit_enemy_id: Some(enemy_id), out_of_ammo: false }
        }
        None => {
            logd!("[COMBAT] fired, no target in hit window");
            FireResult { fired: true, hit_enemy_id: None, out_of_ammo: false }
        }
    }
}

/// Advance every live enemy's behavioral FSM one tick:
/// `Idle` while far, `Chase` once within `AWARENESS_DISTANCE` (stepping
/// toward the player, blocked by walls same as the player), `Attack` once
/// within `ATTACK_RANGE` (damaging the player on cooldown). `Hit`/`Dead`
/// enemies are left untouched — their countdown lives in `Sprite::decay_hit_state`.
/// Returns the damage dealt to the player this tick, whether it was lethal,
/// and the direction of the last attack to land.
pub fn update_enemy_ai(
    sprites: &mut SpriteTable,
    player: &mut Player,
    level: &Level,
    now_ms: u64,
) -> AiTickResult {
    let mut damage_dealt = 0u8;
    let mut player_died = false;
    let mut damage_direction = None;

    for sprite in sprites.enemies_mut() {
        if matches!(sprite.ai_state, AiState::Dead | AiState::Hit) {
            continue;
        }

        let dx = player.x - sprite.x;
        let dy = player.y - sprite.y;
        let distance = player.distance_to(sprite.x, sprite.y);

        if distance <= ATTACK_RANGE {
            sprite.ai_state = AiState::Attack;
            if sprite.attack_ready(now_ms) {
                sprite.arm_attack_cooldown(now_ms);
                let died = player.apply_damage(ATTACK_DAMAGE);
                damage_dealt = damage_dealt.saturating_add(ATTACK_DAMAGE);
                player_died |= died;
                damage_direction = Some(dominant_direction(sprite.x - player.x, sprite.y - player.y));
                logi!("[ENEMY] enemy {} attacks for {}", sprite.enemy_id, ATTACK_DAMAGE);
            }
        } else if distance <= AWARENESS_DISTANCE {
            sprite.ai_state = AiState::Chase;
            if distance > 1e-6 {
                let nx = sprite.x + (dx / distance) * ENEMY_MOVE_SPEED;
                let ny = sprite.y + (dy / distance) * ENEMY_MOVE_SPEED;
                if !level.is_wall(nx as i32, sprite.y as i32) {
                    sprite.x = nx;
                }
                if !level.is_wall(sprite.x as i32, ny as i32) {
                    sprite.y = ny;
                }
            }
        } else {
            sprite.ai_state = AiState::Idle;
        }
    }

    AiTickResult { damage_dealt, player_died, damage_direction }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::DEFAULT_LEVEL;

    fn player_facing_px_at(x: f64, y: f64) -> Player {
        let mut p = Player::spawn();
        p.x = x;
        p.y = y;
        p.dir_x = 1.0;
        p.dir_y = 0.0;
        p.plane_x = 0.0;
        p.plane_y = 0.66;
        p
    }

    #[test]
    fn fire_with_no_ammo_does_nothing() {
        let mut p = player_facing_px_at(5.0, 5.0);
        p.ammo = 0;
        let mut sprites = SpriteTable::new(0);
        let result = fire(&mut p, &mut sprites);
        assert!(result.out_of_ammo);
        assert!(!result.fired);
        assert_eq!(p.ammo, 0);
    }

    #[test]
    fn fire_consumes_one_ammo_regardless_of_hit() {
        let mut p = player_facing_px_at(5.0, 5.0);
        let before = p.ammo;
        let mut sprites = SpriteTable::new(0);
        let result = fire(&mut p, &mut sprites);
        assert!(result.fired);
        assert_eq!(p.ammo, before - 1);
        assert!(result.hit_enemy_id.is_none());
    }

    #[test]
    fn fire_hits_enemy_directly_ahead() {
        let mut p = player_facing_px_at(5.0, 5.0);
        let mut sprites = SpriteTable::new(0);
        sprites.spawn_enemy(0, 8.0, 5.0, 0);
        let result = fire(&mut p, &mut sprites);
        assert_eq!(result.hit_enemy_id, Some(0));
        let enemy = sprites.by_enemy_id_mut(0).unwrap();
        assert_eq!(enemy.enemy_state, crate::sprite::EnemyVisualState::Hit);
    }

    #[test]
    fn enemy_outside_awareness_distance_stays_idle() {
        let mut p = player_facing_px_at(5.0, 5.0);
        let mut sprites = SpriteTable::new(0);
        sprites.spawn_enemy(0, 5.0 + AWARENESS_DISTANCE + 5.0, 5.0, 0);
        let result = update_enemy_ai(&mut sprites, &mut p, &DEFAULT_LEVEL, 0);
        assert_eq!(result.damage_dealt, 0);
        assert!(!result.player_died);
        let enemy = sprites.by_enemy_id_mut(0).unwrap();
        assert_eq!(enemy.ai_state, AiState::Idle);
    }

    #[test]
    fn enemy_within_attack_range_damages_player_then_respects_cooldown() {
        let mut p = player_facing_px_at(5.0, 5.0);
        let mut sprites = SpriteTable::new(0);
        sprites.spawn_enemy(0, 5.0 + ATTACK_RANGE * 0.5, 5.0, 0);

        let health_before = p.health;
        let result = update_enemy_ai(&mut sprites, &mut p, &DEFAULT_LEVEL, 1000);
        assert_eq!(result.damage_dealt, ATTACK_DAMAGE);
        assert_eq!(p.health, health_before - ATTACK_DAMAGE);

        // Still on cooldown one millisecond later.
        let result_again = update_enemy_ai(&mut sprites, &mut p, &DEFAULT_LEVEL, 1001);
        assert_eq!(result_again.damage_dealt, 0);
    }

    #[test]
    fn attack_from_the_left_is_recorded_as_left() {
        let mut p = player_facing_px_at(2.0, 2.0);
        let mut sprites = SpriteTable::new(0);
        sprites.spawn_enemy(0, 1.0, 2.0, 0);
        let result = update_enemy_ai(&mut sprites, &mut p, &DEFAULT_LEVEL, 0);
        assert_eq!(result.damage_dealt, ATTACK_DAMAGE);
        assert_eq!(result.damage_direction, Some(DamageDirection::Left));
    }
}
