//! Sprite entity and the fixed-size sprite table.

use crate::constants::{ATTACK_COOLDOWN_MS, HIT_FRAMES, MAX_SPRITES};
use crate::log::logw;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Weapon,
    Enemy,
}

/// Visual state driven by combat hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVisualState {
    Alive,
    Hit,
    Dead,
}

/// Behavioral state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Chase,
    Attack,
    Hit,
    Dead,
}

#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub kind: SpriteKind,
    pub texture_id: u8,
    pub active: bool,
    pub enemy_state: EnemyVisualState,
    pub hit_frames_left: u8,
    pub enemy_id: u8,
    pub ai_state: AiState,
    pub attack_cooldown_until_ms: u64,
}

impl Sprite {
    fn empty() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            kind: SpriteKind::Enemy,
            texture_id: 0,
            active: false,
            enemy_state: EnemyVisualState::Dead,
            hit_frames_left: 0,
            enemy_id: 0,
            ai_state: AiState::Dead,
            attack_cooldown_until_ms: 0,
        }
    }

    pub fn weapon(texture_id: u8) -> Self {
        Self {
            kind: SpriteKind::Weapon,
            texture_id,
            active: true,
            enemy_state: EnemyVisualState::Alive,
            ai_state: AiState::Idle,
            ..Self::empty()
        }
    }

    pub fn enemy(enemy_id: u8, x: f64, y: f64, texture_id: u8) -> Self {
        Self {
            x,
            y,
            kind: SpriteKind::Enemy,
            texture_id,
            active: true,
            enemy_state: EnemyVisualState::Alive,
            hit_frames_left: 0,
            enemy_id,
            ai_state: AiState::Idle,
            attack_cooldown_until_ms: 0,
        }
    }

    pub fn is_targetable_enemy(&self) -> bool {
        self.kind == SpriteKind::Enemy && self.active && self.enemy_state == EnemyVisualState::Alive
    }

    /// Put the sprite into the HIT state for `HIT_FRAMES` frames.
    pub fn register_hit(&mut self) {
        self.enemy_state = EnemyVisualState::Hit;
        self.ai_state = AiState::Hit;
        self.hit_frames_left = HIT_FRAMES;
    }

    /// Decrement the HIT countdown; returns `true` exactly on the frame the
    /// enemy transitions HIT -> DEAD.
    pub fn decay_hit_state(&mut self) -> bool {
        if self.enemy_state != EnemyVisualState::Hit {
            return false;
        }
        self.hit_frames_left = self.hit_frames_left.saturating_sub(1);
        if self.hit_frames_left == 0 {
            self.enemy_state = EnemyVisualState::Dead;
            self.ai_state = AiState::Dead;
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn attack_ready(&self, now_ms: u64) -> bool {
        self.attack_cooldown_until_ms == 0 || now_ms >= self.attack_cooldown_until_ms
    }

    pub fn arm_attack_cooldown(&mut self, now_ms: u64) {
        self.attack_cooldown_until_ms = now_ms + ATTACK_COOLDOWN_MS;
    }
}

/// Fixed-capacity sprite table: 1 weapon + up to `MAX_SPRITES - 1` enemies.
/// Back-to-front sorting over this table is O(n^2) by design — no dynamic
/// containers.
pub struct SpriteTable {
    slots: [Sprite; MAX_SPRITES],
}

impl SpriteTable {
    pub fn new(weapon_texture_id: u8) -> Self {
        let mut slots = [Sprite::empty(); MAX_SPRITES];
        slots[0] = Sprite::weapon(weapon_texture_id);
        Self { slots }
    }

    pub fn weapon(&self) -> &Sprite {
        &self.slots[0]
    }

    pub fn weapon_mut(&mut self) -> &mut Sprite {
        &mut self.slots[0]
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Sprite> {
        self.slots[1..].iter().filter(|s| s.kind == SpriteKind::Enemy)
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.slots[1..].iter_mut().filter(|s| s.kind == SpriteKind::Enemy)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().filter(|s| s.active).count()
    }

    /// Spawn an enemy into the first free slot. Drops the sprite and logs
    /// if the table is full.
    pub fn spawn_enemy(&mut self, enemy_id: u8, x: f64, y: f64, texture_id: u8) -> bool {
        for slot in self.slots[1..].iter_mut() {
            if !slot.active {
                *slot = Sprite::enemy(enemy_id, x, y, texture_id);
                return true;
            }
        }
        logw!("[ENEMY] sprite table full, dropping spawn for enemy {}", enemy_id);
        false
    }

    pub fn clear_enemies(&mut self) {
        for slot in self.slots[1..].iter_mut() {
            *slot = Sprite::empty();
        }
    }

    pub fn by_enemy_id_mut(&mut self, enemy_id: u8) -> Option<&mut Sprite> {
        self.enemies_mut().find(|s| s.enemy_id == enemy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_decays_to_dead_after_exactly_hit_frames() {
        let mut s = Sprite::enemy(0, 0.0, 0.0, 0);
        s.register_hit();
        assert_eq!(s.hit_frames_left, HIT_FRAMES);
        for _ in 0..HIT_FRAMES - 1 {
            assert!(!s.decay_hit_state());
            assert_eq!(s.enemy_state, EnemyVisualState::Hit);
        }
        assert!(s.decay_hit_state());
        assert_eq!(s.enemy_state, EnemyVisualState::Dead);
        assert!(!s.active);
    }

    #[test]
    fn sprite_table_drops_spawn_when_full() {
        let mut table = SpriteTable::new(0);
        for i in 0..(MAX_SPRITES as u8 - 1) {
            assert!(table.spawn_enemy(i, 0.0, 0.0, 0));
        }
        assert!(!table.spawn_enemy(99, 0.0, 0.0, 0));
        assert_eq!(table.enemy_count(), MAX_SPRITES - 1);
    }

    #[test]
    fn exactly_one_weapon_slot_exists() {
        let table = SpriteTable::new(0);
        assert_eq!(table.weapon().kind, SpriteKind::Weapon);
        assert_eq!(table.enemies().filter(|s| s.kind == SpriteKind::Weapon).count(), 0);
    }
}
