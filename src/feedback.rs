//! C8 — one-frame game-feel overlays: weapon flash, hit spark, enemy
//! death crack, player damage vignette, low-health tick, screen shake.
//! Every flag here is transient — cleared or decayed every `tick()`,
//! never persisted across frames beyond its own countdown.

use crate::combat::DamageDirection;
use crate::constants::{FB_H, FB_W};
use crate::framebuffer::Framebuffer;

const WEAPON_FLASH_FRAMES: u8 = 2;
const HIT_SPARK_FRAMES: u8 = 2;
const ENEMY_DEATH_FRAMES: u8 = 4;
const DAMAGE_FLASH_FRAMES: u8 = 4;
const SHAKE_FRAMES: u8 = 4;
const SHAKE_MAGNITUDE: i32 = 1;

/// Health below which the low-health tick can blink on, a tighter band
/// than the HUD's own `LOW_HEALTH_THRESHOLD_PCT` blink.
const LOW_HEALTH_TICK_HEALTH: u8 = 30;
const LOW_HEALTH_TICK_BLINK_MS: u64 = 500;

pub struct Feedback {
    weapon_flash_ticks: u8,
    hit_spark_ticks: u8,
    enemy_death_ticks: u8,
    damage_flash_ticks: u8,
    shake_ticks: u8,
    damage_direction: Option<DamageDirection>,
    low_health_tick_on: bool,
}

impl Feedback {
    pub const fn new() -> Self {
        Self {
            weapon_flash_ticks: 0,
            hit_spark_ticks: 0,
            enemy_death_ticks: 0,
            damage_flash_ticks: 0,
            shake_ticks: 0,
            damage_direction: None,
            low_health_tick_on: false,
        }
    }

    pub fn trigger_weapon_fired(&mut self) {
        self.weapon_flash_ticks = WEAPON_FLASH_FRAMES;
    }

    pub fn trigger_enemy_hit(&mut self) {
        self.hit_spark_ticks = HIT_SPARK_FRAMES;
    }

    /// An enemy just decayed from HIT to DEAD: arm the crack overlay.
    pub fn trigger_enemy_death(&mut self) {
        self.enemy_death_ticks = ENEMY_DEATH_FRAMES;
    }

    /// Player took damage this tick: arm the vignette, the directional
    /// edge indicator, and a brief shake.
    pub fn trigger_player_damaged(&mut self, direction: DamageDirection) {
        self.damage_flash_ticks = DAMAGE_FLASH_FRAMES;
        self.shake_ticks = SHAKE_FRAMES;
        self.damage_direction = Some(direction);
    }

    /// Decay every one-shot timer. `health` and `now_ms` drive the
    /// low-health tick, which blinks directly off the wall clock rather
    /// than a tick counter.
    pub fn tick(&mut self, health: u8, now_ms: u64) {
        self.weapon_flash_ticks = self.weapon_flash_ticks.saturating_sub(1);
        self.hit_spark_ticks = self.hit_spark_ticks.saturating_sub(1);
        self.enemy_death_ticks = self.enemy_death_ticks.saturating_sub(1);
        self.damage_flash_ticks = self.damage_flash_ticks.saturating_sub(1);
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
        let low_health = health > 0 && health < LOW_HEALTH_TICK_HEALTH;
        self.low_health_tick_on = low_health && (now_ms / LOW_HEALTH_TICK_BLINK_MS) % 2 == 0;
    }

    pub fn weapon_flash_active(&self) -> bool {
        self.weapon_flash_ticks > 0
    }

    pub fn hit_spark_active(&self) -> bool {
        self.hit_spark_ticks > 0
    }

    pub fn enemy_death_active(&self) -> bool {
        self.enemy_death_ticks > 0
    }

    pub fn damage_flash_active(&self) -> bool {
        self.damage_flash_ticks > 0
    }

    pub fn damage_direction(&self) -> Option<DamageDirection> {
        self.damage_direction
    }

    /// Whether the low-health tick should be lit this frame: health is
    /// strictly between 0 and `LOW_HEALTH_TICK_HEALTH`, and the wall
    /// clock is in the on-phase of its 500-ms blink.
    pub fn low_health_tick_visible(&self) -> bool {
        self.low_health_tick_on
    }

    /// Screen-space pixel offset applied to the world pass this frame.
    /// Deterministic rather than random: it alternates sign every tick
    /// while armed so it reads as a jolt.
    pub fn shake_offset(&self) -> (i32, i32) {
        if self.shake_ticks == 0 {
            return (0, 0);
        }
        let sign = if self.shake_ticks % 2 == 0 { 1 } else { -1 };
        (sign * SHAKE_MAGNITUDE, 0)
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}

const CROSSHAIR_CX: i32 = FB_W as i32 / 2;
const CROSSHAIR_CY: i32 = FB_H as i32 / 2;

fn draw_hit_spark(fb: &mut Framebuffer) {
    fb.set_pixel(CROSSHAIR_CX, CROSSHAIR_CY - 4);
    fb.set_pixel(CROSSHAIR_CX - 3, CROSSHAIR_CY + 3);
    fb.set_pixel(CROSSHAIR_CX + 3, CROSSHAIR_CY + 3);
}

/// Broken vertical crack: three short offset segments, wider and looser
/// than the hit spark.
fn draw_enemy_death(fb: &mut Framebuffer) {
    fb.vline(CROSSHAIR_CX - 1, CROSSHAIR_CY - 6, CROSSHAIR_CY - 3, true);
    fb.vline(CROSSHAIR_CX + 2, CROSSHAIR_CY - 2, CROSSHAIR_CY + 1, true);
    fb.vline(CROSSHAIR_CX - 2, CROSSHAIR_CY + 2, CROSSHAIR_CY + 5, true);
}

fn draw_damage_vignette(fb: &mut Framebuffer, direction: DamageDirection) {
    let w = FB_W as i32;
    let h = FB_H as i32;
    fb.fill_rect(0, 0, 3, 3, true);
    fb.fill_rect(w - 3, 0, 3, 3, true);
    fb.fill_rect(0, h - 3, 3, 3, true);
    fb.fill_rect(w - 3, h - 3, 3, 3, true);
    match direction {
        DamageDirection::Left => fb.vline(0, 0, h - 1, true),
        DamageDirection::Right => fb.vline(w - 1, 0, h - 1, true),
        DamageDirection::Front => fb.hline(0, w - 1, 0, true),
        DamageDirection::Back => fb.hline(0, w - 1, h - 1, true),
    }
}

fn draw_low_health_tick(fb: &mut Framebuffer) {
    fb.fill_rect(106, 49, 2, 1, true);
}

/// Draw every armed one-frame overlay, in a fixed order so later passes
/// can paint over earlier ones where they'd overlap.
pub fn render_overlays(fb: &mut Framebuffer, feedback: &Feedback) {
    if feedback.hit_spark_active() {
        draw_hit_spark(fb);
    }
    if feedback.enemy_death_active() {
        draw_enemy_death(fb);
    }
    if feedback.low_health_tick_visible() {
        draw_low_health_tick(fb);
    }
    if feedback.damage_flash_active() {
        if let Some(direction) = feedback.damage_direction() {
            draw_damage_vignette(fb, direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_flash_lasts_exactly_its_frame_budget() {
        let mut f = Feedback::new();
        f.trigger_weapon_fired();
        for _ in 0..WEAPON_FLASH_FRAMES {
            assert!(f.weapon_flash_active());
            f.tick(100, 0);
        }
        assert!(!f.weapon_flash_active());
    }

    #[test]
    fn hit_spark_renders_at_screen_center() {
        let mut f = Feedback::new();
        let mut fb = Framebuffer::new();
        render_overlays(&mut fb, &f);
        assert!(!fb.get_pixel(CROSSHAIR_CX, CROSSHAIR_CY - 4));

        f.trigger_enemy_hit();
        render_overlays(&mut fb, &f);
        assert!(fb.get_pixel(CROSSHAIR_CX, CROSSHAIR_CY - 4));
    }

    #[test]
    fn enemy_death_renders_a_crack() {
        let mut f = Feedback::new();
        let mut fb = Framebuffer::new();
        f.trigger_enemy_death();
        render_overlays(&mut fb, &f);
        assert!(fb.get_pixel(CROSSHAIR_CX - 1, CROSSHAIR_CY - 6));
    }

    #[test]
    fn damage_vignette_marks_all_four_corners_and_the_hit_side() {
        let mut f = Feedback::new();
        let mut fb = Framebuffer::new();
        render_overlays(&mut fb, &f);
        assert!(!fb.get_pixel(0, 0));

        f.trigger_player_damaged(DamageDirection::Left);
        render_overlays(&mut fb, &f);
        assert!(fb.get_pixel(0, 0));
        assert!(fb.get_pixel(FB_W as i32 - 1, 0));
        assert!(fb.get_pixel(0, FB_H as i32 - 1));
        assert!(fb.get_pixel(FB_W as i32 - 1, FB_H as i32 - 1));
        assert!(fb.get_pixel(0, FB_H as i32 / 2));
        assert!(!fb.get_pixel(FB_W as i32 - 1, FB_H as i32 / 2));
    }

    #[test]
    fn low_health_tick_blinks_at_500ms_only_below_threshold() {
        let mut f = Feedback::new();
        f.tick(29, 0);
        assert!(f.low_health_tick_visible());
        f.tick(29, LOW_HEALTH_TICK_BLINK_MS);
        assert!(!f.low_health_tick_visible());
        f.tick(50, 0);
        assert!(!f.low_health_tick_visible());
        f.tick(0, 0);
        assert!(!f.low_health_tick_visible());
    }

    #[test]
    fn shake_offset_is_zero_once_expired() {
        let mut f = Feedback::new();
        f.trigger_player_damaged(DamageDirection::Front);
        for _ in 0..SHAKE_FRAMES {
            f.tick(100, 0);
        }
        assert_eq!(f.shake_offset(), (0, 0));
    }
}
