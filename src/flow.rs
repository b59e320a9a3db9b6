//! C6 — wave/flow controller: `Idle -> ActivePendingSpawn ->
//! Active -> Clear -> Cooldown -> Idle`.

use crate::constants::{WAVE_CLEAR_BLINK_PHASE_MS, WAVE_CLEAR_HOLD_MS, WAVE_COOLDOWN_MS};
use crate::log::logi;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    Idle,
    ActivePendingSpawn,
    Active,
    Clear,
    Cooldown,
}

pub struct WaveController {
    state: WaveState,
    wave_number: u32,
    enemies_to_spawn: u8,
    enemies_alive: u8,
    state_entered_at_ms: u64,
    clear_blink_on: bool,
}

impl WaveController {
    pub const fn new() -> Self {
        Self {
            state: WaveState::Idle,
            wave_number: 0,
            enemies_to_spawn: 0,
            enemies_alive: 0,
            state_entered_at_ms: 0,
            clear_blink_on: false,
        }
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Milliseconds spent in the current state, for overlays that only
    /// show up for a short window after a transition.
    pub fn ms_in_state(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.state_entered_at_ms)
    }

    /// Whether the "WAVE CLEAR" banner should be lit this frame.
    pub fn clear_blink_on(&self) -> bool {
        self.clear_blink_on
    }

    /// Kick off a new wave with `enemy_count` enemies queued to spawn.
    /// Valid from `Idle` or `Cooldown`.
    pub fn start_wave(&mut self, enemy_count: u8, now_ms: u64) {
        self.wave_number += 1;
        self.enemies_to_spawn = enemy_count;
        self.enemies_alive = 0;
        self.state = WaveState::ActivePendingSpawn;
        self.state_entered_at_ms = now_ms;
        logi!("[FLOW] wave {} starting, {} enemies queued", self.wave_number, enemy_count);
    }

    /// Whether the game loop should take a spawn slot this tick.
    pub fn should_spawn_now(&self) -> bool {
        self.state == WaveState::ActivePendingSpawn && self.enemies_to_spawn > 0
    }

    /// Record that the game loop successfully placed one queued enemy.
    /// Transitions to `Active` once the queue drains.
    pub fn notify_enemy_spawned(&mut self) {
        self.enemies_to_spawn = self.enemies_to_spawn.saturating_sub(1);
        self.enemies_alive = self.enemies_alive.saturating_add(1);
        if self.enemies_to_spawn == 0 {
            self.state = WaveState::Active;
        }
    }

    /// Record that one live enemy has died.
    pub fn notify_enemy_killed(&mut self) {
        self.enemies_alive = self.enemies_alive.saturating_sub(1);
    }

    /// Advance the controller's internal timers by one tick.
    pub fn tick(&mut self, now_ms: u64) {
        match self.state {
            WaveState::Idle | WaveState::ActivePendingSpawn => {}
            WaveState::Active => {
                if self.enemies_alive == 0 {
                    self.state = WaveState::Clear;
                    self.state_entered_at_ms = now_ms;
                    self.clear_blink_on = true;
                    logi!("[FLOW] wave {} cleared", self.wave_number);
                }
            }
            WaveState::Clear => {
                let elapsed = now_ms.saturating_sub(self.state_entered_at_ms);
                self.clear_blink_on = (elapsed / WAVE_CLEAR_BLINK_PHASE_MS) % 2 == 0;
                if elapsed >= WAVE_CLEAR_HOLD_MS {
                    self.state = WaveState::Cooldown;
                    self.state_entered_at_ms = now_ms;
                }
            }
            WaveState::Cooldown => {
                if now_ms.saturating_sub(self.state_entered_at_ms) >= WAVE_COOLDOWN_MS {
                    self.state = WaveState::Idle;
                }
            }
        }
    }
}

impl Default for WaveController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_wave_enters_pending_spawn() {
        let mut c = WaveController::new();
        c.start_wave(3, 0);
        assert_eq!(c.state(), WaveState::ActivePendingSpawn);
        assert_eq!(c.wave_number(), 1);
        assert!(c.should_spawn_now());
    }

    #[test]
    fn spawning_all_queued_enemies_enters_active() {
        let mut c = WaveController::new();
        c.start_wave(2, 0);
        c.notify_enemy_spawned();
        assert_eq!(c.state(), WaveState::ActivePendingSpawn);
        c.notify_enemy_spawned();
        assert_eq!(c.state(), WaveState::Active);
        assert!(!c.should_spawn_now());
    }

    #[test]
    fn killing_all_alive_enemies_clears_the_wave() {
        let mut c = WaveController::new();
        c.start_wave(1, 0);
        c.notify_enemy_spawned();
        c.tick(10);
        assert_eq!(c.state(), WaveState::Active);
        c.notify_enemy_killed();
        c.tick(20);
        assert_eq!(c.state(), WaveState::Clear);
    }

    #[test]
    fn clear_holds_then_cooldown_then_idle() {
        let mut c = WaveController::new();
        c.start_wave(1, 0);
        c.notify_enemy_spawned();
        c.notify_enemy_killed();
        c.tick(0);
        assert_eq!(c.state(), WaveState::Clear);

        c.tick(WAVE_CLEAR_HOLD_MS - 1);
        assert_eq!(c.state(), WaveState::Clear);

        c.tick(WAVE_CLEAR_HOLD_MS);
        assert_eq!(c.state(), WaveState::Cooldown);

        c.tick(WAVE_CLEAR_HOLD_MS + WAVE_COOLDOWN_MS - 1);
        assert_eq!(c.state(), WaveState::Cooldown);

        c.tick(WAVE_CLEAR_HOLD_MS + WAVE_COOLDOWN_MS);
        assert_eq!(c.state(), WaveState::Idle);
    }
}
