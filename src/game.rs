//! C10 — top-level game state machine and the fixed per-tick render
//! pipeline: `Title -> Playing -> GameOver -> Title`.

use crate::adapters::AudioHook;
use crate::combat;
use crate::constants::{self, FB_W, MAP_H, MAP_W};
use crate::depth::DepthBuffer;
use crate::feedback::{self, Feedback};
use crate::flow::{WaveController, WaveState};
use crate::framebuffer::Framebuffer;
use crate::hud;
use crate::level::{Level, DEFAULT_LEVEL};
use crate::player::Player;
use crate::screens;
use crate::sprite::SpriteTable;
use crate::sprites_render;
use crate::world;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Title,
    Playing,
    GameOver,
}

pub struct Game {
    state: GameState,
    level: &'static Level,
    player: Player,
    sprites: SpriteTable,
    depth: DepthBuffer,
    fb: Framebuffer,
    wave: WaveController,
    feedback: Feedback,
    prev_buttons: u8,
    wave_reached: u32,
    next_enemy_id: u8,
}

impl Game {
    pub fn new() -> Self {
        Self {
            state: GameState::Title,
            level: &DEFAULT_LEVEL,
            player: Player::spawn(),
            sprites: SpriteTable::new(0),
            depth: DepthBuffer::new(),
            fb: Framebuffer::new(),
            wave: WaveController::new(),
            feedback: Feedback::new(),
            prev_buttons: 0,
            wave_reached: 0,
            next_enemy_id: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn wave_state(&self) -> WaveState {
        self.wave.state()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Whether the player is currently alive. Only meaningful in
    /// `GameState::Playing`; always `true` on the title screen and before
    /// the first wave starts.
    pub fn is_player_alive(&self) -> bool {
        self.player.health > 0
    }

    /// `Game::new()` always returns a fully-initialized instance, so this
    /// is always `true`; kept as an explicit accessor for callers that
    /// otherwise assert on an initialization flag before the first tick.
    pub fn is_initialized(&self) -> bool {
        true
    }

    /// Advance exactly one tick. `buttons` is the already-debounced input
    /// bitmask for this tick; `now_ms` is the monotonic clock reading. Fire
    /// is edge-triggered here, not level-triggered — holding the button
    /// down fires exactly once per press. `audio` receives the tick's
    /// cues (shot, hit, damage); pass `&mut SilentAudio` where no buzzer
    /// is wired up.
    pub fn tick<A: AudioHook>(&mut self, buttons: u8, now_ms: u64, audio: &mut A) {
        let fire_pressed =
            buttons & constants::buttons::FIRE != 0 && self.prev_buttons & constants::buttons::FIRE == 0;
        self.prev_buttons = buttons;

        self.fb.clear();

        match self.state {
            GameState::Title => {
                screens::render_title_screen(&mut self.fb, now_ms);
                if fire_pressed {
                    self.start_new_game(now_ms);
                }
            }
            GameState::Playing => self.tick_playing(buttons, fire_pressed, now_ms, audio),
            GameState::GameOver => {
                screens::render_game_over_screen(&mut self.fb, now_ms, self.wave_reached);
                if fire_pressed {
                    self.start_new_game(now_ms);
                }
            }
        }
    }

    fn start_new_game(&mut self, now_ms: u64) {
        self.player = Player::spawn();
        self.sprites = SpriteTable::new(0);
        self.wave = WaveController::new();
        self.feedback = Feedback::new();
        self.wave_reached = 0;
        self.next_enemy_id = 0;
        self.wave.start_wave(spawn_count_for_wave(1), now_ms);
        self.state = GameState::Playing;
    }

    fn tick_playing<A: AudioHook>(&mut self, buttons: u8, fire_pressed: bool, now_ms: u64, audio: &mut A) {
        self.player.apply_input(buttons, self.level);

        if fire_pressed {
            let result = combat::fire(&mut self.player, &mut self.sprites);
            if result.fired {
                self.feedback.trigger_weapon_fired();
                audio.beep(880, 30);
            }
            if result.hit_enemy_id.is_some() {
                self.feedback.trigger_enemy_hit();
                audio.beep(1400, 20);
            }
        }

        for sprite in self.sprites.enemies_mut() {
            if sprite.decay_hit_state() {
                self.wave.notify_enemy_killed();
                self.feedback.trigger_enemy_death();
            }
        }

        let ai_result = combat::update_enemy_ai(&mut self.sprites, &mut self.player, self.level, now_ms);
        let player_died = ai_result.player_died;
        if ai_result.damage_dealt > 0 {
            if let Some(direction) = ai_result.damage_direction {
                self.feedback.trigger_player_damaged(direction);
            }
            audio.beep(220, 80);
        }

        if self.wave.should_spawn_now() {
            if let Some((sx, sy)) = self.find_spawn_point() {
                let enemy_id = self.next_enemy_id;
                if self.sprites.spawn_enemy(enemy_id, sx, sy, 0) {
                    self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
                    self.wave.notify_enemy_spawned();
                }
            }
        }
        self.wave.tick(now_ms);

        if player_died {
            self.wave_reached = self.wave.wave_number();
            self.state = GameState::GameOver;
            return;
        }

        if self.wave.state() == WaveState::Idle && self.wave.wave_number() > 0 {
            let next_wave = self.wave.wave_number() + 1;
            self.wave.start_wave(spawn_count_for_wave(next_wave), now_ms);
        }

        self.feedback.tick(self.player.health, now_ms);

        let shake = self.feedback.shake_offset();
        world::render_world(self.level, &self.player, &mut self.fb, &mut self.depth, shake);
        sprites_render::render_sprites(
            &self.player,
            &self.sprites,
            &mut self.fb,
            &self.depth,
            self.feedback.weapon_flash_active(),
        );
        hud::render_hud(&mut self.fb, &self.player, now_ms);
        self.render_flow_overlay(now_ms);
        feedback::render_overlays(&mut self.fb, &self.feedback);
    }

    fn render_flow_overlay(&mut self, now_ms: u64) {
        let cx = FB_W as i32 / 2;
        match self.wave.state() {
            WaveState::ActivePendingSpawn
                if self.wave.ms_in_state(now_ms) < constants::WAVE_START_OVERLAY_MS =>
            {
                self.fb.draw_text_centered("WAVE", cx, 56, true);
            }
            WaveState::Clear if self.wave.clear_blink_on() => {
                self.fb.draw_text_centered("CLEAR", cx, 56, true);
            }
            _ => {}
        }
    }

    /// Scan the level for an unoccupied floor tile at least 3 units from
    /// the player, rotating the scan start with `next_enemy_id` so enemies
    /// spawned in the same tick-run don't all land on the same square.
    fn find_spawn_point(&self) -> Option<(f64, f64)> {
        let interior_w = MAP_W - 2;
        let interior_h = MAP_H - 2;
        let total = interior_w * interior_h;
        let offset = self.next_enemy_id as usize * 7;

        for i in 0..total {
            let idx = (i + offset) % total;
            let x = 1 + idx % interior_w;
            let y = 1 + idx / interior_w;
            if self.level.is_wall(x as i32, y as i32) {
                continue;
            }
            let cx = x as f64 + 0.5;
            let cy = y as f64 + 0.5;
            if self.player.distance_to(cx, cy) >= 3.0 {
                return Some((cx, cy));
            }
        }
        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_count_for_wave(upcoming_wave: u32) -> u8 {
    (2 + upcoming_wave).min(3) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SilentAudio;

    #[test]
    fn title_screen_transitions_to_playing_on_fire() {
        let mut g = Game::new();
        assert_eq!(g.state(), GameState::Title);
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn fire_is_edge_triggered_not_level_triggered() {
        let mut g = Game::new();
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        assert_eq!(g.state(), GameState::Playing);
        let ammo_after_start = g.player().ammo;

        // Holding FIRE across the next tick must not fire again.
        g.tick(constants::buttons::FIRE, 50, &mut SilentAudio);
        assert_eq!(g.player().ammo, ammo_after_start);

        g.tick(0, 100, &mut SilentAudio);
        g.tick(constants::buttons::FIRE, 150, &mut SilentAudio);
        assert_eq!(g.player().ammo, ammo_after_start - 1);
    }

    #[test]
    fn player_death_transitions_to_game_over() {
        let mut g = Game::new();
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        g.player.health = 1;
        g.player.x = 4.0;
        g.player.y = 4.0;
        g.sprites.spawn_enemy(0, 4.5, 4.0, 0);
        // Run enough ticks for the adjacent enemy to land its attack.
        for i in 0..5 {
            g.tick(0, 50 * i, &mut SilentAudio);
            if g.state() == GameState::GameOver {
                break;
            }
        }
        assert_eq!(g.state(), GameState::GameOver);
    }

    #[test]
    fn game_over_restarts_directly_into_playing_on_fire() {
        let mut g = Game::new();
        g.state = GameState::GameOver;
        g.player.health = 0;
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        assert_eq!(g.state(), GameState::Playing);
        assert_eq!(g.player().health, constants::PLAYER_START_HEALTH);
    }

    #[test]
    fn starting_a_game_queues_the_first_wave() {
        let mut g = Game::new();
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        assert_eq!(g.wave_state(), WaveState::ActivePendingSpawn);
    }

    #[test]
    fn first_wave_queues_three_enemies() {
        assert_eq!(spawn_count_for_wave(1), 3);
        assert_eq!(spawn_count_for_wave(2), 3);
        assert_eq!(spawn_count_for_wave(5), 3);
    }

    #[test]
    fn is_player_alive_tracks_health() {
        let mut g = Game::new();
        assert!(g.is_initialized());
        assert!(g.is_player_alive());
        g.tick(constants::buttons::FIRE, 0, &mut SilentAudio);
        g.player.health = 0;
        assert!(!g.is_player_alive());
    }
}
