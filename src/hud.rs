//! C7 — heads-up display: reserved bottom strip (health bar, ammo
//! counter) plus a center crosshair drawn over the world every frame.

use crate::constants::{BLINK_PERIOD_MS, FB_H, FB_W, LOW_HEALTH_THRESHOLD_PCT, PLAYER_START_HEALTH};
use crate::framebuffer::Framebuffer;
use crate::player::Player;

/// Top row of the reserved HUD strip; the world and sprite passes may
/// paint into this band, but `render_hud` zeroes it before drawing.
const HUD_TOP: i32 = 48;
const SEPARATOR_Y: i32 = 47;

const HP_LABEL_X: i32 = 2;
const HP_LABEL_Y: i32 = 48;
const HEALTH_BAR_X: i32 = 2;
const HEALTH_BAR_Y: i32 = 56;
const HEALTH_BAR_W: i32 = 10;
const HEALTH_BAR_H: i32 = 4;
const HEALTH_DIGITS_Y: i32 = 60;

const AMMO_LABEL_Y: i32 = 48;
const AMMO_DIGITS_Y: i32 = 56;
const AMMO_RIGHT_COL: i32 = 95;

const CROSSHAIR_CX: i32 = FB_W as i32 / 2;
const CROSSHAIR_CY: i32 = FB_H as i32 / 2;

fn is_low_health(player: &Player) -> bool {
    let pct = (player.health as u32 * 100) / PLAYER_START_HEALTH as u32;
    pct <= LOW_HEALTH_THRESHOLD_PCT as u32
}

/// Whether the low-health health bar/number should be lit this frame,
/// blinking at `BLINK_PERIOD_MS` once health drops below the threshold.
fn health_readout_visible(player: &Player, now_ms: u64) -> bool {
    if !is_low_health(player) {
        return true;
    }
    (now_ms / BLINK_PERIOD_MS) % 2 == 0
}

/// Whether the `NO` ammo indicator should be lit this frame.
fn no_ammo_blink_on(now_ms: u64) -> bool {
    (now_ms / BLINK_PERIOD_MS) % 2 == 0
}

fn format_digits(mut value: u32, buf: &mut [u8; 3]) -> &str {
    if value == 0 {
        buf[0] = b'0';
        return core::str::from_utf8(&buf[..1]).unwrap_or("0");
    }
    let mut i = buf.len();
    while value > 0 && i > 0 {
        i -= 1;
        buf[i] = b'0' + (value % 10) as u8;
        value /= 10;
    }
    core::str::from_utf8(&buf[i..]).unwrap_or("0")
}

fn draw_health_readout(fb: &mut Framebuffer, player: &Player, now_ms: u64) {
    fb.draw_text("HP", HP_LABEL_X, HP_LABEL_Y, true);

    if !health_readout_visible(player, now_ms) {
        return;
    }

    fb.rect(HEALTH_BAR_X, HEALTH_BAR_Y, HEALTH_BAR_W, HEALTH_BAR_H, true);
    let segments = (player.health as u32 * 10 / 100).min(10);
    let inner_w = HEALTH_BAR_W - 2;
    let fill_w = (inner_w as u32 * segments / 10) as i32;
    if fill_w > 0 {
        fb.fill_rect(HEALTH_BAR_X + 1, HEALTH_BAR_Y + 1, fill_w, HEALTH_BAR_H - 2, true);
    }

    let mut buf = [0u8; 3];
    let text = format_digits(player.health as u32, &mut buf);
    fb.draw_text(text, HEALTH_BAR_X, HEALTH_DIGITS_Y, true);
}

fn draw_ammo_readout(fb: &mut Framebuffer, player: &Player, now_ms: u64) {
    fb.draw_text_right_aligned("AMMO", AMMO_RIGHT_COL, AMMO_LABEL_Y, true);

    if player.ammo == 0 {
        if no_ammo_blink_on(now_ms) {
            fb.draw_text_right_aligned("NO", AMMO_RIGHT_COL, AMMO_DIGITS_Y, true);
        }
        return;
    }

    let mut buf = [0u8; 3];
    let text = format_digits(player.ammo as u32, &mut buf);
    fb.draw_text_right_aligned(text, AMMO_RIGHT_COL, AMMO_DIGITS_Y, true);
}

/// 5x5 hollow crosshair: four 2-px arms around a deliberately dark
/// center pixel.
fn draw_crosshair(fb: &mut Framebuffer) {
    fb.hline(CROSSHAIR_CX - 2, CROSSHAIR_CX - 1, CROSSHAIR_CY, true);
    fb.hline(CROSSHAIR_CX + 1, CROSSHAIR_CX + 2, CROSSHAIR_CY, true);
    fb.vline(CROSSHAIR_CX, CROSSHAIR_CY - 2, CROSSHAIR_CY - 1, true);
    fb.vline(CROSSHAIR_CX, CROSSHAIR_CY + 1, CROSSHAIR_CY + 2, true);
    fb.clear_pixel(CROSSHAIR_CX, CROSSHAIR_CY);
}

/// Draw the full HUD for this frame: clears rows `HUD_TOP..FB_H` of
/// whatever the world/sprite passes left there, then draws the
/// separator, health readout, ammo readout, and crosshair.
pub fn render_hud(fb: &mut Framebuffer, player: &Player, now_ms: u64) {
    fb.fill_rect(0, HUD_TOP, FB_W as i32, FB_H as i32 - HUD_TOP, false);
    fb.hline(0, FB_W as i32 - 1, SEPARATOR_Y, true);

    draw_health_readout(fb, player, now_ms);
    draw_ammo_readout(fb, player, now_ms);
    draw_crosshair(fb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_hud_clears_the_reserved_band_first() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(10, 50);
        let p = Player::spawn();
        render_hud(&mut fb, &p, 0);
        // The stray world pixel at (10, 50) must not survive the HUD pass
        // unless the HUD itself draws there.
        assert!(!fb.get_pixel(10, 50));
    }

    #[test]
    fn full_health_readout_is_always_visible() {
        let p = Player::spawn();
        assert!(health_readout_visible(&p, 0));
        assert!(health_readout_visible(&p, BLINK_PERIOD_MS));
    }

    #[test]
    fn low_health_readout_blinks_with_period() {
        let mut p = Player::spawn();
        p.health = 1;
        assert!(health_readout_visible(&p, 0));
        assert!(!health_readout_visible(&p, BLINK_PERIOD_MS));
        assert!(health_readout_visible(&p, BLINK_PERIOD_MS * 2));
    }

    #[test]
    fn health_bar_fills_fully_at_full_health() {
        let mut fb = Framebuffer::new();
        let p = Player::spawn();
        draw_health_readout(&mut fb, &p, 0);
        assert!(fb.get_pixel(HEALTH_BAR_X + 1, HEALTH_BAR_Y + 1));
        assert!(fb.get_pixel(HEALTH_BAR_X + HEALTH_BAR_W - 2, HEALTH_BAR_Y + 1));
    }

    #[test]
    fn zero_ammo_blinks_no_instead_of_digits() {
        let mut fb_on = Framebuffer::new();
        let mut p = Player::spawn();
        p.ammo = 0;
        draw_ammo_readout(&mut fb_on, &p, 0);
        let mut fb_off = Framebuffer::new();
        draw_ammo_readout(&mut fb_off, &p, BLINK_PERIOD_MS);
        assert_ne!(*fb_on.as_bytes(), *fb_off.as_bytes());
    }

    #[test]
    fn crosshair_leaves_dead_center_dark() {
        let mut fb = Framebuffer::new();
        draw_crosshair(&mut fb);
        assert!(!fb.get_pixel(CROSSHAIR_CX, CROSSHAIR_CY));
        assert!(fb.get_pixel(CROSSHAIR_CX - 1, CROSSHAIR_CY));
    }
}
