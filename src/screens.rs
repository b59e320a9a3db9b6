//! C9 — title and game-over screens. Both screens assume
//! the caller already cleared the framebuffer this frame.

use crate::constants::{BLINK_PERIOD_MS, FB_W};
use crate::framebuffer::Framebuffer;

fn blink_on(now_ms: u64) -> bool {
    (now_ms / BLINK_PERIOD_MS) % 2 == 0
}

fn format_u32(mut value: u32, buf: &mut [u8; 10]) -> &str {
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

/// Title screen: crate name plus a blinking prompt.
pub fn render_title_screen(fb: &mut Framebuffer, now_ms: u64) {
    let cx = FB_W as i32 / 2;
    fb.draw_text_centered("DOOM", cx, 20, true);
    if blink_on(now_ms) {
        fb.draw_text_centered("PRESS FIRE", cx, 40, true);
    }
}

/// Game-over screen: outcome, the wave reached, and the same blinking
/// restart prompt.
pub fn render_game_over_screen(fb: &mut Framebuffer, now_ms: u64, wave_reached: u32) {
    let cx = FB_W as i32 / 2;
    fb.draw_text_centered("FAILED", cx, 14, true);

    let mut buf = [0u8; 10];
    let wave_text = format_u32(wave_reached, &mut buf);
    fb.draw_text_centered(wave_text, cx, 26, true);

    if blink_on(now_ms) {
        fb.draw_text_centered("PRESS FIRE", cx, 44, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_u32_handles_zero_and_multi_digit() {
        let mut buf = [0u8; 10];
        assert_eq!(format_u32(0, &mut buf), "0");
        assert_eq!(format_u32(42, &mut buf), "42");
        assert_eq!(format_u32(1000, &mut buf), "1000");
    }

    #[test]
    fn title_prompt_blinks_on_the_configured_period() {
        let mut fb_on = Framebuffer::new();
        render_title_screen(&mut fb_on, 0);
        let mut fb_off = Framebuffer::new();
        render_title_screen(&mut fb_off, BLINK_PERIOD_MS);
        assert_ne!(*fb_on.as_bytes(), *fb_off.as_bytes());
    }

    #[test]
    fn game_over_screen_renders_without_panicking_on_zero_wave() {
        let mut fb = Framebuffer::new();
        render_game_over_screen(&mut fb, 0, 0);
        assert_ne!(*fb.as_bytes(), [0u8; crate::constants::FB_BYTES]);
    }
}
