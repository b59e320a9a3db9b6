//! C11 — deterministic render-pipeline validation patterns. Non-invasive:
//! every pattern here only draws into a `Framebuffer`, never touches game
//! state, so it can run interleaved with anything else for a bring-up
//! check of display orientation, bit order, and the dither table.

use crate::constants::{FB_H, FB_W};
use crate::dither::dither;
use crate::framebuffer::Framebuffer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestPattern {
    AllBlack,
    AllWhite,
    Pixel00,
    Pixel1270,
    Pixel063,
    Pixel12763,
    Center,
    HorizontalLines,
    VerticalLines,
    Grid,
    Checkerboard,
    Gradient,
    CompleteScene,
    ScrollingPattern,
}

impl TestPattern {
    pub const ALL: [TestPattern; 14] = [
        TestPattern::AllBlack,
        TestPattern::AllWhite,
        TestPattern::Pixel00,
        TestPattern::Pixel1270,
        TestPattern::Pixel063,
        TestPattern::Pixel12763,
        TestPattern::Center,
        TestPattern::HorizontalLines,
        TestPattern::VerticalLines,
        TestPattern::Grid,
        TestPattern::Checkerboard,
        TestPattern::Gradient,
        TestPattern::CompleteScene,
        TestPattern::ScrollingPattern,
    ];

    pub fn description(self) -> &'static str {
        match self {
            TestPattern::AllBlack => "all pixels off",
            TestPattern::AllWhite => "all pixels on",
            TestPattern::Pixel00 => "single pixel, top-left",
            TestPattern::Pixel1270 => "single pixel, top-right",
            TestPattern::Pixel063 => "single pixel, bottom-left",
            TestPattern::Pixel12763 => "single pixel, bottom-right",
            TestPattern::Center => "single pixel, screen center",
            TestPattern::HorizontalLines => "horizontal lines every 8px",
            TestPattern::VerticalLines => "vertical lines every 8px",
            TestPattern::Grid => "8x8 grid",
            TestPattern::Checkerboard => "2x2 checkerboard",
            TestPattern::Gradient => "5-level dithered gradient",
            TestPattern::CompleteScene => "walls, HUD, crosshair composite",
            TestPattern::ScrollingPattern => "moving bar, 8-frame cycle",
        }
    }
}

/// Render one validation pattern into `fb`. `frame_index` only matters for
/// `ScrollingPattern`, which cycles through 8 phases.
pub fn render(pattern: TestPattern, fb: &mut Framebuffer, frame_index: u32) {
    fb.clear();
    match pattern {
        TestPattern::AllBlack => {}
        TestPattern::AllWhite => fb.fill_rect(0, 0, FB_W as i32, FB_H as i32, true),
        TestPattern::Pixel00 => fb.set_pixel(0, 0),
        TestPattern::Pixel1270 => fb.set_pixel(FB_W as i32 - 1, 0),
        TestPattern::Pixel063 => fb.set_pixel(0, FB_H as i32 - 1),
        TestPattern::Pixel12763 => fb.set_pixel(FB_W as i32 - 1, FB_H as i32 - 1),
        TestPattern::Center => fb.set_pixel(FB_W as i32 / 2, FB_H as i32 / 2),
        TestPattern::HorizontalLines => {
            let mut y = 0;
            while y < FB_H as i32 {
                fb.hline(0, FB_W as i32 - 1, y, true);
                y += 8;
            }
        }
        TestPattern::VerticalLines => {
            let mut x = 0;
            while x < FB_W as i32 {
                fb.vline(x, 0, FB_H as i32 - 1, true);
                x += 8;
            }
        }
        TestPattern::Grid => {
            render(TestPattern::HorizontalLines, fb, frame_index);
            let mut x = 0;
            while x < FB_W as i32 {
                fb.vline(x, 0, FB_H as i32 - 1, true);
                x += 8;
            }
        }
        TestPattern::Checkerboard => {
            for y in 0..FB_H as i32 {
                for x in 0..FB_W as i32 {
                    fb.put_pixel(x, y, (x + y) % 2 == 0);
                }
            }
        }
        TestPattern::Gradient => {
            let band_w = FB_W as i32 / 5;
            for shade in 0..5u8 {
                let x0 = shade as i32 * band_w;
                let x1 = if shade == 4 { FB_W as i32 - 1 } else { x0 + band_w - 1 };
                for y in 0..FB_H as i32 {
                    for x in x0..=x1 {
                        fb.put_pixel(x, y, dither(shade, x, y));
                    }
                }
            }
        }
        TestPattern::CompleteScene => {
            fb.fill_rect(0, FB_H as i32 / 2, FB_W as i32, FB_H as i32 / 4, true);
            crate::hud::render_hud(fb, &crate::player::Player::spawn(), 0);
        }
        TestPattern::ScrollingPattern => {
            let phase = (frame_index % 8) as i32;
            let x = phase * (FB_W as i32 / 8);
            fb.fill_rect(x, 0, FB_W as i32 / 8, FB_H as i32, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_black_leaves_buffer_empty() {
        let mut fb = Framebuffer::new();
        render(TestPattern::AllBlack, &mut fb, 0);
        assert_eq!(*fb.as_bytes(), [0u8; crate::constants::FB_BYTES]);
    }

    #[test]
    fn all_white_lights_every_pixel() {
        let mut fb = Framebuffer::new();
        render(TestPattern::AllWhite, &mut fb, 0);
        assert_eq!(*fb.as_bytes(), [0xFFu8; crate::constants::FB_BYTES]);
    }

    #[test]
    fn corner_pixel_patterns_hit_the_right_corner() {
        let mut fb = Framebuffer::new();
        render(TestPattern::Pixel12763, &mut fb, 0);
        assert!(fb.get_pixel(FB_W as i32 - 1, FB_H as i32 - 1));
        assert!(!fb.get_pixel(0, 0));
    }

    #[test]
    fn scrolling_pattern_moves_with_frame_index() {
        let mut fb0 = Framebuffer::new();
        render(TestPattern::ScrollingPattern, &mut fb0, 0);
        let mut fb1 = Framebuffer::new();
        render(TestPattern::ScrollingPattern, &mut fb1, 1);
        assert_ne!(*fb0.as_bytes(), *fb1.as_bytes());
    }

    #[test]
    fn every_pattern_has_a_description() {
        for pattern in TestPattern::ALL {
            assert!(!pattern.description().is_empty());
        }
    }
}
