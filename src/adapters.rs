//! C12 — the three seams the core crate drives and is driven by: a
//! monochrome framebuffer sink, a button source, and a millisecond clock.
//! Everything above this module is hardware-free; `demos/badge_demo.rs`
//! is where real ESP32-S3 peripherals implement these traits.

use crate::constants::FB_BYTES;

/// Anything that can take a finished 1024-byte page-major frame and put it
/// on a screen (or a test harness, or a headless validation runner).
pub trait DisplayDriver {
    type Error;

    fn blit(&mut self, frame: &[u8; FB_BYTES]) -> Result<(), Self::Error>;
}

/// Polls the current button state. Implementations own debouncing; the
/// core only ever sees the already-debounced bitmask (`constants::buttons`).
pub trait InputSource {
    fn poll(&mut self) -> u8;
}

/// Monotonic milliseconds since some fixed epoch, used for cooldowns,
/// blink cadence, and wave timers.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Optional buzzer/speaker hook. Defaults to silent so a build with no
/// audio hardware still links and runs.
pub trait AudioHook {
    fn beep(&mut self, _hz: u32, _ms: u32) {}
}

/// The no-audio default used when a deployment has no buzzer wired up.
pub struct SilentAudio;

impl AudioHook for SilentAudio {}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingDisplay {
        last_frame: Option<[u8; FB_BYTES]>,
    }

    impl DisplayDriver for RecordingDisplay {
        type Error = ();

        fn blit(&mut self, frame: &[u8; FB_BYTES]) -> Result<(), Self::Error> {
            self.last_frame = Some(*frame);
            Ok(())
        }
    }

    #[test]
    fn display_driver_receives_the_exact_frame() {
        let mut display = RecordingDisplay { last_frame: None };
        let frame = [0xABu8; FB_BYTES];
        display.blit(&frame).expect("blit never fails for the recorder");
        assert_eq!(display.last_frame, Some(frame));
    }

    #[test]
    fn silent_audio_accepts_any_beep_without_effect() {
        let mut audio = SilentAudio;
        audio.beep(440, 100);
    }
}
