//! # pixeldoom-core
//!
//! A deterministic, allocation-free raycasting game core for a 128x64
//! monochrome display. `no_std` by default; the `badge-hardware` feature
//! unlocks the ESP32-S3 wiring in `demos/badge_demo.rs`.
//!
//! The core never touches a peripheral directly — it drives and is driven
//! by the three traits in [`adapters`]: [`adapters::DisplayDriver`],
//! [`adapters::InputSource`], and [`adapters::Clock`]. A host build (under
//! `cargo test`) exercises the exact same [`Game::tick`] pipeline that runs
//! on hardware.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut game = pixeldoom_core::Game::new();
//! let mut audio = pixeldoom_core::SilentAudio;
//! loop {
//!     let buttons = input.poll();
//!     game.tick(buttons, clock.now_ms(), &mut audio);
//!     display.blit(game.framebuffer().as_bytes())?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

mod adapters;
mod combat;
mod constants;
mod depth;
mod dither;
mod feedback;
mod flow;
mod framebuffer;
mod game;
mod hud;
mod level;
mod log;
mod mathutil;
mod player;
mod screens;
mod sprite;
mod sprites_render;
mod texture;
mod validation;
mod world;

#[cfg(feature = "badge-hardware")]
pub mod buttons;
#[cfg(feature = "badge-hardware")]
pub mod display;

#[cfg(feature = "badge-hardware")]
pub use buttons::Buttons;
#[cfg(feature = "badge-hardware")]
pub use display::Display;

pub use adapters::{AudioHook, Clock, DisplayDriver, InputSource, SilentAudio};
pub use combat::DamageDirection;
pub use constants::buttons as button_bits;
pub use constants::{FB_BYTES, FB_H, FB_W, TICK_MS};
pub use feedback::Feedback;
pub use flow::WaveState;
pub use framebuffer::Framebuffer;
pub use game::{Game, GameState};
pub use level::{Level, DEFAULT_LEVEL};
pub use player::Player;
pub use sprite::{AiState, EnemyVisualState, Sprite, SpriteKind, SpriteTable};
pub use validation::{render as render_validation_pattern, TestPattern};

// ── Hardware bring-up (badge-hardware feature only) ─────────────────────────
//
// Everything below here is the seam between the hardware-free core above
// and `demos/badge_demo.rs`. None of it is reachable from a default build.

#[cfg(feature = "badge-hardware")]
pub use esp_hal::peripherals::Peripherals;

#[cfg(feature = "badge-hardware")]
esp_hal::assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            stick: GPIO14,
            a: GPIO13,
            b: GPIO38,
            start: GPIO12,
            select: GPIO45,
        },
    }
}

#[cfg(feature = "badge-hardware")]
impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// StaticCell helper — allocates a value into a `static` exactly once.
#[cfg(feature = "badge-hardware")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

/// Minimal CPU clock switcher for ESP32-S3, required before reaching the
/// target clock speed.
#[cfg(feature = "badge-hardware")]
fn set_cpu_clock(cpu_clock_speed: esp_hal::clock::CpuClock) {
    use esp_hal::clock::Clock as _;

    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                esp_hal::clock::CpuClock::_80MHz => 0,
                esp_hal::clock::CpuClock::_160MHz => 1,
                esp_hal::clock::CpuClock::_240MHz => 2,
                _ => panic!("unsupported CPU clock speed"),
            })
        });

    esp_hal::rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Bring up the badge hardware and return the raw peripheral set. Call once
/// at the top of `main`, then [`split_resources!`] into typed groups.
#[cfg(feature = "badge-hardware")]
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(esp_hal::clock::CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(esp_hal::clock::CpuClock::max());
    esp_hal::init(config)
}
