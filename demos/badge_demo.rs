//! Badge wiring for `pixeldoom-core`: reads the D-pad and A button, runs
//! one `Game::tick` per frame, and upscales the 128x64 monochrome
//! framebuffer onto the badge's 320x170 ST7789 color LCD.
//!
//! - Up/Down: move forward/back
//! - Left/Right: turn
//! - A: fire

#![no_std]
#![no_main]

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, Ordering};

use defmt::info;
#[allow(clippy::wildcard_imports)]
use pixeldoom_core::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

esp_bootloader_esp_idf::esp_app_desc!();

/// Upscale factor from the 128x64 mono buffer to the 320x170 panel.
const SCALE: u32 = 2;
const OUT_W: u32 = FB_W as u32 * SCALE;
const OUT_H: u32 = FB_H as u32 * SCALE;
const OFFSET_X: i32 = (320 - OUT_W as i32) / 2;
const OFFSET_Y: i32 = (170 - OUT_H as i32) / 2;

static INPUT_BUTTONS: AtomicU8 = AtomicU8::new(0);

struct SharedFrame(UnsafeCell<[u8; FB_BYTES]>);
unsafe impl Sync for SharedFrame {}

static FRAMEBUF: SharedFrame = SharedFrame(UnsafeCell::new([0u8; FB_BYTES]));
/// 0 = game owns the buffer, 1 = ready to blit, 2 = display task reading it.
static FRAME_STATE: core::sync::atomic::AtomicU8 = core::sync::atomic::AtomicU8::new(0);

struct MillisClock;

impl Clock for MillisClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

#[embassy_executor::task]
async fn input_task(buttons: &'static mut Buttons) {
    info!("Input task started");
    loop {
        let mut mask = 0u8;
        if buttons.up.is_low() {
            mask |= button_bits::UP;
        }
        if buttons.down.is_low() {
            mask |= button_bits::DOWN;
        }
        if buttons.left.is_low() {
            mask |= button_bits::LEFT;
        }
        if buttons.right.is_low() {
            mask |= button_bits::RIGHT;
        }
        if buttons.a.is_low() {
            mask |= button_bits::FIRE;
        }
        INPUT_BUTTONS.store(mask, Ordering::Relaxed);
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::task]
async fn display_blit_task(display: &'static mut Display<'static>) {
    info!("Display blit task running on core 1");
    let area = Rectangle::new(Point::new(OFFSET_X, OFFSET_Y), Size::new(OUT_W, OUT_H));
    loop {
        if FRAME_STATE.load(Ordering::Acquire) == 1 {
            FRAME_STATE.store(2, Ordering::Release);
            let frame: &[u8; FB_BYTES] = unsafe { &*FRAMEBUF.0.get() };
            let pixels = (0..OUT_H).flat_map(|oy| {
                (0..OUT_W).map(move |ox| {
                    let x = (ox / SCALE) as usize;
                    let y = (oy / SCALE) as usize;
                    let byte = (y / 8) * FB_W + x;
                    let bit = 1u8 << (y % 8);
                    if frame[byte] & bit != 0 { Rgb565::WHITE } else { Rgb565::BLACK }
                })
            });
            let _ = display.fill_contiguous(&area, pixels);
            FRAME_STATE.store(0, Ordering::Release);
        } else {
            Timer::after(Duration::from_millis(1)).await;
        }
    }
}

#[embassy_executor::task]
async fn game_task() {
    info!("pixeldoom game task started");
    let mut game = Game::new();
    let clock = MillisClock;
    let tick = Duration::from_millis(TICK_MS);
    let mut audio = SilentAudio;

    loop {
        let buttons = INPUT_BUTTONS.load(Ordering::Relaxed);
        game.tick(buttons, clock.now_ms(), &mut audio);

        while FRAME_STATE.load(Ordering::Acquire) != 0 {
            Timer::after(Duration::from_millis(1)).await;
        }
        let dst: &mut [u8; FB_BYTES] = unsafe { &mut *FRAMEBUF.0.get() };
        *dst = *game.framebuffer().as_bytes();
        FRAME_STATE.store(1, Ordering::Release);

        Timer::after(tick).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = pixeldoom_core::init();
    let resources = pixeldoom_core::split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let buttons = pixeldoom_core::mk_static!(Buttons, resources.buttons.into());

    use esp_hal::interrupt::software::SoftwareInterruptControl;
    let sw_ints = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);

    let core1_stack = pixeldoom_core::mk_static!(esp_hal::system::Stack<8192>, esp_hal::system::Stack::new());

    esp_rtos::start_second_core::<8192>(
        peripherals.CPU_CTRL,
        sw_ints.software_interrupt0,
        sw_ints.software_interrupt1,
        core1_stack,
        || {
            let executor = pixeldoom_core::mk_static!(
                esp_rtos::embassy::Executor,
                esp_rtos::embassy::Executor::new()
            );
            executor.run(|spawner| {
                let display = pixeldoom_core::mk_static!(Display<'static>, resources.display.into());
                spawner.must_spawn(display_blit_task(display));
            });
        },
    );

    spawner.must_spawn(input_task(buttons));
    spawner.must_spawn(game_task());

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
