use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8_core::Chip8;

use crate::buzzer::Buzzer;
use crate::keymap::pressed_keys;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let size = chip8
        .load_rom_file(&args.rom)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} byte ROM from {}", size, args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, args.scale).map_err(Error::msg)?;
    let buzzer = match Buzzer::new(&sdl) {
        Ok(buzzer) => Some(buzzer),
        Err(e) => {
            warn!("no audio device, continuing without sound: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.clock_speed;
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // If the draw flag is set, render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(Error::msg)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = true,
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = false,
                _ => continue,
            };
        }
        chip8.set_keys(pressed_keys(&events.keyboard_state()));

        // Update state
        if let Err(e) = chip8.step() {
            warn!("{}", e);
        }
        if let Some(buzzer) = &buzzer {
            buzzer.set(chip8.sound_active());
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quitting");
    Ok(())
}
