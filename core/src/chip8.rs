use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};
use crate::timer::{Clock, SystemClock, TimerGate};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `timers` gate and the `clock` it reads
///  - the `rng` used by CXNN
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    timers: TimerGate,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    /// A Chip8 running on wall clock time with an entropy seeded rng
    pub fn new() -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(StdRng::from_entropy()))
    }

    /// A Chip8 running on wall clock time whose random numbers repeat for a given `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(StdRng::seed_from_u64(seed)))
    }

    /// A Chip8 with an injected clock and rng
    pub fn with_sources(clock: Box<dyn Clock>, rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            timers: TimerGate::new(clock.now()),
            clock,
            rng,
        }
    }

    /// Load a rom from a source
    ///
    /// The source is read before memory is touched, so a failed or
    /// oversized read leaves the machine as it was. At most one byte past
    /// the size limit is ever consumed.
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        let mut rom = Vec::with_capacity(MAX_PROGRAM_SIZE + 1);
        Read::take(reader, MAX_PROGRAM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }

        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        debug!("loaded {} byte ROM at {:#06X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Load a rom from a file on disk
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Chip8Error> {
        let file = File::open(path)?;
        self.load_rom(&mut BufReader::new(file))
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    /// - gives the timers a chance to count down
    ///
    /// Errors are recoverable; the failed instruction is skipped and the next
    /// call carries on from the following one.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let pc = self.state.pc;
        let op = self.get_op();
        self.state.pc = pc.wrapping_add(0x2);

        let instruction = Instruction::decode(op);
        trace!(
            "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
            pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        let result = instruction.execute(&mut self.state, self.rng.as_mut());

        self.advance_timers();
        result
    }

    /// Decrements the timers if enough real time has passed
    fn advance_timers(&mut self) -> bool {
        let now = self.clock.now();
        self.timers.tick(now, &mut self.state)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        let left = u16::from(self.state.read(self.state.pc));
        let right = u16::from(self.state.read(self.state.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Whether the pixel at (x, y) is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.state.frame_buffer.pixel(x, y)
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn and resets the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Replace the held keys; bit k set means key k is down
    pub fn set_keys(&mut self, keys: u16) {
        self.state.keys = keys;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keys |= 1 << (key & 0xF);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keys &= !(1 << (key & 0xF));
    }

    /// Whether the buzzer should be sounding
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
