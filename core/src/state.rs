use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    SPRITE_SHEET_START, STACK_DEPTH,
};

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound) that only count down
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200.. holds the ROM
/// - 64x32 frame buffer
///
/// ## Input
/// - 16-bit mask of held keys, bit k set means key k is down
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: u16,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let start = SPRITE_SHEET_START as usize;
        memory[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            keys: 0,
        }
    }

    /// Reads a byte, wrapping addresses past the end of memory back to the start
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize % MEMORY_SIZE]
    }

    /// Writes a byte, wrapping addresses past the end of memory back to the start
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize % MEMORY_SIZE] = value;
    }

    /// Whether `key` is currently held; only the low nibble selects the key
    pub fn key_down(&self, key: u8) -> bool {
        self.keys & (1 << (key & 0xF)) != 0
    }

    /// The lowest numbered key that is held, if any
    pub fn first_key_down(&self) -> Option<u8> {
        if self.keys == 0 {
            None
        } else {
            Some(self.keys.trailing_zeros() as u8)
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// # Stack
/// Return addresses pushed by CALL and popped by RET.
///
/// `sp` is the number of occupied entries; it never leaves 0..=STACK_DEPTH.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    entries: [u16; STACK_DEPTH],
    sp: usize,
}

/// Why a stack operation was refused
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackFault {
    Full,
    Empty,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            entries: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), StackFault> {
        let slot = self.entries.get_mut(self.sp).ok_or(StackFault::Full)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackFault> {
        self.sp = self.sp.checked_sub(1).ok_or(StackFault::Empty)?;
        Ok(self.entries[self.sp])
    }

    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// The occupied entries, oldest first
    pub fn as_slice(&self) -> &[u16] {
        &self.entries[..self.sp]
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// # FrameBuffer
/// A 64x32 grid of monochrome pixels indexed as [y][x].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Whether the pixel at (x, y) is lit; coordinates wrap around the edges
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    /// Toggles the pixel at (x, y), wrapping coordinates around the edges.
    /// Returns true if a lit pixel was turned off.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let erased = *pixel;
        *pixel = !*pixel;
        erased
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&lit| lit)
            .count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
