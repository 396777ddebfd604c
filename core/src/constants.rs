use std::time::Duration;

/// The display is 64 pixels wide
pub const DISPLAY_WIDTH: usize = 64;
/// The display is 32 pixels tall
pub const DISPLAY_HEIGHT: usize = 32;

/// 4096 bytes of addressable memory
pub const MEMORY_SIZE: usize = 0x1000;
/// ROMs are loaded into memory at 0x200 and execution starts there
pub const PROGRAM_START: u16 = 0x200;
/// Everything from 0x200 to the end of memory is available to a ROM
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Subroutines may nest 16 deep
pub const STACK_DEPTH: usize = 16;
/// V0..VF
pub const REGISTER_COUNT: usize = 16;
/// VF doubles as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// The sprite sheet is installed at the very start of memory
pub const SPRITE_SHEET_START: u16 = 0x000;
/// Each hexadecimal digit sprite is 5 rows tall
pub const SPRITE_HEIGHT: u16 = 5;

/// Delay and sound timers count down at 60Hz regardless of the CPU speed
pub const TIMER_FREQUENCY: u32 = 60;
pub const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_FREQUENCY as u64);

/// Default CPU speed in Hz for drivers that pace execution
pub const CLOCK_SPEED: u32 = 500;

/// # Sprite Sheet
/// One 8x5 sprite per hexadecimal digit; only the high nibble of each row is drawn.
///
/// ```text
/// "0"     Binary   Hex
/// ****    11110000 0xF0
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// ****    11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
