pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::Chip8Error;
pub use instruction::Instruction;
pub use state::{FrameBuffer, State};
pub use timer::{Clock, ManualClock, SystemClock};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
mod operations;
pub mod state;
pub mod timer;
