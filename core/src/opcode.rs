/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read as four nibbles `PXYN`.
/// `P` picks the instruction family; within a family `N` or the low byte `NN`
/// may pick the exact instruction (e.g. `8XY4` vs `8XY5`, `FX15` vs `FX18`).
///
/// Whatever is left over is operand data:
/// - `X` and `Y` name registers (`X` is also the upper bound of the V0..=VX block for FX55/FX65)
/// - `N` is a 4-bit immediate, the sprite height for DXYN
/// - `NN` is an 8-bit immediate
/// - `NNN` is a 12-bit address
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's first nibble.
    /// `[p___]`
    fn prefix(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.prefix(), self.x(), self.y(), self.n())
    }

    fn prefix(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
