use std::fmt;

use rand::RngCore;

use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices and are always in 0..16 since they come from a single nibble.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 0NNN; treated as a plain jump rather than a machine code routine
    Sys { addr: u16 },
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEqImm { x: u8, kk: u8 },
    /// 4XNN
    SkipNeImm { x: u8, kk: u8 },
    /// 5XY0
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    LoadImm { x: u8, kk: u8 },
    /// 7XNN
    AddImm { x: u8, kk: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8, y: u8 },
    /// 8XY7
    SubN { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    LoadIndex { addr: u16 },
    /// BNNN
    JumpOffset { addr: u16 },
    /// CXNN
    Random { x: u8, kk: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipKeyDown { x: u8 },
    /// EXA1
    SkipKeyUp { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddIndex { x: u8 },
    /// FX29
    LoadSprite { x: u8 },
    /// FX33
    Bcd { x: u8 },
    /// FX55
    Store { x: u8 },
    /// FX65
    Read { x: u8 },
    /// Anything else
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Instruction {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, ..) => Sys { addr },
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqImm { x, kk },
            (0x4, ..) => SkipNeImm { x, kk },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadImm { x, kk },
            (0x7, ..) => AddImm { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpOffset { addr },
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadSprite { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => Unknown(op),
        }
    }

    /// Applies the instruction to `state`.
    ///
    /// `state.pc` must already point past this instruction. On error nothing
    /// besides that advance has been changed.
    pub fn execute(self, state: &mut State, rng: &mut dyn RngCore) -> Result<(), Chip8Error> {
        use Instruction::*;

        match self {
            Clear => clr(state),
            Return => rts(state)?,
            Sys { addr } | Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr)?,
            SkipEqImm { x, kk } => ske(state, x, kk),
            SkipNeImm { x, kk } => skne(state, x, kk),
            SkipEqReg { x, y } => skre(state, x, y),
            LoadImm { x, kk } => load(state, x, kk),
            AddImm { x, kk } => add(state, x, kk),
            Move { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddReg { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            ShiftRight { x, y } => shr(state, x, y),
            SubN { x, y } => subn(state, x, y),
            ShiftLeft { x, y } => shl(state, x, y),
            SkipNeReg { x, y } => skrne(state, x, y),
            LoadIndex { addr } => loadi(state, addr),
            JumpOffset { addr } => jumpi(state, addr),
            Random { x, kk } => rand(state, rng, x, kk),
            Draw { x, y, n } => draw(state, x, y, n),
            SkipKeyDown { x } => skpr(state, x),
            SkipKeyUp { x } => skup(state, x),
            LoadDelay { x } => moved(state, x),
            WaitKey { x } => keyd(state, x),
            SetDelay { x } => loads(state, x),
            SetSound { x } => ld(state, x),
            AddIndex { x } => addi(state, x),
            LoadSprite { x } => ldspr(state, x),
            Bcd { x } => bcd(state, x),
            Store { x } => stor(state, x),
            Read { x } => read(state, x),
            Unknown(opcode) => {
                return Err(Chip8Error::UnknownOpcode {
                    opcode,
                    pc: state.pc.wrapping_sub(0x2),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqImm { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNeImm { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImm { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipKeyUp { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadSprite { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {:#06X}", op),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::STACK_DEPTH;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Runs `op` the way a step would: pc is advanced past it first
    fn exec(state: &mut State, op: u16) -> Result<(), Chip8Error> {
        let mut rng = StdRng::seed_from_u64(0);
        state.pc += 0x2;
        Instruction::decode(op).execute(state, &mut rng)
    }

    #[test]
    fn test_decode_sub_selectors() {
        assert_eq!(Instruction::decode(0x00E0), Instruction::Clear);
        assert_eq!(Instruction::decode(0x00EE), Instruction::Return);
        assert_eq!(Instruction::decode(0x0123), Instruction::Sys { addr: 0x123 });
        assert_eq!(Instruction::decode(0x8AB4), Instruction::AddReg { x: 0xA, y: 0xB });
        assert_eq!(Instruction::decode(0xF265), Instruction::Read { x: 0x2 });
        assert_eq!(Instruction::decode(0xD125), Instruction::Draw { x: 1, y: 2, n: 5 });
    }

    #[test]
    fn test_decode_unknown() {
        for op in [0x5121, 0x8128, 0x912F, 0xE100, 0xF199] {
            assert_eq!(Instruction::decode(op), Instruction::Unknown(op));
        }
    }

    #[test]
    fn test_unknown_reports_and_only_advances() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        let result = exec(&mut state, 0x8128);
        assert!(matches!(
            result,
            Err(Chip8Error::UnknownOpcode { opcode: 0x8128, pc: 0x200 })
        ));
        assert_eq!(state.pc, 0x202);
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_display_mnemonics() {
        assert_eq!(Instruction::decode(0x6122).to_string(), "LD V1, 0x22");
        assert_eq!(Instruction::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(Instruction::decode(0x2ABC).to_string(), "CALL 0xABC");
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer.flip(0, 0);
        exec(&mut state, 0x00E0).unwrap();
        assert_eq!(state.frame_buffer.lit_count(), 0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.stack.push(0x0ABC).unwrap();
        exec(&mut state, 0x00EE).unwrap();
        assert!(state.stack.is_empty());
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflow() {
        let mut state = State::new();
        let result = exec(&mut state, 0x00EE);
        assert!(matches!(result, Err(Chip8Error::StackUnderflow { pc: 0x200 })));
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_0nnn_jumps() {
        let mut state = State::new();
        exec(&mut state, 0x0456).unwrap();
        assert_eq!(state.pc, 0x0456);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        exec(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_1nnn_jp_odd_address() {
        let mut state = State::new();
        exec(&mut state, 0x1203).unwrap();
        assert_eq!(state.pc, 0x0203);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0ABC;
        exec(&mut state, 0x2123).unwrap();
        assert_eq!(state.stack.as_slice(), &[0x0ABE]);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflow_is_dropped() {
        let mut state = State::new();
        for addr in 0..STACK_DEPTH as u16 {
            state.stack.push(addr).unwrap();
        }
        let stack = state.stack;
        let result = exec(&mut state, 0x2123);
        assert!(matches!(result, Err(Chip8Error::StackOverflow { pc: 0x200 })));
        assert_eq!(state.stack, stack);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        exec(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        exec(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(&mut state, 0x5120).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(&mut state, 0x5120).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        exec(&mut state, 0x6122).unwrap();
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add() {
        let mut state = State::new();
        state.v[0x1] = 0x1;
        exec(&mut state, 0x7122).unwrap();
        assert_eq!(state.v[0x1], 0x23);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 250;
        exec(&mut state, 0x710A).unwrap();
        assert_eq!(state.v[0x1], 4);
        assert_eq!(state.v[0xF], 0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        exec(&mut state, 0x8120).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        exec(&mut state, 0x8121).unwrap();
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        exec(&mut state, 0x8122).unwrap();
        assert_eq!(state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        exec(&mut state, 0x8123).unwrap();
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        exec(&mut state, 0x8124).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 250;
        state.v[0x2] = 10;
        exec(&mut state, 0x8124).unwrap();
        assert_eq!(state.v[0x1], 4);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 5;
        state.v[0x2] = 3;
        exec(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 3;
        state.v[0x2] = 5;
        exec(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 254);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut state = State::new();
        state.v[0x1] = 7;
        state.v[0x2] = 7;
        state.v[0xF] = 1;
        exec(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 0);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        state.v[0x2] = 0xF0;
        exec(&mut state, 0x8126).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(state.v[0x2], 0xF0);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        exec(&mut state, 0x8106).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        exec(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        exec(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        exec(&mut state, 0x810E).unwrap();
        // 0xFF * 2 = 0x01FE
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        exec(&mut state, 0x810E).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xyf_flag_is_written_last() {
        // VF as the destination ends up holding the flag, not the result
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x01;
        exec(&mut state, 0x8F14).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(&mut state, 0x9120).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(&mut state, 0x9120).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        exec(&mut state, 0xAABC).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        state.v[0x1] = 0x40;
        exec(&mut state, 0xB1BC).unwrap();
        assert_eq!(state.pc, 0x1BE);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::new();
        exec(&mut state, 0xC10F).unwrap();
        assert_eq!(state.v[0x1] & 0xF0, 0);
        exec(&mut state, 0xC200).unwrap();
        assert_eq!(state.v[0x2], 0);
    }

    #[test]
    fn test_cxkk_rnd_is_deterministic_for_a_seed() {
        let mut a = State::new();
        let mut b = State::new();
        exec(&mut a, 0xC1FF).unwrap();
        exec(&mut b, 0xC1FF).unwrap();
        assert_eq!(a.v[0x1], b.v[0x1]);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        exec(&mut state, 0xD005).unwrap();
        let expected = [
            [true, true, true, true],
            [true, false, false, true],
            [true, false, false, true],
            [true, false, false, true],
            [true, true, true, true],
        ];
        for (row, pixels) in expected.iter().enumerate() {
            for (col, &lit) in pixels.iter().enumerate() {
                assert_eq!(state.frame_buffer.pixel(col + 1, row + 1), lit);
            }
        }
        assert_eq!(state.frame_buffer.lit_count(), 14);
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.frame_buffer.flip(0, 0);
        exec(&mut state, 0xD001).unwrap();
        assert_eq!(state.v[0xF], 0x1)
    }

    #[test]
    fn test_dxyn_drw_no_collision_clears_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x1;
        state.frame_buffer.flip(63, 31);
        exec(&mut state, 0xD001).unwrap();
        assert_eq!(state.v[0xF], 0x0)
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = State::new();
        // 0 1 0 1 -> Set
        state.frame_buffer.flip(1, 0);
        state.frame_buffer.flip(3, 0);
        // 1 1 1 1 -> Draw xor
        exec(&mut state, 0xD001).unwrap();
        let row: Vec<bool> = (0..4).map(|x| state.frame_buffer.pixel(x, 0)).collect();
        assert_eq!(row, [true, false, true, false]);
    }

    #[test]
    fn test_dxyn_drw_wraps() {
        let mut state = State::new();
        state.v[0x0] = 62;
        state.v[0x1] = 30;
        state.i = 0x300;
        state.memory[0x300..0x303].copy_from_slice(&[0xC0, 0xC0, 0xC0]);
        exec(&mut state, 0xD013).unwrap();
        assert!(state.frame_buffer.pixel(62, 30));
        assert!(state.frame_buffer.pixel(63, 31));
        // the third row wraps to the top
        assert!(state.frame_buffer.pixel(62, 0));
        assert!(state.frame_buffer.pixel(63, 0));
        assert_eq!(state.frame_buffer.lit_count(), 6);
    }

    #[test]
    fn test_dxyn_drw_start_position_wraps() {
        let mut state = State::new();
        state.v[0x0] = 64 + 2;
        state.v[0x1] = 32 + 3;
        state.i = 0x300;
        state.memory[0x300] = 0x80;
        exec(&mut state, 0xD011).unwrap();
        assert!(state.frame_buffer.pixel(2, 3));
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.keys = 1 << 0xE;
        state.v[0x1] = 0xE;
        exec(&mut state, 0xE19E).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        exec(&mut state, 0xE19E).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        exec(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.keys = 1 << 0xE;
        state.v[0x1] = 0xE;
        exec(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.delay_timer = 0xF;
        exec(&mut state, 0xF107).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits_without_key() {
        let mut state = State::new();
        exec(&mut state, 0xF10A).unwrap();
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_fx0a_ld_stores_pressed_key() {
        let mut state = State::new();
        state.keys = 1 << 0xC;
        exec(&mut state, 0xF10A).unwrap();
        assert_eq!(state.v[0x1], 0xC);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(&mut state, 0xF115).unwrap();
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(&mut state, 0xF118).unwrap();
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0xFFF;
        state.v[0x1] = 0x1;
        state.v[0xF] = 0x7;
        exec(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x1000);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        exec(&mut state, 0xF129).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        state.v[0x1] = 157;
        state.i = 0x300;
        exec(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x5, 0x7]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx_55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        exec(&mut state, 0xF455).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx_65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        exec(&mut state, 0xF465).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }
}
