use rand::{Rng, RngCore};

use crate::constants::{FLAG_REGISTER, SPRITE_HEIGHT, SPRITE_SHEET_START};
use crate::error::Chip8Error;
use crate::state::State;

// Every operation runs after the fetch has already moved pc past the opcode,
// so "skip" means one more instruction and the faulting address is pc - 2.

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
}

fn current_instruction(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2)
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), Chip8Error> {
    let addr = state
        .stack
        .pop()
        .map_err(|_| Chip8Error::StackUnderflow {
            pc: current_instruction(state),
        })?;
    state.pc = addr;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
/// A full stack drops the call and execution carries on with the next instruction
pub fn call(state: &mut State, addr: u16) -> Result<(), Chip8Error> {
    let pc = state.pc;
    state
        .stack
        .push(pc)
        .map_err(|_| Chip8Error::StackOverflow {
            pc: current_instruction(state),
        })?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Wraps on overflow and leaves VF alone
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[FLAG_REGISTER] = over as u8;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vx.wrapping_sub(vy);
    state.v[FLAG_REGISTER] = (vx > vy) as u8;
}

/// Vx >>= 1; VF = shifted out bit
/// Shifts Vx in place, Vy is ignored
pub fn shr(state: &mut State, x: u8, _y: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx >> 1;
    state.v[FLAG_REGISTER] = vx & 0x1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vy.wrapping_sub(vx);
    state.v[FLAG_REGISTER] = (vy > vx) as u8;
}

/// Vx <<= 1; VF = shifted out bit
/// Shifts Vx in place, Vy is ignored
pub fn shl(state: &mut State, x: u8, _y: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx << 1;
    state.v[FLAG_REGISTER] = vx >> 7;
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition);
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = addr + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, rng: &mut dyn RngCore, x: u8, kk: u8) {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position Vx, Vy on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let left = state.v[x as usize] as usize;
    let top = state.v[y as usize] as usize;
    let mut collision = false;

    for row in 0..n {
        let sprite = state.read(state.i.wrapping_add(u16::from(row)));
        for bit in 0..8 {
            if sprite & (0x80 >> bit) != 0 {
                collision |= state.frame_buffer.flip(left + bit, top + row as usize);
            }
        }
    }

    state.v[FLAG_REGISTER] = collision as u8;
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) {
    let condition = state.key_down(state.v[x as usize]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) {
    let condition = !state.key_down(state.v[x as usize]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
}

/// await keypress for Vx
/// With no key down pc is rewound so this instruction runs again next step
pub fn keyd(state: &mut State, x: u8) {
    match state.first_key_down() {
        Some(key) => state.v[x as usize] = key,
        None => state.pc = current_instruction(state),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) {
    state.i = SPRITE_SHEET_START + u16::from(state.v[x as usize]) * SPRITE_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in (0u16..).zip(digits.iter()) {
        state.write(state.i.wrapping_add(offset), *digit);
    }
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(state: &mut State, x: u8) {
    for register in 0..=x {
        let value = state.v[register as usize];
        state.write(state.i.wrapping_add(u16::from(register)), value);
    }
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(state: &mut State, x: u8) {
    for register in 0..=x {
        state.v[register as usize] = state.read(state.i.wrapping_add(u16::from(register)));
    }
}
