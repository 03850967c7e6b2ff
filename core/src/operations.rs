use rand::RngCore;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SPRITE_HEIGHT};
use crate::errors::Fault;
use crate::state::State;

// Every operation runs after the pc has been advanced past its own instruction,
// so "skip" means one further instruction and "retry" means rewinding by one.

const FLAG: usize = 0xF;

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Writes a result to Vx and then a flag to VF, so the flag wins when x == F
fn set_with_flag(state: &mut State, x: u8, value: u8, flag: bool) {
    state.v[x as usize] = value;
    state.v[FLAG] = flag as u8;
}

/// clear
pub fn clr(state: &mut State) {
    for row in state.frame_buffer.iter_mut() {
        *row = [0; DISPLAY_WIDTH];
    }
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), Fault> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Fault> {
    state.push(state.pc)?;
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
/// The carry is dropped and VF is left alone
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy; VF = 0
pub fn or(state: &mut State, x: u8, y: u8) {
    let value = state.v[x as usize] | state.v[y as usize];
    set_with_flag(state, x, value, false);
}

/// Vx &= Vy; VF = 0
pub fn and(state: &mut State, x: u8, y: u8) {
    let value = state.v[x as usize] & state.v[y as usize];
    set_with_flag(state, x, value, false);
}

/// Vx ^= Vy; VF = 0
pub fn xor(state: &mut State, x: u8, y: u8) {
    let value = state.v[x as usize] ^ state.v[y as usize];
    set_with_flag(state, x, value, false);
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    set_with_flag(state, x, res, carry);
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    set_with_flag(state, x, res, !borrow);
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) {
    let value = state.v[x as usize];
    set_with_flag(state, x, value >> 1, value & 0x1 == 1);
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    set_with_flag(state, x, res, !borrow);
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) {
    let value = state.v[x as usize];
    set_with_flag(state, x, value << 1, value >> 7 == 1);
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
    let mut rand_byte = [0u8; 1];
    rng.fill_bytes(&mut rand_byte);
    state.v[x as usize] = rand_byte[0] & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any lit pixel is erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), Fault> {
    let sprite = state.read_slice(state.i as usize, n as usize)?.to_vec();
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;

    // Reset the carry flag (used for collision detection)
    state.v[FLAG] = 0x0;

    for (byte, row_bits) in sprite.iter().enumerate() {
        let row = (origin_y + byte) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let col = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (row_bits >> (7 - bit)) & 1;
            state.v[FLAG] |= pixel_value & state.frame_buffer[row][col];
            state.frame_buffer[row][col] ^= pixel_value;
        }
    }

    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) {
    let condition = state.keypad[(state.v[x as usize] & 0xF) as usize];
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) {
    let condition = !state.keypad[(state.v[x as usize] & 0xF) as usize];
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
}

/// await keypress for Vx
/// Re-issues itself every cycle until some key is down
pub fn keyd(state: &mut State, x: u8) {
    match state.first_pressed_key() {
        Some(key) => state.v[x as usize] = key,
        None => state.pc = state.pc.wrapping_sub(2),
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
/// Set I to the memory address of the font sprite for the digit in Vx.
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) {
    state.i = u16::from(state.v[x as usize] & 0xF) * FONT_SPRITE_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<(), Fault> {
    let value = state.v[x as usize];
    let bcd = [value / 100, value / 10 % 10, value % 10];
    state.write_slice(state.i as usize, &bcd)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<(), Fault> {
    let registers = state.v;
    state.write_slice(state.i as usize, &registers[..=x as usize])
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<(), Fault> {
    let count = x as usize + 1;
    let mut values = [0u8; 16];
    values[..count].copy_from_slice(state.read_slice(state.i as usize, count)?);
    state.v[..count].copy_from_slice(&values[..count]);
    Ok(())
}
