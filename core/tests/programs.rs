use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{Chip8, Chip8Error, Config, Fault};
use proptest::prelude::*;

fn machine(program: &[u16]) -> Chip8 {
    let mut chip8 = Chip8::new(Config {
        seed: Some(0xC8),
        ..Config::default()
    });
    let rom: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes().to_vec()).collect();
    chip8.load_program(&rom).unwrap();
    chip8
}

fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step().unwrap();
    }
}

fn lit_pixels(chip8: &Chip8) -> Vec<(usize, usize)> {
    let mut lit = Vec::new();
    for (row, pixels) in chip8.frame_buffer().iter().enumerate() {
        for (col, &pixel) in pixels.iter().enumerate() {
            if pixel == 1 {
                lit.push((row, col));
            }
        }
    }
    lit
}

#[test]
fn draws_first_byte_of_memory_at_column_five() {
    // clear; V0 = 5; I = 0; draw 1 row at (V0, V1)
    let mut chip8 = machine(&[0x00E0, 0x6005, 0xA000, 0xD011]);
    run(&mut chip8, 4);

    let sprite = chip8.state().memory[0];
    let expected: Vec<(usize, usize)> = (0..8)
        .filter(|bit| sprite >> (7 - bit) & 1 == 1)
        .map(|bit| (0, 5 + bit))
        .collect();
    assert!(!expected.is_empty());
    assert_eq!(lit_pixels(&chip8), expected);
    assert_eq!(chip8.state().v[0xF], 0);
}

#[test]
fn drawing_twice_erases_and_flags_collision() {
    // I = font "8"; V1 = 30; V2 = 20; draw; draw
    let mut chip8 = machine(&[0xA028, 0x611E, 0x6214, 0xD125, 0xD125]);
    run(&mut chip8, 4);
    assert!(!lit_pixels(&chip8).is_empty());
    assert_eq!(chip8.state().v[0xF], 0);

    run(&mut chip8, 1);
    assert!(lit_pixels(&chip8).is_empty());
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn sprites_wrap_around_the_right_edge() {
    // I = 0x20A (the data word below); V0 = 63; draw 1 row at (V0, V1)
    let mut chip8 = machine(&[0xA20A, 0x603F, 0xD011, 0x1206, 0x0000, 0xFF00]);
    run(&mut chip8, 3);
    let lit = lit_pixels(&chip8);
    assert_eq!(lit.len(), 8);
    assert!(lit.contains(&(0, 63)));
    for col in 0..7 {
        assert!(lit.contains(&(0, col)));
    }
}

#[test]
fn sixteen_nested_calls_unwind_back_to_the_caller() {
    // 0x200: call 0x204; 0x202: spin
    let mut program = vec![0x2204, 0x1202];
    // 15 subroutines that each call the next one and then return
    for depth in 1..16u16 {
        program.push(0x2204 + depth * 4);
        program.push(0x00EE);
    }
    // the innermost subroutine just returns
    program.push(0x00EE);
    let mut chip8 = machine(&program);

    run(&mut chip8, 16);
    assert_eq!(chip8.state().sp, 16);
    run(&mut chip8, 16);
    assert_eq!(chip8.state().sp, 0);
    assert_eq!(chip8.state().pc, 0x202);
}

#[test]
fn seventeenth_nested_call_is_fatal() {
    let mut program = vec![];
    for depth in 0..17u16 {
        program.push(0x2202 + depth * 2);
    }
    let mut chip8 = machine(&program);
    run(&mut chip8, 16);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::OutOfBounds(Fault::StackOverflow))
    ));
}

#[test]
fn stores_bcd_of_157() {
    // V3 = 157; I = 0x300; BCD V3; V0..V2 = mem[I..]
    let mut chip8 = machine(&[0x639D, 0xA300, 0xF333, 0xF265]);
    run(&mut chip8, 4);
    assert_eq!(chip8.state().memory[0x300..0x303], [1, 5, 7]);
    assert_eq!(chip8.state().v[0..3], [1, 5, 7]);
}

#[test]
fn delay_timer_counts_down_once_per_frame() {
    let mut chip8 = Chip8::new(Config {
        instructions_per_frame: 4,
        seed: Some(1),
        ..Config::default()
    });
    // V0 = 3; DT = V0; loop: V1 = DT; jump loop
    chip8
        .load_program(&[0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07, 0x12, 0x04])
        .unwrap();
    let mut previous = 3;
    for _ in 0..6 {
        chip8.run_frame().unwrap();
        let now = chip8.delay_timer();
        assert!(previous - now <= 1);
        previous = now;
    }
    assert_eq!(chip8.delay_timer(), 0);
}

#[test]
fn jump_past_memory_faults_on_fetch() {
    // V0 = 0xFF; jump to 0xFFF + V0
    let mut chip8 = machine(&[0x60FF, 0xBFFF]);
    run(&mut chip8, 2);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::OutOfBounds(Fault::Memory { .. }))
    ));
}

#[test]
fn frame_buffer_dimensions() {
    let chip8 = machine(&[]);
    assert_eq!(chip8.frame_buffer().len(), DISPLAY_HEIGHT);
    assert_eq!(chip8.frame_buffer()[0].len(), DISPLAY_WIDTH);
}

proptest! {
    #[test]
    fn load_then_add_doubles(x in 0u16..16, kk in any::<u8>()) {
        let kk16 = u16::from(kk);
        let mut chip8 = machine(&[0x6000 | x << 8 | kk16, 0x7000 | x << 8 | kk16]);
        run(&mut chip8, 2);
        prop_assert_eq!(chip8.state().v[x as usize], kk.wrapping_mul(2));
    }

    #[test]
    fn shift_right_flags_lsb_and_truncates(x in 0u16..15, value in any::<u8>()) {
        let mut chip8 = machine(&[0x6000 | x << 8 | u16::from(value), 0x8006 | x << 8]);
        run(&mut chip8, 2);
        prop_assert_eq!(chip8.state().v[x as usize], value / 2);
        prop_assert_eq!(chip8.state().v[0xF], value & 1);
    }

    #[test]
    fn drawing_is_an_involution(col in any::<u8>(), row in any::<u8>(), height in 1u16..16) {
        // I = font; V0 = col; V1 = row; draw twice
        let draw = 0xD010 | height;
        let mut chip8 = machine(&[0xA000, 0x6000 | u16::from(col), 0x6100 | u16::from(row), draw, draw]);
        run(&mut chip8, 4);
        let once = *chip8.frame_buffer();
        run(&mut chip8, 1);
        prop_assert!(chip8.frame_buffer().iter().all(|r| r.iter().all(|&p| p == 0)));
        prop_assert_eq!(chip8.state().v[0xF], 1);
        prop_assert!(once.iter().any(|r| r.iter().any(|&p| p == 1)));
    }
}
