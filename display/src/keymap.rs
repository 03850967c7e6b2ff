use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// That keypad is laid over the left 4 alphanumeric columns:
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Indexed by the hexadecimal key each keycode stands for.
#[rustfmt::skip]
const KEYS: [Keycode; 16] = [
    Keycode::X, Keycode::Num1, Keycode::Num2, Keycode::Num3,
    Keycode::Q, Keycode::W, Keycode::E, Keycode::A,
    Keycode::S, Keycode::D, Keycode::Z, Keycode::C,
    Keycode::Num4, Keycode::R, Keycode::F, Keycode::V,
];

pub fn keymap(key: Keycode) -> Option<u8> {
    KEYS.iter().position(|&k| k == key).map(|k| k as u8)
}
