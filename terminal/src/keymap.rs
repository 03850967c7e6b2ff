/// Characters typed for each hexadecimal key, indexed by key value.
///
/// Same QWERTY layout as the windowed frontend:
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
#[rustfmt::skip]
const KEYS: [char; 16] = [
    'x', '1', '2', '3',
    'q', 'w', 'e', 'a',
    's', 'd', 'z', 'c',
    '4', 'r', 'f', 'v',
];

/// Maps a typed character to the keypad, ignoring case
pub fn keymap(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    KEYS.iter().position(|&key| key == c).map(|key| key as u8)
}
