//! Offset conversion between JavaScript strings (UTF-16 code units) and
//! Rust strings (UTF-8 bytes).

/// Byte offset of the UTF-16 offset `index` in `s`. Offsets past the end
/// clamp to `s.len()`; an offset inside a surrogate pair rounds down.
pub fn utf16_to_byte(s: &str, index: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in s.char_indices() {
        let next = units + ch.len_utf16();
        if next > index {
            return byte;
        }
        units = next;
    }
    s.len()
}

/// UTF-16 offset of the byte offset `byte` in `s`.
pub fn byte_to_utf16(s: &str, byte: usize) -> usize {
    s.char_indices()
        .take_while(|(i, _)| *i < byte)
        .map(|(_, ch)| ch.len_utf16())
        .sum()
}
