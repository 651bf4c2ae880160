/// Counted (Pascal) string.
/// First byte is the number of bytes that follow.
/// A count exceeding the available bytes is clamped.
pub(crate) fn counted_string(bytes: &[u8], ignore_null: bool) -> String {
    let Some((count, rest)) = bytes.split_first() else {
        return String::new()
    };
    let end = (*count as usize).min(rest.len());
    match ignore_null {
        true => rest[..end].iter()
            .filter_map(|b| if b != &0 {Some(*b as char)} else {None})
            .collect(),
        false => rest[..end].iter()
            .map(|b| *b as char)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::counted_string;

    #[test]
    fn counted() {
        assert_eq!(counted_string(b"\x04avc1\0\0", true), "avc1");
        assert_eq!(counted_string(b"\x03a\0b", true), "ab");
        assert_eq!(counted_string(b"\x03a\0b", false), "a\0b");
        assert_eq!(counted_string(b"\xffab", true), "ab");
        assert_eq!(counted_string(b"", true), "");
    }
}
