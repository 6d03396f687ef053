//! Greedy word wrap of a description into at most three lines.
//!
//! Offsets are bytes, not characters: a multi-byte character sitting on a
//! break can end up split between two lines.

/// Lines shorter than this are never broken.
pub const LINE_BUDGET: usize = 51;
/// A break is searched for starting this many bytes into the current line.
const BREAK_SEARCH_OFFSET: usize = LINE_BUDGET - 1;
pub const MAX_LINES: usize = 3;

/// Splits `text` into exactly three slots, unused slots are empty.
///
/// At most two breaks are made. Each break is the first space at or after
/// `LINE_BUDGET - 1` bytes into the current line, and the space itself
/// belongs to neither line. When no such space exists the rest of the text is
/// kept together on the current line.
pub fn split(text: &[u8]) -> [&[u8]; MAX_LINES] {
    let empty: &[u8] = &[];
    if text.len() < LINE_BUDGET {
        return [text, empty, empty];
    }
    let Some(first_break) = find_break(text, BREAK_SEARCH_OFFSET) else {
        return [text, empty, empty];
    };
    let line0 = &text[..first_break];
    let rest = first_break + 1;

    if text.len() < first_break + LINE_BUDGET {
        return [line0, &text[rest..], empty];
    }
    match find_break(text, first_break + BREAK_SEARCH_OFFSET) {
        Some(second_break) => [
            line0,
            &text[rest..second_break],
            &text[second_break + 1..],
        ],
        None => [line0, &text[rest..], empty],
    }
}

/// First space at or after `from`, if any.
fn find_break(text: &[u8], from: usize) -> Option<usize> {
    text.get(from..)?
        .iter()
        .position(|byte| *byte == b' ')
        .map(|offset| from + offset)
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    const NONE: &[u8] = b"";

    fn repeat(byte: u8, n: usize) -> Vec<u8> {
        vec![byte; n]
    }

    #[test]
    fn short_text_is_one_line() {
        let text = repeat(b'a', 50);
        assert_eq!([&text[..], NONE, NONE], split(&text));
        assert_eq!([NONE, NONE, NONE], split(b""));
        assert_eq!([&b"two words"[..], NONE, NONE], split(b"two words"));
    }

    #[test]
    fn no_space_keeps_everything_together() {
        let text = repeat(b'x', 60);
        assert_eq!([&text[..], NONE, NONE], split(&text));
    }

    #[test]
    fn spaces_before_the_search_offset_are_ignored() {
        let mut text = b"short words here ".to_vec();
        text.extend(repeat(b'z', 50));
        assert_eq!([&text[..], NONE, NONE], split(&text));
    }

    #[test]
    fn breaks_at_first_space_after_offset_and_drops_it() {
        let mut text = repeat(b'a', 50);
        text.extend_from_slice(b" bbbb");
        let line0 = repeat(b'a', 50);
        assert_eq!([&line0[..], &b"bbbb"[..], NONE], split(&text));
    }

    #[test]
    fn trailing_space_breaks_into_empty_second_line() {
        let mut text = repeat(b'a', 55);
        text.push(b' ');
        let line0 = repeat(b'a', 55);
        assert_eq!([&line0[..], NONE, NONE], split(&text));
    }

    #[test]
    fn three_lines() {
        let mut text = repeat(b'a', 52);
        text.push(b' ');
        text.extend(repeat(b'b', 60));
        text.push(b' ');
        text.extend(repeat(b'c', 10));
        let [line0, line1, line2] = split(&text);
        assert_eq!(&repeat(b'a', 52)[..], line0);
        assert_eq!(&repeat(b'b', 60)[..], line1);
        assert_eq!(&repeat(b'c', 10)[..], line2);
    }

    #[test]
    fn second_line_without_space_keeps_remainder() {
        let mut text = repeat(b'a', 50);
        text.push(b' ');
        text.extend(repeat(b'b', 70));
        let [line0, line1, line2] = split(&text);
        assert_eq!(&repeat(b'a', 50)[..], line0);
        assert_eq!(&repeat(b'b', 70)[..], line1);
        assert!(line2.is_empty());
    }

    #[test]
    fn third_line_is_never_broken_again() {
        let words = "lorem ".repeat(60);
        let [line0, line1, line2] = split(words.as_bytes());
        assert_eq!(line0.len() + line1.len() + line2.len() + 2, words.len());
        assert!(line2.len() > LINE_BUDGET);
    }

    #[test]
    fn splits_on_bytes_not_characters() {
        // 49 ascii bytes then a 2 byte character straddling the search offset
        let mut text = repeat(b'a', 49);
        text.extend_from_slice("é".as_bytes());
        text.extend_from_slice(b" tail");
        let [line0, line1, _] = split(&text);
        assert_eq!(51, line0.len());
        assert_eq!(b"tail", line1);
    }

    #[test]
    fn long_input_is_not_capped() {
        let mut text = repeat(b'q', 70_000);
        text[60_000] = b' ';
        let [line0, line1, line2] = split(&text);
        assert_eq!(60_000, line0.len());
        assert_eq!(9_999, line1.len());
        assert!(line2.is_empty());
    }
}
