use crate::{
    pdf::Name,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

fn is_delimiter(chr: u8) -> bool {
    matches!(
        chr,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Characters that can appear in a name without `#xx` escaping.
fn is_regular(chr: u8) -> bool {
    (b'!'..=b'~').contains(&chr) && chr != b'#' && !is_delimiter(chr)
}

impl Encoder<Name> for SimpleEncoder {
    fn write_to(n: &Name, writer: &mut dyn Writer) {
        let mut last_write = 0;
        writer.write(b"/");
        for (index, &c) in n.iter().enumerate() {
            if !is_regular(c) {
                writer.write(&n[last_write..index]);
                last_write = index + 1;
                writer.write(b"#");
                writer.write(hex::encode([c]).as_bytes());
            }
        }
        writer.write(&n[last_write..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &[u8], expected: &[u8]) {
        let out = SimpleEncoder::encode(&Name::from(name));
        assert_eq!(
            out,
            expected,
            "Expected {}, got {}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&out)
        );
    }

    #[test]
    fn no_delimiters() {
        check(b"FlateDecode", b"/FlateDecode");
    }

    #[test]
    fn delimiter_in_the_middle() {
        check(b"Hello World!", b"/Hello#20World!");
    }

    #[test]
    fn delimiter_start_and_end() {
        check(b" A(", b"/#20A#28");
    }

    #[test]
    fn number_sign_is_escaped() {
        check(b"A#B", b"/A#23B");
    }
}
