use crate::writer::Writer;

/// Writes `bytes` as literal string.
///
/// Parentheses are always escaped, whether balanced or not, as are
/// backslashes. Carriage returns are escaped so that readers don't normalize
/// line endings inside the string.
pub(crate) fn write_literal(bytes: &[u8], writer: &mut dyn Writer) {
    writer.write(b"(");

    let mut last_written_index = 0;
    for (index, &c) in bytes.iter().enumerate() {
        let escaped: &[u8] = match c {
            b'(' => br"\(",
            b')' => br"\)",
            b'\\' => br"\\",
            b'\r' => br"\r",
            _ => continue,
        };
        writer.write(&bytes[last_written_index..index]);
        writer.write(escaped);
        last_written_index = index + 1;
    }

    writer.write(&bytes[last_written_index..]);
    writer.write(b")");
}
