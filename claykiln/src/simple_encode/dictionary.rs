use crate::{
    pdf::Dictionary,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

impl Encoder<Dictionary> for SimpleEncoder {
    fn write_to(o: &Dictionary, writer: &mut dyn Writer) {
        writer.write(b"<<");
        for (i, (key, value)) in o.iter().enumerate() {
            if i != 0 {
                writer.write(b" ");
            }
            Self::write_to(key, writer);
            writer.write(b" ");
            Self::write_to(value, writer);
        }
        writer.write(b">>");
    }
}
