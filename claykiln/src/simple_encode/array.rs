use crate::{
    pdf::Object,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

impl Encoder<[Object]> for SimpleEncoder {
    fn write_to(array: &[Object], writer: &mut dyn Writer) {
        writer.write(b"[");
        for (i, item) in array.iter().enumerate() {
            if i != 0 {
                writer.write(b" ");
            }
            Self::write_to(item, writer);
        }
        writer.write(b"]");
    }
}
