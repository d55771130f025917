use crate::{
    pdf::Object,
    writer::{Encoder, Real, Writer},
};

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod name;
pub(crate) mod string;

const TRUE_OBJECT: &[u8] = b"true";
const FALSE_OBJECT: &[u8] = b"false";
const NULL_OBJECT: &[u8] = b"null";

/// Writes values in their plain textual form, without any line breaks.
pub struct SimpleEncoder;

impl Encoder<Object> for SimpleEncoder {
    fn write_to(obj: &Object, writer: &mut dyn Writer) {
        match obj {
            Object::Null => writer.write(NULL_OBJECT),
            Object::Bool(true) => writer.write(TRUE_OBJECT),
            Object::Bool(false) => writer.write(FALSE_OBJECT),
            Object::Integer(i) => writer.write(i.to_string().as_bytes()),
            Object::Real(r) => writer.write(Real(*r).to_string().as_bytes()),
            Object::Name(n) => Self::write_to(n, writer),
            Object::String(s) => string::write_literal(s, writer),
            Object::HexString(bytes) => {
                writer.write(b"<");
                writer.write(hex::encode(bytes).as_bytes());
                writer.write(b">");
            }
            Object::Array(a) => Self::write_to(&a[..], writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Reference(r) => writer.write(r.to_string().as_bytes()),
            Object::Raw(text) => writer.write(text.as_bytes()),
        }
    }
}
