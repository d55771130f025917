//! Indirect objects and the protocol that writes them to the output.
//!
//! Every object is created through the [`Document`](crate::Document), filled
//! while the document is built and serialized exactly once when the document
//! is finished. Writing releases the dictionary and the payload; the object
//! only keeps its number and file position afterwards.

use std::{cmp::Ordering, fmt};

use aw_zlib::Flate;

use crate::{
    error::KilnError,
    outline::OutlineNode,
    pdf::{Dictionary, Name, Object, ObjectId, ResourceCode, FLATE_DECODE, K_FILTER, K_LENGTH, K_TYPE},
    resources::FontResource,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Sink},
};

const START_STREAM: &[u8] = b"\nstream\n";
const END_STREAM: &[u8] = b"\nendstream\nendobj\n";
const END_OBJECT: &[u8] = b"\nendobj\n";

/// Encryption hook applied to stream data and strings of an object.
pub trait Encryptor {
    fn encrypt(&self, object_number: u32, data: &[u8]) -> Vec<u8>;
}

impl<F> Encryptor for F
where
    F: Fn(u32, &[u8]) -> Vec<u8>,
{
    fn encrypt(&self, object_number: u32, data: &[u8]) -> Vec<u8> {
        self(object_number, data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Raw bytes that already carry their own framing.
    Other,
    Dictionary,
    /// Dictionary followed by a data stream.
    Stream,
}

#[derive(Debug)]
enum Body {
    Other(Vec<u8>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
}

#[derive(Debug)]
enum State {
    Building(Body),
    Written,
}

/// Variant specific data that takes part in writing.
#[derive(Debug)]
pub(crate) enum Extension {
    Plain,
    Font(FontResource),
    Outline(OutlineNode),
}

impl Extension {
    /// Adds entries that can only be known once the document is complete.
    fn decorate(&self, dict: &mut Dictionary) {
        if let Extension::Outline(node) = self {
            node.decorate(dict);
        }
    }
}

#[derive(Debug)]
pub struct IndirectObject {
    id: ObjectId,
    kind: ObjectKind,
    resource_code: Option<ResourceCode>,
    no_compression: bool,
    file_position: Option<usize>,
    state: State,
    pub(crate) extension: Extension,
}

impl IndirectObject {
    pub(crate) fn new(id: ObjectId, kind: ObjectKind, type_tag: Option<&str>, no_compression: bool) -> Self {
        let body = match kind {
            ObjectKind::Other => Body::Other(Vec::new()),
            ObjectKind::Dictionary => Body::Dictionary(Dictionary::new()),
            ObjectKind::Stream => Body::Stream(Dictionary::new(), Vec::new()),
        };
        let mut object = Self {
            id,
            kind,
            resource_code: None,
            no_compression,
            file_position: None,
            state: State::Building(body),
            extension: Extension::Plain,
        };

        if let Some(tag) = type_tag {
            match object.dictionary_mut() {
                Some(dict) => {
                    dict.insert(K_TYPE, Name::from(tag));
                }
                None => log::warn!("object {} has no dictionary for type `{}`", id.number(), tag),
            }
        }

        object
    }

    pub(crate) fn set_resource_code(&mut self, code: ResourceCode) {
        self.resource_code = Some(code);
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.id.number()
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn resource_code(&self) -> Option<&ResourceCode> {
        self.resource_code.as_ref()
    }

    /// Offset of the object in the output, known once it was written.
    pub fn file_position(&self) -> Option<usize> {
        self.file_position
    }

    pub fn is_written(&self) -> bool {
        matches!(self.state, State::Written)
    }

    pub fn no_compression(&self) -> bool {
        self.no_compression
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        match &self.state {
            State::Building(Body::Dictionary(dict)) | State::Building(Body::Stream(dict, _)) => Some(dict),
            _ => None,
        }
    }

    pub fn dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        match &mut self.state {
            State::Building(Body::Dictionary(dict)) | State::Building(Body::Stream(dict, _)) => Some(dict),
            _ => None,
        }
    }

    /// Content accumulated so far.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.state {
            State::Building(Body::Other(data)) | State::Building(Body::Stream(_, data)) => Some(data),
            _ => None,
        }
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), KilnError> {
        let number = self.number();
        match &mut self.state {
            State::Building(Body::Other(data)) | State::Building(Body::Stream(_, data)) => {
                data.extend_from_slice(bytes);
                Ok(())
            }
            State::Building(Body::Dictionary(_)) => Err(KilnError::NoPayload { number }),
            State::Written => Err(KilnError::AlreadyWritten { number }),
        }
    }

    /// Appends formatted text. Format numbers through
    /// [`Real`](crate::writer::Real), which limits them to four fractional
    /// digits and writes magnitudes below 1e-4 as `0`.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), KilnError> {
        self.append(args.to_string().as_bytes())
    }

    /// Orders resources by their resource code.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.resource_code.cmp(&other.resource_code)
    }

    /// Serializes the object into `sink` and releases its content.
    ///
    /// Stream data is compressed unless `no_compression` is set, and then
    /// encrypted if an encryptor is given. Objects of kind
    /// [`ObjectKind::Other`] are written without an object header.
    ///
    /// Can only be called once, later calls fail with
    /// [`KilnError::AlreadyWritten`].
    pub fn write_record(&mut self, sink: &mut dyn Sink, encryptor: Option<&dyn Encryptor>) -> Result<(), KilnError> {
        let number = self.number();
        let body = match std::mem::replace(&mut self.state, State::Written) {
            State::Building(body) => body,
            State::Written => return Err(KilnError::AlreadyWritten { number }),
        };
        self.file_position = Some(sink.position());
        log::trace!("write object {} ({:?}) at {}", number, self.kind, sink.position());

        match body {
            Body::Stream(mut dict, mut data) => {
                self.extension.decorate(&mut dict);
                if !self.no_compression {
                    data = match aw_zlib::compress(data)? {
                        Flate::Compressed(bytes) => {
                            add_flate_filter(&mut dict);
                            bytes
                        }
                        Flate::Stored(bytes) => bytes,
                    };
                }
                if let Some(encryptor) = encryptor {
                    data = encryptor.encrypt(number, &data);
                    encrypt_strings(&mut dict, number, encryptor);
                }
                dict.insert(K_LENGTH, Object::Integer(data.len() as i64));

                write_header(sink, number)?;
                sink.put(&SimpleEncoder::encode(&dict))?;
                sink.put(START_STREAM)?;
                sink.put(&data)?;
                sink.put(END_STREAM)?;
            }
            Body::Dictionary(mut dict) => {
                self.extension.decorate(&mut dict);
                if let Some(encryptor) = encryptor {
                    encrypt_strings(&mut dict, number, encryptor);
                }

                write_header(sink, number)?;
                sink.put(&SimpleEncoder::encode(&dict))?;
                sink.put(END_OBJECT)?;
            }
            Body::Other(data) => {
                sink.put(&data)?;
                sink.put(END_OBJECT)?;
            }
        }

        Ok(())
    }
}

fn write_header(sink: &mut dyn Sink, number: u32) -> Result<(), KilnError> {
    sink.put(format!("{} 0 obj\n", number).as_bytes())
}

/// `FlateDecode` is the last encoding applied, so it goes first.
fn add_flate_filter(dict: &mut Dictionary) {
    let flate = Object::Name(Name::from(FLATE_DECODE));
    match dict.get_mut(K_FILTER) {
        None => {
            dict.insert(K_FILTER, flate);
        }
        Some(Object::Array(filters)) => filters.insert(0, flate),
        Some(existing) => {
            log::warn!("stream already has filter {:?}, adding FlateDecode", existing);
            let previous = std::mem::replace(existing, Object::Null);
            *existing = Object::Array(vec![flate, previous]);
        }
    }
}

fn encrypt_strings(dict: &mut Dictionary, number: u32, encryptor: &dyn Encryptor) {
    for value in dict.values_mut() {
        encrypt_object(value, number, encryptor);
    }
}

fn encrypt_object(object: &mut Object, number: u32, encryptor: &dyn Encryptor) {
    match object {
        Object::String(bytes) | Object::HexString(bytes) => {
            let encrypted = encryptor.encrypt(number, bytes);
            *object = Object::HexString(encrypted);
        }
        Object::Array(items) => {
            for item in items.iter_mut() {
                encrypt_object(item, number, encryptor);
            }
        }
        Object::Dictionary(dict) => encrypt_strings(dict, number, encryptor),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::ZlibDecoder;

    use crate::pdf::ResourceCategory;

    use super::*;

    fn object(kind: ObjectKind, type_tag: Option<&str>, no_compression: bool) -> IndirectObject {
        IndirectObject::new(ObjectId::from_index(0), kind, type_tag, no_compression)
    }

    fn written(object: &mut IndirectObject, encryptor: Option<&dyn Encryptor>) -> Vec<u8> {
        let mut out = Vec::new();
        object.write_record(&mut out, encryptor).unwrap();
        out
    }

    fn content_stream() -> Vec<u8> {
        let mut out = Vec::new();
        for i in 0..40 {
            out.extend_from_slice(format!("BT /F1 12 Tf 72 {} Td (Line {}) Tj ET\n", 700 - 14 * i, i).as_bytes());
        }
        out
    }

    fn xor(number: u32, data: &[u8]) -> Vec<u8> {
        data.iter().map(|b| b ^ number as u8).collect()
    }

    #[test]
    fn dictionary_record() {
        let mut catalog = object(ObjectKind::Dictionary, Some("Catalog"), false);
        assert_eq!(written(&mut catalog, None), b"1 0 obj\n<</Type /Catalog>>\nendobj\n".to_vec());
    }

    #[test]
    fn uncompressed_stream_record() {
        let mut stream = object(ObjectKind::Stream, None, true);
        stream.append(b"BT ").unwrap();
        stream.append_fmt(format_args!("{} {} Td ET", crate::writer::Real(72.0), crate::writer::Real(0.5))).unwrap();
        assert_eq!(
            written(&mut stream, None),
            b"1 0 obj\n<</Length 15>>\nstream\nBT 72 0.5 Td ET\nendstream\nendobj\n".to_vec()
        );
    }

    #[test]
    fn empty_stream_record() {
        let mut stream = object(ObjectKind::Stream, None, false);
        assert_eq!(
            written(&mut stream, None),
            b"1 0 obj\n<</Length 0>>\nstream\n\nendstream\nendobj\n".to_vec()
        );
    }

    #[test]
    fn short_stream_is_not_compressed() {
        let mut stream = object(ObjectKind::Stream, None, false);
        stream.append(b"0 0 m 1 1 l S").unwrap();
        let out = written(&mut stream, None);
        assert_eq!(out, b"1 0 obj\n<</Length 13>>\nstream\n0 0 m 1 1 l S\nendstream\nendobj\n".to_vec());
    }

    #[test]
    fn compressed_stream_record() {
        let raw = content_stream();
        let mut stream = object(ObjectKind::Stream, Some("XObject"), false);
        stream.append(&raw).unwrap();

        let out = written(&mut stream, None);
        let compressed = aw_zlib::compress(raw.clone()).unwrap().into_bytes();
        let mut expected = format!(
            "1 0 obj\n<</Type /XObject /Filter /FlateDecode /Length {}>>\nstream\n",
            compressed.len()
        )
        .into_bytes();
        expected.extend_from_slice(&compressed);
        expected.extend_from_slice(b"\nendstream\nendobj\n");
        assert_eq!(out, expected);

        let mut inflated = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, raw);
    }

    #[test]
    fn existing_filter_is_wrapped() {
        let mut stream = object(ObjectKind::Stream, None, false);
        stream.dictionary_mut().unwrap().insert("Filter", Name::from("ASCIIHexDecode"));
        stream.append(&content_stream()).unwrap();
        let out = String::from_utf8_lossy(&written(&mut stream, None)).into_owned();
        assert!(out.starts_with("1 0 obj\n<</Filter [/FlateDecode /ASCIIHexDecode] /Length "));
    }

    #[test]
    fn encryption_follows_compression() {
        let raw = content_stream();
        let mut stream = object(ObjectKind::Stream, None, false);
        stream.append(&raw).unwrap();

        let out = written(&mut stream, Some(&xor));
        let expected_data = xor(1, &aw_zlib::compress(raw).unwrap().into_bytes());
        let mut expected = format!(
            "1 0 obj\n<</Filter /FlateDecode /Length {}>>\nstream\n",
            expected_data.len()
        )
        .into_bytes();
        expected.extend_from_slice(&expected_data);
        expected.extend_from_slice(b"\nendstream\nendobj\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn dictionary_strings_are_encrypted() {
        let mut info = object(ObjectKind::Dictionary, None, false);
        info.dictionary_mut().unwrap().insert("Title", Object::String(b"AB".to_vec()));
        let out = written(&mut info, Some(&xor));
        // 'A' ^ 1 = 0x40, 'B' ^ 1 = 0x43
        assert_eq!(out, b"1 0 obj\n<</Title <4043>>>\nendobj\n".to_vec());
    }

    #[test]
    fn other_record_has_no_header() {
        let mut raw = object(ObjectKind::Other, None, false);
        assert!(raw.dictionary().is_none());
        raw.append(b"1 0 obj\n(preformatted)").unwrap();
        assert_eq!(written(&mut raw, Some(&xor)), b"1 0 obj\n(preformatted)\nendobj\n".to_vec());
    }

    #[test]
    fn dictionary_has_no_payload() {
        let mut dict = object(ObjectKind::Dictionary, None, false);
        assert!(matches!(dict.append(b"x"), Err(KilnError::NoPayload { number: 1 })));
    }

    #[test]
    fn second_write_fails() {
        let mut stream = object(ObjectKind::Stream, None, true);
        stream.append(b"q Q").unwrap();
        let mut out = Vec::new();
        stream.write_record(&mut out, None).unwrap();
        let len = out.len();

        assert!(matches!(
            stream.write_record(&mut out, None),
            Err(KilnError::AlreadyWritten { number: 1 })
        ));
        assert_eq!(out.len(), len);
        assert!(matches!(stream.append(b"x"), Err(KilnError::AlreadyWritten { .. })));
    }

    #[test]
    fn write_records_position_and_releases_content() {
        let mut stream = object(ObjectKind::Stream, None, true);
        stream.append(b"q Q").unwrap();
        let mut out = b"%PDF-1.4\n".to_vec();
        stream.write_record(&mut out, None).unwrap();

        assert_eq!(stream.file_position(), Some(9));
        assert!(stream.is_written());
        assert!(stream.dictionary().is_none());
        assert!(stream.content().is_none());
    }

    #[test]
    fn compare_by_resource_code() {
        let mut font = object(ObjectKind::Dictionary, None, false);
        font.set_resource_code(ResourceCode::new(ResourceCategory::Font, 2));
        let mut image = IndirectObject::new(ObjectId::from_index(1), ObjectKind::Stream, None, false);
        image.set_resource_code(ResourceCode::new(ResourceCategory::XObject, 1));

        assert_eq!(font.compare(&image), Ordering::Less);
        assert_eq!(image.compare(&font), Ordering::Greater);
        assert_eq!(font.compare(&font), Ordering::Equal);
    }
}
