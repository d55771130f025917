use std::fmt::Display;

pub use self::{
    dictionary::Dictionary,
    name::Name,
    resource::{ResourceCategory, ResourceCode},
};

mod dictionary;
mod name;
mod resource;

/// Dictionary type names
pub(crate) mod dict_types {
    pub const CATALOG: &str = "Catalog";
    pub const PAGES: &str = "Pages";
    pub const PAGE: &str = "Page";
    pub const OUTLINES: &str = "Outlines";
    pub const FONT: &str = "Font";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_FILTER: &[u8] = b"Filter";
pub(crate) const K_PARENT: &[u8] = b"Parent";
pub(crate) const K_KIDS: &[u8] = b"Kids";
pub(crate) const K_COUNT: &[u8] = b"Count";
pub(crate) const K_FIRST: &[u8] = b"First";
pub(crate) const K_LAST: &[u8] = b"Last";
pub(crate) const K_PREV: &[u8] = b"Prev";
pub(crate) const K_NEXT: &[u8] = b"Next";
pub(crate) const K_TITLE: &[u8] = b"Title";
pub(crate) const K_DEST: &[u8] = b"Dest";
pub(crate) const K_COLOR: &[u8] = b"C";
pub(crate) const K_FLAGS: &[u8] = b"F";
pub(crate) const K_PAGES: &[u8] = b"Pages";
pub(crate) const K_OUTLINES: &[u8] = b"Outlines";
pub(crate) const K_PAGE_MODE: &[u8] = b"PageMode";
pub(crate) const K_MEDIA_BOX: &[u8] = b"MediaBox";
pub(crate) const K_CONTENTS: &[u8] = b"Contents";
pub(crate) const K_RESOURCES: &[u8] = b"Resources";
pub(crate) const K_SIZE: &[u8] = b"Size";
pub(crate) const K_ROOT: &[u8] = b"Root";

pub(crate) const FLATE_DECODE: &[u8] = b"FlateDecode";

/// Number of an indirect object, also its position in the document registry.
///
/// Numbers start at 1 and are handed out densely in creation order. The
/// generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        let number = u32::try_from(index + 1).expect("more than u32::MAX objects");
        Self(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Name(Name),
    /// Literal string, written in parentheses.
    String(Vec<u8>),
    HexString(Vec<u8>),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Reference(ObjectId),
    /// Pre-formatted text that is written verbatim.
    Raw(String),
}

impl Object {
    /// A text string: literal if plain ASCII, UTF-16BE with byte order mark
    /// otherwise.
    pub fn text(s: &str) -> Self {
        if s.is_ascii() {
            Object::String(s.as_bytes().to_vec())
        } else {
            let mut bytes = vec![0xfe, 0xff];
            for unit in s.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            Object::HexString(bytes)
        }
    }

    pub fn name(&self) -> Option<&Name> {
        if let Object::Name(n) = self {
            Some(n)
        } else {
            None
        }
    }

    pub fn integer(&self) -> Option<i64> {
        if let Object::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Option<ObjectId> {
        if let Object::Reference(r) = self {
            Some(*r)
        } else {
            None
        }
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Object {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for Object {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<Name> for Object {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Self::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Self::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_text_is_literal() {
        assert_eq!(Object::text("Chapter 1"), Object::String(b"Chapter 1".to_vec()));
    }

    #[test]
    fn non_ascii_text_is_utf16() {
        assert_eq!(
            Object::text("Ü"),
            Object::HexString(vec![0xfe, 0xff, 0x00, 0xdc])
        );
    }

    #[test]
    fn object_id_numbers() {
        let id = ObjectId::from_index(0);
        assert_eq!(id.number(), 1);
        assert_eq!(id.index(), 0);
        assert_eq!(ObjectId::from_index(41).to_string(), "42 0 R");
    }
}
