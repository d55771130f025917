use std::fmt;

/// Sub-dictionaries of a resource dictionary, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceCategory {
    Font,
    Pattern,
    Shading,
    XObject,
    ExtGState,
    Properties,
}

const CATEGORIES: [(u8, ResourceCategory, &str); 6] = [
    (b'F', ResourceCategory::Font, "Font"),
    (b'P', ResourceCategory::Pattern, "Pattern"),
    (b'S', ResourceCategory::Shading, "Shading"),
    (b'X', ResourceCategory::XObject, "XObject"),
    (b'G', ResourceCategory::ExtGState, "ExtGState"),
    (b'O', ResourceCategory::Properties, "Properties"),
];

impl ResourceCategory {
    pub fn from_letter(letter: u8) -> Option<Self> {
        CATEGORIES.iter().find(|(l, ..)| *l == letter).map(|(_, c, _)| *c)
    }

    pub fn letter(self) -> u8 {
        CATEGORIES[self as usize].0
    }

    /// Key of the sub-dictionary inside a resource dictionary.
    pub fn key(self) -> &'static str {
        CATEGORIES[self as usize].2
    }
}

/// Name a content stream uses to refer to a resource, e.g. `/F3`.
///
/// The character after the slash selects the [`ResourceCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceCode(String);

impl ResourceCode {
    pub fn new(category: ResourceCategory, ordinal: u32) -> Self {
        Self(format!("/{}{}", category.letter() as char, ordinal))
    }

    /// Accepts any name whose first character is a known category letter.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.len() < 2 || bytes[0] != b'/' || bytes.iter().any(|b| b.is_ascii_whitespace()) {
            return None;
        }
        ResourceCategory::from_letter(bytes[1]).map(|_| Self(code.to_owned()))
    }

    pub fn category(&self) -> ResourceCategory {
        // both constructors guarantee a valid letter at index 1
        ResourceCategory::from_letter(self.0.as_bytes()[1]).unwrap_or(ResourceCategory::Properties)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
