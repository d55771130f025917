use std::fmt;

#[derive(Debug)]
pub enum KilnError {
    /// Writing to the output sink failed. The output is unusable afterwards.
    Io(std::io::Error),
    /// The object was already serialized and its content released.
    AlreadyWritten { number: u32 },
    UnknownObject { number: u32 },
    /// Content was appended to an object that only carries a dictionary.
    NoPayload { number: u32 },
    NotAnOutlineEntry { number: u32 },
    NotAFont { number: u32 },
    OutlineRootExists,
    NoPages,
}

impl fmt::Display for KilnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KilnError::Io(err) => write!(f, "writing output failed: {}", err),
            KilnError::AlreadyWritten { number } => write!(f, "object {} was already written", number),
            KilnError::UnknownObject { number } => write!(f, "object {} is not registered", number),
            KilnError::NoPayload { number } => write!(f, "object {} has no content payload", number),
            KilnError::NotAnOutlineEntry { number } => write!(f, "object {} is not an outline entry", number),
            KilnError::NotAFont { number } => write!(f, "object {} is not a font resource", number),
            KilnError::OutlineRootExists => write!(f, "the document already has an outline root"),
            KilnError::NoPages => write!(f, "the document has no pages"),
        }
    }
}

impl std::error::Error for KilnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KilnError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KilnError {
    fn from(err: std::io::Error) -> Self {
        KilnError::Io(err)
    }
}
