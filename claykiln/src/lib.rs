//! Indirect-object engine for writing PDF files.
//!
//! A [`Document`] owns every indirect object of the file. Objects are filled
//! while the document is built and each one is serialized exactly once when
//! the document is saved, in the order the objects were created.

pub use document::{Document, DocumentConfig};
pub use error::KilnError;
pub use object::{Encryptor, IndirectObject, ObjectKind};
pub use outline::{Destination, OutlineEntry, OutlineNode, OutlineStyle, Rgb};
pub use pdf::{Dictionary, Name, Object, ObjectId, ResourceCategory, ResourceCode};
pub use resources::{FontResource, FontUsage};
pub use writer::{CountingSink, Real, Sink};

pub mod document;
mod error;
pub mod object;
pub mod outline;
pub mod pdf;
pub mod resources;
pub mod simple_encode;
pub mod writer;
