use std::io;

use crate::error::KilnError;

pub use number::Real;

pub mod number;

/// In-memory byte sink used while encoding values.
pub trait Writer {
    fn write(&mut self, buf: &[u8]);
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) {
        self.extend_from_slice(buf);
    }
}

pub trait Encoder<T: ?Sized> {
    fn write_to(o: &T, writer: &mut dyn Writer);

    fn encode(o: &T) -> Vec<u8> {
        let mut out = Vec::new();
        Self::write_to(o, &mut out);
        out
    }
}

/// Final output of a document.
///
/// Keeps track of the number of bytes written so far, which is where the
/// cross-reference table takes object offsets from.
pub trait Sink {
    fn put(&mut self, buf: &[u8]) -> Result<(), KilnError>;
    fn position(&self) -> usize;
    /// Pushes buffered bytes to the final destination.
    fn flush(&mut self) -> Result<(), KilnError>;
}

impl Sink for Vec<u8> {
    fn put(&mut self, buf: &[u8]) -> Result<(), KilnError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }

    fn flush(&mut self) -> Result<(), KilnError> {
        Ok(())
    }
}

/// Adapts any `io::Write` into a [`Sink`].
#[derive(Debug)]
pub struct CountingSink<W> {
    inner: W,
    position: usize,
}

impl<W: io::Write> CountingSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for CountingSink<W> {
    fn put(&mut self, buf: &[u8]) -> Result<(), KilnError> {
        self.inner.write_all(buf)?;
        self.position += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.position
    }

    fn flush(&mut self) -> Result<(), KilnError> {
        self.inner.flush()?;
        Ok(())
    }
}
