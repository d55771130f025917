//! zlib framing for `FlateDecode` streams.
//!
//! Only the writing direction is implemented. The DEFLATE pass itself is
//! delegated to `flate2`; this crate adds the two byte header, the Adler-32
//! trailer and the policy for when compression is worth it.

pub mod adler32;
mod compress;

pub use adler32::adler32;
pub use compress::{compress, Flate, FRAME_OVERHEAD, MIN_INPUT_LEN, ZLIB_HEADER};
