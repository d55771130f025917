use std::io::{self, Write};

use flate2::{write::DeflateEncoder, Compression};

use crate::adler32::adler32;

/// CMF/FLG pair for "deflate, 32K window, default compression".
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x9c];

/// Inputs shorter than this are never compressed.
pub const MIN_INPUT_LEN: usize = 16;

/// Header plus Adler-32 trailer.
pub const FRAME_OVERHEAD: usize = 6;

/// Result of [`compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flate {
    /// Compression didn't pay off, the input is handed back untouched.
    Stored(Vec<u8>),
    /// Complete zlib stream: header, deflate payload, big endian Adler-32.
    Compressed(Vec<u8>),
}

impl Flate {
    pub fn is_compressed(&self) -> bool {
        matches!(self, Flate::Compressed(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Flate::Stored(bytes) | Flate::Compressed(bytes) => bytes,
        }
    }
}

/// Compress `raw` into a zlib stream if the result is smaller than the input.
///
/// Errors can only originate from the deflate backend writing into memory.
pub fn compress(raw: Vec<u8>) -> io::Result<Flate> {
    if raw.len() < MIN_INPUT_LEN {
        return Ok(Flate::Stored(raw));
    }

    let mut encoder = DeflateEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::default());
    encoder.write_all(&raw)?;
    let deflated = encoder.finish()?;

    if deflated.len() + FRAME_OVERHEAD >= raw.len() {
        return Ok(Flate::Stored(raw));
    }

    let mut out = Vec::with_capacity(deflated.len() + FRAME_OVERHEAD);
    out.extend_from_slice(&ZLIB_HEADER);
    out.extend_from_slice(&deflated);
    out.extend_from_slice(&adler32(&raw).to_be_bytes());

    Ok(Flate::Compressed(out))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::{DeflateDecoder, ZlibDecoder};

    use super::*;

    fn content_stream(lines: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for i in 0..lines {
            out.extend_from_slice(format!("BT /F1 12 Tf 72 {} Td (Line {}) Tj ET\n", 700 - i, i).as_bytes());
        }
        out
    }

    #[test]
    fn short_input_is_stored() {
        let raw = b"0123456789abcde".to_vec();
        assert_eq!(compress(raw.clone()).unwrap(), Flate::Stored(raw));
    }

    fn noise(len: usize, seed: u32) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                (state >> 16) as u8
            })
            .collect()
    }

    fn deflated_len(raw: &[u8]) -> usize {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(raw).unwrap();
        encoder.finish().unwrap().len()
    }

    #[test]
    fn incompressible_input_is_stored() {
        let raw = noise(64, 99);
        let result = compress(raw.clone()).unwrap();
        assert!(!result.is_compressed());
        assert_eq!(result.into_bytes(), raw);
    }

    #[test]
    fn frame_must_save_at_least_one_byte() {
        let mut stored_at_break_even = 0;
        let mut compressed_one_byte_smaller = 0;

        // noise followed by a growing run: the deflated size barely moves
        // while the input grows, so the savings pass through the threshold
        for noise_len in 16..48 {
            let prefix = noise(noise_len, noise_len as u32);
            for run_len in 0..96 {
                let mut raw = prefix.clone();
                raw.resize(noise_len + run_len, b'x');
                let framed_len = deflated_len(&raw) + FRAME_OVERHEAD;
                let result = compress(raw.clone()).unwrap();

                if framed_len == raw.len() {
                    assert_eq!(result, Flate::Stored(raw));
                    stored_at_break_even += 1;
                } else if framed_len + 1 == raw.len() {
                    assert!(result.is_compressed());
                    assert_eq!(result.into_bytes().len(), framed_len);
                    compressed_one_byte_smaller += 1;
                }
            }
        }

        assert!(stored_at_break_even > 0);
        assert!(compressed_one_byte_smaller > 0);
    }

    #[test]
    fn frame_layout() {
        let raw = content_stream(50);
        let framed = match compress(raw.clone()).unwrap() {
            Flate::Compressed(bytes) => bytes,
            Flate::Stored(_) => panic!("repetitive input should compress"),
        };

        assert_eq!(&framed[..2], &ZLIB_HEADER);
        assert!(framed.len() < raw.len());

        let trailer: [u8; 4] = framed[framed.len() - 4..].try_into().unwrap();
        assert_eq!(u32::from_be_bytes(trailer), adler32(&raw));

        let mut inflated = Vec::new();
        DeflateDecoder::new(&framed[2..framed.len() - 4])
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, raw);
    }

    #[test]
    fn zlib_decoder_accepts_frame() {
        let raw = content_stream(10);
        let framed = compress(raw.clone()).unwrap().into_bytes();

        let mut inflated = Vec::new();
        ZlibDecoder::new(&framed[..]).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, raw);
    }
}
