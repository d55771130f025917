/// Largest prime smaller than 2^16.
pub const MOD_ADLER: u32 = 65521;

/// Largest n such that `255 * n * (n + 1) / 2 + (n + 1) * (MOD_ADLER - 1)`
/// still fits into an u32. Up to that many bytes can be summed before both
/// accumulators have to be reduced.
const NMAX: usize = 5552;

/// Adler-32 checksum of `data` as used in the zlib trailer.
pub fn adler32(data: &[u8]) -> u32 {
    let mut low: u32 = 1;
    let mut high: u32 = 0;

    for chunk in data.chunks(NMAX) {
        for &byte in chunk {
            low += u32::from(byte);
            high += low;
        }
        low %= MOD_ADLER;
        high %= MOD_ADLER;
    }

    (high << 16) | low
}
