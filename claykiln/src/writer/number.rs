use std::fmt;

/// Magnitudes below this are written as `0`.
const NEAR_ZERO: f64 = 1e-4;
const FRACTION_DIGITS: usize = 4;

/// A real number in the notation content streams and dictionaries expect.
///
/// Always uses `.` as decimal separator, never an exponent, at most four
/// fractional digits and no trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Real(pub f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if !value.is_finite() || value.abs() < NEAR_ZERO {
            return f.write_str("0");
        }

        let text = format!("{:.*}", FRACTION_DIGITS, value);
        f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
    }
}

impl From<f64> for Real {
    fn from(v: f64) -> Self {
        Real(v)
    }
}
