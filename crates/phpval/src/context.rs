//! Conversion context configuration
//!
//! String conversion of floating values depends on host configuration
//! (locale decimal separator, `precision` ini setting). The context
//! carries that configuration into the conversion calls; the value core
//! never caches or owns it.

/// Locale and number-format configuration for string conversions.
///
/// The default is culture-invariant: `.` as the decimal separator and
/// PHP's default precision of 14 significant digits.
#[derive(Debug, Clone)]
pub struct Context {
    /// Decimal separator used when rendering floats
    pub decimal_separator: char,

    /// Significant digits kept when rendering floats
    pub precision: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            precision: 14,
        }
    }
}

impl Context {
    /// Create a context with default (invariant) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a float the way PHP's string cast does.
    ///
    /// Integral values print without a fractional part, non-integral
    /// values are rounded to `precision` significant digits, and the
    /// special values render as `NAN` / `INF` / `-INF`.
    pub fn format_double(&self, d: f64) -> String {
        if d.is_nan() {
            return "NAN".to_string();
        }
        if d.is_infinite() {
            return if d > 0.0 { "INF" } else { "-INF" }.to_string();
        }

        let rendered = if d == d.trunc() && d.abs() < 1e15 {
            format!("{:.0}", d)
        } else {
            format!("{}", round_to_precision(d, self.precision))
        };

        if self.decimal_separator == '.' {
            rendered
        } else {
            rendered.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Round to `precision` significant decimal digits.
fn round_to_precision(d: f64, precision: usize) -> f64 {
    if d == 0.0 || !d.is_finite() {
        return d;
    }
    let magnitude = d.abs().log10().floor();
    let factor = 10f64.powf(precision as f64 - 1.0 - magnitude);
    (d * factor).round() / factor
}
