use std::fmt;

use crate::variant::Variant;

/// The outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    raw: f32,
    value: f64,
    variant: Variant,
}

impl Estimate {
    /// Scales the raw model output by the variant's label scale.
    pub fn new(raw: f32, variant: Variant) -> Self {
        Self {
            raw,
            value: f64::from(raw) * variant.label_scale(),
            variant,
        }
    }

    /// The value exactly as the model returned it.
    pub fn raw(&self) -> f32 {
        self.raw
    }

    /// The price in dollars.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The price formatted for display, e.g. `$250,000.00`.
    pub fn formatted(&self) -> String {
        format_currency(self.value)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variant.headline(), self.formatted())
    }
}

/// Formats a dollar amount with thousands separators and two decimals.
///
/// The sign goes after the dollar symbol (`$-1,500.00`) and is kept for negatives that round to
/// zero (`$-0.00`). Non-finite values print as `$nan`, `$inf` and `$-inf`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$nan".to_string();
    }
    if value.is_infinite() {
        return format!("${value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!("${sign}{}.{frac}", group_thousands(int))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
