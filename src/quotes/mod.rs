//! Option quote lookup: contract resolution, per-contract annotation and
//! report assembly.

mod annotator;
mod resolver;
mod service;

pub use annotator::{Annotation, QuoteAnnotator};
pub use resolver::{ContractResolver, Resolution};
pub use service::{ContractReport, QuoteReport, QuoteService};

/// Formats a price or strike the way a float repr prints it (`100.0`, `2.35`).
///
/// Magnitudes below `1e-4` or from `1e16` up use a signed, two-digit exponent
/// (`1e-05`, `1.5e+16`). Missing and non-finite values print as `N/A`.
#[must_use]
pub fn format_price(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };

    let text = format!("{:?}", v);
    match text.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => text,
        },
        None => text,
    }
}
