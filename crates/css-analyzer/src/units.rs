//! px/rem unit conversion.
//!
//! The token scale is rem-valued; raw declaration values arrive in either
//! unit. Units beyond px and rem are unsupported and convert to `None`.

/// The rem magnitude of a CSS length literal.
///
/// `"<n>rem"` passes through, `"<n>px"` converts via `n / 16`. Exactly one
/// branch applies per value; anything else (other units, bare numbers,
/// garbage) yields `None`.
pub fn rem_magnitude(value: &str) -> Option<f64> {
    if let Some(magnitude) = value.strip_suffix("rem") {
        magnitude.trim().parse().ok()
    } else if let Some(pixels) = value.strip_suffix("px") {
        pixels.trim().parse::<f64>().ok().map(|n| n / 16.0)
    } else {
        None
    }
}

/// Renders a rem magnitude as its pixel source value, e.g. `0.5` as `"8px"`.
pub fn format_px(magnitude: f64) -> String {
    format!("{}px", magnitude * 16.0)
}
