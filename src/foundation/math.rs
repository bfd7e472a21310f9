pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp that also maps NaN to `min`, so a bad input can never escape the range.
pub(crate) fn clamp_finite(v: f64, min: f64, max: f64) -> f64 {
    if v.is_nan() { min } else { v.clamp(min, max) }
}

/// Convert one premultiplied RGBA8 pixel back to straight alpha.
pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let a16 = u32::from(a);
    let un = |c: u8| -> u8 { ((u32::from(c.min(a)) * 255 + a16 / 2) / a16).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
