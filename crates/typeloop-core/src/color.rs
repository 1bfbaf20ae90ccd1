// Packed 0xRRGGBB color helpers.

const COLOR_MAX: u32 = 0xff_ffff;

/// Parse a color from a query value or a color picker.
///
/// Accepts `#rrggbb`, `0xrrggbb` and plain numbers (`7486450`). Returns `None`
/// for anything that does not parse or is not finite.
pub fn parse_color(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return if hex.len() == 6 { parse_hex(hex) } else { None };
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_hex(hex);
    }
    let v: f64 = s.parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.clamp(0.0, COLOR_MAX as f64) as u32)
}

fn parse_hex(hex: &str) -> Option<u32> {
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Format as a lowercase CSS hex string, as `<input type="color">` expects.
pub fn to_css_hex(color: u32) -> String {
    format!("#{:06x}", color & COLOR_MAX)
}

/// Split into sRGB channels in \[0, 1\].
#[inline]
pub fn to_srgb(color: u32) -> [f32; 3] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b]
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGB for shading and clear colors on sRGB surfaces.
pub fn to_linear(color: u32) -> [f32; 3] {
    to_srgb(color).map(srgb_to_linear)
}
