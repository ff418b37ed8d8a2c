/// Neutral gray used whenever an input color cannot be interpreted.
pub const DEFAULT_COLOR: u32 = 0x00CC_CCCC;

/// Format a packed color as `#RRGGBB` (upper-case hex).
#[must_use]
pub fn color_to_hex(color: u32) -> String {
    format!("#{:06X}", color & 0x00FF_FFFF)
}

/// Parse `#RRGGBB` / `RRGGBB` (case-insensitive, surrounding whitespace
/// ignored). Returns `None` for anything that is not a complete hex number
/// fitting in 24 bits.
#[must_use]
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.is_empty()
        || digits.len() > 6
        || !digits.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Normalized sRGB components of a packed color.
#[must_use]
pub fn color_to_rgb(color: u32) -> [f32; 3] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting_is_zero_padded() {
        assert_eq!(color_to_hex(0x00FF00), "#00FF00");
        assert_eq!(color_to_hex(0x0000FF), "#0000FF");
        assert_eq!(color_to_hex(0), "#000000");
    }

    #[test]
    fn hex_parsing_accepts_both_forms() {
        assert_eq!(parse_hex_color("#ff5500"), Some(0xFF5500));
        assert_eq!(parse_hex_color("FF5500"), Some(0xFF5500));
        assert_eq!(parse_hex_color(" #abc "), Some(0xABC));
    }

    #[test]
    fn hex_parsing_rejects_garbage() {
        assert_eq!(parse_hex_color("zz"), None);
        assert_eq!(parse_hex_color("#"), None);
        assert_eq!(parse_hex_color("12zz"), None);
        assert_eq!(parse_hex_color("#1234567"), None);
        assert_eq!(parse_hex_color("-12"), None);
    }

    #[test]
    fn rgb_channels_are_normalized() {
        assert_eq!(color_to_rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(color_to_rgb(0x00FF00), [0.0, 1.0, 0.0]);
    }
}
