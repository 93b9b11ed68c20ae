//! Hex color handling
//!
//! Colors are compared and stored in their normalized form: lowercase,
//! 6-digit `#rrggbb`. Two colors are the same iff their normalized keys match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default lightness reduction used for the darker panel shade
pub const DARKEN_AMOUNT: f64 = 0.15;

/// Lowercase, trim, and expand `#abc` shorthand to `#aabbcc`.
///
/// Strings that do not start with `#` are returned lowercased and trimmed but
/// otherwise untouched, so the result is always usable as an equality key.
pub fn normalize_color_key(hex: &str) -> String {
    let s = hex.trim().to_lowercase();
    if !s.starts_with('#') {
        return s;
    }
    let digits: Vec<char> = s.chars().skip(1).collect();
    if digits.len() == 3 {
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in digits {
            out.push(c);
            out.push(c);
        }
        return out;
    }
    s
}

/// A normalized `#rrggbb` color
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse and normalize a hex string. Returns `None` for anything that is
    /// not `#rgb` or `#rrggbb` after normalization.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_color_key(raw);
        let digits = key.strip_prefix('#')?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(key))
        } else {
            None
        }
    }

    /// Build from a literal known to be valid (palette tables, defaults)
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self::parse(raw).unwrap_or_else(|| Self(normalize_color_key(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGB channels, 0-255
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| {
            self.0
                .get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(0)
        };
        (channel(1), channel(3), channel(5))
    }

    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = self.rgb();
        Hsl::from_rgb(r, g, b)
    }

    /// Reduce HSL lightness by `amount` (clamped at 0), keeping hue and saturation
    pub fn darken(&self, amount: f64) -> HexColor {
        let (r, g, b) = self.rgb();
        let (h, s, l) = hsl_unit(r, g, b);
        let l = (l - amount).max(0.0);
        if s == 0.0 {
            let v = l * 255.0;
            return rgb_to_hex(v, v, v);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        rgb_to_hex(
            hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_rgb(p, q, h) * 255.0,
            hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (h, s, l) = hsl_unit(r, g, b);
        Self { h: h * 360.0, s, l }
    }
}

/// HSL with hue as a fraction of a turn
fn hsl_unit(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn rgb_to_hex(r: f64, g: f64, b: f64) -> HexColor {
    let channel = |x: f64| x.round().clamp(0.0, 255.0) as u8;
    HexColor(format!(
        "#{:02x}{:02x}{:02x}",
        channel(r),
        channel(g),
        channel(b)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_expands_shorthand() {
        assert_eq!(normalize_color_key("#ABC"), "#aabbcc");
        assert_eq!(normalize_color_key("  #2563EB "), "#2563eb");
        assert_eq!(normalize_color_key("red"), "red");
        assert_eq!(normalize_color_key(""), "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(HexColor::parse("#12345").is_none());
        assert!(HexColor::parse("#gggggg").is_none());
        assert!(HexColor::parse("blue").is_none());
        assert_eq!(HexColor::parse("#FfF").unwrap().as_str(), "#ffffff");
    }

    #[test]
    fn test_hsl_conversion() {
        let hsl = HexColor::parse("#b91c1c").unwrap().to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert!((hsl.l - 0.41764705882352937).abs() < 1e-12);

        let gray = HexColor::parse("#737373").unwrap().to_hsl();
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.h, 0.0);

        let blue = HexColor::parse("#2563eb").unwrap().to_hsl();
        assert!((blue.h - 221.21212121212122).abs() < 1e-9);
    }

    #[test]
    fn test_darken() {
        let darken = |hex: &str| HexColor::parse(hex).unwrap().darken(DARKEN_AMOUNT);
        assert_eq!(darken("#2563eb").as_str(), "#1043b3");
        assert_eq!(darken("#737373").as_str(), "#4d4d4d");
        assert_eq!(darken("#d97706").as_str(), "#8f4e04");
        assert_eq!(darken("#111111").as_str(), "#000000");
        assert_eq!(
            HexColor::parse("#ffffff").unwrap().darken(0.5).as_str(),
            "#808080"
        );
    }

    #[test]
    fn test_serde_uses_normalized_string() {
        let color: HexColor = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#aabbcc\"");
        assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, upper in any::<bool>()) {
            let mut hex = format!("#{r:02x}{g:02x}{b:02x}");
            if upper {
                hex = hex.to_uppercase();
            }
            let once = normalize_color_key(&hex);
            prop_assert_eq!(normalize_color_key(&once), once.clone());
        }

        #[test]
        fn shorthand_matches_long_form(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
            let short = format!("#{r:x}{g:x}{b:x}");
            let long = format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}");
            prop_assert_eq!(normalize_color_key(&short), normalize_color_key(&long));
            prop_assert_eq!(HexColor::parse(&short), HexColor::parse(&long));
        }
    }
}
