//! Theme color parsing for item accents.

/// RGB of a theme color: `#RGB`, `#RRGGBB`, `#RRGGBBAA` (alpha dropped) or
/// one of the accent names (`silver`, `gold`, `copper`, ...).
pub fn parse_color(s: &str) -> Option<(u8, u8, u8)> {
    ThemeColor::parse(s).map(|c| c.rgb)
}

/// A parsed accent color with optional alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColor {
    pub rgb: (u8, u8, u8),
    pub alpha: u8,
}

impl ThemeColor {
    /// Parse a named or hex color. Returns `None` for anything unrecognised.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else {
            named_rgb(s).map(|rgb| Self { rgb, alpha: 255 })
        }
    }

    /// CSS `rgb(r,g,b)` string, alpha dropped.
    pub fn css(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("rgb({r},{g},{b})")
    }

    /// CSS `rgba(...)` string with the given alpha replacing the parsed one.
    pub fn css_with_alpha(&self, alpha: u8) -> String {
        let (r, g, b) = self.rgb;
        format!("rgba({r},{g},{b},{:.3})", alpha as f64 / 255.0)
    }

    /// Soft glow variant used behind the active item (20% opacity).
    pub fn glow_css(&self) -> String {
        self.css_with_alpha(0x33)
    }
}

fn hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

fn parse_hex(hex: &str) -> Option<ThemeColor> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = hex_pair(&hex[0..1])?;
            let g = hex_pair(&hex[1..2])?;
            let b = hex_pair(&hex[2..3])?;
            Some(ThemeColor {
                rgb: (r * 17, g * 17, b * 17),
                alpha: 255,
            })
        }
        6 | 8 => {
            let rgb = (
                hex_pair(&hex[0..2])?,
                hex_pair(&hex[2..4])?,
                hex_pair(&hex[4..6])?,
            );
            let alpha = if hex.len() == 8 {
                hex_pair(&hex[6..8])?
            } else {
                255
            };
            Some(ThemeColor { rgb, alpha })
        }
        _ => None,
    }
}

fn named_rgb(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "gold" => (255, 215, 0),
        "copper" => (184, 115, 51),
        "blue" => (0, 122, 255),
        "green" => (0, 255, 0),
        _ => return None,
    };
    Some(rgb)
}
