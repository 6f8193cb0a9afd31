//! Text color selection for the action node.
//!
//! Brightness uses the HSP model: sqrt(0.299 r^2 + 0.587 g^2 + 0.114 b^2) on
//! channels in 0..1. Above the midpoint we put dark text on it, otherwise light.

use color::{DynamicColor, Srgb};
use log::warn;
use std::str::FromStr;

/// Fill used when the action declares no branding color.
pub const DEFAULT_BACKGROUND: &str = "#a2a5a9";

pub const DARK_TEXT: &str = "#000000";
pub const LIGHT_TEXT: &str = "#ffffff";

const THRESHOLD: f32 = 0.5;

/// GitHub branding names that are not CSS color keywords.
const BRANDING_ALIASES: &[(&str, &str)] = &[("gray-dark", "#24292e")];

/// Resolved fill and text color for the action node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPalette {
    pub fill: String,
    pub text: &'static str,
}

/// Foreground for `background`, or `None` if it is not a color we can read.
pub fn text_color(background: &str) -> Option<&'static str> {
    srgb(background).map(contrast)
}

fn contrast([r, g, b]: [f32; 3]) -> &'static str {
    let brightness = (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt();
    if brightness > THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Pick fill and text color from the declared branding color.
///
/// `#hex` and CSS names are kept as written. Any other readable form, such as
/// `rgb(1, 2, 3)` or hex without the `#`, is emitted as `#rrggbb` since a comma
/// would end the classDef property. Unreadable colors fall back to the default
/// gray so the diagram stays valid.
pub fn action_palette(declared: Option<&str>) -> ActionPalette {
    let fill = declared.map(str::trim).map(|c| {
        BRANDING_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(c))
            .map(|(_, hex)| (*hex).to_string())
            .unwrap_or_else(|| c.to_string())
    });

    if let Some(fill) = fill {
        match srgb(&fill) {
            Some(rgb) => {
                let text = contrast(rgb);
                let fill = if is_plain(&fill) { fill } else { to_hex(rgb) };
                return ActionPalette { fill, text };
            }
            None => warn!("unrecognized branding color {fill:?}, using {DEFAULT_BACKGROUND}"),
        }
    }

    ActionPalette {
        fill: DEFAULT_BACKGROUND.to_string(),
        text: text_color(DEFAULT_BACKGROUND).unwrap_or(DARK_TEXT),
    }
}

/// `#` followed by hex digits, or a CSS keyword.
fn is_plain(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => {
            color.chars().all(|c| c.is_ascii_alphabetic()) && DynamicColor::from_str(color).is_ok()
        }
    }
}

fn to_hex([r, g, b]: [f32; 3]) -> String {
    let channel = |c: f32| (c * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

fn srgb(s: &str) -> Option<[f32; 3]> {
    let parsed = DynamicColor::from_str(s).ok().or_else(|| {
        // Hex without the leading '#'.
        let bare = s.len() == 3 || s.len() == 6;
        if bare && s.chars().all(|c| c.is_ascii_hexdigit()) {
            DynamicColor::from_str(&format!("#{s}")).ok()
        } else {
            None
        }
    })?;
    let [r, g, b, _] = parsed.to_alpha_color::<Srgb>().components;
    Some([r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn black_gets_light_text_white_gets_dark() {
        assert_eq!(text_color("#000000"), Some(LIGHT_TEXT));
        assert_eq!(text_color("#ffffff"), Some(DARK_TEXT));
    }

    #[test]
    fn default_gray_gets_dark_text() {
        assert_eq!(text_color(DEFAULT_BACKGROUND), Some(DARK_TEXT));
    }

    #[test]
    fn named_and_short_colors() {
        assert_eq!(text_color("yellow"), Some(DARK_TEXT));
        assert_eq!(text_color("navy"), Some(LIGHT_TEXT));
        assert_eq!(text_color("#fff"), Some(DARK_TEXT));
        assert_eq!(text_color("000000"), Some(LIGHT_TEXT));
    }

    #[test]
    fn garbage_is_unreadable() {
        assert_eq!(text_color("not-a-color"), None);
    }

    #[test]
    fn palette_defaults_to_gray() {
        assert_eq!(
            action_palette(None),
            ActionPalette {
                fill: DEFAULT_BACKGROUND.to_string(),
                text: DARK_TEXT,
            }
        );
    }

    #[test]
    fn palette_keeps_declared_color() {
        let p = action_palette(Some("purple"));
        assert_eq!(p.fill, "purple");
        assert_eq!(p.text, LIGHT_TEXT);
    }

    #[test]
    fn palette_resolves_gray_dark() {
        let p = action_palette(Some("gray-dark"));
        assert_eq!(p.fill, "#24292e");
        assert_eq!(p.text, LIGHT_TEXT);
    }

    #[test]
    fn palette_falls_back_on_garbage() {
        assert_eq!(action_palette(Some("sparkly")).fill, DEFAULT_BACKGROUND);
    }

    #[test]
    fn palette_normalizes_functional_colors() {
        let p = action_palette(Some("rgb(1, 2, 3)"));
        assert_eq!(p.fill, "#010203");
        assert_eq!(p.text, LIGHT_TEXT);
        assert!(!p.fill.contains(','));
    }

    #[test]
    fn palette_adds_hash_to_bare_hex() {
        assert_eq!(action_palette(Some("ffcc00")).fill, "#ffcc00");
        assert_eq!(action_palette(Some("abcdef")).fill, "#abcdef");
        assert_eq!(action_palette(Some("#FFF")).fill, "#FFF");
    }
}
