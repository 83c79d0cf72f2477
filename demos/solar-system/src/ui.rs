/// Info panel state and speed-input coercion.
///
/// The host owns the DOM; Rust owns what the panel should show.

use crate::bodies::CelestialBody;

/// Overlay card describing the last picked body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    pub text: String,
    /// Index of the body shown, if any has been shown yet.
    pub body: Option<usize>,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, index: usize, body: &CelestialBody) {
        self.visible = true;
        self.title = body.name.to_owned();
        self.text = body.text.clone();
        self.body = Some(index);
    }

    /// Hide the panel. The last title and text are kept.
    pub fn close(&mut self) {
        self.visible = false;
    }
}

/// Interpret a text input the way JavaScript's `Number()` does.
///
/// Surrounding whitespace is ignored and the empty string is 0. Decimal
/// and exponent forms, `0x`/`0o`/`0b` integers and `Infinity` parse;
/// everything else is NaN.
pub fn coerce_number(input: &str) -> f32 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f32::INFINITY,
        "-Infinity" => return f32::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f32::NAN, |v| v as f32);
    }
    // Rust accepts "inf" and "nan" spellings that Number() rejects.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f32::NAN;
    }
    s.parse::<f32>().unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::default_bodies;

    #[test]
    fn show_then_close() {
        let bodies = default_bodies();
        let mut panel = InfoPanel::new();
        panel.show(2, &bodies[2]);
        assert!(panel.visible);
        assert_eq!(panel.title, "Earth");
        assert_eq!(panel.text, bodies[2].text);
        assert_eq!(panel.body, Some(2));

        panel.close();
        assert!(!panel.visible);
        assert_eq!(panel.body, Some(2));
    }

    #[test]
    fn close_when_hidden_stays_hidden() {
        let mut panel = InfoPanel::new();
        panel.close();
        assert!(!panel.visible);
    }

    #[test]
    fn empty_and_blank_are_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   \t\n"), 0.0);
    }

    #[test]
    fn decimals_parse() {
        assert_eq!(coerce_number("1"), 1.0);
        assert_eq!(coerce_number(" 2.5 "), 2.5);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("1e2"), 100.0);
        assert_eq!(coerce_number("+4"), 4.0);
    }

    #[test]
    fn radix_prefixes_parse() {
        assert_eq!(coerce_number("0x10"), 16.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert_eq!(coerce_number("0o17"), 15.0);
        assert!(coerce_number("0xZZ").is_nan());
    }

    #[test]
    fn infinity_spellings() {
        assert_eq!(coerce_number("Infinity"), f32::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f32::NEG_INFINITY);
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("NaN").is_nan());
    }

    #[test]
    fn garbage_is_nan() {
        assert!(coerce_number("fast").is_nan());
        assert!(coerce_number("1.2.3").is_nan());
        assert!(coerce_number("2x").is_nan());
        assert!(coerce_number(".").is_nan());
    }
}
