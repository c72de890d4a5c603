//! Keyboard event classification.

/// Function-key actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// F1: replace the text with a random dictionary word.
    RandomWord,
    /// F2: rotate the display hue.
    ColorShift,
    /// F3: short bounce of the whole line.
    Jump,
    /// F4: every glyph bursts while the line pops.
    Pop,
    /// F5: multi-stage rocket launch that ends by clearing the line.
    Launch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Escape,
    Trigger(Trigger),
    Other,
}

impl Key {
    /// Classify a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        match name {
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            "F1" => Key::Trigger(Trigger::RandomWord),
            "F2" => Key::Trigger(Trigger::ColorShift),
            "F3" => Key::Trigger(Trigger::Jump),
            "F4" => Key::Trigger(Trigger::Pop),
            "F5" => Key::Trigger(Trigger::Launch),
            // "Dead", "Shift", arrows and the rest
            _ => Key::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_keys_are_chars() {
        assert_eq!(Key::from_key_name("a"), Key::Char('a'));
        assert_eq!(Key::from_key_name(" "), Key::Char(' '));
        assert_eq!(Key::from_key_name("ü"), Key::Char('ü'));
    }

    #[test]
    fn named_keys() {
        assert_eq!(Key::from_key_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_key_name("Escape"), Key::Escape);
        assert_eq!(Key::from_key_name("F5"), Key::Trigger(Trigger::Launch));
        assert_eq!(Key::from_key_name("F2"), Key::Trigger(Trigger::ColorShift));
    }

    #[test]
    fn modifiers_and_dead_keys_are_ignored() {
        for name in ["Dead", "Shift", "ArrowLeft", "F12", ""] {
            assert_eq!(Key::from_key_name(name), Key::Other, "{name}");
        }
    }
}
