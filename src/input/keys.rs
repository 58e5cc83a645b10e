//! Physical key and modifier types.
//!
//! The host integration layer translates its own input representation into
//! these values once per frame; everything downstream (edge detection, the
//! keymap, the handler chain) works on this small vocabulary.

/// A physical key, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    PageUp,
    PageDown,
    Home,
    End,
    /// A printable character key, lowercase for letters.
    Char(char),
    /// Function keys F1–F12.
    F(u8),
}

impl Key {
    /// Parses the key names used in keymap files.
    ///
    /// Single characters parse as [`Key::Char`]; named keys are
    /// case-insensitive ("up", "enter", "pageup", "f6", …).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "enter" | "return" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "backspace" => Self::Backspace,
            "tab" => Self::Tab,
            "space" => Self::Space,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "home" => Self::Home,
            "end" => Self::End,
            _ => {
                let mut chars = lower.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    return Some(Self::Char(c));
                }
                if let Some(number) = lower.strip_prefix('f') {
                    let n: u8 = number.parse().ok()?;
                    if (1..=12).contains(&n) {
                        return Some(Self::F(n));
                    }
                }
                return None;
            }
        };
        Some(key)
    }
}

/// Modifier key state attached to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
    };
    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
    };
    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
    };

    /// Parses the modifier names used in keymap files ("ctrl", "alt",
    /// "shift"), combining repeats.
    #[must_use]
    pub fn parse(names: &[String]) -> Option<Self> {
        let mut mods = Self::NONE;
        for name in names {
            match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => mods.ctrl = true,
                "alt" => mods.alt = true,
                "shift" => mods.shift = true,
                _ => return None,
            }
        }
        Some(mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_char_keys() {
        assert_eq!(Key::parse("PageUp"), Some(Key::PageUp));
        assert_eq!(Key::parse("q"), Some(Key::Char('q')));
        assert_eq!(Key::parse("/"), Some(Key::Char('/')));
        assert_eq!(Key::parse("f6"), Some(Key::F(6)));
        assert_eq!(Key::parse("f13"), None);
        assert_eq!(Key::parse("bogus"), None);
    }

    #[test]
    fn parses_modifier_lists() {
        let mods = Modifiers::parse(&["ctrl".into(), "shift".into()]).unwrap();
        assert!(mods.ctrl && mods.shift && !mods.alt);
        assert!(Modifiers::parse(&["hyper".into()]).is_none());
        assert_eq!(Modifiers::parse(&[]), Some(Modifiers::NONE));
    }
}
