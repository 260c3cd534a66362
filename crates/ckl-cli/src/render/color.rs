//! ANSI color helpers.

use ckl_core::enums::Priority;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Red,
    Yellow,
    Green,
    BrightGreen,
    Bold,
}

impl Paint {
    const fn code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Yellow => "33",
            Self::Green => "32",
            Self::BrightGreen => "92",
            Self::Bold => "1",
        }
    }
}

#[must_use]
pub fn paint(text: &str, color: Paint) -> String {
    format!("\u{1b}[{}m{text}\u{1b}[0m", color.code())
}

/// Paint only when `enabled`.
#[must_use]
pub fn paint_if(text: &str, color: Paint, enabled: bool) -> String {
    if enabled {
        paint(text, color)
    } else {
        text.to_string()
    }
}

/// High red, Medium yellow, Low green.
#[must_use]
pub const fn priority_paint(priority: Priority) -> Paint {
    match priority {
        Priority::High => Paint::Red,
        Priority::Medium => Paint::Yellow,
        Priority::Low => Paint::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_in_escape_codes() {
        let painted = paint("High", priority_paint(Priority::High));
        assert_eq!(painted, "\u{1b}[31mHigh\u{1b}[0m");
        assert_eq!(paint("Board", Paint::Bold), "\u{1b}[1mBoard\u{1b}[0m");
    }

    #[test]
    fn paint_if_disabled_is_plain() {
        assert_eq!(paint_if("Low", Paint::Green, false), "Low");
    }
}
