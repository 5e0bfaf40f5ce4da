//! Colors shared by the renderers and the host

use ratatui::style::Color;

use crate::catalog::{Grade, Tier};

pub const BG_BASE: Color = Color::Rgb(10, 12, 22);
pub const BG_PANEL: Color = Color::Rgb(20, 24, 40);
pub const TEXT_MAIN: Color = Color::Rgb(236, 238, 246);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 176, 198);
pub const TEXT_DIM: Color = Color::Rgb(110, 116, 138);
pub const ACCENT_CYAN: Color = Color::Rgb(0, 243, 255);
pub const ACCENT_PURPLE: Color = Color::Rgb(168, 85, 247);
pub const CAFE_GREEN: Color = Color::Rgb(45, 180, 0);
pub const ERROR_RED: Color = Color::Rgb(255, 90, 90);

pub const GRADE_S_PLUS: Color = Color::Rgb(255, 59, 59);
pub const GRADE_S: Color = Color::Rgb(255, 189, 46);
pub const GRADE_S_MINUS: Color = Color::Rgb(255, 249, 196);
pub const GRADE_A: Color = Color::Rgb(100, 255, 100);
pub const GRADE_DEFAULT: Color = Color::Rgb(160, 160, 176);

/// Badge color for a grade. Defined for every grade, including unlisted ones.
pub fn grade_color(grade: &Grade) -> Color {
    match grade {
        Grade::SPlus => GRADE_S_PLUS,
        Grade::S => GRADE_S,
        Grade::SMinus => GRADE_S_MINUS,
        Grade::APlus | Grade::A => GRADE_A,
        Grade::B | Grade::C => GRADE_DEFAULT,
        Grade::Other(raw) => {
            let normalized = raw.to_uppercase();
            if normalized.contains("S+") {
                GRADE_S_PLUS
            } else if normalized == "S" {
                GRADE_S
            } else if normalized.contains("S-") {
                GRADE_S_MINUS
            } else if normalized.contains('A') {
                GRADE_A
            } else {
                GRADE_DEFAULT
            }
        }
    }
}

/// Label color for a tier row.
pub fn tier_color(tier: &Tier) -> Color {
    match tier {
        Tier::SPlus => Color::Rgb(255, 77, 77),
        Tier::S => Color::Rgb(255, 159, 67),
        Tier::APlus => Color::Rgb(254, 202, 87),
        Tier::A => Color::Rgb(84, 160, 255),
        _ => Color::Rgb(186, 220, 88),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_colors() {
        assert_eq!(grade_color(&Grade::SPlus), GRADE_S_PLUS);
        assert_eq!(grade_color(&Grade::S), GRADE_S);
        assert_eq!(grade_color(&Grade::SMinus), GRADE_S_MINUS);
        assert_eq!(grade_color(&Grade::APlus), GRADE_A);
        assert_eq!(grade_color(&Grade::C), GRADE_DEFAULT);
    }

    #[test]
    fn test_unlisted_grades_are_normalized() {
        assert_eq!(grade_color(&Grade::parse("s")), GRADE_S);
        assert_eq!(grade_color(&Grade::parse("ss+")), GRADE_S_PLUS);
        assert_eq!(grade_color(&Grade::parse("a-")), GRADE_A);
        assert_eq!(grade_color(&Grade::parse("")), GRADE_DEFAULT);
        assert_eq!(grade_color(&Grade::parse("Z")), GRADE_DEFAULT);
    }
}
