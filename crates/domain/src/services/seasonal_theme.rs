//! Festive theme selection by calendar date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FestiveTheme {
    None,
    Valentine,
    Halloween,
    Christmas,
    NewYear,
}

impl FestiveTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            FestiveTheme::None => "none",
            FestiveTheme::Valentine => "valentine",
            FestiveTheme::Halloween => "halloween",
            FestiveTheme::Christmas => "christmas",
            FestiveTheme::NewYear => "new_year",
        }
    }

    /// Decorative effect the page shell enables for this theme.
    pub fn effect(&self) -> Option<&'static str> {
        match self {
            FestiveTheme::None => None,
            FestiveTheme::Valentine => Some("hearts"),
            FestiveTheme::Halloween => Some("bats"),
            FestiveTheme::Christmas => Some("snowfall"),
            FestiveTheme::NewYear => Some("fireworks"),
        }
    }
}

impl std::fmt::Display for FestiveTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `(month, day)` range; `start > end` wraps the year end.
struct FestiveWindow {
    start: (u32, u32),
    end: (u32, u32),
    theme: FestiveTheme,
}

impl FestiveWindow {
    fn contains(&self, month_day: (u32, u32)) -> bool {
        if self.start <= self.end {
            self.start <= month_day && month_day <= self.end
        } else {
            month_day >= self.start || month_day <= self.end
        }
    }
}

const FESTIVE_WINDOWS: &[FestiveWindow] = &[
    FestiveWindow {
        start: (2, 7),
        end: (2, 14),
        theme: FestiveTheme::Valentine,
    },
    FestiveWindow {
        start: (10, 24),
        end: (10, 31),
        theme: FestiveTheme::Halloween,
    },
    FestiveWindow {
        start: (12, 1),
        end: (12, 26),
        theme: FestiveTheme::Christmas,
    },
    FestiveWindow {
        start: (12, 27),
        end: (1, 6),
        theme: FestiveTheme::NewYear,
    },
];

pub fn festive_theme_for(date: NaiveDate) -> FestiveTheme {
    let month_day = (date.month(), date.day());
    FESTIVE_WINDOWS
        .iter()
        .find(|window| window.contains(month_day))
        .map(|window| window.theme)
        .unwrap_or(FestiveTheme::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        assert_eq!(festive_theme_for(date(2026, 2, 7)), FestiveTheme::Valentine);
        assert_eq!(festive_theme_for(date(2026, 2, 14)), FestiveTheme::Valentine);
        assert_eq!(festive_theme_for(date(2026, 2, 15)), FestiveTheme::None);
        assert_eq!(festive_theme_for(date(2026, 10, 24)), FestiveTheme::Halloween);
        assert_eq!(festive_theme_for(date(2026, 10, 31)), FestiveTheme::Halloween);
        assert_eq!(festive_theme_for(date(2026, 12, 1)), FestiveTheme::Christmas);
        assert_eq!(festive_theme_for(date(2026, 12, 26)), FestiveTheme::Christmas);
    }

    #[test]
    fn test_new_year_wraps_year_end() {
        assert_eq!(festive_theme_for(date(2026, 12, 27)), FestiveTheme::NewYear);
        assert_eq!(festive_theme_for(date(2026, 12, 31)), FestiveTheme::NewYear);
        assert_eq!(festive_theme_for(date(2027, 1, 1)), FestiveTheme::NewYear);
        assert_eq!(festive_theme_for(date(2027, 1, 6)), FestiveTheme::NewYear);
        assert_eq!(festive_theme_for(date(2027, 1, 7)), FestiveTheme::None);
    }

    #[test]
    fn test_ordinary_days() {
        for d in [date(2026, 3, 1), date(2026, 7, 15), date(2026, 11, 30)] {
            assert_eq!(festive_theme_for(d), FestiveTheme::None);
            assert_eq!(festive_theme_for(d).effect(), None);
        }
    }

    #[test]
    fn test_effects_and_names() {
        assert_eq!(FestiveTheme::Christmas.effect(), Some("snowfall"));
        assert_eq!(FestiveTheme::NewYear.to_string(), "new_year");
        assert_eq!(
            serde_json::to_string(&FestiveTheme::Halloween).unwrap(),
            "\"halloween\""
        );
    }
}
