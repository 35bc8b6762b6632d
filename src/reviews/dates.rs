//! Review date normalization
//!
//! Maps shows review dates as locale-dependent relative phrases ("2 years
//! ago", "тиждень тому", "3 месяца назад"), sometimes prefixed with an
//! "edited" marker. They are turned into absolute `YYYY-MM-DD` dates against
//! a reference day using fixed-length units: a year is 365 days, a month 30
//! and a week 7. Anything shorter than a day resolves to the reference day.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::utils::constants::UNKNOWN_DATE;

/// Markers Maps adds to reviews changed after posting
const EDITED_MARKERS: [&str; 3] = ["edited", "змінено", "изменено"];

/// Absolute formats accepted, day before month
const ABSOLUTE_FORMATS: [&str; 8] = [
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %b. %Y",
];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// "3 weeks ago", "a year ago", "an hour ago"
static ENGLISH_RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+|an?|one)\s+)?([a-z]+)\s+ago$").expect("Invalid english date regex")
});

/// "2 года назад", "неделю назад"
static RUSSIAN_RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+|один|одна|одну)\s+)?(\p{Cyrillic}+)\s+назад$")
        .expect("Invalid russian date regex")
});

/// Ukrainian expressions shorter than a day ("2 години тому")
static UKRAINIAN_INTRADAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+|одну|один)\s+)?((?:годин|хвилин|секунд)\p{Cyrillic}*)\s+тому$")
        .expect("Invalid ukrainian intraday regex")
});

/// Length units of a relative date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Year,
    Month,
    Week,
    Day,
    /// Hours, minutes and seconds
    Intraday,
}

impl DateUnit {
    #[must_use]
    pub fn days(self) -> u64 {
        match self {
            Self::Year => 365,
            Self::Month => 30,
            Self::Week => 7,
            Self::Day => 1,
            Self::Intraday => 0,
        }
    }

    /// Unit named by an English, Russian or Ukrainian word in any
    /// grammatical form.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let word = word.trim();
        // "годину" (uk hour) shares a prefix with "год" (ru year)
        if ["hour", "minute", "second", "час", "минут", "секунд", "годин", "хвилин"]
            .iter()
            .any(|p| word.starts_with(p))
        {
            return Some(Self::Intraday);
        }
        if word.starts_with("year") || word.starts_with("год") || word == "лет" {
            return Some(Self::Year);
        }
        if ["рік", "роки", "років"].contains(&word) {
            return Some(Self::Year);
        }
        if word.starts_with("month") || word.starts_with("месяц") || word.starts_with("місяц")
        {
            return Some(Self::Month);
        }
        if word.starts_with("week") || word.starts_with("недел") || word.starts_with("тижд")
            || word.starts_with("тижн")
        {
            return Some(Self::Week);
        }
        if word.starts_with("day") || word == "день" || word.starts_with("дн") {
            return Some(Self::Day);
        }
        None
    }
}

/// One rung of the Ukrainian fallback ladder
struct LadderRule {
    pattern: Regex,
    unit: DateUnit,
}

/// Ukrainian relative phrases, matched anywhere in the text. Longer units
/// first: "тиждень тому" ends in "день тому".
static UKRAINIAN_LADDER: Lazy<Vec<LadderRule>> = Lazy::new(|| {
    [
        (r"(?:(\d+)\s+)?\b(?:рік|роки|років)\s+тому", DateUnit::Year),
        (r"(?:(\d+)\s+)?\bмісяц\p{Cyrillic}*\s+тому", DateUnit::Month),
        (r"(?:(\d+)\s+)?\b(?:тиждень|тижні|тижнів|тижня)\s+тому", DateUnit::Week),
        (r"(?:(\d+)\s+)?\b(?:день|дні|днів|дня)\s+тому", DateUnit::Day),
    ]
    .into_iter()
    .map(|(pattern, unit)| LadderRule {
        pattern: Regex::new(pattern).expect("Invalid ukrainian ladder regex"),
        unit,
    })
    .collect()
});

/// Normalize a raw review date to `YYYY-MM-DD`, or `"Unknown"`.
#[must_use]
pub fn normalize_review_date(text: &str, today: NaiveDate) -> String {
    let cleaned = clean_date_text(text);
    if cleaned.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    let resolved = parse_natural_date(&cleaned, today)
        .or_else(|| parse_ukrainian_fallback(&cleaned, today));

    match resolved {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            trace!("Unparseable review date: {}", text);
            UNKNOWN_DATE.to_string()
        }
    }
}

/// Lowercase, drop edited markers and stray punctuation, collapse spaces.
#[must_use]
pub fn clean_date_text(text: &str) -> String {
    let mut cleaned = text.to_lowercase();
    for marker in EDITED_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    cleaned
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ':' | '·' | ','))
        .to_string()
}

/// Relative and absolute dates in English and Russian, plus the
/// single-word days and sub-day Ukrainian phrases.
fn parse_natural_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    match text {
        "today" | "just now" | "сегодня" | "сьогодні" | "только что" | "щойно" => {
            return Some(today);
        }
        "yesterday" | "вчера" | "вчора" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }

    for pattern in [&*ENGLISH_RELATIVE, &*RUSSIAN_RELATIVE, &*UKRAINIAN_INTRADAY] {
        if let Some(caps) = pattern.captures(text) {
            let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
            let unit = DateUnit::from_word(caps.get(2)?.as_str())?;
            return subtract(today, count, unit);
        }
    }

    ABSOLUTE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Ukrainian relative phrases anywhere in the text
fn parse_ukrainian_fallback(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    UKRAINIAN_LADDER.iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        subtract(today, count, rule.unit)
    })
}

fn parse_count(word: &str) -> Option<u64> {
    match word {
        "a" | "an" | "one" | "один" | "одна" | "одну" => Some(1),
        digits => digits.parse().ok(),
    }
}

fn subtract(today: NaiveDate, count: u64, unit: DateUnit) -> Option<NaiveDate> {
    let days = count.checked_mul(unit.days())?;
    today.checked_sub_days(Days::new(days))
}
