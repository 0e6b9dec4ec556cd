use chrono::Datelike;

use crate::consts::{MONTH_NAMES, MONTH_NAMES_SHORT, SHORT_NAME_MAX_LEN, TWO_DIGIT_YEAR_BASE};
use crate::error::{DateError, Result};
use crate::prelude::*;

/// A month given either by index (0-11) or by English name.
///
/// Names may be full ("January") or three-letter ("Jan") and are matched
/// after capitalizing the first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum MonthRef<'a> {
    Index(i32),
    Name(&'a str),
}

impl MonthRef<'_> {
    /// Resolves to a non-negative month index, or `None` for an unknown name
    /// or a negative index.
    pub fn resolve(self) -> Option<i32> {
        let index = match self {
            MonthRef::Index(index) => index,
            MonthRef::Name(name) => i32::try_from(month_name_to_index(name)?).ok()?,
        };
        (index >= 0).then_some(index)
    }
}

/// Upper bound accepted by [`years`](crate::years).
///
/// `Year` is an absolute four-digit year; `Offset` is text holding a number
/// of years to add to the lower bound (`"2"` means `from + 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum YearBound<'a> {
    Year(i32),
    Offset(&'a str),
}

/// A value handed to [`prepend0`](crate::prepend0): an integer, a float, or numeric text.
#[derive(Debug, Clone, Copy, PartialEq, From)]
pub enum NumberInput<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl From<i32> for NumberInput<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for NumberInput<'_> {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl NumberInput<'_> {
    /// Returns the value as a whole number.
    ///
    /// # Errors
    /// Returns `DateError::NotWholeNumber` for fractions, non-finite floats,
    /// text containing a `.`, or text that is not a number. Empty text reads as 0.
    pub fn to_whole(self) -> Result<i64> {
        let rejected = || DateError::NotWholeNumber(self.describe());
        match self {
            NumberInput::Int(value) => Ok(value),
            NumberInput::Float(value) => whole_from_float(value).ok_or_else(rejected),
            NumberInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.contains('.') {
                    return Err(rejected());
                }
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_from_float))
                    .ok_or_else(rejected)
            }
        }
    }

    fn describe(self) -> String {
        match self {
            NumberInput::Int(value) => value.to_string(),
            NumberInput::Float(value) => value.to_string(),
            NumberInput::Text(text) => text.to_owned(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_from_float(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Returns the twelve month names, abbreviated to three letters when `short` is set.
pub const fn month_names(short: bool) -> &'static [&'static str; 12] {
    if short { &MONTH_NAMES_SHORT } else { &MONTH_NAMES }
}

/// Returns the index (0-11) of a month name.
///
/// The first letter is capitalized before matching. Names of three
/// characters or fewer are looked up among the abbreviations, longer ones
/// among the full names, so `"may"` matches as an abbreviation.
pub fn month_name_to_index(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let normalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    let short = normalized.chars().count() <= SHORT_NAME_MAX_LEN;
    month_names(short).iter().position(|candidate| *candidate == normalized)
}

/// Returns the name for a month index, or `None` when the index is not 0-11.
pub fn month_index_to_name(index: usize, short: bool) -> Option<&'static str> {
    month_names(short).get(index).copied()
}

/// Returns the number of days in a month of the given year.
///
/// The month length is read off the day before the first of the following
/// month, so leap years come from the calendar itself. Numeric months past
/// December roll into the next year. Years 0-99 are read as 1900-1999, so
/// `days_total(1, 20)` is February 1920. Returns `None` for an unknown name or
/// a negative index.
pub fn days_total<'a>(month: impl Into<MonthRef<'a>>, year: i32) -> Option<u32> {
    let index = month.into().resolve()?;
    let year = if (0..100).contains(&year) { TWO_DIGIT_YEAR_BASE + year } else { year };
    month_length(index, year)
}

/// Days in the 0-based month `index` of `year`, taken literally.
pub(crate) fn month_length(index: i32, year: i32) -> Option<u32> {
    let last = crate::naive_from_fields(i64::from(year), i64::from(index) + 1, 0, 0, 0, 0)?;
    Some(last.day())
}

/// Returns `1..=days_total(month, year)` as a list; empty when the month does not resolve.
pub fn days_per_month<'a>(month: impl Into<MonthRef<'a>>, year: i32) -> Vec<u32> {
    days_total(month, year).map_or_else(Vec::new, |len| (1..=len).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_tables() {
        assert_eq!(month_names(false)[0], "January");
        assert_eq!(month_names(true)[11], "Dec");
        assert_eq!(month_names(true).len(), 12);
    }

    #[test]
    fn test_month_name_to_index() {
        assert_eq!(month_name_to_index("March"), Some(2));
        assert_eq!(month_name_to_index("march"), Some(2));
        assert_eq!(month_name_to_index("mar"), Some(2));
        assert_eq!(month_name_to_index("Sept"), None);
        assert_eq!(month_name_to_index(""), None);
        assert_eq!(month_name_to_index("Smarch"), None);
    }

    #[test]
    fn test_three_letter_full_name_uses_short_table() {
        // "May" is both a full name and an abbreviation; it resolves through the short table.
        assert_eq!(month_name_to_index("may"), Some(4));
        assert_eq!(month_name_to_index("MAY"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            let found = month_name_to_index(name).expect("full name should resolve");
            assert_eq!(found, index);
            assert_eq!(month_index_to_name(found, false), Some(*name));
        }
        let mar = month_name_to_index("Mar").expect("abbreviation should resolve");
        assert_eq!(month_index_to_name(mar, true), Some("Mar"));
    }

    #[test]
    fn test_month_index_to_name_out_of_range() {
        assert_eq!(month_index_to_name(12, false), None);
        assert_eq!(month_index_to_name(0, true), Some("Jan"));
    }

    #[test]
    fn test_days_total_leap_years() {
        assert_eq!(days_total(1, 2020), Some(29));
        assert_eq!(days_total(1, 2021), Some(28));
        assert_eq!(days_total(1, 1900), Some(28));
        assert_eq!(days_total(1, 2000), Some(29));
        assert_eq!(days_total("Feb", 2024), Some(29));
        assert_eq!(days_total("april", 2024), Some(30));
    }

    #[test]
    fn test_days_total_unresolvable() {
        assert_eq!(days_total("Smarch", 2020), None);
        assert_eq!(days_total(-1, 2020), None);
    }

    #[test]
    fn test_days_total_rolls_past_december() {
        // Month 12 is January of the following year.
        assert_eq!(days_total(12, 2020), Some(31));
        assert_eq!(days_total(13, 2020), Some(28));
    }

    #[test]
    fn test_days_total_two_digit_years() {
        // 0 is 1900, which is not a leap year; 20 is 1920, which is.
        assert_eq!(days_total(1, 0), Some(28));
        assert_eq!(days_total(1, 20), Some(29));
        assert_eq!(days_total("Feb", 99), Some(28));
        assert_eq!(days_total(1, 100), Some(28));
        assert_eq!(days_total(1, 2000), Some(29));
    }

    #[test]
    fn test_days_per_month() {
        let days = days_per_month("February", 2020);
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&29));
        assert!(days_per_month("Nope", 2020).is_empty());
    }

    #[test]
    fn test_number_input_to_whole() {
        assert_eq!(NumberInput::from(5).to_whole(), Ok(5));
        assert_eq!(NumberInput::from(5.0).to_whole(), Ok(5));
        assert_eq!(NumberInput::from(" 7 ").to_whole(), Ok(7));
        assert_eq!(NumberInput::from("").to_whole(), Ok(0));
        assert_eq!(NumberInput::from("1e3").to_whole(), Ok(1000));
        assert!(NumberInput::from(5.5).to_whole().is_err());
        assert!(NumberInput::from("5.0").to_whole().is_err());
        assert!(NumberInput::from("five").to_whole().is_err());
        assert!(NumberInput::from(f64::NAN).to_whole().is_err());
    }
}
