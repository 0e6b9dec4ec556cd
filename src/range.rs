use chrono::TimeZone;

use crate::consts::{MAX_FOUR_DIGIT_YEAR, MIN_FOUR_DIGIT_YEAR, MONTHS_PER_YEAR};
use crate::error::{DateError, Result};
use crate::types::YearBound;
use crate::LocalDateTime;

const YEARS: &str = "years";

/// Returns the years from `from` through `to`, ascending.
///
/// `to` is either an absolute four-digit year or text holding a number of
/// years to add to `from`, so `years(2012, 2014)` and `years(2012, "2")` both
/// give `[2012, 2013, 2014]`. An upper bound below `from` gives `[from]`.
/// Offset text is read like an integer prefix (leading whitespace, optional
/// sign, digits); text with no such prefix gives an empty list.
///
/// # Errors
/// - `DateError::FourDigitYear` if `from`, or an absolute `to`, is not 1000-9999.
/// - `DateError::OutOfRange` if the offset pushes the range past `i32`.
pub fn years<'a>(from: i32, to: impl Into<YearBound<'a>>) -> Result<Vec<i32>> {
    let from = i64::from(from);
    check_four_digit(from)?;

    let to = match to.into() {
        YearBound::Year(year) => {
            let year = i64::from(year);
            check_four_digit(year)?;
            year
        }
        YearBound::Offset(text) => match integer_prefix(text)? {
            Some(offset) => from
                .checked_add(offset)
                .ok_or(DateError::OutOfRange { operation: YEARS })?,
            None => {
                tracing::debug!(offset = text, "year offset is not a number");
                return Ok(Vec::new());
            }
        },
    };

    let last = i32::try_from(from.max(to)).map_err(|_| DateError::OutOfRange { operation: YEARS })?;
    let first = i32::try_from(from).map_err(|_| DateError::OutOfRange { operation: YEARS })?;
    let years: Vec<i32> = (first..=last).collect();
    tracing::trace!(from, to, len = years.len(), "generated years");
    Ok(years)
}

fn check_four_digit(year: i64) -> Result<()> {
    if (MIN_FOUR_DIGIT_YEAR..=MAX_FOUR_DIGIT_YEAR).contains(&year) {
        return Ok(());
    }
    tracing::debug!(year, "rejected non four-digit year");
    Err(DateError::FourDigitYear {
        operation: YEARS,
        year: year.to_string(),
    })
}

/// Reads the leading integer of `text`: optional whitespace, an optional
/// sign, then decimal digits. Anything after the digits is ignored.
fn integer_prefix(text: &str) -> Result<Option<i64>> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Ok(None);
    }
    let magnitude: i64 = rest[..digits_len]
        .parse()
        .map_err(|_| DateError::OutOfRange { operation: YEARS })?;
    Ok(Some(if negative { -magnitude } else { magnitude }))
}

/// Returns the first day of each month from `start` to `end`.
///
/// The list runs from the month after `start` (or `start`'s own month when
/// `include_start` is set) through `end`'s month, each entry at midnight in
/// `start`'s time zone. It is empty when `end` precedes `start`.
///
/// # Errors
/// Returns `DateError::OutOfRange` if a month cannot be represented.
pub fn months_from<Tz: TimeZone>(
    start: &LocalDateTime<Tz>,
    end: &LocalDateTime<Tz>,
    include_start: bool,
) -> Result<Vec<LocalDateTime<Tz>>> {
    let span = (i64::from(end.year()) - i64::from(start.year())) * MONTHS_PER_YEAR
        + (i64::from(end.month()) - i64::from(start.month()));
    let tz = start.timezone();
    let (year, month) = (i64::from(start.year()), i64::from(start.month()));

    let months = (i64::from(!include_start)..=span)
        .map(|i| LocalDateTime::compose(&tz, [year, month + i, 1, 0, 0, 0], "months_from"))
        .collect::<Result<Vec<_>>>()?;
    tracing::trace!(span, len = months.len(), "generated months");
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn local(year: i32, month: i32, day: i32) -> LocalDateTime {
        LocalDateTime::ymd(year, month, day).expect("valid local date")
    }

    #[test]
    fn test_years_absolute() {
        assert_eq!(years(2012, 2014).expect("four digit years"), vec![2012, 2013, 2014]);
        assert_eq!(years(2012, 2012).expect("four digit years"), vec![2012]);
    }

    #[test]
    fn test_years_offset() {
        assert_eq!(years(2012, "2").expect("offset"), vec![2012, 2013, 2014]);
        assert_eq!(years(2012, " +1 years").expect("offset"), vec![2012, 2013]);
        assert_eq!(years(2012, "0").expect("offset"), vec![2012]);
    }

    #[test]
    fn test_years_clamps_backwards_range() {
        assert_eq!(years(2012, 2010).expect("four digit years"), vec![2012]);
        assert_eq!(years(2012, "-5").expect("offset"), vec![2012]);
    }

    #[test]
    fn test_years_non_numeric_offset_is_empty() {
        assert!(years(2012, "soon").expect("no error").is_empty());
        assert!(years(2012, "").expect("no error").is_empty());
    }

    #[test]
    fn test_years_rejects_short_years() {
        let err = years(999, 2014).expect_err("three digit from");
        assert_eq!(
            err,
            DateError::FourDigitYear {
                operation: "years",
                year: "999".to_owned(),
            }
        );
        assert!(years(2012, 10_000).is_err());
        assert!(years(12, "2").is_err());
    }

    #[test]
    fn test_years_offset_overflow() {
        let err = years(2012, "99999999999999999999").expect_err("offset too large");
        assert_eq!(err, DateError::OutOfRange { operation: "years" });
        assert!(years(2012, "9223372036854775807").is_err());
    }

    #[test]
    fn test_months_from_excludes_start() {
        let months = months_from(&local(2020, 0, 1), &local(2020, 2, 1), false).expect("in range");
        assert_eq!(months, vec![local(2020, 1, 1), local(2020, 2, 1)]);
    }

    #[test]
    fn test_months_from_includes_start() {
        let months = months_from(&local(2020, 0, 15), &local(2020, 2, 3), true).expect("in range");
        assert_eq!(months, vec![local(2020, 0, 1), local(2020, 1, 1), local(2020, 2, 1)]);
    }

    #[test]
    fn test_months_from_across_years() {
        let months = months_from(&local(2019, 10, 20), &local(2021, 0, 1), false).expect("in range");
        assert_eq!(months.len(), 14);
        assert_eq!(months.first(), Some(&local(2019, 11, 1)));
        assert_eq!(months.last(), Some(&local(2021, 0, 1)));
    }

    #[test]
    fn test_months_from_same_or_reversed() {
        let date = local(2020, 5, 1);
        assert!(months_from(&date, &date, false).expect("in range").is_empty());
        assert_eq!(months_from(&date, &date, true).expect("in range"), vec![date]);
        assert!(months_from(&local(2020, 5, 1), &local(2020, 1, 1), true).expect("in range").is_empty());
    }

    #[test]
    fn test_months_from_keeps_zone() {
        let start = LocalDateTime::ymd_in(&New_York, 2020, 1, 1).expect("valid date");
        let end = LocalDateTime::ymd_in(&New_York, 2020, 3, 1).expect("valid date");
        let months = months_from(&start, &end, false).expect("in range");
        let offsets: Vec<i32> = months.iter().map(LocalDateTime::utc_offset_minutes).collect();
        // March 1 is still standard time; April 1 is daylight time.
        assert_eq!(offsets, vec![-300, -240]);
        assert!(months.iter().all(|m| m.hour() == 0 && m.day() == 1));
    }
}
