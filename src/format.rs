//! Text conversions: ISO 8601, endian date strings, zero padding and `MM:SS` clocks.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIVIDER, FOUR_DIGITS, SECONDS_PER_MINUTE, TIME_DESIGNATOR};
use crate::error::{DateError, Result};
use crate::prelude::*;
use crate::types::NumberInput;
use crate::LocalDateTime;

/// Order of the day, month and year fields in a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endian {
    /// `DD/MM/YYYY`
    #[display(fmt = "little-endian")]
    Little,
    /// `MM/DD/YYYY`
    #[display(fmt = "middle-endian")]
    Middle,
    /// `YYYY/MM/DD`
    #[display(fmt = "big-endian")]
    Big,
}

impl Endian {
    /// Field slots of (day, month, year).
    const fn slots(self) -> (usize, usize, usize) {
        match self {
            Endian::Little => (0, 1, 2),
            Endian::Middle => (1, 0, 2),
            Endian::Big => (2, 1, 0),
        }
    }

    const fn parser_name(self) -> &'static str {
        match self {
            Endian::Little => "from_little_endian",
            Endian::Middle => "from_middle_endian",
            Endian::Big => "from_big_endian",
        }
    }

    /// Formats `date` in this field order.
    ///
    /// Day and month are zero-padded to two digits when `options.prepend0`
    /// is set; the year is written as is.
    pub fn format<Tz: TimeZone>(self, date: &LocalDateTime<Tz>, options: &EndianOptions) -> String {
        let field = |value: u32| {
            if options.prepend0 { pad_two(i64::from(value)) } else { value.to_string() }
        };
        let (day, month, year) = self.slots();
        let mut fields = [String::new(), String::new(), String::new()];
        fields[day] = field(date.day());
        fields[month] = field(date.month() + 1);
        fields[year] = date.year().to_string();
        fields.join(options.divider.as_str())
    }

    /// Reads a local date written in this field order.
    ///
    /// See [`Endian::parse_in`].
    ///
    /// # Errors
    /// Same as [`Endian::parse_in`].
    pub fn parse(self, text: &str) -> Result<LocalDateTime> {
        self.parse_in(&Local, text)
    }

    /// Reads a date written in this field order, at midnight in `tz`.
    ///
    /// Every run of ASCII digits is a field and anything else separates
    /// fields, so the divider does not matter. Groups after the third are
    /// ignored. Month and day overflow roll over as in [`LocalDateTime::ymd_in`].
    ///
    /// # Errors
    /// - `DateError::MissingComponent` when fewer than three digit groups are present.
    /// - `DateError::FourDigitYear` when the year group is not exactly four digits.
    /// - `DateError::OutOfRange` when a group is too large to represent.
    pub fn parse_in<Tz: TimeZone>(self, tz: &Tz, text: &str) -> Result<LocalDateTime<Tz>> {
        let groups: Vec<&str> = text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|group| !group.is_empty())
            .take(3)
            .collect();
        if groups.len() < 3 {
            tracing::debug!(format = %self, found = groups.len(), "missing date component");
            return Err(DateError::MissingComponent {
                format: self,
                found: groups.len(),
            });
        }

        let (day, month, year) = self.slots();
        if groups[year].len() != FOUR_DIGITS {
            tracing::debug!(format = %self, year = groups[year], "rejected year group");
            return Err(DateError::FourDigitYear {
                operation: self.parser_name(),
                year: groups[year].to_owned(),
            });
        }

        let number = |group: &str| {
            group.parse::<i64>().map_err(|_| DateError::OutOfRange {
                operation: self.parser_name(),
            })
        };
        let fields = [number(groups[year])?, number(groups[month])? - 1, number(groups[day])?, 0, 0, 0];
        LocalDateTime::compose(tz, fields, self.parser_name())
    }
}

/// Formatting options for the endian date strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EndianOptions {
    /// Text placed between the fields
    pub divider: String,
    /// Zero-pad day and month to two digits
    pub prepend0: bool,
}

impl Default for EndianOptions {
    fn default() -> Self {
        Self {
            divider: DEFAULT_DIVIDER.to_owned(),
            prepend0: true,
        }
    }
}

impl EndianOptions {
    /// Replaces the text placed between fields.
    #[must_use]
    pub fn with_divider(mut self, divider: impl Into<String>) -> Self {
        self.divider = divider.into();
        self
    }

    /// Sets whether day and month are zero-padded to two digits.
    #[must_use]
    pub const fn with_prepend0(mut self, prepend0: bool) -> Self {
        self.prepend0 = prepend0;
        self
    }
}

/// `DD/MM/YYYY` with the default options.
pub fn to_little_endian<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> String {
    Endian::Little.format(date, &EndianOptions::default())
}

/// `DD/MM/YYYY` using the divider and padding from `options`.
pub fn to_little_endian_with<Tz: TimeZone>(date: &LocalDateTime<Tz>, options: &EndianOptions) -> String {
    Endian::Little.format(date, options)
}

/// `MM/DD/YYYY` with the default options.
pub fn to_middle_endian<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> String {
    Endian::Middle.format(date, &EndianOptions::default())
}

/// `MM/DD/YYYY` using the divider and padding from `options`.
pub fn to_middle_endian_with<Tz: TimeZone>(date: &LocalDateTime<Tz>, options: &EndianOptions) -> String {
    Endian::Middle.format(date, options)
}

/// `YYYY/MM/DD` with the default options.
pub fn to_big_endian<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> String {
    Endian::Big.format(date, &EndianOptions::default())
}

/// `YYYY/MM/DD` using the divider and padding from `options`.
pub fn to_big_endian_with<Tz: TimeZone>(date: &LocalDateTime<Tz>, options: &EndianOptions) -> String {
    Endian::Big.format(date, options)
}

/// Reads a `DD/MM/YYYY` string as local midnight.
///
/// # Errors
/// See [`Endian::parse_in`].
pub fn from_little_endian(text: &str) -> Result<LocalDateTime> {
    Endian::Little.parse(text)
}

/// Reads a `MM/DD/YYYY` string as local midnight.
///
/// # Errors
/// See [`Endian::parse_in`].
pub fn from_middle_endian(text: &str) -> Result<LocalDateTime> {
    Endian::Middle.parse(text)
}

/// Reads a `YYYY/MM/DD` string as local midnight.
///
/// # Errors
/// See [`Endian::parse_in`].
pub fn from_big_endian(text: &str) -> Result<LocalDateTime> {
    Endian::Big.parse(text)
}

/// `YYYY-MM-DDThh:mm:ss±hh:mm` for the wall clock and offset of `date`.
pub fn to_iso8601<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> String {
    to_iso8601_with(date, true)
}

/// Like [`to_iso8601`], joining date and time with a space instead of `T`
/// when `time_designator` is false.
///
/// Every field but the year is padded to two digits. A year is left as is,
/// except that a single-digit negative year gains a zero (`-05`).
pub fn to_iso8601_with<Tz: TimeZone>(date: &LocalDateTime<Tz>, time_designator: bool) -> String {
    let separator = if time_designator { TIME_DESIGNATOR } else { ' ' };
    format!(
        "{}-{:02}-{:02}{separator}{:02}:{:02}:{:02}{}",
        iso_year(date.year()),
        date.month() + 1,
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        zone_designator(date.utc_offset_minutes()),
    )
}

fn iso_year(year: i32) -> String {
    if (-9..=-1).contains(&year) { format!("-0{}", -year) } else { year.to_string() }
}

fn zone_designator(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let minutes = offset_minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Returns a whole number as text, with a leading zero when it is 0-9.
///
/// Values of 10 and above, and negative values, are returned unpadded.
///
/// # Errors
/// Returns `DateError::NotWholeNumber` for fractional or non-numeric input.
pub fn prepend0<'a>(val: impl Into<NumberInput<'a>>) -> Result<String> {
    let val = val.into();
    let whole = val.to_whole().inspect_err(|_| {
        tracing::debug!(?val, "prepend0 rejected input");
    })?;
    Ok(pad_two(whole))
}

fn pad_two(value: i64) -> String {
    if (0..10).contains(&value) { format!("0{value}") } else { value.to_string() }
}

/// `MM:SS` for a number of seconds, minutes zero-padded.
pub fn to_minutes(total_seconds: i64) -> String {
    to_minutes_with(total_seconds, true)
}

/// `MM:SS` for a number of seconds.
///
/// Both fields truncate toward zero and keep the sign of `total_seconds`, so
/// `-65` gives `-1:-5`. A field is padded with a leading `0` only when its
/// text is shorter than two characters: always for seconds, for minutes only
/// when `prepend0` is set. Minutes may run past 59.
pub fn to_minutes_with(total_seconds: i64, prepend0: bool) -> String {
    let minutes = total_seconds / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    let minutes = if prepend0 { pad_text(minutes) } else { minutes.to_string() };
    format!("{minutes}:{}", pad_text(seconds))
}

fn pad_text(value: i64) -> String {
    let text = value.to_string();
    if text.len() < 2 { format!("0{text}") } else { text }
}
