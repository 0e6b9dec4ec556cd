mod consts;
mod error;
mod format;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use error::{DateError, Result};
pub use format::{
    Endian, EndianOptions, from_big_endian, from_little_endian, from_middle_endian, prepend0,
    to_big_endian, to_big_endian_with, to_iso8601, to_iso8601_with, to_little_endian,
    to_little_endian_with, to_middle_endian, to_middle_endian_with, to_minutes, to_minutes_with,
};
pub use range::{months_from, years};
pub use types::{
    MonthRef, NumberInput, YearBound, days_per_month, days_total, month_index_to_name,
    month_name_to_index, month_names,
};

use crate::consts::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A moment on the wall clock of a time zone, the host's local zone by default.
///
/// Months are 0-based (January is 0) and days 1-based, as in calendar widgets.
/// The UTC offset is whatever the zone says for that instant, so it moves with
/// daylight saving time.
#[derive(Debug)]
pub struct LocalDateTime<Tz: TimeZone = Local>(DateTime<Tz>);

impl LocalDateTime<Local> {
    /// Midnight of a local calendar day.
    ///
    /// Fields out of their usual range roll over: month 12 is January of the
    /// next year, day 0 is the last day of the previous month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn ymd(year: i32, month: i32, day: i32) -> Result<Self> {
        Self::ymd_in(&Local, year, month, day)
    }

    /// A local date and time, with the same rollover rules as [`LocalDateTime::ymd`].
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn ymd_hms(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Result<Self> {
        Self::ymd_hms_in(&Local, year, month, day, hour, minute, second)
    }
}

impl<Tz: TimeZone> LocalDateTime<Tz> {
    /// Midnight of a calendar day in `tz`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn ymd_in(tz: &Tz, year: i32, month: i32, day: i32) -> Result<Self> {
        Self::ymd_hms_in(tz, year, month, day, 0, 0, 0)
    }

    /// A date and time in `tz`.
    ///
    /// A wall-clock time repeated by a backward transition resolves to the
    /// earlier instant; one skipped by a forward transition is read with the
    /// offset in force before the jump, landing after it.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn ymd_hms_in(
        tz: &Tz,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self> {
        Self::compose(
            tz,
            [year, month, day, hour, minute, second].map(i64::from),
            "ymd_hms",
        )
    }

    pub(crate) fn compose(tz: &Tz, fields: [i64; 6], operation: &'static str) -> Result<Self> {
        let [year, month, day, hour, minute, second] = fields;
        let naive = naive_from_fields(year, month, day, hour, minute, second).ok_or_else(|| {
            tracing::debug!(operation, year, month, day, "calendar fields out of range");
            DateError::OutOfRange { operation }
        })?;
        Ok(Self(resolve_local(tz, naive)))
    }

    /// Year, e.g. 2020
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 0-11
    pub fn month(&self) -> u32 {
        self.0.month0()
    }

    /// Day of the month, 1-31
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour of the day, 0-23
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of the hour, 0-59
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second of the minute, 0-59
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Minutes east of UTC at this instant (negative west of Greenwich).
    pub fn utc_offset_minutes(&self) -> i32 {
        self.0.offset().fix().local_minus_utc() / 60
    }

    /// Returns the time zone this value is read in
    pub fn timezone(&self) -> Tz {
        self.0.timezone()
    }

    /// Returns the underlying chrono value
    pub const fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// Unwraps into the underlying chrono value
    pub fn into_inner(self) -> DateTime<Tz> {
        self.0
    }

    /// Text that reads back as the same instant through `FromStr`.
    ///
    /// Unlike the ISO 8601 [`Display`](fmt::Display) form, this keeps
    /// fractional seconds and any seconds in the UTC offset (`±hh:mm:ss`).
    /// Years are padded to four digits and signed outside 0-9999.
    pub fn to_lossless_string(&self) -> String {
        format!(
            "{}{}",
            self.0.naive_local().format(LOSSLESS_LOCAL_FORMAT),
            offset_text(self.0.offset().fix().local_minus_utc())
        )
    }

    /// Midnight of the same calendar day.
    fn start_of_day(&self) -> Self {
        Self(midnight(&self.0.timezone(), self.0.date_naive()))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for LocalDateTime<Tz> {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value)
    }
}

impl<Tz: TimeZone> Clone for LocalDateTime<Tz> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Tz: TimeZone> Copy for LocalDateTime<Tz> where Tz::Offset: Copy {}

impl<Tz: TimeZone> PartialEq for LocalDateTime<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<Tz: TimeZone> Eq for LocalDateTime<Tz> {}

impl<Tz: TimeZone> PartialOrd for LocalDateTime<Tz> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tz: TimeZone> Ord for LocalDateTime<Tz> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<Tz: TimeZone> Hash for LocalDateTime<Tz> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<Tz: TimeZone> fmt::Display for LocalDateTime<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_iso8601(self))
    }
}

impl FromStr for LocalDateTime<Local> {
    type Err = DateError;

    /// Reads `YYYY-MM-DDThh:mm:ss[.fff]` followed by `Z`, `±hh:mm` or
    /// `±hh:mm:ss`, the form written by [`LocalDateTime::to_lossless_string`].
    /// RFC 3339 timestamps and the [`Display`](fmt::Display) output of
    /// four-digit years are accepted too.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DateError::InvalidFormat(s.to_owned());
        let text = s.trim();
        let time_start = text.find(['T', 't']).ok_or_else(invalid)?;
        let split = if text.ends_with(['Z', 'z']) {
            text.len() - 1
        } else {
            text.rfind(['+', '-']).filter(|&at| at > time_start).ok_or_else(invalid)?
        };
        let naive = NaiveDateTime::parse_from_str(&text[..split].replacen('t', "T", 1), LOSSLESS_LOCAL_FORMAT)
            .map_err(|err| DateError::InvalidFormat(format!("{s}: {err}")))?;
        let offset = parse_offset(&text[split..])
            .and_then(FixedOffset::east_opt)
            .ok_or_else(invalid)?;
        let instant = offset.from_local_datetime(&naive).single().ok_or_else(invalid)?;
        Ok(Self(instant.with_timezone(&Local)))
    }
}

impl<Tz: TimeZone> serde::Serialize for LocalDateTime<Tz> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_lossless_string())
    }
}

impl<'de> serde::Deserialize<'de> for LocalDateTime<Local> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const LOSSLESS_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `±hh:mm`, with `:ss` appended when the offset has seconds.
fn offset_text(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (hours, minutes, rest) = (abs / 3600, abs / 60 % 60, abs % 60);
    if rest == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{rest:02}")
    }
}

/// Seconds east of UTC for `Z`, `±hh:mm` or `±hh:mm:ss`.
fn parse_offset(text: &str) -> Option<i32> {
    if text.eq_ignore_ascii_case("z") {
        return Some(0);
    }
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let parts: Vec<&str> = text[1..].split(':').collect();
    if !(2..=3).contains(&parts.len()) || parts.iter().any(|p| p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let mut seconds = 0;
    for (part, unit) in parts.iter().zip([3600, 60, 1]) {
        seconds += part.parse::<i32>().ok()? * unit;
    }
    Some(sign * seconds)
}

// --- field composition ---

/// Builds a wall-clock time from possibly out-of-range fields, rolling
/// overflow into the next larger unit. `month` is 0-based.
pub(crate) fn naive_from_fields(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Option<NaiveDateTime> {
    let year = year.checked_add(month.div_euclid(MONTHS_PER_YEAR))?;
    let month = u32::try_from(month.rem_euclid(MONTHS_PER_YEAR)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    let date = first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)?;
    let seconds = hour
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(minute.checked_mul(SECONDS_PER_MINUTE)?)?
        .checked_add(second)?;
    date.and_time(NaiveTime::default())
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // Skipped wall-clock time: take the offset from a day earlier.
            let before = naive.checked_sub_signed(TimeDelta::days(1)).unwrap_or(naive);
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            tz.from_utc_datetime(&naive.checked_sub_signed(shift).unwrap_or(naive))
        }
    }
}

fn midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::default()))
}

// --- clock ---

/// The current instant in the local zone.
pub fn now() -> LocalDateTime {
    LocalDateTime(Local::now())
}

/// Midnight of the current local day.
pub fn today() -> LocalDateTime {
    now().start_of_day()
}

/// Midnight of the next local day.
pub fn tomorrow() -> LocalDateTime {
    LocalDateTime(midnight(&Local, Local::now().date_naive() + Days::new(1)))
}

/// Midnight of the previous local day.
pub fn yesterday() -> LocalDateTime {
    LocalDateTime(midnight(&Local, Local::now().date_naive() - Days::new(1)))
}

/// The current local year.
pub fn current_year() -> i32 {
    Local::now().year()
}

// --- predicates ---

/// Whether `date` falls on the current calendar day of its own time zone.
pub fn today_is<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> bool {
    let today = Utc::now().with_timezone(&date.0.timezone());
    today.date_naive() == date.0.date_naive()
}

/// Whether `date` lies in `[start, end)`, or `[start, end]` when `include_end` is set.
pub fn date_is_between<Tz: TimeZone>(
    date: &LocalDateTime<Tz>,
    start: &LocalDateTime<Tz>,
    end: &LocalDateTime<Tz>,
    include_end: bool,
) -> bool {
    date >= start && if include_end { date <= end } else { date < end }
}

/// Whether `date` is strictly later than `other`, comparing full instants.
pub fn date_is_after<Tz: TimeZone>(date: &LocalDateTime<Tz>, other: &LocalDateTime<Tz>) -> bool {
    date > other
}

/// Whether `date` is strictly earlier than `other`, comparing full instants.
pub fn date_is_before<Tz: TimeZone>(date: &LocalDateTime<Tz>, other: &LocalDateTime<Tz>) -> bool {
    date < other
}

// --- arithmetic ---

/// Midnight of the day `n` days after `date` (before it when `n` is negative).
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn days_from_date<Tz: TimeZone>(date: &LocalDateTime<Tz>, n: i64) -> Result<LocalDateTime<Tz>> {
    let day = i64::from(date.day())
        .checked_add(n)
        .ok_or(DateError::OutOfRange { operation: "days_from_date" })?;
    LocalDateTime::compose(
        &date.timezone(),
        [i64::from(date.year()), i64::from(date.month()), day, 0, 0, 0],
        "days_from_date",
    )
}

/// The first day of the month before the current one.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn prev_month() -> Result<LocalDateTime> {
    prev_month_of(&today())
}

/// The first day of the month after the current one.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn next_month() -> Result<LocalDateTime> {
    next_month_of(&today())
}

/// The first day of the month before `date`'s month.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn prev_month_of<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> Result<LocalDateTime<Tz>> {
    LocalDateTime::compose(
        &date.timezone(),
        [i64::from(date.year()), i64::from(date.month()) - 1, 1, 0, 0, 0],
        "prev_month",
    )
}

/// The first day of the month after `date`'s month.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn next_month_of<Tz: TimeZone>(date: &LocalDateTime<Tz>) -> Result<LocalDateTime<Tz>> {
    // One past the last day of this month.
    let month = i32::try_from(date.month()).map_err(|_| DateError::OutOfRange { operation: "next_month" })?;
    let last = types::month_length(month, date.year()).ok_or(DateError::OutOfRange { operation: "next_month" })?;
    LocalDateTime::compose(
        &date.timezone(),
        [i64::from(date.year()), i64::from(month), i64::from(last) + 1, 0, 0, 0],
        "next_month",
    )
}

/// Whole days between the calendar days of `start` and `end`.
///
/// Both are moved to midnight first, the elapsed time is floored to whole
/// days, and one day is added when `start`'s UTC offset is west of `end`'s.
/// That last step compensates the hour lost to a spring-forward transition
/// between the two dates; it is an approximation, not a general solver for
/// offset changes.
pub fn day_count<Tz: TimeZone>(start: &LocalDateTime<Tz>, end: &LocalDateTime<Tz>) -> i64 {
    let start = start.start_of_day();
    let end = end.start_of_day();
    let elapsed = end.0.timestamp() - start.0.timestamp();
    let days = elapsed.div_euclid(SECONDS_PER_DAY);
    days + i64::from(start.utc_offset_minutes() < end.utc_offset_minutes())
}
