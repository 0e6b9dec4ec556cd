/// Smallest accepted four-digit year (inclusive)
pub const MIN_FOUR_DIGIT_YEAR: i64 = 1000;

/// Largest accepted four-digit year (inclusive)
pub const MAX_FOUR_DIGIT_YEAR: i64 = 9999;

/// Number of characters in a four-digit year group
pub const FOUR_DIGITS: usize = 4;

/// Years 0-99 passed to month-length lookups are read as 1900-1999
pub const TWO_DIGIT_YEAR_BASE: i32 = 1900;

/// Months in a year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Month names longer than this are looked up in the full-name table
pub const SHORT_NAME_MAX_LEN: usize = 3;

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Default divider between endian date fields
pub const DEFAULT_DIVIDER: &str = "/";

/// Separator between the date and time halves of an ISO 8601 string
pub const TIME_DESIGNATOR: char = 'T';

/// Full American English month names, indexed 0-11
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter month abbreviations, indexed 0-11
pub const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
