//! Localized Date/Time Display
//!
//! A thin display layer over `chrono` values: month and weekday names per
//! locale (shipped in the embedded locale data), date/time styles with
//! locale field order, and relative-time phrasing driven through the
//! translation catalog and the plural engine. Parsing and calendar
//! arithmetic stay in `chrono`; this module only renders.

use crate::locale::Locale;
use crate::translate::{I18n, TranslateOptions};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use log::warn;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Calendar display names for one locale.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarNames {
    /// Wide month names, January first.
    pub months: Vec<String>,
    /// Abbreviated month names.
    pub abbr_months: Vec<String>,
    /// Wide weekday names, Sunday first.
    pub days: Vec<String>,
    /// Abbreviated weekday names.
    pub abbr_days: Vec<String>,
    /// Ante-meridiem marker.
    pub am: String,
    /// Post-meridiem marker.
    pub pm: String,
}

#[derive(Deserialize)]
struct LocaleData {
    datetime: DatetimeData,
}

#[derive(Deserialize)]
struct DatetimeData {
    names: CalendarNames,
}

static NAMES: Lazy<HashMap<&'static str, CalendarNames>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (tag, source) in [("en", crate::tree::EN_DATA), ("ar", crate::tree::AR_DATA)] {
        match serde_json::from_str::<LocaleData>(source) {
            Ok(data) => {
                map.insert(tag, data.datetime.names);
            }
            Err(e) => warn!("failed to parse calendar names for '{tag}': {e}"),
        }
    }
    map
});

impl CalendarNames {
    /// Names for a locale's language, falling back to English.
    pub fn for_locale(locale: &Locale) -> Option<&'static CalendarNames> {
        NAMES
            .get(locale.language.as_str())
            .or_else(|| NAMES.get("en"))
    }

    fn month(&self, index0: usize) -> Option<&str> {
        self.months.get(index0).map(String::as_str)
    }

    fn abbr_month(&self, index0: usize) -> Option<&str> {
        self.abbr_months.get(index0).map(String::as_str)
    }

    fn day(&self, index0: usize) -> Option<&str> {
        self.days.get(index0).map(String::as_str)
    }
}

/// Date formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// Weekday and full date (e.g. "Monday, January 15, 2024")
    Full,
    /// Full date (e.g. "January 15, 2024")
    Long,
    /// Abbreviated date (e.g. "Jan 15, 2024")
    #[default]
    Medium,
    /// Numeric date (e.g. "1/15/24")
    Short,
}

/// Time formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStyle {
    /// Hours, minutes, seconds (e.g. "2:30:00 PM")
    #[default]
    Medium,
    /// Hours and minutes (e.g. "2:30 PM")
    Short,
}

/// Field order for numeric and abbreviated dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    MonthFirst,
    DayFirst,
    YearFirst,
}

impl DateOrder {
    fn for_locale(locale: &Locale) -> Self {
        match locale.language.as_str() {
            "en" if locale.region.as_deref() != Some("GB") => Self::MonthFirst,
            "ja" | "zh" | "ko" | "hu" => Self::YearFirst,
            _ => Self::DayFirst,
        }
    }
}

/// List separator between a weekday name and the rest of a full date.
fn weekday_separator(locale: &Locale) -> &'static str {
    if locale.language == "ar" { "، " } else { ", " }
}

/// Format a date for a locale.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use phrasebook::{format_date, DateStyle, Locale};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(format_date(date, DateStyle::Medium, &Locale::en_us()), "Jan 15, 2024");
/// assert_eq!(format_date(date, DateStyle::Medium, &Locale::ar()), "15 يناير 2024");
/// ```
pub fn format_date(date: NaiveDate, style: DateStyle, locale: &Locale) -> String {
    let order = DateOrder::for_locale(locale);
    let year = date.year();
    let month = date.month();
    let day = date.day();

    let names = match CalendarNames::for_locale(locale) {
        Some(names) => names,
        // No name data at all: ISO is the only safe rendering.
        None => return date.to_string(),
    };

    let month_idx = date.month0() as usize;
    let weekday_idx = date.weekday().num_days_from_sunday() as usize;

    match style {
        DateStyle::Full => {
            let weekday = names.day(weekday_idx).unwrap_or_default();
            let sep = weekday_separator(locale);
            match order {
                DateOrder::MonthFirst => {
                    let month = names.month(month_idx).unwrap_or_default();
                    format!("{weekday}{sep}{month} {day}, {year}")
                }
                _ => {
                    let month = names.month(month_idx).unwrap_or_default();
                    format!("{weekday}{sep}{day} {month} {year}")
                }
            }
        }
        DateStyle::Long => {
            let month = names.month(month_idx).unwrap_or_default();
            match order {
                DateOrder::MonthFirst => format!("{month} {day}, {year}"),
                _ => format!("{day} {month} {year}"),
            }
        }
        DateStyle::Medium => {
            let month_name = names.abbr_month(month_idx).unwrap_or_default();
            match order {
                DateOrder::MonthFirst => format!("{month_name} {day}, {year}"),
                DateOrder::DayFirst => format!("{day} {month_name} {year}"),
                DateOrder::YearFirst => format!("{year}/{month}/{day}"),
            }
        }
        DateStyle::Short => match order {
            DateOrder::MonthFirst => format!("{month}/{day}/{}", year % 100),
            DateOrder::DayFirst => format!("{day}/{month}/{}", year % 100),
            DateOrder::YearFirst => format!("{}/{month}/{day}", year % 100),
        },
    }
}

/// Format a time for a locale. English and Arabic render 12-hour clocks
/// with the locale's meridiem markers; other locales render 24-hour.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use phrasebook::{format_time, Locale, TimeStyle};
///
/// let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
/// assert_eq!(format_time(time, TimeStyle::Short, &Locale::en()), "2:30 PM");
/// assert_eq!(format_time(time, TimeStyle::Short, &Locale::de()), "14:30");
/// ```
pub fn format_time(time: NaiveTime, style: TimeStyle, locale: &Locale) -> String {
    let twelve_hour = matches!(locale.language.as_str(), "en" | "ar");
    let minute = time.minute();
    let second = time.second();

    if twelve_hour {
        let (is_pm, hour) = time.hour12();
        let meridiem = match (CalendarNames::for_locale(locale), is_pm) {
            (Some(names), true) => names.pm.as_str(),
            (Some(names), false) => names.am.as_str(),
            (None, true) => "PM",
            (None, false) => "AM",
        };
        match style {
            TimeStyle::Medium => format!("{hour}:{minute:02}:{second:02} {meridiem}"),
            TimeStyle::Short => format!("{hour}:{minute:02} {meridiem}"),
        }
    } else {
        let hour = time.hour();
        match style {
            TimeStyle::Medium => format!("{hour:02}:{minute:02}:{second:02}"),
            TimeStyle::Short => format!("{hour:02}:{minute:02}"),
        }
    }
}

/// Format a date and time together.
pub fn format_datetime(
    dt: NaiveDateTime,
    date_style: DateStyle,
    time_style: TimeStyle,
    locale: &Locale,
) -> String {
    format!(
        "{} {}",
        format_date(dt.date(), date_style, locale),
        format_time(dt.time(), time_style, locale)
    )
}

// Seconds per unit, used to pick the largest sensible unit.
const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

impl I18n {
    /// Phrase the distance from `instant` to `reference` in words:
    /// "5 minutes ago" when `instant` precedes `reference`, "in 5 minutes"
    /// otherwise, "just now" within a few seconds.
    ///
    /// Wording comes from the `datetime.distance.*` catalog entries, so
    /// pluralization follows the current locale's rule.
    pub fn relative_time(&self, instant: DateTime<Utc>, reference: DateTime<Utc>) -> String {
        let delta = reference.signed_duration_since(instant);
        let past = delta > TimeDelta::zero();
        let secs = delta.num_seconds().abs();

        if secs < 5 {
            return self.t("datetime.distance.now");
        }

        let (unit, count) = if secs < MINUTE {
            ("seconds", secs)
        } else if secs < HOUR {
            ("minutes", secs / MINUTE)
        } else if secs < DAY {
            ("hours", secs / HOUR)
        } else if secs < MONTH {
            ("days", secs / DAY)
        } else if secs < YEAR {
            ("months", secs / MONTH)
        } else {
            ("years", secs / YEAR)
        };

        let distance = self.translate(
            &format!("datetime.distance.{unit}"),
            TranslateOptions::new().count(count as f64),
        );
        let wrapper = if past {
            "datetime.distance.past"
        } else {
            "datetime.distance.future"
        };
        self.translate(wrapper, TranslateOptions::new().arg("distance", distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> NaiveDate {
        // A Monday.
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn medium_date_per_locale() {
        assert_eq!(format_date(date(), DateStyle::Medium, &Locale::en_us()), "Jan 15, 2024");
        assert_eq!(format_date(date(), DateStyle::Medium, &Locale::ar()), "15 يناير 2024");
        assert_eq!(format_date(date(), DateStyle::Medium, &Locale::ja()), "2024/1/15");
    }

    #[test]
    fn full_date_includes_weekday() {
        let formatted = format_date(date(), DateStyle::Full, &Locale::en_us());
        assert_eq!(formatted, "Monday, January 15, 2024");

        let formatted = format_date(date(), DateStyle::Full, &Locale::ar());
        assert_eq!(formatted, "الإثنين، 15 يناير 2024");
    }

    #[test]
    fn long_date_drops_weekday() {
        assert_eq!(format_date(date(), DateStyle::Long, &Locale::en_us()), "January 15, 2024");
    }

    #[test]
    fn short_date_field_order() {
        assert_eq!(format_date(date(), DateStyle::Short, &Locale::en_us()), "1/15/24");
        assert_eq!(format_date(date(), DateStyle::Short, &Locale::parse("en-GB").unwrap()), "15/1/24");
        assert_eq!(format_date(date(), DateStyle::Short, &Locale::ja()), "24/1/15");
    }

    #[test]
    fn twelve_hour_clock_with_meridiem() {
        let afternoon = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(format_time(afternoon, TimeStyle::Short, &Locale::en()), "2:30 PM");
        assert_eq!(format_time(afternoon, TimeStyle::Short, &Locale::ar()), "2:30 م");
        assert_eq!(format_time(afternoon, TimeStyle::Short, &Locale::de()), "14:30");

        let midnight = NaiveTime::from_hms_opt(0, 5, 9).unwrap();
        assert_eq!(format_time(midnight, TimeStyle::Medium, &Locale::en()), "12:05:09 AM");
    }

    #[test]
    fn datetime_combines_date_and_time() {
        let dt = date().and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(
            format_datetime(dt, DateStyle::Medium, TimeStyle::Short, &Locale::en_us()),
            "Jan 15, 2024 9:00 AM"
        );
    }

    #[test]
    fn relative_time_english() {
        let i18n = I18n::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        assert_eq!(i18n.relative_time(now - TimeDelta::minutes(3), now), "3 minutes ago");
        assert_eq!(i18n.relative_time(now - TimeDelta::minutes(1), now), "1 minute ago");
        assert_eq!(i18n.relative_time(now + TimeDelta::hours(2), now), "in 2 hours");
        assert_eq!(i18n.relative_time(now - TimeDelta::days(400), now), "1 year ago");
        assert_eq!(i18n.relative_time(now, now), "just now");
    }

    #[test]
    fn relative_time_arabic_plurals() {
        let i18n = I18n::new().with_locale(Locale::ar());
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        assert_eq!(i18n.relative_time(now - TimeDelta::minutes(1), now), "منذ دقيقة واحدة");
        assert_eq!(i18n.relative_time(now - TimeDelta::minutes(2), now), "منذ دقيقتين");
        assert_eq!(i18n.relative_time(now - TimeDelta::minutes(3), now), "منذ 3 دقائق");
        assert_eq!(i18n.relative_time(now + TimeDelta::minutes(11), now), "بعد 11 دقيقة");
    }

    #[test]
    fn calendar_names_fall_back_to_english() {
        let names = CalendarNames::for_locale(&Locale::de()).unwrap();
        assert_eq!(names.months[0], "January");

        let names = CalendarNames::for_locale(&Locale::ar()).unwrap();
        assert_eq!(names.months[0], "يناير");
    }
}
