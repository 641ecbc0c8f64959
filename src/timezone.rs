//! IANA Timezone Glue
//!
//! Zone data comes entirely from `chrono-tz`'s static tables; this module
//! only resolves names, queries offsets, converts instants into zone-local
//! wall time, and looks up localized zone display names from the catalog
//! (`timezones.<IANA name>` entries).

use crate::datetime::{DateStyle, TimeStyle, format_datetime};
use crate::locale::Locale;
use crate::translate::{I18n, TranslateOptions};
use crate::{I18nError, Result};
use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve an IANA zone name (e.g. `"Asia/Riyadh"`).
pub fn zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| I18nError::UnknownTimeZone(name.to_string()))
}

/// Convert a UTC instant into zone-local time.
pub fn to_zone(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// The zone's UTC offset in seconds at a given instant (DST-aware).
pub fn utc_offset_seconds(tz: Tz, at: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
}

/// Format a UTC instant as zone-local wall time for a locale.
pub fn format_in_zone(
    instant: DateTime<Utc>,
    tz: Tz,
    date_style: DateStyle,
    time_style: TimeStyle,
    locale: &Locale,
) -> String {
    let local = instant.with_timezone(&tz).naive_local();
    format_datetime(local, date_style, time_style, locale)
}

impl I18n {
    /// Localized display name for an IANA zone.
    ///
    /// Looks up `timezones.<name>` in the catalog; zones without an entry
    /// display their raw IANA name.
    pub fn zone_display_name(&self, name: &str) -> String {
        self.translate(
            &format!("timezones.{name}"),
            TranslateOptions::new().default_value(name),
        )
    }
}
