//! Number Formatting
//!
//! Locale-aware formatting for numbers, percentages, and currency amounts:
//! grouping separators, decimal separators, and symbol placement per
//! locale. This is the `toNumber`-style layer counts are routed through
//! before interpolation.

use crate::Locale;

/// Number formatting configuration.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    /// Minimum fraction digits
    pub min_fraction_digits: usize,
    /// Maximum fraction digits
    pub max_fraction_digits: usize,
    /// Use grouping separators
    pub use_grouping: bool,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormatter {
    /// Create a formatter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum fraction digits.
    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    /// Set maximum fraction digits.
    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Enable or disable grouping separators.
    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Format a number for the given locale.
    pub fn format(&self, n: f64, locale: &Locale) -> String {
        let separators = Separators::for_locale(locale);

        let fraction_digits = if n.fract() == 0.0 {
            self.min_fraction_digits
        } else {
            self.max_fraction_digits.max(self.min_fraction_digits)
        };

        let formatted = format!("{:.*}", fraction_digits, n.abs());
        let (integer_part, fraction_part) = match formatted.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (formatted.as_str(), None),
        };

        let mut out = String::with_capacity(formatted.len() + 8);
        if n.is_sign_negative() && n != 0.0 {
            out.push('-');
        }
        if self.use_grouping {
            push_grouped(&mut out, integer_part, separators.group);
        } else {
            out.push_str(integer_part);
        }
        if let Some(frac) = fraction_part {
            let significant = frac.chars().any(|c| c != '0');
            if significant || self.min_fraction_digits > 0 {
                out.push_str(separators.decimal);
                out.push_str(frac);
            }
        }
        out
    }
}

/// Format a number with up to two fraction digits.
///
/// # Example
///
/// ```
/// use phrasebook::{format_number, Locale};
///
/// assert_eq!(format_number(1234567.89, &Locale::en()), "1,234,567.89");
/// assert_eq!(format_number(1234567.89, &Locale::de()), "1.234.567,89");
/// assert_eq!(format_number(1234567.89, &Locale::ar()), "1٬234٬567٫89");
/// ```
pub fn format_number(n: f64, locale: &Locale) -> String {
    NumberFormatter::new().max_fraction_digits(2).format(n, locale)
}

/// Format a ratio as a percentage.
///
/// # Example
///
/// ```
/// use phrasebook::{format_percent, Locale};
///
/// assert_eq!(format_percent(0.75, &Locale::en()), "75%");
/// assert_eq!(format_percent(0.125, &Locale::de()), "12,5%");
/// ```
pub fn format_percent(n: f64, locale: &Locale) -> String {
    let formatted = NumberFormatter::new()
        .max_fraction_digits(1)
        .format(n * 100.0, locale);
    format!("{formatted}%")
}

/// Format a currency amount with its symbol.
///
/// # Example
///
/// ```
/// use phrasebook::{format_currency, Locale};
///
/// assert_eq!(format_currency(99.99, "USD", &Locale::en_us()), "$99.99");
/// assert_eq!(format_currency(99.99, "EUR", &Locale::de()), "99,99 €");
/// assert_eq!(format_currency(99.99, "SAR", &Locale::ar()), "99٫99 ر.س");
/// ```
pub fn format_currency(amount: f64, currency_code: &str, locale: &Locale) -> String {
    let (symbol, before) = currency_symbol(currency_code, locale);
    let formatted = NumberFormatter::new()
        .min_fraction_digits(2)
        .max_fraction_digits(2)
        .format(amount.abs(), locale);
    let sign = if amount < 0.0 { "-" } else { "" };

    if before {
        format!("{sign}{symbol}{formatted}")
    } else {
        format!("{sign}{formatted} {symbol}")
    }
}

/// Decimal and grouping separators for a locale.
#[derive(Debug, Clone, Copy)]
struct Separators {
    decimal: &'static str,
    group: &'static str,
}

impl Separators {
    fn for_locale(locale: &Locale) -> Self {
        match locale.language.as_str() {
            // Arabic decimal and thousands separators
            "ar" => Self {
                decimal: "\u{066B}",
                group: "\u{066C}",
            },
            // Comma decimal, period grouping
            "de" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs"
            | "sk" | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "tr" | "id" | "vi" => Self {
                decimal: ",",
                group: ".",
            },
            // Comma decimal, space grouping
            "fr" => Self {
                decimal: ",",
                group: " ",
            },
            // Period decimal, comma grouping
            _ => Self {
                decimal: ".",
                group: ",",
            },
        }
    }
}

/// Append `digits` to `out` with a separator every three digits.
fn push_grouped(out: &mut String, digits: &str, sep: &str) {
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
}

/// Currency symbol and placement (true = before the amount).
///
/// Unknown codes render as the ISO code itself, after the amount.
fn currency_symbol(currency_code: &str, locale: &Locale) -> (String, bool) {
    let before = !matches!(
        locale.language.as_str(),
        "ar" | "de" | "fr" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl"
            | "cs" | "sk" | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "vi"
    );

    let code = currency_code.to_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "RUB" => "₽",
        "BRL" => "R$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "SAR" => "ر.س",
        "AED" => "د.إ",
        "EGP" => "ج.م",
        "KWD" => "د.ك",
        "SEK" | "NOK" | "DKK" => "kr",
        "PLN" => "zł",
        "CZK" => "Kč",
        _ => return (code, false),
    };

    (symbol.to_string(), before)
}
