//! Placeholder Interpolation
//!
//! Substitutes `%{name}` and `{{name}}` placeholders in message templates.
//! A placeholder with no matching value renders a stable
//! `[missing %{name} value]` marker; the lookup layer never raises over a
//! bad template. Values are inserted literally, so no character in a value
//! carries meta-meaning.

use std::collections::HashMap;

#[derive(Clone, Copy)]
enum Style {
    /// `%{name}`
    Percent,
    /// `{{name}}`
    Curly,
}

impl Style {
    fn close_len(self) -> usize {
        match self {
            Style::Percent => 1,
            Style::Curly => 2,
        }
    }

    fn write_marker(self, out: &mut String, name: &str) {
        match self {
            Style::Percent => {
                out.push_str("[missing %{");
                out.push_str(name);
                out.push_str("} value]");
            }
            Style::Curly => {
                out.push_str("[missing {{");
                out.push_str(name);
                out.push_str("}} value]");
            }
        }
    }
}

/// Replace each `%{name}` / `{{name}}` placeholder in `template` with the
/// matching value from `args`.
///
/// Single left-to-right pass: substituted values are never re-scanned, and
/// unterminated placeholders pass through untouched. Output is stable for
/// the same template and arguments.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use phrasebook::interpolate;
///
/// let mut args = HashMap::new();
/// args.insert("name".to_string(), "Layla".to_string());
///
/// assert_eq!(interpolate("Hello %{name}!", &args), "Hello Layla!");
/// assert_eq!(interpolate("Hello {{name}}!", &args), "Hello Layla!");
/// assert_eq!(
///     interpolate("Hi %{other}", &args),
///     "Hi [missing %{other} value]"
/// );
/// ```
pub fn interpolate(template: &str, args: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    loop {
        let percent = rest.find("%{");
        let curly = rest.find("{{");
        let (start, style) = match (percent, curly) {
            (None, None) => {
                out.push_str(rest);
                return out;
            }
            (Some(p), None) => (p, Style::Percent),
            (None, Some(c)) => (c, Style::Curly),
            (Some(p), Some(c)) => {
                if p <= c {
                    (p, Style::Percent)
                } else {
                    (c, Style::Curly)
                }
            }
        };

        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let close = match style {
            Style::Percent => body.find('}'),
            Style::Curly => body.find("}}"),
        };

        match close {
            Some(end) => {
                let name = &body[..end];
                match args.get(name) {
                    Some(value) => out.push_str(value),
                    None => style.write_marker(&mut out, name),
                }
                rest = &body[end + style.close_len()..];
            }
            None => {
                // Unterminated placeholder: emit the tail verbatim.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_both_styles() {
        let a = args(&[("name", "Omar"), ("city", "Riyadh")]);
        assert_eq!(
            interpolate("%{name} lives in {{city}}.", &a),
            "Omar lives in Riyadh."
        );
    }

    #[test]
    fn repeated_placeholder() {
        let a = args(&[("x", "A")]);
        assert_eq!(interpolate("%{x} and %{x}", &a), "A and A");
    }

    #[test]
    fn missing_value_marker_is_stable() {
        let a = args(&[]);
        let first = interpolate("Hello %{name}", &a);
        let second = interpolate("Hello %{name}", &a);
        assert_eq!(first, "Hello [missing %{name} value]");
        assert_eq!(first, second);

        assert_eq!(
            interpolate("Hello {{name}}", &a),
            "Hello [missing {{name}} value]"
        );
    }

    #[test]
    fn values_are_inserted_literally() {
        // A `$` (or another placeholder) inside a value has no meta-meaning.
        let a = args(&[("amount", "$9.99"), ("tpl", "%{amount}")]);
        assert_eq!(interpolate("pay %{amount}", &a), "pay $9.99");
        assert_eq!(interpolate("raw: %{tpl}", &a), "raw: %{amount}");
    }

    #[test]
    fn unterminated_placeholder_passes_through() {
        let a = args(&[("name", "x")]);
        assert_eq!(interpolate("Hello %{name", &a), "Hello %{name");
        assert_eq!(interpolate("Hello {{name", &a), "Hello {{name");
        assert_eq!(interpolate("Hello {{name}", &a), "Hello {{name}");
    }

    #[test]
    fn no_placeholders_is_identity() {
        let a = args(&[("name", "x")]);
        assert_eq!(interpolate("plain text", &a), "plain text");
        assert_eq!(interpolate("", &a), "");
    }

    #[test]
    fn multibyte_text_survives() {
        let a = args(&[("count", "٣")]);
        assert_eq!(interpolate("لديك %{count} رسائل", &a), "لديك ٣ رسائل");
    }
}
