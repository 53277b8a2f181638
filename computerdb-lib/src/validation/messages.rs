//! Localized messages and form configuration.

use std::collections::HashMap;

use crate::error::DateFormatError;

use super::DateFormat;
use super::FeedbackClasses;

pub const NAME_TOO_SMALL_KEY: &str = "computers.constraints.name.toosmall";
pub const INTRODUCED_INVALID_KEY: &str = "computers.constraints.introduced.invalid";
pub const DISCONTINUED_INVALID_KEY: &str = "computers.constraints.discontinued.invalid";
pub const DISCONTINUED_ORDER_KEY: &str = "computers.constraints.discontinued.afterIntroductionDate";
pub const DATE_BEFORE_EPOCH_KEY: &str = "computers.constraints.date.beforeEpoch";
pub const DATE_IN_FUTURE_KEY: &str = "computers.constraints.date.future";
pub const COMPANY_INVALID_KEY: &str = "computers.constraints.company.invalid";
pub const DATE_FORMAT_KEY: &str = "date.format";

/// Message templates shown next to invalid fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub name_too_small: String,
    pub introduced_invalid: String,
    pub discontinued_invalid: String,
    pub discontinued_before_introduced: String,
    pub date_before_epoch: String,
    pub date_in_future: String,
    pub company_invalid: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            name_too_small: "Name must be at least 3 characters long".to_string(),
            introduced_invalid: "Introduction date is invalid".to_string(),
            discontinued_invalid: "Discontinuation date is invalid".to_string(),
            discontinued_before_introduced:
                "Discontinuation date must be after the introduction date".to_string(),
            date_before_epoch: "Date must not be before 01/01/1970".to_string(),
            date_in_future: "Date must not be in the future".to_string(),
            company_invalid: "Company is invalid".to_string(),
        }
    }
}

impl Messages {
    /// Reads messages from a properties bundle; missing keys keep their default.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, default: String| properties.get(key).cloned().unwrap_or(default);

        Self {
            name_too_small: get(NAME_TOO_SMALL_KEY, defaults.name_too_small),
            introduced_invalid: get(INTRODUCED_INVALID_KEY, defaults.introduced_invalid),
            discontinued_invalid: get(DISCONTINUED_INVALID_KEY, defaults.discontinued_invalid),
            discontinued_before_introduced: get(
                DISCONTINUED_ORDER_KEY,
                defaults.discontinued_before_introduced,
            ),
            date_before_epoch: get(DATE_BEFORE_EPOCH_KEY, defaults.date_before_epoch),
            date_in_future: get(DATE_IN_FUTURE_KEY, defaults.date_in_future),
            company_invalid: get(COMPANY_INVALID_KEY, defaults.company_invalid),
        }
    }
}

/// Everything the computer form needs besides field values.
#[derive(Debug, Clone, Default)]
pub struct FormConfig {
    pub classes: FeedbackClasses,
    pub messages: Messages,
    pub date_format: DateFormat,
}

impl FormConfig {
    /// Builds a configuration from a Java-style `.properties` bundle.
    ///
    /// `date.format` selects the date template (ISO when absent).
    pub fn from_properties(source: &str) -> Result<Self, DateFormatError> {
        let properties = parse_properties(source);
        let date_format = match properties.get(DATE_FORMAT_KEY) {
            Some(template) => DateFormat::new(template.as_str())?,
            None => DateFormat::iso(),
        };

        Ok(Self {
            classes: FeedbackClasses::default(),
            messages: Messages::from_properties(&properties),
            date_format,
        })
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }
}

/// Parses a `.properties` document.
///
/// Supports `=`, `:` and whitespace separators, `#`/`!` comments, trailing
/// backslash continuations, and `\uXXXX`, `\n`, `\t` escapes.
pub fn parse_properties(source: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    let mut pending = String::new();

    for line in source.lines() {
        let line = line.trim_start();
        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if ends_with_continuation(line) {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }

        pending.push_str(line);
        let logical = std::mem::take(&mut pending);
        if let Some((key, value)) = split_entry(&logical) {
            properties.insert(unescape(key), unescape(value));
        }
    }

    if let Some((key, value)) = split_entry(&pending) {
        properties.insert(unescape(key), unescape(value));
    }

    properties
}

fn ends_with_continuation(line: &str) -> bool {
    let backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 1
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' => {
                let key = &line[..index];
                let mut value = line[index..].trim_start();
                if ch == ' ' || ch == '\t' {
                    value = value
                        .strip_prefix('=')
                        .or_else(|| value.strip_prefix(':'))
                        .unwrap_or(value)
                        .trim_start();
                } else {
                    value = value[1..].trim_start();
                }
                return Some((key, value));
            }
            _ => {}
        }
    }

    Some((line, ""))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"
# French bundle
date.format=dd/MM/yyyy
computers.constraints.name.toosmall=Le nom doit contenir au moins 3 caractères
computers.constraints.introduced.invalid : Date d'introduction invalide
computers.constraints.discontinued.invalid = Date \
    d'arrêt invalide
"#;

    #[test]
    fn test_parse_properties() {
        let properties = parse_properties(BUNDLE);
        assert_eq!(properties.get("date.format").unwrap(), "dd/MM/yyyy");
        assert_eq!(
            properties.get(NAME_TOO_SMALL_KEY).unwrap(),
            "Le nom doit contenir au moins 3 caractères"
        );
        assert_eq!(
            properties.get(INTRODUCED_INVALID_KEY).unwrap(),
            "Date d'introduction invalide"
        );
        assert_eq!(
            properties.get(DISCONTINUED_INVALID_KEY).unwrap(),
            "Date d'arrêt invalide"
        );
    }

    #[test]
    fn test_whitespace_separator_and_escaped_key() {
        let properties = parse_properties("greeting hello world\nkey\\=with\\:sep=value");
        assert_eq!(properties.get("greeting").unwrap(), "hello world");
        assert_eq!(properties.get("key=with:sep").unwrap(), "value");
    }

    #[test]
    fn test_form_config_from_properties() {
        let config = FormConfig::from_properties(BUNDLE).unwrap();
        assert_eq!(config.date_format.template(), "dd/MM/yyyy");
        assert_eq!(
            config.messages.introduced_invalid,
            "Date d'introduction invalide"
        );
        assert_eq!(
            config.messages.company_invalid,
            Messages::default().company_invalid
        );
    }

    #[test]
    fn test_form_config_rejects_bad_template() {
        assert!(FormConfig::from_properties("date.format=MM/yyyy").is_err());
    }
}
