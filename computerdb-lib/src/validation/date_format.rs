//! Localized date format templates.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::DateFormatError;

/// ISO template used when no localized format is configured.
pub const ISO_TEMPLATE: &str = "yyyy-MM-dd";

const DAY_PATTERN: &str = "(?P<day>0[1-9]|[12][0-9]|3[01])";
const MONTH_PATTERN: &str = "(?P<month>0[1-9]|1[0-2])";
const YEAR_PATTERN: &str = r"(?P<year>\d{4})";

/// A date format compiled from a localizable template such as `MM/dd/yyyy`.
///
/// The template uses the `dd`, `MM` and `yyyy` tokens; every other character
/// is matched literally. The letters `d`, `M` and `y` are reserved for the
/// tokens, so `MMM` or `yy` is rejected. Matching is anchored to the whole value.
///
/// # Example
///
/// ```
/// use computerdb_lib::validation::DateFormat;
///
/// let format = DateFormat::new("MM/dd/yyyy").unwrap();
/// assert!(format.matches("01/24/1984"));
/// assert!(!format.matches("13/13/2020"));
/// ```
#[derive(Debug, Clone)]
pub struct DateFormat {
    template: String,
    regex: Regex,
    chrono_format: String,
}

#[derive(Clone, Copy)]
enum Token {
    Day,
    Month,
    Year,
}

impl Token {
    const ALL: [Token; 3] = [Token::Year, Token::Month, Token::Day];

    fn for_letter(letter: char) -> Option<Token> {
        match letter {
            'd' => Some(Token::Day),
            'M' => Some(Token::Month),
            'y' => Some(Token::Year),
            _ => None,
        }
    }

    fn text(self) -> &'static str {
        match self {
            Token::Day => "dd",
            Token::Month => "MM",
            Token::Year => "yyyy",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Token::Day => DAY_PATTERN,
            Token::Month => MONTH_PATTERN,
            Token::Year => YEAR_PATTERN,
        }
    }

    fn chrono(self) -> &'static str {
        match self {
            Token::Day => "%d",
            Token::Month => "%m",
            Token::Year => "%Y",
        }
    }
}

impl DateFormat {
    /// Compiles a template into a matcher.
    pub fn new(template: impl Into<String>) -> Result<Self, DateFormatError> {
        let template = template.into();
        check_token_runs(&template)?;

        let mut pattern = String::from("^");
        let mut chrono_format = String::new();
        let mut literal = String::new();
        let mut seen = [false; 3];

        let mut rest = template.as_str();
        'scan: while !rest.is_empty() {
            for (index, token) in Token::ALL.into_iter().enumerate() {
                if let Some(tail) = rest.strip_prefix(token.text()) {
                    if seen[index] {
                        return Err(DateFormatError::DuplicateToken {
                            template: template.clone(),
                            token: token.text(),
                        });
                    }
                    seen[index] = true;

                    pattern.push_str(&regex::escape(&literal));
                    literal.clear();
                    pattern.push_str(token.pattern());
                    chrono_format.push_str(token.chrono());
                    rest = tail;
                    continue 'scan;
                }
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                literal.push(ch);
                if ch == '%' {
                    chrono_format.push_str("%%");
                } else {
                    chrono_format.push(ch);
                }
            }
            rest = chars.as_str();
        }
        pattern.push_str(&regex::escape(&literal));
        pattern.push('$');

        if let Some(missing) = Token::ALL
            .into_iter()
            .zip(seen)
            .find_map(|(token, seen)| (!seen).then_some(token))
        {
            return Err(DateFormatError::MissingToken {
                template,
                token: missing.text(),
            });
        }

        let regex = Regex::new(&pattern).map_err(|e| DateFormatError::Pattern {
            template: template.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            template,
            regex,
            chrono_format,
        })
    }

    /// The ISO `yyyy-MM-dd` format.
    pub fn iso() -> Self {
        Self::new(ISO_TEMPLATE).expect("ISO template is well-formed")
    }

    /// Returns the template this format was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the anchored regular expression built from the template.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if the whole value has the shape of the template.
    ///
    /// Only the shape is checked: `02/31/2020` matches `MM/dd/yyyy`.
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Parses a value into a calendar date.
    ///
    /// Returns `None` when the value does not match or names a day that does
    /// not exist.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let captures = self.regex.captures(value)?;
        let year = captures.name("year")?.as_str().parse().ok()?;
        let month = captures.name("month")?.as_str().parse().ok()?;
        let day = captures.name("day")?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Renders a date using the template.
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.chrono_format).to_string()
    }
}

/// Every run of a token letter must be exactly one token long.
fn check_token_runs(template: &str) -> Result<(), DateFormatError> {
    let chars: Vec<char> = template.chars().collect();
    let mut start = 0;

    while start < chars.len() {
        let letter = chars[start];
        let end = chars[start..]
            .iter()
            .position(|&c| c != letter)
            .map_or(chars.len(), |len| start + len);

        if let Some(token) = Token::for_letter(letter)
            && end - start != token.text().len()
        {
            return Err(DateFormatError::MalformedToken {
                template: template.to_string(),
                run: chars[start..end].iter().collect(),
            });
        }
        start = end;
    }
    Ok(())
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::iso()
    }
}

impl std::str::FromStr for DateFormat {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_format() {
        let format = DateFormat::iso();
        assert!(format.matches("1984-01-24"));
        assert!(format.matches("2020-12-31"));
        assert!(!format.matches("1984-1-24"));
        assert!(!format.matches("1984-13-01"));
        assert!(!format.matches("84-01-24"));
        assert!(!format.matches("1984-01-24 "));
        assert!(!format.matches("x1984-01-24"));
    }

    #[test]
    fn test_us_format() {
        let format = DateFormat::new("MM/dd/yyyy").unwrap();
        assert!(format.matches("01/24/1984"));
        assert!(format.matches("12/31/2020"));
        assert!(!format.matches("13/13/2020"));
        assert!(!format.matches("24/01/1984"));
        assert!(!format.matches("1984-01-24"));
    }

    #[test]
    fn test_french_format() {
        let format = DateFormat::new("dd/MM/yyyy").unwrap();
        assert!(format.matches("24/01/1984"));
        assert!(!format.matches("01/24/1984"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let format = DateFormat::new("dd.MM.yyyy").unwrap();
        assert!(format.matches("24.01.1984"));
        assert!(!format.matches("24x01x1984"));
    }

    #[test]
    fn test_shape_only_match() {
        let format = DateFormat::new("MM/dd/yyyy").unwrap();
        assert!(format.matches("02/31/2020"));
        assert_eq!(format.parse("02/31/2020"), None);
    }

    #[test]
    fn test_parse_and_format() {
        let format = DateFormat::new("dd/MM/yyyy").unwrap();
        let date = format.parse("24/01/1984").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1984, 1, 24).unwrap());
        assert_eq!(format.format(date), "24/01/1984");
        assert_eq!(DateFormat::iso().format(date), "1984-01-24");
    }

    #[test]
    fn test_missing_token() {
        let err = DateFormat::new("MM/yyyy").unwrap_err();
        assert_eq!(
            err,
            DateFormatError::MissingToken {
                template: "MM/yyyy".to_string(),
                token: "dd",
            }
        );
    }

    #[test]
    fn test_duplicate_token() {
        let err = DateFormat::new("dd/MM/yyyy dd").unwrap_err();
        assert!(matches!(err, DateFormatError::DuplicateToken { token: "dd", .. }));
    }

    #[test]
    fn test_malformed_token_runs() {
        for (template, run) in [
            ("MMM/dd/yyyy", "MMM"),
            ("d/MM/yyyy", "d"),
            ("dd/MM/yy", "yy"),
            ("dd/MM/yyyyy", "yyyyy"),
        ] {
            assert_eq!(
                DateFormat::new(template).unwrap_err(),
                DateFormatError::MalformedToken {
                    template: template.to_string(),
                    run: run.to_string(),
                },
                "{template}"
            );
        }
        assert!(DateFormat::new("yyyy-MM-dd").is_ok());
    }
}
