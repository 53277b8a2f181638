//! The computer create/edit form.

use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDate;

use crate::error::Error;
use crate::error::FieldValidationError;
use crate::model::ComputerRecord;

use super::messages::COMPANY_INVALID_KEY;
use super::messages::DATE_BEFORE_EPOCH_KEY;
use super::messages::DATE_IN_FUTURE_KEY;
use super::messages::DISCONTINUED_INVALID_KEY;
use super::messages::DISCONTINUED_ORDER_KEY;
use super::messages::INTRODUCED_INVALID_KEY;
use super::FieldRule;
use super::FormConfig;
use super::FormHost;
use super::FormValidator;
use super::MemoryForm;
use super::ValidationResult;

pub const NAME_FIELD: &str = "computerName";
pub const INTRODUCED_FIELD: &str = "introduced";
pub const DISCONTINUED_FIELD: &str = "discontinued";
pub const COMPANY_FIELD: &str = "companyId";

/// Minimum number of characters in a computer name.
pub const NAME_MIN_LENGTH: usize = 3;

/// Validator and record conversion for the computer form.
///
/// # Example
///
/// ```
/// use computerdb_lib::validation::{ComputerForm, FormConfig, MemoryForm};
///
/// let form = ComputerForm::new(FormConfig::default());
/// let mut host = MemoryForm::new()
///     .with_field("computerName", "Macintosh")
///     .with_field("introduced", "1984-01-24")
///     .with_field("discontinued", "")
///     .with_field("companyId", "");
///
/// let record = form.submit(&mut host).unwrap();
/// assert_eq!(record.name, "Macintosh");
/// ```
#[derive(Debug, Clone)]
pub struct ComputerForm {
    config: FormConfig,
    validator: FormValidator,
}

impl ComputerForm {
    pub fn new(config: FormConfig) -> Self {
        let date_rule = FieldRule::Date(config.date_format.clone());
        let validator = FormValidator::new(config.classes.clone())
            .field(
                NAME_FIELD,
                FieldRule::MinLength(NAME_MIN_LENGTH),
                &config.messages.name_too_small,
            )
            .field(
                INTRODUCED_FIELD,
                date_rule.clone(),
                &config.messages.introduced_invalid,
            )
            .field(
                DISCONTINUED_FIELD,
                date_rule,
                &config.messages.discontinued_invalid,
            )
            .field(COMPANY_FIELD, FieldRule::Optional, &config.messages.company_invalid);

        Self { config, validator }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// Runs the submission gate over the four fields.
    pub fn validate<H: FormHost + ?Sized>(&self, host: &mut H) -> ValidationResult {
        self.validator.validate(host)
    }

    /// Runs the gate and, when it passes, converts the values into a record.
    ///
    /// Conversion failures are rendered on their fields and returned in the
    /// same result as rule failures.
    pub fn submit<H: FormHost + ?Sized>(&self, host: &mut H) -> Result<ComputerRecord, ValidationResult> {
        let mut result = self.validate(host);
        if result.is_invalid() {
            return Err(result);
        }

        match self.to_record(host) {
            Ok(record) => Ok(record),
            Err(errors) => {
                for error in &errors {
                    self.validator
                        .reject(host, &mut result, &error.field, &error.message);
                }
                Err(result)
            }
        }
    }

    /// Like [`submit`](Self::submit), but reports a rejection as
    /// [`Error::Validation`] carrying every field error.
    pub fn try_record<H: FormHost + ?Sized>(&self, host: &mut H) -> Result<ComputerRecord, Error> {
        self.submit(host)
            .map_err(|result| Error::Validation(result.errors()))
    }

    /// Converts the current values into a record, checking dates against today.
    pub fn to_record<H: FormHost + ?Sized>(
        &self,
        host: &H,
    ) -> Result<ComputerRecord, Vec<FieldValidationError>> {
        self.to_record_at(host, Local::now().date_naive())
    }

    /// Converts the current values into a record.
    ///
    /// Dates are parsed with the configured format and must fall between
    /// 1970-01-01 and `today`. A discontinued date requires an introduced
    /// date and must not precede it.
    pub fn to_record_at<H: FormHost + ?Sized>(
        &self,
        host: &H,
        today: NaiveDate,
    ) -> Result<ComputerRecord, Vec<FieldValidationError>> {
        let messages = &self.config.messages;
        let mut errors = Vec::new();

        let name = host.value(NAME_FIELD).unwrap_or_default();
        let introduced = self.parse_date(
            host,
            INTRODUCED_FIELD,
            &messages.introduced_invalid,
            INTRODUCED_INVALID_KEY,
            today,
            &mut errors,
        );
        let discontinued = self.parse_date(
            host,
            DISCONTINUED_FIELD,
            &messages.discontinued_invalid,
            DISCONTINUED_INVALID_KEY,
            today,
            &mut errors,
        );

        if let Some(discontinued) = discontinued {
            let out_of_order = match introduced {
                Some(introduced) => introduced > discontinued,
                None => !errors.iter().any(|e| e.field == INTRODUCED_FIELD),
            };
            if out_of_order {
                errors.push(FieldValidationError::with_code(
                    DISCONTINUED_FIELD,
                    &messages.discontinued_before_introduced,
                    DISCONTINUED_ORDER_KEY,
                ));
            }
        }

        let company_id = match host.value(COMPANY_FIELD).unwrap_or_default().trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push(FieldValidationError::with_code(
                        COMPANY_FIELD,
                        &messages.company_invalid,
                        COMPANY_INVALID_KEY,
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ComputerRecord {
            id: None,
            name,
            introduced,
            discontinued,
            company_id,
            company_name: None,
        })
    }

    /// Parses one date field.
    ///
    /// A date outside `[1970-01-01, today]` is reported but still returned,
    /// so ordering against the other date is checked as well.
    fn parse_date<H: FormHost + ?Sized>(
        &self,
        host: &H,
        field: &str,
        message: &str,
        code: &str,
        today: NaiveDate,
        errors: &mut Vec<FieldValidationError>,
    ) -> Option<NaiveDate> {
        let raw = host.value(field).unwrap_or_default();
        if raw.is_empty() {
            return None;
        }

        let Some(date) = self.config.date_format.parse(&raw) else {
            errors.push(FieldValidationError::with_code(field, message, code));
            return None;
        };

        let messages = &self.config.messages;
        if date.year() < 1970 {
            errors.push(FieldValidationError::with_code(
                field,
                &messages.date_before_epoch,
                DATE_BEFORE_EPOCH_KEY,
            ));
        } else if date > today {
            errors.push(FieldValidationError::with_code(
                field,
                &messages.date_in_future,
                DATE_IN_FUTURE_KEY,
            ));
        }
        Some(date)
    }

    /// Builds an in-memory form, pre-filled from `record` when editing.
    pub fn memory_form(&self, record: Option<&ComputerRecord>) -> MemoryForm {
        let format = &self.config.date_format;
        let date = |d: Option<NaiveDate>| d.map(|d| format.format(d)).unwrap_or_default();

        match record {
            Some(record) => MemoryForm::new()
                .with_field(NAME_FIELD, record.name.as_str())
                .with_field(INTRODUCED_FIELD, date(record.introduced))
                .with_field(DISCONTINUED_FIELD, date(record.discontinued))
                .with_field(
                    COMPANY_FIELD,
                    record.company_id.map(|id| id.to_string()).unwrap_or_default(),
                ),
            None => MemoryForm::new()
                .with_field(NAME_FIELD, "")
                .with_field(INTRODUCED_FIELD, "")
                .with_field(DISCONTINUED_FIELD, "")
                .with_field(COMPANY_FIELD, ""),
        }
    }
}

impl Default for ComputerForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}
