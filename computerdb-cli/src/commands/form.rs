//! Form handling shared by `validate`, `add` and `edit`.

use computerdb_lib::error::Error;
use computerdb_lib::model::ComputerRecord;
use computerdb_lib::validation::COMPANY_FIELD;
use computerdb_lib::validation::ComputerForm;
use computerdb_lib::validation::DISCONTINUED_FIELD;
use computerdb_lib::validation::FieldState;
use computerdb_lib::validation::FormConfig;
use computerdb_lib::validation::INTRODUCED_FIELD;
use computerdb_lib::validation::MemoryForm;
use computerdb_lib::validation::NAME_FIELD;
use log::info;

use crate::cli::FormArgs;
use crate::error::CliError;

impl FormArgs {
    /// Overwrites the fields that were given on the command line.
    pub fn apply(&self, host: &mut MemoryForm) {
        let values = [
            (NAME_FIELD, &self.name),
            (INTRODUCED_FIELD, &self.introduced),
            (DISCONTINUED_FIELD, &self.discontinued),
            (COMPANY_FIELD, &self.company),
        ];
        for (id, value) in values {
            if let Some(value) = value {
                host.set_value(id, value.as_str());
            }
        }
    }
}

/// Runs the submission gate over `args`, on top of `record` when editing.
///
/// On rejection the per-field feedback is printed and the field errors are
/// returned as [`Error::Validation`].
pub fn submit(
    form: &ComputerForm,
    record: Option<&ComputerRecord>,
    args: &FormArgs,
) -> Result<ComputerRecord, CliError> {
    let mut host = form.memory_form(record);
    args.apply(&mut host);

    form.try_record(&mut host).map_err(|err| {
        print!("{}", report(&host));
        info!("form rejected with {} field error(s)", err.field_errors().len());
        CliError::Client(err)
    })
}

pub fn validate(config: FormConfig, args: &FormArgs) -> Result<(), CliError> {
    let form = ComputerForm::new(config);
    let mut host = form.memory_form(None);
    args.apply(&mut host);

    let outcome = form.try_record(&mut host);
    print!("{}", report(&host));
    let record = outcome?;
    println!("ok: {}", record.name);
    Ok(())
}

/// One line per field with its state and feedback text.
fn report(host: &MemoryForm) -> String {
    host.fields()
        .iter()
        .map(|field| {
            let state = match field.state {
                FieldState::Valid => "ok",
                FieldState::Invalid => "invalid",
                FieldState::Unset => "-",
            };
            if field.feedback_text.is_empty() {
                format!("{:<8} {:<13} {:?}\n", state, field.id, field.value)
            } else {
                format!(
                    "{:<8} {:<13} {:?}: {}\n",
                    state, field.id, field.value, field.feedback_text
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use computerdb_lib::validation::DateFormat;

    use super::*;

    fn args(name: &str, introduced: &str, discontinued: &str) -> FormArgs {
        FormArgs {
            name: Some(name.to_string()),
            introduced: Some(introduced.to_string()),
            discontinued: Some(discontinued.to_string()),
            company: None,
        }
    }

    #[test]
    fn test_rejected_form() {
        let config = FormConfig::default().with_date_format(DateFormat::new("MM/dd/yyyy").unwrap());
        let err = submit(&ComputerForm::new(config), None, &args("AB", "", "13/13/2020")).unwrap_err();
        match err {
            CliError::Client(err @ Error::Validation(_)) => {
                let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, [NAME_FIELD, DISCONTINUED_FIELD]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_edit_keeps_omitted_fields() {
        let form = ComputerForm::default();
        let existing = ComputerRecord::new("Apple II")
            .with_id(12)
            .with_introduced(chrono::NaiveDate::from_ymd_opt(1977, 4, 1).unwrap())
            .with_company(1);
        let changes = FormArgs {
            name: Some("Apple II Plus".to_string()),
            ..FormArgs::default()
        };

        let record = submit(&form, Some(&existing), &changes).unwrap();
        assert_eq!(record.name, "Apple II Plus");
        assert_eq!(record.introduced, existing.introduced);
        assert_eq!(record.company_id, Some(1));
    }

    #[test]
    fn test_report() {
        let form = ComputerForm::default();
        let mut host = form.memory_form(None);
        args("Macintosh", "1984-01-24", "1983-01-01").apply(&mut host);
        let _ = form.submit(&mut host);

        let report = report(&host);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ok"));
        assert!(lines[2].starts_with("invalid"));
        assert!(lines[2].contains("discontinued"));
    }
}
