//! Producer payload validation: every field is checked and all messages are collected before failing.

use crate::error::{AppError, FieldErrors};
use crate::model::{parse_date, Column, NewProducer};
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const NAME_MAX_LENGTH: usize = 50;

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_DATE: &str = "Not a valid date.";

/// Validator for create and update bodies. `today` is the inclusive upper bound for `creation_date`.
#[derive(Clone, Copy, Debug)]
pub struct ProducerValidator {
    today: NaiveDate,
}

impl ProducerValidator {
    pub fn new(today: NaiveDate) -> Self {
        ProducerValidator { today }
    }

    /// Bound to the local calendar date at call time.
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Validate an untrusted JSON body. Unknown keys, `id` included, are ignored.
    pub fn validate(&self, body: &Value) -> Result<NewProducer, AppError> {
        let Value::Object(map) = body else {
            let mut errors = FieldErrors::new();
            errors.insert("_schema".into(), vec!["Invalid input type.".into()]);
            return Err(AppError::Validation(errors));
        };

        let mut errors = FieldErrors::new();
        let company_name = collect(&mut errors, Column::CompanyName, bounded_text(map, Column::CompanyName));
        let headquarters = collect(&mut errors, Column::Headquarters, bounded_text(map, Column::Headquarters));
        let creation_date = collect(&mut errors, Column::CreationDate, self.past_date(map));

        match (company_name, headquarters, creation_date) {
            (Some(company_name), Some(headquarters), Some(creation_date)) if errors.is_empty() => Ok(NewProducer {
                company_name,
                headquarters,
                creation_date,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    fn past_date(&self, map: &Map<String, Value>) -> Result<NaiveDate, Vec<String>> {
        let raw = required(map, Column::CreationDate)?;
        let date = raw.as_str().and_then(parse_date).ok_or_else(|| vec![NOT_DATE.to_string()])?;
        if date > self.today {
            return Err(vec![format!(
                "Creation date must be lower than {}",
                self.today.format("%Y-%m-%d")
            )]);
        }
        Ok(date)
    }
}

fn collect<T>(errors: &mut FieldErrors, column: Column, result: Result<T, Vec<String>>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(messages) => {
            errors.entry(column.name().to_string()).or_default().extend(messages);
            None
        }
    }
}

fn required(map: &Map<String, Value>, column: Column) -> Result<&Value, Vec<String>> {
    match map.get(column.name()) {
        None => Err(vec![MISSING.to_string()]),
        Some(Value::Null) => Err(vec![NULL.to_string()]),
        Some(v) => Ok(v),
    }
}

/// Required string no longer than `NAME_MAX_LENGTH` characters.
fn bounded_text(map: &Map<String, Value>, column: Column) -> Result<String, Vec<String>> {
    let s = required(map, column)?.as_str().ok_or_else(|| vec![NOT_STRING.to_string()])?;
    if s.chars().count() > NAME_MAX_LENGTH {
        return Err(vec![format!("Longer than maximum length {}.", NAME_MAX_LENGTH)]);
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 7, 17).unwrap()
    }

    fn errors_of(result: Result<NewProducer, AppError>) -> FieldErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_payload_and_ignores_id() {
        let v = ProducerValidator::new(today());
        let p = v
            .validate(&json!({
                "id": 99,
                "company_name": "Dell",
                "headquarters": "Round Rock",
                "creation_date": "01-02-1984",
                "extra": true
            }))
            .unwrap();
        assert_eq!(p.company_name, "Dell");
        assert_eq!(p.creation_date, NaiveDate::from_ymd_opt(1984, 2, 1).unwrap());
    }

    #[test]
    fn collects_every_field_error() {
        let v = ProducerValidator::new(today());
        let errors = errors_of(v.validate(&json!({
            "company_name": "x".repeat(51),
            "creation_date": "1984-02-01"
        })));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["company_name"], vec!["Longer than maximum length 50."]);
        assert_eq!(errors["headquarters"], vec![MISSING]);
        assert_eq!(errors["creation_date"], vec![NOT_DATE]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let v = ProducerValidator::new(today());
        let name = "ż".repeat(50);
        let p = v
            .validate(&json!({"company_name": name, "headquarters": "Kraków", "creation_date": "01-01-2000"}))
            .unwrap();
        assert_eq!(p.company_name.chars().count(), 50);
    }

    #[test]
    fn today_is_allowed_tomorrow_is_not() {
        let v = ProducerValidator::new(today());
        let ok = v.validate(&json!({"company_name": "A", "headquarters": "B", "creation_date": "17-07-2021"}));
        assert!(ok.is_ok());

        let errors = errors_of(v.validate(&json!({"company_name": "A", "headquarters": "B", "creation_date": "18-07-2021"})));
        assert_eq!(errors["creation_date"], vec!["Creation date must be lower than 2021-07-17"]);
    }

    #[test]
    fn wrong_types_and_nulls() {
        let v = ProducerValidator::new(today());
        let errors = errors_of(v.validate(&json!({"company_name": 5, "headquarters": null, "creation_date": 20210101})));
        assert_eq!(errors["company_name"], vec![NOT_STRING]);
        assert_eq!(errors["headquarters"], vec![NULL]);
        assert_eq!(errors["creation_date"], vec![NOT_DATE]);
    }

    #[test]
    fn non_object_body_is_schema_error() {
        let v = ProducerValidator::new(today());
        let errors = errors_of(v.validate(&json!(["not", "an", "object"])));
        assert_eq!(errors["_schema"], vec!["Invalid input type."]);
    }
}
