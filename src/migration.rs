//! Table DDL and sample data loading.

use crate::error::{AppError, FieldErrors};
use crate::model::NewProducer;
use crate::service::ProducerValidator;
use crate::sql;
use serde_json::Value;
use sqlx::PgPool;
use std::path::Path;

/// Create the producers table if it does not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(&sql::create_table()).execute(pool).await?;
    tracing::info!("producers table ready");
    Ok(())
}

/// Parse a JSON array of producer records and run each through the same rules as API writes.
///
/// Nothing is returned unless every record passes. Error keys are prefixed with the record's
/// index, e.g. `"2.creation_date"`.
pub fn parse_samples(json: &str, validator: &ProducerValidator) -> Result<Vec<NewProducer>, AppError> {
    let records: Vec<Value> =
        serde_json::from_str(json).map_err(|e| AppError::BadRequest(format!("invalid sample data: {}", e)))?;

    let mut items = Vec::with_capacity(records.len());
    let mut errors = FieldErrors::new();
    for (index, record) in records.iter().enumerate() {
        match validator.validate(record) {
            Ok(item) => items.push(item),
            Err(AppError::Validation(fields)) => {
                for (field, messages) in fields {
                    errors.insert(format!("{}.{}", index, field), messages);
                }
            }
            Err(other) => return Err(other),
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(items)
}

pub async fn load_samples(path: &Path) -> Result<Vec<NewProducer>, AppError> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_samples(&json, &ProducerValidator::for_today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn validator() -> ProducerValidator {
        ProducerValidator::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn samples_use_day_first_dates() {
        let items = parse_samples(
            r#"[{"company_name": "Apple", "headquarters": "Cupertino", "creation_date": "01-04-1976"}]"#,
            &validator(),
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].creation_date, NaiveDate::from_ymd_opt(1976, 4, 1).unwrap());
    }

    #[test]
    fn iso_sample_dates_fail() {
        let err = parse_samples(
            r#"[{"company_name": "A", "headquarters": "B", "creation_date": "1976-04-01"}]"#,
            &validator(),
        );
        let Err(AppError::Validation(errors)) = err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert!(errors.contains_key("0.creation_date"));
    }

    #[test]
    fn samples_obey_write_rules() {
        let json = format!(
            r#"[
                {{"company_name": "Apple", "headquarters": "Cupertino", "creation_date": "01-04-1976"}},
                {{"company_name": "{}", "headquarters": "B", "creation_date": "01-01-2999"}}
            ]"#,
            "x".repeat(80)
        );
        let Err(AppError::Validation(errors)) = parse_samples(&json, &validator()) else {
            panic!("oversized name and future date must be rejected");
        };
        assert_eq!(
            errors.keys().collect::<Vec<_>>(),
            vec!["1.company_name", "1.creation_date"]
        );
    }

    #[test]
    fn non_array_samples_are_bad_request() {
        let err = parse_samples(r#"{"company_name": "A"}"#, &validator());
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn bundled_samples_are_valid() {
        let json = include_str!("../samples/producers.json");
        let items = parse_samples(json, &ProducerValidator::for_today()).unwrap();
        assert_eq!(items.len(), 7);
    }
}
