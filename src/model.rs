//! Producer entity, the column registry used to resolve query-string names, and the `DD-MM-YYYY` date codec.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire format for every date field, in and out.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Table backing the producer entity.
pub const TABLE_NAME: &str = "producers";

/// Storage type of a registered column. Drives how raw filter strings are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Date,
}

/// Allow-list of producer columns. Client-supplied names only reach SQL through this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    CompanyName,
    Headquarters,
    CreationDate,
}

impl Column {
    /// Every registered column; also the default projection.
    pub const ALL: [Column; 4] = [
        Column::Id,
        Column::CompanyName,
        Column::Headquarters,
        Column::CreationDate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::CompanyName => "company_name",
            Column::Headquarters => "headquarters",
            Column::CreationDate => "creation_date",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Id => ColumnKind::Integer,
            Column::CompanyName | Column::Headquarters => ColumnKind::Text,
            Column::CreationDate => ColumnKind::Date,
        }
    }

    /// Exact-match lookup. Anything outside the registry is `None`, never an error.
    pub fn resolve(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Persisted producer row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Producer {
    pub id: i32,
    pub company_name: String,
    pub headquarters: String,
    #[serde(with = "date_format")]
    pub creation_date: NaiveDate,
}

impl Producer {
    pub fn value_of(&self, column: Column) -> Value {
        match column {
            Column::Id => Value::from(self.id),
            Column::CompanyName => Value::String(self.company_name.clone()),
            Column::Headquarters => Value::String(self.headquarters.clone()),
            Column::CreationDate => Value::String(format_date(self.creation_date)),
        }
    }

    /// Serialize only the given columns. An empty slice means every column.
    pub fn project(&self, fields: &[Column]) -> Value {
        let mut map = Map::new();
        for column in Column::ALL {
            if fields.is_empty() || fields.contains(&column) {
                map.insert(column.name().to_string(), self.value_of(column));
            }
        }
        Value::Object(map)
    }
}

/// The three business fields, validated and ready to persist. Never carries an id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewProducer {
    pub company_name: String,
    pub headquarters: String,
    #[serde(with = "date_format")]
    pub creation_date: NaiveDate,
}

impl NewProducer {
    pub fn with_id(self, id: i32) -> Producer {
        Producer {
            id,
            company_name: self.company_name,
            headquarters: self.headquarters,
            creation_date: self.creation_date,
        }
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `DD-MM-YYYY` dates.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("expected date as DD-MM-YYYY, got '{}'", s)))
    }
}
