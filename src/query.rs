//! Query-string directives -> `ListQuery`.
//!
//! `fields` picks the serialized projection, `sort` the ordering, and every other key that names a
//! registered column becomes an equality filter. Tokens that do not resolve are dropped silently;
//! the column registry is the only path from client text to a column.

use crate::model::{parse_date, Column, ColumnKind, Producer};
use chrono::NaiveDate;
use std::cmp::Ordering;

pub const FIELDS_PARAM: &str = "fields";
pub const SORT_PARAM: &str = "sort";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

/// Typed right-hand side of an equality filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i32),
    Text(String),
    Date(NaiveDate),
    /// Value no row can hold, e.g. `id=abc`. The predicate stays and matches nothing.
    Never,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub column: Column,
    pub value: FilterValue,
}

impl Filter {
    /// Parse `raw` according to the column's kind. Only an unparseable date gives `None`, which drops the
    /// filter; an integer that does not fit becomes `FilterValue::Never`.
    pub fn parse(column: Column, raw: &str) -> Option<Filter> {
        let value = match column.kind() {
            ColumnKind::Integer => raw.parse().map(FilterValue::Integer).unwrap_or(FilterValue::Never),
            ColumnKind::Text => FilterValue::Text(raw.to_string()),
            ColumnKind::Date => FilterValue::Date(parse_date(raw)?),
        };
        Some(Filter { column, value })
    }

    pub fn matches(&self, producer: &Producer) -> bool {
        match (&self.value, self.column) {
            (FilterValue::Integer(n), Column::Id) => producer.id == *n,
            (FilterValue::Text(s), Column::CompanyName) => producer.company_name == *s,
            (FilterValue::Text(s), Column::Headquarters) => producer.headquarters == *s,
            (FilterValue::Date(d), Column::CreationDate) => producer.creation_date == *d,
            _ => false,
        }
    }
}

/// A fully resolved read: projection for serialization, ordering and AND-ed equality filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Empty means every column.
    pub fields: Vec<Column>,
    /// Left to right priority.
    pub order: Vec<SortKey>,
    pub filters: Vec<Filter>,
}

impl ListQuery {
    /// Build from raw query pairs. `fields` and `sort` use their first occurrence; every other pair is a filter candidate.
    pub fn from_params(params: &[(String, String)]) -> Self {
        let first = |key: &str| params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
        ListQuery {
            fields: parse_fields(first(FIELDS_PARAM)),
            order: parse_sort(first(SORT_PARAM)),
            filters: parse_filters(params),
        }
    }

    /// Requested keys followed by `id ASC` unless `id` was already requested. Both backends order by exactly this.
    pub fn effective_order(&self) -> Vec<SortKey> {
        let mut keys = self.order.clone();
        if !keys.iter().any(|key| key.column == Column::Id) {
            keys.push(SortKey {
                column: Column::Id,
                direction: SortDirection::Asc,
            });
        }
        keys
    }

    /// In-process counterpart of the SQL `ORDER BY`.
    ///
    /// Text compares by Unicode code point (`"Zeta" < "alpha"`), while PostgreSQL uses the database
    /// collation, so mixed-case names may order differently between the two backends.
    pub fn compare(&self, a: &Producer, b: &Producer) -> Ordering {
        self.effective_order()
            .iter()
            .map(|key| {
                let ord = compare_column(key.column, a, b);
                match key.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

pub fn parse_fields(raw: Option<&str>) -> Vec<Column> {
    let mut fields = Vec::new();
    for column in raw.unwrap_or_default().split(',').filter_map(Column::resolve) {
        if !fields.contains(&column) {
            fields.push(column);
        }
    }
    fields
}

pub fn parse_sort(raw: Option<&str>) -> Vec<SortKey> {
    raw.unwrap_or_default()
        .split(',')
        .filter_map(|token| {
            let (name, direction) = match token.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (token, SortDirection::Asc),
            };
            Column::resolve(name).map(|column| SortKey { column, direction })
        })
        .collect()
}

pub fn parse_filters(params: &[(String, String)]) -> Vec<Filter> {
    params
        .iter()
        .filter(|(k, _)| k != FIELDS_PARAM && k != SORT_PARAM)
        .filter_map(|(k, v)| {
            let column = Column::resolve(k)?;
            let filter = Filter::parse(column, v);
            if filter.is_none() {
                tracing::debug!(column = column.name(), value = %v, "dropping unparseable filter");
            }
            filter
        })
        .collect()
}

fn compare_column(column: Column, a: &Producer, b: &Producer) -> Ordering {
    match column {
        Column::Id => a.id.cmp(&b.id),
        Column::CompanyName => a.company_name.cmp(&b.company_name),
        Column::Headquarters => a.headquarters.cmp(&b.headquarters),
        Column::CreationDate => a.creation_date.cmp(&b.creation_date),
    }
}
