//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the producers table.

use super::params::BindValue;
use crate::model::{Column, ColumnKind, NewProducer, TABLE_NAME};
use crate::query::ListQuery;

/// Quote identifier for PostgreSQL (safe: only from the column registry).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn table() -> String {
    quoted(TABLE_NAME)
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder, cast to the column's SQL type.
    fn push_param(&mut self, column: Column, v: BindValue) -> String {
        self.params.push(v);
        let n = self.params.len();
        match column.kind() {
            ColumnKind::Integer => format!("${}::integer", n),
            ColumnKind::Date => format!("${}::date", n),
            ColumnKind::Text => format!("${}", n),
        }
    }
}

/// Every registered column; projection happens at serialization, not here.
fn select_column_list() -> String {
    Column::ALL
        .iter()
        .map(|c| quoted(c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT with AND-ed equality filters and ORDER BY the requested keys, then id.
pub fn select_list(query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();

    let mut where_parts = Vec::new();
    for filter in &query.filters {
        match BindValue::from_filter(&filter.value) {
            Some(value) => {
                let ph = q.push_param(filter.column, value);
                where_parts.push(format!("{} = {}", quoted(filter.column.name()), ph));
            }
            None => where_parts.push("FALSE".to_string()),
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };

    let order_parts: Vec<String> = query
        .effective_order()
        .iter()
        .map(|key| format!("{} {}", quoted(key.column.name()), key.direction.keyword()))
        .collect();

    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(),
        table(),
        where_clause,
        order_parts.join(", ")
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Column::Id, BindValue::Integer(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(),
        table(),
        quoted(Column::Id.name()),
        ph
    );
    q
}

/// Push the three business fields in registry order, returning (column, placeholder) pairs.
fn business_params(q: &mut QueryBuf, body: &NewProducer) -> Vec<(String, String)> {
    [
        (Column::CompanyName, BindValue::Text(body.company_name.clone())),
        (Column::Headquarters, BindValue::Text(body.headquarters.clone())),
        (Column::CreationDate, BindValue::Date(body.creation_date)),
    ]
    .into_iter()
    .map(|(column, value)| (quoted(column.name()), q.push_param(column, value)))
    .collect()
}

/// INSERT the business fields; the id comes from the table's sequence.
pub fn insert(body: &NewProducer) -> QueryBuf {
    let mut q = QueryBuf::new();
    let (cols, placeholders): (Vec<_>, Vec<_>) = business_params(&mut q, body).into_iter().unzip();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table(),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list()
    );
    q
}

/// UPDATE by id: full replacement of the business fields. The id column is never SET.
pub fn update(id: i32, body: &NewProducer) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = business_params(&mut q, body)
        .into_iter()
        .map(|(col, ph)| format!("{} = {}", col, ph))
        .collect();
    let id_ph = q.push_param(Column::Id, BindValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        table(),
        sets.join(", "),
        quoted(Column::Id.name()),
        id_ph,
        select_column_list()
    );
    q
}

/// DELETE by id.
pub fn delete(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Column::Id, BindValue::Integer(id));
    q.sql = format!("DELETE FROM {} WHERE {} = {}", table(), quoted(Column::Id.name()), ph);
    q
}

/// Remove every row. Sequence is left alone so ids are never handed out twice.
pub fn truncate() -> String {
    format!("TRUNCATE TABLE {}", table())
}

/// Idempotent DDL for the producers table.
pub fn create_table() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" SERIAL PRIMARY KEY,
            "company_name" VARCHAR(50) NOT NULL,
            "headquarters" VARCHAR(50) NOT NULL,
            "creation_date" DATE NOT NULL
        )
        "#,
        table()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn bare_list_orders_by_id() {
        let q = select_list(&ListQuery::default());
        assert_eq!(
            q.sql,
            r#"SELECT "id", "company_name", "headquarters", "creation_date" FROM "producers" ORDER BY "id" ASC"#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_and_sort_compose() {
        let query = ListQuery::from_params(&params(&[
            ("sort", "-creation_date,company_name"),
            ("headquarters", "Seoul"),
            ("creation_date", "01-01-1990"),
        ]));
        let q = select_list(&query);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "company_name", "headquarters", "creation_date" FROM "producers" WHERE "headquarters" = $1 AND "creation_date" = $2::date ORDER BY "creation_date" DESC, "company_name" ASC, "id" ASC"#
        );
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("Seoul".into()),
                BindValue::Date(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()),
            ]
        );
    }

    #[test]
    fn explicit_id_sort_is_not_repeated() {
        let query = ListQuery::from_params(&params(&[("sort", "-id")]));
        let q = select_list(&query);
        assert!(q.sql.ends_with(r#"ORDER BY "id" DESC"#));
    }

    #[test]
    fn hostile_keys_never_reach_sql() {
        let query = ListQuery::from_params(&params(&[
            ("sort", "company_name; DROP TABLE producers"),
            ("1=1 OR id", "1"),
            ("company_name", "x' OR '1'='1"),
        ]));
        let q = select_list(&query);
        assert!(!q.sql.contains("DROP"));
        assert!(!q.sql.contains("1=1"));
        assert!(!q.sql.contains("'1'='1"));
        assert_eq!(q.params, vec![BindValue::Text("x' OR '1'='1".into())]);
    }

    #[test]
    fn hostile_fields_leave_default_select() {
        let query = ListQuery::from_params(&params(&[("fields", "id;DROP TABLE producers")]));
        assert!(query.fields.is_empty());
        assert_eq!(select_list(&query).sql, select_list(&ListQuery::default()).sql);
    }

    #[test]
    fn unparseable_id_filter_becomes_false() {
        let query = ListQuery::from_params(&params(&[("id", "abc"), ("headquarters", "Seoul")]));
        let q = select_list(&query);
        assert!(q.sql.contains(r#"WHERE FALSE AND "headquarters" = $1 ORDER BY"#), "{}", q.sql);
        assert_eq!(q.params, vec![BindValue::Text("Seoul".into())]);
    }

    #[test]
    fn order_by_follows_effective_order() {
        let query = ListQuery::from_params(&params(&[("sort", "headquarters,-creation_date")]));
        let expected: Vec<String> = query
            .effective_order()
            .iter()
            .map(|key| format!("{} {}", quoted(key.column.name()), key.direction.keyword()))
            .collect();
        assert!(select_list(&query).sql.ends_with(&format!("ORDER BY {}", expected.join(", "))));
    }

    #[test]
    fn update_never_sets_id() {
        let body = NewProducer {
            company_name: "HP".into(),
            headquarters: "Palo Alto".into(),
            creation_date: NaiveDate::from_ymd_opt(1939, 1, 1).unwrap(),
        };
        let q = update(3, &body);
        assert_eq!(
            q.sql,
            r#"UPDATE "producers" SET "company_name" = $1, "headquarters" = $2, "creation_date" = $3::date WHERE "id" = $4::integer RETURNING "id", "company_name", "headquarters", "creation_date""#
        );
        assert_eq!(q.params.last(), Some(&BindValue::Integer(3)));

        let q = insert(&body);
        assert!(q.sql.starts_with(r#"INSERT INTO "producers" ("company_name", "headquarters", "creation_date") VALUES ($1, $2, $3::date)"#));
    }
}
