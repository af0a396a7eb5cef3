//! Typed bind values for PostgreSQL. Each variant reports its own type so one `Vec` can hold mixed parameters.

use crate::query::FilterValue;
use chrono::NaiveDate;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Integer(i32),
    Text(String),
    Date(NaiveDate),
}

impl BindValue {
    /// `None` for `FilterValue::Never`, which has nothing to bind.
    pub fn from_filter(v: &FilterValue) -> Option<Self> {
        match v {
            FilterValue::Integer(n) => Some(BindValue::Integer(*n)),
            FilterValue::Text(s) => Some(BindValue::Text(s.clone())),
            FilterValue::Date(d) => Some(BindValue::Date(*d)),
            FilterValue::Never => None,
        }
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::Integer(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            BindValue::Date(d) => <NaiveDate as Encode<Postgres>>::encode_by_ref(d, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindValue::Integer(_) => <i32 as Type<Postgres>>::type_info(),
            BindValue::Text(_) => <String as Type<Postgres>>::type_info(),
            BindValue::Date(_) => <NaiveDate as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i32 as Type<Postgres>>::compatible(ty)
            || <String as Type<Postgres>>::compatible(ty)
            || <NaiveDate as Type<Postgres>>::compatible(ty)
    }
}
