//! Scalar values that sqlx can bind to a SQLite statement.

use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::Database;

/// A single positional parameter. Records convert their fields into these and back.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl BindValue {
    /// True for NULL and for the zero value of each scalar kind.
    pub fn is_zero(&self) -> bool {
        match self {
            BindValue::Null => true,
            BindValue::Integer(n) => *n == 0,
            BindValue::Real(f) => *f == 0.0,
            BindValue::Text(s) => s.is_empty(),
        }
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Integer(n)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl<'q> Encode<'q, Sqlite> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            BindValue::Null => <Option<i64> as Encode<Sqlite>>::encode_by_ref(&None, buf),
            BindValue::Integer(n) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            BindValue::Real(f) => <f64 as Encode<Sqlite>>::encode_by_ref(f, buf),
            BindValue::Text(s) => <String as Encode<Sqlite>>::encode_by_ref(s, buf),
        }
    }
}

// SQLite columns are dynamically typed; the declared type info is advisory.
impl sqlx::Type<Sqlite> for BindValue {
    fn type_info() -> SqliteTypeInfo {
        <str as sqlx::Type<Sqlite>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert!(BindValue::Null.is_zero());
        assert!(BindValue::Integer(0).is_zero());
        assert!(BindValue::Text(String::new()).is_zero());
        assert!(!BindValue::Integer(1965).is_zero());
        assert!(!BindValue::from("Dune").is_zero());
    }
}
