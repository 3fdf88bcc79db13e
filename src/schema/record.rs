//! The `Record` capability and the `record!` macro that implements it.

use crate::error::{AppError, ConfigError};
use crate::schema::{ColumnInfo, Descriptor, ScalarKind};
use crate::sql::BindValue;

/// A field type the mapper can move in and out of a [`BindValue`].
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    fn to_bind(&self) -> BindValue;

    /// NULL decodes to the zero value.
    fn from_bind(value: BindValue) -> Result<Self, AppError>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_bind(&self) -> BindValue {
        BindValue::Text(self.clone())
    }

    fn from_bind(value: BindValue) -> Result<Self, AppError> {
        match value {
            BindValue::Null => Ok(String::new()),
            BindValue::Text(s) => Ok(s),
            other => Err(AppError::Decode(format!("expected text, got {:?}", other))),
        }
    }
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn to_bind(&self) -> BindValue {
        BindValue::Integer(*self)
    }

    fn from_bind(value: BindValue) -> Result<Self, AppError> {
        match value {
            BindValue::Null => Ok(0),
            BindValue::Integer(n) => Ok(n),
            other => Err(AppError::Decode(format!("expected integer, got {:?}", other))),
        }
    }
}

impl Scalar for i32 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn to_bind(&self) -> BindValue {
        BindValue::Integer(i64::from(*self))
    }

    fn from_bind(value: BindValue) -> Result<Self, AppError> {
        let n = i64::from_bind(value)?;
        i32::try_from(n).map_err(|_| AppError::Decode(format!("integer {} out of range for i32", n)))
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Real;

    fn to_bind(&self) -> BindValue {
        BindValue::Real(*self)
    }

    fn from_bind(value: BindValue) -> Result<Self, AppError> {
        match value {
            BindValue::Null => Ok(0.0),
            BindValue::Real(f) => Ok(f),
            BindValue::Integer(n) => Ok(n as f64),
            other => Err(AppError::Decode(format!("expected real, got {:?}", other))),
        }
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn to_bind(&self) -> BindValue {
        BindValue::Integer(i64::from(*self))
    }

    fn from_bind(value: BindValue) -> Result<Self, AppError> {
        Ok(i64::from_bind(value)? != 0)
    }
}

/// A type with a static [`Descriptor`] and by-name access to its fields.
/// Implement with [`crate::record!`] rather than by hand.
pub trait Record: Default + Send + Sync + Unpin + 'static {
    const DESCRIPTOR: Descriptor;

    /// Value of the named field, or `None` when the type has no such field.
    fn get(&self, field: &str) -> Option<BindValue>;

    fn set(&mut self, field: &str, value: BindValue) -> Result<(), AppError>;

    /// Primary-key column, or a config error for types that declare none.
    fn require_primary_key() -> Result<ColumnInfo, ConfigError> {
        Self::DESCRIPTOR
            .primary_key()
            .ok_or(ConfigError::MissingPrimaryKey(Self::DESCRIPTOR.type_name))
    }

    fn primary_key_value(&self) -> Result<BindValue, AppError> {
        let pk = Self::require_primary_key()?;
        self.get(pk.field)
            .ok_or_else(|| AppError::Decode(format!("{} has no field '{}'", Self::DESCRIPTOR.type_name, pk.field)))
    }

    /// True when every persisted field holds its zero value: the "not found" sentinel.
    fn is_empty(&self) -> bool {
        Self::DESCRIPTOR
            .columns()
            .iter()
            .all(|c| self.get(c.field).map_or(true, |v| v.is_zero()))
    }
}

/// Declares a struct and implements [`Record`] for it.
///
/// Each field is annotated after `=>` with `pk("column")`, `col("column")` or `transient`.
/// Persisted fields must be [`Scalar`]. Transient fields may be any type: they are never
/// stored or loaded, and `get`/`set` do not see them.
///
/// ```ignore
/// books_api::record! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Book {
///         pub id: i64 => pk("id"),
///         pub title: String => col("title"),
///         pub tags: Vec<String> => transient,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (@binding $field:ident, $ty:ty, pk, $column:literal) => {
        $crate::schema::FieldBinding::primary_key(
            stringify!($field),
            $column,
            <$ty as $crate::schema::Scalar>::KIND,
        )
    };
    (@binding $field:ident, $ty:ty, col, $column:literal) => {
        $crate::schema::FieldBinding::persisted(
            stringify!($field),
            $column,
            <$ty as $crate::schema::Scalar>::KIND,
        )
    };
    (@binding $field:ident, $ty:ty, transient) => {
        $crate::schema::FieldBinding::transient(stringify!($field))
    };
    (@get $this:ident, $name:ident, $field:ident, transient) => {};
    (@get $this:ident, $name:ident, $field:ident, $role:ident) => {
        if $name == stringify!($field) {
            return Some($crate::schema::Scalar::to_bind(&$this.$field));
        }
    };
    (@set $this:ident, $name:ident, $value:ident, $field:ident, $ty:ty, transient) => {};
    (@set $this:ident, $name:ident, $value:ident, $field:ident, $ty:ty, $role:ident) => {
        if $name == stringify!($field) {
            $this.$field = <$ty as $crate::schema::Scalar>::from_bind($value)?;
            return Ok(());
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $role:ident $( ( $column:literal ) )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::schema::Record for $name {
            const DESCRIPTOR: $crate::schema::Descriptor = $crate::schema::Descriptor {
                type_name: stringify!($name),
                fields: &[$( $crate::record!(@binding $field, $ty, $role $(, $column)?) ),*],
            };

            fn get(&self, field: &str) -> Option<$crate::sql::BindValue> {
                $( $crate::record!(@get self, field, $field, $role); )*
                None
            }

            fn set(
                &mut self,
                field: &str,
                value: $crate::sql::BindValue,
            ) -> Result<(), $crate::error::AppError> {
                $( $crate::record!(@set self, field, value, $field, $ty, $role); )*
                Err($crate::error::AppError::Decode(format!(
                    "{} has no field '{}'",
                    stringify!($name),
                    field
                )))
            }
        }
    };
}
