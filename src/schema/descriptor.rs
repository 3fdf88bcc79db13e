//! Static per-type column bindings, produced once by [`crate::record!`].

/// Declared scalar kind of a record field. Only `Text` and `Integer` map to a column type;
/// the others exist so a record can declare them and be rejected when its table is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Integer,
    Real,
    Boolean,
}

impl ScalarKind {
    /// SQLite column type for this kind, or `None` when the kind cannot be persisted.
    pub fn sql_type(self) -> Option<&'static str> {
        match self {
            ScalarKind::Text => Some("TEXT"),
            ScalarKind::Integer => Some("INTEGER"),
            ScalarKind::Real | ScalarKind::Boolean => None,
        }
    }
}

/// One declared field of a record type. A transient field has neither a column nor a kind:
/// its Rust type is unconstrained and the mapper never touches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: &'static str,
    pub column: Option<&'static str>,
    pub primary_key: bool,
    pub kind: Option<ScalarKind>,
}

impl FieldBinding {
    pub const fn primary_key(field: &'static str, column: &'static str, kind: ScalarKind) -> Self {
        FieldBinding {
            field,
            column: Some(column),
            primary_key: true,
            kind: Some(kind),
        }
    }

    pub const fn persisted(field: &'static str, column: &'static str, kind: ScalarKind) -> Self {
        FieldBinding {
            field,
            column: Some(column),
            primary_key: false,
            kind: Some(kind),
        }
    }

    pub const fn transient(field: &'static str) -> Self {
        FieldBinding {
            field,
            column: None,
            primary_key: false,
            kind: None,
        }
    }
}

/// A persisted field: the binding with its column name resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub field: &'static str,
    pub name: &'static str,
    pub primary_key: bool,
    pub kind: ScalarKind,
}

#[derive(Clone, Copy, Debug)]
pub struct Descriptor {
    pub type_name: &'static str,
    /// All declared fields in declaration order, transient ones included.
    pub fields: &'static [FieldBinding],
}

impl Descriptor {
    /// Table name: the type name lowercased.
    pub fn table_name(&self) -> String {
        self.type_name.to_lowercase()
    }

    /// Persisted columns in declaration order.
    pub fn columns(&self) -> Vec<ColumnInfo> {
        self.fields
            .iter()
            .filter_map(|f| match (f.column, f.kind) {
                (Some(name), Some(kind)) => Some(ColumnInfo {
                    field: f.field,
                    name,
                    primary_key: f.primary_key,
                    kind,
                }),
                _ => None,
            })
            .collect()
    }

    /// Persisted columns other than the primary key, in declaration order.
    pub fn non_key_columns(&self) -> Vec<ColumnInfo> {
        self.columns().into_iter().filter(|c| !c.primary_key).collect()
    }

    /// The first persisted column flagged as primary key.
    pub fn primary_key(&self) -> Option<ColumnInfo> {
        self.columns().into_iter().find(|c| c.primary_key)
    }

    pub fn primary_key_column(&self) -> Option<&'static str> {
        self.primary_key().map(|c| c.name)
    }

    pub fn transient_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.column.is_none()).map(|f| f.field)
    }
}
