//! Descriptor validation: column types and primary-key shape.

use crate::error::ConfigError;
use crate::schema::{Descriptor, ScalarKind};
use std::collections::HashSet;

/// Checks a descriptor before any DDL is emitted for it.
/// A type without a primary key passes; operations that need one reject it later.
pub fn validate(desc: &Descriptor) -> Result<(), ConfigError> {
    for field in desc.transient_fields() {
        tracing::debug!(
            record = desc.type_name,
            field,
            "skipping field without column name; treated as non persistent"
        );
    }

    let mut seen = HashSet::new();
    let mut pk_seen = false;
    for c in desc.columns() {
        if !seen.insert(c.name) {
            return Err(ConfigError::DuplicateColumn {
                type_name: desc.type_name,
                column: c.name,
            });
        }
        if c.kind.sql_type().is_none() {
            return Err(ConfigError::UnsupportedType {
                type_name: desc.type_name,
                field: c.field,
                kind: c.kind,
            });
        }
        if c.primary_key {
            if pk_seen {
                return Err(ConfigError::InvalidPrimaryKey {
                    type_name: desc.type_name,
                    field: c.field,
                    reason: "composite primary keys are not supported",
                });
            }
            if c.kind != ScalarKind::Integer {
                return Err(ConfigError::InvalidPrimaryKey {
                    type_name: desc.type_name,
                    field: c.field,
                    reason: "primary key must be an integer",
                });
            }
            pk_seen = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldBinding;

    #[test]
    fn accepts_text_and_integer_columns() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[
                FieldBinding::primary_key("id", "id", ScalarKind::Integer),
                FieldBinding::persisted("label", "label", ScalarKind::Text),
                FieldBinding::transient("weight"),
            ],
        };
        assert!(validate(&D).is_ok());
    }

    #[test]
    fn rejects_unsupported_kind() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[
                FieldBinding::primary_key("id", "id", ScalarKind::Integer),
                FieldBinding::persisted("weight", "weight", ScalarKind::Real),
            ],
        };
        let err = validate(&D).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedType { field: "weight", kind: ScalarKind::Real, .. }
        ));
    }

    #[test]
    fn rejects_text_primary_key() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[FieldBinding::primary_key("code", "code", ScalarKind::Text)],
        };
        assert!(matches!(validate(&D), Err(ConfigError::InvalidPrimaryKey { field: "code", .. })));
    }

    #[test]
    fn rejects_two_primary_keys() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[
                FieldBinding::primary_key("a", "a", ScalarKind::Integer),
                FieldBinding::primary_key("b", "b", ScalarKind::Integer),
            ],
        };
        assert!(matches!(validate(&D), Err(ConfigError::InvalidPrimaryKey { field: "b", .. })));
    }

    #[test]
    fn rejects_duplicate_column() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[
                FieldBinding::persisted("a", "name", ScalarKind::Text),
                FieldBinding::persisted("b", "name", ScalarKind::Text),
            ],
        };
        assert!(matches!(validate(&D), Err(ConfigError::DuplicateColumn { column: "name", .. })));
    }

    #[test]
    fn type_without_primary_key_is_valid() {
        const D: Descriptor = Descriptor {
            type_name: "Shelf",
            fields: &[FieldBinding::persisted("label", "label", ScalarKind::Text)],
        };
        assert!(validate(&D).is_ok());
        assert_eq!(D.primary_key_column(), None);
    }
}
