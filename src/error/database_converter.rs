use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts diesel failures into `AppError` variants.
///
/// Unique violations surface as `Conflict` so that a race lost against the
/// unique index reads the same as the service-level uniqueness check.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Conflict {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference from {} with value '{}'",
                            entity, value
                        ),
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => ConstraintParser::extract_column_from_message(
                message,
            )
            .map(|field| AppError::Validation {
                field,
                reason: "Field is required".to_string(),
            }),
            DatabaseErrorKind::CheckViolation => constraint_name
                .and_then(ConstraintParser::parse_constraint_name)
                .map(|(entity, field)| AppError::Validation {
                    field,
                    reason: format!("Check constraint failed for {}", entity),
                }),
            // SQLSTATE 22003: a price or fee does not fit NUMERIC(10, 2)
            DatabaseErrorKind::Unknown if message.starts_with("numeric field overflow") => {
                Some(AppError::Validation {
                    field: "amount".to_string(),
                    reason: "Amount exceeds the supported range".to_string(),
                })
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("Database error: {}", message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                constraint_name: constraint.map(String::from),
            }),
        )
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"games_name_key\"\nDETAIL: Key (name)=(uno) already exists.",
            Some("games_name_key"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert game") {
            AppError::Conflict {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "game");
                assert_eq!(field, "name");
                assert_eq!(value, "uno");
            }
            other => panic!("Expected Conflict error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_becomes_validation() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"rentals\" violates foreign key constraint \"rentals_game_id_fkey\"\nDETAIL: Key (game_id)=(42) is not present in table \"games\".",
            Some("rentals_game_id_fkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert rental") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "game_id");
                assert!(reason.contains("42"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_not_null_violation_becomes_validation() {
        let error = database_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"phone\" violates not-null constraint",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert customer") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "phone");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_check_violation_becomes_validation() {
        let error = database_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"rentals\" violates check constraint \"rentals_days_rented_check\"",
            Some("rentals_days_rented_check"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert rental") {
            AppError::Validation { field, .. } => assert_eq!(field, "days_rented"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_overflow_becomes_validation() {
        let error = database_error(
            DatabaseErrorKind::Unknown,
            "numeric field overflow",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "update rental") {
            AppError::Validation { field, .. } => assert_eq!(field, "amount"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_unique_violation_stays_database_error() {
        let error = database_error(DatabaseErrorKind::UniqueViolation, "duplicate key", None);

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert game"),
            AppError::Database { .. }
        ));
    }

    #[test]
    fn test_other_errors_become_database_error() {
        let error = DieselError::RollbackTransaction;
        match DatabaseErrorConverter::convert_diesel_error(error, "update rental") {
            AppError::Database { operation, .. } => assert_eq!(operation, "update rental"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
