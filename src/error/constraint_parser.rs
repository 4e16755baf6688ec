use regex::Regex;
use std::sync::OnceLock;

/// Extracts entity and column information from PostgreSQL constraint errors.
///
/// Constraint names follow the PostgreSQL defaults used by the migrations:
/// `{table}_{column}_key` for unique indexes, `{table}_{column}_fkey` for
/// foreign keys and `{table}_{column}_check` for check constraints.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column_name: Regex,
}

static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> Option<&'static Patterns> {
        PATTERNS
            .get_or_init(|| {
                Some(Patterns {
                    // "Key (cpf)=(00011122233) already exists."
                    key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok()?,
                    column_name: Regex::new(r#"column "([^"]+)""#).ok()?,
                })
            })
            .as_ref()
    }

    /// Splits a constraint name into `(entity, column)`.
    ///
    /// The entity is the singular form of the table name, matching the
    /// entity names used by the services (`customers` -> `customer`).
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = ["_key", "_fkey", "_check"]
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if column.is_empty() {
            return None;
        }
        Some((singular(table), column.to_string()))
    }

    /// Parses a unique violation into `(entity, field, value)`.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (entity, field) = Self::parse_constraint_name(constraint_name?)?;
        let value = Self::extract_key_value_from_message(message)
            .map(|(_, value)| value)
            .unwrap_or_else(|| "duplicate_value".to_string());
        Some((entity, field, value))
    }

    /// Parses a foreign key violation into `(entity, column, referenced value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (entity, column) = Self::parse_constraint_name(constraint_name?)?;
        let value = Self::extract_key_value_from_message(message)
            .map(|(_, value)| value)
            .unwrap_or_else(|| "unknown".to_string());
        Some((entity, column, value))
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let captures = Self::patterns()?.key_value.captures(message)?;
        Some((captures[1].to_string(), captures[2].to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        let captures = Self::patterns()?.column_name.captures(message)?;
        Some(captures[1].to_string())
    }
}

fn singular(table: &str) -> String {
    table.strip_suffix('s').unwrap_or(table).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("customers_cpf_key"),
            Some(("customer".to_string(), "cpf".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("games_name_key"),
            Some(("game".to_string(), "name".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("rentals_customer_id_fkey"),
            Some(("rental".to_string(), "customer_id".to_string()))
        );
    }

    #[test]
    fn test_parse_constraint_name_rejects_unknown_shape() {
        assert_eq!(ConstraintParser::parse_constraint_name("rentals_pkey_idx"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("games_key"), None);
    }

    #[test]
    fn test_parse_unique_violation_extracts_value() {
        let message = "duplicate key value violates unique constraint \"customers_cpf_key\"\nDETAIL: Key (cpf)=(00011122233) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("customers_cpf_key")),
            Some((
                "customer".to_string(),
                "cpf".to_string(),
                "00011122233".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("duplicate key value", None),
            None
        );
    }

    #[test]
    fn test_extract_column_from_message() {
        let message = "null value in column \"cpf\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::extract_column_from_message(message),
            Some("cpf".to_string())
        );
    }
}
