#[cfg(test)]
mod tests {
    use crate::errors::internal::{
        AddressFormatError, ConflictError, InternalError, NotFoundError, ValidationError,
    };
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_subnet", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_subnet"));
        assert!(error_string.contains("Database error"));
        assert!(error.is_storage());
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("audit snapshot", "unexpected end of input");

        let error_string = error.to_string();
        assert!(error_string.contains("audit snapshot"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_address_format_error_becomes_validation() {
        let error = InternalError::from(AddressFormatError::new("10.0.0.256"));

        assert!(matches!(
            error,
            InternalError::Validation(ValidationError::InvalidAddress(_))
        ));
        assert_eq!(error.to_string(), "Invalid IPv4 address: '10.0.0.256'");
        assert!(!error.is_storage());
    }

    #[test]
    fn test_range_too_large_message() {
        let error = ValidationError::RangeTooLarge { count: 1001, limit: 1000 };
        assert_eq!(
            error.to_string(),
            "Range too large: 1001 addresses requested, at most 1000 allowed"
        );
    }

    #[test]
    fn test_duplicate_address_message() {
        let error = ConflictError::DuplicateAddress("192.168.1.10".to_string());
        assert_eq!(error.to_string(), "Address 192.168.1.10 already exists");
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(NotFoundError::Subnet(3).to_string(), "Subnet not found: 3");
        assert_eq!(NotFoundError::AuditEntry(9).to_string(), "Audit entry not found: 9");
    }
}
