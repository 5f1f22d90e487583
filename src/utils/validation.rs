use crate::utils::error::{Result, SalonError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SalonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SalonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SalonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Store fields are space-delimited, so usernames and passwords may not be
/// empty or contain whitespace.
pub fn validate_credential(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SalonError::ValidationError {
            message: format!("{} cannot be empty.", field_name),
        });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SalonError::ValidationError {
            message: format!("{} cannot contain spaces.", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.path", "users.txt").is_ok());
        assert!(validate_path("store.path", "data/users.txt").is_ok());
        assert!(validate_path("store.path", "").is_err());
        assert!(validate_path("store.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("salon.name", "Salon").is_ok());
        assert!(validate_non_empty_string("salon.name", "").is_err());
        assert!(validate_non_empty_string("salon.name", "   ").is_err());
    }

    #[test]
    fn test_validate_credential() {
        assert!(validate_credential("Username", "mira").is_ok());
        assert!(validate_credential("Username", "").is_err());
        assert!(validate_credential("Username", "two words").is_err());
        assert!(validate_credential("Password", "tab\there").is_err());
    }
}
