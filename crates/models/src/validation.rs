use crate::errors::ModelError;

/// Longest name accepted for any entity; matches the `string_len` columns.
pub const MAX_NAME_LEN: usize = 128;

/// Trim `name` and check it is non-empty and fits the column.
pub fn validate_name(entity: &str, name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation(format!("{entity} name required")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("{entity} name longer than {MAX_NAME_LEN} characters")));
    }
    Ok(trimmed.to_string())
}
