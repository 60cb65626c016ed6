pub mod dto;
pub mod filter;
pub mod model;
pub mod queries;
pub mod routes;

/// A task title must contain at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("title is required".to_string());
    }

    Ok(())
}
