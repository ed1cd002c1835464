//! Model name resolution.

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "nano-banana";

/// Short name aliases for Gemini image models.
const ALIASES: &[(&str, &str)] = &[
    ("nano-banana", "gemini-2.5-flash-image"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
///
/// # Errors
///
/// Returns an error if the name is neither an alias nor a `gemini-*` id.
pub fn resolve_model(name: &str) -> Result<String, String> {
    if let Some(&(_, full)) = ALIASES.iter().find(|(alias, _)| *alias == name) {
        return Ok(full.to_string());
    }
    if name.starts_with("gemini") {
        Ok(name.to_string())
    } else {
        let aliases: Vec<&str> = ALIASES.iter().map(|(alias, _)| *alias).collect();
        Err(format!(
            "Unknown model '{name}'. Expected a 'gemini-*' id or one of: {}",
            aliases.join(", ")
        ))
    }
}
