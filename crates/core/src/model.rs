//! Model (persona) naming rules.
//!
//! A model's slug and default dataset directory are never stored; they are
//! recomputed from `(name, token, dataset_root)` wherever they are needed, so
//! both functions here must stay pure.

use crate::error::CoreError;

/// Slug used when neither the name nor the token contributes any characters.
pub const FALLBACK_SLUG: &str = "model";

/// Dataset root used when the configured root is blank.
pub const DEFAULT_DATASET_ROOT: &str = "datasets";

/// Lowercase `value` and collapse every run of characters outside `[a-z0-9]`
/// into a single `-`, trimming dashes from both ends.
fn sanitize_fragment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Derive the slug for a model from its display name and trigger token.
///
/// ```
/// use studionova_core::model::model_slug;
///
/// assert_eq!(model_slug("Ava", "@ava"), "ava-ava");
/// assert_eq!(model_slug("Aurelia Nova", "@aurelia"), "aurelia-nova-aurelia");
/// assert_eq!(model_slug("", "!!"), "model");
/// ```
pub fn model_slug(name: &str, token: &str) -> String {
    let fragments: Vec<String> = [name, token]
        .iter()
        .map(|fragment| sanitize_fragment(fragment))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    if fragments.is_empty() {
        return FALLBACK_SLUG.to_string();
    }

    let slug = sanitize_fragment(&fragments.join("-"));
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Join `slug` onto the dataset root, dropping trailing path separators from
/// the root. A blank root falls back to [`DEFAULT_DATASET_ROOT`].
pub fn default_dataset_path(slug: &str, root: &str) -> String {
    let root = match root.trim() {
        "" => DEFAULT_DATASET_ROOT,
        trimmed => trimmed,
    };
    let root = root.trim_end_matches(['/', '\\']);
    format!("{root}/{slug}")
}

/// Return the trimmed value, or `None` when it is absent or blank.
pub fn trimmed_non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalized fields for a new model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFields {
    pub name: String,
    pub token: String,
    pub description: Option<String>,
}

/// Trim and validate the user-supplied fields of a new model.
///
/// Name and trigger token must be non-empty after trimming. A blank
/// description is stored as `None`.
pub fn validate_model_fields(
    name: Option<&str>,
    token: Option<&str>,
    description: Option<&str>,
) -> Result<ModelFields, CoreError> {
    let name = trimmed_non_empty(name)
        .ok_or_else(|| CoreError::Validation("Name is required.".to_string()))?;
    let token = trimmed_non_empty(token)
        .ok_or_else(|| CoreError::Validation("Trigger token is required.".to_string()))?;

    Ok(ModelFields {
        name,
        token,
        description: trimmed_non_empty(description),
    })
}
