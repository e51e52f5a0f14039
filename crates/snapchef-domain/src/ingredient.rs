//! Ingredient naming.

/// Normalize an ingredient name into its unique-key form.
///
/// Trims, collapses inner whitespace runs to a single space and lower-cases.
/// Two names that differ only by case or spacing map to the same key, so the
/// `ingredients.name` unique index holds one row per ingredient.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
