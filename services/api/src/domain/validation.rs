//! Field checks shared by the use cases. Each returns the cleaned value or a
//! `VALIDATION_FAILED` error naming the field.

use std::collections::HashSet;

use snapchef_domain::ingredient::normalize_name;

use crate::domain::types::{IngredientLine, Step};
use crate::error::ApiError;

pub const EMAIL_MAX_LEN: usize = 254;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const BIO_MAX_LEN: usize = 500;
pub const URL_MAX_LEN: usize = 2048;
pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 5000;
pub const COOKING_TIME_RANGE: std::ops::RangeInclusive<i32> = 1..=1440;
pub const SERVINGS_RANGE: std::ops::RangeInclusive<i32> = 1..=100;
pub const QUANTITY_MAX_LEN: usize = 50;
pub const UNIT_MAX_LEN: usize = 30;
pub const INGREDIENT_NAME_MAX_LEN: usize = 100;
pub const COMMENT_MAX_LEN: usize = 2000;
pub const RATING_RANGE: std::ops::RangeInclusive<i16> = 0..=5;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Trim and lower-case an email address.
pub fn email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid || email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return Err(ApiError::validation("email is invalid"));
    }
    Ok(email)
}

pub fn username(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    let len = char_len(name);
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ApiError::validation(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ApiError::validation(
            "username may contain only letters, digits and underscores",
        ));
    }
    Ok(name.to_owned())
}

/// Passwords are not trimmed.
pub fn password(raw: &str) -> Result<(), ApiError> {
    let len = char_len(raw);
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(ApiError::validation(format!(
            "password must be {PASSWORD_MIN_LEN}-{PASSWORD_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Optional free text: blank becomes `None`, otherwise trimmed and bounded.
pub fn optional_text(
    field: &str,
    raw: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, ApiError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if char_len(value) > max_len {
        return Err(ApiError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(Some(value.to_owned()))
}

pub fn title(raw: &str) -> Result<String, ApiError> {
    let title = raw.trim();
    if title.is_empty() || char_len(title) > TITLE_MAX_LEN {
        return Err(ApiError::validation(format!(
            "title must be 1-{TITLE_MAX_LEN} characters"
        )));
    }
    Ok(title.to_owned())
}

pub fn cooking_time(minutes: i32) -> Result<i32, ApiError> {
    if !COOKING_TIME_RANGE.contains(&minutes) {
        return Err(ApiError::validation(
            "cooking_time must be between 1 and 1440 minutes",
        ));
    }
    Ok(minutes)
}

pub fn servings(servings: i32) -> Result<i32, ApiError> {
    if !SERVINGS_RANGE.contains(&servings) {
        return Err(ApiError::validation("servings must be between 1 and 100"));
    }
    Ok(servings)
}

/// Steps must be numbered exactly `1..=N` in any input order.
///
/// Returns them sorted by `order_index` with trimmed content.
pub fn steps(mut steps: Vec<Step>) -> Result<Vec<Step>, ApiError> {
    if steps.is_empty() {
        return Err(ApiError::validation("at least one step is required"));
    }
    steps.sort_by_key(|s| s.order_index);
    for (expected, step) in (1..).zip(steps.iter()) {
        if step.order_index != expected {
            return Err(ApiError::validation(
                "step order_index values must be unique and contiguous starting at 1",
            ));
        }
    }
    steps
        .into_iter()
        .map(|step| {
            let content = step.content.trim();
            if content.is_empty() {
                return Err(ApiError::validation(format!(
                    "step {} content must not be empty",
                    step.order_index
                )));
            }
            Ok(Step {
                order_index: step.order_index,
                content: content.to_owned(),
                image_url: optional_text("step image_url", step.image_url.as_deref(), URL_MAX_LEN)?,
            })
        })
        .collect()
}

/// Normalize names and reject duplicates after normalization.
pub fn ingredients(lines: Vec<IngredientLine>) -> Result<Vec<IngredientLine>, ApiError> {
    let mut seen = HashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .map(|line| {
            let name = normalize_name(&line.name);
            if name.is_empty() || char_len(&name) > INGREDIENT_NAME_MAX_LEN {
                return Err(ApiError::validation(format!(
                    "ingredient name must be 1-{INGREDIENT_NAME_MAX_LEN} characters"
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(ApiError::validation(format!(
                    "ingredient '{name}' is listed more than once"
                )));
            }
            let quantity = line.quantity.trim();
            if quantity.is_empty() || char_len(quantity) > QUANTITY_MAX_LEN {
                return Err(ApiError::validation(format!(
                    "quantity for '{name}' must be 1-{QUANTITY_MAX_LEN} characters"
                )));
            }
            Ok(IngredientLine {
                quantity: quantity.to_owned(),
                unit: optional_text("unit", line.unit.as_deref(), UNIT_MAX_LEN)?,
                name,
            })
        })
        .collect()
}

pub fn comment_content(raw: &str) -> Result<String, ApiError> {
    let content = raw.trim();
    if content.is_empty() || char_len(content) > COMMENT_MAX_LEN {
        return Err(ApiError::validation(format!(
            "content must be 1-{COMMENT_MAX_LEN} characters"
        )));
    }
    Ok(content.to_owned())
}

pub fn rating(rating: i16) -> Result<i16, ApiError> {
    if !RATING_RANGE.contains(&rating) {
        return Err(ApiError::validation("rating must be between 0 and 5"));
    }
    Ok(rating)
}
