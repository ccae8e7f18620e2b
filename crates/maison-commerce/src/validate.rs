//! Form field validation shared by the storefront's forms.
//!
//! Every check returns `CommerceError::Validation` naming the field, so the
//! page can place the message next to the right input.

use crate::CommerceError;

type Result<T = ()> = std::result::Result<T, CommerceError>;

/// Field must contain something other than whitespace.
pub fn required(field: &str, value: &str) -> Result {
    if value.trim().is_empty() {
        return Err(CommerceError::validation(field, "is required"));
    }
    Ok(())
}

/// Trimmed character count must fall in `min..=max`.
pub fn length(field: &str, value: &str, min: usize, max: usize) -> Result {
    let len = value.trim().chars().count();
    if len < min {
        return Err(CommerceError::validation(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    if len > max {
        return Err(CommerceError::validation(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

/// A plausible email address: one `@`, non-empty local part, dotted domain.
pub fn email(field: &str, value: &str) -> Result {
    required(field, value)?;
    let value = value.trim();
    let invalid = || CommerceError::validation(field, "is not a valid email address");

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    if labels.last().map_or(true, |tld| tld.len() < 2) {
        return Err(invalid());
    }
    Ok(())
}

/// Phone number: optional leading `+`, then 10 to 15 digits. Spaces and
/// dashes are ignored.
pub fn phone(field: &str, value: &str) -> Result {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut count = 0;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => count += 1,
            ' ' | '-' => {}
            _ => return Err(CommerceError::validation(field, "may only contain digits")),
        }
    }
    if !(10..=15).contains(&count) {
        return Err(CommerceError::validation(
            field,
            "must have between 10 and 15 digits",
        ));
    }
    Ok(())
}

/// Optional phone: empty passes.
pub fn optional_phone(field: &str, value: Option<&str>) -> Result {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(v) => phone(field, v),
    }
}

/// Password strength: at least 8 characters with upper, lower and digit.
pub fn password(field: &str, value: &str) -> Result {
    if value.chars().count() < 8 {
        return Err(CommerceError::validation(
            field,
            "must be at least 8 characters",
        ));
    }

    let has_upper = value.chars().any(|c| c.is_uppercase());
    let has_lower = value.chars().any(|c| c.is_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if !has_upper || !has_lower || !has_digit {
        return Err(CommerceError::validation(
            field,
            "must contain uppercase, lowercase, and numbers",
        ));
    }

    Ok(())
}

/// Two fields must match (password confirmation).
pub fn matches(field: &str, value: &str, other: &str) -> Result {
    if value != other {
        return Err(CommerceError::validation(field, "does not match"));
    }
    Ok(())
}

/// Integer rating in `1..=5`.
pub fn rating(field: &str, value: u8) -> Result {
    if !(1..=5).contains(&value) {
        return Err(CommerceError::validation(field, "must be between 1 and 5"));
    }
    Ok(())
}

/// URL-safe slug: lowercase letters, digits and single dashes.
pub fn slug(field: &str, value: &str) -> Result {
    required(field, value)?;
    let ok = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--");
    if !ok {
        return Err(CommerceError::validation(
            field,
            "may only contain lowercase letters, digits and dashes",
        ));
    }
    Ok(())
}

/// Relative path or http(s) URL, as used in navigation and CTA links.
pub fn link(field: &str, value: &str) -> Result {
    required(field, value)?;
    let value = value.trim();
    if value.starts_with('/') || value.starts_with("https://") || value.starts_with("http://") {
        return Ok(());
    }
    Err(CommerceError::validation(
        field,
        "must be a path starting with / or an http(s) URL",
    ))
}

/// Run every check and keep all failures, for forms that show all errors at once.
pub fn collect(checks: impl IntoIterator<Item = Result>) -> std::result::Result<(), Vec<CommerceError>> {
    let errors: Vec<CommerceError> = checks.into_iter().filter_map(|r| r.err()).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("name", "Asha").is_ok());
        let err = required("name", "   ").unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(length("message", "hello there", 10, 20).is_ok());
        assert!(length("message", "short", 10, 20).is_err());
        assert!(length("message", &"x".repeat(21), 10, 20).is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("email", "asha@maison.in").is_ok());
        assert!(email("email", " asha.k+news@mail.example.com ").is_ok());
        for bad in ["", "asha", "@maison.in", "asha@", "asha@maison", "a@b.c", "a@@b.com", "a b@c.com", "a@b..com"] {
            assert!(email("email", bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_phone() {
        assert!(phone("phone", "+91 98765 43210").is_ok());
        assert!(phone("phone", "987-654-3210").is_ok());
        assert!(phone("phone", "12345").is_err());
        assert!(phone("phone", "98765abc10").is_err());
        assert!(optional_phone("phone", None).is_ok());
        assert!(optional_phone("phone", Some("  ")).is_ok());
        assert!(optional_phone("phone", Some("123")).is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(password("password", "Tailored9").is_ok());
        assert!(password("password", "Short1").is_err());
        assert!(password("password", "alllowercase1").is_err());
        assert!(password("password", "NoDigitsHere").is_err());
    }

    #[test]
    fn test_rating_and_slug() {
        assert!(rating("rating", 5).is_ok());
        assert!(rating("rating", 0).is_err());
        assert!(rating("rating", 6).is_err());
        assert!(slug("slug", "privacy-policy").is_ok());
        assert!(slug("slug", "Privacy").is_err());
        assert!(slug("slug", "-terms").is_err());
        assert!(slug("slug", "terms--of-use").is_err());
    }

    #[test]
    fn test_link() {
        assert!(link("href", "/collections/linen").is_ok());
        assert!(link("href", "https://instagram.com/maison").is_ok());
        assert!(link("href", "javascript:alert(1)").is_err());
    }

    #[test]
    fn test_collect_keeps_all_errors() {
        let errors = collect([required("name", ""), email("email", "nope"), rating("rating", 3)])
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), Some("name"));
        assert_eq!(errors[1].field(), Some("email"));
    }
}
