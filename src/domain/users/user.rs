use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

/// Treats a missing or blank image as "use the default".
pub fn image_or_default(url: Option<&str>, default: &str) -> String {
    match url.map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => default.to_string(),
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username is required.".into());
    }
    if trimmed.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters."
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("Username cannot contain spaces.".into());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err("Invalid email address.".into())
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: Uuid::nil(),
            username: "testuser".into(),
            email: "test@test.com".into(),
            image_url: DEFAULT_IMAGE_URL.into(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.into(),
            bio: None,
            location: None,
        }
    }

    #[test]
    fn display_matches_repr_format() {
        let user = sample();
        assert_eq!(
            user.to_string(),
            "<User #00000000-0000-0000-0000-000000000000: testuser, test@test.com>"
        );
    }

    #[test]
    fn blank_image_falls_back_to_default() {
        assert_eq!(image_or_default(None, DEFAULT_IMAGE_URL), DEFAULT_IMAGE_URL);
        assert_eq!(image_or_default(Some("  "), DEFAULT_IMAGE_URL), DEFAULT_IMAGE_URL);
        assert_eq!(image_or_default(Some("/me.png"), DEFAULT_IMAGE_URL), "/me.png");
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("test@test.com").is_ok());
        assert!(validate_email("HASHED_PASSWORD").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("testuser").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"x".repeat(MAX_USERNAME_LEN + 1)).is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("testuser").is_ok());
    }
}
