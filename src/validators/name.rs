use super::ValidationError;

const MAX_TEAM_NAME_LEN: usize = 100;

pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::TeamNameEmpty);
    }

    if trimmed.chars().count() > MAX_TEAM_NAME_LEN {
        return Err(ValidationError::TeamNameTooLong);
    }

    Ok(())
}

pub fn validate_avatar_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::AvatarUrlEmpty);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_names() {
        assert!(validate_team_name("Acme").is_ok());
        assert!(validate_team_name("Équipe Été").is_ok());
        assert_eq!(validate_team_name("  "), Err(ValidationError::TeamNameEmpty));
        assert_eq!(
            validate_team_name(&"x".repeat(101)),
            Err(ValidationError::TeamNameTooLong)
        );
        assert!(validate_team_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_avatar_url() {
        assert!(validate_avatar_url("https://cdn.example.com/a.png").is_ok());
        assert_eq!(validate_avatar_url(""), Err(ValidationError::AvatarUrlEmpty));
    }
}
