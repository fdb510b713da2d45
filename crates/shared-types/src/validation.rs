//! # Client-Side Validation
//!
//! The ledger accepts any payload; these rules are the only integrity the
//! platform has. Every rule runs before the first network call so a bad
//! draft never costs a gateway round-trip.

use crate::entities::{PostDraft, ProfileDraft};
use crate::errors::LedgerError;

/// Maximum profile bio length, in characters.
pub const MAX_BIO_LEN: usize = 100;

/// Reject an empty or missing address before any write.
pub fn require_address(address: &str) -> Result<(), LedgerError> {
    if address.trim().is_empty() {
        return Err(LedgerError::NoSignerAvailable);
    }
    Ok(())
}

/// Validate a profile draft: non-empty name, bio within the cap.
pub fn validate_profile_draft(draft: &ProfileDraft) -> Result<(), LedgerError> {
    if draft.name.trim().is_empty() {
        return Err(LedgerError::Validation {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    let bio_len = draft.bio.chars().count();
    if bio_len > MAX_BIO_LEN {
        return Err(LedgerError::Validation {
            field: "bio",
            reason: format!("{} characters exceeds the {} character limit", bio_len, MAX_BIO_LEN),
        });
    }
    Ok(())
}

/// Validate a post draft: title, description, and content are required.
/// Content has no length cap.
pub fn validate_post_draft(draft: &PostDraft) -> Result<(), LedgerError> {
    for (field, value) in [
        ("title", &draft.title),
        ("description", &draft.description),
        ("content", &draft.content),
    ] {
        if value.trim().is_empty() {
            return Err(LedgerError::Validation {
                field,
                reason: "must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_draft(name: &str, bio: &str) -> ProfileDraft {
        ProfileDraft {
            name: name.to_string(),
            bio: bio.to_string(),
            join_date: String::new(),
        }
    }

    #[test]
    fn test_bio_at_limit_is_accepted() {
        let draft = profile_draft("Ada", &"x".repeat(MAX_BIO_LEN));
        assert!(validate_profile_draft(&draft).is_ok());
    }

    #[test]
    fn test_bio_over_limit_is_rejected() {
        let draft = profile_draft("Ada", &"x".repeat(MAX_BIO_LEN + 1));
        let err = validate_profile_draft(&draft).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "bio", .. }));
    }

    #[test]
    fn test_bio_limit_counts_characters_not_bytes() {
        // 100 multi-byte characters is still within the limit.
        let draft = profile_draft("Ada", &"é".repeat(MAX_BIO_LEN));
        assert!(validate_profile_draft(&draft).is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = validate_profile_draft(&profile_draft("  ", "")).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_post_draft_requires_all_text_fields() {
        let mut draft = PostDraft {
            title: "t".into(),
            description: "d".into(),
            content: "c".into(),
            tags: vec![],
        };
        assert!(validate_post_draft(&draft).is_ok());

        draft.content.clear();
        let err = validate_post_draft(&draft).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "content", .. }));
    }

    #[test]
    fn test_empty_address_maps_to_no_signer() {
        assert_eq!(require_address("").unwrap_err(), LedgerError::NoSignerAvailable);
        assert!(require_address("k2tAv").is_ok());
    }
}
