//! # Profile Codec
//!
//! The profile payload embeds the owning address at write time, so a
//! decoded profile is self-describing without consulting the transaction's
//! tags.

use shared_types::{Address, LedgerError, Profile, ProfileDraft};

/// Encode a profile draft plus its owning address into the JSON payload
/// stored on the ledger.
pub fn encode_profile(draft: &ProfileDraft, address: &Address) -> Result<Vec<u8>, LedgerError> {
    let profile = Profile {
        address: address.clone(),
        name: draft.name.clone(),
        join_date: draft.join_date.clone(),
        bio: draft.bio.clone(),
    };
    serde_json::to_vec(&profile)
        .map_err(|e| LedgerError::MalformedPayload(format!("profile encode: {}", e)))
}

/// Decode a profile payload. Any shape drift fails the record.
pub fn decode_profile(payload: &[u8]) -> Result<Profile, LedgerError> {
    serde_json::from_slice(payload)
        .map_err(|e| LedgerError::MalformedPayload(format!("profile decode: {}", e)))
}
