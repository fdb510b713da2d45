//! Round-trip laws for the entity codecs, over arbitrary valid inputs.

use ab_02_entity_codec::{decode_post, decode_profile, encode_post, encode_profile};
use proptest::prelude::*;
use shared_types::{PostDraft, ProfileDraft, MAX_BIO_LEN};

fn valid_profile_draft() -> impl Strategy<Value = ProfileDraft> {
    (
        "[a-zA-Z0-9 ]{1,40}",
        proptest::collection::vec(any::<char>(), 0..=MAX_BIO_LEN),
        "[A-Za-z0-9, ]{0,20}",
    )
        .prop_map(|(name, bio, join_date)| ProfileDraft {
            name,
            bio: bio.into_iter().collect(),
            join_date,
        })
}

fn valid_post_draft() -> impl Strategy<Value = PostDraft> {
    (
        "\\PC{1,60}",
        "\\PC{1,120}",
        "\\PC{1,400}",
        proptest::collection::vec("[a-z]{1,12}", 0..6),
    )
        .prop_map(|(title, description, content, tags)| PostDraft {
            title,
            description,
            content,
            tags,
        })
}

proptest! {
    #[test]
    fn profile_round_trip_preserves_every_field(
        draft in valid_profile_draft(),
        address in "[a-zA-Z0-9_-]{10,43}",
    ) {
        let payload = encode_profile(&draft, &address).unwrap();
        let decoded = decode_profile(&payload).unwrap();
        prop_assert_eq!(decoded.address, address);
        prop_assert_eq!(decoded.name, draft.name);
        prop_assert_eq!(decoded.bio, draft.bio);
        prop_assert_eq!(decoded.join_date, draft.join_date);
    }

    #[test]
    fn post_round_trip_preserves_fields_and_takes_supplied_id(
        draft in valid_post_draft(),
        author in "[a-zA-Z0-9_-]{10,43}",
        author_name in "\\PC{1,40}",
        timestamp in any::<u64>(),
        id in "[a-zA-Z0-9_-]{10,43}",
    ) {
        let payload = encode_post(&draft, &author, &author_name, timestamp).unwrap();
        let post = decode_post(&payload, id.clone()).unwrap();
        prop_assert_eq!(post.id, id);
        prop_assert_eq!(post.title, draft.title);
        prop_assert_eq!(post.description, draft.description);
        prop_assert_eq!(post.content, draft.content);
        prop_assert_eq!(post.tags, draft.tags);
        prop_assert_eq!(post.author, author);
        prop_assert_eq!(post.author_name, author_name);
        prop_assert_eq!(post.timestamp, timestamp);
    }
}
