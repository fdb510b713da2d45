//! # End-to-End Flow Tests
//!
//! The complete read/write paths:
//!
//! ```text
//! UI ──read──→ [Cache (ab-04)] ──miss──→ [Query (ab-03)]
//!                                             │ filters
//!                                             ↓
//!                                     [Gateway (ab-01)] ──→ index + payloads
//!                                             │
//!                                             ↓
//!                                      [Codec (ab-02)] ──→ typed entities
//!
//! UI ──write──→ [Cache] ──→ [Query] ──encode+tag──→ [Gateway] ──sign──→ ledger
//!                   └──────── invalidate affected identities ←────────┘
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{stack_with_session, stack_without_session};
    use ab_04_cache::{QueryKey, QueryStatus};
    use shared_types::{LedgerError, PostDraft, ProfileDraft};

    /// Opt-in log output while debugging a flow (`RUST_LOG=debug`).
    fn init_tracing() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init();
        });
    }

    fn profile_draft(name: &str) -> ProfileDraft {
        ProfileDraft {
            name: name.to_string(),
            bio: "writes about ledgers".to_string(),
            join_date: String::new(),
        }
    }

    fn post_draft(title: &str, labels: &[&str]) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            description: "a description".to_string(),
            content: "long form content".to_string(),
            tags: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn onboarding_creates_a_profile_and_makes_it_visible() {
        init_tracing();
        let stack = stack_with_session("addr-ada");

        // First visit: no profile yet, and the absence is itself cached.
        assert!(stack.cache.profile(Some("addr-ada")).await.unwrap().is_none());
        assert_eq!(stack.ledger.fetch_by_tags_calls(), 1);

        let tx = stack
            .cache
            .create_profile(&profile_draft("Ada"), "addr-ada")
            .await
            .unwrap();
        assert!(stack.ledger.contains(&tx));

        // The mutation invalidated the identity, so this read refetches
        // and sees the new record.
        let profile = stack.cache.profile(Some("addr-ada")).await.unwrap().unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.join_date, "November 14, 2023");
    }

    #[tokio::test]
    async fn publishing_stamps_authorship_and_refreshes_the_feed() {
        init_tracing();
        let stack = stack_with_session("addr-ada");
        stack
            .cache
            .create_profile(&profile_draft("Ada"), "addr-ada")
            .await
            .unwrap();

        stack.cache.feed(10).await.unwrap();

        stack
            .cache
            .create_blog_post(&post_draft("first", &[]), "addr-ada")
            .await
            .unwrap();
        stack.clock.advance(60_000);
        stack
            .cache
            .create_blog_post(&post_draft("second", &[]), "addr-ada")
            .await
            .unwrap();

        assert_eq!(
            stack.cache.snapshot(&QueryKey::Feed { limit: 10 }).status,
            QueryStatus::Stale
        );

        let feed = stack.cache.feed(10).await.unwrap();
        let titles: Vec<&str> = feed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert!(feed.iter().all(|p| p.author_name == "Ada"));
        assert!(feed.iter().all(|p| p.author == "addr-ada"));

        let mine = stack.cache.user_posts(Some("addr-ada")).await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn publishing_without_a_profile_falls_back_to_anonymous() {
        init_tracing();
        let stack = stack_with_session("addr-new");
        stack
            .cache
            .create_blog_post(&post_draft("hello", &[]), "addr-new")
            .await
            .unwrap();

        let feed = stack.cache.feed(10).await.unwrap();
        assert_eq!(feed[0].author_name, "Anonymous");
    }

    #[tokio::test]
    async fn writes_without_a_session_fail_before_reaching_the_ledger() {
        init_tracing();
        let stack = stack_without_session();

        let err = stack
            .cache
            .create_profile(&profile_draft("Ada"), "addr-ada")
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::NoSignerAvailable);

        let err = stack
            .cache
            .create_blog_post(&post_draft("hello", &[]), "addr-ada")
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::NoSignerAvailable);

        assert_eq!(stack.ledger.submit_calls(), 0);
    }

    #[tokio::test]
    async fn concurrent_first_reads_hit_the_index_once() {
        init_tracing();
        let stack = stack_with_session("addr-ada");
        let (a, b) = tokio::join!(
            stack.cache.profile(Some("addr-ada")),
            stack.cache.profile(Some("addr-ada"))
        );
        assert!(a.unwrap().is_none());
        assert!(b.unwrap().is_none());
        assert_eq!(stack.ledger.fetch_by_tags_calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_of_an_existing_profile_fetch_its_payload_once() {
        init_tracing();
        let stack = stack_with_session("addr-ada");
        stack
            .cache
            .create_profile(&profile_draft("Ada"), "addr-ada")
            .await
            .unwrap();
        let base_index = stack.ledger.fetch_by_tags_calls();
        let base_payload = stack.ledger.fetch_payload_calls();

        let (a, b) = tokio::join!(
            stack.cache.profile(Some("addr-ada")),
            stack.cache.profile(Some("addr-ada"))
        );
        assert_eq!(a.unwrap().unwrap().name, "Ada");
        assert_eq!(b.unwrap().unwrap().name, "Ada");
        assert_eq!(stack.ledger.fetch_by_tags_calls() - base_index, 1);
        assert_eq!(stack.ledger.fetch_payload_calls() - base_payload, 1);
    }

    #[tokio::test]
    async fn an_unreachable_post_drops_out_of_the_feed_without_failing_it() {
        init_tracing();
        let stack = stack_with_session("addr-ada");
        for title in ["a", "b", "c"] {
            stack
                .cache
                .create_blog_post(&post_draft(title, &[]), "addr-ada")
                .await
                .unwrap();
            stack.clock.advance(1_000);
        }
        let feed = stack.cache.feed(10).await.unwrap();
        assert_eq!(feed.len(), 3);

        stack.ledger.break_payload(feed[1].id.clone());
        stack.cache.invalidate(&QueryKey::Feed { limit: 10 });

        let survivors = stack.cache.feed(10).await.unwrap();
        let titles: Vec<&str> = survivors.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn label_discovery_finds_posts_through_their_tags() {
        init_tracing();
        let stack = stack_with_session("addr-ada");
        stack
            .cache
            .create_blog_post(&post_draft("rusty", &["rust", "systems"]), "addr-ada")
            .await
            .unwrap();
        stack
            .cache
            .create_blog_post(&post_draft("tasty", &["cooking"]), "addr-ada")
            .await
            .unwrap();

        let rust_posts = stack.cache.labeled_posts(Some("rust")).await.unwrap();
        assert_eq!(rust_posts.len(), 1);
        assert_eq!(rust_posts[0].title, "rusty");
    }
}
