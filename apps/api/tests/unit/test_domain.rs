use serde_json::json;
use uuid::Uuid;
use vidshare::domain::{
    shared::{
        errors::DomainError,
        ownership::authorize,
        pagination::PageRequest,
        reaction::{Polarity, ReactionSets},
    },
    user::value_objects::Email,
    video::duration::{is_canonical, normalize_duration},
};

#[test]
fn like_then_dislike_moves_the_actor() {
    let a = Uuid::now_v7();
    let mut sets = ReactionSets::with_negative(vec![], vec![]);

    sets.toggle(a, Polarity::Positive).unwrap();
    assert_eq!(sets.positive(), &[a]);
    assert_eq!(sets.positive_count(), 1);

    let outcome = sets.toggle(a, Polarity::Negative).unwrap();
    assert!(outcome.cleared_opposite);
    assert_eq!(sets.positive_count(), 0);
    assert_eq!(sets.negative(), &[a]);
    assert_eq!(sets.negative_count(), 1);
}

#[test]
fn stored_garbage_reads_as_empty_sets() {
    let sets = ReactionSets::from_stored(&json!("liked"), Some(&json!({ "x": 1 })));
    assert_eq!(sets.positive_count(), 0);
    assert_eq!(sets.negative_count(), 0);
    assert!(sets.supports_negative());
}

#[test]
fn positive_only_sets_refuse_negative_toggles() {
    let mut sets = ReactionSets::positive_only(vec![]);
    assert!(matches!(
        sets.toggle(Uuid::now_v7(), Polarity::Negative),
        Err(DomainError::ValidationError(_))
    ));
}

#[test]
fn ownership_is_identity_comparison() {
    struct Clip(Uuid);
    impl vidshare::domain::shared::ownership::Owned for Clip {
        fn owner_id(&self) -> Uuid {
            self.0
        }
        fn resource_name(&self) -> &'static str {
            "clip"
        }
    }

    let u1 = Uuid::now_v7();
    let u2 = Uuid::now_v7();
    assert!(authorize(&Clip(u1), u1));
    assert!(!authorize(&Clip(u1), u2));
}

#[test]
fn legacy_durations_normalize() {
    assert_eq!(normalize_duration(&json!("3:07")), 187);
    assert_eq!(normalize_duration(&json!(42)), 42);
    assert_eq!(normalize_duration(&json!(null)), 0);
    assert!(is_canonical(&json!(42)));
    assert!(!is_canonical(&json!("3:07")));
}

#[test]
fn page_requests_are_clamped() {
    let page = PageRequest::new(Some(3), Some(500));
    assert_eq!(page.limit, 100);
    assert_eq!(page.offset(), 200);
    assert_eq!(PageRequest::new(None, None).pages(41), 3);
}

#[test]
fn emails_are_trimmed_and_lowercased() {
    assert_eq!(Email::new(" Bob@Mail.IO ").unwrap().value, "bob@mail.io");
    assert!(Email::new("bob@@mail.io").is_err());
}
