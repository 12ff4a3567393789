use super::entity::{NewUser, ProfileUpdate, User};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with a validation error when the email is already registered.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Users for the given ids, in the order given; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<User>, DomainError>;
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DomainError>;
    /// Store `actor`'s subscription list and recount `target`'s subscribers
    /// in one transaction. Returns the target's new subscriber count.
    async fn save_subscriptions(
        &self,
        actor: Uuid,
        subscribed_to: &[Uuid],
        target: Uuid,
    ) -> Result<i64, DomainError>;
    /// Make `video` present in (or absent from) `user`'s liked list.
    async fn set_liked_video(&self, user: Uuid, video: Uuid, liked: bool)
    -> Result<(), DomainError>;
}
