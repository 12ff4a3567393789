use super::dto::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, SearchUsersQuery, SubscriptionOutcome};
use crate::application::non_empty;
use crate::domain::shared::{errors::DomainError, reaction::toggle_member};
use crate::domain::user::{
    entity::{User, UserProfile},
    repository::UserRepository,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserUseCase {
    users: Arc<dyn UserRepository>,
}

fn not_found() -> DomainError {
    DomainError::NotFound("User not found".into())
}

impl UserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, id: Uuid) -> Result<UserProfile, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .map(|u| u.profile())
            .ok_or_else(not_found)
    }

    pub async fn search(&self, query: SearchUsersQuery) -> Result<Vec<UserProfile>, DomainError> {
        let Some(term) = non_empty(query.query) else {
            return Ok(Vec::new());
        };
        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);
        let users = self.users.search(&term, limit).await?;
        Ok(users.iter().map(User::profile).collect())
    }

    /// Toggle `target` in the actor's subscription list.
    ///
    /// The list write and the target's subscriber recount share one
    /// transaction in the repository.
    pub async fn toggle_subscription(
        &self,
        actor: Uuid,
        target: Uuid,
    ) -> Result<SubscriptionOutcome, DomainError> {
        if actor == target {
            return Err(DomainError::ValidationError(
                "You cannot subscribe to yourself".into(),
            ));
        }

        let mut channel = self
            .users
            .find_by_id(target)
            .await?
            .ok_or_else(|| DomainError::NotFound("Channel not found".into()))?;
        let mut user = self.users.find_by_id(actor).await?.ok_or_else(not_found)?;

        let subscribed = toggle_member(&mut user.subscribed_to, target);
        channel.subscribers = self
            .users
            .save_subscriptions(actor, &user.subscribed_to, target)
            .await?;

        tracing::info!(
            actor = %actor,
            target = %target,
            subscribed,
            subscribers = channel.subscribers,
            "user subscription toggled"
        );
        Ok(SubscriptionOutcome {
            subscribed,
            user: user.profile(),
            channel: channel.profile(),
        })
    }

    /// Profiles the actor subscribes to, in subscription order.
    pub async fn subscriptions(&self, actor: Uuid) -> Result<Vec<UserProfile>, DomainError> {
        let user = self.users.find_by_id(actor).await?.ok_or_else(not_found)?;
        let subscribed = self.users.find_many(&user.subscribed_to).await?;
        Ok(subscribed.iter().map(User::profile).collect())
    }
}
