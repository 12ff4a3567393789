use super::json_sql::{as_array, contains_pattern, pull_id, push_id};
use crate::domain::{
    shared::{errors::DomainError, reaction::normalize_set},
    user::{
        entity::{NewUser, ProfileUpdate, User},
        repository::UserRepository,
    },
};
use crate::infrastructure::database::unique_violation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const USER_COLUMNS: &str = "u.id, u.name, u.email, u.password_hash, u.avatar, u.bio, \
     u.subscribers, u.subscribed_to, u.video_ids, u.liked_videos, u.channel_id, \
     u.created_at, u.updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    avatar: Option<String>,
    bio: String,
    subscribers: i64,
    subscribed_to: Json<Value>,
    video_ids: Json<Value>,
    liked_videos: Json<Value>,
    channel_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            avatar: row.avatar,
            bio: row.bio,
            subscribers: row.subscribers.max(0),
            subscribed_to: normalize_set(&row.subscribed_to),
            video_ids: normalize_set(&row.video_ids),
            liked_videos: normalize_set(&row.liked_videos),
            channel_id: row.channel_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxUserRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users AS u (id, name, email, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(_) => DomainError::ValidationError("Email is already in use".into()),
                None => e.into(),
            })?;
        info!(user_id = %row.id, "Registered user");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ANY($1)");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        let mut users: Vec<User> = rows.into_iter().map(User::from).collect();
        users.sort_by_key(|u| ids.iter().position(|id| *id == u.id));
        Ok(users)
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u \
             WHERE u.name ILIKE $1 OR u.email ILIKE $1 \
             ORDER BY u.name ASC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(contains_pattern(query))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "UPDATE users AS u SET \
                name = COALESCE($2, u.name), \
                bio = COALESCE($3, u.bio), \
                avatar = COALESCE($4, u.avatar), \
                updated_at = NOW() \
             WHERE u.id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.bio.as_deref())
            .bind(update.avatar.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    #[instrument(skip(self, subscribed_to), fields(count = subscribed_to.len()))]
    async fn save_subscriptions(
        &self,
        actor: Uuid,
        subscribed_to: &[Uuid],
        target: Uuid,
    ) -> Result<i64, DomainError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET subscribed_to = $2, updated_at = NOW() WHERE id = $1")
            .bind(actor)
            .bind(Json(subscribed_to.to_vec()))
            .execute(&mut *tx)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM users \
             WHERE {} @> jsonb_build_array($1::text)",
            as_array("subscribed_to")
        );
        let subscribers = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(target.to_string())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET subscribers = $2, updated_at = NOW() WHERE id = $1")
            .bind(target)
            .bind(subscribers)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(%target, subscribers, "Recounted user subscribers");
        Ok(subscribers)
    }

    async fn set_liked_video(
        &self,
        user: Uuid,
        video: Uuid,
        liked: bool,
    ) -> Result<(), DomainError> {
        let expr = if liked {
            push_id("liked_videos", "$2")
        } else {
            pull_id("liked_videos", "$2")
        };
        let sql = format!("UPDATE users SET liked_videos = {expr}, updated_at = NOW() WHERE id = $1");
        sqlx::query(&sql)
            .bind(user)
            .bind(video.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
