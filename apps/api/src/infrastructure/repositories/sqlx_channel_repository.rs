use crate::domain::{
    channel::{
        entity::{Channel, ChannelUpdate, NewChannel},
        repository::ChannelRepository,
    },
    shared::{
        errors::DomainError,
        reaction::{ReactionSets, normalize_set},
    },
};
use crate::infrastructure::database::unique_violation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{info, instrument};
use uuid::Uuid;

const CHANNEL_COLUMNS: &str = "c.id, c.channel_name, c.owner_id, c.description, \
     c.channel_banner, c.channel_avatar, c.subscribers, c.subscribed_by, \
     c.created_at, c.updated_at";

#[derive(Debug, FromRow)]
struct ChannelRow {
    id: Uuid,
    channel_name: String,
    owner_id: Uuid,
    description: String,
    channel_banner: Option<String>,
    channel_avatar: Option<String>,
    subscribers: i64,
    subscribed_by: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChannelRow> for Channel {
    fn from(row: ChannelRow) -> Self {
        let subscribed_by = normalize_set(&row.subscribed_by);
        if row.subscribers != subscribed_by.len() as i64 {
            tracing::debug!(
                channel_id = %row.id,
                stored = row.subscribers,
                actual = subscribed_by.len(),
                "Channel subscriber counter out of sync with set"
            );
        }
        Channel {
            id: row.id,
            channel_name: row.channel_name,
            owner_id: row.owner_id,
            description: row.description,
            channel_banner: row.channel_banner,
            channel_avatar: row.channel_avatar,
            subscribers: subscribed_by.len() as i64,
            subscribed_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_unique(e: sqlx::Error) -> DomainError {
    match unique_violation(&e).as_deref() {
        Some("channels_owner_id_key") => {
            DomainError::ValidationError("User already has a channel".into())
        }
        Some(_) => DomainError::ValidationError("Channel name is already taken".into()),
        None => e.into(),
    }
}

pub struct SqlxChannelRepository {
    pub pool: PgPool,
}

impl SqlxChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxChannelRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for SqlxChannelRepository {
    #[instrument(skip(self, channel), fields(owner_id = %channel.owner_id))]
    async fn create(&self, channel: &NewChannel) -> Result<Channel, DomainError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO channels AS c (id, channel_name, owner_id, description) \
             VALUES ($1, $2, $3, $4) RETURNING {CHANNEL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&channel.channel_name)
            .bind(channel.owner_id)
            .bind(&channel.description)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique)?;

        sqlx::query("UPDATE users SET channel_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(channel.owner_id)
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(channel_id = %row.id, "Created channel");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, DomainError> {
        let sql = format!("SELECT {CHANNEL_COLUMNS} FROM channels c WHERE c.id = $1");
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Channel::from))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Channel>, DomainError> {
        let sql = format!("SELECT {CHANNEL_COLUMNS} FROM channels c WHERE c.owner_id = $1");
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Channel::from))
    }

    async fn update(
        &self,
        id: Uuid,
        update: &ChannelUpdate,
    ) -> Result<Option<Channel>, DomainError> {
        let sql = format!(
            "UPDATE channels AS c SET \
                channel_name = COALESCE($2, c.channel_name), \
                description = COALESCE($3, c.description), \
                channel_banner = COALESCE($4, c.channel_banner), \
                channel_avatar = COALESCE($5, c.channel_avatar), \
                updated_at = NOW() \
             WHERE c.id = $1 RETURNING {CHANNEL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(id)
            .bind(update.channel_name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.channel_banner.as_deref())
            .bind(update.channel_avatar.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique)?;
        Ok(row.map(Channel::from))
    }

    #[instrument(skip(self, sets), fields(subscribers = sets.positive_count()))]
    async fn save_subscribers(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Channel>, DomainError> {
        let sql = format!(
            "UPDATE channels AS c SET subscribed_by = $2, subscribers = $3, updated_at = NOW() \
             WHERE c.id = $1 RETURNING {CHANNEL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(id)
            .bind(Json(sets.positive()))
            .bind(sets.positive_count())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Channel::from))
    }
}
