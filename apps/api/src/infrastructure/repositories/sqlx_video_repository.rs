use super::json_sql::{as_array, contains_pattern, pull_id, push_id};
use crate::domain::{
    shared::{
        errors::DomainError,
        pagination::Page,
        reaction::{Reactable, ReactionSets, normalize_set},
    },
    video::{
        duration::normalize_duration,
        entity::{NewVideo, Video, VideoOwner, VideoQuery, VideoStatus, VideoUpdate, VideoView},
        repository::VideoRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "v.id, v.title, v.description, v.owner_id, v.video_url, \
     v.thumbnail, v.duration, v.views, v.liked_by, v.disliked_by, v.comment_ids, \
     v.status, v.tags, v.category, v.created_at, v.updated_at";

const OWNER_COLUMNS: &str =
    "u.name AS owner_name, u.avatar AS owner_avatar, u.subscribers AS owner_subscribers";

// Feed filter shared by the page query and its count.
const FEED_FILTER: &str = "v.status = 'published' \
     AND ($1::text IS NULL OR v.title ILIKE $2 OR v.description ILIKE $2 OR $1 = ANY(v.tags)) \
     AND ($3::text IS NULL OR v.category = $3)";

#[derive(Debug, FromRow)]
struct VideoRow {
    id: Uuid,
    title: String,
    description: String,
    owner_id: Uuid,
    video_url: String,
    thumbnail: Option<String>,
    duration: Json<Value>,
    views: i64,
    liked_by: Json<Value>,
    disliked_by: Json<Value>,
    comment_ids: Json<Value>,
    status: String,
    tags: Vec<String>,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        let status = row.status.parse().unwrap_or_else(|e| {
            warn!(video_id = %row.id, error = %e, "Unknown stored status, treating as private");
            VideoStatus::Private
        });
        let sets = ReactionSets::from_stored(&row.liked_by, Some(&row.disliked_by));

        let mut video = Video {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
            video_url: row.video_url,
            thumbnail: row.thumbnail,
            duration: normalize_duration(&row.duration),
            views: row.views.max(0),
            likes: 0,
            dislikes: 0,
            liked_by: Vec::new(),
            disliked_by: Vec::new(),
            comment_ids: normalize_set(&row.comment_ids),
            status,
            tags: row.tags,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        video.apply_reactions(sets);
        video
    }
}

#[derive(Debug, FromRow)]
struct VideoViewRow {
    #[sqlx(flatten)]
    video: VideoRow,
    owner_name: Option<String>,
    owner_avatar: Option<String>,
    owner_subscribers: Option<i64>,
}

impl From<VideoViewRow> for VideoView {
    fn from(row: VideoViewRow) -> Self {
        let video = Video::from(row.video);
        let channel = row.owner_name.map(|name| VideoOwner {
            id: video.owner_id,
            name,
            avatar: row.owner_avatar,
            subscribers: row.owner_subscribers.unwrap_or(0),
        });
        VideoView { video, channel }
    }
}

pub struct SqlxVideoRepository {
    pub pool: PgPool,
}

impl SqlxVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxVideoRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for SqlxVideoRepository {
    #[instrument(skip(self, video), fields(owner_id = %video.owner_id))]
    async fn create(&self, video: &NewVideo) -> Result<Video, DomainError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO videos AS v \
                (id, title, description, owner_id, video_url, thumbnail, duration, status, tags, category) \
             VALUES ($1, $2, $3, $4, $5, $6, to_jsonb($7::bigint), $8, $9, $10) \
             RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.owner_id)
            .bind(&video.video_url)
            .bind(video.thumbnail.as_deref())
            .bind(video.duration)
            .bind(video.status.as_str())
            .bind(&video.tags)
            .bind(&video.category)
            .fetch_one(&mut *tx)
            .await?;

        let push = format!(
            "UPDATE users SET video_ids = {}, updated_at = NOW() WHERE id = $1",
            push_id("video_ids", "$2")
        );
        sqlx::query(&push)
            .bind(video.owner_id)
            .bind(row.id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(video_id = %row.id, "Created video");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, DomainError> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos v WHERE v.id = $1");
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Video::from))
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<VideoView>, DomainError> {
        let sql = format!(
            "WITH bumped AS ( \
                UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING * \
             ) \
             SELECT {VIDEO_COLUMNS}, {OWNER_COLUMNS} \
             FROM bumped v LEFT JOIN users u ON u.id = v.owner_id"
        );
        let row = sqlx::query_as::<_, VideoViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(VideoView::from))
    }

    #[instrument(skip(self, query), fields(page = query.page.page, limit = query.page.limit))]
    async fn list(&self, query: &VideoQuery) -> Result<Page<VideoView>, DomainError> {
        let search = query.search.as_deref();
        let pattern = search.map(contains_pattern);
        let category = query.category.as_deref();

        let sql = format!(
            "SELECT {VIDEO_COLUMNS}, {OWNER_COLUMNS} \
             FROM videos v LEFT JOIN users u ON u.id = v.owner_id \
             WHERE {FEED_FILTER} \
             ORDER BY v.created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, VideoViewRow>(&sql)
            .bind(search)
            .bind(pattern.as_deref())
            .bind(category)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM videos v WHERE {FEED_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(search)
            .bind(pattern.as_deref())
            .bind(category)
            .fetch_one(&self.pool)
            .await?;

        debug!(returned = rows.len(), total, "Listed feed videos");
        Ok(Page {
            items: rows.into_iter().map(VideoView::from).collect(),
            total,
        })
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoView>, DomainError> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS}, {OWNER_COLUMNS} \
             FROM videos v LEFT JOIN users u ON u.id = v.owner_id \
             WHERE v.owner_id = $1 \
             ORDER BY v.created_at DESC"
        );
        let rows = sqlx::query_as::<_, VideoViewRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(VideoView::from).collect())
    }

    async fn update(&self, id: Uuid, update: &VideoUpdate) -> Result<Option<Video>, DomainError> {
        let sql = format!(
            "UPDATE videos AS v SET \
                title = COALESCE($2, v.title), \
                description = COALESCE($3, v.description), \
                video_url = COALESCE($4, v.video_url), \
                thumbnail = COALESCE($5, v.thumbnail), \
                duration = CASE WHEN $6::bigint IS NULL THEN v.duration ELSE to_jsonb($6::bigint) END, \
                status = COALESCE($7, v.status), \
                tags = COALESCE($8::text[], v.tags), \
                category = COALESCE($9, v.category), \
                updated_at = NOW() \
             WHERE v.id = $1 RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.video_url.as_deref())
            .bind(update.thumbnail.as_deref())
            .bind(update.duration)
            .bind(update.status.map(|s| s.as_str()))
            .bind(update.tags.as_deref())
            .bind(update.category.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Video::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), DomainError> {
        let id_text = id.to_string();
        let mut tx = self.pool.begin().await?;

        // Comments go with the video through the foreign key.
        let deleted = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(DomainError::NotFound("Video not found".into()));
        }

        let pull_owned = format!(
            "UPDATE users SET video_ids = {}, updated_at = NOW() WHERE id = $1",
            pull_id("video_ids", "$2")
        );
        sqlx::query(&pull_owned)
            .bind(owner_id)
            .bind(&id_text)
            .execute(&mut *tx)
            .await?;

        let pull_liked = format!(
            "UPDATE users SET liked_videos = {}, updated_at = NOW() \
             WHERE {} @> jsonb_build_array($1::text)",
            pull_id("liked_videos", "$1"),
            as_array("liked_videos")
        );
        let unliked = sqlx::query(&pull_liked)
            .bind(&id_text)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        info!(unliked, "Deleted video");
        Ok(())
    }

    #[instrument(skip(self, sets), fields(likes = sets.positive_count(), dislikes = sets.negative_count()))]
    async fn save_reactions(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Video>, DomainError> {
        let sql = format!(
            "UPDATE videos AS v SET \
                liked_by = $2, likes = $3, disliked_by = $4, dislikes = $5, updated_at = NOW() \
             WHERE v.id = $1 RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .bind(Json(sets.positive()))
            .bind(sets.positive_count())
            .bind(Json(sets.negative()))
            .bind(sets.negative_count())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Video::from))
    }
}
