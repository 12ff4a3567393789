use super::json_sql::{id_strings, pull_ids, push_id};
use crate::domain::{
    comment::{
        entity::{Comment, CommentAuthor, CommentView, NewComment},
        repository::CommentRepository,
    },
    shared::{
        errors::DomainError,
        reaction::{ReactionSets, normalize_set},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{info, instrument};
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "c.id, c.text, c.author_id, c.video_id, c.liked_by, \
     c.reply_ids, c.parent_id, c.created_at, c.updated_at";

const AUTHOR_COLUMNS: &str = "u.name AS author_name, u.avatar AS author_avatar";

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    text: String,
    author_id: Uuid,
    video_id: Uuid,
    liked_by: Json<Value>,
    reply_ids: Json<Value>,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        let liked_by = normalize_set(&row.liked_by);
        Comment {
            id: row.id,
            text: row.text,
            author_id: row.author_id,
            video_id: row.video_id,
            likes: liked_by.len() as i64,
            liked_by,
            reply_ids: normalize_set(&row.reply_ids),
            parent_id: row.parent_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CommentViewRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    author_name: Option<String>,
    author_avatar: Option<String>,
}

impl From<CommentViewRow> for CommentView {
    fn from(row: CommentViewRow) -> Self {
        let comment = Comment::from(row.comment);
        let author = row.author_name.map(|name| CommentAuthor {
            id: comment.author_id,
            name,
            avatar: row.author_avatar,
        });
        CommentView { comment, author }
    }
}

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxCommentRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    #[instrument(skip(self, comment), fields(video_id = %comment.video_id, reply = comment.parent_id.is_some()))]
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO comments AS c (id, text, author_id, video_id, parent_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&comment.text)
            .bind(comment.author_id)
            .bind(comment.video_id)
            .bind(comment.parent_id)
            .fetch_one(&mut *tx)
            .await?;
        let id_text = row.id.to_string();

        let on_video = format!(
            "UPDATE videos SET comment_ids = {} WHERE id = $1",
            push_id("comment_ids", "$2")
        );
        sqlx::query(&on_video)
            .bind(comment.video_id)
            .bind(&id_text)
            .execute(&mut *tx)
            .await?;

        if let Some(parent_id) = comment.parent_id {
            let on_parent = format!(
                "UPDATE comments SET reply_ids = {} WHERE id = $1",
                push_id("reply_ids", "$2")
            );
            sqlx::query(&on_parent)
                .bind(parent_id)
                .bind(&id_text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(comment_id = %row.id, "Created comment");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments c WHERE c.id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }

    async fn find_view(&self, id: Uuid) -> Result<Option<CommentView>, DomainError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS} \
             FROM comments c LEFT JOIN users u ON u.id = c.author_id \
             WHERE c.id = $1"
        );
        let row = sqlx::query_as::<_, CommentViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CommentView::from))
    }

    async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<CommentView>, DomainError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS} \
             FROM comments c LEFT JOIN users u ON u.id = c.author_id \
             WHERE c.video_id = $1 \
             ORDER BY c.created_at DESC"
        );
        let rows = sqlx::query_as::<_, CommentViewRow>(&sql)
            .bind(video_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<Option<Comment>, DomainError> {
        let sql = format!(
            "UPDATE comments AS c SET text = $2, updated_at = NOW() \
             WHERE c.id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(text)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn delete(&self, comment: &Comment) -> Result<Vec<Uuid>, DomainError> {
        let mut tx = self.pool.begin().await?;

        let deleted: Vec<Uuid> = sqlx::query_scalar(
            "DELETE FROM comments WHERE id = $1 OR parent_id = $1 RETURNING id",
        )
        .bind(comment.id)
        .fetch_all(&mut *tx)
        .await?;
        if deleted.is_empty() {
            return Err(DomainError::NotFound("Comment not found".into()));
        }
        let deleted_text = id_strings(&deleted);

        let on_video = format!(
            "UPDATE videos SET comment_ids = {} WHERE id = $1",
            pull_ids("comment_ids", "$2")
        );
        sqlx::query(&on_video)
            .bind(comment.video_id)
            .bind(&deleted_text)
            .execute(&mut *tx)
            .await?;

        if let Some(parent_id) = comment.parent_id {
            let on_parent = format!(
                "UPDATE comments SET reply_ids = {} WHERE id = $1",
                pull_ids("reply_ids", "$2")
            );
            sqlx::query(&on_parent)
                .bind(parent_id)
                .bind(&deleted_text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(removed = deleted.len(), "Deleted comment");
        Ok(deleted)
    }

    #[instrument(skip(self, sets), fields(likes = sets.positive_count()))]
    async fn save_likes(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Comment>, DomainError> {
        let sql = format!(
            "UPDATE comments AS c SET liked_by = $2, likes = $3, updated_at = NOW() \
             WHERE c.id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(Json(sets.positive()))
            .bind(sets.positive_count())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }
}
