//! Rewrite every stored video duration to a whole number of seconds.
//!
//! Older rows carry `"MM:SS"` strings (or other junk) in `videos.duration`.
//! Reads already normalize them, but this brings the stored data in line.
//!
//! Usage:
//!     cargo run --bin fix_video_durations            # apply
//!     cargo run --bin fix_video_durations -- --dry-run

use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;
use vidshare::{
    domain::video::duration::{is_canonical, normalize_duration},
    infrastructure::database::pool::create_pool,
};

#[derive(sqlx::FromRow)]
struct DurationRow {
    id: Uuid,
    title: String,
    duration: Json<Value>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    vidshare::init_tracing();

    let dry_run = std::env::args().any(|a| a == "--dry-run");
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Missing required environment variable: DATABASE_URL"))?;
    let db = create_pool(&database_url, 2).await?;

    let rows = sqlx::query_as::<_, DurationRow>("SELECT id, title, duration FROM videos")
        .fetch_all(&db)
        .await?;
    tracing::info!(videos = rows.len(), dry_run, "Scanning video durations");

    let mut fixed = 0usize;
    for row in rows {
        if is_canonical(&row.duration) {
            continue;
        }
        let seconds = normalize_duration(&row.duration);
        tracing::info!(
            video_id = %row.id,
            title = %row.title,
            from = %row.duration.0,
            to = seconds,
            "Normalizing duration"
        );

        if !dry_run {
            sqlx::query("UPDATE videos SET duration = to_jsonb($2::bigint) WHERE id = $1")
                .bind(row.id)
                .bind(seconds)
                .execute(&db)
                .await?;
        }
        fixed += 1;
    }

    tracing::info!(fixed, dry_run, "Duration fix complete");
    Ok(())
}
