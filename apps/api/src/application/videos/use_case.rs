use super::dto::{CreateVideoRequest, ListVideosQuery, UpdateVideoRequest};
use crate::application::{non_empty, validation_error};
use crate::domain::shared::{
    errors::DomainError,
    ownership::ensure_owner,
    pagination::{Page, PageRequest},
    reaction::{Polarity, Reactable, toggle},
};
use crate::domain::user::repository::UserRepository;
use crate::domain::video::{
    duration::normalize_duration,
    entity::{DEFAULT_CATEGORY, NewVideo, Video, VideoQuery, VideoUpdate, VideoView},
    repository::VideoRepository,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct VideoUseCase {
    videos: Arc<dyn VideoRepository>,
    users: Arc<dyn UserRepository>,
}

fn not_found() -> DomainError {
    DomainError::NotFound("Video not found".into())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

impl VideoUseCase {
    pub fn new(videos: Arc<dyn VideoRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { videos, users }
    }

    pub async fn list(
        &self,
        query: ListVideosQuery,
    ) -> Result<(PageRequest, Page<VideoView>), DomainError> {
        let page = PageRequest::new(query.page, query.limit);
        let result = self
            .videos
            .list(&VideoQuery {
                search: non_empty(query.search),
                category: non_empty(query.category),
                page: page.clone(),
            })
            .await?;
        Ok((page, result))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoView>, DomainError> {
        self.videos.list_by_owner(owner_id).await
    }

    /// Fetch a video for playback; counts as one view.
    pub async fn watch(&self, id: Uuid) -> Result<VideoView, DomainError> {
        self.videos.record_view(id).await?.ok_or_else(not_found)
    }

    pub async fn create(
        &self,
        actor: Uuid,
        request: CreateVideoRequest,
    ) -> Result<Video, DomainError> {
        let title = request.title.trim().to_string();
        let video_url = request.video_url.trim().to_string();
        if title.is_empty() || video_url.is_empty() {
            return Err(DomainError::ValidationError(
                "Please provide title and video URL".into(),
            ));
        }
        request.validate().map_err(validation_error)?;

        let video = self
            .videos
            .create(&NewVideo {
                title,
                description: request.description.unwrap_or_default(),
                owner_id: actor,
                video_url,
                thumbnail: non_empty(request.thumbnail),
                duration: request
                    .duration
                    .as_ref()
                    .map(normalize_duration)
                    .unwrap_or(0),
                status: request.status.unwrap_or_default(),
                tags: clean_tags(request.tags.unwrap_or_default()),
                category: non_empty(request.category)
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            })
            .await?;
        tracing::info!(video_id = %video.id, owner = %actor, "video created");
        Ok(video)
    }

    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        request: UpdateVideoRequest,
    ) -> Result<Video, DomainError> {
        let video = self.videos.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_owner(&video, actor, "update")?;

        let request = UpdateVideoRequest {
            title: non_empty(request.title),
            ..request
        };
        request.validate().map_err(validation_error)?;

        let update = VideoUpdate {
            title: request.title,
            description: request.description,
            video_url: non_empty(request.video_url),
            thumbnail: non_empty(request.thumbnail),
            duration: request.duration.as_ref().map(normalize_duration),
            status: request.status,
            tags: request.tags.map(clean_tags),
            category: non_empty(request.category),
        };
        self.videos.update(id, &update).await?.ok_or_else(not_found)
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let video = self.videos.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_owner(&video, actor, "delete")?;
        self.videos.delete(id, video.owner_id).await?;
        tracing::info!(video_id = %id, owner = %actor, "video deleted");
        Ok(())
    }

    /// Toggle a like or dislike, then sync the actor's liked-videos list.
    ///
    /// The video write and the liked-list write are separate; if the second
    /// one fails the error is returned but the reaction stays recorded.
    pub async fn react(
        &self,
        actor: Uuid,
        id: Uuid,
        polarity: Polarity,
    ) -> Result<Video, DomainError> {
        let mut video = self.videos.find_by_id(id).await?.ok_or_else(not_found)?;
        let outcome = toggle(&mut video, actor, polarity)?;

        let saved = self
            .videos
            .save_reactions(id, &video.reactions())
            .await?
            .ok_or_else(not_found)?;

        let liked = saved.liked_by.contains(&actor);
        self.users.set_liked_video(actor, id, liked).await?;

        tracing::info!(
            video_id = %id,
            actor = %actor,
            ?polarity,
            active = outcome.active,
            cleared_opposite = outcome.cleared_opposite,
            likes = saved.likes,
            dislikes = saved.dislikes,
            "video reaction toggled"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::repository::MockUserRepository;
    use crate::domain::video::{entity::VideoStatus, repository::MockVideoRepository};
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn video(owner: Uuid) -> Video {
        Video {
            id: Uuid::now_v7(),
            title: "Clip".into(),
            description: String::new(),
            owner_id: owner,
            video_url: "https://cdn.example.com/clip.mp4".into(),
            thumbnail: None,
            duration: 0,
            views: 0,
            likes: 0,
            dislikes: 0,
            liked_by: vec![],
            disliked_by: vec![],
            comment_ids: vec![],
            status: VideoStatus::Published,
            tags: vec![],
            category: DEFAULT_CATEGORY.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// A repository whose `save_reactions` applies the sets to `stored`.
    fn reacting_repo(stored: Video) -> MockVideoRepository {
        let mut videos = MockVideoRepository::new();
        let found = stored.clone();
        videos
            .expect_find_by_id()
            .with(eq(stored.id))
            .returning(move |_| Ok(Some(found.clone())));
        videos.expect_save_reactions().returning(move |_, sets| {
            let mut saved = stored.clone();
            saved.apply_reactions(sets.clone());
            Ok(Some(saved))
        });
        videos
    }

    #[tokio::test]
    async fn like_records_reaction_and_syncs_liked_list() {
        let actor = Uuid::now_v7();
        let stored = video(Uuid::now_v7());
        let id = stored.id;

        let mut users = MockUserRepository::new();
        users
            .expect_set_liked_video()
            .with(eq(actor), eq(id), eq(true))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = VideoUseCase::new(Arc::new(reacting_repo(stored)), Arc::new(users));
        let saved = use_case.react(actor, id, Polarity::Positive).await.unwrap();
        assert_eq!(saved.liked_by, vec![actor]);
        assert_eq!(saved.likes, 1);
        assert_eq!(saved.dislikes, 0);
    }

    #[tokio::test]
    async fn dislike_after_like_moves_reaction_and_unlikes() {
        let actor = Uuid::now_v7();
        let mut stored = video(Uuid::now_v7());
        stored.liked_by = vec![actor];
        stored.likes = 1;
        let id = stored.id;

        let mut users = MockUserRepository::new();
        users
            .expect_set_liked_video()
            .with(eq(actor), eq(id), eq(false))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = VideoUseCase::new(Arc::new(reacting_repo(stored)), Arc::new(users));
        let saved = use_case.react(actor, id, Polarity::Negative).await.unwrap();
        assert!(saved.liked_by.is_empty());
        assert_eq!(saved.likes, 0);
        assert_eq!(saved.disliked_by, vec![actor]);
        assert_eq!(saved.dislikes, 1);
    }

    #[tokio::test]
    async fn reacting_to_missing_video_is_not_found() {
        let mut videos = MockVideoRepository::new();
        videos.expect_find_by_id().returning(|_| Ok(None));
        videos.expect_save_reactions().never();
        let use_case = VideoUseCase::new(Arc::new(videos), Arc::new(MockUserRepository::new()));
        let err = use_case
            .react(Uuid::now_v7(), Uuid::now_v7(), Polarity::Positive)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound("Video not found".into()));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let stored = video(Uuid::now_v7());
        let id = stored.id;
        let mut videos = MockVideoRepository::new();
        videos
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        videos.expect_update().never();

        let use_case = VideoUseCase::new(Arc::new(videos), Arc::new(MockUserRepository::new()));
        let err = use_case
            .update(Uuid::now_v7(), id, UpdateVideoRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_by_owner_goes_through() {
        let owner = Uuid::now_v7();
        let stored = video(owner);
        let id = stored.id;
        let mut videos = MockVideoRepository::new();
        videos
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        videos
            .expect_delete()
            .with(eq(id), eq(owner))
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = VideoUseCase::new(Arc::new(videos), Arc::new(MockUserRepository::new()));
        use_case.delete(owner, id).await.unwrap();
    }

    #[tokio::test]
    async fn create_normalizes_legacy_duration_and_defaults() {
        let owner = Uuid::now_v7();
        let mut videos = MockVideoRepository::new();
        videos
            .expect_create()
            .with(always())
            .returning(move |new_video| {
                assert_eq!(new_video.duration, 754);
                assert_eq!(new_video.category, DEFAULT_CATEGORY);
                assert_eq!(new_video.tags, vec!["rust".to_string()]);
                assert_eq!(new_video.status, VideoStatus::Published);
                let mut v = video(new_video.owner_id);
                v.duration = new_video.duration;
                Ok(v)
            });

        let use_case = VideoUseCase::new(Arc::new(videos), Arc::new(MockUserRepository::new()));
        let created = use_case
            .create(
                owner,
                CreateVideoRequest {
                    title: "Clip".into(),
                    video_url: "https://cdn.example.com/clip.mp4".into(),
                    duration: Some(serde_json::json!("12:34")),
                    tags: Some(vec![" rust ".into(), "rust".into(), "".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.owner_id, owner);
    }

    #[tokio::test]
    async fn create_requires_title_and_url() {
        let use_case = VideoUseCase::new(
            Arc::new(MockVideoRepository::new()),
            Arc::new(MockUserRepository::new()),
        );
        let err = use_case
            .create(Uuid::now_v7(), CreateVideoRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationError("Please provide title and video URL".into())
        );
    }
}
