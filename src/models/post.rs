use std::collections::HashMap;

use charybdis::callbacks::Callbacks;
use charybdis::macros::charybdis_model;
use charybdis::types::{BigInt, Frozen, Text, Timestamp, Uuid};
use chrono::Utc;
use futures::future::try_join_all;
use scylla::client::caching_session::CachingSession;
use serde::{Deserialize, Serialize};

use crate::api::data::RequestData;
use crate::constants::{FEED_PAGE_SIZE, MAX_POST_CONTENT_LENGTH};
use crate::errors::CampushubError;
use crate::models::club::Club;
use crate::models::post_counter::{find_post_counter, PostCounter};
use crate::models::traits::SanitizeContent;
use crate::models::udts::Profile;
use crate::models::user::User;

#[charybdis_model(
    table_name = posts,
    partition_keys = [club_id],
    clustering_keys = [created_at, id],
    global_secondary_indexes = [],
    table_options = r#"
        CLUSTERING ORDER BY (created_at DESC)
    "#
)]
#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub club_id: Uuid,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,

    #[serde(default)]
    pub id: Uuid,

    pub content: Text,

    #[serde(default, alias = "userId")]
    pub author_id: Uuid,

    pub author: Option<Frozen<Profile>>,
    pub club_name: Option<Text>,

    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Timestamp,

    // populated from post_counters on feed reads
    #[charybdis(ignore)]
    #[serde(default)]
    pub likes_count: Option<BigInt>,
}

impl Callbacks for Post {
    type Extension = RequestData;
    type Error = CampushubError;

    async fn before_insert(&mut self, db_session: &CachingSession, _data: &RequestData) -> Result<(), CampushubError> {
        self.validate_ids()?;
        self.validate_content()?;
        self.set_defaults();

        let author = User::find_author(db_session, self.author_id).await?;
        let club = Club::find_for_post(db_session, self.club_id).await?;

        self.author = Some(Profile::init(&author));
        self.club_name = Some(club.name);

        self.content.sanitize()?;

        Ok(())
    }
}

impl Post {
    pub fn validate_ids(&self) -> Result<(), CampushubError> {
        if self.author_id == Uuid::default() {
            return Err(CampushubError::ValidationError((
                "userId".to_string(),
                "is required".to_string(),
            )));
        }

        if self.club_id == Uuid::default() {
            return Err(CampushubError::ValidationError((
                "clubId".to_string(),
                "is required".to_string(),
            )));
        }

        Ok(())
    }

    pub fn validate_content(&self) -> Result<(), CampushubError> {
        let length = self.content.chars().count();

        if length == 0 {
            return Err(CampushubError::ValidationError((
                "content".to_string(),
                "is required".to_string(),
            )));
        }

        if length > MAX_POST_CONTENT_LENGTH {
            return Err(CampushubError::ValidationError((
                "content".to_string(),
                format!("can contain max {} characters", MAX_POST_CONTENT_LENGTH),
            )));
        }

        Ok(())
    }

    fn set_defaults(&mut self) {
        let now = Utc::now();

        if self.id == Uuid::default() {
            self.id = Uuid::new_v4();
        }

        self.created_at = now;
        self.updated_at = now;
        self.likes_count = Some(0);
    }

    /// Feed across the given clubs: newest first, capped at one page, each
    /// post enriched with its like count.
    pub async fn club_feed(db_session: &CachingSession, club_ids: &[Uuid]) -> Result<Vec<Post>, CampushubError> {
        let feeds = try_join_all(club_ids.iter().map(|club_id| async move {
            let posts: Vec<Post> = find_post!("club_id = ? LIMIT ?", (*club_id, FEED_PAGE_SIZE))
                .execute(db_session)
                .await?
                .try_collect()
                .await?;

            Ok::<Vec<Post>, CampushubError>(posts)
        }))
        .await?;

        let mut posts = Self::merge_feeds(feeds);

        Self::attach_like_counts(db_session, &mut posts).await?;

        Ok(posts)
    }

    /// Each per-club slice arrives newest first; the merged feed keeps that
    /// order globally and is truncated to a single page.
    fn merge_feeds(feeds: Vec<Vec<Post>>) -> Vec<Post> {
        let mut posts: Vec<Post> = feeds.into_iter().flatten().collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(FEED_PAGE_SIZE as usize);

        posts
    }

    async fn attach_like_counts(db_session: &CachingSession, posts: &mut [Post]) -> Result<(), CampushubError> {
        let post_ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();

        if post_ids.is_empty() {
            return Ok(());
        }

        let counters: Vec<PostCounter> = find_post_counter!("post_id IN ?", (post_ids,))
            .execute(db_session)
            .await?
            .try_collect()
            .await?;

        let counts: HashMap<Uuid, i64> = counters
            .into_iter()
            .map(|counter| (counter.post_id, PostCounter::clamped_count(counter.like_count)))
            .collect();

        for post in posts.iter_mut() {
            post.likes_count = Some(counts.get(&post.id).copied().unwrap_or(0));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(content: &str) -> Post {
        Post {
            club_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn content_must_not_be_empty() {
        assert!(post("").validate_content().is_err());
        assert!(post("a").validate_content().is_ok());
    }

    #[test]
    fn content_is_capped_at_max_length() {
        assert!(post(&"a".repeat(MAX_POST_CONTENT_LENGTH)).validate_content().is_ok());
        assert!(post(&"a".repeat(MAX_POST_CONTENT_LENGTH + 1)).validate_content().is_err());
    }

    #[test]
    fn content_length_counts_chars_not_bytes() {
        // each char is multiple bytes, but only chars count toward the cap
        assert!(post(&"é".repeat(MAX_POST_CONTENT_LENGTH)).validate_content().is_ok());
    }

    #[test]
    fn missing_author_fails_validation() {
        let mut p = post("hello");
        p.author_id = Uuid::default();

        match p.validate_ids() {
            Err(CampushubError::ValidationError((field, _))) => assert_eq!(field, "userId"),
            other => panic!("expected userId validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn missing_club_fails_validation() {
        let mut p = post("hello");
        p.club_id = Uuid::default();

        match p.validate_ids() {
            Err(CampushubError::ValidationError((field, _))) => assert_eq!(field, "clubId"),
            other => panic!("expected clubId validation error, got {:?}", other.err()),
        }
    }

    fn post_at(minutes_ago: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            ..Default::default()
        }
    }

    #[test]
    fn merged_feed_is_newest_first() {
        let older = post_at(30);
        let newest = post_at(1);
        let middle = post_at(10);

        let merged = Post::merge_feeds(vec![vec![older.clone()], vec![newest.clone(), middle.clone()]]);

        let ids: Vec<Uuid> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, older.id]);
    }

    #[test]
    fn merged_feed_is_capped_at_page_size() {
        let feeds: Vec<Vec<Post>> = (0..3)
            .map(|_| (0..FEED_PAGE_SIZE).map(|i| post_at(i as i64)).collect())
            .collect();

        let merged = Post::merge_feeds(feeds);

        assert_eq!(merged.len(), FEED_PAGE_SIZE as usize);
    }

    #[test]
    fn empty_feeds_merge_to_empty() {
        assert!(Post::merge_feeds(vec![vec![], vec![]]).is_empty());
    }
}
