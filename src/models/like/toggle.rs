use charybdis::errors::CharybdisError;
use charybdis::operations::Find;
use chrono::Utc;
use scylla::client::caching_session::CachingSession;
use scylla::response::query_result::QueryResult;
use scylla::value::{CqlValue, Row};
use serde::Serialize;

use crate::errors::CampushubError;
use crate::models::like::Like;
use crate::models::post_counter::PostCounter;

// Both writes are conditional (LWT) on the membership state observed by the
// read above them, so two concurrent toggles for the same (post, user) pair
// resolve as one applied write and one conflict instead of a double counter
// update.
const INSERT_LIKE_IF_NOT_EXISTS_QUERY: &str =
    "INSERT INTO likes (post_id, user_id, created_at) VALUES (?, ?, ?) IF NOT EXISTS";

const DELETE_LIKE_IF_EXISTS_QUERY: &str =
    "DELETE FROM likes WHERE post_id = ? AND user_id = ? IF EXISTS";

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Liked,
    Unliked,
}

impl Like {
    /// Flips the like membership for `(post_id, user_id)` and adjusts the
    /// denormalized counter, reporting which direction the toggle took.
    ///
    /// Counter updates only run after the conditional write applied, so the
    /// counter moves at most once per membership change.
    pub async fn toggle(&mut self, db_session: &CachingSession) -> Result<ToggleAction, CampushubError> {
        self.validate()?;

        if self.find_existing(db_session).await?.is_some() {
            self.delete_if_present(db_session).await?;
            PostCounter::decrement_likes(db_session, self.post_id).await?;

            Ok(ToggleAction::Unliked)
        } else {
            self.created_at = Utc::now();

            self.insert_if_absent(db_session).await?;
            PostCounter::increment_likes(db_session, self.post_id).await?;

            Ok(ToggleAction::Liked)
        }
    }

    async fn find_existing(&self, db_session: &CachingSession) -> Result<Option<Like>, CampushubError> {
        match Like::find_by_primary_key_value((self.post_id, self.user_id))
            .execute(db_session)
            .await
        {
            Ok(like) => Ok(Some(like)),
            Err(CharybdisError::NotFoundError(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_if_absent(&self, db_session: &CachingSession) -> Result<(), CampushubError> {
        let result = db_session
            .execute_unpaged(
                INSERT_LIKE_IF_NOT_EXISTS_QUERY,
                (self.post_id, self.user_id, self.created_at),
            )
            .await?;

        if !lwt_applied(result)? {
            return Err(CampushubError::Conflict(
                "post was liked concurrently, re-resolve current state".to_string(),
            ));
        }

        Ok(())
    }

    async fn delete_if_present(&self, db_session: &CachingSession) -> Result<(), CampushubError> {
        let result = db_session
            .execute_unpaged(DELETE_LIKE_IF_EXISTS_QUERY, (self.post_id, self.user_id))
            .await?;

        if !lwt_applied(result)? {
            return Err(CampushubError::Conflict(
                "post was unliked concurrently, re-resolve current state".to_string(),
            ));
        }

        Ok(())
    }
}

/// Extracts the `[applied]` column of a conditional statement result.
fn lwt_applied(result: QueryResult) -> Result<bool, CampushubError> {
    let rows = result.into_rows_result().map_err(|e| {
        CampushubError::InternalServerError(format!("Conditional statement returned no rows: {}", e))
    })?;

    let row = rows.first_row::<Row>().map_err(|e| {
        CampushubError::InternalServerError(format!("Conditional statement row error: {}", e))
    })?;

    match row.columns.first() {
        Some(Some(CqlValue::Boolean(applied))) => Ok(*applied),
        _ => Err(CampushubError::InternalServerError(
            "Conditional statement returned no [applied] column".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charybdis::types::Uuid;

    #[test]
    fn toggle_requires_user_id() {
        let like = Like {
            post_id: Uuid::new_v4(),
            ..Default::default()
        };

        match like.validate() {
            Err(CampushubError::ValidationError((field, _))) => assert_eq!(field, "userId"),
            other => panic!("expected userId validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn toggle_requires_post_id() {
        let like = Like {
            user_id: Uuid::new_v4(),
            ..Default::default()
        };

        match like.validate() {
            Err(CampushubError::ValidationError((field, _))) => assert_eq!(field, "postId"),
            other => panic!("expected postId validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn present_ids_pass_validation() {
        let like = Like {
            post_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            ..Default::default()
        };

        assert!(like.validate().is_ok());
    }

    #[test]
    fn actions_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(ToggleAction::Liked).unwrap(),
            serde_json::json!("liked")
        );
        assert_eq!(
            serde_json::to_value(ToggleAction::Unliked).unwrap(),
            serde_json::json!("unliked")
        );
    }

    // Requires a live ScyllaDB with the campushub keyspace migrated, so it
    // only runs with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn toggle_pairs_like_and_unlike() {
        std::env::set_var("ENV", "development");

        let app = crate::app::App::new().await;
        let post_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut like = Like {
            post_id,
            user_id,
            ..Default::default()
        };

        let first = like.toggle(&app.db_session).await.unwrap();
        assert_eq!(first, ToggleAction::Liked);
        assert_eq!(PostCounter::like_count(&app.db_session, post_id).await.unwrap(), 1);

        let second = like.toggle(&app.db_session).await.unwrap();
        assert_eq!(second, ToggleAction::Unliked);
        assert_eq!(PostCounter::like_count(&app.db_session, post_id).await.unwrap(), 0);

        let existing = like.find_existing(&app.db_session).await.unwrap();
        assert!(existing.is_none());
    }
}
