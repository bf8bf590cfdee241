use charybdis::errors::CharybdisError;
use charybdis::macros::charybdis_model;
use charybdis::operations::Find;
use charybdis::types::{Counter, Uuid};
use log::warn;
use scylla::client::caching_session::CachingSession;
use serde::{Deserialize, Serialize};

use crate::errors::CampushubError;

// CQL limitation is to have counters in a separate table
// https://docs.datastax.com/en/cql-oss/3.3/cql/cql_using/useCounters.html
#[charybdis_model(
    table_name = post_counters,
    partition_keys = [post_id],
    clustering_keys = [],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostCounter {
    pub post_id: Uuid,
    pub like_count: Option<Counter>,
}

impl PostCounter {
    /// Clamps a raw counter column at zero. A missing counter row means the
    /// post has simply never been liked.
    pub fn clamped_count(like_count: Option<Counter>) -> i64 {
        like_count.map_or(0, |c| c.0.max(0))
    }

    /// Reads the like count for a post, clamped at zero.
    pub async fn like_count(db_session: &CachingSession, post_id: Uuid) -> Result<i64, CampushubError> {
        match Self::find_by_primary_key_value((post_id,)).execute(db_session).await {
            Ok(counter) => Ok(Self::clamped_count(counter.like_count)),
            Err(CharybdisError::NotFoundError(_)) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn increment_likes(db_session: &CachingSession, post_id: Uuid) -> Result<(), CampushubError> {
        Self {
            post_id,
            ..Default::default()
        }
        .increment_like_count(1)
        .execute(db_session)
        .await?;

        Ok(())
    }

    /// Counter decrements are only issued after an applied conditional delete
    /// of the membership row, so the count cannot drift below the number of
    /// like rows. The floor check is a backstop against manual store edits.
    pub async fn decrement_likes(db_session: &CachingSession, post_id: Uuid) -> Result<(), CampushubError> {
        if Self::like_count(db_session, post_id).await? <= 0 {
            warn!("like_count for post {} is already at zero, skipping decrement", post_id);

            return Ok(());
        }

        Self {
            post_id,
            ..Default::default()
        }
        .decrement_like_count(1)
        .execute(db_session)
        .await?;

        Ok(())
    }
}
