use charybdis::errors::CharybdisError;
use charybdis::macros::charybdis_model;
use charybdis::operations::Find;
use charybdis::types::{Text, Timestamp, Uuid};
use scylla::client::caching_session::CachingSession;
use serde::{Deserialize, Serialize};

use crate::errors::CampushubError;

#[charybdis_model(
    table_name = clubs,
    partition_keys = [id],
    clustering_keys = [],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    #[serde(default)]
    pub id: Uuid,
    pub name: Text,
    pub description: Option<Text>,
    pub category: Option<Text>,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,

    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Timestamp,
}

impl Club {
    /// Resolves the club a post is created in, mapping a missing row to a
    /// validation failure on the `clubId` input.
    pub async fn find_for_post(db_session: &CachingSession, id: Uuid) -> Result<Club, CampushubError> {
        match Club::find_by_primary_key_value((id,)).execute(db_session).await {
            Ok(club) => Ok(club),
            Err(CharybdisError::NotFoundError(_)) => Err(CampushubError::ValidationError((
                "clubId".to_string(),
                "does not reference an existing club".to_string(),
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
