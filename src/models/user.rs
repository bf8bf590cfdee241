use charybdis::errors::CharybdisError;
use charybdis::macros::charybdis_model;
use charybdis::operations::Find;
use charybdis::types::{Text, Timestamp, Uuid};
use scylla::client::caching_session::CachingSession;
use serde::{Deserialize, Serialize};

use crate::errors::CampushubError;

#[charybdis_model(
    table_name = users,
    partition_keys = [id],
    clustering_keys = [],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Uuid,
    pub username: Text,
    pub email: Text,
    pub first_name: Text,
    pub last_name: Text,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,

    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Timestamp,
}

partial_user!(ShowUser, id, username, first_name, last_name);

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Resolves a post author, mapping a missing row to a validation failure
    /// so a bad `userId` surfaces as a 400 rather than a store error.
    pub async fn find_author(db_session: &CachingSession, id: Uuid) -> Result<User, CampushubError> {
        match User::find_by_primary_key_value((id,)).execute(db_session).await {
            Ok(user) => Ok(user),
            Err(CharybdisError::NotFoundError(_)) => Err(CampushubError::ValidationError((
                "userId".to_string(),
                "does not reference an existing user".to_string(),
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
