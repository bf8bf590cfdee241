mod toggle;

pub use toggle::ToggleAction;

use charybdis::macros::charybdis_model;
use charybdis::types::{Timestamp, Uuid};
use serde::{Deserialize, Serialize};

use crate::errors::CampushubError;

/// Pure existence marker: a row means "this user currently likes this post".
/// The primary key doubles as the uniqueness constraint on the pair.
#[charybdis_model(
    table_name = likes,
    partition_keys = [post_id],
    clustering_keys = [user_id],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(default)]
    pub post_id: Uuid,

    #[serde(default)]
    pub user_id: Uuid,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,
}

impl Like {
    pub fn validate(&self) -> Result<(), CampushubError> {
        if self.user_id == Uuid::default() {
            return Err(CampushubError::ValidationError((
                "userId".to_string(),
                "is required".to_string(),
            )));
        }

        if self.post_id == Uuid::default() {
            return Err(CampushubError::ValidationError((
                "postId".to_string(),
                "is required".to_string(),
            )));
        }

        Ok(())
    }
}
