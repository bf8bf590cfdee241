use charybdis::macros::charybdis_udt_model;
use charybdis::types::{Text, Uuid};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Author data denormalized into feed rows so reads never join against `users`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[charybdis_udt_model(type_name = profile)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: Text,
    pub username: Option<Text>,
}

impl Profile {
    pub fn init(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.full_name(),
            username: Some(user.username.clone()),
        }
    }
}
