pub mod club_api;
pub mod data;
pub mod like_api;
pub mod post_api;
pub mod types;
pub mod user_api;
