pub mod club;
pub mod like;
pub mod post;
pub mod post_counter;
pub mod traits;
pub mod udts;
pub mod user;
