pub const FEED_PAGE_SIZE: i32 = 15;
pub const MAX_POST_CONTENT_LENGTH: usize = 1000;
