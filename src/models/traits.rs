use ammonia::clean;

use crate::errors::CampushubError;

pub trait SanitizeContent {
    fn sanitize(&mut self) -> Result<(), CampushubError>;
}

impl SanitizeContent for String {
    fn sanitize(&mut self) -> Result<(), CampushubError> {
        *self = clean(self);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_script_tags() {
        let mut content = "hello <script>alert('x')</script>world".to_string();

        content.sanitize().unwrap();

        assert!(!content.contains("<script>"));
        assert!(content.contains("hello"));
    }

    #[test]
    fn sanitize_keeps_plain_text() {
        let mut content = "meeting at 5pm in room 204".to_string();

        content.sanitize().unwrap();

        assert_eq!(content, "meeting at 5pm in room 204");
    }
}
