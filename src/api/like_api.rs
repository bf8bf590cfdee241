use actix_web::{get, post, web, HttpResponse};
use charybdis::types::Uuid;
use serde::Deserialize;
use serde_json::json;

use crate::api::data::RequestData;
use crate::api::types::Response;
use crate::models::like::Like;
use crate::models::post_counter::PostCounter;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikePayload {
    #[serde(default)]
    pub user_id: Uuid,

    #[serde(default)]
    pub post_id: Uuid,
}

#[post("/toggle")]
pub async fn toggle_like(data: RequestData, payload: web::Json<ToggleLikePayload>) -> Response {
    let payload = payload.into_inner();

    let mut like = Like {
        post_id: payload.post_id,
        user_id: payload.user_id,
        ..Default::default()
    };

    let action = like.toggle(data.db_session()).await?;
    let likes_count = PostCounter::like_count(data.db_session(), like.post_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "action": action,
        "postId": like.post_id,
        "likesCount": likes_count,
    })))
}

#[get("/{post_id}")]
pub async fn get_likes_count(data: RequestData, post_id: web::Path<Uuid>) -> Response {
    let post_id = post_id.into_inner();
    let likes_count = PostCounter::like_count(data.db_session(), post_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "postId": post_id,
        "likesCount": likes_count,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_payload_takes_camel_case_ids() {
        let user_id = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        let payload: ToggleLikePayload = serde_json::from_value(json!({
            "userId": user_id,
            "postId": post_id,
        }))
        .unwrap();

        assert_eq!(payload.user_id, user_id);
        assert_eq!(payload.post_id, post_id);
    }

    #[test]
    fn toggle_payload_ignores_membership_row_fields() {
        let payload: ToggleLikePayload = serde_json::from_value(json!({
            "userId": Uuid::new_v4(),
            "postId": Uuid::new_v4(),
            "createdAt": "2020-01-01T00:00:00Z",
        }))
        .unwrap();

        // only the pair identity crosses the wire, timestamps are server-set
        assert_ne!(payload.user_id, Uuid::default());
        assert_ne!(payload.post_id, Uuid::default());
    }

    #[test]
    fn toggle_payload_defaults_missing_ids_to_nil() {
        let payload: ToggleLikePayload = serde_json::from_value(json!({})).unwrap();

        let like = Like {
            post_id: payload.post_id,
            user_id: payload.user_id,
            ..Default::default()
        };

        assert!(like.validate().is_err());
    }
}
