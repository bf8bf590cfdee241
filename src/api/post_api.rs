use actix_web::{post, web, HttpResponse};
use charybdis::operations::InsertWithCallbacks;
use charybdis::types::Uuid;
use serde::Deserialize;
use serde_json::json;

use crate::api::data::RequestData;
use crate::api::types::Response;
use crate::errors::CampushubError;
use crate::models::post::Post;

#[post("")]
pub async fn create_post(data: RequestData, payload: web::Json<Post>) -> Response {
    let mut post = payload.into_inner();

    post.insert_cb(&data).execute(data.db_session()).await?;

    Ok(HttpResponse::Created().json(json!({
        "data": [post],
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubFeedPayload {
    #[serde(default)]
    pub club_ids: Vec<Uuid>,
}

#[post("/feed")]
pub async fn club_feed(data: RequestData, payload: web::Json<ClubFeedPayload>) -> Response {
    let payload = payload.into_inner();

    if payload.club_ids.is_empty() {
        return Err(CampushubError::ValidationError((
            "clubIds".to_string(),
            "must not be empty".to_string(),
        )));
    }

    let posts = Post::club_feed(data.db_session(), &payload.club_ids).await?;

    Ok(HttpResponse::Ok().json(json!({
        "data": posts,
    })))
}
