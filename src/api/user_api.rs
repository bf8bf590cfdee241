use actix_web::{get, web, HttpResponse};
use charybdis::operations::Find;
use charybdis::types::Uuid;

use crate::api::data::RequestData;
use crate::api::types::Response;
use crate::models::user::ShowUser;

#[get("/{id}")]
pub async fn get_user(data: RequestData, id: web::Path<Uuid>) -> Response {
    let user = ShowUser::find_by_primary_key_value((id.into_inner(),))
        .execute(data.db_session())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}
