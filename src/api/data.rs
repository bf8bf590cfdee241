use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use scylla::client::caching_session::CachingSession;

use crate::app::App;
use crate::errors::CampushubError;

/// Per-request handle on application state, shared between API endpoints and
/// model callbacks.
#[derive(Clone)]
pub struct RequestData {
    pub app: web::Data<App>,
}

impl RequestData {
    pub fn db_session(&self) -> &CachingSession {
        &self.app.db_session
    }
}

impl FromRequest for RequestData {
    type Error = CampushubError;
    type Future = Ready<Result<RequestData, CampushubError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.app_data::<web::Data<App>>() {
            Some(app) => ready(Ok(RequestData {
                app: web::Data::clone(app),
            })),
            None => ready(Err(CampushubError::InternalServerError(
                "Could not get app data".to_string(),
            ))),
        }
    }
}
