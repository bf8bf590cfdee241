use actix_web::HttpResponse;

use crate::errors::CampushubError;

pub type Response = Result<HttpResponse, CampushubError>;
