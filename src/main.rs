mod api;
mod app;
mod constants;
mod errors;
mod models;

use actix_web::{web, App, HttpServer};
use log::info;

use crate::api::club_api::get_club;
use crate::api::like_api::{get_likes_count, toggle_like};
use crate::api::post_api::{club_feed, create_post};
use crate::api::user_api::get_user;
use crate::app::{get_cors, App as CampushubApp};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let campushub = CampushubApp::new().await;
    let port = campushub.config.port;
    let campushub = web::Data::new(campushub);

    info!("Starting campushub server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(get_cors(&campushub.config))
            .app_data(campushub.clone())
            .service(
                web::scope("/likes")
                    .service(toggle_like)
                    .service(get_likes_count),
            )
            .service(web::scope("/posts").service(create_post).service(club_feed))
            .service(web::scope("/clubs").service(get_club))
            .service(web::scope("/users").service(get_user))
    })
    .bind(("127.0.0.1", port))
    .unwrap_or_else(|e| panic!("Could not bind to port {}.\n{}", port, e))
    .run()
    .await
}
