use actix_cors::Cors;
use actix_web::http;
use scylla::client::caching_session::CachingSession;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use serde::Deserialize;
use std::{env, fs, time::Duration};

const DB_CACHE_SIZE: usize = 1000;

#[derive(Clone, Deserialize)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub allowed_origin: String,
    pub scylla: ScyllaConfig,
}

impl Config {
    pub fn new() -> Self {
        dotenv::dotenv().ok();

        let env = env::var("ENV").expect("ENV must be set");
        let config_file = format!("config.{}.toml", env);

        let contents = fs::read_to_string(&config_file)
            .unwrap_or_else(|e| panic!("Unable to read {}: {}", config_file, e));

        toml::from_str(&contents).unwrap_or_else(|e| panic!("Unable to parse {}: {}", config_file, e))
    }
}

pub struct App {
    pub config: Config,
    pub db_session: CachingSession,
}

impl App {
    pub async fn new() -> Self {
        let config = Config::new();
        let db_session = get_db_session(&config).await;

        Self { config, db_session }
    }
}

pub async fn get_db_session(config: &Config) -> CachingSession {
    let known_nodes: Vec<&str> = config.scylla.hosts.iter().map(|h| h.as_str()).collect();

    let session: Session = SessionBuilder::new()
        .known_nodes(&known_nodes)
        .connection_timeout(Duration::from_secs(3))
        .use_keyspace(&config.scylla.keyspace, false)
        .build()
        .await
        .unwrap_or_else(|e| {
            panic!(
                "Unable to connect to scylla hosts: {:?}. \nError: {}",
                known_nodes, e
            )
        });

    CachingSession::from(session, DB_CACHE_SIZE)
}

pub fn get_cors(config: &Config) -> Cors {
    Cors::default()
        .allowed_origin(config.allowed_origin.as_str())
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            http::header::AUTHORIZATION,
            http::header::ACCEPT,
            http::header::ORIGIN,
            http::header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
