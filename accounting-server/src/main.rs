#[macro_use]
extern crate tracing;
extern crate serde_json;

use std::error::Error;
use std::path::PathBuf;

use actix_cors::Cors;
use anyhow::Context;
use actix_web::error::JsonPayloadError;
use actix_web::web::Data;
use actix_web::{web, App};
use actix_web::{HttpResponse, HttpServer};
use tracing::Level;

use accounting_lib::config::Config;
use accounting_lib::{category, expense, user};

const LISTEN_ADDR: &str = "0.0.0.0:5700";

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    info!("tracing initialized");

    dotenvy::dotenv().ok();
    let config = match get_config_file() {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Startup-time datastore connectivity failure is fatal.
    let (user_repo, expense_repo, category_repo) =
        accounting_repo::sqlx_repo::create_repos(&config.database_url, 10)
            .await
            .context("Unable to set up datastore")?;
    info!("connected to database");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(user_repo.clone()))
            .app_data(Data::new(expense_repo.clone()))
            .app_data(Data::new(category_repo.clone()))
            .wrap(Cors::permissive())
            .wrap(accounting_lib::tracing::create_middleware())
            .service(user::user_service())
            .service(expense::expense_service())
            .service(category::category_service())
            .app_data(web::JsonConfig::default().error_handler(|err, req| {
                error!(req_path = req.path(), %err);
                match err {
                    JsonPayloadError::Deserialize(deserialize_err) => {
                        let error_body = serde_json::json!({
                            "error": "Unable to parse JSON payload",
                            "detail": format!("{}", deserialize_err),
                        });
                        actix_web::error::InternalError::from_response(
                            deserialize_err,
                            HttpResponse::BadRequest()
                                .content_type("application/json")
                                .body(error_body.to_string()),
                        )
                        .into()
                    }
                    _ => err.into(),
                }
            }))
    });

    info!(addr = LISTEN_ADDR, "starting server");
    server
        .bind(LISTEN_ADDR)
        .with_context(|| format!("Unable to bind {}", LISTEN_ADDR))?
        .run()
        .await?;

    Ok(())
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
