use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoLocal;
use url_shortener::{
    config::{self, logger::LoggerConfig},
    domain::schemas::UrlBase,
    handler::handlers::Handler,
    sqlite::db::DB,
};

fn build_logger(config: &LoggerConfig) {
    let builder = tracing_subscriber::fmt().with_timer(ChronoLocal::rfc_3339());

    match config.format {
        config::logger::LogFormat::Json => builder.json().init(),
        config::logger::LogFormat::Text => builder.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };
    build_logger(&cfg.logger);

    tracing::debug!(config = ?cfg, "Configuration loaded successfully");
    let db = DB::new(cfg.database.clone())
        .await
        .expect("Failed to connect to the database");
    let repo = Arc::new(db);
    let handler = web::Data::new(Handler::new(Arc::clone(&repo), cfg.server.clone()));

    HttpServer::new(move || {
        App::new()
            .app_data(handler.clone())
            .route(
                "/",
                web::get().to(|handler: web::Data<Handler<Arc<DB>>>| async move {
                    handler.root().await
                }),
            )
            .service(
                web::scope("/health")
                    .route(
                        "/readyz",
                        web::get().to(|handler: web::Data<Handler<Arc<DB>>>| async move {
                            handler.readyz().await
                        }),
                    )
                    .route(
                        "/livez",
                        web::get().to(|handler: web::Data<Handler<Arc<DB>>>| async move {
                            handler.livez().await
                        }),
                    ),
            )
            .route(
                "/url",
                web::post().to(
                    |handler: web::Data<Handler<Arc<DB>>>,
                     info: web::Json<UrlBase>| async move {
                        handler.create_url(info).await
                    },
                ),
            )
            .service(
                web::scope("/admin")
                    .route(
                        "/{secret_key}",
                        web::get().to(
                            |handler: web::Data<Handler<Arc<DB>>>,
                             path: web::Path<String>| async move {
                                handler.get_url_info(path).await
                            },
                        ),
                    )
                    .route(
                        "/{secret_key}",
                        web::delete().to(
                            |handler: web::Data<Handler<Arc<DB>>>,
                             path: web::Path<String>| async move {
                                handler.delete_url(path).await
                            },
                        ),
                    ),
            )
            .route(
                "/{url_key}",
                web::get().to(
                    |handler: web::Data<Handler<Arc<DB>>>, path: web::Path<String>| async move {
                        handler.forward_to_target_url(path).await
                    },
                ),
            )
    })
    .bind(("0.0.0.0", cfg.server.port))?
    .run()
    .await
}
