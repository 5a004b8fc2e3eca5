use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use todo_api::auth::{AuthMiddleware, TokenProvider};
use todo_api::config::Config;
use todo_api::routes;
use todo_api::service::TodoService;
use todo_api::store::PgTodoStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // The secret is read once here; TokenProvider holds the derived keys for
    // the whole process lifetime.
    let token_provider = web::Data::new(TokenProvider::new(&config.jwt_secret));
    let todo_service = web::Data::new(TodoService::new(PgTodoStore::new(pool.clone())));

    log::info!("starting todo-api at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(token_provider.clone())
            .app_data(todo_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
