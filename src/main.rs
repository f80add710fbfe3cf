use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizroom_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = AppState::new(config);

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .expose_any_header()
            .supports_credentials();
        for origin in &state.config.cors_allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.cookie_signer.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(handlers::signup)
            .service(handlers::login)
            .service(handlers::logout)
            .service(handlers::get_user)
            .service(handlers::create_classroom)
            .service(handlers::join_classroom)
            .service(handlers::get_my_classrooms)
            .service(handlers::get_classroom_students)
            .service(handlers::fetch_quiz)
            .service(handlers::get_classroom_details)
            .service(handlers::submit_quiz_results)
            .service(handlers::generate_quiz)
    })
    .bind((host, port))?
    .run()
    .await
}
