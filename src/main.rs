use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdeck_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::get_quiz)
            .service(handlers::get_quiz_questions)
            .service(handlers::start_attempt)
            .service(handlers::get_quiz_attempts)
            .service(handlers::get_my_attempts)
            .service(handlers::get_attempt)
            .service(handlers::submit_answer)
            .service(handlers::submit_attempt)
            .service(handlers::get_my_grade)
            .service(handlers::get_user_grade)
    })
    .bind((host, port))?
    .run()
    .await
}
