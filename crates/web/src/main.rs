use database::PgDatabase;
use spots::client::Client;
use web::{start_web_server, Config, WebState};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Ok(path) = dotenv {
        log::info!("loaded environment from {}", path.display());
    }

    let config = Config::from_env().expect("expected configuration in env.");

    // database
    let database = PgDatabase::connect_lazy(&config.database, config.acquire_timeout());
    if config.run_migrations {
        database
            .migrate()
            .await
            .expect("could not run database migrations.");
    }

    // web server
    let state = WebState::new(
        Client::new(database).with_query_timeout(config.query_timeout),
    );
    if let Err(why) = start_web_server(&config, state).await {
        log::error!("web server stopped: {}", why);
        std::process::exit(1);
    }
}
