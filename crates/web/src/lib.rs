pub use crate::common::RouteResult;
pub use crate::config::Config;

use axum::Router;
use spots::{client::Client, database::Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod common;
pub mod config;

#[derive(Clone)]
pub struct WebState<D>
where
    D: Database,
{
    pub spot_client: Client<D>,
}

impl<D> WebState<D>
where
    D: Database,
{
    pub fn new(spot_client: Client<D>) -> Self {
        Self { spot_client }
    }
}

pub fn router<D>(state: WebState<D>) -> Router
where
    D: Database,
{
    api::routes(state).layer(TraceLayer::new_for_http())
}

pub async fn start_web_server<D>(config: &Config, state: WebState<D>) -> std::io::Result<()>
where
    D: Database,
{
    let listener = TcpListener::bind(config.listen_address).await?;
    log::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for shutdown signal: {}", why);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
