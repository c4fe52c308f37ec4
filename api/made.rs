use std::sync::Arc;

use made_proxy::{
    config::Settings,
    http::handler::{handle, Endpoint},
    logging, AppState,
};
use vercel_runtime::{run, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let state = Arc::new(AppState::new(Settings::from_env()?)?);

    run(move |req: Request| {
        let state = Arc::clone(&state);
        async move { handle(&state, Endpoint::Made, req).await }
    })
    .await
}
