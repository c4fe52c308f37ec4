use secrecy::SecretString;
use tracing::info;

use crate::{
    error::Result,
    models::request::{turns_from, RequestKind, RoutedRequest},
    services::{conversation, rating},
    state::AppState,
};

/// `/api/made`: picks the adapter from `request_type`. An unknown or missing
/// kind fails before anything is sent upstream.
pub async fn dispatch(state: &AppState, key: &SecretString, req: RoutedRequest) -> Result<String> {
    let kind = req.kind()?;
    info!(?kind, "routing request");

    match kind {
        RequestKind::PerformanceCalc => rating::rate(state, key, &req.components).await,
        RequestKind::MadeConsultation => {
            let turns = turns_from(req.conversation_history, req.user_prompt)?;
            let search = state.settings.consultation_search;
            conversation::reply(state, key, &req.components, &turns, search).await
        }
    }
}
