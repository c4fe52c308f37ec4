use secrecy::SecretString;

use crate::{
    error::Result,
    models::{conversation::ContextSet, request::ChatRequest},
    services::conversation,
    state::AppState,
};

/// `/api/chat`: plain shopping-assistant conversation, no context, no search.
pub async fn respond(state: &AppState, key: &SecretString, req: ChatRequest) -> Result<String> {
    let turns = req.into_turns()?;
    conversation::reply(state, key, &ContextSet::new(), &turns, false).await
}
