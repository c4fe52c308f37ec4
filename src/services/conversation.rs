//! The persona travels inside the first user message rather than in a
//! separate system-instruction field. The widget's greeting is UI text and
//! never goes upstream.

use anyhow::anyhow;
use secrecy::SecretString;
use tracing::info;

use crate::{
    config::Settings,
    error::{AppError, Result},
    models::{
        conversation::{render_context, ContextSet, Role, Turn},
        gemini::{Content, GenerateRequest},
        request::MISSING_HISTORY,
    },
    state::AppState,
};

pub const CUSTOMER_LABEL: &str = "El cliente dice: ";

pub fn build_contents(settings: &Settings, context: &ContextSet, turns: &[Turn]) -> Result<Vec<Content>> {
    if turns.is_empty() {
        return Err(AppError::invalid(MISSING_HISTORY));
    }

    let (contents, _) = turns.iter().fold(
        (Vec::with_capacity(turns.len()), false),
        |(mut out, seen_user), turn| match turn.role {
            Role::User => {
                let text = if seen_user {
                    format!("{CUSTOMER_LABEL}{}", turn.text)
                } else {
                    first_user_text(settings, context, &turn.text)
                };
                out.push(Content::text(Role::User, text));
                (out, true)
            }
            Role::Model => {
                if !is_ui_text(settings, &turn.text) {
                    out.push(Content::text(Role::Model, turn.text.clone()));
                }
                (out, seen_user)
            }
        },
    );

    if contents.is_empty() {
        return Err(AppError::invalid(MISSING_HISTORY));
    }
    Ok(contents)
}

fn first_user_text(settings: &Settings, context: &ContextSet, text: &str) -> String {
    let mut out = format!("{}\n\n", settings.system_prompt);
    if !context.is_empty() {
        out.push_str(&format!("[Contexto actual: {}]\n\n", render_context(context)));
    }
    out.push_str(CUSTOMER_LABEL);
    out.push_str(text);
    out
}

fn is_ui_text(settings: &Settings, text: &str) -> bool {
    let text = text.trim();
    text == settings.greeting.trim() || text == settings.system_prompt.trim()
}

/// Adapter plus the upstream call. `search` attaches the Google Search tool.
pub async fn reply(
    state: &AppState,
    key: &SecretString,
    context: &ContextSet,
    turns: &[Turn],
    search: bool,
) -> Result<String> {
    let contents = build_contents(&state.settings, context, turns)?;
    info!(turns = turns.len(), sent = contents.len(), search, "conversation prepared");

    let mut body = GenerateRequest::new(contents);
    if search {
        body = body.with_search();
    }

    state
        .gemini
        .generate(key, &body)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow!("Gemini answered without candidate text")))
}
