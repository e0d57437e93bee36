use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::client::tiered::OutboundClient;

/// One entry from the suggestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct SuggestionRequest<'a> {
    #[serde(rename = "Query")]
    pub query: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionResponse {
    #[serde(rename = "Suggestions", default)]
    pub suggestions: Vec<Suggestion>,
}

/// Fire the suggestion lookup concurrently with the pool fan-out. The
/// completion always yields; any suggestor trouble degrades to an empty list
/// and is never a user-visible error.
pub fn spawn_suggestion_task(
    client: OutboundClient,
    suggestor_url: String,
    query: String,
) -> oneshot::Receiver<Vec<Suggestion>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let url = format!("{}/api/suggest", suggestor_url);
        let resp = client
            .post_json(&url, &SuggestionRequest { query: &query }, &[])
            .await;
        let suggestions = if resp.is_ok() {
            match serde_json::from_str::<SuggestionResponse>(&resp.body) {
                Ok(parsed) => parsed.suggestions,
                Err(err) => {
                    tracing::warn!("Unable to parse suggestor response: {}", err);
                    Vec::new()
                }
            }
        } else {
            tracing::warn!("Suggestor degraded: {}:{}", resp.status_code, resp.body);
            Vec::new()
        };
        let _ = tx.send(suggestions);
    });
    rx
}
