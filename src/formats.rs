use serde::{Deserialize, Serialize};

/// One line of `pages.jsonl`: the outcome for a single content URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub outcome: PageOutcome,
    pub retrieved_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageOutcome {
    Saved { title: String, path: String },
    Skipped { reason: SkipReason },
}

/// Why a page produced no Markdown file. None of these abort the batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    FetchFailed,
    NoTitle,
    NoMarker,
    NoContent,
}
