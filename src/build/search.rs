use super::summary::PageSummary;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialize the summaries as the JSON array the client-side search reads.
///
/// The result is embedded in a `<script>` element, so `<` is written as a
/// JSON escape and the text can never close the element early.
pub fn build_search_index(summaries: &[PageSummary]) -> Result<String, SearchError> {
    let json = serde_json::to_string(summaries)?;
    Ok(json.replace('<', "\\u003c"))
}
