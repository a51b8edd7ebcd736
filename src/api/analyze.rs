use crate::prompt::build_prompt;
use crate::providers::CompletionProvider;
use crate::types::AnalysisResult;
use super::types::AnalyzeRequest;

pub const EMPTY_INPUT_ERROR: &str = "Text input is empty";

/// Gateway entry point: rejects blank input before touching the provider.
pub async fn analyze_text<P>(request: AnalyzeRequest, provider: &P) -> AnalysisResult
where
    P: CompletionProvider + ?Sized,
{
    if request.is_blank() {
        tracing::info!("Rejected analysis request with empty text");
        return AnalysisResult::failure(EMPTY_INPUT_ERROR);
    }

    analyze_contract(&request.text, provider).await
}

/// Runs one completion for `text` and folds every outcome into an `AnalysisResult`.
pub async fn analyze_contract<P>(text: &str, provider: &P) -> AnalysisResult
where
    P: CompletionProvider + ?Sized,
{
    let prompt = build_prompt(text);

    let result = match provider.complete(&prompt).await {
        Ok(content) => AnalysisResult::from_completion(content),
        Err(e) => {
            tracing::warn!(
                provider = provider.provider_name(),
                kind = e.kind(),
                error = ?e,
                "Analysis failed"
            );
            AnalysisResult::failure(e.to_string())
        }
    };

    tracing::info!(
        provider = provider.provider_name(),
        text_len = text.len(),
        result = result.kind(),
        "Analysis completed"
    );

    result
}
