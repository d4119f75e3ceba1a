//! Analysis orchestration: prompt assembly, the external call, response
//! extraction, and the mapping of every failure mode into a well-formed
//! result.
//!
//! `AnalysisEngine::analyze` never fails: callers always get an
//! `AnalysisResult`, possibly one whose conclusion explains what went wrong.

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog;
use crate::config::CriaConfig;
use crate::error::AnalysisError;
use crate::gemini::{GeminiClient, Part};
use crate::prompt::build_analysis_prompt;
use crate::schema::analysis_response_schema;
use crate::types::{
    AnalysisResult, ChecklistSeverity, Creative, CreativeSet, FormatGroup, FunnelStage, Slot,
};

const MSG_NO_API_KEY: &str = "The Gemini API key is not configured. Set the GEMINI_API_KEY \
     environment variable or add api_key to the config file.";
const MSG_NO_CREATIVES: &str = "No creatives were provided for analysis.";
const MSG_FILE_REJECTED: &str = "The creative could not be processed. It may be too large or in \
     an unsupported format. Try a smaller file.";
const MSG_GENERIC: &str = "There was an error generating the recommendations.";

/// Seam for the external model call, so the engine can be exercised without
/// a network.
#[allow(async_fn_in_trait)]
pub trait GenerativeBackend {
    async fn generate(
        &self,
        parts: Vec<Part>,
        response_schema: Value,
    ) -> Result<String, AnalysisError>;
}

impl GenerativeBackend for GeminiClient {
    async fn generate(
        &self,
        parts: Vec<Part>,
        response_schema: Value,
    ) -> Result<String, AnalysisError> {
        self.generate_content(parts, response_schema).await
    }
}

/// Drives one analysis per format-group selection.
pub struct AnalysisEngine<B = GeminiClient> {
    backend: Option<B>,
}

impl AnalysisEngine<GeminiClient> {
    /// Build the production engine. A missing credential leaves the backend
    /// empty, which `analyze` reports as a configuration problem.
    pub fn from_config(config: &CriaConfig) -> Self {
        let backend = config
            .resolved_api_key()
            .map(|key| GeminiClient::new(config, key.to_string()));
        Self { backend }
    }
}

impl<B: GenerativeBackend> AnalysisEngine<B> {
    pub fn with_backend(backend: Option<B>) -> Self {
        Self { backend }
    }

    /// Critique the creative set for one format group. Always resolves.
    pub async fn analyze(&self, set: &CreativeSet, group: FormatGroup) -> AnalysisResult {
        match self.run(set, group).await {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "analysis degraded to an error result");
                error_result(&err)
            }
        }
    }

    async fn run(
        &self,
        set: &CreativeSet,
        group: FormatGroup,
    ) -> Result<AnalysisResult, AnalysisError> {
        let backend = self.backend.as_ref().ok_or(AnalysisError::Configuration)?;
        let creative = select_attachment(set, group).ok_or(AnalysisError::NoInput)?;

        let placements = catalog::for_group(group);
        let prompt = build_analysis_prompt(
            set.get(Slot::Square).is_some(),
            set.get(Slot::Vertical).is_some(),
            group,
            &placements,
        );
        info!(
            %group,
            attached = %creative.slot,
            prompt_bytes = prompt.len(),
            "requesting analysis"
        );

        let parts = vec![
            Part::text(prompt),
            Part::inline_data(&creative.mime, &creative.bytes),
        ];
        let raw = backend
            .generate(parts, analysis_response_schema())
            .await?;

        let json = extract_json(&raw).map_err(AnalysisError::Unknown)?;
        serde_json::from_str(&json)
            .map_err(|e| AnalysisError::Unknown(format!("invalid analysis payload: {e}")))
    }
}

/// The creative whose bytes accompany the prompt: the relevant one for the
/// group when present, otherwise whichever other slot is loaded.
pub fn select_attachment(set: &CreativeSet, group: FormatGroup) -> Option<&Creative> {
    let relevant = group.relevant_slot();
    let other = match relevant {
        Slot::Square => Slot::Vertical,
        Slot::Vertical => Slot::Square,
    };
    set.get(relevant).or_else(|| set.get(other))
}

/// Pull the JSON object out of a model answer that may be fenced or wrapped
/// in prose.
fn extract_json(response: &str) -> Result<String, String> {
    let t = response.trim();
    // Direct JSON
    if t.starts_with('{') && t.ends_with('}') {
        return Ok(t.to_string());
    }
    // ```json fenced block
    if let Some(s) = t.find("```json") {
        if let Some(e) = t[s..].find("```\n").or(t[s..].rfind("```")) {
            let js = s + 7;
            let je = s + e;
            if js < je {
                return Ok(t[js..je].trim().to_string());
            }
        }
    }
    // Plain fenced block
    if let Some(s) = t.find("```") {
        if let Some(e) = t[s + 3..].find("```") {
            let body = t[s + 3..s + 3 + e]
                .lines()
                .skip_while(|l| !l.trim_start().starts_with('{'))
                .collect::<Vec<_>>()
                .join("\n");
            if !body.is_empty() {
                return Ok(body);
            }
        }
    }
    // JSON embedded anywhere
    if let (Some(s), Some(e)) = (t.find('{'), t.rfind('}')) {
        if s < e {
            return Ok(t[s..=e].to_string());
        }
    }
    Err("no JSON object found in model response".to_string())
}

/// Map a failure into the zero-valued result the renderer shows.
fn error_result(err: &AnalysisError) -> AnalysisResult {
    match err {
        AnalysisError::Configuration => AnalysisResult::empty_with_conclusion(
            FunnelStage::NotAvailable,
            "Configuration Error",
            ChecklistSeverity::Critical,
            MSG_NO_API_KEY,
        ),
        AnalysisError::NoInput => AnalysisResult::empty_with_conclusion(
            FunnelStage::NotAvailable,
            "Error",
            ChecklistSeverity::Critical,
            MSG_NO_CREATIVES,
        ),
        AnalysisError::Transport { .. } => AnalysisResult::empty_with_conclusion(
            FunnelStage::Error,
            "Analysis Error",
            ChecklistSeverity::Critical,
            MSG_FILE_REJECTED,
        ),
        AnalysisError::Unknown(message) => {
            // Fault descriptions carrying an HTTP error class get the
            // file-size hint; everything else stays generic.
            let text = if message.contains("400") || message.contains("500") {
                MSG_FILE_REJECTED
            } else {
                MSG_GENERIC
            };
            AnalysisResult::empty_with_conclusion(
                FunnelStage::Error,
                "Analysis Error",
                ChecklistSeverity::Critical,
                text,
            )
        }
    }
}
