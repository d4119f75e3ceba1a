//! Core data types for Cria.
//!
//! The analysis result structs mirror the JSON contract of the generative
//! model one-to-one (camelCase wire names), so a schema-conformant response
//! deserializes straight into them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::preview::PreviewHandle;

/// Which upload slot a creative occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Square,
    Vertical,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Square => write!(f, "square"),
            Slot::Vertical => write!(f, "vertical"),
        }
    }
}

/// Media kind, classified from the sniffed mime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativeKind {
    Image,
    Video,
}

impl fmt::Display for CreativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreativeKind::Image => write!(f, "image"),
            CreativeKind::Video => write!(f, "video"),
        }
    }
}

/// The two buckets of placements a creative can be judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatGroup {
    #[serde(rename = "SQUARE_LIKE")]
    SquareLike,
    #[serde(rename = "VERTICAL")]
    Vertical,
}

impl FormatGroup {
    /// The slot whose creative is authoritative for this group.
    pub fn relevant_slot(self) -> Slot {
        match self {
            FormatGroup::SquareLike => Slot::Square,
            FormatGroup::Vertical => Slot::Vertical,
        }
    }
}

impl fmt::Display for FormatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatGroup::SquareLike => write!(f, "SQUARE_LIKE"),
            FormatGroup::Vertical => write!(f, "VERTICAL"),
        }
    }
}

/// One loaded creative asset.
///
/// Only exists once its dimensions have been decoded; a file that fails to
/// decode never becomes a `Creative`.
#[derive(Debug, Clone)]
pub struct Creative {
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
    pub mime: String,
    pub kind: CreativeKind,
    pub width: u32,
    pub height: u32,
    pub slot: Slot,
    pub preview: PreviewHandle,
}

impl Creative {
    /// Short human-readable description for listings.
    pub fn summary(&self) -> String {
        format!(
            "{} {} {}x{} ({})",
            self.slot,
            self.kind,
            self.width,
            self.height,
            self.path.display()
        )
    }
}

/// At most one creative per slot.
#[derive(Debug, Clone, Default)]
pub struct CreativeSet {
    square: Option<Creative>,
    vertical: Option<Creative>,
}

impl CreativeSet {
    pub fn get(&self, slot: Slot) -> Option<&Creative> {
        match slot {
            Slot::Square => self.square.as_ref(),
            Slot::Vertical => self.vertical.as_ref(),
        }
    }

    /// Place a creative in its slot, returning the displaced one (whose
    /// preview handle the caller must revoke).
    pub fn insert(&mut self, creative: Creative) -> Option<Creative> {
        let target = match creative.slot {
            Slot::Square => &mut self.square,
            Slot::Vertical => &mut self.vertical,
        };
        target.replace(creative)
    }

    /// Drain both slots, handing ownership of the creatives to the caller.
    pub fn drain(&mut self) -> Vec<Creative> {
        self.square.take().into_iter().chain(self.vertical.take()).collect()
    }

    pub fn has_any(&self) -> bool {
        self.square.is_some() || self.vertical.is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creative> {
        self.square.iter().chain(self.vertical.iter())
    }
}

/// Severity of a strategic recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "RECOMMENDED")]
    Recommended,
    #[serde(rename = "GOOD_TO_KNOW")]
    GoodToKnow,
}

/// Severity of a conclusion-checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecklistSeverity {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "ACTIONABLE")]
    Actionable,
    #[serde(rename = "POSITIVE")]
    Positive,
}

/// Verdict on a platform automatic enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applicability {
    #[serde(rename = "ACTIVATE")]
    Activate,
    #[serde(rename = "CAUTION")]
    Caution,
}

/// Marketing-funnel stage the creative targets.
///
/// `Error` and `NotAvailable` are local sentinels for degraded results; the
/// model itself is only ever allowed to answer with the first three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunnelStage {
    #[serde(rename = "TOFU")]
    Tofu,
    #[serde(rename = "MOFU")]
    Mofu,
    #[serde(rename = "BOFU")]
    Bofu,
    #[serde(rename = "Error")]
    Error,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FunnelStage::Tofu => "TOFU",
            FunnelStage::Mofu => "MOFU",
            FunnelStage::Bofu => "BOFU",
            FunnelStage::Error => "Error",
            FunnelStage::NotAvailable => "N/A",
        };
        write!(f, "{s}")
    }
}

/// A severity-tagged strategic recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub severity: Severity,
    pub message: String,
}

/// Verdict on one automatic enhancement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementVerdict {
    pub enhancement: String,
    pub applicable: Applicability,
    pub justification: String,
}

/// Critique bundle for one placement, referenced by numeric id string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementCritique {
    pub placement_id: String,
    pub summary: Vec<String>,
}

/// One entry of the final checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub severity: ChecklistSeverity,
    pub text: String,
}

/// Closing verdict: a headline plus an ordered checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conclusion {
    pub headline: String,
    pub checklist: Vec<ChecklistItem>,
}

/// The normalized structured critique for one (creative set, format group)
/// pair. Success and every failure mode alike are expressed as a value of
/// this type; renderers never need a separate error path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "de_score")]
    pub effectiveness_score: u8,
    pub effectiveness_justification: String,
    #[serde(deserialize_with = "de_score")]
    pub clarity_score: u8,
    pub clarity_justification: String,
    #[serde(deserialize_with = "de_score")]
    pub text_to_image_ratio: u8,
    pub text_to_image_ratio_justification: String,
    pub funnel_stage: FunnelStage,
    pub funnel_stage_justification: String,
    pub recommendations: Vec<RecommendationItem>,
    pub advantage_plus_analysis: Vec<EnhancementVerdict>,
    pub placement_summaries: Vec<PlacementCritique>,
    pub overall_conclusion: Conclusion,
}

impl AnalysisResult {
    /// A zero-valued result carrying only a conclusion. Used for every
    /// degraded path (missing credential, no input, transport failure).
    pub fn empty_with_conclusion(
        funnel_stage: FunnelStage,
        headline: &str,
        severity: ChecklistSeverity,
        message: &str,
    ) -> Self {
        Self {
            effectiveness_score: 0,
            effectiveness_justification: String::new(),
            clarity_score: 0,
            clarity_justification: String::new(),
            text_to_image_ratio: 0,
            text_to_image_ratio_justification: String::new(),
            funnel_stage,
            funnel_stage_justification: String::new(),
            recommendations: Vec::new(),
            advantage_plus_analysis: Vec::new(),
            placement_summaries: Vec::new(),
            overall_conclusion: Conclusion {
                headline: headline.to_string(),
                checklist: vec![ChecklistItem {
                    severity,
                    text: message.to_string(),
                }],
            },
        }
    }
}

/// Scores arrive as untrusted JSON numbers; round and clamp into 0..=100
/// instead of rejecting slightly out-of-range answers.
fn de_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_group_maps_to_relevant_slot() {
        assert_eq!(FormatGroup::SquareLike.relevant_slot(), Slot::Square);
        assert_eq!(FormatGroup::Vertical.relevant_slot(), Slot::Vertical);
    }

    #[test]
    fn score_clamps_out_of_range_numbers() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "de_score")]
            score: u8,
        }
        let over: Holder = serde_json::from_str(r#"{"score": 140}"#).unwrap();
        assert_eq!(over.score, 100);
        let under: Holder = serde_json::from_str(r#"{"score": -3}"#).unwrap();
        assert_eq!(under.score, 0);
        let fractional: Holder = serde_json::from_str(r#"{"score": 87.6}"#).unwrap();
        assert_eq!(fractional.score, 88);
    }

    #[test]
    fn funnel_stage_wire_names_round_trip() {
        for (stage, wire) in [
            (FunnelStage::Tofu, "\"TOFU\""),
            (FunnelStage::Mofu, "\"MOFU\""),
            (FunnelStage::Bofu, "\"BOFU\""),
            (FunnelStage::Error, "\"Error\""),
            (FunnelStage::NotAvailable, "\"N/A\""),
        ] {
            assert_eq!(serde_json::to_string(&stage).unwrap(), wire);
            let back: FunnelStage = serde_json::from_str(wire).unwrap();
            assert_eq!(back, stage);
        }
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let res: Result<Severity, _> = serde_json::from_str("\"URGENT\"");
        assert!(res.is_err());
    }

    #[test]
    fn empty_result_carries_single_checklist_entry() {
        let result = AnalysisResult::empty_with_conclusion(
            FunnelStage::NotAvailable,
            "Error",
            ChecklistSeverity::Critical,
            "no creatives",
        );
        assert_eq!(result.effectiveness_score, 0);
        assert_eq!(result.overall_conclusion.checklist.len(), 1);
        assert_eq!(
            result.overall_conclusion.checklist[0].severity,
            ChecklistSeverity::Critical
        );
    }
}
