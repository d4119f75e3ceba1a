//! Builds the analysis instruction sent to the model.

use crate::catalog::Placement;
use crate::guidelines::ENHANCEMENT_GUIDELINES;
use crate::types::FormatGroup;

fn yes_no(present: bool) -> &'static str {
    if present {
        "Yes"
    } else {
        "No"
    }
}

/// One bullet per placement the model must critique.
fn placement_list(placements: &[&Placement]) -> String {
    placements
        .iter()
        .map(|p| {
            format!(
                "- {} {} (ID: {}, aspect ratios: {})",
                p.platform,
                p.name,
                p.id.index(),
                p.aspect_ratios.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full instruction for one (creative set, format group) pair.
///
/// The instruction pins down three things the response must honor: a single
/// JSON object as output, English for every string, and one critique entry
/// per listed placement.
pub fn build_analysis_prompt(
    has_square: bool,
    has_vertical: bool,
    group: FormatGroup,
    placements: &[&Placement],
) -> String {
    let relevant_present = match group {
        FormatGroup::SquareLike => has_square,
        FormatGroup::Vertical => has_vertical,
    };
    let relevant_label = match group {
        FormatGroup::SquareLike => "the square/1:1 creative",
        FormatGroup::Vertical => "the vertical/9:16 creative",
    };
    let relevant_line = if relevant_present {
        "Yes".to_string()
    } else {
        "No. This is a serious problem!".to_string()
    };

    format!(
        r#"**Master instruction:**
You act as an art director and marketing strategist for Meta Ads, with an extremely critical, friendly and detail-oriented eye. Your task is a HOLISTIC analysis of the user's creatives for the '{group}' format group. You must evaluate HOW THE RELEVANT CREATIVE ({relevant_label}) PERFORMS in EVERY placement of this group. Be specific, actionable, and ground every point in the creatives and the specifications. ALL text in your answer must be in ENGLISH.

**Provided creatives:**
- Square creative (1:1): {square}
- Vertical creative (9:16): {vertical}
- Relevant creative for this analysis: {relevant_line}

**Placements to cover for '{group}':**
{placements}

**MANDATORY ANALYSIS TASKS:**

**1. GLOBAL STRATEGY (FOR THIS FORMAT GROUP):**
- **effectivenessScore, clarityScore, textToImageRatio, funnelStage, recommendations, advantagePlusAnalysis**: produce these as defined by the output schema. Effectiveness must be LOW when the relevant creative was not provided.
- **justifications (effectivenessJustification, etc.)**: for each of the 4 strategic metrics, ADD a short, direct justification (4-8 words) backing the score. Examples: "Good contrast, clear message.", "Text too small to read.", "Ideal for building brand awareness."

**2. CRITICAL SUMMARY PER PLACEMENT (THE MOST IMPORTANT TASK):**
- **placementSummaries**: an array with one entry for EACH placement listed above, based on a VISUAL inspection of the relevant creative. Your top priority is detecting whether Meta interface elements COVER, HIDE or make UNREADABLE any text, logo, or important part of the product.
  - **placementId**: the numeric id of the placement (e.g. "0" for Facebook Feed).
  - **summary**: an array of strings; a SHORT list of direct, actionable points. Be friendly, be specific, and lead with the most urgent changes. QUOTE text from the ad. For example: ["Works very well! The 1:1 format is native here.", "CRITICAL: the 'SUPPORT YOUR NERVOUS SYSTEM' text is completely covered by the interface. Move it up.", "The logo at the bottom is barely legible, consider enlarging it."]

**3. FINAL CONCLUSION AND NEXT STEPS:**
- **overallConclusion**: an object with 'headline' and 'checklist' as defined by the output schema.

**Mandatory output format (JSON ONLY):**
Answer with a single JSON object. ALL text must be in ENGLISH.

--- SPECIFICATION DOCUMENT (META ADS AND ADVANTAGE+) ---
{guidelines}
--- END OF DOCUMENT ---
"#,
        group = group,
        relevant_label = relevant_label,
        square = yes_no(has_square),
        vertical = yes_no(has_vertical),
        relevant_line = relevant_line,
        placements = placement_list(placements),
        guidelines = ENHANCEMENT_GUIDELINES,
    )
}
