//! The structured-output schema the model's answer must conform to.
//!
//! Sent alongside the prompt as the `responseSchema` of the generation
//! config, using the Generative Language API's OpenAPI-flavored type names.

use serde_json::{json, Value};

/// Fields every response must carry.
pub const REQUIRED_FIELDS: [&str; 12] = [
    "effectivenessScore",
    "effectivenessJustification",
    "clarityScore",
    "clarityJustification",
    "textToImageRatio",
    "textToImageRatioJustification",
    "funnelStage",
    "funnelStageJustification",
    "recommendations",
    "advantagePlusAnalysis",
    "placementSummaries",
    "overallConclusion",
];

/// Build the response schema for an analysis call.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "effectivenessScore": { "type": "NUMBER" },
            "effectivenessJustification": { "type": "STRING" },
            "clarityScore": { "type": "NUMBER" },
            "clarityJustification": { "type": "STRING" },
            "textToImageRatio": { "type": "NUMBER" },
            "textToImageRatioJustification": { "type": "STRING" },
            "funnelStage": { "type": "STRING", "enum": ["TOFU", "MOFU", "BOFU"] },
            "funnelStageJustification": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "severity": {
                            "type": "STRING",
                            "enum": ["CRITICAL", "RECOMMENDED", "GOOD_TO_KNOW"]
                        },
                        "message": { "type": "STRING" }
                    },
                    "required": ["severity", "message"]
                }
            },
            "advantagePlusAnalysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "enhancement": { "type": "STRING" },
                        "applicable": { "type": "STRING", "enum": ["ACTIVATE", "CAUTION"] },
                        "justification": { "type": "STRING" }
                    },
                    "required": ["enhancement", "applicable", "justification"]
                }
            },
            "placementSummaries": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "placementId": { "type": "STRING" },
                        "summary": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["placementId", "summary"]
                }
            },
            "overallConclusion": {
                "type": "OBJECT",
                "properties": {
                    "headline": { "type": "STRING" },
                    "checklist": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "severity": {
                                    "type": "STRING",
                                    "enum": ["CRITICAL", "ACTIONABLE", "POSITIVE"]
                                },
                                "text": { "type": "STRING" }
                            },
                            "required": ["severity", "text"]
                        }
                    }
                },
                "required": ["headline", "checklist"]
            }
        },
        "required": REQUIRED_FIELDS,
    })
}
