//! Exit codes for criactl.

use cria::{AnalysisResult, FunnelStage};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors.
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when no usable creative was provided.
pub const EXIT_NO_INPUT: i32 = 64;

/// Exit code when the analysis degraded to an error result.
pub const EXIT_ANALYSIS_ERROR: i32 = 65;

/// Exit code when the API credential is missing.
pub const EXIT_CONFIG_MISSING: i32 = 70;

/// Derive the process exit code from a rendered result. Error-flavored
/// results carry a sentinel funnel stage; real analyses never do.
pub fn exit_code_for(result: &AnalysisResult) -> i32 {
    match result.funnel_stage {
        FunnelStage::Error => EXIT_ANALYSIS_ERROR,
        FunnelStage::NotAvailable => {
            if result.overall_conclusion.headline == "Configuration Error" {
                EXIT_CONFIG_MISSING
            } else {
                EXIT_NO_INPUT
            }
        }
        _ => EXIT_SUCCESS,
    }
}
