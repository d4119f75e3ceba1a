//! Terminal rendering for analysis results and the placement catalog.
//!
//! Formatting functions build plain strings so they can be asserted on;
//! printing happens at the call sites.

use console::style;
use owo_colors::OwoColorize;

use cria::catalog::{self, Placement};
use cria::intake::SlotWarning;
use cria::{
    AnalysisResult, Applicability, ChecklistSeverity, CreativeSet, FormatGroup, Severity,
};

const HR: &str = "────────────────────────────────────────────────────────────";

fn score_value(score: u8, suffix: &str) -> String {
    let text = format!("{score}{suffix}");
    if score >= 80 {
        format!("{}", text.green())
    } else if score >= 50 {
        format!("{}", text.yellow())
    } else {
        format!("{}", text.red())
    }
}

fn severity_tag(severity: Severity) -> String {
    match severity {
        Severity::Critical => format!("{}", "CRITICAL".red().bold()),
        Severity::Recommended => format!("{}", "RECOMMENDED".yellow()),
        Severity::GoodToKnow => format!("{}", "GOOD_TO_KNOW".dimmed()),
    }
}

fn checklist_line(severity: ChecklistSeverity, text: &str) -> String {
    match severity {
        ChecklistSeverity::Critical => format!("  {} {}", "✗".red().bold(), text),
        ChecklistSeverity::Actionable => format!("  {} {}", "!".yellow().bold(), text),
        ChecklistSeverity::Positive => format!("  {} {}", "✓".green(), text),
    }
}

fn section(title: &str) -> String {
    format!("\n{}\n", style(title).bold())
}

/// Render a full analysis result for one format group.
pub fn format_result(result: &AnalysisResult, group: FormatGroup) -> String {
    let mut out = String::new();
    out.push_str(&format!("{HR}\n"));
    out.push_str(&format!(
        "{}\n",
        style(format!("Analysis — {group} placements")).bold()
    ));
    out.push_str(&format!("{HR}\n"));

    out.push_str(&section("Scorecards"));
    out.push_str(&format!(
        "  {:<15} {:>8}  {}\n",
        "Effectiveness",
        score_value(result.effectiveness_score, "/100"),
        result.effectiveness_justification.dimmed()
    ));
    out.push_str(&format!(
        "  {:<15} {:>8}  {}\n",
        "Clarity",
        score_value(result.clarity_score, "/100"),
        result.clarity_justification.dimmed()
    ));
    out.push_str(&format!(
        "  {:<15} {:>8}  {}\n",
        "Text coverage",
        score_value(result.text_to_image_ratio, "%"),
        result.text_to_image_ratio_justification.dimmed()
    ));
    out.push_str(&format!(
        "  {:<15} {:>8}  {}\n",
        "Funnel stage",
        result.funnel_stage,
        result.funnel_stage_justification.dimmed()
    ));

    if !result.recommendations.is_empty() {
        out.push_str(&section("Recommendations"));
        for item in &result.recommendations {
            out.push_str(&format!(
                "  [{}] {}\n",
                severity_tag(item.severity),
                item.message
            ));
        }
    }

    if !result.advantage_plus_analysis.is_empty() {
        out.push_str(&section("Advantage+ enhancements"));
        for verdict in &result.advantage_plus_analysis {
            let tag = match verdict.applicable {
                Applicability::Activate => format!("{}", "ACTIVATE".green()),
                Applicability::Caution => format!("{}", "CAUTION".yellow()),
            };
            out.push_str(&format!(
                "  {:<10} {} — {}\n",
                tag, verdict.enhancement, verdict.justification
            ));
        }
    }

    if !result.placement_summaries.is_empty() {
        out.push_str(&section("Placements"));
        for critique in &result.placement_summaries {
            match catalog::by_id_str(&critique.placement_id) {
                Some(placement) => {
                    out.push_str(&format!(
                        "  {} {} ({})\n",
                        placement.platform,
                        style(placement.name).bold(),
                        placement.aspect_ratios.join(", ")
                    ));
                    for point in &critique.summary {
                        out.push_str(&format!("    - {point}\n"));
                    }
                }
                None => {
                    out.push_str(&format!(
                        "  {}\n",
                        format!("(unknown placement id {:?} skipped)", critique.placement_id)
                            .dimmed()
                    ));
                }
            }
        }
    }

    out.push_str(&section(&format!(
        "Conclusion: {}",
        result.overall_conclusion.headline
    )));
    for item in &result.overall_conclusion.checklist {
        out.push_str(&checklist_line(item.severity, &item.text));
        out.push('\n');
    }

    out
}

/// Render the placement catalog (optionally filtered to one group).
pub fn format_placements(placements: &[&Placement]) -> String {
    let mut out = String::new();
    for placement in placements {
        let zone = &placement.safe_zone;
        let mut zone_text = format!("top {}%, bottom {}%", zone.top, zone.bottom);
        if let (Some(left), Some(right)) = (zone.left, zone.right) {
            zone_text.push_str(&format!(", left {left}%, right {right}%"));
        }
        out.push_str(&format!(
            "  [{:>2}] {:<16} {:<20} {:<10} {:<22} safe zone: {}\n",
            placement.id.index(),
            placement.platform,
            placement.name,
            format!("{}", placement.group),
            format!(
                "{} ({})",
                placement.recommended_resolution,
                placement.aspect_ratios.join(", ")
            ),
            zone_text
        ));
    }
    out
}

/// One line per loaded creative.
pub fn format_creative_set(set: &CreativeSet) -> String {
    let mut out = String::new();
    for creative in set.iter() {
        out.push_str(&format!(
            "  {} {}  preview {}\n",
            style(format!("{}", creative.slot)).bold(),
            creative.summary(),
            creative.preview.uri().dimmed()
        ));
    }
    out
}

/// Print intake warnings to stderr.
pub fn print_warnings(warnings: &[SlotWarning]) {
    for warning in warnings {
        eprintln!(
            "{} {} slot: {} ({})",
            "warning:".yellow().bold(),
            warning.slot,
            warning.reason,
            warning.path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cria::{ChecklistItem, Conclusion, EnhancementVerdict, FunnelStage, PlacementCritique, RecommendationItem};

    fn sample_result(group: FormatGroup) -> AnalysisResult {
        let placement_summaries = catalog::for_group(group)
            .iter()
            .map(|p| PlacementCritique {
                placement_id: p.id.index().to_string(),
                summary: vec!["Looks native here.".to_string(), "Mind the bottom band.".to_string()],
            })
            .collect();
        AnalysisResult {
            effectiveness_score: 82,
            effectiveness_justification: "Clear offer, strong contrast.".to_string(),
            clarity_score: 64,
            clarity_justification: "Subtitle slightly small.".to_string(),
            text_to_image_ratio: 22,
            text_to_image_ratio_justification: "Acceptable text share.".to_string(),
            funnel_stage: FunnelStage::Tofu,
            funnel_stage_justification: "Awareness-oriented visual.".to_string(),
            recommendations: vec![RecommendationItem {
                severity: Severity::Critical,
                message: "Move the CTA out of the lower fifth.".to_string(),
            }],
            advantage_plus_analysis: vec![EnhancementVerdict {
                enhancement: "Background music".to_string(),
                applicable: Applicability::Activate,
                justification: "Static image with implied motion.".to_string(),
            }],
            placement_summaries,
            overall_conclusion: Conclusion {
                headline: "Ready after one fix".to_string(),
                checklist: vec![
                    ChecklistItem {
                        severity: ChecklistSeverity::Critical,
                        text: "Raise the CTA.".to_string(),
                    },
                    ChecklistItem {
                        severity: ChecklistSeverity::Positive,
                        text: "Colors pop in feed.".to_string(),
                    },
                ],
            },
        }
    }

    #[test]
    fn renders_one_scorecard_per_metric() {
        let output = format_result(&sample_result(FormatGroup::SquareLike), FormatGroup::SquareLike);
        for label in ["Effectiveness", "Clarity", "Text coverage", "Funnel stage"] {
            assert!(output.contains(label), "missing scorecard: {label}");
        }
    }

    #[test]
    fn renders_one_critique_block_per_group_placement() {
        let group = FormatGroup::Vertical;
        let output = format_result(&sample_result(group), group);
        for placement in catalog::for_group(group) {
            assert!(
                output.contains(placement.name),
                "missing placement: {}",
                placement.name
            );
        }
        // Two bullets per placement in the sample.
        let bullets = output.matches("    - ").count();
        assert_eq!(bullets, catalog::for_group(group).len() * 2);
    }

    #[test]
    fn unknown_placement_ids_are_skipped_visibly() {
        let mut result = sample_result(FormatGroup::SquareLike);
        result.placement_summaries.push(PlacementCritique {
            placement_id: "99".to_string(),
            summary: vec!["ghost".to_string()],
        });
        let output = format_result(&result, FormatGroup::SquareLike);
        assert!(output.contains("unknown placement id"));
        assert!(!output.contains("ghost"));
    }

    #[test]
    fn conclusion_checklist_is_rendered_with_markers() {
        let output = format_result(&sample_result(FormatGroup::SquareLike), FormatGroup::SquareLike);
        assert!(output.contains("Ready after one fix"));
        assert!(output.contains("Raise the CTA."));
        assert!(output.contains("Colors pop in feed."));
    }

    #[test]
    fn placement_table_lists_whole_catalog() {
        let all: Vec<&Placement> = catalog::PLACEMENTS.iter().collect();
        let output = format_placements(&all);
        assert_eq!(output.lines().count(), catalog::PLACEMENTS.len());
        assert!(output.contains("Marketplace"));
        assert!(output.contains("Audience Network"));
    }
}
