//! Markdown report rendered from a session snapshot.

use std::fmt::Write;

use crate::domain::reflection::{by_importance, latest_for, ReactionPatternSummary};

use super::snapshot::SessionSnapshot;

/// Freeform placeholder some clients send when the user typed nothing.
const EMPTY_THOUGHTS: &str = "No additional thoughts";

/// Renders the decision analysis report.
///
/// Sections appear only when the snapshot has data for them.
pub fn render_markdown_report(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, snapshot);
    out
}

fn write_report(out: &mut String, snapshot: &SessionSnapshot) -> std::fmt::Result {
    writeln!(out, "# Feel Forward Decision Analysis Report\n")?;
    writeln!(out, "**Decision Topic:** {}", snapshot.topic)?;
    writeln!(out, "**Analysis Date:** {}\n", snapshot.timestamp.display_local())?;

    if snapshot.has_insights() {
        writeln!(out, "## Executive Summary\n\n{}\n", snapshot.insights)?;
    }

    let ranked = by_importance(&snapshot.preferences);

    if !ranked.is_empty() {
        writeln!(out, "## Top Priorities\n")?;
        for (i, pref) in ranked.iter().take(3).enumerate() {
            writeln!(
                out,
                "{}. **{}** (Importance: {})",
                i + 1,
                pref.factor,
                pref.importance
            )?;
            if let Some(limit) = pref.stated_limit() {
                writeln!(out, "   - Requirement: {}", limit)?;
            }
        }
        writeln!(out)?;
    }

    if let Some(patterns) = ReactionPatternSummary::from_reactions(&snapshot.reactions) {
        writeln!(out, "## Emotional Response Patterns\n")?;
        writeln!(out, "- **Average Excitement:** {:.1}/10", patterns.avg_excitement)?;
        writeln!(out, "- **Average Anxiety:** {:.1}/10", patterns.avg_anxiety)?;
        writeln!(out, "- **Emotional Tendency:** {}", patterns.emotional_tendency)?;
        writeln!(
            out,
            "- **High Excitement Scenarios:** {}",
            patterns.high_excitement_scenarios
        )?;
        writeln!(
            out,
            "- **High Anxiety Scenarios:** {}\n",
            patterns.high_anxiety_scenarios
        )?;
    }

    if !snapshot.scenarios.is_empty() && !snapshot.reactions.is_empty() {
        writeln!(out, "## Scenario Reactions\n")?;
        for scenario in &snapshot.scenarios {
            let Some(reaction) = latest_for(&snapshot.reactions, &scenario.id) else {
                continue;
            };
            writeln!(out, "### {}", scenario.title)?;
            writeln!(
                out,
                "**Excitement:** {} | **Anxiety:** {}\n",
                reaction.excitement, reaction.anxiety
            )?;
            writeln!(out, "{}\n", scenario.text)?;
            if let Some(thoughts) = reaction
                .freeform
                .as_deref()
                .filter(|t| !t.is_empty() && *t != EMPTY_THOUGHTS)
            {
                writeln!(out, "**Your thoughts:** {}\n", thoughts)?;
            }
        }
    }

    if !ranked.is_empty() {
        writeln!(out, "## Complete Preference Analysis\n")?;
        for pref in &ranked {
            write!(out, "- **{}:** {}", pref.factor, pref.importance)?;
            if let Some(limit) = pref.stated_limit() {
                write!(out, " (Requirement: {})", limit)?;
            }
            if let Some(tradeoff) = &pref.tradeoff {
                write!(out, " - {}", tradeoff)?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "\n---\n*Generated by Feel Forward Decision Analysis Tool*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Score, SessionId, SessionStatus};
    use crate::domain::reflection::{Preference, Reaction, Scenario};

    fn pref(factor: &str, importance: u8) -> Preference {
        Preference::selection(factor).with_importance(Score::new(importance))
    }

    fn full_snapshot() -> SessionSnapshot {
        SessionSnapshot::new(
            SessionId::new(),
            "choosing a job",
            vec![],
            vec![
                pref("Weather", 5),
                pref("Salary", 9)
                    .with_limit("minimum $60k")
                    .with_tradeoff("Might accept lower on other preferences"),
                pref("Team culture", 7),
                pref("Commute", 8),
            ],
            vec![
                Scenario::new("ideal", "The Dream Opportunity", "A great role."),
                Scenario::new("wildcard", "The Curveball Opportunity", "Something else."),
            ],
            vec![
                Reaction::new("ideal", Score::new(9), Score::new(1)).with_freeform("first take"),
                Reaction::new("ideal", Score::new(4), Score::new(6)).with_freeform("second thoughts"),
            ],
            "You light up at stability.",
            SessionStatus::Completed,
        )
    }

    #[test]
    fn renders_all_sections_in_order() {
        let report = render_markdown_report(&full_snapshot());

        let positions: Vec<usize> = [
            "# Feel Forward Decision Analysis Report",
            "## Executive Summary",
            "## Top Priorities",
            "## Emotional Response Patterns",
            "## Scenario Reactions",
            "## Complete Preference Analysis",
            "*Generated by Feel Forward Decision Analysis Tool*",
        ]
        .iter()
        .map(|h| report.find(h).unwrap_or_else(|| panic!("missing {h}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn top_priorities_are_three_highest_with_requirements() {
        let report = render_markdown_report(&full_snapshot());

        assert!(report.contains("1. **Salary** (Importance: 9/10)\n   - Requirement: minimum $60k"));
        assert!(report.contains("2. **Commute** (Importance: 8/10)"));
        assert!(report.contains("3. **Team culture** (Importance: 7/10)"));
        assert!(!report.contains("4. **Weather**"));
    }

    #[test]
    fn scenario_section_uses_latest_reaction() {
        let report = render_markdown_report(&full_snapshot());

        assert!(report.contains("**Excitement:** 4/10 | **Anxiety:** 6/10"));
        assert!(report.contains("**Your thoughts:** second thoughts"));
        assert!(!report.contains("first take"));
        // no reaction captured for the wildcard
        assert!(!report.contains("### The Curveball Opportunity"));
    }

    #[test]
    fn preference_analysis_includes_tradeoffs() {
        let report = render_markdown_report(&full_snapshot());
        assert!(report.contains(
            "- **Salary:** 9/10 (Requirement: minimum $60k) - Might accept lower on other preferences"
        ));
    }

    #[test]
    fn empty_snapshot_has_only_header_and_footer() {
        let snap = SessionSnapshot::new(
            SessionId::new(),
            "moving",
            vec![],
            vec![],
            vec![],
            vec![],
            "",
            SessionStatus::InProgress,
        );
        let report = render_markdown_report(&snap);

        assert!(report.contains("**Decision Topic:** moving"));
        assert!(!report.contains("## "));
        assert!(report.ends_with("*Generated by Feel Forward Decision Analysis Tool*\n"));
    }
}
