//! Rule-based scenario batch.
//!
//! Produces between two and five scenarios from the enriched preferences:
//! ideal, tradeoff, challenge, medium, wildcard, in that order. Ideal and
//! wildcard are always present; the others depend on what the user stated.

use super::preference::{by_importance, join_factors, Preference};
use super::scenario::{Scenario, ScenarioKind};

/// True when the topic is about a job, which switches the scenario wording.
pub fn is_job_topic(topic: &str) -> bool {
    topic.to_lowercase().contains("job")
}

/// Builds the rule-based batch.
pub fn fallback_scenarios(preferences: &[Preference], topic: &str) -> Vec<Scenario> {
    let job = is_job_topic(topic);
    let sorted = by_importance(preferences);
    let high: Vec<&Preference> = sorted.iter().copied().filter(|p| p.is_high_priority()).collect();
    let medium: Vec<&Preference> = sorted.iter().copied().filter(|p| p.is_medium_priority()).collect();

    let mut scenarios = vec![ideal(&high, job)];

    if let [first, second, ..] = high.as_slice() {
        scenarios.push(tradeoff(first, second, job));
    }

    if let Some((pref, limit)) = preferences
        .iter()
        .find_map(|p| p.stated_limit().map(|limit| (p, limit)))
    {
        scenarios.push(challenge(pref, limit));
    }

    if let Some(focus) = medium.first() {
        scenarios.push(medium_focus(focus));
    }

    scenarios.push(wildcard(job));
    scenarios
}

fn ideal(high: &[&Preference], job: bool) -> Scenario {
    let top = join_factors(high, 3);
    if job {
        Scenario::new(
            ScenarioKind::Ideal.id(),
            "The Dream Opportunity",
            format!(
                "You've found a role that checks most of your boxes: {top} are all excellent. \
                 The company culture is supportive, the compensation is competitive, and there's \
                 clear growth potential. It feels almost too good to be true, but the offer is \
                 real and they want you to start soon."
            ),
        )
    } else {
        Scenario::new(
            ScenarioKind::Ideal.id(),
            "Perfect Match",
            format!(
                "This option strongly delivers on your top priorities: {top}. Everything seems \
                 to align with what you've said matters most, and you can easily envision \
                 yourself thriving in this situation."
            ),
        )
    }
}

fn tradeoff(first: &Preference, second: &Preference, job: bool) -> Scenario {
    let strong = first.factor_lower();
    let weak = second.factor_lower();
    if job {
        Scenario::new(
            ScenarioKind::Tradeoff.id(),
            "The Difficult Choice",
            format!(
                "This role excels in {strong} - exactly what you wanted. However, the {weak} is \
                 significantly below your expectations. The hiring manager is honest about this \
                 limitation but emphasizes the strengths. You have to decide what matters more \
                 to your long-term happiness."
            ),
        )
    } else {
        Scenario::new(
            ScenarioKind::Tradeoff.id(),
            "Competing Priorities",
            format!(
                "This option delivers exceptionally on {strong} but falls short on {weak}. You \
                 can't have both, and the choice forces you to confront which factor truly \
                 drives your decision."
            ),
        )
    }
}

fn challenge(pref: &Preference, limit: &str) -> Scenario {
    Scenario::new(
        ScenarioKind::Challenge.id(),
        "Testing Your Limits",
        format!(
            "Everything else about this opportunity is appealing, but the {} doesn't meet your \
             stated requirement of '{limit}'. The decision maker acknowledges this but asks if \
             you'd consider making an exception given the other strong points. How firm are \
             your boundaries?",
            pref.factor_lower()
        ),
    )
}

fn medium_focus(pref: &Preference) -> Scenario {
    Scenario::new(
        ScenarioKind::Medium.id(),
        "The Unexpected Appeal",
        format!(
            "While this option is average on your top priorities, it surprisingly excels at {} \
             in ways you hadn't fully considered. It makes you wonder if you've been focusing on \
             the right factors, or if this 'nice-to-have' might actually matter more than you \
             thought.",
            pref.factor_lower()
        ),
    )
}

fn wildcard(job: bool) -> Scenario {
    if job {
        Scenario::new(
            ScenarioKind::Wildcard.id(),
            "The Curveball Opportunity",
            "A completely different type of role has emerged - one you never considered but \
             that people in your network are excited about. It doesn't match your stated \
             preferences exactly, but it offers unique advantages that don't fit neatly into \
             your original framework. Your gut reaction will tell you a lot about whether \
             you've been thinking too narrowly.",
        )
    } else {
        Scenario::new(
            ScenarioKind::Wildcard.id(),
            "The Dark Horse Option",
            "An unconventional choice has appeared that doesn't fit your original criteria but \
             offers unique benefits you hadn't considered. It challenges your assumptions about \
             what you need and might reveal preferences you didn't know you had.",
        )
    }
}
