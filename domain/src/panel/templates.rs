//! Deterministic question templates and closing messages
//!
//! The template library is the non-AI question supplier: indexed by
//! turn number so repeated fallbacks walk the list instead of repeating
//! one entry, with the selected topic text substituted in.

use crate::core::role::Role;

const CEO_TEMPLATES: &[&str] = &[
    "How does {topic} align with your long-term vision for the business?",
    "What are the biggest risks if {topic} does not play out the way you expect?",
    "Why would {topic} create a sustainable competitive advantage?",
];

const CFO_TEMPLATES: &[&str] = &[
    "What are the financial implications of {topic}?",
    "How will {topic} affect your margin profile over the next two years?",
    "What is the expected return timeline on {topic}?",
];

const CTO_TEMPLATES: &[&str] = &[
    "What technology infrastructure does {topic} actually require?",
    "How well does {topic} scale as usage grows?",
    "What technical risks come along with {topic}?",
];

const CMO_TEMPLATES: &[&str] = &[
    "How will {topic} resonate with your target market?",
    "How does {topic} differentiate you from competitors?",
    "How will you measure whether {topic} is working in the market?",
];

const COO_TEMPLATES: &[&str] = &[
    "How will you execute {topic} operationally?",
    "What resources does {topic} demand, and do you have them today?",
    "Which operational bottlenecks could derail {topic}?",
];

fn templates_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Ceo => CEO_TEMPLATES,
        Role::Cfo => CFO_TEMPLATES,
        Role::Cto => CTO_TEMPLATES,
        Role::Cmo => CMO_TEMPLATES,
        Role::Coo => COO_TEMPLATES,
    }
}

/// Condense an extracted topic into a phrase that reads mid-sentence.
///
/// Analyzer items follow a "Label: claim - justification" shape; the
/// label and trailing justification are dropped and the first letter
/// lowered.
pub fn topic_snippet(topic: &str) -> String {
    let body = topic
        .split_once(':')
        .map(|(label, rest)| {
            if matches!(label.trim(), "Recommendation" | "Analysis" | "Assumption") {
                rest
            } else {
                topic
            }
        })
        .unwrap_or(topic);

    let claim = body.split(" - ").next().unwrap_or(body).trim();

    let mut chars = claim.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => claim.to_string(),
    }
}

/// Deterministic template question for a role and turn number.
///
/// Turn numbers are 1-indexed; selection wraps modulo the role's
/// template list length.
pub fn template_question(role: Role, turn_number: u32, topic: Option<&str>) -> String {
    let templates = templates_for(role);
    let index = (turn_number.saturating_sub(1) as usize) % templates.len();
    let snippet = topic
        .map(topic_snippet)
        .unwrap_or_else(|| "your proposal".to_string());
    templates[index].replace("{topic}", &snippet)
}

/// Closing messages the lead role can deliver; the caller picks one
/// through the injected random seam.
pub fn closing_messages(company_name: &str, report_type: &str) -> Vec<String> {
    vec![
        format!(
            "Thank you for presenting your {report_type} for {company_name}. Your responses demonstrate strategic thinking."
        ),
        format!(
            "Excellent presentation of {company_name}'s strategy. You've addressed our key concerns well."
        ),
        format!(
            "Thank you for the comprehensive overview. Your {report_type} shows promise for {company_name}."
        ),
    ]
}
