//! Executive rotation scheduler
//!
//! Pure selection of the next role to speak: balance turn counts, and
//! round-robin fairly among roles tied at the minimum.

use crate::core::role::Role;
use crate::session::log::ConversationLog;

/// Choose the role that asks the next question.
///
/// Roles with the fewest limit-counting questions are candidates. A
/// single minimum wins outright. On a tie, the cyclic successor (within
/// the tied subset, in configured order) of the tied role that spoke
/// most recently wins; tied roles that have not spoken yet fall back to
/// the empty-log rule. An empty log yields the CEO when present,
/// otherwise the first configured role.
///
/// Returns `None` only for an empty role set.
pub fn next_role(roles: &[Role], log: &ConversationLog) -> Option<Role> {
    if roles.is_empty() {
        return None;
    }

    let counts: Vec<usize> = roles.iter().map(|r| log.question_count_for(*r)).collect();
    let min = *counts.iter().min().expect("roles is non-empty");

    let tied: Vec<Role> = roles
        .iter()
        .zip(&counts)
        .filter(|(_, c)| **c == min)
        .map(|(r, _)| *r)
        .collect();

    if tied.len() == 1 {
        return Some(tied[0]);
    }

    // Most recent limit-counting question asked by any tied role.
    let last_tied_speaker = log
        .turns()
        .iter()
        .rev()
        .filter(|t| t.counts_toward_limit())
        .map(|t| t.role)
        .find(|r| tied.contains(r));

    match last_tied_speaker {
        Some(recent) => {
            let pos = tied.iter().position(|r| *r == recent).expect("recent is tied");
            Some(tied[(pos + 1) % tied.len()])
        }
        None => {
            if tied.contains(&Role::Ceo) {
                Some(Role::Ceo)
            } else {
                Some(tied[0])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::turn::Turn;
    use chrono::Utc;

    fn log_with(questions: &[(Role, &str)]) -> ConversationLog {
        let mut log = ConversationLog::new();
        for (i, (role, text)) in questions.iter().enumerate() {
            log.append(Turn::question(i + 1, *role, *text, None, Utc::now()));
        }
        log
    }

    #[test]
    fn test_empty_log_prefers_ceo() {
        let log = ConversationLog::new();
        let roles = [Role::Cfo, Role::Ceo, Role::Cto];
        assert_eq!(next_role(&roles, &log), Some(Role::Ceo));
    }

    #[test]
    fn test_empty_log_without_ceo_takes_first() {
        let log = ConversationLog::new();
        let roles = [Role::Cmo, Role::Coo];
        assert_eq!(next_role(&roles, &log), Some(Role::Cmo));
    }

    #[test]
    fn test_single_minimum_wins() {
        let roles = [Role::Ceo, Role::Cfo, Role::Cto];
        let log = log_with(&[(Role::Ceo, "q1"), (Role::Cfo, "q2")]);
        assert_eq!(next_role(&roles, &log), Some(Role::Cto));
    }

    #[test]
    fn test_tie_round_robins_within_tied_subset() {
        let roles = [Role::Ceo, Role::Cfo, Role::Cto];
        // All tied at 1; CFO spoke most recently among the tied set, so
        // its cyclic successor CTO goes next.
        let log = log_with(&[(Role::Cto, "q1"), (Role::Ceo, "q2"), (Role::Cfo, "q3")]);
        assert_eq!(next_role(&roles, &log), Some(Role::Cto));
    }

    #[test]
    fn test_tie_wraps_cyclically() {
        let roles = [Role::Ceo, Role::Cfo];
        let log = log_with(&[(Role::Ceo, "q1"), (Role::Cfo, "q2")]);
        assert_eq!(next_role(&roles, &log), Some(Role::Ceo));
    }

    #[test]
    fn test_followups_do_not_affect_rotation() {
        let roles = [Role::Ceo, Role::Cfo];
        let mut log = log_with(&[(Role::Ceo, "q1")]);
        log.append(Turn::followup(2, Role::Ceo, "f1", Utc::now()));
        assert_eq!(next_role(&roles, &log), Some(Role::Cfo));
    }

    #[test]
    fn test_never_returns_role_outside_set() {
        let roles = [Role::Cmo, Role::Coo];
        let log = log_with(&[(Role::Cmo, "q1"), (Role::Coo, "q2"), (Role::Cmo, "q3")]);
        let picked = next_role(&roles, &log).unwrap();
        assert!(roles.contains(&picked));
    }

    #[test]
    fn test_fairness_over_role_count_window() {
        // Starting balanced, |R| consecutive picks cover every role.
        let roles = [Role::Ceo, Role::Cfo, Role::Cto];
        let mut log = ConversationLog::new();
        let mut seen = Vec::new();
        for i in 0..roles.len() {
            let picked = next_role(&roles, &log).unwrap();
            seen.push(picked);
            log.append(Turn::question(i + 1, picked, "q", None, Utc::now()));
        }
        for role in &roles {
            assert!(seen.contains(role), "{role} was starved");
        }
    }

    #[test]
    fn test_empty_role_set() {
        assert_eq!(next_role(&[], &ConversationLog::new()), None);
    }
}
