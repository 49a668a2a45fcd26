//! Append-only conversation log
//!
//! Insertion order is semantic order: the de-duplication window, the
//! generation context window, and the circuit breaker all read recent
//! entries straight off the tail.

use crate::core::role::Role;
use crate::session::turn::Turn;
use serde::{Deserialize, Serialize};

/// Ordered sequence of turns for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Next sequence number for an appended turn (1-indexed)
    pub fn next_seq(&self) -> usize {
        self.turns.len() + 1
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn last_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    /// Number of limit-counting questions this role has asked
    pub fn question_count_for(&self, role: Role) -> usize {
        self.turns
            .iter()
            .filter(|t| t.counts_toward_limit() && t.role == role)
            .count()
    }

    /// The most recent `n` question texts (any kind except closing),
    /// newest last. Used as the de-duplication window.
    pub fn recent_questions(&self, n: usize) -> Vec<&str> {
        self.turns
            .iter()
            .filter(|t| !t.is_closing)
            .rev()
            .take(n)
            .map(|t| t.question.as_str())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// The most recent answered exchanges, oldest first, for prompt
    /// conditioning.
    pub fn recent_exchanges(&self, n: usize) -> Vec<&Turn> {
        self.turns
            .iter()
            .filter(|t| t.is_answered())
            .rev()
            .take(n)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// True when the last three limit-counting questions are textually
    /// identical. This is the degenerate-synthesizer signal the circuit
    /// breaker trips on.
    pub fn last_questions_degenerate(&self) -> bool {
        let recent: Vec<&str> = self
            .turns
            .iter()
            .filter(|t| t.counts_toward_limit())
            .rev()
            .take(3)
            .map(|t| t.question.as_str())
            .collect();

        recent.len() == 3 && recent[0] == recent[1] && recent[1] == recent[2]
    }

    /// Distinct roles that spoke, in order of first appearance
    pub fn roles_involved(&self) -> Vec<Role> {
        let mut roles = Vec::new();
        for turn in &self.turns {
            if !roles.contains(&turn.role) {
                roles.push(turn.role);
            }
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::turn::AnswerModality;
    use chrono::Utc;

    fn question(seq: usize, role: Role, text: &str) -> Turn {
        Turn::question(seq, role, text, None, Utc::now())
    }

    #[test]
    fn test_question_counts_exclude_followups() {
        let mut log = ConversationLog::new();
        log.append(question(1, Role::Ceo, "Q1"));
        log.append(Turn::followup(2, Role::Ceo, "F1", Utc::now()));
        log.append(question(3, Role::Cfo, "Q2"));

        assert_eq!(log.question_count_for(Role::Ceo), 1);
        assert_eq!(log.question_count_for(Role::Cfo), 1);
        assert_eq!(log.question_count_for(Role::Cto), 0);
    }

    #[test]
    fn test_recent_questions_window() {
        let mut log = ConversationLog::new();
        for (i, text) in ["a", "b", "c", "d"].iter().enumerate() {
            log.append(question(i + 1, Role::Ceo, text));
        }
        assert_eq!(log.recent_questions(2), vec!["c", "d"]);
    }

    #[test]
    fn test_recent_exchanges_only_answered() {
        let mut log = ConversationLog::new();
        let mut q1 = question(1, Role::Ceo, "Q1");
        q1.record_answer("A1", AnswerModality::Text, Utc::now());
        log.append(q1);
        log.append(question(2, Role::Cfo, "Q2"));

        let exchanges = log.recent_exchanges(5);
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].question, "Q1");
    }

    #[test]
    fn test_degenerate_detection() {
        let mut log = ConversationLog::new();
        log.append(question(1, Role::Ceo, "same"));
        log.append(question(2, Role::Cfo, "same"));
        assert!(!log.last_questions_degenerate());

        log.append(question(3, Role::Cto, "same"));
        assert!(log.last_questions_degenerate());
    }

    #[test]
    fn test_degenerate_ignores_followups() {
        let mut log = ConversationLog::new();
        log.append(question(1, Role::Ceo, "same"));
        log.append(question(2, Role::Cfo, "same"));
        log.append(Turn::followup(3, Role::Cfo, "different", Utc::now()));
        log.append(question(4, Role::Cto, "same"));
        assert!(log.last_questions_degenerate());
    }

    #[test]
    fn test_roles_involved_in_first_appearance_order() {
        let mut log = ConversationLog::new();
        log.append(question(1, Role::Cfo, "Q1"));
        log.append(question(2, Role::Ceo, "Q2"));
        log.append(question(3, Role::Cfo, "Q3"));
        assert_eq!(log.roles_involved(), vec![Role::Cfo, Role::Ceo]);
    }
}
