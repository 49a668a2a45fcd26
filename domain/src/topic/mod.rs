//! Topic bank extracted from the presented document
//!
//! A topic is one challengeable statement pulled out of the document:
//! a strategic recommendation, a supporting analysis, or an underlying
//! assumption. Topics are immutable once extracted; their index within
//! the bank is the stable identifier recorded on each question turn.

use serde::{Deserialize, Serialize};

/// A single extracted discussion item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    index: usize,
    text: String,
}

impl Topic {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, immutable collection of candidate discussion items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicBank {
    topics: Vec<Topic>,
}

impl TopicBank {
    /// Build a bank from extracted item texts, skipping blank entries.
    ///
    /// Returns `None` when no usable items remain; callers should fall
    /// back to [`TopicBank::fallback`] in that case.
    pub fn from_items(items: Vec<String>) -> Option<Self> {
        let topics: Vec<Topic> = items
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .enumerate()
            .map(|(index, text)| Topic { index, text })
            .collect();

        if topics.is_empty() { None } else { Some(Self { topics }) }
    }

    /// Static bank used when the document analyzer is unavailable or
    /// returns nothing usable. Mirrors the recommendation / analysis /
    /// assumption framing of analyzer output.
    pub fn fallback(company_name: &str, industry: &str) -> Self {
        let items = vec![
            format!(
                "Recommendation: {company_name} proposes entering new market segments in {industry} - based on current capabilities"
            ),
            "Analysis: Target market sizing and opportunity assessment - projects significant growth potential".to_string(),
            "Recommendation: Implement new pricing strategy to improve margins - competitive positioning approach".to_string(),
            "Assumption: Customer adoption rate will reach 25% within 18 months - critical for revenue projections".to_string(),
            "Analysis: Competitive landscape assessment - identifies key differentiators and gaps".to_string(),
            "Recommendation: Invest in technology infrastructure upgrades - required for scaling operations".to_string(),
            "Analysis: Financial projections show profitability in year 2 - assumes 30% annual growth".to_string(),
            "Assumption: Market growth rate of 15% annually - underpins revenue forecasts".to_string(),
            "Recommendation: Form strategic partnerships to accelerate market entry - reduces time to market".to_string(),
            "Analysis: Resource requirements and operational costs - detailed breakdown of investments needed".to_string(),
            "Assumption: Limited competitive response in first 12 months - window of opportunity".to_string(),
            "Recommendation: Launch customer acquisition campaign targeting early adopters - phased rollout plan".to_string(),
        ];

        Self::from_items(items).expect("fallback bank is never empty")
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Indices not yet present in `used`, in bank order.
    ///
    /// When every topic has been used the full index range is returned,
    /// so selection recycles the bank instead of stalling.
    pub fn available_indices(&self, used: &std::collections::BTreeSet<usize>) -> Vec<usize> {
        let unused: Vec<usize> = (0..self.topics.len()).filter(|i| !used.contains(i)).collect();
        if unused.is_empty() { (0..self.topics.len()).collect() } else { unused }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_from_items_assigns_stable_indices() {
        let bank = TopicBank::from_items(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.get(1).unwrap().text(), "b");
        assert_eq!(bank.get(1).unwrap().index(), 1);
    }

    #[test]
    fn test_blank_items_are_dropped() {
        let bank = TopicBank::from_items(vec!["  ".into(), "keep".into()]).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get(0).unwrap().text(), "keep");
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(TopicBank::from_items(vec![]).is_none());
        assert!(TopicBank::from_items(vec!["".into()]).is_none());
    }

    #[test]
    fn test_fallback_is_populated_and_parameterized() {
        let bank = TopicBank::fallback("Acme", "Robotics");
        assert!(bank.len() >= 10);
        assert!(bank.get(0).unwrap().text().contains("Acme"));
        assert!(bank.get(0).unwrap().text().contains("Robotics"));
    }

    #[test]
    fn test_available_prefers_unused() {
        let bank = TopicBank::from_items(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let used: BTreeSet<usize> = [0, 2].into_iter().collect();
        assert_eq!(bank.available_indices(&used), vec![1]);
    }

    #[test]
    fn test_exhausted_bank_recycles() {
        let bank = TopicBank::from_items(vec!["a".into(), "b".into()]).unwrap();
        let used: BTreeSet<usize> = [0, 1].into_iter().collect();
        assert_eq!(bank.available_indices(&used), vec![0, 1]);
    }
}
