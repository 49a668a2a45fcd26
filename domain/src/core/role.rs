//! Executive role value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One simulated executive persona on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Ceo,
    Cfo,
    Cto,
    Cmo,
    Coo,
}

impl Role {
    /// All roles the panel knows about, in canonical order
    pub fn all() -> &'static [Role] {
        &[Role::Ceo, Role::Cfo, Role::Cto, Role::Cmo, Role::Coo]
    }

    /// Short title used in transcripts and API payloads
    pub fn title(&self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Cfo => "CFO",
            Role::Cto => "CTO",
            Role::Cmo => "CMO",
            Role::Coo => "COO",
        }
    }

    /// Persona name shown to the presenter
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Ceo => "Sarah Chen",
            Role::Cfo => "Michael Rodriguez",
            Role::Cto => "Dr. Lisa Kincaid",
            Role::Cmo => "James Thompson",
            Role::Coo => "Rebecca Johnson",
        }
    }

    /// Focus area fed into the generation prompt for this role
    pub fn focus(&self) -> &'static str {
        match self {
            Role::Ceo => "strategic vision, overall business direction, and long-term growth",
            Role::Cfo => "financial viability, revenue models, costs, and profitability",
            Role::Cto => "technical feasibility, technology infrastructure, and innovation",
            Role::Cmo => "market positioning, customer acquisition, and competitive differentiation",
            Role::Coo => "operational efficiency, process optimization, and execution",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Error returned when parsing an unknown role title
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CEO" => Ok(Role::Ceo),
            "CFO" => Ok(Role::Cfo),
            "CTO" => Ok(Role::Cto),
            "CMO" => Ok(Role::Cmo),
            "COO" => Ok(Role::Coo),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in Role::all() {
            let parsed: Role = role.title().parse().unwrap();
            assert_eq!(parsed, *role);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("cfo".parse::<Role>().unwrap(), Role::Cfo);
        assert_eq!(" ceo ".parse::<Role>().unwrap(), Role::Ceo);
    }

    #[test]
    fn test_unknown_role_fails() {
        assert!("CIO".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_matches_title() {
        assert_eq!(Role::Cto.to_string(), "CTO");
    }
}
