//! Agent registry.
//!
//! Rules look agents up by a stable role key against a registry built once
//! at startup and injected into the engine. A missing or deactivated
//! profile suppresses that agent's intervention writes without disabling
//! rule evaluation — bookkeeping such as nudge counters still advances.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable key binding a rule to the agent personality that speaks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Participation rules: individual inactivity and equity.
    Facilitator,
    /// The evidence rule.
    Socratic,
}

impl AgentRole {
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Facilitator => "facilitator",
            Self::Socratic => "socratic",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facilitator" => Ok(Self::Facilitator),
            "socratic" => Ok(Self::Socratic),
            other => Err(format!("unknown agent role: {other}")),
        }
    }
}

/// A named agent personality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: AgentRole,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// Registry mapping roles to profiles, injected into each rule evaluator.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    profiles: HashMap<AgentRole, AgentProfile>,
}

impl AgentRegistry {
    /// Registry with the two built-in agents, both active.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            AgentRole::Facilitator,
            AgentProfile {
                role: AgentRole::Facilitator,
                name: "Facilitator Agent".to_owned(),
                description: "Encourages quiet members and balanced participation".to_owned(),
                is_active: true,
            },
        );
        profiles.insert(
            AgentRole::Socratic,
            AgentProfile {
                role: AgentRole::Socratic,
                name: "Socratic Agent".to_owned(),
                description: "Asks for evidence behind unsupported claims".to_owned(),
                is_active: true,
            },
        );
        Self { profiles }
    }

    /// Defaults, minus the roles named in `AGORA_DISABLE_AGENTS`
    /// (comma-separated role keys). Unknown keys are logged and skipped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut registry = Self::with_defaults();
        if let Ok(raw) = std::env::var("AGORA_DISABLE_AGENTS") {
            for key in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
                match key.parse::<AgentRole>() {
                    Ok(role) => registry.deactivate(role),
                    Err(_) => {
                        tracing::warn!(key, "unknown agent role in AGORA_DISABLE_AGENTS");
                    },
                }
            }
        }
        registry
    }

    /// Empty registry, for exercising the missing-agent path.
    #[must_use]
    pub fn empty() -> Self {
        Self { profiles: HashMap::new() }
    }

    /// The profile for `role`, active or not.
    #[must_use]
    pub fn get(&self, role: AgentRole) -> Option<&AgentProfile> {
        self.profiles.get(&role)
    }

    /// The profile for `role` only if it exists and is active.
    #[must_use]
    pub fn active(&self, role: AgentRole) -> Option<&AgentProfile> {
        self.profiles.get(&role).filter(|p| p.is_active)
    }

    /// Mark a role inactive if present.
    pub fn deactivate(&mut self, role: AgentRole) {
        if let Some(profile) = self.profiles.get_mut(&role) {
            profile.is_active = false;
        }
    }

    /// All profiles, sorted by role key for stable listings.
    #[must_use]
    pub fn profiles(&self) -> Vec<&AgentProfile> {
        let mut all: Vec<&AgentProfile> = self.profiles.values().collect();
        all.sort_by_key(|p| p.role.key());
        all
    }
}
