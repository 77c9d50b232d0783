//! Subscription plans
//!
//! This module defines the subscription plans an organization can be on and
//! how each plan is labelled. Plans are read-only on the client; they come from
//! the backend, except for the provisional value used right after creation.

use serde::{Deserialize, Serialize};

/// Subscription plan for an organization.
///
/// # Plans
///
/// - **Starter**: Entry plan
/// - **Professional**: Default plan for newly created organizations
/// - **Enterprise**: Full-featured plan
///
/// Any other value the backend sends is kept verbatim in `Other` and rendered
/// with its raw name and a neutral badge.
///
/// # Examples
///
/// ```
/// use orgdesk_org::{BadgeTone, Plan};
///
/// let plan: Plan = serde_json::from_str("\"enterprise\"").unwrap();
/// assert_eq!(plan.display_label(), "Entreprise");
///
/// let legacy: Plan = serde_json::from_str("\"legacy-2019\"").unwrap();
/// assert_eq!(legacy.display_label(), "legacy-2019");
/// assert_eq!(legacy.badge_tone(), BadgeTone::Neutral);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    /// Entry plan
    Starter,

    /// Professional plan
    Professional,

    /// Enterprise plan
    Enterprise,

    /// Plan name this client does not know about
    Other(String),
}

impl Plan {
    /// Parse a plan name (case-insensitive). Unknown names are preserved.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "starter" => Self::Starter,
            "professional" => Self::Professional,
            "enterprise" => Self::Enterprise,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Get string representation of the plan.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
            Self::Other(name) => name,
        }
    }

    /// Get the label shown on the plan badge.
    pub fn display_label(&self) -> &str {
        match self {
            Self::Starter => "Débutant",
            Self::Professional => "Professionnel",
            Self::Enterprise => "Entreprise",
            Self::Other(name) => name,
        }
    }

    /// Get the colour family of the plan badge.
    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            Self::Starter => BadgeTone::Green,
            Self::Professional => BadgeTone::Blue,
            Self::Enterprise => BadgeTone::Purple,
            Self::Other(_) => BadgeTone::Neutral,
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::Professional
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        plan.as_str().to_string()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    /// Enterprise
    Purple,
    /// Professional
    Blue,
    /// Starter
    Green,
    /// Unstyled
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse() {
        assert_eq!(Plan::parse("starter"), Plan::Starter);
        assert_eq!(Plan::parse("Professional"), Plan::Professional);
        assert_eq!(Plan::parse("ENTERPRISE"), Plan::Enterprise);
        assert_eq!(Plan::parse("gold"), Plan::Other("gold".to_string()));
    }

    #[test]
    fn test_plan_labels_and_tones() {
        assert_eq!(Plan::Starter.display_label(), "Débutant");
        assert_eq!(Plan::Professional.display_label(), "Professionnel");
        assert_eq!(Plan::Starter.badge_tone(), BadgeTone::Green);
        assert_eq!(Plan::Professional.badge_tone(), BadgeTone::Blue);
        assert_eq!(Plan::Enterprise.badge_tone(), BadgeTone::Purple);
    }

    #[test]
    fn test_plan_default_is_professional() {
        assert_eq!(Plan::default(), Plan::Professional);
    }

    #[test]
    fn test_unknown_plan_keeps_its_name() {
        let plan: Plan = serde_json::from_str("\"team\"").unwrap();
        assert_eq!(plan, Plan::Other("team".to_string()));
        assert_eq!(serde_json::to_string(&plan).unwrap(), "\"team\"");
    }
}
