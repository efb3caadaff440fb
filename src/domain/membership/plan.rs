//! Membership plan definitions.
//!
//! The roadside membership is sold in three monthly plans.

use serde::{Deserialize, Serialize};

/// Membership plan a customer is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Essential - $19/mo.
    Essential,

    /// Premium - $39/mo.
    Premium,

    /// Ohana (family) - $59/mo.
    Ohana,
}

impl PlanType {
    pub const ALL: [PlanType; 3] = [PlanType::Essential, PlanType::Premium, PlanType::Ohana];

    /// Wire name of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Essential => "essential",
            PlanType::Premium => "premium",
            PlanType::Ohana => "ohana",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.as_str() == s)
    }

    /// Label with price, as written into CRM notes.
    pub fn label(&self) -> &'static str {
        match self {
            PlanType::Essential => "Essential ($19/mo)",
            PlanType::Premium => "Premium ($39/mo)",
            PlanType::Ohana => "Ohana ($59/mo)",
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_include_monthly_price() {
        assert_eq!(PlanType::Essential.label(), "Essential ($19/mo)");
        assert_eq!(PlanType::Premium.label(), "Premium ($39/mo)");
        assert_eq!(PlanType::Ohana.label(), "Ohana ($59/mo)");
    }

    #[test]
    fn parse_accepts_lowercase_names_only() {
        assert_eq!(PlanType::parse("ohana"), Some(PlanType::Ohana));
        assert_eq!(PlanType::parse("Ohana"), None);
        assert_eq!(PlanType::parse("gold"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(PlanType::Premium).unwrap(),
            serde_json::json!("premium")
        );
    }
}
