//! Tool Record - a single recommended tool or autonomous agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cost model of a recommended tool.
///
/// Closed enumeration; the wire spelling is the capitalised variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingTier {
    Free,
    Freemium,
    Paid,
}

impl PricingTier {
    /// All tiers in display order.
    pub const ALL: [PricingTier; 3] = [PricingTier::Free, PricingTier::Freemium, PricingTier::Paid];

    /// Returns true for tiers counted in the free bucket of the policy.
    pub fn is_free_or_freemium(&self) -> bool {
        matches!(self, PricingTier::Free | PricingTier::Freemium)
    }

    /// Wire spelling of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Free => "Free",
            PricingTier::Freemium => "Freemium",
            PricingTier::Paid => "Paid",
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTier {
    type Err = String;

    /// Exact, case-sensitive match against the wire spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| format!("unknown pricing tier '{}'", s))
    }
}

/// Distinguishes autonomous agents from traditional software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Tool,
    Agent,
}

impl ToolKind {
    /// Wire spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Tool => "tool",
            ToolKind::Agent => "agent",
        }
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tool" => Ok(ToolKind::Tool),
            "agent" => Ok(ToolKind::Agent),
            other => Err(format!("unknown tool kind '{}'", other)),
        }
    }
}

/// One normalized recommendation item.
///
/// Instances produced by the validator always have non-empty `name`,
/// `purpose` and `fit_explanation`, and a `pricing_tier` from the closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    #[serde(rename = "tool_name", alias = "name")]
    pub name: String,
    pub purpose: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(rename = "pricing", alias = "pricing_tier")]
    pub pricing_tier: PricingTier,
    #[serde(rename = "why_fit", alias = "fit_explanation")]
    pub fit_explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(rename = "type", alias = "kind", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ToolKind>,
}

impl ToolRecord {
    /// Creates a record with the required fields and no pros, cons, link or kind.
    pub fn new(
        name: impl Into<String>,
        purpose: impl Into<String>,
        pricing_tier: PricingTier,
        fit_explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            pros: Vec::new(),
            cons: Vec::new(),
            pricing_tier,
            fit_explanation: fit_explanation.into(),
            link: None,
            kind: None,
        }
    }

    /// Sets the pros list (display order preserved).
    pub fn with_pros<I, S>(mut self, pros: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pros = pros.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cons list (display order preserved).
    pub fn with_cons<I, S>(mut self, cons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cons = cons.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the access link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the tool/agent kind.
    pub fn with_kind(mut self, kind: ToolKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns true if this record is an autonomous agent.
    pub fn is_agent(&self) -> bool {
        self.kind == Some(ToolKind::Agent)
    }
}
