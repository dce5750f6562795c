//! Prompt construction for recommendation requests.
//!
//! Providers do not share an output format, so each adapter picks a
//! [`PromptStyle`] and optional extras. The output contract (count, tier split,
//! tool/agent mix, real and current entities) is always stated in full.

use super::policy::RecommendationPolicy;

/// Shape the model is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// A bare JSON array of tool objects.
    BareArray,
    /// An object with the array under a `recommendations` key.
    WrappedObject,
}

const FOCUS_AREAS: &str = "Marketing & Advertising, Graphic Design & UI/UX, Content Creation & Writing, \
Video & Animation, Data Analytics & Insights, Workflow Automation, Customer Service & Support, \
Social Media Management, Coding & Development, Productivity & Organization, Finance & Accounting, \
HR & Recruitment, Sales & CRM, Education & Training, Translation & Localization, \
Research & Analysis, E-commerce & Retail, Healthcare & Medical";

const CATEGORY_EXAMPLES: &[(&str, &str)] = &[
    ("Marketing", "Copy.ai, Jasper, AdCreative.ai, Canva"),
    ("Design", "Figma AI, Midjourney, DALL-E, Adobe Firefly"),
    ("Content", "ChatGPT, Claude, Notion AI, Grammarly"),
    ("Video", "Runway ML, Synthesia, Luma AI, Pictory"),
    ("Analytics", "Tableau AI, Google Analytics Intelligence"),
    ("Automation", "Zapier, Make.com, UiPath"),
    ("Development", "GitHub Copilot, Replit Agent, v0.dev, Bolt.new"),
    ("Productivity", "Notion AI, Microsoft Copilot, Otter.ai"),
];

const ITEM_EXAMPLE: &str = r#"{"tool_name": "Tool Name", "purpose": "What it does", "pros": ["pro 1", "pro 2"], "cons": ["con 1", "con 2"], "pricing": "Free|Freemium|Paid", "why_fit": "Why it suits this business", "link": "https://...", "type": "tool|agent"}"#;

/// Builds the system and user prompts for one provider.
#[derive(Debug, Clone)]
pub struct RecommendationPrompt {
    policy: RecommendationPolicy,
    style: PromptStyle,
    category_hints: bool,
}

impl RecommendationPrompt {
    pub fn new(policy: RecommendationPolicy, style: PromptStyle) -> Self {
        Self {
            policy,
            style,
            category_hints: false,
        }
    }

    /// Adds the focus-area list and per-category tool examples.
    pub fn with_category_hints(mut self) -> Self {
        self.category_hints = true;
        self
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// Instructions describing the output contract.
    pub fn system_prompt(&self) -> String {
        let p = &self.policy;
        let mut lines = vec![
            "You are an AI assistant that recommends AI tools and AI agents to users based on their business needs.".to_string(),
            String::new(),
            "CRITICAL REQUIREMENTS:".to_string(),
            format!("- You MUST return exactly {} recommendations total", p.total),
            format!(
                "- First {} recommendations MUST have pricing \"Free\" or \"Freemium\"",
                p.free
            ),
            format!("- Last {} recommendations MUST have pricing \"Paid\"", p.paid),
            "- Include both traditional AI tools AND AI agents (like Replit Agent, Bolt.new, Lovable, v0.dev, Claude, ChatGPT, etc.) and set \"type\" to \"tool\" or \"agent\"".to_string(),
            "- All recommendations must be real, trusted, and currently available products".to_string(),
        ];

        if self.category_hints {
            lines.push(format!("\nFOCUS AREAS TO CONSIDER:\n{}", FOCUS_AREAS));
            lines.push("\nTOOL EXAMPLES BY CATEGORY:".to_string());
            lines.extend(
                CATEGORY_EXAMPLES
                    .iter()
                    .map(|(category, examples)| format!("- {}: {}", category, examples)),
            );
        }

        lines.push(match self.style {
            PromptStyle::BareArray => format!(
                "\nReturn exactly {} recommendations as a JSON array and nothing else:\n[\n  {},\n  ...\n]",
                p.total, ITEM_EXAMPLE
            ),
            PromptStyle::WrappedObject => format!(
                "\nReturn the response in this JSON format:\n{{\n  \"recommendations\": [\n    {}\n  ]\n}}",
                ITEM_EXAMPLE
            ),
        });

        lines.join("\n")
    }

    /// The per-request message carrying the user's description.
    pub fn user_prompt(&self, user_input: &str) -> String {
        let p = &self.policy;
        format!(
            "Analyze this business need and recommend exactly {} AI tools and agents ({} free/freemium + {} paid): {}",
            p.total, p.free, p.paid, user_input
        )
    }
}
