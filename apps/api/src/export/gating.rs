//! Simulated paywall: decides whether an export may proceed straight away or
//! must first be confirmed through a pay prompt.
//!
//! Gating is re-evaluated on every export attempt. A declined prompt leaves no
//! trace, so the next attempt prompts again.

use serde::{Deserialize, Serialize};

use crate::models::template::TemplateId;

pub const PREMIUM_PROMPT: &str = "This is a premium template. Pay ₹10 to download? (simulation)";
pub const EXTRA_EXPORT_PROMPT: &str =
    "You've used your free download. Pay ₹5 for this download? (simulation)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatingState {
    pub subscription_active: bool,
    pub free_exports_remaining: u32,
}

impl GatingState {
    pub fn new(free_exports_remaining: u32) -> Self {
        GatingState {
            subscription_active: false,
            free_exports_remaining,
        }
    }
}

impl Default for GatingState {
    fn default() -> Self {
        GatingState::new(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// Premium template without an active subscription.
    PremiumTemplate,
    /// Free template with no free exports left.
    ExtraExport,
}

impl PromptKind {
    pub fn message(&self) -> &'static str {
        match self {
            PromptKind::PremiumTemplate => PREMIUM_PROMPT,
            PromptKind::ExtraExport => EXTRA_EXPORT_PROMPT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    PromptRequired(PromptKind),
}

/// Decides whether an export of `template` needs a pay prompt.
pub fn evaluate(template: TemplateId, state: &GatingState) -> GateDecision {
    match (template.is_premium(), state.subscription_active) {
        (true, true) => GateDecision::Allow,
        (true, false) => GateDecision::PromptRequired(PromptKind::PremiumTemplate),
        (false, _) if state.free_exports_remaining > 0 => GateDecision::Allow,
        (false, _) => GateDecision::PromptRequired(PromptKind::ExtraExport),
    }
}

/// Gating state after a saved export. Only non-premium exports consume a free
/// credit, and the counter never drops below zero.
pub fn record_success(template: TemplateId, state: &GatingState) -> GatingState {
    if template.is_premium() {
        return *state;
    }
    GatingState {
        free_exports_remaining: state.free_exports_remaining.saturating_sub(1),
        ..*state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(subscription_active: bool, free: u32) -> GatingState {
        GatingState {
            subscription_active,
            free_exports_remaining: free,
        }
    }

    #[test]
    fn test_free_template_with_credit_is_allowed() {
        assert_eq!(
            evaluate(TemplateId::Minimal, &state(false, 1)),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_free_template_without_credit_prompts() {
        assert_eq!(
            evaluate(TemplateId::Cards, &state(false, 0)),
            GateDecision::PromptRequired(PromptKind::ExtraExport)
        );
    }

    #[test]
    fn test_premium_template_without_subscription_prompts_even_with_credit() {
        assert_eq!(
            evaluate(TemplateId::Sidebar, &state(false, 5)),
            GateDecision::PromptRequired(PromptKind::PremiumTemplate)
        );
    }

    #[test]
    fn test_premium_template_with_subscription_is_allowed() {
        assert_eq!(
            evaluate(TemplateId::Elegant, &state(true, 0)),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_record_success_decrements_free_export() {
        let after = record_success(TemplateId::Minimal, &state(false, 1));
        assert_eq!(after.free_exports_remaining, 0);
        // Second attempt now has to go through the pay prompt
        assert_eq!(
            evaluate(TemplateId::Minimal, &after),
            GateDecision::PromptRequired(PromptKind::ExtraExport)
        );
    }

    #[test]
    fn test_record_success_never_goes_below_zero() {
        let after = record_success(TemplateId::Minimal, &state(false, 0));
        assert_eq!(after.free_exports_remaining, 0);
    }

    #[test]
    fn test_premium_export_does_not_consume_credit() {
        let before = state(true, 1);
        assert_eq!(record_success(TemplateId::IndigoHeader, &before), before);
    }

    #[test]
    fn test_prompt_messages_mention_price() {
        assert!(PromptKind::PremiumTemplate.message().contains("₹10"));
        assert!(PromptKind::ExtraExport.message().contains("₹5"));
    }
}
