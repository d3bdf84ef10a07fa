//! Letter tone: selects the opening and sign-off around a tone-invariant body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
}

/// Fixed phrasing for one tone.
#[derive(Debug, Clone)]
pub struct ToneTemplate {
    pub greeting: &'static str,
    /// Used in the opening when no company is given.
    pub company_fallback: &'static str,
    pub closing: &'static str,
    pub sign_off: &'static str,
}

pub fn get_tone_template(tone: Tone) -> ToneTemplate {
    match tone {
        Tone::Formal => ToneTemplate {
            greeting: "Dear Hiring Manager,",
            company_fallback: "your organization",
            closing: "Thank you for your time. I have attached my resume and would welcome the \
                      opportunity to discuss further.",
            sign_off: "Sincerely,",
        },
        Tone::Friendly => ToneTemplate {
            greeting: "Hi there,",
            company_fallback: "your team",
            closing: "Thanks for reading! Attaching my resume—would love to chat.",
            sign_off: "Best,",
        },
    }
}

/// Opening paragraph after the greeting. `title` and `company` are already
/// resolved to their fallbacks.
pub fn opening_line(tone: Tone, title: &str, company: &str, role: &str) -> String {
    match tone {
        Tone::Formal => format!(
            "I am writing to express my interest in the {title} at {company}. With experience in \
             {} and a track record of driving operational efficiency, I can add value from day one.",
            role.to_lowercase()
        ),
        Tone::Friendly => format!(
            "I'm excited to apply for the {title} at {company}. I'm a hands-on {role} who loves \
             building automations and scaling ops."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_differ_in_greeting_and_sign_off() {
        let formal = get_tone_template(Tone::Formal);
        let friendly = get_tone_template(Tone::Friendly);
        assert_ne!(formal.greeting, friendly.greeting);
        assert_ne!(formal.sign_off, friendly.sign_off);
    }

    #[test]
    fn test_formal_opening_lowercases_role() {
        let line = opening_line(Tone::Formal, "role", "Acme", "Ops Manager");
        assert!(line.contains("experience in ops manager"));
    }

    #[test]
    fn test_friendly_opening_keeps_role_case() {
        let line = opening_line(Tone::Friendly, "role", "Acme", "Ops Manager");
        assert!(line.contains("hands-on Ops Manager"));
    }

    #[test]
    fn test_tone_deserializes_lowercase() {
        let t: Tone = serde_json::from_str("\"friendly\"").unwrap();
        assert_eq!(t, Tone::Friendly);
    }
}
