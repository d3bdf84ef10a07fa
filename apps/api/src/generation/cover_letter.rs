//! Cover letter generator.
//!
//! Layout: greeting, tone-specific opening, tone-invariant highlights and
//! motivation, tone-specific closing, sign-off, name. Missing inputs are
//! replaced by fixed fallback phrases so no slot is ever left empty.

use crate::generation::tone::{get_tone_template, opening_line, Tone};
use crate::models::resume::ResumeDocument;

const FALLBACK_TITLE: &str = "role";
const FALLBACK_WHY: &str = "this role";
const FALLBACK_HIGHLIGHTS: [&str; 2] = [
    "Delivered measurable results",
    "Automated workflows to save time",
];

/// `value` trimmed, or `fallback` when blank.
pub(crate) fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

pub fn generate_cover_letter(doc: &ResumeDocument, job_title: &str, company: &str, tone: Tone) -> String {
    let phrasing = get_tone_template(tone);
    let title = or_fallback(job_title, FALLBACK_TITLE);
    let opening_company = or_fallback(company, phrasing.company_fallback);
    let why_company = or_fallback(company, FALLBACK_WHY);

    let first_bullets = doc.experience.first().map(|e| e.bullets.as_slice()).unwrap_or(&[]);
    let highlight = |i: usize| {
        first_bullets
            .get(i)
            .map(String::as_str)
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(FALLBACK_HIGHLIGHTS[i])
    };
    let top_skills = doc.skills.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(", ");

    let mut letter = String::new();
    letter.push_str(phrasing.greeting);
    letter.push_str("\n\n");
    letter.push_str(&opening_line(tone, title, opening_company, &doc.role));
    letter.push_str("\n\nHighlights:\n");
    letter.push_str(&format!("• {}\n", highlight(0)));
    letter.push_str(&format!("• {}\n", highlight(1)));
    letter.push_str(&format!("• {top_skills}\n\n"));
    letter.push_str(&format!("Why {why_company}:\n"));
    letter.push_str("• Fast-moving environment and scope to own impact\n");
    letter.push_str("• Opportunity to apply data-driven problem solving\n\n");
    letter.push_str(phrasing.closing);
    letter.push_str("\n\n");
    letter.push_str(phrasing.sign_off);
    letter.push('\n');
    letter.push_str(&doc.name);
    letter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ResumeDocument {
        ResumeDocument::seed()
    }

    #[test]
    fn test_empty_company_uses_formal_fallback() {
        let letter = generate_cover_letter(&doc(), "", "", Tone::Formal);
        assert!(letter.contains("the role at your organization."));
        assert!(letter.contains("Why this role:"));
        assert!(!letter.contains(" at ."), "no empty slot");
        assert!(!letter.contains("the  at"));
    }

    #[test]
    fn test_empty_company_uses_friendly_fallback() {
        let letter = generate_cover_letter(&doc(), "", "", Tone::Friendly);
        assert!(letter.contains("at your team."));
        assert!(letter.starts_with("Hi there,"));
    }

    #[test]
    fn test_job_title_and_company_are_used() {
        let letter = generate_cover_letter(&doc(), "Ops Lead", "Acme", Tone::Formal);
        assert!(letter.contains("interest in the Ops Lead at Acme."));
        assert!(letter.contains("Why Acme:"));
    }

    #[test]
    fn test_body_pulls_first_two_bullets_and_three_skills() {
        let d = doc();
        let letter = generate_cover_letter(&d, "", "", Tone::Formal);
        assert!(letter.contains(&format!("• {}\n", d.experience[0].bullets[0])));
        assert!(letter.contains(&format!("• {}\n", d.experience[0].bullets[1])));
        assert!(!letter.contains(&d.experience[0].bullets[2]));
        assert!(letter.contains("• Excel / Power Query, Python / Pandas, Amazon / Flipkart Ops\n"));
        assert!(!letter.contains("Inventory & SKU Mapping"));
    }

    #[test]
    fn test_missing_experience_falls_back_to_filler() {
        let mut d = doc();
        d.experience.clear();
        let letter = generate_cover_letter(&d, "", "", Tone::Formal);
        assert!(letter.contains("• Delivered measurable results\n"));
        assert!(letter.contains("• Automated workflows to save time\n"));
    }

    #[test]
    fn test_body_is_tone_invariant() {
        let d = doc();
        let body = |s: &str| {
            let start = s.find("Highlights:").unwrap();
            let end = s.find("• Opportunity").unwrap();
            s[start..end].to_string()
        };
        assert_eq!(
            body(&generate_cover_letter(&d, "X", "Y", Tone::Formal)),
            body(&generate_cover_letter(&d, "X", "Y", Tone::Friendly))
        );
    }

    #[test]
    fn test_letter_ends_with_name() {
        let d = doc();
        for tone in [Tone::Formal, Tone::Friendly] {
            assert!(generate_cover_letter(&d, "", "", tone).ends_with(&d.name));
        }
    }

    #[test]
    fn test_deterministic() {
        let d = doc();
        assert_eq!(
            generate_cover_letter(&d, "A", "B", Tone::Friendly),
            generate_cover_letter(&d, "A", "B", Tone::Friendly)
        );
    }
}
