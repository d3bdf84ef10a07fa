//! Application email generator.

use crate::generation::cover_letter::or_fallback;
use crate::models::resume::ResumeDocument;

pub fn generate_job_email(doc: &ResumeDocument, job_title: &str, company: &str) -> String {
    let subject_title = or_fallback(job_title, "Open Role");
    let body_title = or_fallback(job_title, "the role");
    let greeting = match company.trim() {
        "" => "Hiring Team".to_string(),
        c => format!("{c} Team"),
    };
    let links = doc
        .links
        .iter()
        .map(|l| format!("{}: {}", l.label, l.url))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "Subject: Application for {subject_title} – {name}\n\n\
         Hi {greeting},\n\n\
         Sharing my resume for {body_title}. Quick snapshot: {summary}\n\n\
         Links: {links}\n\n\
         Thanks,\n{name}\n{phone} | {email}",
        name = doc.name,
        summary = doc.summary,
        phone = doc.phone,
        email = doc.email,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_with_all_inputs() {
        let doc = ResumeDocument::seed();
        let email = generate_job_email(&doc, "Ops Lead", "Acme");
        assert!(email.starts_with("Subject: Application for Ops Lead – Your Name\n\n"));
        assert!(email.contains("Hi Acme Team,"));
        assert!(email.contains("Sharing my resume for Ops Lead. Quick snapshot: Data-driven"));
        assert!(email.contains(
            "Links: LinkedIn: https://linkedin.com/in/username | Portfolio: https://your-portfolio.com"
        ));
        assert!(email.ends_with("Thanks,\nYour Name\n+91 90000 00000 | you@example.com"));
    }

    #[test]
    fn test_email_fallbacks() {
        let doc = ResumeDocument::seed();
        let email = generate_job_email(&doc, "", "  ");
        assert!(email.starts_with("Subject: Application for Open Role – "));
        assert!(email.contains("Hi Hiring Team,"));
        assert!(email.contains("Sharing my resume for the role."));
    }

    #[test]
    fn test_email_without_links_has_empty_links_line() {
        let mut doc = ResumeDocument::seed();
        doc.links.clear();
        let email = generate_job_email(&doc, "", "");
        assert!(email.contains("Links: \n\n"));
    }
}
