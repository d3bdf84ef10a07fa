use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of an experience or education entry.
///
/// Assigned once at creation and never reused. Edits and removals are keyed by
/// this id, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId(s.to_string())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}

impl LinkItem {
    pub fn new(label: &str, url: &str) -> Self {
        LinkItem {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    /// Link appended by the "add link" action before the user edits it.
    pub fn placeholder() -> Self {
        LinkItem::new("Website", "https://example.com")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl ExperienceEntry {
    pub fn placeholder(id: EntryId) -> Self {
        ExperienceEntry {
            id,
            title: "Role".to_string(),
            company: "Company".to_string(),
            location: Some(String::new()),
            start: "Jan 2023".to_string(),
            end: "Present".to_string(),
            bullets: vec![
                "Achievement / impact".to_string(),
                "Tools / metrics".to_string(),
            ],
        }
    }

    /// Location, if present and non-blank.
    pub fn location_text(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub school: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EducationEntry {
    pub fn placeholder(id: EntryId) -> Self {
        EducationEntry {
            id,
            degree: "Degree".to_string(),
            school: "Institute".to_string(),
            year: "2024".to_string(),
            details: Some(String::new()),
        }
    }

    pub fn details_text(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// The resume being edited. Pure data: every mutation goes through
/// `editor::actions::reduce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<LinkItem>,
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// Fixed ids of the seed entries. Entries added later get generated ids, so
/// these never collide.
pub const SEED_EXPERIENCE_IDS: [&str; 2] = ["seed-exp-1", "seed-exp-2"];
pub const SEED_EDUCATION_ID: &str = "seed-edu-1";

impl ResumeDocument {
    /// The document a fresh session starts from. Always the same value.
    pub fn seed() -> Self {
        ResumeDocument {
            name: "Your Name".to_string(),
            role: "Operations & E-commerce Manager".to_string(),
            email: "you@example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            location: "Gurugram, IN".to_string(),
            links: vec![
                LinkItem::new("LinkedIn", "https://linkedin.com/in/username"),
                LinkItem::new("Portfolio", "https://your-portfolio.com"),
            ],
            summary: "Data-driven operator with 5+ years in D2C/e-commerce. Built automated \
                      reconciliation, optimized courier SLAs, and improved net margins by 12%."
                .to_string(),
            skills: [
                "Excel / Power Query",
                "Python / Pandas",
                "Amazon / Flipkart Ops",
                "Inventory & SKU Mapping",
                "Razorpay / Payments",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            experience: vec![
                ExperienceEntry {
                    id: EntryId::from(SEED_EXPERIENCE_IDS[0]),
                    title: "Senior Operations Manager".to_string(),
                    company: "Home Essentials Pvt. Ltd.".to_string(),
                    location: Some("Gurugram".to_string()),
                    start: "Jan 2022".to_string(),
                    end: "Present".to_string(),
                    bullets: vec![
                        "Automated courier status reconciliation; reduced RTO mismatch by 31%"
                            .to_string(),
                        "Scaled order processing to 2k+/day via Unicommerce & custom scripts"
                            .to_string(),
                        "Negotiated freight, saving ₹9L/yr; improved OTIF by 8%".to_string(),
                    ],
                },
                ExperienceEntry {
                    id: EntryId::from(SEED_EXPERIENCE_IDS[1]),
                    title: "Ops Analyst".to_string(),
                    company: "Nimbus Logistics".to_string(),
                    location: Some("Bengaluru".to_string()),
                    start: "Aug 2019".to_string(),
                    end: "Dec 2021".to_string(),
                    bullets: vec![
                        "Built SKU master & ATS variance tracker; cut stockouts 22%".to_string(),
                        "Led migration to e-invoicing; ensured 100% compliance".to_string(),
                    ],
                },
            ],
            education: vec![EducationEntry {
                id: EntryId::from(SEED_EDUCATION_ID),
                degree: "B.Com (H)".to_string(),
                school: "Delhi University".to_string(),
                year: "2019".to_string(),
                details: Some("Finance".to_string()),
            }],
        }
    }

    pub fn experience_by_id(&self, id: &EntryId) -> Option<&ExperienceEntry> {
        self.experience.iter().find(|e| &e.id == id)
    }

    pub fn education_by_id(&self, id: &EntryId) -> Option<&EducationEntry> {
        self.education.iter().find(|e| &e.id == id)
    }
}

impl Default for ResumeDocument {
    fn default() -> Self {
        ResumeDocument::seed()
    }
}
