//! Skill suggestions: a fixed library and a case-insensitive substring lookup.

pub mod handlers;

/// Maximum number of suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 10;

/// Known skills, in suggestion order.
pub static SKILL_LIBRARY: &[&str] = &[
    // Tech / data
    "Excel",
    "Excel / Power Query",
    "Power BI",
    "Tableau",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "Python",
    "Pandas",
    "NumPy",
    "Google Sheets",
    "Looker Studio",
    "ETL",
    "Data Cleaning",
    "A/B Testing",
    // E-commerce / ops
    "Amazon Seller Central",
    "Flipkart Seller Hub",
    "Myntra Partner Portal",
    "Marketplace Operations",
    "Inventory Planning",
    "SKU Mapping",
    "Order Fulfilment",
    "Unicommerce",
    "Shiprocket",
    "Delhivery",
    "DTDC",
    "Blue Dart",
    "Courier Reconciliation",
    "RTO Reduction",
    "SLA Management",
    "OTIF",
    // Business / tools
    "Razorpay",
    "Cashfree",
    "Stripe",
    "Zoho Books",
    "Tally",
    "JIRA",
    "Asana",
    "Notion",
    "Confluence",
    "Slack",
    // Soft skills
    "Stakeholder Management",
    "Vendor Negotiation",
    "Process Design",
    "Documentation",
    "KPI Dashboards",
    "Presentation",
    // Web
    "JavaScript",
    "TypeScript",
    "HTML/CSS",
    "React",
    "Node.js",
];

/// Library entries containing `query` (trimmed, case-insensitive), in library
/// order, at most `MAX_SUGGESTIONS`. A blank query returns the head of the library.
pub fn suggest(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    SKILL_LIBRARY
        .iter()
        .copied()
        .filter(|skill| needle.is_empty() || skill.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
