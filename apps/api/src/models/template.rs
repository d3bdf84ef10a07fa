use serde::{Deserialize, Serialize};

/// The closed set of resume layouts. Dispatch is always an exhaustive match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    #[serde(rename = "minimal")]
    Minimal,
    #[serde(rename = "sidebar")]
    Sidebar,
    #[serde(rename = "elegant")]
    Elegant,
    #[serde(rename = "slateShade")]
    SlateShade,
    #[serde(rename = "indigoHeader")]
    IndigoHeader,
    #[serde(rename = "cards")]
    Cards,
    #[serde(rename = "compactTwoCol")]
    CompactTwoCol,
}

/// Catalogue entry shown in the template picker.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub premium: bool,
    pub badge: &'static str,
}

impl TemplateId {
    /// Catalogue order.
    pub const ALL: [TemplateId; 7] = [
        TemplateId::Minimal,
        TemplateId::Sidebar,
        TemplateId::Elegant,
        TemplateId::SlateShade,
        TemplateId::IndigoHeader,
        TemplateId::Cards,
        TemplateId::CompactTwoCol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Minimal => "minimal",
            TemplateId::Sidebar => "sidebar",
            TemplateId::Elegant => "elegant",
            TemplateId::SlateShade => "slateShade",
            TemplateId::IndigoHeader => "indigoHeader",
            TemplateId::Cards => "cards",
            TemplateId::CompactTwoCol => "compactTwoCol",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        TemplateId::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Minimal => "ATS Minimal",
            TemplateId::Sidebar => "Modern Sidebar",
            TemplateId::Elegant => "Elegant Serif",
            TemplateId::SlateShade => "Slate Shaded",
            TemplateId::IndigoHeader => "Indigo Header",
            TemplateId::Cards => "Card Sections",
            TemplateId::CompactTwoCol => "Compact 2-Col",
        }
    }

    pub fn is_premium(&self) -> bool {
        match self {
            TemplateId::Minimal | TemplateId::SlateShade | TemplateId::Cards => false,
            TemplateId::Sidebar
            | TemplateId::Elegant
            | TemplateId::IndigoHeader
            | TemplateId::CompactTwoCol => true,
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.is_premium() {
            "Pro"
        } else {
            "Free"
        }
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: *self,
            name: self.display_name(),
            premium: self.is_premium(),
            badge: self.badge(),
        }
    }

    pub fn catalogue() -> Vec<TemplateInfo> {
        TemplateId::ALL.iter().map(TemplateId::info).collect()
    }
}
