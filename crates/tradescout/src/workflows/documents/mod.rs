//! Static reference material served alongside the matching tools.
//!
//! The analyzer never reads from here; the surrounding service exposes
//! these documents so callers can fetch checklists and pricing guidance
//! by trade category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kinds of reference text the library holds per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Checklist,
    PricingGuide,
    SafetyNotes,
}

impl DocumentKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "checklist" => Some(DocumentKind::Checklist),
            "pricing_guide" | "pricing-guide" => Some(DocumentKind::PricingGuide),
            "safety_notes" | "safety-notes" => Some(DocumentKind::SafetyNotes),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("no {kind:?} document for category '{category}'")]
    NotFound { category: String, kind: DocumentKind },
}

/// Named reference text by trade category.
pub trait DocumentStore: Send + Sync {
    fn read_document(&self, category: &str, kind: DocumentKind) -> Result<String, DocumentError>;
}

/// In-memory document library seeded with built-in reference text.
#[derive(Debug, Default)]
pub struct StaticDocumentLibrary {
    documents: BTreeMap<(String, DocumentKind), String>,
}

impl StaticDocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(
        mut self,
        category: &str,
        kind: DocumentKind,
        body: impl Into<String>,
    ) -> Self {
        self.documents
            .insert((category.to_ascii_lowercase(), kind), body.into());
        self
    }

    /// Library preloaded with the painting reference set shipped with
    /// the demo.
    pub fn builtin() -> Self {
        Self::new()
            .with_document(
                "painting",
                DocumentKind::Checklist,
                "Confirm surfaces (walls, ceilings, trims), room count, access, and colour choices before quoting.",
            )
            .with_document(
                "painting",
                DocumentKind::PricingGuide,
                "Interior painting is commonly priced per room or per square metre; ceilings and trims are quoted separately.",
            )
            .with_document(
                "painting",
                DocumentKind::SafetyNotes,
                "Check for lead paint in pre-1970 properties and ensure ventilation when using solvent-based products.",
            )
    }
}

impl DocumentStore for StaticDocumentLibrary {
    fn read_document(&self, category: &str, kind: DocumentKind) -> Result<String, DocumentError> {
        self.documents
            .get(&(category.to_ascii_lowercase(), kind))
            .cloned()
            .ok_or_else(|| DocumentError::NotFound {
                category: category.to_string(),
                kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_serves_painting_checklist() {
        let library = StaticDocumentLibrary::builtin();
        let body = library
            .read_document("Painting", DocumentKind::Checklist)
            .expect("checklist present");
        assert!(body.contains("room count"));
    }

    #[test]
    fn missing_document_is_not_found() {
        let library = StaticDocumentLibrary::builtin();
        let error = library
            .read_document("plumbing", DocumentKind::Checklist)
            .expect_err("no plumbing docs");
        assert!(matches!(error, DocumentError::NotFound { .. }));
    }

    #[test]
    fn kind_parses_snake_and_kebab_case() {
        assert_eq!(
            DocumentKind::parse("pricing-guide"),
            Some(DocumentKind::PricingGuide)
        );
        assert_eq!(
            DocumentKind::parse("SAFETY_NOTES"),
            Some(DocumentKind::SafetyNotes)
        );
        assert_eq!(DocumentKind::parse("unknown"), None);
    }
}
