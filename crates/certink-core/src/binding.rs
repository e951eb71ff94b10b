//! Data-binding overlay between certificate records and template elements.
//!
//! A fixed set of element ids derive their text from the external
//! [`CertificateData`] record. Once the user edits one of those elements by
//! hand its id goes into [`ManualEdits`] and the binding stops applying.

use crate::element::ElementId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const STANDARD_PREFIX: &str = "Standard: ";
const CERTIFICATE_NUMBER_PREFIX: &str = "Certification Number: ";
const ORIGINAL_REGISTRATION_PREFIX: &str = "Original registration date: ";
const ISSUE_DATE_PREFIX: &str = "Date of certificate: ";
const EXPIRY_DATE_PREFIX: &str = "Expiry date: ";

/// Shown when the record carries no certificate number.
pub const FALLBACK_CERTIFICATE_NUMBER: &str = "0000";

/// External certificate record supplied by the surrounding page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateData {
    pub client_name: String,
    pub standard: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    pub original_registration_date: String,
    pub issue_date: String,
    pub expiry_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_auditor: Option<String>,
}

/// Element ids whose content is derived from the certificate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKey {
    ClientName,
    Standard,
    /// First scope block.
    ScopePrimary,
    /// Second scope block; mirrors the first.
    ScopeSecondary,
    CertificateNumber,
    OriginalRegistrationDate,
    IssueDate,
    ExpiryDate,
}

impl BoundKey {
    /// Every bound key.
    pub const ALL: [BoundKey; 8] = [
        BoundKey::ClientName,
        BoundKey::Standard,
        BoundKey::ScopePrimary,
        BoundKey::ScopeSecondary,
        BoundKey::CertificateNumber,
        BoundKey::OriginalRegistrationDate,
        BoundKey::IssueDate,
        BoundKey::ExpiryDate,
    ];

    /// Id of the template element this key drives.
    pub fn element_id(&self) -> &'static str {
        match self {
            BoundKey::ClientName => "client-name",
            BoundKey::Standard => "standard",
            BoundKey::ScopePrimary => "scope-1",
            BoundKey::ScopeSecondary => "scope-2",
            BoundKey::CertificateNumber => "certificate-number",
            BoundKey::OriginalRegistrationDate => "original-registration-date",
            BoundKey::IssueDate => "issue-date",
            BoundKey::ExpiryDate => "expiry-date",
        }
    }

    /// Look up the key bound to an element id.
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.element_id() == id)
    }

    /// Content this key produces for `data`.
    pub fn derive(&self, data: &CertificateData) -> String {
        match self {
            BoundKey::ClientName => data.client_name.clone(),
            BoundKey::Standard => format!("{STANDARD_PREFIX}{}", data.standard),
            BoundKey::ScopePrimary | BoundKey::ScopeSecondary => data.scope.clone(),
            BoundKey::CertificateNumber => {
                let number = data
                    .certificate_number
                    .as_deref()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(FALLBACK_CERTIFICATE_NUMBER);
                format!("{CERTIFICATE_NUMBER_PREFIX}{number}")
            }
            BoundKey::OriginalRegistrationDate => format!(
                "{ORIGINAL_REGISTRATION_PREFIX}{}",
                format_date(&data.original_registration_date)
            ),
            BoundKey::IssueDate => {
                format!("{ISSUE_DATE_PREFIX}{}", format_date(&data.issue_date))
            }
            BoundKey::ExpiryDate => {
                format!("{EXPIRY_DATE_PREFIX}{}", format_date(&data.expiry_date))
            }
        }
    }
}

/// Format a date as `DD/MM/YYYY`.
///
/// Input that is not a valid calendar date is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// Ids whose content the user has overridden. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEdits(BTreeSet<ElementId>);

impl ManualEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override. Returns true if the id was not already recorded.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.0.contains(id) {
            return false;
        }
        self.0.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CertificateData {
        CertificateData {
            client_name: "ABC Corp".to_string(),
            standard: "ISO 9001:2015".to_string(),
            scope: "Widget manufacturing".to_string(),
            certificate_number: Some("1234".to_string()),
            original_registration_date: "2024-01-15".to_string(),
            issue_date: "2025-01-15".to_string(),
            expiry_date: "2028-01-15".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_table() {
        let data = sample();
        assert_eq!(BoundKey::ClientName.derive(&data), "ABC Corp");
        assert_eq!(BoundKey::Standard.derive(&data), "Standard: ISO 9001:2015");
        assert_eq!(BoundKey::ScopePrimary.derive(&data), "Widget manufacturing");
        assert_eq!(BoundKey::ScopeSecondary.derive(&data), "Widget manufacturing");
        assert_eq!(
            BoundKey::CertificateNumber.derive(&data),
            "Certification Number: 1234"
        );
        assert_eq!(
            BoundKey::OriginalRegistrationDate.derive(&data),
            "Original registration date: 15/01/2024"
        );
        assert_eq!(
            BoundKey::IssueDate.derive(&data),
            "Date of certificate: 15/01/2025"
        );
        assert_eq!(BoundKey::ExpiryDate.derive(&data), "Expiry date: 15/01/2028");
    }

    #[test]
    fn test_certificate_number_fallback() {
        let mut data = sample();
        data.certificate_number = None;
        assert_eq!(
            BoundKey::CertificateNumber.derive(&data),
            "Certification Number: 0000"
        );

        data.certificate_number = Some("  ".to_string());
        assert_eq!(
            BoundKey::CertificateNumber.derive(&data),
            "Certification Number: 0000"
        );
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2025-01-15"), "15/01/2025");
        assert_eq!(format_date("2025-01-15T10:30:00Z"), "15/01/2025");
        assert_eq!(format_date("2025-01-15T10:30:00+02:00"), "15/01/2025");
        assert_eq!(format_date("2025-01-15T10:30:00"), "15/01/2025");
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_date("2025-02-30"), "2025-02-30");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_bound_key_lookup() {
        for key in BoundKey::ALL {
            assert_eq!(BoundKey::from_element_id(key.element_id()), Some(key));
        }
        assert_eq!(BoundKey::from_element_id("title"), None);
    }

    #[test]
    fn test_manual_edits_set_semantics() {
        let mut edits = ManualEdits::new();
        assert!(edits.insert("client-name"));
        assert!(!edits.insert("client-name"));
        assert_eq!(edits.len(), 1);
        assert!(edits.contains("client-name"));
    }

    #[test]
    fn test_certificate_data_camel_case() {
        let json = r#"{"clientName":"ABC Corp","standard":"ISO 14001","scope":"Printing",
            "issueDate":"2025-01-15","leadAuditor":"J. Doe"}"#;
        let data: CertificateData = serde_json::from_str(json).unwrap();
        assert_eq!(data.client_name, "ABC Corp");
        assert_eq!(data.lead_auditor.as_deref(), Some("J. Doe"));
        assert!(data.certificate_number.is_none());
        assert!(data.expiry_date.is_empty());
    }
}
