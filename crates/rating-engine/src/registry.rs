//! Compliance registry
//!
//! Reconciles the certificates a society has recorded against the master
//! catalog. The result is a read-only view: one row per catalog entry, in
//! catalog order. The society's own `compliance` list is never modified.
//!
//! Matching is by exact name. When several recorded certificates share a
//! catalog name, the first one in the society's list wins and the rest are
//! ignored by this view.

use serde::Serialize;
use shared_types::{CertStatus, CertificateSpec, ComplianceCert, Society, CERTIFICATE_CATALOG};

/// Display status for one catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus<'a> {
    Recorded(&'a CertStatus),
    NotRecorded,
}

impl DisplayStatus<'_> {
    pub fn label(&self) -> &str {
        match self {
            DisplayStatus::Recorded(status) => status.as_str(),
            DisplayStatus::NotRecorded => "not_recorded",
        }
    }
}

/// A catalog entry paired with the certificate recorded for it, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledCert<'a> {
    pub spec: &'a CertificateSpec,
    pub recorded: Option<&'a ComplianceCert>,
}

impl<'a> ReconciledCert<'a> {
    pub fn status(&self) -> DisplayStatus<'a> {
        match self.recorded {
            Some(cert) => DisplayStatus::Recorded(&cert.status),
            None => DisplayStatus::NotRecorded,
        }
    }
}

/// Serializable row for the compliance view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledRow {
    pub name: String,
    pub category: String,
    pub mandatory: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<chrono::NaiveDate>,
}

impl From<&ReconciledCert<'_>> for ReconciledRow {
    fn from(entry: &ReconciledCert<'_>) -> Self {
        Self {
            name: entry.spec.name.to_string(),
            category: entry.spec.category.to_string(),
            mandatory: entry.spec.mandatory,
            status: entry.status().label().to_string(),
            expiry_date: entry.recorded.and_then(|cert| cert.expiry_date),
        }
    }
}

/// Reconcile against the built-in [`CERTIFICATE_CATALOG`]
pub fn reconcile(society: &Society) -> Vec<ReconciledCert<'_>> {
    reconcile_with(society, &CERTIFICATE_CATALOG)
}

/// Reconcile against an explicit catalog, preserving its order
pub fn reconcile_with<'a>(
    society: &'a Society,
    catalog: &'a [CertificateSpec],
) -> Vec<ReconciledCert<'a>> {
    catalog
        .iter()
        .map(|spec| ReconciledCert {
            spec,
            recorded: society.compliance.iter().find(|cert| cert.name == spec.name),
        })
        .collect()
}

/// Catalog entries certificates are issued for (the mandatory ones)
pub fn certifiable_entries() -> impl Iterator<Item = &'static CertificateSpec> {
    CERTIFICATE_CATALOG.iter().filter(|spec| spec.mandatory)
}

/// Counts over a reconciled view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub valid: usize,
    pub expired: usize,
    pub pending: usize,
    pub not_applicable: usize,
    pub unrecognized: usize,
    pub not_recorded: usize,
    pub missing_mandatory: Vec<String>,
}

impl ComplianceSummary {
    pub fn from_reconciled(entries: &[ReconciledCert<'_>]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.status() {
                DisplayStatus::Recorded(CertStatus::Valid) => summary.valid += 1,
                DisplayStatus::Recorded(CertStatus::Expired) => summary.expired += 1,
                DisplayStatus::Recorded(CertStatus::Pending) => summary.pending += 1,
                DisplayStatus::Recorded(CertStatus::NotApplicable) => summary.not_applicable += 1,
                DisplayStatus::Recorded(CertStatus::Other(_)) => summary.unrecognized += 1,
                DisplayStatus::NotRecorded => {
                    summary.not_recorded += 1;
                    if entry.spec.mandatory {
                        summary.missing_mandatory.push(entry.spec.name.to_string());
                    }
                }
            }
        }
        summary
    }
}
