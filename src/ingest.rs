use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DellCertificates, Vendor};
use crate::normalize::{normalize_document, Clock, Normalized};

/// Errors that reject a whole document before it reaches an adapter.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} does not match the {vendor} certificate shape: {source}")]
    Decode {
        origin: String,
        vendor: Vendor,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Certificate {
        vendor: Vendor,
        normalized: Normalized,
    },
    /// A Dell collection resource; each member is a separate certificate document.
    Collection { members: Vec<String> },
}

/// Turns raw JSON bodies into canonical records, one document at a time.
pub struct Ingestor<C: Clock> {
    clock: C,
    vendor: Option<Vendor>,
}

impl<C: Clock> Ingestor<C> {
    /// `vendor` forces every document to one vendor; `None` detects it per document.
    pub fn new(clock: C, vendor: Option<Vendor>) -> Self {
        Self { clock, vendor }
    }

    pub fn ingest_path(&self, path: &Path) -> Result<DocumentOutcome, IngestError> {
        let origin = path.display().to_string();
        let body = fs::read_to_string(path).map_err(|source| IngestError::Io {
            origin: origin.clone(),
            source,
        })?;
        self.ingest_str(&origin, &body)
    }

    pub fn ingest_reader(
        &self,
        origin: &str,
        mut reader: impl Read,
    ) -> Result<DocumentOutcome, IngestError> {
        let mut body = String::new();
        reader
            .read_to_string(&mut body)
            .map_err(|source| IngestError::Io {
                origin: origin.to_string(),
                source,
            })?;
        self.ingest_str(origin, &body)
    }

    pub fn ingest_str(&self, origin: &str, body: &str) -> Result<DocumentOutcome, IngestError> {
        let source: Value = serde_json::from_str(body).map_err(|source| IngestError::Json {
            origin: origin.to_string(),
            source,
        })?;
        self.ingest_value(origin, &source)
    }

    pub fn ingest_value(
        &self,
        origin: &str,
        source: &Value,
    ) -> Result<DocumentOutcome, IngestError> {
        let vendor = self.vendor.unwrap_or_else(|| Vendor::detect(source));

        if matches!(vendor, Vendor::Dell | Vendor::Unknown) && is_collection(source) {
            let collection: DellCertificates =
                serde_json::from_value(source.clone()).map_err(|source| IngestError::Decode {
                    origin: origin.to_string(),
                    vendor: Vendor::Dell,
                    source,
                })?;
            let members: Vec<String> = collection
                .member_paths()
                .into_iter()
                .map(str::to_string)
                .collect();
            debug!(origin = %origin, members = members.len(), "certificate collection");
            return Ok(DocumentOutcome::Collection { members });
        }

        debug!(
            origin = %origin,
            vendor = %vendor,
            resource = vendor.certificate_path().unwrap_or("-"),
            "normalizing certificate document"
        );

        let normalized = normalize_document(vendor, source, &self.clock).map_err(|source| {
            IngestError::Decode {
                origin: origin.to_string(),
                vendor,
                source,
            }
        })?;

        for diagnostic in &normalized.diagnostics {
            warn!(origin = %origin, vendor = %vendor, error = %diagnostic, "timestamp not recognized, field left absent");
        }

        Ok(DocumentOutcome::Certificate { vendor, normalized })
    }
}

fn is_collection(source: &Value) -> bool {
    source.get("Members").map(Value::is_array).unwrap_or(false)
}
