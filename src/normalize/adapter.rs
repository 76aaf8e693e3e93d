use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{
    CanonicalCertMetrics, CiscoSslCertificate, DellSslCertificate, HpeSslCertificate,
    SuperMicroSslCertificate,
};

use super::expiry::days_to_expiry;
use super::resolver::{non_blank, ID, ISSUER_NAME, VALID_NOT_AFTER, VALID_NOT_BEFORE};
use super::timestamp::{format_timestamp, parse_timestamp, TimestampError};

/// A canonical record plus every timestamp that could not be parsed on the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    pub metrics: CanonicalCertMetrics,
    pub diagnostics: Vec<TimestampError>,
}

/// Maps one vendor's typed certificate document into the canonical record.
///
/// `source` is the JSON the document was decoded from; fields that move
/// between firmware generations are resolved against it.
pub trait VendorAdapter: DeserializeOwned {
    fn to_metrics(&self, source: &Value, now: &DateTime<Utc>) -> Normalized;
}

struct RawFields {
    id: Option<String>,
    issuer_name: Option<String>,
    valid_not_before: Option<String>,
    valid_not_after: Option<String>,
}

fn normalize_instant(
    raw: Option<&str>,
    diagnostics: &mut Vec<TimestampError>,
) -> Option<DateTime<Utc>> {
    match parse_timestamp(raw?) {
        Ok(instant) => instant,
        Err(e) => {
            diagnostics.push(e);
            None
        }
    }
}

fn assemble(raw: RawFields, now: &DateTime<Utc>) -> Normalized {
    let mut diagnostics = Vec::new();
    let not_before = normalize_instant(raw.valid_not_before.as_deref(), &mut diagnostics);
    let not_after = normalize_instant(raw.valid_not_after.as_deref(), &mut diagnostics);

    Normalized {
        metrics: CanonicalCertMetrics {
            id: raw.id.and_then(non_blank),
            issuer_name: raw.issuer_name.and_then(non_blank),
            valid_not_before: not_before.as_ref().map(format_timestamp),
            valid_not_after: not_after.as_ref().map(format_timestamp),
            days_to_expiry: not_after.map(|na| days_to_expiry(&na, now)),
        },
        diagnostics,
    }
}

impl VendorAdapter for DellSslCertificate {
    fn to_metrics(&self, source: &Value, now: &DateTime<Utc>) -> Normalized {
        assemble(
            RawFields {
                id: self.id.clone(),
                issuer_name: ISSUER_NAME.resolve_value(source),
                valid_not_before: self.valid_not_before.clone(),
                valid_not_after: self.valid_not_after.clone(),
            },
            now,
        )
    }
}

impl VendorAdapter for CiscoSslCertificate {
    fn to_metrics(&self, source: &Value, now: &DateTime<Utc>) -> Normalized {
        assemble(
            RawFields {
                id: self.id.clone(),
                issuer_name: ISSUER_NAME.resolve_value(source),
                valid_not_before: self.valid_not_before.clone(),
                valid_not_after: self.valid_not_after.clone(),
            },
            now,
        )
    }
}

impl VendorAdapter for HpeSslCertificate {
    // iLO 5 nests everything under X509CertificateInformation, newer firmware
    // publishes the standard Redfish Certificate layout. The typed decode only
    // gates the document shape; the movable fields are resolved from `source`.
    fn to_metrics(&self, source: &Value, now: &DateTime<Utc>) -> Normalized {
        assemble(
            RawFields {
                id: self.id.clone(),
                issuer_name: ISSUER_NAME.resolve_value(source),
                valid_not_before: VALID_NOT_BEFORE.resolve_value(source),
                valid_not_after: VALID_NOT_AFTER.resolve_value(source),
            },
            now,
        )
    }
}

impl VendorAdapter for SuperMicroSslCertificate {
    fn to_metrics(&self, _source: &Value, now: &DateTime<Utc>) -> Normalized {
        assemble(
            RawFields {
                id: self.id.clone(),
                issuer_name: None,
                valid_not_before: self.valid_from.clone(),
                valid_not_after: self.good_thru.clone(),
            },
            now,
        )
    }
}

/// Best-effort conversion for documents from an unrecognized vendor: every
/// field goes through the full candidate list.
pub fn normalize_generic(source: &Value, now: &DateTime<Utc>) -> Normalized {
    assemble(
        RawFields {
            id: ID.resolve_value(source),
            issuer_name: ISSUER_NAME.resolve_value(source),
            valid_not_before: VALID_NOT_BEFORE.resolve_value(source),
            valid_not_after: VALID_NOT_AFTER.resolve_value(source),
        },
        now,
    )
}

/// Decode `source` as `A`'s document shape and convert it.
pub fn convert<A: VendorAdapter>(
    source: &Value,
    now: &DateTime<Utc>,
) -> Result<Normalized, serde_json::Error> {
    let doc = A::deserialize(source)?;
    Ok(doc.to_metrics(source, now))
}
