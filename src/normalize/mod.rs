mod adapter;
mod expiry;
pub mod resolver;
mod timestamp;

pub use adapter::{convert, normalize_generic, Normalized, VendorAdapter};
pub use expiry::{days_to_expiry, Clock, FixedClock, SystemClock};
pub use resolver::{CandidateShape, FieldResolver, Resolution};
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError, TimestampLayout};

use serde_json::Value;

use crate::models::{
    CiscoSslCertificate, DellSslCertificate, HpeSslCertificate, SuperMicroSslCertificate, Vendor,
};

/// Convert one raw certificate document tagged with its vendor.
///
/// The clock is read exactly once. An error means the document does not have
/// the declared vendor's shape at all; unresolvable fields never fail the call.
pub fn normalize_document(
    vendor: Vendor,
    source: &Value,
    clock: &dyn Clock,
) -> Result<Normalized, serde_json::Error> {
    let now = clock.now();
    match vendor {
        Vendor::Dell => convert::<DellSslCertificate>(source, &now),
        Vendor::Hpe => convert::<HpeSslCertificate>(source, &now),
        Vendor::Cisco => convert::<CiscoSslCertificate>(source, &now),
        Vendor::SuperMicro => convert::<SuperMicroSslCertificate>(source, &now),
        Vendor::Unknown => Ok(normalize_generic(source, &now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_dispatch_per_vendor() {
        let source = json!({
            "Id": "1",
            "Issuer": [{"Organization": "ACME CA"}],
            "ValidNotAfter": "2025-01-11T00:00:00Z"
        });
        for vendor in [Vendor::Dell, Vendor::Cisco, Vendor::Hpe, Vendor::Unknown] {
            let out = normalize_document(vendor, &source, &clock()).unwrap();
            assert_eq!(out.metrics.issuer_name.as_deref(), Some("ACME CA"), "{vendor}");
            assert_eq!(out.metrics.days_to_expiry, Some(10), "{vendor}");
        }
    }

    #[test]
    fn test_supermicro_ignores_redfish_keys() {
        let source = json!({
            "Id": "1",
            "Issuer": [{"Organization": "ACME CA"}],
            "GoodTHRU": "2025-01-11T00:00:00Z"
        });
        let out = normalize_document(Vendor::SuperMicro, &source, &clock()).unwrap();
        assert!(out.metrics.issuer_name.is_none());
        assert_eq!(out.metrics.days_to_expiry, Some(10));
    }

    #[test]
    fn test_non_object_document_is_rejected_for_known_vendor() {
        assert!(normalize_document(Vendor::Dell, &json!("nope"), &clock()).is_err());
    }

    #[test]
    fn test_non_object_document_is_empty_for_unknown_vendor() {
        let out = normalize_document(Vendor::Unknown, &json!("nope"), &clock()).unwrap();
        assert_eq!(out, Normalized::default());
    }

    #[test]
    fn test_same_document_same_clock_is_identical() {
        let source = json!({"Id": "1", "GoodTHRU": "Oct 18 00:00:00 2028 GMT"});
        let a = normalize_document(Vendor::SuperMicro, &source, &clock()).unwrap();
        let b = normalize_document(Vendor::SuperMicro, &source, &clock()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.metrics).unwrap(),
            serde_json::to_string(&b.metrics).unwrap()
        );
    }
}
