use serde::{Deserialize, Serialize};

/// Vendor-neutral SSL certificate record produced for every BMC document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalCertMetrics {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "IssuerName", skip_serializing_if = "Option::is_none", default)]
    pub issuer_name: Option<String>,
    #[serde(rename = "ValidNotBefore", skip_serializing_if = "Option::is_none", default)]
    pub valid_not_before: Option<String>,
    #[serde(rename = "ValidNotAfter", skip_serializing_if = "Option::is_none", default)]
    pub valid_not_after: Option<String>,
    #[serde(
        rename = "NumberofDaysToExpiry",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub days_to_expiry: Option<i64>,
}

impl CanonicalCertMetrics {
    pub fn is_expired(&self) -> bool {
        matches!(self.days_to_expiry, Some(days) if days < 0)
    }

    /// True when the certificate expires within `threshold` days (expired ones included).
    pub fn expires_within(&self, threshold: i64) -> bool {
        matches!(self.days_to_expiry, Some(days) if days <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_metrics() -> CanonicalCertMetrics {
        CanonicalCertMetrics {
            id: Some("1".into()),
            issuer_name: Some("ACME CA".into()),
            valid_not_before: Some("2024-01-01T00:00:00Z".into()),
            valid_not_after: Some("2026-01-01T00:00:00Z".into()),
            days_to_expiry: Some(365),
        }
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let json = serde_json::to_value(make_test_metrics()).unwrap();
        assert_eq!(json["Id"], "1");
        assert_eq!(json["IssuerName"], "ACME CA");
        assert_eq!(json["ValidNotBefore"], "2024-01-01T00:00:00Z");
        assert_eq!(json["ValidNotAfter"], "2026-01-01T00:00:00Z");
        assert_eq!(json["NumberofDaysToExpiry"], 365);
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let metrics = CanonicalCertMetrics {
            id: Some("1".into()),
            ..Default::default()
        };
        let out = serde_json::to_string(&metrics).unwrap();
        assert_eq!(out, r#"{"Id":"1"}"#);
    }

    #[test]
    fn test_serialize_keeps_zero_days() {
        let metrics = CanonicalCertMetrics {
            days_to_expiry: Some(0),
            ..Default::default()
        };
        let out = serde_json::to_string(&metrics).unwrap();
        assert_eq!(out, r#"{"NumberofDaysToExpiry":0}"#);
    }

    #[test]
    fn test_deserialize_missing_fields_default_to_absent() {
        let metrics: CanonicalCertMetrics = serde_json::from_str(r#"{"Id":"7"}"#).unwrap();
        assert_eq!(metrics.id.as_deref(), Some("7"));
        assert!(metrics.issuer_name.is_none());
        assert!(metrics.days_to_expiry.is_none());
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(make_test_metrics(), make_test_metrics());
        let mut other = make_test_metrics();
        other.days_to_expiry = Some(364);
        assert_ne!(make_test_metrics(), other);
    }

    #[test]
    fn test_is_expired() {
        let mut metrics = make_test_metrics();
        assert!(!metrics.is_expired());
        metrics.days_to_expiry = Some(-1);
        assert!(metrics.is_expired());
        metrics.days_to_expiry = None;
        assert!(!metrics.is_expired());
    }

    #[test]
    fn test_expires_within() {
        let mut metrics = make_test_metrics();
        assert!(!metrics.expires_within(30));
        metrics.days_to_expiry = Some(30);
        assert!(metrics.expires_within(30));
        metrics.days_to_expiry = Some(-5);
        assert!(metrics.expires_within(30));
        metrics.days_to_expiry = None;
        assert!(!metrics.expires_within(30));
    }
}
