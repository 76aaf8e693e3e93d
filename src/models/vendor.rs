use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Dell,
    Hpe,
    Cisco,
    SuperMicro,
    Unknown,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Dell => "dell",
            Vendor::Hpe => "hpe",
            Vendor::Cisco => "cisco",
            Vendor::SuperMicro => "supermicro",
            Vendor::Unknown => "unknown",
        }
    }

    /// Redfish resource exposing the HTTPS certificate on this vendor's BMC.
    pub fn certificate_path(&self) -> Option<&'static str> {
        match self {
            Vendor::Dell => {
                Some("/redfish/v1/Managers/iDRAC.Embedded.1/NetworkProtocol/HTTPS/Certificates")
            }
            Vendor::Hpe => Some("/redfish/v1/Managers/1/SecurityService/HttpsCert"),
            Vendor::Cisco => Some("/redfish/v1/Managers/CIMC/NetworkProtocol/HTTPS/Certificates/1"),
            Vendor::SuperMicro => Some("/redfish/v1/UpdateService/Oem/Supermicro/SSLCert"),
            Vendor::Unknown => None,
        }
    }

    /// Guess the producing vendor from keys only one family publishes.
    pub fn detect(doc: &Value) -> Vendor {
        let Some(obj) = doc.as_object() else {
            return Vendor::Unknown;
        };

        if obj.contains_key("GoodTHRU") || obj.contains_key("VaildFrom") {
            Vendor::SuperMicro
        } else if obj.contains_key("X509CertificateInformation") {
            Vendor::Hpe
        } else if obj.contains_key("CertificateUsageTypes") || obj.contains_key("Members") {
            Vendor::Dell
        } else if obj.contains_key("KeyUsage") || obj.contains_key("CertificateString") {
            Vendor::Cisco
        } else {
            Vendor::Unknown
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor name: {0}")]
pub struct UnknownVendorName(pub String);

impl FromStr for Vendor {
    type Err = UnknownVendorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dell" | "idrac" => Ok(Vendor::Dell),
            "hpe" | "ilo" => Ok(Vendor::Hpe),
            "cisco" | "cimc" => Ok(Vendor::Cisco),
            "supermicro" | "smc" => Ok(Vendor::SuperMicro),
            "unknown" | "generic" => Ok(Vendor::Unknown),
            other => Err(UnknownVendorName(other.to_string())),
        }
    }
}

/// Distinguished-name record as Dell and Cisco publish `Subject` and `Issuer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistinguishedName {
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub organizational_unit: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `Subject`/`Issuer` come as a list, a single object, or a flat string depending on firmware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NameField {
    List(Vec<DistinguishedName>),
    Single(DistinguishedName),
    Flat(String),
}

/// HPE iLO `/redfish/v1/Managers/1/SecurityService/HttpsCert`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HpeSslCertificate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub x509_certificate_information: Option<Vec<X509CertificateInformation>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct X509CertificateInformation {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub valid_not_after: Option<String>,
    #[serde(default)]
    pub valid_not_before: Option<String>,
}

/// Cisco CIMC `/redfish/v1/Managers/CIMC/NetworkProtocol/HTTPS/Certificates/1`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CiscoSslCertificate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub subject: Option<NameField>,
    #[serde(default)]
    pub issuer: Option<NameField>,
    #[serde(default)]
    pub valid_not_before: Option<String>,
    #[serde(default)]
    pub valid_not_after: Option<String>,
    #[serde(default)]
    pub certificate_type: Option<String>,
    #[serde(default)]
    pub certificate_string: Option<String>,
    #[serde(default)]
    pub key_usage: Option<Vec<String>>,
}

/// SuperMicro X11/X12 `/redfish/v1/UpdateService/Oem/Supermicro/SSLCert`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuperMicroSslCertificate {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    // the firmware really spells it this way
    #[serde(rename = "VaildFrom", default)]
    pub valid_from: Option<String>,
    #[serde(rename = "GoodTHRU", default)]
    pub good_thru: Option<String>,
}

/// Dell iDRAC certificate collection listing one member per installed certificate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DellCertificates {
    #[serde(rename = "Members", default)]
    pub members: Vec<Member>,
    #[serde(rename = "Members@odata.count", default)]
    pub members_count: Option<u64>,
}

impl DellCertificates {
    pub fn member_paths(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.url.as_str()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(rename = "@odata.id")]
    pub url: String,
}

/// Dell iDRAC 9 certificate member resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellSslCertificate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub subject: Option<NameField>,
    #[serde(default)]
    pub issuer: Option<NameField>,
    #[serde(default)]
    pub valid_not_before: Option<String>,
    #[serde(default)]
    pub valid_not_after: Option<String>,
    #[serde(default)]
    pub certificate_usage_types: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vendor_from_str_aliases() {
        assert_eq!("dell".parse::<Vendor>().unwrap(), Vendor::Dell);
        assert_eq!("iDRAC".parse::<Vendor>().unwrap(), Vendor::Dell);
        assert_eq!("ilo".parse::<Vendor>().unwrap(), Vendor::Hpe);
        assert_eq!(" CIMC ".parse::<Vendor>().unwrap(), Vendor::Cisco);
        assert_eq!("smc".parse::<Vendor>().unwrap(), Vendor::SuperMicro);
        assert_eq!("generic".parse::<Vendor>().unwrap(), Vendor::Unknown);
    }

    #[test]
    fn test_vendor_from_str_rejects_unknown_name() {
        let err = "lenovo".parse::<Vendor>().unwrap_err();
        assert_eq!(err, UnknownVendorName("lenovo".to_string()));
    }

    #[test]
    fn test_unknown_vendor_name_message() {
        let err = "lenovo".parse::<Vendor>().unwrap_err();
        assert_eq!(err.to_string(), "unknown vendor name: lenovo");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_vendor_display_round_trips() {
        for vendor in [Vendor::Dell, Vendor::Hpe, Vendor::Cisco, Vendor::SuperMicro, Vendor::Unknown] {
            assert_eq!(vendor.to_string().parse::<Vendor>().unwrap(), vendor);
        }
    }

    #[test]
    fn test_certificate_path() {
        assert_eq!(
            Vendor::SuperMicro.certificate_path(),
            Some("/redfish/v1/UpdateService/Oem/Supermicro/SSLCert")
        );
        assert!(Vendor::Unknown.certificate_path().is_none());
        for vendor in [Vendor::Dell, Vendor::Hpe, Vendor::Cisco, Vendor::SuperMicro] {
            assert!(vendor.certificate_path().unwrap().starts_with("/redfish/v1/"));
        }
    }

    #[test]
    fn test_detect_supermicro() {
        let doc = json!({"Id": "1", "GoodTHRU": "Oct 18 00:00:00 2028 GMT"});
        assert_eq!(Vendor::detect(&doc), Vendor::SuperMicro);
    }

    #[test]
    fn test_detect_hpe() {
        let doc = json!({"Id": "httpscert", "X509CertificateInformation": []});
        assert_eq!(Vendor::detect(&doc), Vendor::Hpe);
    }

    #[test]
    fn test_detect_dell() {
        let doc = json!({"Id": "SecurityCertificate.1", "CertificateUsageTypes": ["Web"]});
        assert_eq!(Vendor::detect(&doc), Vendor::Dell);
    }

    #[test]
    fn test_detect_cisco() {
        let doc = json!({"Id": "1", "KeyUsage": ["ServerAuthentication"]});
        assert_eq!(Vendor::detect(&doc), Vendor::Cisco);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(Vendor::detect(&json!({"Id": "1"})), Vendor::Unknown);
        assert_eq!(Vendor::detect(&json!([1, 2])), Vendor::Unknown);
    }

    #[test]
    fn test_name_field_list() {
        let field: NameField =
            serde_json::from_value(json!([{"CommonName": "idrac.local", "Organization": "Dell"}]))
                .unwrap();
        match field {
            NameField::List(names) => {
                assert_eq!(names[0].common_name.as_deref(), Some("idrac.local"));
                assert_eq!(names[0].organization.as_deref(), Some("Dell"));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_name_field_single_and_flat() {
        let single: NameField =
            serde_json::from_value(json!({"CommonName": "cimc.local"})).unwrap();
        assert!(matches!(
            single,
            NameField::Single(DistinguishedName { common_name: Some(ref cn), .. }) if cn == "cimc.local"
        ));

        let flat: NameField = serde_json::from_value(json!("CN=bmc")).unwrap();
        assert_eq!(flat, NameField::Flat("CN=bmc".to_string()));
    }

    #[test]
    fn test_supermicro_typo_field_names() {
        let cert: SuperMicroSslCertificate = serde_json::from_value(json!({
            "Id": "1",
            "Name": "cert",
            "VaildFrom": "2024-01-01T00:00:00Z",
            "GoodTHRU": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(cert.valid_from.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(cert.good_thru.as_deref(), Some("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn test_dell_collection_member_paths() {
        let coll: DellCertificates = serde_json::from_value(json!({
            "Members": [
                {"@odata.id": "/redfish/v1/Managers/iDRAC.Embedded.1/NetworkProtocol/HTTPS/Certificates/SecurityCertificate.1"},
                {"@odata.id": "/redfish/v1/Managers/iDRAC.Embedded.1/NetworkProtocol/HTTPS/Certificates/SecurityCertificate.2"}
            ],
            "Members@odata.count": 2
        }))
        .unwrap();
        assert_eq!(coll.members_count, Some(2));
        let paths = coll.member_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("SecurityCertificate.2"));
    }

    #[test]
    fn test_hpe_x509_information_list() {
        let cert: HpeSslCertificate = serde_json::from_value(json!({
            "Id": "HttpsCert",
            "X509CertificateInformation": [{
                "Issuer": "Hewlett Packard Enterprise",
                "SerialNumber": "0A",
                "Subject": "ilo.local",
                "ValidNotAfter": "2027-03-01T00:00:00Z",
                "ValidNotBefore": "2022-03-01T00:00:00Z"
            }]
        }))
        .unwrap();
        let info = cert.x509_certificate_information.unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].issuer.as_deref(), Some("Hewlett Packard Enterprise"));
    }

    #[test]
    fn test_null_lists_decode_as_absent() {
        let hpe: HpeSslCertificate = serde_json::from_value(json!({
            "Id": "1",
            "X509CertificateInformation": null
        }))
        .unwrap();
        assert!(hpe.x509_certificate_information.is_none());

        let cisco: CiscoSslCertificate =
            serde_json::from_value(json!({"Id": "1", "KeyUsage": null, "Issuer": null})).unwrap();
        assert!(cisco.key_usage.is_none());
        assert!(cisco.issuer.is_none());

        let dell: DellSslCertificate =
            serde_json::from_value(json!({"Id": "1", "CertificateUsageTypes": null})).unwrap();
        assert!(dell.certificate_usage_types.is_none());
    }
}
