use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Sub-field picked from the first `X509CertificateInformation` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum X509Field {
    Issuer,
    ValidNotBefore,
    ValidNotAfter,
}

/// One structural hypothesis about where a field lives in a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateShape {
    /// `"<key>": "value"`
    Scalar(&'static str),
    /// `"<key>": [{"Organization": "value"}, ...]`
    OrganizationList(&'static str),
    /// `"<key>": {"Organization": "value"}`
    OrganizationObject(&'static str),
    /// `"X509CertificateInformation": [{"<field>": "value"}, ...]`
    X509Info(X509Field),
}

/// Outcome of trying a single candidate against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Shape matched; holds the picked value, `None` when it was blank.
    Matched(Option<String>),
    /// Shape did not match or the list was empty.
    Mismatch,
}

#[derive(Deserialize)]
struct OrganizationRecord {
    #[serde(rename = "Organization")]
    organization: String,
}

#[derive(Deserialize)]
struct X509Issuer {
    #[serde(rename = "Issuer")]
    value: String,
}

#[derive(Deserialize)]
struct X509NotBefore {
    #[serde(rename = "ValidNotBefore")]
    value: String,
}

#[derive(Deserialize)]
struct X509NotAfter {
    #[serde(rename = "ValidNotAfter")]
    value: String,
}

trait Picked: DeserializeOwned {
    fn into_value(self) -> String;
}

impl Picked for OrganizationRecord {
    fn into_value(self) -> String {
        self.organization
    }
}

impl Picked for X509Issuer {
    fn into_value(self) -> String {
        self.value
    }
}

impl Picked for X509NotBefore {
    fn into_value(self) -> String {
        self.value
    }
}

impl Picked for X509NotAfter {
    fn into_value(self) -> String {
        self.value
    }
}

const X509_INFO_KEY: &str = "X509CertificateInformation";

pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Only the head of the list is decoded; later records are free to take any shape.
fn first_of<R: Picked>(value: &Value) -> Attempt {
    let Ok(records) = Vec::<Value>::deserialize(value) else {
        return Attempt::Mismatch;
    };
    let Some(first) = records.first() else {
        return Attempt::Mismatch;
    };

    match R::deserialize(first) {
        Ok(record) => Attempt::Matched(non_blank(record.into_value())),
        Err(_) => Attempt::Mismatch,
    }
}

impl CandidateShape {
    fn key(&self) -> &'static str {
        match self {
            CandidateShape::Scalar(key)
            | CandidateShape::OrganizationList(key)
            | CandidateShape::OrganizationObject(key) => key,
            CandidateShape::X509Info(_) => X509_INFO_KEY,
        }
    }

    pub fn attempt(&self, doc: &Value) -> Attempt {
        let Some(value) = doc.get(self.key()) else {
            return Attempt::Mismatch;
        };

        match self {
            CandidateShape::Scalar(_) => match String::deserialize(value).ok().and_then(non_blank) {
                Some(s) => Attempt::Matched(Some(s)),
                None => Attempt::Mismatch,
            },
            CandidateShape::OrganizationList(_) => first_of::<OrganizationRecord>(value),
            CandidateShape::OrganizationObject(_) => match OrganizationRecord::deserialize(value) {
                Ok(record) => Attempt::Matched(non_blank(record.organization)),
                Err(_) => Attempt::Mismatch,
            },
            CandidateShape::X509Info(X509Field::Issuer) => first_of::<X509Issuer>(value),
            CandidateShape::X509Info(X509Field::ValidNotBefore) => first_of::<X509NotBefore>(value),
            CandidateShape::X509Info(X509Field::ValidNotAfter) => first_of::<X509NotAfter>(value),
        }
    }
}

/// A value together with the candidate that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub shape: CandidateShape,
}

/// Ordered candidate shapes for one logical field; the first matching shape wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    pub candidates: &'static [CandidateShape],
}

impl FieldResolver {
    pub fn resolve(&self, doc: &Value) -> Option<Resolution> {
        for shape in self.candidates {
            match shape.attempt(doc) {
                Attempt::Matched(value) => {
                    return value.map(|value| Resolution {
                        value,
                        shape: *shape,
                    })
                }
                Attempt::Mismatch => continue,
            }
        }
        None
    }

    pub fn resolve_value(&self, doc: &Value) -> Option<String> {
        self.resolve(doc).map(|r| r.value)
    }
}

pub const ID: FieldResolver = FieldResolver {
    candidates: &[CandidateShape::Scalar("Id")],
};

pub const ISSUER_NAME: FieldResolver = FieldResolver {
    candidates: &[
        CandidateShape::OrganizationList("Issuer"),
        CandidateShape::X509Info(X509Field::Issuer),
        CandidateShape::OrganizationObject("Issuer"),
        CandidateShape::Scalar("IssuerName"),
        CandidateShape::Scalar("Issuer"),
    ],
};

pub const VALID_NOT_BEFORE: FieldResolver = FieldResolver {
    candidates: &[
        CandidateShape::Scalar("ValidNotBefore"),
        CandidateShape::Scalar("VaildFrom"),
        CandidateShape::X509Info(X509Field::ValidNotBefore),
    ],
};

pub const VALID_NOT_AFTER: FieldResolver = FieldResolver {
    candidates: &[
        CandidateShape::Scalar("ValidNotAfter"),
        CandidateShape::Scalar("GoodTHRU"),
        CandidateShape::X509Info(X509Field::ValidNotAfter),
    ],
};
