use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loan application as submitted by the borrower.
///
/// Sections are kept as raw JSON so that a malformed section only degrades the scorer
/// that consumes it instead of rejecting the whole submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_documents: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_statements: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_data: Option<Value>,
}

impl LoanApplication {
    /// Interpret an arbitrary JSON payload as an application.
    pub fn from_value(payload: Value) -> Result<Self, SectionError> {
        if !payload.is_object() {
            return Err(SectionError::NotAMapping {
                section: "application",
            });
        }
        serde_json::from_value(payload).map_err(|source| SectionError::Malformed {
            section: "application",
            source,
        })
    }

    pub fn personal(&self) -> Result<PersonalData, SectionError> {
        parse_section("personal_data", self.personal_data.as_ref())
    }

    pub fn business(&self) -> Result<BusinessData, SectionError> {
        parse_section("business_data", self.business_data.as_ref())
    }

    pub fn bank(&self) -> Result<BankStatements, SectionError> {
        parse_section("bank_statements", self.bank_statements.as_ref())
    }

    pub fn social(&self) -> Result<SocialData, SectionError> {
        parse_section("social_data", self.social_data.as_ref())
    }
}

/// Failure to interpret one application section.
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("{section} must be a mapping")]
    NotAMapping { section: &'static str },
    #[error("{section} is malformed: {source}")]
    Malformed {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Absent and `null` sections resolve to the type's neutral default.
pub(crate) fn parse_section<T>(section: &'static str, raw: Option<&Value>) -> Result<T, SectionError>
where
    T: DeserializeOwned + Default,
{
    match raw {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
            .map_err(|source| SectionError::Malformed { section, source }),
        Some(_) => Err(SectionError::NotAMapping { section }),
    }
}

/// Applicant attributes feeding the traditional credit factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalData {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub income: f64,
    pub expenses: f64,
}

impl PersonalData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.income == 0.0 && self.expenses == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessData {
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    /// Years in operation.
    pub age: f64,
    pub revenue: f64,
    pub employees: f64,
    pub environmental_practices: Vec<String>,
    pub social_initiatives: Vec<String>,
    pub governance_practices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankStatements {
    pub average_balance: f64,
    pub monthly_transactions: f64,
    pub bounced_checks: f64,
}

/// Public posts collected from the borrower's business accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialData {
    pub posts: Option<Vec<String>>,
}

/// KYC document types required before any scoring happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "id_proof")]
    Identity,
    #[serde(rename = "address_proof")]
    Address,
    #[serde(rename = "income_proof")]
    Income,
}

impl DocumentKind {
    pub const REQUIRED: [DocumentKind; 3] = [
        DocumentKind::Identity,
        DocumentKind::Address,
        DocumentKind::Income,
    ];

    /// Key under which the document is submitted.
    pub const fn submission_key(self) -> &'static str {
        match self {
            DocumentKind::Identity => "id_proof",
            DocumentKind::Address => "address_proof",
            DocumentKind::Income => "income_proof",
        }
    }

    /// Key under which verification details are reported.
    pub const fn detail_key(self) -> &'static str {
        match self {
            DocumentKind::Identity => "id",
            DocumentKind::Address => "address",
            DocumentKind::Income => "income",
        }
    }
}
