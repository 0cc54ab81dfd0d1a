//! Lead data collected by the form: fixed choice lists, raw submission and validated request.
//!
//! [`LeadForm`] is what arrives from a browser or JSON client, unvalidated.
//! [`LeadForm::validate`] turns it into a [`LeadRequest`], which is the only input the
//! prompt builder accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Field, MissingFieldError, ValidationError};

/// Defines a closed set of form choices identified by their display label.
///
/// Each enum gets `ALL` (display order), `label()`, `Display`, case-insensitive
/// `FromStr` on the label, and serde as the label string.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every choice, in the order the form lists them.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Label shown in the form and interpolated into the prompt.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice_enum! {
    /// Market segment of the lead. Single choice; the form preselects the first entry.
    Industry, "industry" {
        Travel => "Travel",
        BusinessPayments => "Business Payments",
        LendingAndWages => "Lending & Wages",
        MerchantPayments => "Merchant Payments",
        Investments => "Investments",
        OtherMarkets => "Other Markets",
    }
}

impl Default for Industry {
    fn default() -> Self {
        Industry::Travel
    }
}

choice_enum! {
    /// Platform capability the lead is interested in.
    UseCase, "use case" {
        PayOut => "Pay Out",
        PayIn => "Pay In",
        CrossCurrencyTransactions => "Cross-Currency Transactions",
        FraudDetection => "Fraud Detection",
        Compliance => "Compliance",
        Automation => "Automation",
    }
}

choice_enum! {
    Currency, "currency" {
        Usd => "USD",
        Eur => "EUR",
        Gbp => "GBP",
        Aud => "AUD",
        Inr => "INR",
        Other => "Other",
    }
}

/// Form field names shared by the HTML form and the JSON API.
pub mod fields {
    pub const NAME: &str = "name";
    pub const COMPANY: &str = "company";
    pub const INDUSTRY: &str = "industry";
    pub const USE_CASES: &str = "use_cases";
    pub const CURRENCIES: &str = "currencies";
    pub const NOTES: &str = "notes";
}

/// Raw form values as submitted. Nothing here has been checked yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// `None` or blank selects [`Industry::default`].
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl LeadForm {
    /// Builds a form from `application/x-www-form-urlencoded` pairs, where multi-select
    /// fields arrive as repeated keys. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = LeadForm::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                fields::NAME => form.name = value,
                fields::COMPANY => form.company = value,
                fields::INDUSTRY => form.industry = Some(value),
                fields::USE_CASES => form.use_cases.push(value),
                fields::CURRENCIES => form.currencies.push(value),
                fields::NOTES => form.notes = value,
                _ => {}
            }
        }
        form
    }

    /// Checks required fields, then resolves every choice against its fixed list.
    ///
    /// All missing fields are reported together, in form order. Choice labels are only
    /// looked at once nothing is missing.
    pub fn validate(&self) -> Result<LeadRequest, ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(Field::LeadName);
        }
        if self.company.trim().is_empty() {
            missing.push(Field::CompanyName);
        }
        if self.use_cases.iter().all(|u| u.trim().is_empty()) {
            missing.push(Field::UseCases);
        }
        if self.currencies.iter().all(|c| c.trim().is_empty()) {
            missing.push(Field::Currencies);
        }
        if !missing.is_empty() {
            return Err(MissingFieldError::new(missing).into());
        }

        let industry = match self.industry.as_deref().map(str::trim) {
            None | Some("") => Industry::default(),
            Some(label) => parse_choice(Field::Industry, label)?,
        };
        let use_cases = parse_choices(Field::UseCases, &self.use_cases)?;
        let currencies = parse_choices(Field::Currencies, &self.currencies)?;

        Ok(LeadRequest {
            name: self.name.clone(),
            company: self.company.clone(),
            industry,
            use_cases,
            currencies,
            notes: self.notes.clone(),
        })
    }
}

fn parse_choice<T: FromStr>(field: Field, label: &str) -> Result<T, ValidationError> {
    label.parse().map_err(|_| ValidationError::InvalidChoice {
        field,
        value: label.to_string(),
    })
}

/// Parses labels in submission order, skipping blanks and repeated choices.
fn parse_choices<T>(field: Field, labels: &[String]) -> Result<Vec<T>, ValidationError>
where
    T: FromStr + PartialEq,
{
    let mut out: Vec<T> = Vec::with_capacity(labels.len());
    for label in labels.iter().filter(|l| !l.trim().is_empty()) {
        let choice = parse_choice(field, label)?;
        if !out.contains(&choice) {
            out.push(choice);
        }
    }
    Ok(out)
}

/// A validated lead. Only [`LeadForm::validate`] produces one, so holders can rely on
/// name, company, use cases and currencies being present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeadRequest {
    name: String,
    company: String,
    industry: Industry,
    use_cases: Vec<UseCase>,
    currencies: Vec<Currency>,
    notes: String,
}

impl LeadRequest {
    /// Validating constructor for callers that already hold typed choices.
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        industry: Industry,
        use_cases: Vec<UseCase>,
        currencies: Vec<Currency>,
        notes: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        LeadForm {
            name: name.into(),
            company: company.into(),
            industry: Some(industry.label().to_string()),
            use_cases: use_cases.iter().map(|u| u.label().to_string()).collect(),
            currencies: currencies.iter().map(|c| c.label().to_string()).collect(),
            notes: notes.into(),
        }
        .validate()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
