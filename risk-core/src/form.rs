use crate::dto::{LoginRequest, PredictionKind, RegisterRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const SYMPTOM_FIELDS: [&str; 9] = [
    "age",
    "familyHistory",
    "previousConditions",
    "lumpPresent",
    "nippleDischarge",
    "skinChanges",
    "breastPain",
    "armpitSwelling",
    "asymmetry",
];

pub const TECHNICAL_FIELDS: [&str; 6] = [
    "radiusMean",
    "textureMean",
    "perimeterMean",
    "areaMean",
    "smoothnessMean",
    "compactnessMean",
];

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Missing(String),
    #[error("{0} must be a number")]
    NotANumber(String),
    #[error("{0} must be positive")]
    Negative(String),
    #[error("Please enter a valid email address")]
    Email,
    #[error("Password must be at least 8 characters long")]
    Password,
    #[error("All fields required")]
    RegistrationIncomplete,
    #[error("Email and password required")]
    LoginIncomplete,
}

/// A submitted form flattened to field name -> value. Serializes as a flat
/// JSON object whose keys are exactly the form's field names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates overwrite earlier ones. Values are trimmed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut fields = Self::new();
        for (k, v) in pairs {
            fields.insert(k, v.as_ref());
        }
        fields
    }

    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        self.0.insert(key.into(), value.trim().to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn required(&self, key: &str) -> Result<&str, ValidationError> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ValidationError::Missing(key.to_string()))
    }

    pub fn validate_prediction(&self, kind: PredictionKind) -> Result<(), ValidationError> {
        match kind {
            PredictionKind::SymptomBased => {
                let age = self.required("age")?;
                if age.parse::<u32>().is_err() {
                    return match age.parse::<i64>() {
                        Ok(_) => Err(ValidationError::Negative("age".into())),
                        Err(_) => Err(ValidationError::NotANumber("age".into())),
                    };
                }
                Ok(())
            }
            PredictionKind::Technical => {
                for field in TECHNICAL_FIELDS {
                    let raw = self.required(field)?;
                    let value: f64 = raw
                        .parse()
                        .map_err(|_| ValidationError::NotANumber(field.to_string()))?;
                    if !value.is_finite() {
                        return Err(ValidationError::NotANumber(field.to_string()));
                    }
                    if value < 0.0 {
                        return Err(ValidationError::Negative(field.to_string()));
                    }
                }
                Ok(())
            }
        }
    }

    pub fn to_login(&self) -> Result<LoginRequest, ValidationError> {
        let email = self.get("email").unwrap_or_default();
        let password = self.get("password").unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::LoginIncomplete);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn to_registration(&self) -> Result<RegisterRequest, ValidationError> {
        let name = self.get("name").unwrap_or_default();
        let email = self.get("email").unwrap_or_default();
        let password = self.get("password").unwrap_or_default();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ValidationError::RegistrationIncomplete);
        }
        validate_email(email)?;
        validate_password(password)?;
        Ok(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::Password)
    } else {
        Ok(())
    }
}
