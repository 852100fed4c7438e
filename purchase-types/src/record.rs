use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::FilterField;

/// One purchase transaction from the dataset. Column names follow the Black Friday
/// export, anything else in the source row is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Age", deserialize_with = "crate::de::category")]
    pub age: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(
        rename = "Purchase",
        default = "crate::de::missing_purchase",
        deserialize_with = "crate::de::purchase"
    )]
    pub purchase: f64,
    #[serde(rename = "City_Category", deserialize_with = "crate::de::category")]
    pub city_category: String,
    #[serde(rename = "Occupation", deserialize_with = "crate::de::category")]
    pub occupation: String,
}

impl Record {
    /// Value of the column a filter looks at. `All` has no backing column.
    pub fn field(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::CityCategory => Some(&self.city_category),
            FilterField::Occupation => Some(&self.occupation),
            FilterField::All => None,
        }
    }
}

#[derive(Hash, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    /// Kept verbatim so it can be reported, but it never counts toward a series.
    Other(String),
}

impl Gender {
    pub fn code(&self) -> &str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other(code) => code,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "M" => Gender::Male,
            "F" => Gender::Female,
            _ => Gender::Other(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Other(code) => code,
            gender => gender.code().to_string(),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
