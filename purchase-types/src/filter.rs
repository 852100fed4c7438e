use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Record;

/// Sentinel filter value that keeps every record.
pub const ALL: &str = "All";

#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
pub enum FilterField {
    #[serde(rename = "City_Category")]
    CityCategory,
    #[serde(rename = "Occupation")]
    Occupation,
    #[default]
    #[serde(rename = "All")]
    All,
}

impl FilterField {
    pub fn column_name(&self) -> &'static str {
        match self {
            FilterField::CityCategory => "City_Category",
            FilterField::Occupation => "Occupation",
            FilterField::All => ALL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::CityCategory => "City Category",
            FilterField::Occupation => "Occupation",
            FilterField::All => ALL,
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown filter field {0}")]
pub struct ParseFilterFieldError(pub String);

impl FromStr for FilterField {
    type Err = ParseFilterFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "City_Category" => Ok(FilterField::CityCategory),
            "Occupation" => Ok(FilterField::Occupation),
            "All" => Ok(FilterField::All),
            _ => Err(ParseFilterFieldError(s.to_string())),
        }
    }
}

/// The single active filter. Only one field is ever applied; picking a value for
/// one field discards whatever the other field had selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub value: String,
    pub field: FilterField,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            value: ALL.to_string(),
            field: FilterField::All,
        }
    }
}

impl FilterState {
    pub fn new(value: impl Into<String>, field: FilterField) -> Self {
        Self {
            value: value.into(),
            field,
        }
    }

    /// Only the `All` value disables filtering. Any other value on the `All` field has
    /// no column to match against and keeps nothing.
    pub fn is_all(&self) -> bool {
        self.value == ALL
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.is_all() || record.field(self.field) == Some(self.value.as_str())
    }

    /// The value a control for `field` should show as selected.
    pub fn selected_for(&self, field: FilterField) -> &str {
        if self.field == field {
            &self.value
        } else {
            ALL
        }
    }
}
