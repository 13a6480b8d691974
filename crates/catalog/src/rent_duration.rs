//! Rental period offered for a product.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rentshop_core::ValueObject;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Select a valid choice. {0} is not one of the available choices.")]
pub struct UnknownRentDuration(pub String);

/// How long a single rental of the product lasts.
///
/// The stored value and the display label are the same string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentDuration {
    #[serde(rename = "One Day")]
    OneDay,
    #[serde(rename = "One Week")]
    OneWeek,
    #[serde(rename = "One Month")]
    OneMonth,
}

impl ValueObject for RentDuration {}

impl RentDuration {
    pub const ALL: [RentDuration; 3] = [RentDuration::OneDay, RentDuration::OneWeek, RentDuration::OneMonth];

    /// Stored value.
    pub fn as_str(self) -> &'static str {
        match self {
            RentDuration::OneDay => "One Day",
            RentDuration::OneWeek => "One Week",
            RentDuration::OneMonth => "One Month",
        }
    }

    /// Human label shown in a select widget.
    pub fn label(self) -> &'static str {
        self.as_str()
    }

    /// `(value, label)` pairs in presentation order.
    pub fn choices() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::ALL.into_iter().map(|d| (d.as_str(), d.label()))
    }
}

impl core::fmt::Display for RentDuration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RentDuration {
    type Err = UnknownRentDuration;

    /// Exact match on the stored value; no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownRentDuration(s.to_string()))
    }
}
