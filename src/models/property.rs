//! Property domain model
//!
//! The entity served by the catalog, plus the inputs the store accepts for
//! creating, updating and filtering it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// == Field Limits ==
/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum location length in characters
pub const MAX_LOCATION_LENGTH: usize = 100;

/// Largest representable price in cents (10 digits, 2 of them fractional)
pub const MAX_PRICE_CENTS: u64 = 9_999_999_999;

// == Property Id ==
/// Store-assigned property identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub u64);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Price ==
/// Non-negative decimal price with two fractional digits, stored as cents.
///
/// Serializes as a decimal string (`"250000.00"`) so no precision is lost
/// on the wire. Deserializes from either a decimal string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: u64,
}

/// Reasons a price string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price is empty")]
    Empty,
    #[error("price must not be negative")]
    Negative,
    #[error("price is not a decimal number: {0}")]
    Malformed(String),
    #[error("price allows at most two decimal places")]
    TooPrecise,
    #[error("price exceeds the maximum of 99999999.99")]
    TooLarge,
}

impl Price {
    /// Creates a price from a whole number of cents.
    pub fn from_cents(cents: u64) -> Result<Self, PriceError> {
        if cents > MAX_PRICE_CENTS {
            return Err(PriceError::TooLarge);
        }
        Ok(Self { cents })
    }

    /// Creates a price from whole currency units.
    pub fn from_units(units: u64) -> Result<Self, PriceError> {
        units
            .checked_mul(100)
            .ok_or(PriceError::TooLarge)
            .and_then(Self::from_cents)
    }

    /// Returns the price in cents.
    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Renders the price for display, e.g. `$1,250,000.00`.
    pub fn formatted(&self) -> String {
        let units = (self.cents / 100).to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${}.{:02}", grouped, self.cents % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }
        if s.starts_with('-') {
            return Err(PriceError::Negative);
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(PriceError::Malformed(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(PriceError::TooPrecise);
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceError::TooLarge)?
        };
        let frac_cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| PriceError::Malformed(s.to_string()))? * 10,
            _ => frac.parse().map_err(|_| PriceError::Malformed(s.to_string()))?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or(PriceError::TooLarge)?;
        Self::from_cents(cents)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse(),
            Raw::Integer(units) => Price::from_units(units),
            Raw::Float(value) if value < 0.0 => Err(PriceError::Negative),
            Raw::Float(value) => value.to_string().parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

// == Property ==
/// A property listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Returns the price rendered for display.
    pub fn formatted_price(&self) -> String {
        self.price.formatted()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.formatted_price())
    }
}

// == New Property ==
/// Fields supplied when creating a property. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
}

// == Property Update ==
/// Partial update; `None` leaves a field unchanged. Id and created-at are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
}

impl PropertyUpdate {
    /// Applies the present fields onto `property`.
    pub fn apply(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(location) = self.location {
            property.location = location;
        }
    }
}

// == Property Filter ==
/// List filter. Empty strings impose no constraint.
///
/// `query` matches title or description, `location` matches location; both
/// are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub query: String,
    pub location: String,
}

impl PropertyFilter {
    /// Filter that matches every property.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter for a search by free text and location.
    pub fn search(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
        }
    }

    /// True when neither filter is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.location.is_empty()
    }

    /// Checks whether `property` satisfies the filter.
    pub fn matches(&self, property: &Property) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        let query_ok = self.query.is_empty()
            || contains(&property.title, &self.query)
            || contains(&property.description, &self.query);
        let location_ok = self.location.is_empty() || contains(&property.location, &self.location);

        query_ok && location_ok
    }
}
