//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use super::property::{
    NewProperty, Price, PropertyUpdate, MAX_LOCATION_LENGTH, MAX_TITLE_LENGTH,
};

/// Request body for creating a property (POST /properties)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl CreatePropertyRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_title(&self.title).or_else(|| validate_location(&self.location))
    }
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(req: CreatePropertyRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            location: req.location,
        }
    }
}

/// Request body for a partial update (PUT /properties/:id)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePropertyRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub location: Option<String>,
}

impl UpdatePropertyRequest {
    /// Validates only the fields that are present.
    pub fn validate(&self) -> Option<String> {
        if self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.location.is_none()
        {
            return Some("Update must change at least one field".to_string());
        }
        self.title
            .as_deref()
            .and_then(validate_title)
            .or_else(|| self.location.as_deref().and_then(validate_location))
    }
}

impl From<UpdatePropertyRequest> for PropertyUpdate {
    fn from(req: UpdatePropertyRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            location: req.location,
        }
    }
}

/// Query string for GET /properties/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub location: String,
}

fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return Some("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Some(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    None
}

fn validate_location(location: &str) -> Option<String> {
    if location.trim().is_empty() {
        return Some("Location cannot be empty".to_string());
    }
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Some(format!(
            "Location exceeds maximum length of {} characters",
            MAX_LOCATION_LENGTH
        ));
    }
    None
}
