use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::store::StoreError;

/// Editable fields as submitted by a client, before any coercion.
///
/// Every scalar is the raw submitted text, or `None` when the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInput {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: LocationInput,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub square_feet: Option<String>,
    pub amenities: Vec<String>,
    pub rates: RatesInput,
    pub seller_info: SellerInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesInput {
    pub weekly: Option<String>,
    pub monthly: Option<String>,
    pub nightly: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Editable fields after the store layer has coerced numeric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFields {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Location,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub square_feet: Option<f64>,
    pub amenities: Vec<String>,
    pub rates: Rates,
    pub seller_info: SellerInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    pub weekly: Option<f64>,
    pub monthly: Option<f64>,
    pub nightly: Option<f64>,
}

impl TryFrom<PropertyInput> for PropertyFields {
    type Error = StoreError;

    fn try_from(input: PropertyInput) -> Result<Self, Self::Error> {
        Ok(Self {
            beds: parse_number("beds", input.beds.as_deref())?,
            baths: parse_number("baths", input.baths.as_deref())?,
            square_feet: parse_number("square_feet", input.square_feet.as_deref())?,
            rates: Rates {
                weekly: parse_number("rates.weekly", input.rates.weekly.as_deref())?,
                monthly: parse_number("rates.monthly", input.rates.monthly.as_deref())?,
                nightly: parse_number("rates.nightly", input.rates.nightly.as_deref())?,
            },
            property_type: input.property_type,
            name: input.name,
            description: input.description,
            location: Location {
                street: input.location.street,
                city: input.location.city,
                state: input.location.state,
                zipcode: input.location.zipcode,
            },
            amenities: input.amenities,
            seller_info: input.seller_info,
        })
    }
}

/// Blank text counts as absent; anything else must be a finite number.
fn parse_number(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, StoreError> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(StoreError::InvalidField {
            field,
            value: text.to_string(),
        }),
    }
}

/// A stored property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    #[serde(flatten)]
    pub fields: PropertyFields,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }
}
