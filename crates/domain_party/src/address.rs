//! Postal address of a filing party

use std::fmt;

use serde::{Deserialize, Serialize};

/// Addressable fields, in the order a form presents them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    Street,
    StreetAdditional,
    City,
    Region,
    PostalCode,
    Country,
    DeliveryInstructions,
}

impl AddressField {
    pub const ALL: [AddressField; 7] = [
        AddressField::Street,
        AddressField::StreetAdditional,
        AddressField::City,
        AddressField::Region,
        AddressField::PostalCode,
        AddressField::Country,
        AddressField::DeliveryInstructions,
    ];

    /// JSON key of the field
    pub fn name(&self) -> &'static str {
        match self {
            AddressField::Street => "street",
            AddressField::StreetAdditional => "streetAdditional",
            AddressField::City => "city",
            AddressField::Region => "region",
            AddressField::PostalCode => "postalCode",
            AddressField::Country => "country",
            AddressField::DeliveryInstructions => "deliveryInstructions",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A postal address
///
/// `region` holds a subdivision code (`BC`, `WA`) for countries with a known
/// subdivision list, and free text otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_additional: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 code
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
}

impl Address {
    /// Creates a new address
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            street_additional: None,
            city: city.into(),
            region: region.into(),
            postal_code: postal_code.into(),
            country: country.into(),
            delivery_instructions: None,
        }
    }

    /// An empty address with only the country preselected
    pub fn empty_in(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }

    /// Current value of a field; absent optional fields read as empty
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::StreetAdditional => self.street_additional.as_deref().unwrap_or(""),
            AddressField::City => &self.city,
            AddressField::Region => &self.region,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Country => &self.country,
            AddressField::DeliveryInstructions => {
                self.delivery_instructions.as_deref().unwrap_or("")
            }
        }
    }

    /// Overwrites a single field
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::Street => self.street = value,
            AddressField::StreetAdditional => self.street_additional = Some(value),
            AddressField::City => self.city = value,
            AddressField::Region => self.region = value,
            AddressField::PostalCode => self.postal_code = value,
            AddressField::Country => self.country = value,
            AddressField::DeliveryInstructions => self.delivery_instructions = Some(value),
        }
    }

    /// Clears everything but the country and delivery instructions
    pub fn clear_location(&mut self) {
        self.street.clear();
        self.street_additional = None;
        self.city.clear();
        self.region.clear();
        self.postal_code.clear();
    }

    /// Whether every field is blank
    pub fn is_blank(&self) -> bool {
        AddressField::ALL
            .iter()
            .all(|field| self.field(*field).trim().is_empty())
    }

    /// Returns the submit-ready form of this address
    ///
    /// Fields are trimmed with inner whitespace collapsed, country and region
    /// codes are upper-cased, Canadian postal codes become `A1A 1A1`, and
    /// blank optional fields become `None`.
    pub fn normalized(&self) -> Address {
        let country = collapse_whitespace(&self.country).to_uppercase();
        let postal_code = if country == "CA" {
            canadian_postal_code(&self.postal_code)
        } else {
            collapse_whitespace(&self.postal_code).to_uppercase()
        };

        Address {
            street: collapse_whitespace(&self.street),
            street_additional: non_blank(self.street_additional.as_deref()),
            city: collapse_whitespace(&self.city),
            region: collapse_whitespace(&self.region).to_uppercase(),
            postal_code,
            country,
            delivery_instructions: non_blank(self.delivery_instructions.as_deref()),
        }
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        let mut lines = vec![self.street.clone()];
        if let Some(extra) = self.street_additional.as_deref().filter(|s| !s.trim().is_empty()) {
            lines.push(extra.to_string());
        }
        let city_line = match (self.region.trim(), self.postal_code.trim()) {
            ("", "") => self.city.clone(),
            ("", postal) => format!("{} {}", self.city, postal),
            (region, postal) => format!("{} {} {}", self.city, region, postal)
                .trim_end()
                .to_string(),
        };
        lines.push(city_line);
        lines.push(self.country.clone());
        lines.join("\n")
    }
}

/// Trims and collapses runs of whitespace to a single space
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(collapse_whitespace)
        .filter(|v| !v.is_empty())
}

fn canadian_postal_code(value: &str) -> String {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();
    if compact.len() == 6 && compact.is_ascii() {
        format!("{} {}", &compact[..3], &compact[3..])
    } else {
        collapse_whitespace(value).to_uppercase()
    }
}
