//! Country and subdivision reference table
//!
//! Canada and the United States carry their full subdivision lists; every
//! other country is listed by name only, which makes its region free text.

/// A first-level administrative division (province, state, territory)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdivision {
    pub code: &'static str,
    pub name: &'static str,
}

/// A country with its optional subdivision list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    pub name: &'static str,
    pub subdivisions: &'static [Subdivision],
}

macro_rules! subdivisions {
    ($($code:literal => $name:literal),* $(,)?) => {
        &[$(Subdivision { code: $code, name: $name }),*]
    };
}

const CA_SUBDIVISIONS: &[Subdivision] = subdivisions![
    "AB" => "Alberta",
    "BC" => "British Columbia",
    "MB" => "Manitoba",
    "NB" => "New Brunswick",
    "NL" => "Newfoundland and Labrador",
    "NS" => "Nova Scotia",
    "NT" => "Northwest Territories",
    "NU" => "Nunavut",
    "ON" => "Ontario",
    "PE" => "Prince Edward Island",
    "QC" => "Quebec",
    "SK" => "Saskatchewan",
    "YT" => "Yukon",
];

const US_SUBDIVISIONS: &[Subdivision] = subdivisions![
    "AL" => "Alabama",
    "AK" => "Alaska",
    "AZ" => "Arizona",
    "AR" => "Arkansas",
    "CA" => "California",
    "CO" => "Colorado",
    "CT" => "Connecticut",
    "DE" => "Delaware",
    "DC" => "District of Columbia",
    "FL" => "Florida",
    "GA" => "Georgia",
    "HI" => "Hawaii",
    "ID" => "Idaho",
    "IL" => "Illinois",
    "IN" => "Indiana",
    "IA" => "Iowa",
    "KS" => "Kansas",
    "KY" => "Kentucky",
    "LA" => "Louisiana",
    "ME" => "Maine",
    "MD" => "Maryland",
    "MA" => "Massachusetts",
    "MI" => "Michigan",
    "MN" => "Minnesota",
    "MS" => "Mississippi",
    "MO" => "Missouri",
    "MT" => "Montana",
    "NE" => "Nebraska",
    "NV" => "Nevada",
    "NH" => "New Hampshire",
    "NJ" => "New Jersey",
    "NM" => "New Mexico",
    "NY" => "New York",
    "NC" => "North Carolina",
    "ND" => "North Dakota",
    "OH" => "Ohio",
    "OK" => "Oklahoma",
    "OR" => "Oregon",
    "PA" => "Pennsylvania",
    "RI" => "Rhode Island",
    "SC" => "South Carolina",
    "SD" => "South Dakota",
    "TN" => "Tennessee",
    "TX" => "Texas",
    "UT" => "Utah",
    "VT" => "Vermont",
    "VA" => "Virginia",
    "WA" => "Washington",
    "WV" => "West Virginia",
    "WI" => "Wisconsin",
    "WY" => "Wyoming",
    "AS" => "American Samoa",
    "GU" => "Guam",
    "MP" => "Northern Mariana Islands",
    "PR" => "Puerto Rico",
    "VI" => "U.S. Virgin Islands",
];

macro_rules! countries {
    (@subs $subs:expr) => { $subs };
    (@subs) => { &[] };
    ($($code:literal => $name:literal $(, $subs:expr)?);* $(;)?) => {
        &[$(Country { code: $code, name: $name, subdivisions: countries!(@subs $($subs)?) }),*]
    };
}

const COUNTRIES: &[Country] = countries![
    "CA" => "Canada", CA_SUBDIVISIONS;
    "US" => "United States", US_SUBDIVISIONS;
    "AU" => "Australia";
    "AT" => "Austria";
    "BE" => "Belgium";
    "BR" => "Brazil";
    "CN" => "China";
    "DK" => "Denmark";
    "FI" => "Finland";
    "FR" => "France";
    "DE" => "Germany";
    "HK" => "Hong Kong";
    "IN" => "India";
    "IE" => "Ireland";
    "IT" => "Italy";
    "JP" => "Japan";
    "MX" => "Mexico";
    "NL" => "Netherlands";
    "NZ" => "New Zealand";
    "NO" => "Norway";
    "PH" => "Philippines";
    "PL" => "Poland";
    "PT" => "Portugal";
    "KR" => "South Korea";
    "ES" => "Spain";
    "SE" => "Sweden";
    "CH" => "Switzerland";
    "TW" => "Taiwan";
    "GB" => "United Kingdom";
    "VN" => "Vietnam";
];

/// Lookup table of countries and their subdivisions
#[derive(Debug, Clone, Copy)]
pub struct CountryTable {
    countries: &'static [Country],
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CountryTable {
    /// The built-in table
    pub const fn standard() -> Self {
        Self { countries: COUNTRIES }
    }

    /// A table over caller-provided static data
    pub const fn from_static(countries: &'static [Country]) -> Self {
        Self { countries }
    }

    /// Case-insensitive lookup by ISO code
    pub fn find(&self, code: &str) -> Option<&'static Country> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    pub fn name(&self, code: &str) -> Option<&'static str> {
        self.find(code).map(|country| country.name)
    }

    /// Subdivisions of a country; empty for unlisted or unknown countries
    pub fn subdivisions(&self, code: &str) -> &'static [Subdivision] {
        self.find(code).map_or(&[], |country| country.subdivisions)
    }

    pub fn has_subdivisions(&self, code: &str) -> bool {
        !self.subdivisions(code).is_empty()
    }

    /// Whether `region` is one of the country's subdivision codes
    pub fn contains_region(&self, country: &str, region: &str) -> bool {
        let region = region.trim();
        self.subdivisions(country)
            .iter()
            .any(|sub| sub.code.eq_ignore_ascii_case(region))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Country> {
        self.countries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canada_has_thirteen_subdivisions() {
        let table = CountryTable::standard();
        assert_eq!(table.subdivisions("CA").len(), 13);
        assert!(table.contains_region("ca", "bc"));
    }

    #[test]
    fn test_us_includes_district_of_columbia() {
        let table = CountryTable::standard();
        assert!(table.contains_region("US", "DC"));
        assert!(!table.contains_region("US", "BC"));
    }

    #[test]
    fn test_unlisted_country_has_no_subdivisions() {
        let table = CountryTable::standard();
        assert_eq!(table.name("GB"), Some("United Kingdom"));
        assert!(!table.has_subdivisions("GB"));
        assert!(!table.has_subdivisions("XX"));
        assert!(table.find("XX").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let table = CountryTable::standard();
        let mut codes: Vec<_> = table.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), table.iter().count());
    }
}
