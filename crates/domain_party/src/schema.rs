//! Validation schemas
//!
//! A [`Schema`] maps each field to an ordered list of [`Rule`]s. Rules are
//! plain values, so a schema can be compared, cloned, and inspected (e.g. to
//! ask which postal-code rule is active) instead of being a bag of closures.
//!
//! Address schemas depend on the country. [`rules_for`] is a pure function:
//! when the country changes the caller asks for a new schema rather than
//! patching the old one in place.
//!
//! # Rule semantics
//!
//! - `Required` fails on blank or space-only values.
//! - Every other rule passes on blank values, so an optional field is simply
//!   a field without `Required`.
//! - Rules run in order and the first failure wins.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::address::AddressField;
use crate::country::CountryTable;

static CANADIAN_POSTAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)^[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z][ -]?\d[ABCEGHJ-NPRSTV-Z]\d$").ok()
});

static US_ZIP: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").ok());

static PHONE_CHARS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\+?[0-9 ().-]+$").ok());

static DIGITS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]+$").ok());

/// Named regular-expression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `A1A 1A1`, optional space or hyphen, case-insensitive
    CanadianPostal,
    /// `12345` or `12345-6789`
    UsZip,
    /// Digits only
    Digits,
}

impl Pattern {
    fn regex(&self) -> Option<&'static Regex> {
        match self {
            Pattern::CanadianPostal => CANADIAN_POSTAL.as_ref(),
            Pattern::UsZip => US_ZIP.as_ref(),
            Pattern::Digits => DIGITS.as_ref(),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_some_and(|re| re.is_match(value))
    }
}

/// What a rule checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    /// Maximum length in characters of the trimmed value
    MaxLength(usize),
    /// Trimmed value must equal one of the codes, ignoring case
    OneOf(Vec<&'static str>),
    Pattern(Pattern),
    Email,
    /// Phone punctuation only, with a digit count in `min..=max`
    Phone { min_digits: usize, max_digits: usize },
}

/// A predicate paired with the message shown when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Cow<'static, str>,
}

impl Rule {
    pub fn new(kind: RuleKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn required(message: &'static str) -> Self {
        Self::new(RuleKind::Required, message)
    }

    /// Length cap with the standard "Maximum N characters" message
    pub fn max_length(max: usize) -> Self {
        Self::new(RuleKind::MaxLength(max), format!("Maximum {} characters", max))
    }

    pub fn one_of(codes: Vec<&'static str>, message: &'static str) -> Self {
        Self::new(RuleKind::OneOf(codes), message)
    }

    pub fn pattern(pattern: Pattern, message: &'static str) -> Self {
        Self::new(RuleKind::Pattern(pattern), message)
    }

    /// Evaluates the rule: `Ok` or the failure message
    pub fn check(&self, value: &str) -> Result<(), &str> {
        let trimmed = value.trim();
        let passed = match &self.kind {
            RuleKind::Required => !trimmed.is_empty(),
            _ if trimmed.is_empty() => true,
            RuleKind::MaxLength(max) => trimmed.chars().count() <= *max,
            RuleKind::OneOf(codes) => codes.iter().any(|code| code.eq_ignore_ascii_case(trimmed)),
            RuleKind::Pattern(pattern) => pattern.is_match(trimmed),
            RuleKind::Email => trimmed.validate_email(),
            RuleKind::Phone { min_digits, max_digits } => {
                let digits = trimmed.chars().filter(char::is_ascii_digit).count();
                PHONE_CHARS.as_ref().is_some_and(|re| re.is_match(trimmed))
                    && (*min_digits..=*max_digits).contains(&digits)
            }
        };
        if passed {
            Ok(())
        } else {
            Err(&self.message)
        }
    }
}

/// Ordered rules per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<F: Ord> {
    rules: BTreeMap<F, Vec<Rule>>,
}

impl<F: Ord> Default for Schema<F> {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> Schema<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schema with `field`'s rules replaced
    pub fn with(mut self, field: F, rules: Vec<Rule>) -> Self {
        self.rules.insert(field, rules);
        self
    }

    /// Rules for a field; empty when the field is unconstrained
    pub fn rules(&self, field: F) -> &[Rule] {
        self.rules.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.rules.keys().copied()
    }

    /// First failing message for `value`, if any
    pub fn check_field(&self, field: F, value: &str) -> Option<&str> {
        self.rules(field)
            .iter()
            .find_map(|rule| rule.check(value).err())
    }
}

/// Which postal-code format an address schema enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalCodeRule {
    Canadian,
    UsZip,
    /// Length cap only, blank allowed
    Permissive,
}

impl Schema<AddressField> {
    pub fn postal_code_rule(&self) -> PostalCodeRule {
        let rules = self.rules(AddressField::PostalCode);
        let has = |pattern| rules.iter().any(|r| r.kind == RuleKind::Pattern(pattern));
        if has(Pattern::CanadianPostal) {
            PostalCodeRule::Canadian
        } else if has(Pattern::UsZip) {
            PostalCodeRule::UsZip
        } else {
            PostalCodeRule::Permissive
        }
    }

    /// Whether region must be picked from a subdivision list
    pub fn restricts_region(&self) -> bool {
        self.rules(AddressField::Region)
            .iter()
            .any(|r| matches!(r.kind, RuleKind::OneOf(_)))
    }
}

/// Address schema for `country` using the built-in country table
pub fn rules_for(country: &str) -> Schema<AddressField> {
    address_schema(&CountryTable::standard(), country)
}

/// Address schema for `country`
///
/// `CA` and `US` get the full rule set plus their postal-code pattern; any
/// other value (including blank) relaxes city, region, and postal code to
/// length caps of 40, 2, and 15 characters.
pub fn address_schema(table: &CountryTable, country: &str) -> Schema<AddressField> {
    let country = country.trim().to_ascii_uppercase();

    let common = Schema::new()
        .with(
            AddressField::Street,
            vec![Rule::required("Street address is required"), Rule::max_length(50)],
        )
        .with(AddressField::StreetAdditional, vec![Rule::max_length(50)])
        .with(AddressField::Country, vec![Rule::required("Country is required")])
        .with(AddressField::DeliveryInstructions, vec![Rule::max_length(80)]);

    let postal_pattern = match country.as_str() {
        "CA" => Rule::pattern(Pattern::CanadianPostal, "Must be a valid postal code (e.g. V8W 1A1)"),
        "US" => Rule::pattern(Pattern::UsZip, "Must be a valid zip code (e.g. 12345 or 12345-6789)"),
        _ => {
            return common
                .with(AddressField::City, vec![Rule::max_length(40)])
                .with(AddressField::Region, vec![Rule::max_length(2)])
                .with(AddressField::PostalCode, vec![Rule::max_length(15)]);
        }
    };

    let codes = table
        .subdivisions(&country)
        .iter()
        .map(|sub| sub.code)
        .collect();

    common
        .with(
            AddressField::City,
            vec![Rule::required("City is required"), Rule::max_length(40)],
        )
        .with(
            AddressField::Region,
            vec![
                Rule::required("Province/State is required"),
                Rule::max_length(2),
                Rule::one_of(codes, "Please select a valid province/state"),
            ],
        )
        .with(
            AddressField::PostalCode,
            vec![
                Rule::required("Postal code is required"),
                Rule::max_length(15),
                postal_pattern,
            ],
        )
}
