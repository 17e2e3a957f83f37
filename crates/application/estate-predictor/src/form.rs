//! The property form: which choices each field offers, what a submission
//! looks like, and how a submission becomes a validated `PropertyRecord`.

use std::collections::BTreeMap;
use std::str::FromStr;

use estate_core::schema::{self, CategoryColumn, NumericBounds};
use estate_core::{PropertyRecord, RecordError, YesNo};
use estate_dataset::ReferenceDataset;
use serde::{Deserialize, Serialize};

use crate::Placeholders;

/// Form key of each categorical field.
pub fn form_key(column: CategoryColumn) -> &'static str {
    match column {
        CategoryColumn::City => "city",
        CategoryColumn::PropertyType => "property_type",
        CategoryColumn::FurnishedStatus => "furnished_status",
        CategoryColumn::PublicTransport => "public_transport",
        CategoryColumn::ParkingSpace => "parking_space",
        CategoryColumn::Security => "security",
        CategoryColumn::Facing => "facing",
        CategoryColumn::OwnerType => "owner_type",
        CategoryColumn::AvailabilityStatus => "availability_status",
    }
}

/// Allowed values of every categorical field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormChoices {
    options: BTreeMap<CategoryColumn, Vec<String>>,
}

impl FormChoices {
    /// Sorted distinct dataset values; Yes/No columns are fixed.
    pub fn from_dataset(ds: &ReferenceDataset) -> Self {
        let options = CategoryColumn::ALL
            .into_iter()
            .map(|column| {
                let values = if column.is_yes_no() {
                    YesNo::OPTIONS.iter().map(|s| s.to_string()).collect()
                } else {
                    ds.distinct_values(column)
                };
                (column, values)
            })
            .collect();
        Self { options }
    }

    pub fn options(&self, column: CategoryColumn) -> &[String] {
        self.options.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn allows(&self, column: CategoryColumn, value: &str) -> bool {
        self.options(column).iter().any(|o| o == value)
    }

    /// Validate a submission and build the inference record.
    pub fn to_record(
        &self,
        input: &FormInput,
        placeholders: Placeholders,
    ) -> Result<PropertyRecord, RecordError> {
        for column in CategoryColumn::ALL {
            // Dataset values are matched byte for byte, padding included.
            let value = input.category(column);
            if value.trim().is_empty() {
                return Err(RecordError::MissingField(column.column()));
            }
            if !self.allows(column, value) {
                return Err(RecordError::UnknownChoice {
                    field: column.column(),
                    value: value.to_string(),
                });
            }
        }

        let amenities: u32 = parse_number(schema::AMENITIES_COUNT, &input.amenities_count)?;
        let amenities_count = u8::try_from(amenities)
            .map_err(|_| out_of_range(schema::AMENITIES_COUNT, amenities as f64, schema::AMENITIES_BOUNDS))?;

        let record = PropertyRecord {
            city: input.city.clone(),
            property_type: input.property_type.clone(),
            furnished_status: input.furnished_status.clone(),
            amenities_count,
            size_sqft: parse_number(schema::SIZE_IN_SQFT, &input.size_sqft)?,
            price_lakhs: parse_number(schema::PRICE_IN_LAKHS, &input.price_lakhs)?,
            age_years: parse_number(schema::AGE_OF_PROPERTY, &input.age_years)?,
            public_transport: input.public_transport.clone(),
            parking_space: parse_yes_no(schema::PARKING_SPACE, &input.parking_space)?,
            security: parse_yes_no(schema::SECURITY, &input.security)?,
            facing: input.facing.clone(),
            owner_type: input.owner_type.clone(),
            availability_status: input.availability_status.clone(),
            nearby_schools: placeholders.nearby_schools,
            nearby_hospitals: placeholders.nearby_hospitals,
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, RecordError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RecordError::MissingField(field));
    }
    raw.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_yes_no(field: &'static str, raw: &str) -> Result<YesNo, RecordError> {
    raw.trim().parse().map_err(|_| RecordError::UnknownChoice {
        field,
        value: raw.to_string(),
    })
}

fn out_of_range(field: &'static str, value: f64, bounds: NumericBounds) -> RecordError {
    RecordError::OutOfRange {
        field,
        value,
        min: bounds.min,
        max: bounds.max,
    }
}

/// Raw form submission. Every field arrives as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub city: String,
    pub property_type: String,
    pub furnished_status: String,
    pub amenities_count: String,
    pub size_sqft: String,
    pub price_lakhs: String,
    pub age_years: String,
    pub public_transport: String,
    pub parking_space: String,
    pub security: String,
    pub facing: String,
    pub owner_type: String,
    pub availability_status: String,
}

impl FormInput {
    /// First option of every select, numeric minimums, three amenities.
    pub fn default_for(choices: &FormChoices) -> Self {
        let first = |column| choices.options(column).first().cloned().unwrap_or_default();
        Self {
            city: first(CategoryColumn::City),
            property_type: first(CategoryColumn::PropertyType),
            furnished_status: first(CategoryColumn::FurnishedStatus),
            amenities_count: schema::AMENITIES_DEFAULT.to_string(),
            size_sqft: format_bound(schema::SIZE_BOUNDS.min),
            price_lakhs: format!("{:.2}", schema::PRICE_BOUNDS.min),
            age_years: format_bound(schema::AGE_BOUNDS.min),
            public_transport: first(CategoryColumn::PublicTransport),
            parking_space: first(CategoryColumn::ParkingSpace),
            security: first(CategoryColumn::Security),
            facing: first(CategoryColumn::Facing),
            owner_type: first(CategoryColumn::OwnerType),
            availability_status: first(CategoryColumn::AvailabilityStatus),
        }
    }

    pub fn category(&self, column: CategoryColumn) -> &str {
        match column {
            CategoryColumn::City => &self.city,
            CategoryColumn::PropertyType => &self.property_type,
            CategoryColumn::FurnishedStatus => &self.furnished_status,
            CategoryColumn::PublicTransport => &self.public_transport,
            CategoryColumn::ParkingSpace => &self.parking_space,
            CategoryColumn::Security => &self.security,
            CategoryColumn::Facing => &self.facing,
            CategoryColumn::OwnerType => &self.owner_type,
            CategoryColumn::AvailabilityStatus => &self.availability_status,
        }
    }
}

fn format_bound(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Control {
    Select,
    Slider,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// One rendered form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub control: Control,
    pub options: Vec<SelectOption>,
    pub min: String,
    pub max: String,
    pub step: String,
    pub value: String,
}

impl FieldSpec {
    fn select(column: CategoryColumn, choices: &FormChoices, current: &str) -> Self {
        let options = choices
            .options(column)
            .iter()
            .map(|v| SelectOption {
                value: v.clone(),
                selected: v == current,
            })
            .collect();
        Self {
            name: form_key(column),
            label: column.label(),
            control: Control::Select,
            options,
            min: String::new(),
            max: String::new(),
            step: String::new(),
            value: current.to_string(),
        }
    }

    fn numeric(
        name: &'static str,
        label: &'static str,
        control: Control,
        bounds: NumericBounds,
        value: &str,
    ) -> Self {
        Self {
            name,
            label,
            control,
            options: Vec::new(),
            min: format_bound(bounds.min),
            max: format_bound(bounds.max),
            step: format_bound(bounds.step),
            value: value.to_string(),
        }
    }

    pub fn is_select(&self) -> bool {
        self.control == Control::Select
    }

    pub fn is_slider(&self) -> bool {
        self.control == Control::Slider
    }
}

/// Two-column form layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub left: Vec<FieldSpec>,
    pub right: Vec<FieldSpec>,
}

impl FormSpec {
    /// Lay out the form, pre-selecting `current` or the defaults.
    pub fn build(choices: &FormChoices, current: Option<&FormInput>) -> Self {
        let defaults;
        let input = match current {
            Some(input) => input,
            None => {
                defaults = FormInput::default_for(choices);
                &defaults
            }
        };
        let select = |column| FieldSpec::select(column, choices, input.category(column));

        let left = vec![
            select(CategoryColumn::City),
            select(CategoryColumn::PropertyType),
            select(CategoryColumn::FurnishedStatus),
            FieldSpec::numeric(
                "amenities_count",
                "Amenities Count",
                Control::Slider,
                schema::AMENITIES_BOUNDS,
                &input.amenities_count,
            ),
        ];

        let right = vec![
            FieldSpec::numeric(
                "size_sqft",
                "Size (SqFt)",
                Control::Number,
                schema::SIZE_BOUNDS,
                &input.size_sqft,
            ),
            FieldSpec::numeric(
                "price_lakhs",
                "Current Price (Lakhs)",
                Control::Number,
                schema::PRICE_BOUNDS,
                &input.price_lakhs,
            ),
            FieldSpec::numeric(
                "age_years",
                "Age of Property (Years)",
                Control::Number,
                schema::AGE_BOUNDS,
                &input.age_years,
            ),
            select(CategoryColumn::PublicTransport),
            select(CategoryColumn::ParkingSpace),
            select(CategoryColumn::Security),
            select(CategoryColumn::Facing),
            select(CategoryColumn::OwnerType),
            select(CategoryColumn::AvailabilityStatus),
        ];

        Self { left, right }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.left.iter().chain(self.right.iter())
    }
}
