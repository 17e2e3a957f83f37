//! The strongly-typed inference input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::frame::{FeatureFrame, FeatureValue};
use crate::schema::{self, CategoryColumn, NumericBounds};
use crate::{RecordError, Result};

/// Boolean-as-category used by `Parking_Space` and `Security`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const OPTIONS: [&'static str; 2] = ["Yes", "No"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            _ => Err(()),
        }
    }
}

/// One property as submitted through the predictor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub city: String,
    pub property_type: String,
    pub furnished_status: String,
    pub amenities_count: u8,
    pub size_sqft: u32,
    pub price_lakhs: f64,
    pub age_years: u32,
    pub public_transport: String,
    pub parking_space: YesNo,
    pub security: YesNo,
    pub facing: String,
    pub owner_type: String,
    pub availability_status: String,
    pub nearby_schools: u32,
    pub nearby_hospitals: u32,
}

impl PropertyRecord {
    /// Categorical value for a column.
    pub fn category(&self, column: CategoryColumn) -> &str {
        match column {
            CategoryColumn::City => &self.city,
            CategoryColumn::PropertyType => &self.property_type,
            CategoryColumn::FurnishedStatus => &self.furnished_status,
            CategoryColumn::PublicTransport => &self.public_transport,
            CategoryColumn::ParkingSpace => self.parking_space.as_str(),
            CategoryColumn::Security => self.security.as_str(),
            CategoryColumn::Facing => &self.facing,
            CategoryColumn::OwnerType => &self.owner_type,
            CategoryColumn::AvailabilityStatus => &self.availability_status,
        }
    }

    /// Check the numeric bounds and that no category is blank.
    pub fn validate(&self) -> Result<()> {
        check_bounds(schema::SIZE_IN_SQFT, self.size_sqft as f64, schema::SIZE_BOUNDS)?;
        check_bounds(schema::PRICE_IN_LAKHS, self.price_lakhs, schema::PRICE_BOUNDS)?;
        check_bounds(schema::AGE_OF_PROPERTY, self.age_years as f64, schema::AGE_BOUNDS)?;
        check_bounds(
            schema::AMENITIES_COUNT,
            self.amenities_count as f64,
            schema::AMENITIES_BOUNDS,
        )?;

        for column in CategoryColumn::ALL {
            if self.category(column).trim().is_empty() {
                return Err(RecordError::MissingField(column.column()));
            }
        }
        Ok(())
    }

    /// Build the single-row frame in `schema::FEATURE_COLUMNS` order.
    pub fn to_frame(&self) -> FeatureFrame {
        let mut frame = FeatureFrame::new()
            .with_numeric(schema::SIZE_IN_SQFT, self.size_sqft as f64)
            .with_numeric(schema::PRICE_IN_LAKHS, self.price_lakhs)
            .with_numeric(schema::AMENITIES_COUNT, self.amenities_count as f64)
            .with_numeric(schema::NEARBY_SCHOOLS, self.nearby_schools as f64)
            .with_numeric(schema::NEARBY_HOSPITALS, self.nearby_hospitals as f64)
            .with_numeric(schema::AGE_OF_PROPERTY, self.age_years as f64);

        for column in CategoryColumn::ALL {
            frame.push(
                column.column(),
                FeatureValue::Categorical(self.category(column).to_string()),
            );
        }
        frame
    }
}

fn check_bounds(field: &'static str, value: f64, bounds: NumericBounds) -> Result<()> {
    if !value.is_finite() {
        return Err(RecordError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    if !bounds.contains(value) {
        return Err(RecordError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}
