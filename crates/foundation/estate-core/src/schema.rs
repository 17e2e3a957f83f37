//! Column names and literal bounds of the feature schema.

use serde::{Deserialize, Serialize};

pub const CITY: &str = "City";
pub const PROPERTY_TYPE: &str = "Property_Type";
pub const FURNISHED_STATUS: &str = "Furnished_Status";
pub const AMENITIES_COUNT: &str = "Amenities_Count";
pub const SIZE_IN_SQFT: &str = "Size_in_SqFt";
pub const PRICE_IN_LAKHS: &str = "Price_in_Lakhs";
pub const AGE_OF_PROPERTY: &str = "Age_of_Property";
pub const PUBLIC_TRANSPORT: &str = "Public_Transport_Accessibility";
pub const PARKING_SPACE: &str = "Parking_Space";
pub const SECURITY: &str = "Security";
pub const FACING: &str = "Facing";
pub const OWNER_TYPE: &str = "Owner_Type";
pub const AVAILABILITY_STATUS: &str = "Availability_Status";
pub const NEARBY_SCHOOLS: &str = "Nearby_Schools";
pub const NEARBY_HOSPITALS: &str = "Nearby_Hospitals";
pub const GROWTH_RATE: &str = "Growth_Rate";
pub const FUTURE_PRICE_5Y: &str = "Future_Price_5Y";

/// Column order of the single-row frame handed to both pipelines.
pub const FEATURE_COLUMNS: [&str; 15] = [
    SIZE_IN_SQFT,
    PRICE_IN_LAKHS,
    AMENITIES_COUNT,
    NEARBY_SCHOOLS,
    NEARBY_HOSPITALS,
    AGE_OF_PROPERTY,
    CITY,
    PROPERTY_TYPE,
    FURNISHED_STATUS,
    PUBLIC_TRANSPORT,
    PARKING_SPACE,
    SECURITY,
    FACING,
    OWNER_TYPE,
    AVAILABILITY_STATUS,
];

/// Inclusive numeric bounds of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumericBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const SIZE_BOUNDS: NumericBounds = NumericBounds::new(200.0, 10_000.0, 50.0);
pub const PRICE_BOUNDS: NumericBounds = NumericBounds::new(5.0, 10_000.0, 0.01);
pub const AGE_BOUNDS: NumericBounds = NumericBounds::new(0.0, 50.0, 1.0);
pub const AMENITIES_BOUNDS: NumericBounds = NumericBounds::new(1.0, 5.0, 1.0);

/// Default slider position for the amenities count.
pub const AMENITIES_DEFAULT: u8 = 3;

/// Categorical feature columns whose choices come from the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryColumn {
    City,
    PropertyType,
    FurnishedStatus,
    PublicTransport,
    ParkingSpace,
    Security,
    Facing,
    OwnerType,
    AvailabilityStatus,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 9] = [
        CategoryColumn::City,
        CategoryColumn::PropertyType,
        CategoryColumn::FurnishedStatus,
        CategoryColumn::PublicTransport,
        CategoryColumn::ParkingSpace,
        CategoryColumn::Security,
        CategoryColumn::Facing,
        CategoryColumn::OwnerType,
        CategoryColumn::AvailabilityStatus,
    ];

    /// Column name in the dataset and in the feature frame.
    pub fn column(self) -> &'static str {
        match self {
            Self::City => CITY,
            Self::PropertyType => PROPERTY_TYPE,
            Self::FurnishedStatus => FURNISHED_STATUS,
            Self::PublicTransport => PUBLIC_TRANSPORT,
            Self::ParkingSpace => PARKING_SPACE,
            Self::Security => SECURITY,
            Self::Facing => FACING,
            Self::OwnerType => OWNER_TYPE,
            Self::AvailabilityStatus => AVAILABILITY_STATUS,
        }
    }

    /// Human label shown next to the form control.
    pub fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::PropertyType => "Property Type",
            Self::FurnishedStatus => "Furnished Status",
            Self::PublicTransport => "Public Transport Accessibility",
            Self::ParkingSpace => "Parking Space",
            Self::Security => "Security",
            Self::Facing => "Facing",
            Self::OwnerType => "Owner Type",
            Self::AvailabilityStatus => "Availability Status",
        }
    }

    /// Yes/No columns offer a fixed pair of options instead of dataset values.
    pub fn is_yes_no(self) -> bool {
        matches!(self, Self::ParkingSpace | Self::Security)
    }
}
