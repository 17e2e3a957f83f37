use estate_core::schema::{self, CategoryColumn};
use serde::{Deserialize, Serialize};

/// Columns the CSV header must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    schema::CITY,
    schema::PROPERTY_TYPE,
    schema::FURNISHED_STATUS,
    schema::AMENITIES_COUNT,
    schema::SIZE_IN_SQFT,
    schema::PRICE_IN_LAKHS,
    schema::AGE_OF_PROPERTY,
    schema::PUBLIC_TRANSPORT,
    schema::PARKING_SPACE,
    schema::SECURITY,
    schema::FACING,
    schema::OWNER_TYPE,
    schema::AVAILABILITY_STATUS,
    schema::GROWTH_RATE,
    schema::FUTURE_PRICE_5Y,
];

/// One row of the reference dataset.
///
/// Numeric columns are read as `f64` regardless of how the cleaning step
/// wrote them; the form applies its own integer bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Property_Type")]
    pub property_type: String,
    #[serde(rename = "Furnished_Status")]
    pub furnished_status: String,
    #[serde(rename = "Amenities_Count")]
    pub amenities_count: f64,
    #[serde(rename = "Size_in_SqFt")]
    pub size_sqft: f64,
    #[serde(rename = "Price_in_Lakhs")]
    pub price_lakhs: f64,
    #[serde(rename = "Age_of_Property")]
    pub age_years: f64,
    #[serde(rename = "Public_Transport_Accessibility")]
    pub public_transport: String,
    #[serde(rename = "Parking_Space")]
    pub parking_space: String,
    #[serde(rename = "Security")]
    pub security: String,
    #[serde(rename = "Facing")]
    pub facing: String,
    #[serde(rename = "Owner_Type")]
    pub owner_type: String,
    #[serde(rename = "Availability_Status")]
    pub availability_status: String,
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: f64,
    #[serde(rename = "Future_Price_5Y")]
    pub future_price_5y: f64,
    #[serde(rename = "Nearby_Schools", default)]
    pub nearby_schools: Option<f64>,
    #[serde(rename = "Nearby_Hospitals", default)]
    pub nearby_hospitals: Option<f64>,
}

impl ReferenceRow {
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
