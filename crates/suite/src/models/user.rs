//! Customer entities: create-user request, addresses, create response.

use serde::{Deserialize, Serialize};

/// One address in a create-user payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// House or building number.
    pub street_number: String,
    /// Street name.
    pub street: String,
    /// Ward within the district.
    pub ward: String,
    /// District within the city.
    pub district: String,
    /// City name.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// ISO country code.
    pub country: String,
}

impl Address {
    /// The suite's default address fixture.
    pub fn default_fixture() -> Self {
        Self {
            street_number: "123".to_string(),
            street: "Main St".to_string(),
            ward: "Ward 1".to_string(),
            district: "District 1".to_string(),
            city: "Thu Duc".to_string(),
            state: "Ho Chi Minh".to_string(),
            zip: "70000".to_string(),
            country: "VN".to_string(),
        }
    }
}

/// A create-user payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Birthday in `MM-DD-YYYY` form.
    pub birthday: String,
    /// Email address, unique per scenario.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Addresses to create alongside the customer.
    pub addresses: Vec<Address>,
}

impl UserRequest {
    /// The suite's default user fixture with the given email and addresses.
    pub fn fixture(email: String, addresses: Vec<Address>) -> Self {
        Self {
            first_name: "Jos".to_string(),
            last_name: "Doe".to_string(),
            middle_name: "Smith".to_string(),
            birthday: "01-23-2000".to_string(),
            email,
            phone: "01234567890".to_string(),
            addresses,
        }
    }
}

/// The create-user response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    /// The server-assigned customer id.
    pub id: String,
    /// The confirmation message.
    pub message: String,
}
