//! Card entities.

use serde::{Deserialize, Serialize};

/// A create-card payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// The customer the card is issued for.
    pub customer_id: String,
    /// The card tier, e.g. `SILVER`.
    #[serde(rename = "type")]
    pub card_type: String,
}

impl CardRequest {
    /// Creates a card request.
    pub fn new(customer_id: impl Into<String>, card_type: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            card_type: card_type.into(),
        }
    }
}

/// An issued card as the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The holder's name, `"{lastName} {firstName}"`.
    pub card_holder: String,
    /// The card number.
    pub card_number: String,
    /// Expiry in `MM-DD-YYYY` form.
    pub expired_date: String,
}
