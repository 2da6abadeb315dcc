use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Finalized outcome of a successful checkout. Written once; this engine
/// never mutates a persisted record afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub hotel_id: String,
    pub hotel_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: u8,
    pub room_type: RoomType,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub guest_info: GuestInfo,
    pub payment_info: RedactedPayment,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Presidential,
}

impl RoomType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(RoomType::Standard),
            "deluxe" => Some(RoomType::Deluxe),
            "suite" => Some(RoomType::Suite),
            "presidential" => Some(RoomType::Presidential),
            _ => None,
        }
    }
}

/// Contact details captured with the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardScheme {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl CardScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "visa" => Some(CardScheme::Visa),
            "mastercard" => Some(CardScheme::Mastercard),
            "amex" => Some(CardScheme::Amex),
            "discover" => Some(CardScheme::Discover),
            _ => None,
        }
    }
}

/// The only payment detail that may ever reach the store: the trailing
/// four digits and the declared scheme. Full card data stays ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedPayment {
    pub last4: String,
    pub scheme: CardScheme,
}

impl RedactedPayment {
    pub fn from_card(card_number: &str, scheme: CardScheme) -> Self {
        let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        let last4 = digits[digits.len().saturating_sub(4)..].to_string();
        Self { last4, scheme }
    }
}
