//! Checkout form: raw field capture, whole-form validation, and the
//! submission state machine that turns an accepted form into a persisted
//! booking record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::{
    Booking, BookingStatus, CardScheme, GuestInfo, Hotel, RedactedPayment, RoomType, User,
};
use crate::pricing::quote_stay;
use crate::store::BookingStore;
use crate::utils::clock::Clock;
use crate::validate::{
    validate_card_number, validate_cvv, validate_email, validate_expiry_date,
    validate_guest_count, validate_phone, validate_required, FieldError, FieldResult,
};

/// Message shown for any submission that fails after validation.
const SUBMISSION_FAILED: &str = "Booking failed";

/// Form fields that can carry an inline rejection message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Country,
    CheckIn,
    CheckOut,
    Guests,
    RoomType,
    CardNumber,
    ExpiryDate,
    Cvv,
    CardType,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Country => "country",
            Field::CheckIn => "checkIn",
            Field::CheckOut => "checkOut",
            Field::Guests => "guests",
            Field::RoomType => "roomType",
            Field::CardNumber => "cardNumber",
            Field::ExpiryDate => "expiryDate",
            Field::Cvv => "cvv",
            Field::CardType => "cardType",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Raw checkout input exactly as the user typed it. Validation turns
/// this into a [`ValidCheckout`]; nothing here is trusted before that.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub special_requests: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_type: String,
}

/// Typed, validated checkout data. Only constructible through
/// [`CheckoutForm::validate`].
#[derive(Debug, Clone)]
pub struct ValidCheckout {
    pub guest: GuestInfo,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub room_type: RoomType,
    pub special_requests: Option<String>,
    card_number: String,
    pub card_scheme: CardScheme,
}

impl CheckoutForm {
    /// Runs every field check and the cross-field date rules, collecting
    /// all rejections so the host can render them in one pass. The form
    /// is accepted only when every required field validates.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidCheckout, FieldErrors> {
        let mut errors = FieldErrors::new();

        check(
            &mut errors,
            Field::FirstName,
            validate_required("First name", &self.first_name),
        );
        check(
            &mut errors,
            Field::LastName,
            validate_required("Last name", &self.last_name),
        );
        check(
            &mut errors,
            Field::Email,
            required_then("Email", &self.email, validate_email),
        );
        check(
            &mut errors,
            Field::Phone,
            required_then("Phone", &self.phone, validate_phone),
        );
        check(
            &mut errors,
            Field::Country,
            validate_required("Country", &self.country),
        );

        let check_in = self.date_field(&mut errors, Field::CheckIn, "Check-in date", &self.check_in);
        let check_out =
            self.date_field(&mut errors, Field::CheckOut, "Check-out date", &self.check_out);
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_in < today {
                errors.insert(
                    Field::CheckIn,
                    FieldError::new("Check-in date must be today or later"),
                );
            }
            if check_out <= check_in {
                errors.insert(
                    Field::CheckOut,
                    FieldError::new("Check-out date must be after check-in date"),
                );
            }
        }

        check(
            &mut errors,
            Field::Guests,
            validate_guest_count(&self.guests),
        );
        let guests = self.guests.trim().parse::<u8>().ok();

        let room_type = match validate_required("Room type", &self.room_type) {
            Err(err) => {
                errors.insert(Field::RoomType, err);
                None
            }
            Ok(()) => match RoomType::parse(self.room_type.trim()) {
                Some(room_type) => Some(room_type),
                None => {
                    errors.insert(
                        Field::RoomType,
                        FieldError::new("Please select a valid room type"),
                    );
                    None
                }
            },
        };

        check(
            &mut errors,
            Field::CardNumber,
            required_then("Card number", &self.card_number, validate_card_number),
        );
        check(
            &mut errors,
            Field::ExpiryDate,
            required_then("Expiry date", &self.expiry_date, |raw| {
                validate_expiry_date(raw, today)
            }),
        );
        check(&mut errors, Field::Cvv, required_then("CVV", &self.cvv, validate_cvv));
        let card_scheme = match validate_required("Card type", &self.card_type) {
            Err(err) => {
                errors.insert(Field::CardType, err);
                None
            }
            Ok(()) => match CardScheme::parse(self.card_type.trim()) {
                Some(scheme) => Some(scheme),
                None => {
                    errors.insert(
                        Field::CardType,
                        FieldError::new("Please select a valid card type"),
                    );
                    None
                }
            },
        };

        if errors.is_empty() {
            if let (Some(check_in), Some(check_out), Some(guests), Some(room_type), Some(card_scheme)) =
                (check_in, check_out, guests, room_type, card_scheme)
            {
                let special_requests = match self.special_requests.trim() {
                    "" => None,
                    text => Some(text.to_string()),
                };

                return Ok(ValidCheckout {
                    guest: GuestInfo {
                        first_name: self.first_name.trim().to_string(),
                        last_name: self.last_name.trim().to_string(),
                        email: self.email.trim().to_string(),
                        phone: self.phone.trim().to_string(),
                        country: self.country.trim().to_string(),
                    },
                    check_in,
                    check_out,
                    guests,
                    room_type,
                    special_requests,
                    card_number: self.card_number.split_whitespace().collect(),
                    card_scheme,
                });
            }
        }

        Err(errors)
    }

    fn date_field(
        &self,
        errors: &mut FieldErrors,
        field: Field,
        label: &str,
        raw: &str,
    ) -> Option<NaiveDate> {
        if let Err(err) = validate_required(label, raw) {
            errors.insert(field, err);
            return None;
        }

        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert(field, FieldError::new("Please enter a valid date (YYYY-MM-DD)"));
                None
            }
        }
    }
}

fn check(errors: &mut FieldErrors, field: Field, result: FieldResult) {
    if let Err(err) = result {
        errors.insert(field, err);
    }
}

fn required_then(
    label: &str,
    raw: &str,
    validator: impl Fn(&str) -> FieldResult,
) -> FieldResult {
    validate_required(label, raw)?;
    validator(raw.trim())
}

/// Observable states of the checkout flow. `Validating`, `Accepted` and
/// `Submitting` are passed through synchronously during `submit`; the
/// flow comes to rest in `Rejected`, `Failed` or `Persisted`.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Editing,
    Validating,
    Rejected(FieldErrors),
    Accepted,
    Submitting,
    Persisted(Booking),
    Failed(String),
}

/// Drives one checkout from editing to a persisted booking. `Rejected`
/// and `Failed` re-arm automatically on the next `submit`; there is no
/// automatic retry.
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Editing,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Returns to `Editing`. A persisted flow is finished and stays put.
    pub fn edit(&mut self) {
        if !matches!(self.state, CheckoutState::Persisted(_)) {
            self.state = CheckoutState::Editing;
        }
    }

    pub fn submit(
        &mut self,
        form: &CheckoutForm,
        user: &User,
        hotel: &Hotel,
        clock: &dyn Clock,
        bookings: &BookingStore,
    ) -> &CheckoutState {
        if matches!(self.state, CheckoutState::Persisted(_)) {
            return &self.state;
        }

        self.state = CheckoutState::Validating;
        let valid = match form.validate(clock.today()) {
            Ok(valid) => valid,
            Err(errors) => {
                warn!(fields = errors.len(), "checkout rejected by validation");
                self.state = CheckoutState::Rejected(errors);
                return &self.state;
            }
        };
        self.state = CheckoutState::Accepted;

        let Some(rate) = hotel.nightly_rate() else {
            error!(hotel_id = %hotel.id, "hotel record carries no usable nightly rate");
            self.state = CheckoutState::Failed(SUBMISSION_FAILED.to_string());
            return &self.state;
        };

        let quote = quote_stay(rate.amount, valid.check_in, valid.check_out);
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            hotel_id: hotel.id.clone(),
            hotel_name: hotel.name.clone(),
            check_in: valid.check_in,
            check_out: valid.check_out,
            nights: quote.nights,
            guests: valid.guests,
            room_type: valid.room_type,
            special_requests: valid.special_requests.clone(),
            guest_info: valid.guest.clone(),
            payment_info: RedactedPayment::from_card(&valid.card_number, valid.card_scheme),
            total_price: quote.total,
            status: BookingStatus::Confirmed,
            created_at: clock.now(),
        };

        self.state = CheckoutState::Submitting;
        match bookings.append(&booking) {
            Ok(()) => {
                info!(booking_id = %booking.id, total = %booking.total_price, "checkout persisted");
                self.state = CheckoutState::Persisted(booking);
            }
            Err(err) => {
                error!(error = %err, "failed to persist booking");
                self.state = CheckoutState::Failed(SUBMISSION_FAILED.to_string());
            }
        }
        &self.state
    }
}
