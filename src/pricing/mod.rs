use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Derived nights-and-total pair for a stay interval at a given rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayQuote {
    pub nights: i64,
    pub total: Decimal,
}

/// Prices a stay at `rate` per night. `rate` must be non-negative.
///
/// Nights are the absolute whole-day span between the dates, clamped to a
/// minimum of one: a same-day or inverted pair prices as a single night
/// instead of producing a zero or negative charge. Inverted pairs are a
/// data-entry error and are rejected separately at the form layer.
pub fn quote_stay(rate: Decimal, check_in: NaiveDate, check_out: NaiveDate) -> StayQuote {
    let nights = (check_out - check_in).num_days().abs().max(1);

    StayQuote {
        nights,
        total: rate * Decimal::from(nights),
    }
}
