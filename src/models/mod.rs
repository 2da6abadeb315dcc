pub mod booking;
pub mod hotel;
pub mod user;

pub use booking::{Booking, BookingStatus, CardScheme, GuestInfo, RedactedPayment, RoomType};
pub use hotel::{Address, BestOffer, Hotel, NightlyRate, PriceTier, Rating, RatingView};
pub use user::User;
