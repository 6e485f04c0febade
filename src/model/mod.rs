pub mod movie;
pub mod rating;

pub use movie::MovieRecord;
pub use rating::{Person, Rating, RatingField};
