pub mod experiences;
pub mod hotels;
pub mod listing;
pub mod search;
pub mod services;

mod router;
pub use router::get_router;
