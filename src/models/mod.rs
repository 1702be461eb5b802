mod shop;
mod review;
mod response;

pub use shop::ShopProfile;
pub use review::Review;
pub use response::{Page, PageRequest, ReviewPage};
