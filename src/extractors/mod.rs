pub mod review_source;

pub use review_source::ReviewSource;
