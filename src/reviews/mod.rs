//! Review extraction: tab activation, scrolling, per-card fields and the
//! combined JSON store.

pub mod collector;
pub mod dates;
pub mod rating;
pub mod store;
pub mod tab;
pub mod types;

pub use collector::{ReviewCollector, ScrollProgress, ScrollStop, is_meaningful_content};
pub use dates::{DateUnit, normalize_review_date};
pub use rating::{extract_rating_number, resolve_rating};
pub use store::{ReviewStore, StoreError, StoreResult};
pub use tab::{activate_reviews_tab, review_tab_locators};
pub use types::{Review, ReviewCard, ReviewContext};
