pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{is_truncated, normalize_place_text, safe_truncate_chars, strip_invisible};
pub use url_utils::{is_maps_url, is_short_link, is_valid_url, place_link};
