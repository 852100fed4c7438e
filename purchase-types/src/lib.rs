mod de;
mod filter;
mod record;

pub use filter::{FilterField, FilterState, ParseFilterFieldError, ALL};
pub use record::{Gender, Record};

pub use de::{missing_purchase, parse_purchase, purchase_text};
