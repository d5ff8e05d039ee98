//! Japanese text normalization: era dates, kanji numerals, text cleanup.
//!
//! The core is two pure functions over static tables — era-date resolution
//! ([`date::resolve`]) and kanji-numeral parsing ([`numeral::parse`]) —
//! wrapped by a regex pipeline ([`scanner::DateScanner`],
//! [`cleaner::TextCleaner`]) that rewrites running text.

pub mod cleaner;
pub mod date;
pub mod era;
pub mod numeral;
pub mod scanner;

pub use cleaner::TextCleaner;
pub use date::{CalendarDate, DateError, DayOfMonth, EraDate, EraYear};
pub use era::Era;
pub use numeral::NumeralError;
pub use scanner::DateScanner;
