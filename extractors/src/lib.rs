//! Extractors Crate
//!
//! Turns loosely structured contact data into records the API can store.
//! Everything here is pure: no database, no network, no clock.
//!
//! # Available Extractors
//!
//! - [`phone`]: canonicalizes phone numbers into `+digits` form
//! - [`contact_csv`]: parses an uploaded CSV and maps each row to a candidate contact
//!
//! # Example
//!
//! ```rust
//! use extractors::{ContactCsvParser, ParsedRow};
//!
//! let csv = "Name,Phone\nSam,555 123 4567\n";
//! let rows = ContactCsvParser::new().parse(csv.as_bytes(), None).unwrap();
//! match &rows[0] {
//!     ParsedRow::Contact { candidate, .. } => assert_eq!(candidate.phone_number, "+5551234567"),
//!     ParsedRow::Skipped { .. } => unreachable!(),
//! }
//! ```

pub mod contact_csv;
pub mod phone;

pub use contact_csv::{ContactCandidate, ContactCsvParser, ImportError, ParsedRow};
pub use phone::{normalize_phone, PhoneNormalization};
