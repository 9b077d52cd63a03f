//! Program interpretation engine
//!
//! Turns OCR page text into screening events in one ordered pass:
//!
//! ```text
//! page lines
//!     ↓
//! [tables]      line -> Row | none
//!     ↓
//! [cinema]      cinema-name lines update the context
//! [context]     "du N au M MOIS" lines update the month
//!     ↓
//! [dates]       header rows -> column -> date mapping
//!     ↓
//! [screenings]  title rows + context -> Screening (times via [times])
//! ```
//!
//! Every step is lenient: lines that cannot be placed are dropped, never
//! reported as errors.

pub mod cinema;
pub mod context;
pub mod dates;
pub mod screenings;
pub mod tables;
pub mod times;

pub use cinema::CinemaDetector;
pub use context::ParseContext;
pub use screenings::{assemble_screenings, normalize_title, ProgramScanner};
pub use tables::parse_table_line;
pub use times::parse_time_cell;
