//! Core rate handling, independent of how rates are fetched or shown

pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod number;
pub mod parser;
pub mod rates;
pub mod session;
pub mod source;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConversionRequest};
pub use error::ConversionError;
pub use parser::{ParseReport, ParsedTable};
pub use rates::{Inversion, RateMatrix};
pub use session::{Session, SessionState};
pub use source::RateSheetProvider;
