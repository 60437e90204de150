pub mod google_sheets;
pub mod util;

pub use google_sheets::GoogleSheetsProvider;
