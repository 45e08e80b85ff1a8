use thiserror::Error;

use super::AddressFormatError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressFormatError),

    #[error("Invalid mask {0}: must be between 0 and 32")]
    InvalidMask(i32),

    #[error("Invalid range: start {start} is greater than end {end}")]
    InvertedRange { start: String, end: String },

    #[error("Range too large: {count} addresses requested, at most {limit} allowed")]
    RangeTooLarge { count: u64, limit: u64 },

    #[error("Subnet {0} does not exist")]
    UnknownSubnet(i64),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Import contains no rows")]
    EmptyImport,
}
