use thiserror::Error;

/// Text that is not a dotted-decimal IPv4 address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid IPv4 address: '{input}'")]
pub struct AddressFormatError {
    pub input: String,
}

impl AddressFormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}
