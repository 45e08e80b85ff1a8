use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConflictError {
    #[error("Subnet {network}/{mask} already exists")]
    DuplicateSubnet { network: String, mask: i32 },

    #[error("Address {0} already exists")]
    DuplicateAddress(String),
}
