// Services layer - Pure address arithmetic shared by stores and coordinators
pub mod address_codec;
pub mod utilization;

pub use address_codec::AddressRange;
