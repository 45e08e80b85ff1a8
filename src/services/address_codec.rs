use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

use crate::errors::internal::{AddressFormatError, ValidationError};

/// Encode dotted-decimal IPv4 text as its unsigned 32-bit value
///
/// Accepts exactly four octets in 0..=255 without leading zeros, so that
/// `decode(encode(x)) == x` holds for every accepted input.
pub fn encode(text: &str) -> Result<u32, AddressFormatError> {
    text.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| AddressFormatError::new(text))
}

/// Decode an unsigned 32-bit value into dotted-decimal text
pub fn decode(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Closed interval of addresses, validated against a size limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: u32,
    pub end: u32,
}

impl AddressRange {
    /// Parse and validate a range given as two dotted-decimal endpoints
    ///
    /// # Errors
    /// * `InvalidAddress` - either endpoint fails to encode
    /// * `InvertedRange` - start is greater than end
    /// * `RangeTooLarge` - more than `limit` addresses
    pub fn parse(start_ip: &str, end_ip: &str, limit: u64) -> Result<Self, ValidationError> {
        let start = encode(start_ip)?;
        let end = encode(end_ip)?;

        if start > end {
            return Err(ValidationError::InvertedRange {
                start: start_ip.to_string(),
                end: end_ip.to_string(),
            });
        }

        let range = Self { start, end };
        let count = range.len();
        if count > limit {
            return Err(ValidationError::RangeTooLarge { count, limit });
        }

        Ok(range)
    }

    /// Number of addresses in the range, both endpoints included
    pub fn len(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn values(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Human readable form used in audit descriptors
    pub fn describe(&self) -> String {
        format!("{}-{}", decode(self.start), decode(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_uses_unsigned_arithmetic() {
        assert_eq!(encode("0.0.0.0").unwrap(), 0);
        assert_eq!(encode("10.0.0.1").unwrap(), 0x0A00_0001);
        assert_eq!(encode("255.255.255.255").unwrap(), u32::MAX);
        // High bit set must not sign-extend
        assert_eq!(encode("192.168.1.1").unwrap(), 3_232_235_777);
    }

    #[test]
    fn encode_rejects_malformed_text() {
        for bad in ["", "10.0.0", "10.0.0.0.1", "10.0.0.256", "10.0.0.-1", "a.b.c.d", "10.0.0.01", " 10.0.0.1"] {
            let err = encode(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn decode_covers_edges() {
        assert_eq!(decode(0), "0.0.0.0");
        assert_eq!(decode(u32::MAX), "255.255.255.255");
        assert_eq!(decode(0x0A00_000A), "10.0.0.10");
    }

    #[test]
    fn range_counts_both_endpoints() {
        let range = AddressRange::parse("10.0.0.1", "10.0.0.5", 1000).unwrap();
        assert_eq!(range.len(), 5);
        assert_eq!(range.values().count(), 5);
        assert_eq!(range.describe(), "10.0.0.1-10.0.0.5");
    }

    #[test]
    fn range_crosses_octet_boundary() {
        let range = AddressRange::parse("10.0.0.250", "10.0.1.4", 1000).unwrap();
        assert_eq!(range.len(), 11);
        let last: Vec<String> = range.values().skip(5).take(2).map(decode).collect();
        assert_eq!(last, vec!["10.0.0.255", "10.0.1.0"]);
    }

    #[test]
    fn range_rejects_inverted_endpoints() {
        let err = AddressRange::parse("10.0.0.5", "10.0.0.1", 1000).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn range_enforces_limit() {
        assert!(AddressRange::parse("10.0.0.0", "10.0.3.231", 1000).is_ok());
        let err = AddressRange::parse("10.0.0.0", "10.0.3.232", 1000).unwrap_err();
        assert!(matches!(err, ValidationError::RangeTooLarge { count: 1001, limit: 1000 }));
    }

    #[test]
    fn full_address_space_length_does_not_overflow() {
        let err = AddressRange::parse("0.0.0.0", "255.255.255.255", 1000).unwrap_err();
        assert!(matches!(err, ValidationError::RangeTooLarge { count: 4_294_967_296, .. }));
    }

    proptest! {
        #[test]
        fn decode_then_encode_is_identity(n in any::<u32>()) {
            prop_assert_eq!(encode(&decode(n)).unwrap(), n);
        }

        #[test]
        fn encode_then_decode_is_identity(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let text = format!("{}.{}.{}.{}", a, b, c, d);
            prop_assert_eq!(decode(encode(&text).unwrap()), text);
        }
    }
}
