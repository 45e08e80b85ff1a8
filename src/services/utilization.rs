/// Usable host count for a prefix length
///
/// Network and broadcast addresses are excluded for /0 through /30.
/// A /31 is a point-to-point link with two usable hosts and a /32 is a
/// single host, so the count is never zero.
pub fn usable_hosts(mask: u8) -> u64 {
    match mask {
        m if m >= 32 => 1,
        31 => 2,
        m => (1u64 << (32 - u32::from(m))) - 2,
    }
}

/// Share of usable hosts in use, as a percentage rounded to two decimals
pub fn utilization_percent(used: u64, usable: u64) -> f64 {
    if usable == 0 {
        return 0.0;
    }
    let percent = used as f64 / usable as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_hosts_excludes_network_and_broadcast() {
        assert_eq!(usable_hosts(24), 254);
        assert_eq!(usable_hosts(30), 2);
        assert_eq!(usable_hosts(16), 65_534);
        assert_eq!(usable_hosts(0), 4_294_967_294);
    }

    #[test]
    fn point_to_point_and_host_masks_are_never_zero() {
        assert_eq!(usable_hosts(31), 2);
        assert_eq!(usable_hosts(32), 1);
    }

    #[test]
    fn slash_30_with_one_used_is_fifty_percent() {
        assert_eq!(utilization_percent(1, usable_hosts(30)), 50.0);
    }

    #[test]
    fn utilization_rounds_to_two_decimals() {
        assert_eq!(utilization_percent(1, 254), 0.39);
        assert_eq!(utilization_percent(2, 3), 66.67);
        assert_eq!(utilization_percent(0, 254), 0.0);
    }
}
