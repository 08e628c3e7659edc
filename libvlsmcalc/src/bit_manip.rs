use crate::addr::Ipv4Address;


/// Returns the number of leading bits (most significant first) in which both addresses agree.
pub fn common_prefix_length(one: Ipv4Address, other: Ipv4Address) -> u8 {
    // at most 32, which always fits
    (one ^ other).value().leading_zeros() as u8
}

/// Converts an address into its constituent bits (most significant bit first).
pub fn address_to_bits(addr: Ipv4Address) -> [bool; 32] {
    let value = addr.value();
    let mut ret = [false; 32];
    for (bit_idx, bit) in ret.iter_mut().enumerate() {
        *bit = value & (1 << (31 - bit_idx)) != 0;
    }
    ret
}

/// Converts an address into a string of '1' and '0' characters, one group of eight bits per octet,
/// separated by dots.
pub fn to_binary_string(addr: Ipv4Address) -> String {
    let mut ret = String::with_capacity(32 + 3);
    for (i, bit) in address_to_bits(addr).iter().enumerate() {
        if i > 0 && i % 8 == 0 {
            ret.push('.');
        }
        ret.push(if *bit { '1' } else { '0' });
    }
    ret
}
