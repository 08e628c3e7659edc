use std::cmp::{max, min};

use crate::addr::Ipv4Address;
use crate::mask::SubnetMask;
use crate::net::Ipv4Network;


/// Converts a range of IP addresses (whose inclusive ends are passed as `end_one` and `end_two`)
/// into the equivalent set of IP networks, in ascending order.
pub fn range_to_subnets(
    end_one: Ipv4Address,
    end_two: Ipv4Address,
) -> Vec<Ipv4Network> {
    let mut ret = Vec::new();

    let mut first_addr = min(end_one, end_two);
    let last_addr = max(end_one, end_two);

    loop {
        // start with the full mask and enlarge while the base address stays put and the network
        // does not overshoot the end of the range
        let mut current_subnet = Ipv4Network::new(first_addr, SubnetMask::HOST);
        while let Some(shorter_mask) = current_subnet.subnet_mask().shorter() {
            let larger_subnet = Ipv4Network::new(first_addr, shorter_mask);
            if larger_subnet.base_addr() != first_addr || larger_subnet.broadcast_addr() > last_addr {
                break;
            }
            current_subnet = larger_subnet;
        }

        ret.push(current_subnet);
        if current_subnet.broadcast_addr() >= last_addr {
            // also stops us from wrapping around past 255.255.255.255
            break;
        }
        first_addr = current_subnet.next_subnet_base_addr();
    }

    ret
}
