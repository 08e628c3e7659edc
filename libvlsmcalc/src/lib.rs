//! IPv4 address arithmetic: network boundaries, supernetting, subnetting and VLSM allocation.


pub mod addr;
pub mod bit_manip;
pub mod calc;
pub mod cmds;
pub mod mask;
pub mod net;
pub mod output;
pub mod range;
pub mod subnet;
pub mod supernet;
pub mod vlsm;


pub use crate::addr::{AddressClass, Ipv4Address};
pub use crate::calc::{
    calculate_subnet_info, calculate_subnetting, calculate_supernetting, calculate_vlsm, CalcError,
    CalcOptions, SubnetEntry, SubnetInfo, SubnettingReport, SupernetReport, VlsmReport,
};
pub use crate::mask::SubnetMask;
pub use crate::net::Ipv4Network;
pub use crate::vlsm::{Allocation, HostRequirement};
