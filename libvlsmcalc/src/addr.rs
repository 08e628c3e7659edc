use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;


/// An IPv4 address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Address {
    addr_value: u32,
}

pub const IPV4_ZERO: Ipv4Address = Ipv4Address { addr_value: 0 };
pub const IPV4_MAX: Ipv4Address = Ipv4Address { addr_value: 0xFFFF_FFFF };

impl Ipv4Address {
    /// Constructs a new IPv4 address from its 32-bit representation, where the leftmost byte in the
    /// canonical string representation is the most significant byte (i.e. `"1.2.3.4"` ->
    /// `0x01020304`).
    pub const fn new(
        addr_value: u32,
    ) -> Ipv4Address {
        Ipv4Address {
            addr_value,
        }
    }

    /// Returns the 32-bit representation of this address.
    pub const fn value(&self) -> u32 { self.addr_value }

    pub fn to_bytes(&self) -> [u8; 4] {
        self.addr_value.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Ipv4Address {
        Ipv4Address::new(u32::from_be_bytes(bytes))
    }

    /// Returns the address following this one. `255.255.255.255` is followed by `0.0.0.0`.
    pub fn increment(&self) -> Ipv4Address {
        Ipv4Address::new(self.addr_value.wrapping_add(1))
    }

    /// Returns the address preceding this one. `0.0.0.0` is preceded by `255.255.255.255`.
    pub fn decrement(&self) -> Ipv4Address {
        Ipv4Address::new(self.addr_value.wrapping_sub(1))
    }

    /// Returns this IP address with each bit negated.
    pub fn bitwise_negate(&self) -> Ipv4Address {
        Ipv4Address::new(!self.addr_value)
    }

    /// Returns the classful network class of this address, derived from the first octet.
    pub fn class(&self) -> AddressClass {
        match self.to_bytes()[0] {
            0..=127 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// Returns whether this address lies in a private (RFC 1918), loopback or link-local range.
    pub fn is_private(&self) -> bool {
        let [first, second, _, _] = self.to_bytes();
        match (first, second) {
            (10, _) => true,
            (172, 16..=31) => true,
            (192, 168) => true,
            (127, _) => true,
            (169, 254) => true,
            _ => false,
        }
    }
}

impl FromStr for Ipv4Address {
    type Err = IpAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IpAddressParseError::Empty);
        }

        let chunks: Vec<&str> = s.split('.').collect();
        if chunks.len() != 4 {
            return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 4));
        }

        let mut addr_val: u32 = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.is_empty() {
                return Err(IpAddressParseError::EmptyChunk(i));
            }
            // str::parse would let "+1" through
            if !chunk.bytes().all(|b| b.is_ascii_digit()) {
                return Err(IpAddressParseError::NonNumericChunk(i, String::from(*chunk)));
            }

            let chunk_val: u32 = chunk.parse()
                .map_err(|e| IpAddressParseError::ChunkParseError(i, String::from(*chunk), e))?;
            if chunk_val > 255 {
                return Err(IpAddressParseError::ChunkOutOfRange(i, chunk_val, 0, 255));
            }

            addr_val = (addr_val << 8) | chunk_val;
        }

        Ok(Ipv4Address::new(addr_val))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ipv4Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self { Ipv4Address::new(value) }
}
impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self { addr.addr_value }
}

impl BitAnd for Ipv4Address {
    type Output = Ipv4Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value & rhs.addr_value)
    }
}

impl BitOr for Ipv4Address {
    type Output = Ipv4Address;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value | rhs.addr_value)
    }
}

impl BitXor for Ipv4Address {
    type Output = Ipv4Address;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value ^ rhs.addr_value)
    }
}

impl Not for Ipv4Address {
    type Output = Ipv4Address;

    fn not(self) -> Self::Output {
        self.bitwise_negate()
    }
}


/// The historical (classful) class of an IPv4 address.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AddressClass {
    A,
    B,
    C,
    /// Multicast.
    D,
    /// Reserved.
    E,
}
impl AddressClass {
    pub fn letter(&self) -> char {
        match self {
            AddressClass::A => 'A',
            AddressClass::B => 'B',
            AddressClass::C => 'C',
            AddressClass::D => 'D',
            AddressClass::E => 'E',
        }
    }
}
impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::D => write!(f, "D (Multicast)"),
            AddressClass::E => write!(f, "E (Reserved)"),
            other => write!(f, "{}", other.letter()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AddressClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


/// An error that occurs when attempting to parse a dotted-decimal IPv4 address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IpAddressParseError {
    Empty,
    IncorrectChunkCount(usize, usize),
    EmptyChunk(usize),
    NonNumericChunk(usize, String),
    ChunkParseError(usize, String, ParseIntError),
    ChunkOutOfRange(usize, u32, u32, u32),
}
impl fmt::Display for IpAddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddressParseError::Empty
                => write!(f, "IP address is empty"),
            IpAddressParseError::IncorrectChunkCount(got, expected)
                => write!(f, "IP address has {} chunk(s); expected {}", got, expected),
            IpAddressParseError::EmptyChunk(chunk_idx)
                => write!(f, "IP address chunk with index {} is empty", chunk_idx),
            IpAddressParseError::NonNumericChunk(chunk_idx, chunk)
                => write!(f, "IP address chunk with index {} ({:?}) is not a decimal number", chunk_idx, chunk),
            IpAddressParseError::ChunkParseError(chunk_idx, chunk, error)
                => write!(f, "failed to parse IP address chunk with index {} ({:?}): {}", chunk_idx, chunk, error),
            IpAddressParseError::ChunkOutOfRange(chunk_idx, got, min, max)
                => write!(f, "IP address chunk with index {} ({}) is out of range {} <= n <= {}", chunk_idx, got, min, max),
        }
    }
}
impl Error for IpAddressParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IpAddressParseError::ChunkParseError(_, _, e) => Some(e),
            _ => None,
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn parse_ipv4(s: &str) -> Result<Ipv4Address, IpAddressParseError> {
        s.parse()
    }

    #[test]
    fn test_ipv4_format() {
        assert_eq!("0.0.0.0", Ipv4Address::new(0x00000000).to_string());
        assert_eq!("255.255.255.255", Ipv4Address::new(0xFFFFFFFF).to_string());
        assert_eq!("127.0.0.1", Ipv4Address::new(0x7F000001).to_string());
        assert_eq!("192.168.1.10", Ipv4Address::new(0xC0A8010A).to_string());
    }

    #[test]
    fn test_ipv4_parse() {
        assert_eq!(Ok(Ipv4Address::new(0x00000000)), parse_ipv4("0.0.0.0"));
        assert_eq!(Ok(Ipv4Address::new(0xFFFFFFFF)), parse_ipv4("255.255.255.255"));
        assert_eq!(Ok(Ipv4Address::new(0x7F000001)), parse_ipv4("127.0.0.1"));
        assert_eq!(Ok(Ipv4Address::new(0x0A000001)), parse_ipv4("010.000.000.001"));

        assert_eq!(Err(IpAddressParseError::Empty), parse_ipv4(""));
        assert_eq!(Err(IpAddressParseError::IncorrectChunkCount(3, 4)), parse_ipv4("1.2.3"));
        assert_eq!(Err(IpAddressParseError::IncorrectChunkCount(5, 4)), parse_ipv4("1.2.3.4.5"));
        assert_eq!(Err(IpAddressParseError::EmptyChunk(2)), parse_ipv4("1.2..4"));
        assert_eq!(Err(IpAddressParseError::ChunkOutOfRange(1, 256, 0, 255)), parse_ipv4("1.256.3.4"));
        assert_eq!(Err(IpAddressParseError::NonNumericChunk(2, String::from("-3"))), parse_ipv4("1.2.-3.4"));
        assert_eq!(Err(IpAddressParseError::NonNumericChunk(0, String::from("+1"))), parse_ipv4("+1.2.3.4"));
        assert_eq!(Err(IpAddressParseError::NonNumericChunk(0, String::from("abc"))), parse_ipv4("abc.2.3.4"));
        if let Err(IpAddressParseError::ChunkParseError(idx, s, _)) = parse_ipv4("1.2.3.99999999999") {
            assert_eq!(3, idx);
            assert_eq!("99999999999", s);
        } else {
            panic!();
        }
    }

    #[test]
    fn test_ipv4_increment_decrement() {
        let inc = |s: &str| parse_ipv4(s).unwrap().increment().to_string();
        let dec = |s: &str| parse_ipv4(s).unwrap().decrement().to_string();

        assert_eq!("192.168.1.1", inc("192.168.1.0"));
        assert_eq!("192.168.1.255", inc("192.168.1.254"));
        assert_eq!("192.168.2.0", inc("192.168.1.255"));
        assert_eq!("192.169.0.0", inc("192.168.255.255"));
        assert_eq!("0.0.0.0", inc("255.255.255.255"));

        assert_eq!("192.168.1.9", dec("192.168.1.10"));
        assert_eq!("192.168.0.255", dec("192.168.1.0"));
        assert_eq!("192.167.255.255", dec("192.168.0.0"));
        assert_eq!("255.255.255.255", dec("0.0.0.0"));
    }

    #[test]
    fn test_ipv4_class() {
        let class = |s: &str| parse_ipv4(s).unwrap().class();

        assert_eq!(AddressClass::A, class("10.0.0.0"));
        assert_eq!(AddressClass::A, class("126.255.255.255"));
        assert_eq!(AddressClass::A, class("127.0.0.1"));
        assert_eq!(AddressClass::B, class("128.0.0.0"));
        assert_eq!(AddressClass::B, class("191.255.255.255"));
        assert_eq!(AddressClass::C, class("192.0.0.0"));
        assert_eq!(AddressClass::C, class("223.255.255.255"));
        assert_eq!(AddressClass::D, class("224.0.0.0"));
        assert_eq!(AddressClass::D, class("239.255.255.255"));
        assert_eq!(AddressClass::E, class("240.0.0.0"));
        assert_eq!(AddressClass::E, class("255.255.255.255"));

        assert_eq!("C", AddressClass::C.to_string());
        assert_eq!("D (Multicast)", AddressClass::D.to_string());
    }

    #[test]
    fn test_ipv4_private() {
        let private = |s: &str| parse_ipv4(s).unwrap().is_private();

        assert!(private("10.0.0.0"));
        assert!(private("10.255.255.255"));
        assert!(private("172.16.0.0"));
        assert!(private("172.31.255.255"));
        assert!(private("192.168.0.0"));
        assert!(private("192.168.255.255"));
        assert!(private("127.0.0.1"));
        assert!(private("169.254.10.20"));

        assert!(!private("8.8.8.8"));
        assert!(!private("1.1.1.1"));
        assert!(!private("172.15.0.0"));
        assert!(!private("172.32.0.0"));
        assert!(!private("192.167.0.0"));
        assert!(!private("193.168.0.0"));
        assert!(!private("169.253.0.1"));
    }

    #[test]
    fn test_ipv4_bytes() {
        assert_eq!([0x7F, 0x00, 0x00, 0x01], Ipv4Address::new(0x7F000001).to_bytes());
        assert_eq!(Ipv4Address::new(0xC0A8010A), Ipv4Address::from_bytes([192, 168, 1, 10]));
    }
}
