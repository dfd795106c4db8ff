//! Account, validator-operator and consensus addresses.
//!
//! All three are 20-byte identifiers rendered as a prefixed lowercase hex string
//! (`aug_…`, `augvaloper_…`, `augvalcons_…`). They order by their raw bytes, which is
//! the iteration order used by every store collection keyed on an address.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Length in bytes of every address kind.
pub const ADDRESS_LEN: usize = 20;

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; ADDRESS_LEN]);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
                &self.0
            }

            /// Build an address from an arbitrary byte slice of the right length.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
                let arr: [u8; ADDRESS_LEN] = bytes
                    .try_into()
                    .map_err(|_| TypesError::InvalidAddress(hex::encode(bytes)))?;
                Ok(Self(arr))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", Self::PREFIX, hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let body = s
                    .strip_prefix(Self::PREFIX)
                    .ok_or_else(|| TypesError::InvalidAddress(s.to_string()))?;
                let bytes =
                    hex::decode(body).map_err(|_| TypesError::InvalidAddress(s.to_string()))?;
                Self::from_slice(&bytes).map_err(|_| TypesError::InvalidAddress(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

address_type!(
    /// An ordinary account address. Feeders sign oracle messages with one of these.
    AccAddress,
    "aug_"
);

address_type!(
    /// A validator operator address.
    ValAddress,
    "augvaloper_"
);

address_type!(
    /// A validator consensus address, used for slashing and jailing.
    ConsAddress,
    "augvalcons_"
);

/// The validator's own operator account, which is always allowed to feed prices.
impl From<&ValAddress> for AccAddress {
    fn from(val: &ValAddress) -> Self {
        AccAddress(val.0)
    }
}

impl From<ValAddress> for AccAddress {
    fn from(val: ValAddress) -> Self {
        AccAddress(val.0)
    }
}
