//! Strongly-typed identifiers and the per-store id sequence.

use core::marker::PhantomData;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(u64);

macro_rules! impl_int_newtype {
    ($t:ty) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self)
            }
        }
    };
}

impl_int_newtype!(ItemId);
impl_int_newtype!(CartId);

/// Unbounded, strictly increasing id sequence starting at 0.
///
/// Each store owns exactly one generator; ids are never handed out twice, even
/// when the record they were issued for is later deleted.
#[derive(Debug)]
pub struct IdGenerator<T> {
    next: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> IdGenerator<T> {
    pub fn new() -> Self {
        Self {
            next: 0,
            _marker: PhantomData,
        }
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl<T: From<u64>> IdGenerator<T> {
    pub fn next_id(&mut self) -> T {
        let id = self.next;
        self.next += 1;
        T::from(id)
    }
}

impl<T> Default for IdGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: From<u64>> Iterator for IdGenerator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_id())
    }
}
