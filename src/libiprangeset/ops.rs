// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Address-width specific operations.

use num_traits::{PrimInt, Unsigned, Saturating};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Unsigned integer holding every address of one family.
///
/// The adjacency test `end + 1 >= start` is defined here once for every width, saturating at the largest address so that a range ending at `255.255.255.255` (or `ffff:...:ffff`) touches everything after it.
pub trait Width : PrimInt + Unsigned + Hash + Debug + Display
{
  /// Number of addresses covered by a range, wide enough for every range but the whole IPv6 space.
  type Size: PrimInt + Unsigned + Saturating + Debug + Display;

  fn width(lower: &Self, upper: &Self) -> Self::Size;
  fn to_ip(self) -> IpAddr;

  /// `true` if `upper + 1 >= next`.
  fn touches(upper: &Self, next: &Self) -> bool {
    match upper.checked_add(&Self::one()) {
      Some(succ) => succ >= *next,
      None => true
    }
  }
}

impl Width for u32
{
  type Size = u64;

  fn width(lower: &u32, upper: &u32) -> u64 {
    debug_assert!(lower <= upper);
    u64::from(*upper) - u64::from(*lower) + 1
  }

  fn to_ip(self) -> IpAddr {
    IpAddr::V4(Ipv4Addr::from(self))
  }
}

impl Width for u128
{
  type Size = u128;

  /// Saturates at `u128::MAX` for the whole address space.
  fn width(lower: &u128, upper: &u128) -> u128 {
    debug_assert!(lower <= upper);
    (upper - lower).saturating_add(1)
  }

  fn to_ip(self) -> IpAddr {
    IpAddr::V6(Ipv6Addr::from(self))
  }
}
