// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Set of IPv4 and IPv6 address ranges.
//!
//! Each family is stored in its own [RangeList](../range_list/struct.RangeList.html). Addresses are given as text and IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are stored and queried in the IPv4 list.
//!
//! # Examples
//!
//! ```rust
//! use iprangeset::RangeSet;
//!
//! let mut set = RangeSet::from_ranges(vec![("10.0.0.0", "10.0.0.255"), ("2001:db8::", "2001:db8::ffff")]).unwrap();
//! set.append("::ffff:192.0.2.1", None).unwrap();
//! assert_eq!(set.includes("10.0.0.7"), Ok(true));
//! assert_eq!(set.includes("192.0.2.1"), Ok(true));
//! assert_eq!(set.includes("2001:db8::1:0"), Ok(false));
//! assert!(set.includes("10.0.0").is_err());
//! ```

use crate::address::*;
use crate::error::*;
use crate::ops::*;
use crate::range::*;
use crate::range_list::*;
use gcollections::ops::*;
use log::{debug, trace};
use std::net::IpAddr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
  v4: RangeList<u32>,
  v6: RangeList<u128>
}

/// A parsed range, routed to its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyRange {
  V4(AddrRange<u32>),
  V6(AddrRange<u128>)
}

fn checked_range<A: Width>(start: A, end: A) -> Result<AddrRange<A>> {
  AddrRange::try_new(start, end).ok_or_else(|| InvariantError::Inverted {
    start: start.to_ip().to_string(),
    end: end.to_ip().to_string()
  }.into())
}

fn parse_range(start: &str, end: &str) -> Result<FamilyRange> {
  match (parse_address(start)?, parse_address(end)?) {
    (Address::V4(s), Address::V4(e)) => checked_range(s, e).map(FamilyRange::V4),
    (Address::V6(s), Address::V6(e)) => checked_range(s, e).map(FamilyRange::V6),
    (s, e) => Err(InvariantError::FamilyMismatch {
      start: s.to_string(),
      end: e.to_string()
    }.into())
  }
}

impl RangeSet
{
  pub fn new() -> RangeSet {
    RangeSet::default()
  }

  /// Bulk import of unordered `(start, end)` pairs.
  ///
  /// Each family is sorted once and merged in a single sweep. Fails on the first malformed address, on a pair whose start is greater than its end, or on a pair mixing both families.
  pub fn from_ranges<I, S>(pairs: I) -> Result<RangeSet> where
   I: IntoIterator<Item=(S, S)>,
   S: AsRef<str>
  {
    let mut v4 = vec![];
    let mut v6 = vec![];
    for (start, end) in pairs {
      match parse_range(start.as_ref(), end.as_ref())? {
        FamilyRange::V4(r) => v4.push(r),
        FamilyRange::V6(r) => v6.push(r)
      }
    }
    let set = RangeSet {
      v4: RangeList::from_unsorted(v4),
      v6: RangeList::from_unsorted(v6)
    };
    debug!("imported {} IPv4 and {} IPv6 ranges", set.v4.interval_count(), set.v6.interval_count());
    Ok(set)
  }

  /// Inserts the range `start..=end`, or the single address `start` when `end` is `None`, merging it with every stored range it overlaps or touches.
  pub fn append(&mut self, start: &str, end: Option<&str>) -> Result<()> {
    let range = parse_range(start, end.unwrap_or(start))?;
    trace!("append {:?}", range);
    match range {
      FamilyRange::V4(r) => self.v4.insert(r),
      FamilyRange::V6(r) => self.v6.insert(r)
    }
    Ok(())
  }

  /// `true` if `address` falls within a stored range.
  pub fn includes(&self, address: &str) -> std::result::Result<bool, ParseError> {
    parse_address(address).map(|address| self.includes_address(address))
  }

  pub fn contains(&self, address: IpAddr) -> bool {
    self.includes_address(Address::from(address))
  }

  fn includes_address(&self, address: Address) -> bool {
    match address {
      Address::V4(x) => self.v4.contains(&x),
      Address::V6(x) => self.v6.contains(&x)
    }
  }

  pub fn is_empty(&self) -> bool {
    self.v4.is_empty() && self.v6.is_empty()
  }

  pub fn ipv4(&self) -> &RangeList<u32> {
    &self.v4
  }

  pub fn ipv6(&self) -> &RangeList<u128> {
    &self.v6
  }

  pub(crate) fn import_ipv4<I>(&mut self, ranges: I) where
   I: IntoIterator<Item=AddrRange<u32>>
  {
    self.v4.import(ranges);
  }
}
