// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Closed and bounded range of addresses of one family.
//!
//! A range is never empty: `start <= end` holds for every value of this type. It serializes as the tuple `(start, end)` and deserializing an inverted tuple fails.
//!
//! # Examples
//!
//! ```rust
//! use iprangeset::range::AddrRange;
//! use gcollections::ops::*;
//!
//! let r = AddrRange::new(10u32, 20);
//! assert!(r.contains(&15));
//! assert!(r.touches(&AddrRange::new(21, 30)));
//! assert_eq!(r.hull(&AddrRange::new(21, 30)), AddrRange::new(10, 30));
//! assert_eq!(AddrRange::try_new(2u32, 1), None);
//! ```

use crate::ops::*;
use gcollections::kind::*;
use gcollections::ops::*;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::{max, min};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrRange<A> {
  start: A,
  end: A
}

impl<A: Width> AddrRange<A>
{
  pub fn new(start: A, end: A) -> AddrRange<A> {
    assert!(start <= end, "Cannot build an inverted range. Use AddrRange::try_new for unchecked input.");
    AddrRange { start, end }
  }

  pub fn try_new(start: A, end: A) -> Option<AddrRange<A>> {
    if start <= end { Some(AddrRange { start, end }) }
    else { None }
  }

  pub fn start(&self) -> A {
    self.start
  }

  pub fn end(&self) -> A {
    self.end
  }

  /// `true` if `self` and `next` overlap or are adjacent, given `self.start() <= next.start()`.
  pub fn touches(&self, next: &AddrRange<A>) -> bool {
    debug_assert!(self.start <= next.start);
    A::touches(&self.end, &next.start)
  }

  pub fn hull(&self, other: &AddrRange<A>) -> AddrRange<A> {
    AddrRange {
      start: min(self.start, other.start),
      end: max(self.end, other.end)
    }
  }

  /// Number of addresses in the range.
  pub fn width(&self) -> A::Size {
    A::width(&self.start, &self.end)
  }
}

impl<A: Width> fmt::Display for AddrRange<A>
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.start == self.end {
      write!(f, "{}", self.start.to_ip())
    }
    else {
      write!(f, "{}-{}", self.start.to_ip(), self.end.to_ip())
    }
  }
}

impl<A> Collection for AddrRange<A>
{
  type Item = A;
}

impl<A: Width> Contains for AddrRange<A>
{
  fn contains(&self, value: &A) -> bool {
    *value >= self.start && *value <= self.end
  }
}

impl<A: Width> Bounded for AddrRange<A>
{
  fn lower(&self) -> A {
    self.start
  }

  fn upper(&self) -> A {
    self.end
  }
}

impl<A: Width> Singleton for AddrRange<A>
{
  fn singleton(x: A) -> AddrRange<A> {
    AddrRange::new(x, x)
  }
}

impl<A: Serialize> Serialize for AddrRange<A>
{
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where
   S: Serializer
  {
    (&self.start, &self.end).serialize(serializer)
  }
}

impl<'de, A> Deserialize<'de> for AddrRange<A> where
 A: Width + Deserialize<'de>
{
  fn deserialize<D>(deserializer: D) -> Result<AddrRange<A>, D::Error> where
   D: Deserializer<'de>
  {
    let (start, end) = <(A, A)>::deserialize(deserializer)?;
    AddrRange::try_new(start, end).ok_or_else(|| de::Error::custom(
      format!("range start {} is greater than range end {}", start.to_ip(), end.to_ip())))
  }
}

/// Conversion of the usual range notations in test tables.
#[cfg(test)]
pub(crate) trait ToRange<A> {
  fn to_range(self) -> AddrRange<A>;
}

#[cfg(test)]
impl<A: Width> ToRange<A> for AddrRange<A> {
  fn to_range(self) -> AddrRange<A> { self }
}

#[cfg(test)]
impl<A: Width> ToRange<A> for (A, A) {
  fn to_range(self) -> AddrRange<A> {
    let (a, b) = self;
    AddrRange::new(a, b)
  }
}

#[cfg(test)]
macro_rules! singleton_to_range_impl
{
  ( $( $t: ty ),* ) =>
  {$(
    impl ToRange<$t> for $t {
      fn to_range(self) -> AddrRange<$t> {
        AddrRange::singleton(self)
      }
    }
  )*}
}

#[cfg(test)]
singleton_to_range_impl!(u32, u128);
