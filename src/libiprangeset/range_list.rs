// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Coalesced ranges of one address family.
//!
//! Ranges are kept in a vector sorted by start. Two stored ranges never overlap nor touch: for consecutive ranges `a` and `b`, `a.end() + 1 < b.start()`. Overlapping or adjacent ranges are merged on insertion, so `{[1..5], [6..9]}` is stored as `{[1..9]}`. Lookups are binary searches over the starts.
//!
//! # Examples
//!
//! ```rust
//! use iprangeset::range_list::RangeList;
//! use iprangeset::range::AddrRange;
//! use gcollections::ops::*;
//!
//! let mut list = RangeList::from_unsorted(vec![AddrRange::new(10u32, 20), AddrRange::new(1, 5)]);
//! list.insert(AddrRange::new(4, 11));
//! assert_eq!(list.interval_count(), 1);
//! assert!(list.contains(&15));
//! assert!(!list.contains(&21));
//! ```

use crate::ops::*;
use crate::range::*;
use gcollections::kind::*;
use gcollections::ops::*;
use num_traits::{Saturating, Zero};
use std::iter::FromIterator;
use std::slice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeList<A> {
  ranges: Vec<AddrRange<A>>
}

impl<A: Width> RangeList<A>
{
  pub fn new() -> RangeList<A> {
    RangeList { ranges: vec![] }
  }

  /// Sorts `ranges` by start and merges them in a single sweep.
  pub fn from_unsorted<I>(ranges: I) -> RangeList<A> where
   I: IntoIterator<Item=AddrRange<A>>
  {
    let mut ranges: Vec<AddrRange<A>> = ranges.into_iter().collect();
    ranges.sort_unstable();
    let mut res = RangeList { ranges: Vec::with_capacity(ranges.len()) };
    for range in ranges {
      res.join_or_push(range);
    }
    res
  }

  /// Bulk import: merges `ranges` with the stored ones, in `O((n + m) log(n + m))`.
  pub fn import<I>(&mut self, ranges: I) where
   I: IntoIterator<Item=AddrRange<A>>
  {
    let stored = std::mem::replace(&mut self.ranges, vec![]);
    *self = RangeList::from_unsorted(stored.into_iter().chain(ranges));
  }

  /// Inserts a single range, absorbing every stored range it overlaps or touches.
  ///
  /// The insertion point is found by binary search and the absorbed ranges form one contiguous run, replaced in place by their hull.
  pub fn insert(&mut self, x: AddrRange<A>) {
    // Index of the first range starting after `x`.
    let upper = self.ranges.partition_point(|r| r.start() <= x.start());
    let first = match upper.checked_sub(1) {
      Some(prev) if self.ranges[prev].touches(&x) => prev,
      _ => upper
    };
    let last = upper + self.ranges[upper..].iter()
      .take_while(|r| x.touches(*r))
      .count();
    let merged = self.ranges[first..last].iter()
      .fold(x, |acc, r| acc.hull(r));
    self.ranges.drain(first..last);
    self.ranges.insert(first, merged);
    debug_assert!(self.is_coalesced());
  }

  /// Number of addresses covered, saturating at the largest `A::Size`.
  pub fn size(&self) -> A::Size {
    self.ranges.iter()
      .fold(Zero::zero(), |acc: A::Size, r| acc.saturating_add(r.width()))
  }

  pub fn interval_count(&self) -> usize {
    self.ranges.len()
  }

  pub fn iter(&self) -> slice::Iter<'_, AddrRange<A>> {
    self.ranges.iter()
  }

  /// The stored range containing `value`, if any.
  pub fn find(&self, value: A) -> Option<&AddrRange<A>> {
    let upper = self.ranges.partition_point(|r| r.start() <= value);
    upper.checked_sub(1)
      .map(|i| &self.ranges[i])
      .filter(|r| r.contains(&value))
  }

  fn join_or_push(&mut self, x: AddrRange<A>) {
    match self.ranges.last_mut() {
      Some(back) if back.touches(&x) => {
        *back = back.hull(&x);
      }
      _ => self.ranges.push(x)
    }
  }

  fn is_coalesced(&self) -> bool {
    self.ranges.windows(2).all(|w| w[0].start() < w[1].start() && !w[0].touches(&w[1]))
  }
}

impl<A: Width> Default for RangeList<A>
{
  fn default() -> RangeList<A> {
    RangeList::new()
  }
}

impl<A: Width> FromIterator<AddrRange<A>> for RangeList<A>
{
  fn from_iter<I>(iter: I) -> RangeList<A> where
   I: IntoIterator<Item=AddrRange<A>>
  {
    RangeList::from_unsorted(iter)
  }
}

impl<A: Width> Extend<AddrRange<A>> for RangeList<A>
{
  fn extend<I>(&mut self, iterable: I) where
   I: IntoIterator<Item=AddrRange<A>>
  {
    for range in iterable {
      self.insert(range);
    }
  }
}

impl<'a, A: Width> IntoIterator for &'a RangeList<A>
{
  type Item = &'a AddrRange<A>;
  type IntoIter = slice::Iter<'a, AddrRange<A>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<A> Collection for RangeList<A>
{
  type Item = A;
}

impl<A: Width> Contains for RangeList<A>
{
  fn contains(&self, value: &A) -> bool {
    self.find(*value).is_some()
  }
}

impl<A: Width> Empty for RangeList<A>
{
  fn empty() -> RangeList<A> {
    RangeList::new()
  }
}

impl<A: Width> IsEmpty for RangeList<A>
{
  fn is_empty(&self) -> bool {
    self.ranges.is_empty()
  }
}
