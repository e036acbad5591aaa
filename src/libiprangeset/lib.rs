// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library stores sets of IPv4 and IPv6 address ranges and answers membership queries in logarithmic time. It is meant for classifying peers of a network against block lists or lists of known ranges.
//!
//! Ranges are coalesced as they are added: two stored ranges never overlap nor touch, so a set is always in its smallest representation. IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are folded into the IPv4 space. Ranges can be bulk imported, appended one at a time, or loaded from the usual `label:start-end` IPv4 list format, in which case malformed lines are logged with the `log` crate and skipped.
//!
//! # Examples
//!
//! ```rust
//! use iprangeset::RangeSet;
//!
//! let mut set = RangeSet::new();
//! let summary = set.load_ipv4_text_ranges(vec![
//!   "# known ranges",
//!   "Example:10.0.0.0-10.0.0.255",
//!   "garbage",
//! ]);
//! assert_eq!(summary.imported, 1);
//!
//! set.append("10.0.1.0", Some("10.0.1.255")).unwrap();
//! assert_eq!(set.ipv4().interval_count(), 1);
//! assert_eq!(set.includes("10.0.1.7"), Ok(true));
//! assert_eq!(set.includes("::ffff:10.0.0.1"), Ok(true));
//! assert_eq!(set.includes("10.0.2.0"), Ok(false));
//! ```
//!
//! # References
//! * [RFC 4291, IPv6 Addressing Architecture](https://tools.ietf.org/html/rfc4291)
//! * [Boost Interval Container Library](http://www.boost.org/doc/libs/1_57_0/libs/icl/doc/html/index.html)

pub mod address;
pub mod error;
pub mod ingest;
pub mod ops;
pub mod range;
pub mod range_list;
pub mod range_set;

pub use crate::address::{is_valid_address, parse_address, parse_ipv4, parse_ipv6, render_ipv4, Address, Family};
pub use crate::error::{Error, InvariantError, ParseError, ParseErrorKind};
pub use crate::ingest::LoadSummary;
pub use crate::range::AddrRange;
pub use crate::range_list::RangeList;
pub use crate::range_set::RangeSet;
