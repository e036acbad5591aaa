// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Textual address parsing.
//!
//! IPv4 addresses are encoded as big-endian `u32` and IPv6 addresses as `u128`. An IPv6 address whose upper 96 bits are `::ffff:0:0` is an IPv4-mapped address: [parse_address](fn.parse_address.html) folds it back to its embedded `u32` so that the same host is always found in the IPv4 space.
//!
//! # Examples
//!
//! ```rust
//! use iprangeset::address::*;
//!
//! assert_eq!(parse_ipv4("192.0.2.1"), Ok(0xc000_0201));
//! assert_eq!(parse_ipv6("::1"), Ok(1));
//! assert_eq!(parse_address("::ffff:192.0.2.1"), Ok(Address::V4(0xc000_0201)));
//! assert!(!is_valid_address("1::2::3"));
//! ```

use crate::error::{ParseError, ParseErrorKind};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Value of the upper 96 bits of an IPv4-mapped IPv6 address.
const IPV4_MAPPED_PREFIX: u128 = 0xffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
  V4,
  V6
}

/// A normalized address: IPv4-mapped IPv6 addresses are always `V4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
  V4(u32),
  V6(u128)
}

impl Address {
  /// Folds an IPv4-mapped value into the IPv4 space.
  pub fn from_ipv6(value: u128) -> Address {
    if value >> 32 == IPV4_MAPPED_PREFIX {
      Address::V4(value as u32)
    }
    else {
      Address::V6(value)
    }
  }

  pub fn family(&self) -> Family {
    match self {
      Address::V4(_) => Family::V4,
      Address::V6(_) => Family::V6
    }
  }
}

impl From<IpAddr> for Address {
  fn from(ip: IpAddr) -> Address {
    match ip {
      IpAddr::V4(ip) => Address::V4(u32::from(ip)),
      IpAddr::V6(ip) => Address::from_ipv6(u128::from(ip))
    }
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Address::V4(x) => fmt::Display::fmt(&Ipv4Addr::from(x), f),
      Address::V6(x) => fmt::Display::fmt(&Ipv6Addr::from(x), f)
    }
  }
}

pub fn parse_ipv4(text: &str) -> Result<u32, ParseError> {
  if text.is_empty() {
    return Err(ParseError::new(text, ParseErrorKind::Empty));
  }
  let octets: Vec<&str> = text.split('.').collect();
  if octets.len() != 4 {
    return Err(ParseError::new(text, ParseErrorKind::OctetCount(octets.len())));
  }
  let mut value = 0u32;
  for octet in octets {
    value = (value << 8) | u32::from(parse_octet(text, octet)?);
  }
  Ok(value)
}

fn parse_octet(text: &str, octet: &str) -> Result<u8, ParseError> {
  let is_decimal = !octet.is_empty() && octet.len() <= 3 && octet.bytes().all(|b| b.is_ascii_digit());
  if !is_decimal {
    return Err(ParseError::new(text, ParseErrorKind::InvalidOctet(octet.to_string())));
  }
  let value = octet.parse::<u16>()
    .map_err(|_| ParseError::new(text, ParseErrorKind::InvalidOctet(octet.to_string())))?;
  if value > 255 {
    Err(ParseError::new(text, ParseErrorKind::OctetRange(value)))
  }
  else {
    Ok(value as u8)
  }
}

fn parse_hextet(group: &str) -> Option<u16> {
  if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
    None
  }
  else {
    u16::from_str_radix(group, 16).ok()
  }
}

pub fn parse_ipv6(text: &str) -> Result<u128, ParseError> {
  let fail = |kind| ParseError::new(text, kind);

  // Strip one colon of a leading or trailing `::` so that the zero run is always a single empty group.
  let body =
    if text.is_empty() { return Err(fail(ParseErrorKind::Empty)); }
    else if text == "::" { "" }
    else if text.starts_with("::") { &text[1..] }
    else if text.starts_with(':') { return Err(fail(ParseErrorKind::StrayColon)); }
    else if text.ends_with("::") { &text[..text.len() - 1] }
    else if text.ends_with(':') { return Err(fail(ParseErrorKind::StrayColon)); }
    else { text };

  let groups: Vec<&str> = body.split(':').collect();
  let last = groups.len() - 1;
  let mut head: Vec<u16> = Vec::with_capacity(8);
  let mut tail: Vec<u16> = Vec::with_capacity(8);
  let mut zero_run = false;
  for (i, group) in groups.into_iter().enumerate() {
    if group.is_empty() {
      if zero_run {
        return Err(fail(ParseErrorKind::MultipleZeroRuns));
      }
      zero_run = true;
      continue;
    }
    let hextets = if zero_run { &mut tail } else { &mut head };
    if group.contains('.') {
      if i != last {
        return Err(fail(ParseErrorKind::MisplacedIpv4));
      }
      let v4 = parse_ipv4(group)
        .map_err(|_| fail(ParseErrorKind::InvalidEmbeddedIpv4(group.to_string())))?;
      hextets.push((v4 >> 16) as u16);
      hextets.push(v4 as u16);
    }
    else {
      let hextet = parse_hextet(group)
        .ok_or_else(|| fail(ParseErrorKind::InvalidHextet(group.to_string())))?;
      hextets.push(hextet);
    }
  }

  let explicit = head.len() + tail.len();
  if (zero_run && explicit > 7) || (!zero_run && explicit != 8) {
    return Err(fail(ParseErrorKind::GroupCount(explicit)));
  }
  let mut words = [0u16; 8];
  words[..head.len()].copy_from_slice(&head);
  words[8 - tail.len()..].copy_from_slice(&tail);
  Ok(words.iter().fold(0u128, |acc, w| (acc << 16) | u128::from(*w)))
}

/// Parses an IPv6 address if `text` contains a colon, an IPv4 address otherwise.
pub fn parse_address(text: &str) -> Result<Address, ParseError> {
  if text.contains(':') {
    parse_ipv6(text).map(Address::from_ipv6)
  }
  else {
    parse_ipv4(text).map(Address::V4)
  }
}

pub fn is_valid_address(text: &str) -> bool {
  parse_address(text).is_ok()
}

pub fn render_ipv4(value: u32) -> String {
  Ipv4Addr::from(value).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_ipv4_test() {
    let cases = vec![
      (1, "0.0.0.0", 0u32),
      (2, "255.255.255.255", u32::max_value()),
      (3, "192.0.2.1", 0xc000_0201),
      (4, "10.0.0.1", 0x0a00_0001),
      (5, "010.000.000.001", 0x0a00_0001),
    ];
    for (id, text, expected) in cases {
      assert_eq!(parse_ipv4(text), Ok(expected), "test #{} of parse_ipv4", id);
    }
  }

  #[test]
  fn parse_ipv4_error_test() {
    let cases = vec![
      (1, "", ParseErrorKind::Empty),
      (2, "1.2.3", ParseErrorKind::OctetCount(3)),
      (3, "1.2.3.4.5", ParseErrorKind::OctetCount(5)),
      (4, "1.2.3.256", ParseErrorKind::OctetRange(256)),
      (5, "1.2.3.999", ParseErrorKind::OctetRange(999)),
      (6, "1..3.4", ParseErrorKind::InvalidOctet("".into())),
      (7, "1.2.3.x", ParseErrorKind::InvalidOctet("x".into())),
      (8, "1.2.3.+4", ParseErrorKind::InvalidOctet("+4".into())),
      (9, "1.2.3.0004", ParseErrorKind::InvalidOctet("0004".into())),
      (10, " 1.2.3.4", ParseErrorKind::InvalidOctet(" 1".into())),
      (11, "localhost", ParseErrorKind::OctetCount(1)),
    ];
    for (id, text, kind) in cases {
      let err = parse_ipv4(text).unwrap_err();
      assert_eq!(err.kind(), &kind, "test #{} of parse_ipv4 errors", id);
      assert_eq!(err.input(), text);
    }
  }

  #[test]
  fn ipv4_round_trip() {
    for text in &["0.0.0.0", "1.2.3.4", "127.0.0.1", "192.168.100.200", "255.255.255.255"] {
      let value = parse_ipv4(text).unwrap();
      assert_eq!(render_ipv4(value), *text);
      assert_eq!(parse_ipv4(&render_ipv4(value)), Ok(value));
    }
    let mut x = 7u32;
    for _ in 0..1000 {
      x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
      assert_eq!(parse_ipv4(&render_ipv4(x)), Ok(x));
    }
  }

  #[test]
  fn parse_ipv6_test() {
    let cases = vec![
      (1, "::", 0u128),
      (2, "::1", 1),
      (3, "1::", 1 << 112),
      (4, "1::2", (1 << 112) | 2),
      (5, "2001:db8::ff00:42:8329", 0x2001_0db8_0000_0000_0000_ff00_0042_8329),
      (6, "2001:0db8:0000:0000:0000:ff00:0042:8329", 0x2001_0db8_0000_0000_0000_ff00_0042_8329),
      (7, "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", u128::max_value()),
      (8, "::ffff:192.0.2.1", 0xffff_c000_0201),
      (9, "64:ff9b::192.0.2.33", 0x0064_ff9b_0000_0000_0000_0000_c000_0221),
      (10, "1:2:3:4:5:6:1.2.3.4", 0x0001_0002_0003_0004_0005_0006_0102_0304),
      (11, "1:2:3:4:5:6:7::", 0x0001_0002_0003_0004_0005_0006_0007_0000),
      (12, "::2:3:4:5:6:7:8", 0x0000_0002_0003_0004_0005_0006_0007_0008),
      (13, "FE80::aBcD", 0xfe80_0000_0000_0000_0000_0000_0000_abcd),
    ];
    for (id, text, expected) in cases {
      assert_eq!(parse_ipv6(text), Ok(expected), "test #{} of parse_ipv6", id);
    }
  }

  #[test]
  fn parse_ipv6_error_test() {
    let cases = vec![
      (1, "", ParseErrorKind::Empty),
      (2, ":", ParseErrorKind::StrayColon),
      (3, ":1::", ParseErrorKind::StrayColon),
      (4, "1::2:", ParseErrorKind::StrayColon),
      (5, "1::2::3", ParseErrorKind::MultipleZeroRuns),
      (6, ":::", ParseErrorKind::MultipleZeroRuns),
      (7, "1:::2", ParseErrorKind::MultipleZeroRuns),
      (8, "1:2:3", ParseErrorKind::GroupCount(3)),
      (9, "1:2:3:4:5:6:7:8:9", ParseErrorKind::GroupCount(9)),
      (10, "1:2:3:4::5:6:7:8", ParseErrorKind::GroupCount(8)),
      (11, "12345::", ParseErrorKind::InvalidHextet("12345".into())),
      (12, "g::", ParseErrorKind::InvalidHextet("g".into())),
      (13, "::1.2.3.4:5", ParseErrorKind::MisplacedIpv4),
      (14, "::1.2.3", ParseErrorKind::InvalidEmbeddedIpv4("1.2.3".into())),
      (15, "1:2:3:4:5:6:7:1.2.3.4", ParseErrorKind::GroupCount(9)),
    ];
    for (id, text, kind) in cases {
      let err = parse_ipv6(text).unwrap_err();
      assert_eq!(err.kind(), &kind, "test #{} of parse_ipv6 errors", id);
    }
  }

  #[test]
  fn parse_ipv6_agrees_with_std() {
    let texts = vec!["::", "::1", "fe80::1", "2001:db8:85a3::8a2e:370:7334", "::ffff:10.0.0.1", "1:0:0:1::", "a:b:c:d:e:f:1:2"];
    for text in texts {
      let std: Ipv6Addr = text.parse().unwrap();
      assert_eq!(parse_ipv6(text), Ok(u128::from(std)), "{}", text);
    }
  }

  #[test]
  fn mapped_folding_test() {
    assert_eq!(parse_address("::ffff:192.0.2.1"), Ok(Address::V4(0xc000_0201)));
    assert_eq!(parse_address("::ffff:c000:0201"), Ok(Address::V4(0xc000_0201)));
    assert_eq!(parse_address("192.0.2.1"), Ok(Address::V4(0xc000_0201)));
    // IPv4-compatible and NAT64 addresses stay in the IPv6 space.
    assert_eq!(parse_address("::192.0.2.1"), Ok(Address::V6(0xc000_0201)));
    assert_eq!(parse_address("1::ffff:192.0.2.1").map(|a| a.family()), Ok(Family::V6));

    let ip: IpAddr = "::ffff:10.1.2.3".parse().unwrap();
    assert_eq!(Address::from(ip), Address::V4(0x0a01_0203));
    let ip: IpAddr = "2001:db8::1".parse().unwrap();
    assert_eq!(Address::from(ip).family(), Family::V6);
  }

  #[test]
  fn is_valid_address_test() {
    let cases = vec![
      (1, "1.2.3.4", true),
      (2, "::", true),
      (3, "::ffff:1.2.3.4", true),
      (4, "1.2.3", false),
      (5, "1.2.3.4.", false),
      (6, "1::2::3", false),
      (7, "", false),
      (8, "not-an-ip", false),
      (9, "256.0.0.1", false),
    ];
    for (id, text, expected) in cases {
      assert_eq!(is_valid_address(text), expected, "test #{} of is_valid_address", id);
    }
  }

  #[test]
  fn display_test() {
    assert_eq!(Address::V4(0x0a00_0001).to_string(), "10.0.0.1");
    assert_eq!(Address::V6(1).to_string(), "::1");
  }
}
