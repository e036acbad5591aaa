// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of address parsing and range construction.

use thiserror::Error;

/// Malformed address text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address `{input}`: {kind}")]
pub struct ParseError {
  input: String,
  kind: ParseErrorKind
}

impl ParseError {
  pub(crate) fn new(input: &str, kind: ParseErrorKind) -> ParseError {
    ParseError { input: input.to_string(), kind }
  }

  /// The text that failed to parse.
  pub fn input(&self) -> &str {
    &self.input
  }

  pub fn kind(&self) -> &ParseErrorKind {
    &self.kind
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
  #[error("the address is empty")]
  Empty,

  #[error("expected 4 dot-separated octets, found {0}")]
  OctetCount(usize),

  #[error("octet `{0}` is not a decimal number")]
  InvalidOctet(String),

  #[error("octet {0} is greater than 255")]
  OctetRange(u16),

  #[error("more than one `::` zero run")]
  MultipleZeroRuns,

  #[error("single `:` at the start or the end of the address")]
  StrayColon,

  #[error("group `{0}` is not 1 to 4 hexadecimal digits")]
  InvalidHextet(String),

  #[error("an embedded IPv4 address is only allowed in the last group")]
  MisplacedIpv4,

  #[error("embedded IPv4 address `{0}` is malformed")]
  InvalidEmbeddedIpv4(String),

  #[error("expected 8 groups, found {0}")]
  GroupCount(usize),
}

/// A range that cannot be stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
  #[error("range start {start} is greater than range end {end}")]
  Inverted { start: String, end: String },

  #[error("range {start}-{end} mixes IPv4 and IPv6 addresses")]
  FamilyMismatch { start: String, end: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error(transparent)]
  Invariant(#[from] InvariantError),
}

pub type Result<T> = std::result::Result<T, Error>;
