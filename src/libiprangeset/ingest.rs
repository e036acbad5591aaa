// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! IPv4 range-list text format.
//!
//! One entry per line, `[label:]*start[-end]`: only the last colon-separated field is read, and `end` defaults to `start`. Blank lines and lines starting with `#` are ignored. The format is IPv4 only. A malformed entry is logged at the warning level and skipped, it never aborts the load.
//!
//! ```text
//! # level1 blocklist
//! Some Organisation:10.0.0.0-10.0.0.255
//! 192.0.2.7
//! ```

use crate::address::parse_ipv4;
use crate::error::ParseError;
use crate::range::AddrRange;
use crate::range_set::RangeSet;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Counts of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
  pub imported: usize,
  pub skipped: usize
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
  #[error(transparent)]
  Address(#[from] ParseError),

  #[error("range start is greater than range end")]
  Inverted,
}

/// Parses one line: `Ok(None)` for blank and comment lines.
pub fn parse_range_line(line: &str) -> Result<Option<AddrRange<u32>>, LineError> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return Ok(None);
  }
  let field = match line.rfind(':') {
    Some(i) => &line[i + 1..],
    None => line
  };
  let (start, end) = match field.split_once('-') {
    Some((start, end)) if !end.trim().is_empty() => (start, end),
    Some((start, _)) => (start, start),
    None => (field, field)
  };
  let start = parse_ipv4(start.trim())?;
  let end = parse_ipv4(end.trim())?;
  AddrRange::try_new(start, end)
    .map(Some)
    .ok_or(LineError::Inverted)
}

impl RangeSet
{
  /// Imports every well-formed line into the IPv4 ranges and skips the others with a warning.
  pub fn load_ipv4_text_ranges<I, S>(&mut self, lines: I) -> LoadSummary where
   I: IntoIterator<Item=S>,
   S: AsRef<str>
  {
    let mut summary = LoadSummary::default();
    let mut ranges = vec![];
    for (n, line) in lines.into_iter().enumerate() {
      let line = line.as_ref();
      match parse_range_line(line) {
        Ok(Some(range)) => {
          ranges.push(range);
          summary.imported += 1;
        }
        Ok(None) => (),
        Err(e) => {
          warn!("could not parse IP range on line {}: `{}`: {}", n + 1, line.trim(), e);
          summary.skipped += 1;
        }
      }
    }
    self.import_ipv4(ranges);
    debug!("loaded {} IPv4 ranges, skipped {} lines", summary.imported, summary.skipped);
    summary
  }

  /// Same as `load_ipv4_text_ranges`, reading lines from `reader`. Lines are decoded lossily, so labels in other encodings than UTF-8 do not hide the range that follows them. Fails only on I/O errors, in which case nothing is imported.
  pub fn load_ipv4_range_reader<R: BufRead>(&mut self, mut reader: R) -> io::Result<LoadSummary> {
    let mut lines = vec![];
    let mut buf = vec![];
    while reader.read_until(b'\n', &mut buf)? > 0 {
      lines.push(String::from_utf8_lossy(&buf).into_owned());
      buf.clear();
    }
    Ok(self.load_ipv4_text_ranges(lines))
  }

  pub fn load_ipv4_range_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<LoadSummary> {
    let file = File::open(path)?;
    self.load_ipv4_range_reader(BufReader::new(file))
  }
}
