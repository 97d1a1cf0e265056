//! Parsing selections given on the command line.

use livemark_core::Selection;

use crate::error::SelectionError;

/// Parse `N` (a caret) or `A:B` (anchor and head) into a [`Selection`].
pub fn parse_selection(input: &str) -> Result<Selection, SelectionError> {
    match input.split_once(':') {
        None => parse_offset(input, 0..input.len()).map(Selection::collapsed),
        Some((anchor, head)) => {
            let split = anchor.len();
            let anchor = parse_offset(input, 0..split)?;
            let head = parse_offset(input, split + 1..input.len())?;
            Ok(Selection::new(anchor, head))
        }
    }
}

fn parse_offset(input: &str, range: std::ops::Range<usize>) -> Result<usize, SelectionError> {
    let part = &input[range.clone()];
    let trimmed = part.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::new(input, range, "missing offset"));
    }
    trimmed
        .parse()
        .map_err(|_| SelectionError::new(input, range, "not a char offset"))
}
