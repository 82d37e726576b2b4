//! Identifier rules shared by vertices and ports.
//!
//! The editor derives scoped global ids by joining local ids with a scope symbol (`>` for
//! nested nodes, `+` for inputs, `-` for outputs), so local ids may not contain any of them.

use crate::error::{Error, Result};

pub const NODE_SCOPE: char = '>';
pub const INPUT_SCOPE: char = '+';
pub const OUTPUT_SCOPE: char = '-';

const SCOPE_SYMBOLS: [char; 3] = [NODE_SCOPE, INPUT_SCOPE, OUTPUT_SCOPE];

pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidId {
            id: id.to_string(),
            reason: "id must not be empty".to_string(),
        });
    }
    if let Some(symbol) = id.chars().find(|c| SCOPE_SYMBOLS.contains(c)) {
        return Err(Error::InvalidId {
            id: id.to_string(),
            reason: format!("id cannot contain {symbol:?}"),
        });
    }
    Ok(())
}
