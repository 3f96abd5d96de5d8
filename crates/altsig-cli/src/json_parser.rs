//! Annotation text in JSON form.
//!
//! Alternative signatures in a manifest are serialized type trees:
//!
//! ```json
//! {"kind": "method",
//!  "return_type": {"base": "kotlin.collections.MutableList",
//!                  "arguments": [{"kind": "type", "ty": {"base": "kotlin.String", "nullability": "nullable"}}]},
//!  "parameters": []}
//! ```

use altsig_checker::{ParseError, SignatureTextParser};
use altsig_solver::AlternativeSignature;

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSignatureParser;

impl SignatureTextParser for JsonSignatureParser {
    fn parse(&self, text: &str) -> Result<AlternativeSignature, ParseError> {
        serde_json::from_str(text).map_err(|err| ParseError::new(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/json_parser_tests.rs"]
mod tests;
