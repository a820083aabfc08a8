//! Opcode parsing.
//!
//! An opcode is written `TAG@arg1@arg2...`. The tag selects a handler in
//! the [`OpcodeRegistry`](super::OpcodeRegistry); arguments are positional
//! and 1-based, matching how card data is written. Arguments stay as text
//! until a handler asks for them, so a malformed number is only reported
//! by the opcode that actually reads it.
//!
//! ```
//! use shadow_rules::effects::Opcode;
//!
//! let op = Opcode::parse("BUFSLFCOND@2@1@NEC?3");
//! assert_eq!(op.tag(), "BUFSLFCOND");
//! assert_eq!(op.int(1).unwrap(), 2);
//! assert_eq!(op.arg(3).unwrap(), "NEC?3");
//! assert!(op.arg(4).is_err());
//! assert_eq!(op.to_string(), "BUFSLFCOND@2@1@NEC?3");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Keyword;
use crate::error::{Result, RulesError};

/// Separator between the tag and each argument.
pub const ARG_SEPARATOR: char = '@';

/// A parsed opcode: tag plus raw arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    tag: String,
    args: SmallVec<[String; 4]>,
}

impl Opcode {
    /// Split an opcode string. Never fails; an empty string has an empty tag.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut parts = text.trim().split(ARG_SEPARATOR);
        let tag = parts.next().unwrap_or_default().to_string();
        Self {
            tag,
            args: parts.map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of arguments after the tag.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Raw argument at 1-based `index`.
    pub fn arg(&self, index: usize) -> Result<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.args.get(i))
            .map(String::as_str)
            .ok_or_else(|| RulesError::MissingArgument {
                tag: self.tag.clone(),
                index,
            })
    }

    /// Argument at `index`, if present.
    #[must_use]
    pub fn optional_arg(&self, index: usize) -> Option<&str> {
        self.arg(index).ok()
    }

    /// Integer argument.
    pub fn int(&self, index: usize) -> Result<i32> {
        let raw = self.arg(index)?;
        raw.parse().map_err(|_| RulesError::MalformedArgument {
            tag: self.tag.clone(),
            index,
            value: raw.to_string(),
        })
    }

    /// Non-negative integer argument, used for repeat counts and amounts.
    pub fn count(&self, index: usize) -> Result<usize> {
        let raw = self.arg(index)?;
        raw.parse().map_err(|_| RulesError::MalformedArgument {
            tag: self.tag.clone(),
            index,
            value: raw.to_string(),
        })
    }

    /// Keyword argument such as `STORM` or `WARD`.
    pub fn keyword(&self, index: usize) -> Result<Keyword> {
        Keyword::parse(self.arg(index)?)
    }

    /// Every argument from `index` onwards.
    pub fn args_from(&self, index: usize) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .skip(index.saturating_sub(1))
            .map(String::as_str)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for arg in &self.args {
            write!(f, "{}{}", ARG_SEPARATOR, arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_args() {
        let op = Opcode::parse("SLFBAN");
        assert_eq!(op.tag(), "SLFBAN");
        assert_eq!(op.arg_count(), 0);
        assert_eq!(
            op.arg(1),
            Err(RulesError::MissingArgument {
                tag: "SLFBAN".into(),
                index: 1
            })
        );
    }

    #[test]
    fn test_arg_zero_is_missing() {
        let op = Opcode::parse("DRWCRD@1");
        assert!(op.arg(0).is_err());
    }

    #[test]
    fn test_malformed_int() {
        let op = Opcode::parse("DRWCRD@two");
        let err = op.int(1).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err,
            RulesError::MalformedArgument {
                tag: "DRWCRD".into(),
                index: 1,
                value: "two".into()
            }
        );
        assert!(Opcode::parse("DRWCRD@-1").count(1).is_err());
    }

    #[test]
    fn test_keyword_and_tail() {
        let op = Opcode::parse("SUMFOL@Knight@Knight@Steelclad Knight");
        let names: Vec<_> = op.args_from(1).collect();
        assert_eq!(names, vec!["Knight", "Knight", "Steelclad Knight"]);

        let op = Opcode::parse("GVEEFX@WARD");
        assert_eq!(op.keyword(1).unwrap(), Keyword::Ward);
        assert!(Opcode::parse("GVEEFX@FLY").keyword(1).is_err());
    }
}
