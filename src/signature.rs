//! Signature parser for hand-written .NET construct declarations.
//!
//! Grammar: `(<prefix>.)?<member>(\(<arguments>\))?`, for example
//! `Namespace.Class.Method(int count, string name)`.
//!
//! The parser is forgiving: input that does not match yields an empty
//! signature instead of an error, and the caller renders what it can.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// The prefix is greedy, so it ends at the last `.` before the member.
// `$` is accepted for compiler-generated names (`Outer$Inner`).
static RE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<prefix>[\w\-.$]+)\.)?(?P<member>[\w\-$]+)(?:\((?P<arguments>[^)]*)\))?$")
        .unwrap()
});

// Only `, ` style separators split; `Dictionary<string,int>` stays whole but
// `Dictionary<string, int>` does not.
static RE_ARG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s+").unwrap());

/// Parsed form of one construct declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Dotted namespace/class path before the member.
    pub prefix: Option<String>,
    /// Bare construct name. Empty only for a malformed signature.
    pub member: String,
    /// `None` when no parenthesis pair was written, `Some(vec![])` for `()`.
    pub arguments: Option<Vec<String>>,
}

impl Signature {
    /// Parse a raw signature string. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Signature {
        let Some(caps) = RE_SIGNATURE.captures(raw.trim()) else {
            return Signature::default();
        };

        let arguments = caps.name("arguments").map(|m| {
            let args = m.as_str().trim();
            if args.is_empty() {
                Vec::new()
            } else {
                RE_ARG_SEPARATOR.split(args).map(str::to_string).collect()
            }
        });

        Signature {
            prefix: caps.name("prefix").map(|m| m.as_str().to_string()),
            member: caps["member"].to_string(),
            arguments,
        }
    }

    /// True when the input did not match the signature grammar.
    pub fn is_malformed(&self) -> bool {
        self.member.is_empty()
    }

    /// `prefix.member`, or just `member` without a prefix.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}.{}", prefix, self.member),
            None => self.member.clone(),
        }
    }

    /// Drop the prefix when it repeats what the enclosing context implies.
    ///
    /// Returns true if the prefix was removed.
    pub fn strip_context_prefix(&mut self, context_prefix: Option<&str>) -> bool {
        match (context_prefix, self.prefix.as_deref()) {
            (Some(ctx), Some(prefix)) if ctx == prefix => {
                self.prefix = None;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())?;
        if let Some(args) = &self.arguments {
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}
