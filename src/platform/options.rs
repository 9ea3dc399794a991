//! Typed option declarations.
//!
//! Platforms expose the configuration options they recognize as a flat
//! declaration list: name, help text, and a typed default. There is no
//! validation beyond the type; unset paths flow through as empty strings.

/// Default value for a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDefault {
    /// Boolean toggle
    Bool(bool),
    /// String or path value
    Str(&'static str),
}

impl std::fmt::Display for OptionDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionDefault::Bool(b) => write!(f, "{}", b),
            OptionDefault::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// A declared configuration option.
#[derive(Debug, Clone)]
pub struct OptionInfo {
    /// Option name as it appears in build invocations
    pub name: &'static str,

    /// Help text
    pub help: &'static str,

    /// Default value
    pub default: OptionDefault,
}

impl OptionInfo {
    /// Declare a boolean option.
    pub fn bool(name: &'static str, help: &'static str, default: bool) -> Self {
        OptionInfo {
            name,
            help,
            default: OptionDefault::Bool(default),
        }
    }

    /// Declare a string or path option.
    pub fn str(name: &'static str, help: &'static str, default: &'static str) -> Self {
        OptionInfo {
            name,
            help,
            default: OptionDefault::Str(default),
        }
    }
}
