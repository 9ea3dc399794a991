//! Build environment accumulator.
//!
//! The [`BuildEnv`] is the shared, mutable object a platform configuration
//! step writes into: ordered flag lists for the compile, assemble, and link
//! steps, preprocessor defines, include paths, and toolchain executable
//! paths. The build orchestrator creates it before configuration runs and
//! consumes it afterwards.
//!
//! Key principle: configuration is append-only. A platform module adds
//! flags and paths; it never removes or rewrites entries appended earlier.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A preprocessor define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Create a simple flag define.
    pub fn flag(name: impl Into<String>) -> Self {
        Define::Flag(name.into())
    }

    /// Create a key-value define.
    pub fn key_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define::KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Convert to compiler flag format.
    pub fn to_flag(&self) -> String {
        match self {
            Define::Flag(name) => format!("-D{}", name),
            Define::KeyValue { name, value } => format!("-D{}={}", name, value),
        }
    }
}

/// Accumulated compiler/linker invocation state for one build pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildEnv {
    /// Compiler flags (C and C++ compile steps)
    pub cflags: Vec<String>,

    /// Assembler flags
    pub asflags: Vec<String>,

    /// Linker flags
    pub linkflags: Vec<String>,

    /// Preprocessor defines
    pub defines: Vec<Define>,

    /// Include search paths, highest priority first
    pub include_dirs: Vec<PathBuf>,

    /// C compiler invocation string (may carry a cache-wrapper prefix)
    pub cc: Option<String>,

    /// C++ compiler invocation string
    pub cxx: Option<String>,

    /// Assembler driver invocation string
    pub assembler: Option<String>,

    /// Archiver path
    pub ar: Option<String>,

    /// Ranlib path
    pub ranlib: Option<String>,

    /// PATH-like executable search string for tool invocation
    pub search_path: String,

    /// Extra environment variables to set when invoking tools
    pub env_vars: Vec<(String, String)>,

    /// Suffix appended to output artifact names (e.g. ".simulator")
    pub extra_suffix: String,

    /// Target word size in bits
    pub bits: Option<u32>,

    /// Set when configuring against an osxcross toolchain
    pub osxcross: bool,
}

impl BuildEnv {
    /// Create an empty build environment with the given executable search path.
    pub fn new(search_path: impl Into<String>) -> Self {
        BuildEnv {
            search_path: search_path.into(),
            ..Default::default()
        }
    }

    /// Append compiler flags.
    pub fn append_cflags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cflags.extend(flags.into_iter().map(|f| f.into()));
    }

    /// Append assembler flags.
    pub fn append_asflags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asflags.extend(flags.into_iter().map(|f| f.into()));
    }

    /// Append linker flags.
    pub fn append_linkflags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.linkflags.extend(flags.into_iter().map(|f| f.into()));
    }

    /// Append a preprocessor define.
    pub fn define(&mut self, define: Define) {
        self.defines.push(define);
    }

    /// Prepend an include path, giving it priority over existing entries.
    pub fn prepend_include(&mut self, dir: impl Into<PathBuf>) {
        self.include_dirs.insert(0, dir.into());
    }

    /// Prepend a directory to the executable search path.
    pub fn prepend_search_path(&mut self, dir: &str) {
        self.search_path = format!("{}:{}", dir, self.search_path);
    }

    /// Set an environment variable for tool invocation.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env_vars.push((key.into(), value.into()));
    }

    /// Prepend a marker to the output artifact suffix.
    pub fn prepend_suffix(&mut self, marker: &str) {
        self.extra_suffix = format!("{}{}", marker, self.extra_suffix);
    }

    /// Check whether a define with the given name is present.
    pub fn has_define(&self, name: &str) -> bool {
        self.defines.iter().any(|d| d.name() == name)
    }
}
