use std::{fmt, str::FromStr};

/// The kind of output generated from the compiled contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    /// Java wrappers generated by web3j.
    Java,
    /// Go bindings generated by abigen.
    Go,
    /// The raw `.bin` and `.abi` artifacts produced by solc.
    Abi,
}

impl Lang {
    /// All supported languages.
    pub const ALL: [Self; 3] = [Self::Java, Self::Go, Self::Abi];

    /// Returns the name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Go => "go",
            Self::Abi => "abi",
        }
    }

    /// Whether the generated sources are placed in a named package.
    pub const fn requires_package(self) -> bool {
        matches!(self, Self::Java | Self::Go)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = UnsupportedLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnsupportedLang(s.into()))
    }
}

/// Error returned when parsing an unknown [`Lang`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("non-supported lang `{0}`, expected one of: java, go, abi")]
pub struct UnsupportedLang(pub String);
