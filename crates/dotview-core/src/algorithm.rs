//! Graphviz layout algorithms.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

/// Layout algorithm the engine uses to position nodes.
///
/// The names match the Graphviz `-K` layout flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    /// Hierarchical layout (default)
    #[default]
    Dot,
    /// Spring model layout
    Neato,
    /// Force-directed placement
    Fdp,
    /// Scalable force-directed placement for large graphs
    Sfdp,
    /// Radial layout
    Twopi,
    /// Circular layout
    Circo,
    /// Clustered array packing
    Osage,
    /// Squarified treemap
    Patchwork,
}

impl FromStr for Algorithm {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(Self::Dot),
            "neato" => Ok(Self::Neato),
            "fdp" => Ok(Self::Fdp),
            "sfdp" => Ok(Self::Sfdp),
            "twopi" => Ok(Self::Twopi),
            "circo" => Ok(Self::Circo),
            "osage" => Ok(Self::Osage),
            "patchwork" => Ok(Self::Patchwork),
            _ => Err("Unsupported layout algorithm"),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for &'static str {
    fn from(val: Algorithm) -> Self {
        match val {
            Algorithm::Dot => "dot",
            Algorithm::Neato => "neato",
            Algorithm::Fdp => "fdp",
            Algorithm::Sfdp => "sfdp",
            Algorithm::Twopi => "twopi",
            Algorithm::Circo => "circo",
            Algorithm::Osage => "osage",
            Algorithm::Patchwork => "patchwork",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
