//! High-level package model projected from attribute trees.
//!
//! The attribute model is faithful to the wire format but awkward for consumers that
//! just want to know what a package is. This module provides the projected shape - a
//! [`Pkg`] with its name, vendor, version, architecture and descriptive fields - and
//! the [`factory::create_package`] projection that builds one from a `package`
//! attribute subtree.

pub mod factory;

use std::fmt;

use strum::{EnumCount, FromRepr};

/// Machine architectures a package can target, by protocol code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumCount, FromRepr)]
#[repr(u8)]
pub enum PkgArchitecture {
    Any = 0,
    X86 = 1,
    X86Gcc2 = 2,
    Source = 3,
    X86_64 = 4,
    Ppc = 5,
    Arm = 6,
    M68k = 7,
    Sparc = 8,
    Arm64 = 9,
    RiscV64 = 10,
}

/// The role a URL plays for a package.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PkgUrlType {
    HomePage,
}

/// A URL attached to a package, tagged with its role.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PkgUrl {
    pub url: String,
    pub url_type: PkgUrlType,
}

impl PkgUrl {
    #[must_use]
    pub fn new(url: String, url_type: PkgUrlType) -> PkgUrl {
        PkgUrl { url, url_type }
    }
}

/// A package version: a required major component and optional refinements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PkgVersion {
    pub major: String,
    pub minor: Option<String>,
    pub micro: Option<String>,
    pub pre_release: Option<String>,
    pub revision: Option<i64>,
}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = &self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(micro) = &self.micro {
            write!(f, ".{micro}")?;
        }
        if let Some(pre_release) = &self.pre_release {
            write!(f, "~{pre_release}")?;
        }
        if let Some(revision) = self.revision {
            write!(f, "-{revision}")?;
        }
        Ok(())
    }
}

/// A package projected out of a `package` attribute subtree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pkg {
    pub name: String,
    pub vendor: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub home_page_url: Option<PkgUrl>,
    pub architecture: PkgArchitecture,
    pub version: PkgVersion,
    pub copyrights: Vec<String>,
    pub licenses: Vec<String>,
}
