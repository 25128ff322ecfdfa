//! Turns enable/disable directives into the final enabled and disabled library sets.
use crate::utils::{log, Catalog, Error, LogLevel, Result};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

/// A per-library override given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Enable,
    Disable,
}

/// The resolved user intent. A library missing from `per_library` is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub per_library: BTreeMap<String, Directive>,
    pub no_third_party: bool,
    pub no_external: bool,
}

impl Directives {
    /// Builds the directive record from `--with-<lib>` and `--no-<lib>` lists.
    /// Naming a library in both lists is an argument error.
    pub fn from_flags<W, N>(with: W, without: N, no_third_party: bool, no_external: bool) -> Result<Self>
    where
        W: IntoIterator,
        W::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut per_library = BTreeMap::new();
        for lib in with {
            per_library.insert(lib.into(), Directive::Enable);
        }
        for lib in without {
            let lib = lib.into();
            if per_library.get(&lib) == Some(&Directive::Enable) {
                return Err(Error::Argument(format!(
                    "--with-{} and --no-{} are mutually exclusive",
                    lib, lib
                )));
            }
            per_library.insert(lib, Directive::Disable);
        }
        Ok(Directives {
            per_library,
            no_third_party,
            no_external,
        })
    }

    pub fn set(&mut self, lib: &str, directive: Directive) -> Result<()> {
        match self.per_library.get(lib) {
            Some(existing) if *existing != directive => Err(Error::Argument(format!(
                "conflicting directives for library {}",
                lib
            ))),
            _ => {
                self.per_library.insert(lib.to_string(), directive);
                Ok(())
            }
        }
    }
}

/// Enabled and disabled libraries. Together they partition the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub enabled: BTreeSet<String>,
    pub disabled: BTreeSet<String>,
}

impl Selection {
    pub fn is_enabled(&self, lib: &str) -> bool {
        self.enabled.contains(lib)
    }
}

/// Applies the directives to the catalog defaults.
/// Blanket toggles go first, per-library directives override them.
pub fn resolve(directives: &Directives, catalog: &Catalog) -> Result<Selection> {
    if let Some(unknown) = directives
        .per_library
        .keys()
        .find(|lib| !catalog.contains(lib))
    {
        return Err(Error::Argument(format!("unknown library: {}", unknown)));
    }

    let all = catalog.library_names();
    let mut enabled = catalog.default_enabled();
    if directives.no_third_party {
        enabled = &enabled - &catalog.third_party();
    }
    if directives.no_external {
        enabled = &enabled - &catalog.external();
    }
    for lib in &all {
        match directives.per_library.get(lib) {
            Some(Directive::Disable) => {
                enabled.remove(lib);
            }
            Some(Directive::Enable) => {
                enabled.insert(lib.clone());
            }
            None => {}
        }
    }
    let disabled = &all - &enabled;

    log(
        LogLevel::Log,
        &format!(
            "Generating makefile with\n  enabled libraries {{{}}};\n  disabled libraries {{{}}}.",
            enabled.iter().join(", "),
            disabled.iter().join(", ")
        ),
    );
    Ok(Selection { enabled, disabled })
}
