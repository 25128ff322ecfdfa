use itertools::Itertools;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::error::{Error, Result};

static BUILTIN_CATALOG: &str = include_str!("../../catalog/xycpputils.toml");

/// Tag for libraries vendored and built under `ThirdParty/`.
pub const THIRD_PARTY: &str = "third_party";
/// Tag for libraries expected on the host system.
pub const EXTERNAL: &str = "external";

/// Names taken by the blanket `--no-third-party` and `--no-external` toggles.
const RESERVED_NAMES: [&str; 2] = ["third-party", "external"];

//Toml utils
/// Project wide settings of the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub archive: String,
    pub namespace: String,
    pub macro_prefix: String,
}

/// An optional library the C++ sources can be built with
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub default: bool,
    pub link_flags: Option<String>,
    pub recipe: Option<String>,
}

impl Library {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An object file, test or binary and the libraries it needs
#[derive(Debug, Clone, Deserialize)]
pub struct BuildItem {
    pub name: String,
    #[serde(default)]
    pub deps: Vec<String>,
}

impl BuildItem {
    /// True when none of the item's dependencies is disabled
    pub fn is_satisfied(&self, disabled: &BTreeSet<String>) -> bool {
        !self.deps.iter().any(|dep| disabled.contains(dep))
    }
}

/// Static makefile text blocks, parameterized with `{placeholder}`s
#[derive(Debug, Clone, Deserialize)]
pub struct Templates {
    pub head: String,
    pub config: String,
    pub build: String,
    pub cscope: String,
    pub clean: String,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    project: ProjectConfig,
    libraries: Vec<Library>,
    #[serde(default)]
    objects: Vec<BuildItem>,
    #[serde(default)]
    tests: Vec<BuildItem>,
    #[serde(default)]
    bins: Vec<BuildItem>,
    templates: Templates,
}

/// Everything the generator knows about the C++ project
#[derive(Debug, Clone)]
pub struct Catalog {
    pub project: ProjectConfig,
    /// Libraries in declaration order
    pub libraries: Vec<Library>,
    pub objects: Vec<BuildItem>,
    pub tests: Vec<BuildItem>,
    pub bins: Vec<BuildItem>,
    pub templates: Templates,
    index: BTreeMap<String, usize>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Catalog::parse(BUILTIN_CATALOG)
    }

    /// Reads and validates a catalog file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::io("could not read", path, e))?;
        Catalog::parse(&contents)
    }

    /// Parses and validates a catalog document
    pub fn parse(contents: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(contents).map_err(|source| Error::Parse {
            what: "catalog".to_string(),
            source,
        })?;
        let mut index = BTreeMap::new();
        for (i, lib) in raw.libraries.iter().enumerate() {
            if index.insert(lib.name.clone(), i).is_some() {
                return Err(Error::Configuration(format!(
                    "duplicate library name: {}",
                    lib.name
                )));
            }
        }
        let catalog = Catalog {
            project: raw.project,
            libraries: raw.libraries,
            objects: raw.objects,
            tests: raw.tests,
            bins: raw.bins,
            templates: raw.templates,
            index,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks names, tags and that every build item only references known libraries
    pub fn validate(&self) -> Result<()> {
        for lib in &self.libraries {
            let flag_safe = lib
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if lib.name.is_empty() || !flag_safe {
                return Err(Error::Configuration(format!(
                    "invalid library name: {:?}",
                    lib.name
                )));
            }
            if RESERVED_NAMES.contains(&lib.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "library name {} clashes with the --no-{} toggle",
                    lib.name, lib.name
                )));
            }
            if let Some(tag) = lib.tags.iter().find(|t| *t != THIRD_PARTY && *t != EXTERNAL) {
                return Err(Error::Configuration(format!(
                    "library {} has unknown tag {}",
                    lib.name, tag
                )));
            }
        }

        let items = self
            .objects
            .iter()
            .chain(self.tests.iter())
            .chain(self.bins.iter());
        for item in items {
            if let Some(dep) = item.deps.iter().find(|d| !self.index.contains_key(*d)) {
                return Err(Error::Configuration(format!(
                    "{} depends on unknown library {}",
                    item.name, dep
                )));
            }
        }

        let duplicates = self
            .tests
            .iter()
            .chain(self.bins.iter())
            .map(|item| &item.name)
            .duplicates()
            .join(", ");
        if !duplicates.is_empty() {
            return Err(Error::Configuration(format!(
                "duplicate test or binary names: {}",
                duplicates
            )));
        }
        Ok(())
    }

    pub fn library(&self, name: &str) -> Option<&Library> {
        self.index.get(name).map(|&i| &self.libraries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The full library catalog
    pub fn library_names(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    fn tagged(&self, tag: &str) -> BTreeSet<String> {
        self.libraries
            .iter()
            .filter(|lib| lib.has_tag(tag))
            .map(|lib| lib.name.clone())
            .collect()
    }

    pub fn third_party(&self) -> BTreeSet<String> {
        self.tagged(THIRD_PARTY)
    }

    pub fn external(&self) -> BTreeSet<String> {
        self.tagged(EXTERNAL)
    }

    /// Libraries enabled when no directive says otherwise
    pub fn default_enabled(&self) -> BTreeSet<String> {
        self.libraries
            .iter()
            .filter(|lib| lib.default)
            .map(|lib| lib.name.clone())
            .collect()
    }

    /// Fetch and build recipe of an enabled library. A missing entry means the
    /// catalog is incomplete.
    pub fn recipe(&self, name: &str) -> Result<&str> {
        self.library(name)
            .and_then(|lib| lib.recipe.as_deref())
            .ok_or_else(|| Error::Configuration(format!("no recipe for library {}", name)))
    }

    /// Value of the `LIB<name>` make variable, if the library links anything
    pub fn link_flags(&self, name: &str) -> Option<&str> {
        self.library(name).and_then(|lib| lib.link_flags.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[project]
name = "demo"
archive = "libdemo.a"
namespace = "demo"
macro_prefix = "DEMO"

[[libraries]]
name = "zlib"
tags = ["external"]
default = true

[[tests]]
name = "ZTest"
deps = ["zlib"]

[templates]
head = ""
config = ""
build = ""
cscope = ""
clean = ""
"#;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.project.archive, "libxy.a");
        assert_eq!(
            catalog.library_names().into_iter().collect::<Vec<_>>(),
            vec!["eigen", "jpeg", "png", "sdl"]
        );
        assert_eq!(
            catalog.default_enabled().into_iter().collect::<Vec<_>>(),
            vec!["eigen", "jpeg", "png"]
        );
        assert!(catalog.external().contains("sdl"));
        assert!(catalog.third_party().is_superset(&catalog.default_enabled()));
        for lib in &catalog.libraries {
            assert!(catalog.recipe(&lib.name).is_ok(), "{} lacks a recipe", lib.name);
        }
    }

    #[test]
    fn builtin_recipes_keep_make_tabs() {
        let catalog = Catalog::builtin().unwrap();
        let recipe = catalog.recipe("jpeg").unwrap();
        assert!(recipe.contains("\n\ttouch $@\n"));
        assert!(catalog.templates.build.contains("\t$(AR) $@ $^"));
    }

    #[test]
    fn minimal_catalog_parses() {
        let catalog = Catalog::parse(MINIMAL).unwrap();
        assert!(catalog.contains("zlib"));
        assert_eq!(catalog.link_flags("zlib"), None);
        assert!(matches!(
            catalog.recipe("zlib"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let doc = MINIMAL.replace("deps = [\"zlib\"]", "deps = [\"zlib\", \"boost\"]");
        let err = Catalog::parse(&doc).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("boost")));
    }

    #[test]
    fn reserved_library_name_is_rejected() {
        let doc = MINIMAL.replace("name = \"zlib\"", "name = \"external\"");
        assert!(matches!(
            Catalog::parse(&doc),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn library_names_must_be_flag_safe() {
        for name in ["c++", "lib png", "png=1", ""] {
            let doc = MINIMAL
                .replace("name = \"zlib\"", &format!("name = {:?}", name))
                .replace("deps = [\"zlib\"]", "deps = []");
            assert!(
                matches!(Catalog::parse(&doc), Err(Error::Configuration(_))),
                "{:?} accepted",
                name
            );
        }
    }

    #[test]
    fn underscored_toggle_names_are_plain_libraries() {
        let doc = MINIMAL
            .replace("name = \"zlib\"", "name = \"third_party\"")
            .replace("deps = [\"zlib\"]", "deps = [\"third_party\"]");
        let catalog = Catalog::parse(&doc).unwrap();
        assert!(catalog.contains("third_party"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let doc = MINIMAL.replace("tags = [\"external\"]", "tags = [\"vendored\"]");
        assert!(matches!(
            Catalog::parse(&doc),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(matches!(
            Catalog::parse("[project"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn satisfied_items_have_no_disabled_dependency() {
        let item = BuildItem {
            name: "ImageTest".to_string(),
            deps: vec!["jpeg".to_string(), "png".to_string()],
        };
        let mut disabled = BTreeSet::new();
        assert!(item.is_satisfied(&disabled));
        disabled.insert("png".to_string());
        assert!(!item.is_satisfied(&disabled));
    }
}
