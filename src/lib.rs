//! Configure step and source scaffolding for the xyCppUtils C++ library.
//!
//! `xyconf configure` decides which optional libraries the C++ sources are
//! built with and writes a Makefile containing only the objects, tests and
//! binaries whose libraries are all enabled. `xyconf template` creates the
//! header/source/test triad for a new source name.
//!
//! Libraries, build items and makefile text blocks come from a toml catalog
//! compiled into the binary (`catalog/xycpputils.toml`). Set `XYCONF_CATALOG`
//! to the path of another catalog to use that one instead.
//!
//! # Examples
//! ```text
//! xyconf configure                      # default libraries enabled
//! xyconf configure --no-jpeg
//! xyconf configure --no-third-party --no-external --with-jpeg
//! xyconf configure --CC=clang --CXX=clang++ --CXXFLAGS="-stdlib=libstdc++" --use_tr1
//! xyconf template StringUtils
//! xyconf config default_cxx clang++
//! ```
//!
//! # Sample catalog
//! ```toml
//![project]
//!name = "xyCppUtils"
//!archive = "libxy.a"
//!namespace = "xyUtils"
//!macro_prefix = "XYUTILS"
//!
//![[libraries]]
//!name = "png"
//!tags = ["third_party"]
//!default = true
//!link_flags = "-lpng -lz"
//!recipe = """..."""
//!
//![[tests]]
//!name = "ImageTest"
//!deps = ["jpeg", "png"]
//!```

/// Commands behind the command line flags
pub mod bin_flags;
/// Handles global config
pub mod global_config;
/// Makefile text emitter
pub mod makefile;
/// Library selection from enable/disable directives
pub mod resolver;
/// Header/source/test scaffolding
pub mod template;
/// Contains logger, errors and the catalog
pub mod utils;
