//! Renders the makefile from the resolved library selection and the catalog.
use crate::resolver::Selection;
use crate::utils::{log, BuildItem, Catalog, Error, LogLevel, Result};
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Rule text for tests and binaries
pub mod rules;

use rules::{bin_rule, prefixed, run_line, test_rule, third_party_target};

static BANNER: &str =
    "################################################################################\n";

static THIRD_PARTY_PATHS: &str = "\
ThirdPartyIncPath = $(shell mkdir -p ThirdParty/include; echo `pwd`/ThirdParty/include)
INCLUDES += -I$(ThirdPartyIncPath)
ThirdPartyLibPath = $(shell mkdir -p ThirdParty/lib; echo `pwd`/ThirdParty/lib)
LIBPATH += -L$(ThirdPartyLibPath)

";

/// Compiler settings written to the configuration section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub cc: String,
    pub cxx: String,
    pub cxxflags: String,
    /// Build against `std::tr1` instead of the C++11 standard library
    pub use_tr1: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            cc: "gcc".to_string(),
            cxx: "g++".to_string(),
            cxxflags: String::new(),
            use_tr1: false,
        }
    }
}

/// Names of the tests that come with a `<name>.py` runner script
pub type ScriptTests = BTreeSet<String>;

/// Looks up `<test>.py` in `source_dir` for every test in the catalog
pub fn script_tests(source_dir: &Path, tests: &[BuildItem]) -> ScriptTests {
    tests
        .iter()
        .filter(|test| source_dir.join(format!("{}.py", test.name)).is_file())
        .map(|test| test.name.clone())
        .collect()
}

fn section_header(out: &mut String, title: &str) {
    out.push_str(BANNER);
    out.push_str(&format!("# {}.\n", title));
    out.push_str(BANNER);
}

fn filtered<'a>(items: &'a [BuildItem], disabled: &BTreeSet<String>) -> Vec<&'a BuildItem> {
    items
        .iter()
        .filter(|item| item.is_satisfied(disabled))
        .collect()
}

fn names(items: &[&BuildItem]) -> String {
    items.iter().map(|item| &item.name).join(" ")
}

fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (key, value) in values {
        text = text.replace(&format!("{{{}}}", key), value);
    }
    text
}

/// Renders the whole makefile. Nothing is written, so a configuration error
/// never leaves a half-generated file behind.
pub fn render(
    selection: &Selection,
    catalog: &Catalog,
    compiler: &CompilerConfig,
    script_tests: &ScriptTests,
) -> Result<String> {
    let enabled = &selection.enabled;
    let objs = filtered(&catalog.objects, &selection.disabled);
    let tests = filtered(&catalog.tests, &selection.disabled);
    let bins = filtered(&catalog.bins, &selection.disabled);
    log(
        LogLevel::Info,
        &format!(
            "{} objects, {} tests, {} binaries selected",
            objs.len(),
            tests.len(),
            bins.len()
        ),
    );

    let mut out = String::new();
    out.push_str(&catalog.templates.head);
    out.push('\n');

    section_header(&mut out, "Targets");
    out.push_str(&format!("LIBxy = {}\n", catalog.project.archive));
    out.push_str(&format!("OBJS = {}\n", names(&objs)));
    out.push_str(&format!("TESTS = {}\n", names(&tests)));
    out.push_str(&format!("BINS = {}\n", names(&bins)));
    out.push('\n');

    section_header(&mut out, "Configurations");
    let defs = if compiler.use_tr1 { "-D__USE_TR1__" } else { "" };
    out.push_str(&fill(
        &catalog.templates.config,
        &[
            ("cc", compiler.cc.as_str()),
            ("cxx", compiler.cxx.as_str()),
            ("cxxflags", compiler.cxxflags.as_str()),
            ("defs", defs),
        ],
    ));
    out.push_str("\n# More libraries.\n");
    if !enabled.is_disjoint(&catalog.third_party()) {
        out.push_str(THIRD_PARTY_PATHS);
    }
    for lib in &catalog.libraries {
        if !selection.is_enabled(&lib.name) {
            continue;
        }
        if let Some(flags) = catalog.link_flags(&lib.name) {
            out.push_str(&format!("LIB{} = {}\n", lib.name, flags));
        }
    }
    out.push('\n');

    section_header(&mut out, "Object files and the xy-library");
    let cc_deps = enabled.iter().map(|lib| third_party_target(lib)).join(" ");
    out.push_str(&fill(&catalog.templates.build, &[("cc_deps", cc_deps.as_str())]));
    out.push('\n');

    section_header(&mut out, "Test files");
    for test in &tests {
        out.push_str(&test_rule(test));
    }
    out.push('\n');

    section_header(&mut out, "Binary files");
    for bin in &bins {
        out.push_str(&bin_rule(bin));
    }
    out.push('\n');

    section_header(&mut out, "Third party code");
    for lib in enabled {
        let recipe = catalog.recipe(lib)?;
        log(LogLevel::Debug, &format!("Recipe for {}", lib));
        out.push_str(recipe);
        out.push('\n');
    }

    section_header(&mut out, "Unit tests");
    out.push_str("test: $(TESTS)\n");
    for test in &tests {
        out.push_str(&run_line(&test.name, script_tests.contains(&test.name)));
    }
    let test_third_party = prefixed("test_ThirdParty_", enabled);
    out.push_str(&format!("\nfulltest: test {}\n\n", test_third_party));

    section_header(&mut out, "Cscope");
    out.push_str(&catalog.templates.cscope);
    out.push('\n');

    section_header(&mut out, "Clean up");
    let clean_third_party = prefixed("clean_ThirdParty_", enabled);
    let phony_third_party = [clean_third_party.as_str(), test_third_party.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .join(" ");
    out.push_str(&fill(
        &catalog.templates.clean,
        &[
            ("clean_third_party", clean_third_party.as_str()),
            ("phony_third_party", phony_third_party.as_str()),
        ],
    ));
    out.push('\n');

    Ok(out)
}

/// Renders the makefile into `out`
pub fn emit<W: Write>(
    out: &mut W,
    selection: &Selection,
    catalog: &Catalog,
    compiler: &CompilerConfig,
    script_tests: &ScriptTests,
) -> Result<()> {
    let text = render(selection, catalog, compiler, script_tests)?;
    out.write_all(text.as_bytes())
        .map_err(|e| Error::io("could not write", "makefile", e))
}

/// Creates or truncates `path` and writes `text` to it
pub fn write_makefile(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| Error::io("could not create", path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::io("could not write", path, e))?;
    file.flush().map_err(|e| Error::io("could not write", path, e))
}
