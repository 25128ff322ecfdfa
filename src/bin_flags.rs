use crate::global_config::{config_path, GlobalConfig};
use crate::makefile::{self, CompilerConfig};
use crate::resolver::{resolve, Directives, Selection};
use crate::template;
use crate::utils::{log, Catalog, Error, LogLevel, Result};
use std::path::{Path, PathBuf};

/// Inputs of one configure run
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    pub directives: Directives,
    pub compiler: CompilerConfig,
    /// Where the makefile is written
    pub output: PathBuf,
    /// Directory searched for `<test>.py` runner scripts
    pub source_dir: PathBuf,
}

///Resolves the library selection and writes the makefile
/// # Arguments
/// * `catalog` - The libraries and build items
/// * `options` - Directives, compiler settings and paths
pub fn configure(catalog: &Catalog, options: &ConfigureOptions) -> Result<Selection> {
    let selection = resolve(&options.directives, catalog)?;
    let scripts = makefile::script_tests(&options.source_dir, &catalog.tests);
    let text = makefile::render(&selection, catalog, &options.compiler, &scripts)?;

    log(
        LogLevel::Info,
        &format!("Writing {}", options.output.display()),
    );
    makefile::write_makefile(&options.output, &text)?;
    log(LogLevel::Log, "Done.");
    Ok(selection)
}

///Generates `<name>.h`, `<name>.cc` and `<name>Test.cc`
pub fn new_sources(
    catalog: &Catalog,
    global: &GlobalConfig,
    name: &str,
    dir: &Path,
    force: bool,
) -> Result<Vec<PathBuf>> {
    template::generate(
        dir,
        name,
        &global.get_author(),
        &template::today(),
        &catalog.project,
        force,
    )
}

///Updates one key of the user config
pub fn set_config(parameter: &str, value: &str) -> Result<()> {
    let path = config_path().ok_or_else(|| {
        Error::Configuration("no config directory on this platform".to_string())
    })?;
    log(LogLevel::Debug, &format!("Config file: {}", path.display()));
    GlobalConfig::set_defaults(&path, parameter, value)
}
