use clap::{Arg, ArgAction, ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::{Path, PathBuf};
use xyconf::bin_flags::{self, ConfigureOptions};
use xyconf::global_config::GlobalConfig;
use xyconf::resolver::{Directive, Directives};
use xyconf::utils::{log, Catalog, Error, LogLevel, Result};

#[derive(Parser, Debug)]
#[command(name = "xyconf", version)]
#[command(about = "Configure and scaffold the xyCppUtils C++ library")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the Makefile for the selected libraries
    #[command(after_help = "Examples:\n  \
        xyconf configure\n  \
        xyconf configure --no-jpeg\n  \
        xyconf configure --no-third-party --no-external --with-jpeg\n  \
        xyconf configure --CC=clang --CXX=clang++ --CXXFLAGS=\"-stdlib=libstdc++\" --use_tr1")]
    Configure(ConfigureArgs),
    /// Create <NAME>.h, <NAME>.cc and <NAME>Test.cc from templates
    Template {
        /// Source name, e.g. StringUtils
        name: String,
        /// Directory the files are written to
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Set a per-user default: default_cc, default_cxx, default_cxxflags or author
    Config { parameter: String, value: String },
}

#[derive(Args, Debug)]
struct ConfigureArgs {
    /// C compiler
    #[arg(long = "CC")]
    cc: Option<String>,
    /// C++ compiler
    #[arg(long = "CXX")]
    cxx: Option<String>,
    /// Extra C++ flags
    #[arg(long = "CXXFLAGS", allow_hyphen_values = true)]
    cxxflags: Option<String>,
    /// Use std::tr1
    #[arg(long = "use_tr1")]
    use_tr1: bool,
    /// Build without any third-party library
    #[arg(long)]
    no_third_party: bool,
    /// Build without any external library
    #[arg(long)]
    no_external: bool,
    /// Path of the generated makefile
    #[arg(long, default_value = "Makefile")]
    output: PathBuf,
    /// Directory holding the sources and test scripts
    #[arg(long, default_value = ".")]
    source_dir: PathBuf,
}

// Library arg ids live apart from the derived field ids such as `no_external`.
fn with_id(lib: &str) -> String {
    format!("lib-with:{}", lib)
}

fn no_id(lib: &str) -> String {
    format!("lib-no:{}", lib)
}

/// Adds a `--with-<lib>`/`--no-<lib>` pair per catalog library
fn library_flags(cmd: clap::Command, catalog: &Catalog) -> clap::Command {
    catalog.libraries.iter().fold(cmd, |cmd, lib| {
        cmd.arg(
            Arg::new(with_id(&lib.name))
                .long(format!("with-{}", lib.name))
                .action(ArgAction::SetTrue)
                .conflicts_with(no_id(&lib.name))
                .help(format!("Build with '{}' library", lib.name)),
        )
        .arg(
            Arg::new(no_id(&lib.name))
                .long(format!("no-{}", lib.name))
                .action(ArgAction::SetTrue)
                .help(format!("Build without '{}' library", lib.name)),
        )
    })
}

fn directives(args: &ConfigureArgs, matches: &ArgMatches, catalog: &Catalog) -> Result<Directives> {
    let mut directives = Directives {
        no_third_party: args.no_third_party,
        no_external: args.no_external,
        ..Directives::default()
    };
    for lib in &catalog.libraries {
        if matches.get_flag(&with_id(&lib.name)) {
            directives.set(&lib.name, Directive::Enable)?;
        }
        if matches.get_flag(&no_id(&lib.name)) {
            directives.set(&lib.name, Directive::Disable)?;
        }
    }
    Ok(directives)
}

/// The built-in catalog, or the file named by `XYCONF_CATALOG`
fn load_catalog() -> Result<Catalog> {
    match std::env::var("XYCONF_CATALOG") {
        Ok(path) => {
            log(LogLevel::Info, &format!("Using catalog {}", path));
            Catalog::from_file(Path::new(&path))
        }
        Err(_) => Catalog::builtin(),
    }
}

fn fail(err: Error) -> ! {
    log(LogLevel::Error, &err.to_string());
    std::process::exit(1);
}

/// The first non-flag argument, i.e. the subcommand
fn requested_subcommand<I: IntoIterator<Item = String>>(args: I) -> Option<String> {
    args.into_iter().skip(1).find(|arg| !arg.starts_with('-'))
}

fn main() {
    // only `configure` needs the catalog before parsing, for its library flags
    let mut command = Cli::command();
    let mut configure_catalog = None;
    if requested_subcommand(std::env::args()).as_deref() == Some("configure") {
        let catalog = load_catalog().unwrap_or_else(|e| fail(e));
        command = command.mut_subcommand("configure", |sub| library_flags(sub, &catalog));
        configure_catalog = Some(catalog);
    }
    let matches = command.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let result = match cli.command {
        Commands::Configure(args) => {
            let (Some(catalog), Some(sub)) =
                (configure_catalog, matches.subcommand_matches("configure"))
            else {
                fail(Error::Argument("missing configure arguments".to_string()));
            };
            GlobalConfig::load().and_then(|global| {
                let options = ConfigureOptions {
                    directives: directives(&args, sub, &catalog)?,
                    compiler: global.compiler(args.cc, args.cxx, args.cxxflags, args.use_tr1),
                    output: args.output,
                    source_dir: args.source_dir,
                };
                bin_flags::configure(&catalog, &options).map(|_| ())
            })
        }
        Commands::Template { name, dir, force } => load_catalog().and_then(|catalog| {
            let global = GlobalConfig::load()?;
            bin_flags::new_sources(&catalog, &global, &name, &dir, force).map(|_| ())
        }),
        Commands::Config { parameter, value } => bin_flags::set_config(&parameter, &value),
    };
    if let Err(e) = result {
        fail(e);
    }
}
