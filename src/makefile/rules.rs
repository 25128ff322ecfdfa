use crate::utils::BuildItem;
use itertools::Itertools;

static LINK_COMMAND: &str =
    "\t$(CXX) $(CXXFLAGS) $(DEPSFLAGS) $(DEFS) $(INCLUDES) $< -o $@ $(LIBPATH) $(LIBS)";

/// Make target that stands for a built third-party library
pub fn third_party_target(lib: &str) -> String {
    format!("$(DEPSDIR)/ThirdParty_{}", lib)
}

/// Space separated `<prefix><lib>` names, e.g. `test_ThirdParty_png`
pub fn prefixed<'a, I>(prefix: &str, libs: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    libs.into_iter().map(|lib| format!("{}{}", prefix, lib)).join(" ")
}

fn link_line(item: &BuildItem) -> String {
    let mut cmd = String::from(LINK_COMMAND);
    for lib in &item.deps {
        cmd.push_str(" $(LIB");
        cmd.push_str(lib);
        cmd.push(')');
    }
    cmd
}

/// Rule for a unit test: its source, the archive and every third-party
/// library it declares are prerequisites
pub fn test_rule(test: &BuildItem) -> String {
    let deps = test.deps.iter().map(|lib| third_party_target(lib)).join(" ");
    format!(
        "{name}: {name}.cc $(LIBxy) {deps}\n{cmd}\n\n",
        name = test.name,
        deps = deps,
        cmd = link_line(test)
    )
}

/// Rule for a binary. Only the archive is a prerequisite.
pub fn bin_rule(bin: &BuildItem) -> String {
    format!(
        "{name}: {name}.cc $(LIBxy)\n{cmd}\n\n",
        name = bin.name,
        cmd = link_line(bin)
    )
}

/// Run line of a test: the companion python script when there is one,
/// otherwise the test binary itself
pub fn run_line(test: &str, has_script: bool) -> String {
    if has_script {
        format!("\tpython {}.py\n", test)
    } else {
        format!("\t./{}\n", test)
    }
}
