//! Scaffolding for a new header/source/test triad of the C++ library.
use crate::utils::{log, Error, LogLevel, ProjectConfig, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

static TEST_BODY: &str = r#"
#include "LogAndCheck.h"
#include "Timer.h"

using namespace {namespace};

int main()  {
  Timer timer;
  LOG(INFO) << "Test on ...";

  LOG(INFO) << "Passed. [" << timer.elapsed() << " seconds]";
  return 0;
}"#;

/// The three generated files of one source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub header: String,
    pub source: String,
    pub test: String,
}

/// Header guard for `name`, split at every uppercase letter.
/// `StringUtils` with prefix `XYUTILS` gives `__XYUTILS_STRING_UTILS_H__`.
pub fn header_macro(name: &str, prefix: &str) -> String {
    let mut text = format!("__{}_", prefix);
    let mut word = String::new();
    for c in name.chars() {
        if c.is_uppercase() && !word.is_empty() {
            text.push_str(&word.to_uppercase());
            text.push('_');
            word.clear();
        }
        word.push(c);
    }
    if !word.is_empty() {
        text.push_str(&word.to_uppercase());
        text.push('_');
    }
    text.push_str("H__");
    text
}

fn banner(author: &str, date: &str) -> String {
    format!(
        "/**\n  * Description.\n  *\n  * Author: {}.\n  * Created: {}.\n  */\n\n",
        author, date
    )
}

/// Renders the header, source and test file contents
pub fn render(name: &str, author: &str, date: &str, project: &ProjectConfig) -> SourceSet {
    let top = banner(author, date);
    let guard = header_macro(name, &project.macro_prefix);
    let namespace = format!(
        "namespace {ns}  {{\n}}   // namespace {ns}",
        ns = project.namespace
    );

    let header = format!(
        "{top}#ifndef {guard}\n#define {guard}\n\n{namespace}\n\n#endif   // {guard}",
        top = top,
        guard = guard,
        namespace = namespace
    );
    let source = format!("{}#include \"{}.h\"\n\n{}", top, name, namespace);
    let test = format!(
        "{}#include \"{}.h\"\n{}",
        top,
        name,
        TEST_BODY.replace("{namespace}", &project.namespace)
    );
    SourceSet {
        header,
        source,
        test,
    }
}

fn validate_name(name: &str) -> Result<()> {
    let valid = name.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Argument(format!("invalid source name: {:?}", name)))
    }
}

/// Writes `<name>.h`, `<name>.cc` and `<name>Test.cc` into `dir`.
/// Existing files are left alone unless `force` is set.
pub fn generate(
    dir: &Path,
    name: &str,
    author: &str,
    date: &str,
    project: &ProjectConfig,
    force: bool,
) -> Result<Vec<PathBuf>> {
    validate_name(name)?;
    let set = render(name, author, date, project);
    let files = [
        (dir.join(format!("{}.h", name)), set.header),
        (dir.join(format!("{}.cc", name)), set.source),
        (dir.join(format!("{}Test.cc", name)), set.test),
    ];
    if !force {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            return Err(Error::Argument(format!(
                "{} already exists, pass --force to overwrite",
                path.display()
            )));
        }
    }

    let mut written = Vec::new();
    for (path, contents) in files {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::io("could not create", &path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| Error::io("could not write", &path, e))?;
        log(LogLevel::Log, &format!("Created {}", path.display()));
        written.push(path);
    }
    Ok(written)
}

/// Creation date in the banner format, e.g. `Aug 23, 2012`
pub fn today() -> String {
    chrono::Local::now().format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectConfig {
        ProjectConfig {
            name: "xyCppUtils".to_string(),
            archive: "libxy.a".to_string(),
            namespace: "xyUtils".to_string(),
            macro_prefix: "XYUTILS".to_string(),
        }
    }

    #[test]
    fn header_macros() {
        assert_eq!(header_macro("StringUtils", "XYUTILS"), "__XYUTILS_STRING_UTILS_H__");
        assert_eq!(header_macro("Timer", "XYUTILS"), "__XYUTILS_TIMER_H__");
        assert_eq!(header_macro("SDLViewer", "XYUTILS"), "__XYUTILS_S_D_L_VIEWER_H__");
        assert_eq!(header_macro("foo", "XY"), "__XY_FOO_H__");
    }

    #[test]
    fn rendered_files() {
        let set = render("PlyIO", "Ying Xiong", "Aug 23, 2012", &project());
        assert!(set.header.starts_with("/**\n  * Description.\n"));
        assert!(set.header.contains("  * Created: Aug 23, 2012.\n"));
        assert!(set.header.contains("#ifndef __XYUTILS_PLY_I_O_H__\n#define __XYUTILS_PLY_I_O_H__\n"));
        assert!(set.header.ends_with("#endif   // __XYUTILS_PLY_I_O_H__"));
        assert!(set.source.contains("#include \"PlyIO.h\"\n\nnamespace xyUtils  {\n}   // namespace xyUtils"));
        assert!(set.test.contains("#include \"PlyIO.h\"\n\n#include \"LogAndCheck.h\""));
        assert!(set.test.contains("using namespace xyUtils;"));
        assert!(set.test.ends_with("return 0;\n}"));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate(dir.path(), "Widget", "me", "Jan 01, 2020", &project(), false).unwrap();
        assert_eq!(written.len(), 3);
        assert!(dir.path().join("WidgetTest.cc").is_file());

        let err = generate(dir.path(), "Widget", "me", "Jan 02, 2020", &project(), false);
        assert!(err.is_err());
        let header = std::fs::read_to_string(dir.path().join("Widget.h")).unwrap();
        assert!(header.contains("Jan 01, 2020"));

        generate(dir.path(), "Widget", "me", "Jan 02, 2020", &project(), true).unwrap();
        let header = std::fs::read_to_string(dir.path().join("Widget.h")).unwrap();
        assert!(header.contains("Jan 02, 2020"));
    }

    #[test]
    fn rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(generate(dir.path(), "../Evil", "me", "d", &project(), false).is_err());
        assert!(generate(dir.path(), "", "me", "d", &project(), false).is_err());
    }
}
