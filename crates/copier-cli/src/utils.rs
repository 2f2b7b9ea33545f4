use anyhow::{bail, Context, Result};
use copier_codegen::{Config, Diagnostics, Output, Severity};
use std::fs;
use std::path::Path;

/// Reads and parses `path`, then runs one generation pass over it.
pub(crate) fn load(path: &Path, config: &Config) -> Result<Output> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    copier_codegen::generate_file(&source, config).map_err(|err| {
        let start = err.span().start();
        anyhow::anyhow!(
            "{}:{}:{}: {err}",
            path.display(),
            start.line,
            start.column + 1
        )
    })
}

/// Logs every diagnostic with its location. Fails when an error was reported,
/// or a warning with `deny_warnings` set.
pub(crate) fn report(path: &Path, diagnostics: &Diagnostics, deny_warnings: bool) -> Result<()> {
    for diagnostic in diagnostics {
        let start = diagnostic.span.start();
        let location = format!("{}:{}:{}", path.display(), start.line, start.column + 1);

        match diagnostic.severity {
            Severity::Warning => tracing::warn!("{location}: {diagnostic}"),
            Severity::Error => tracing::error!("{location}: {diagnostic}"),
        }
    }

    let errors = diagnostics.errors().count();
    let warnings = diagnostics.warnings().count();

    if errors > 0 {
        bail!("{} reported {errors} error(s)", path.display());
    }

    if deny_warnings && warnings > 0 {
        bail!(
            "{} reported {warnings} warning(s) with --deny-warnings",
            path.display()
        );
    }

    Ok(())
}

pub(crate) fn rustfmt(source: String) -> Result<String> {
    use std::io;
    use std::io::prelude::*;
    use std::process::{Command, Stdio};

    let mut child = Command::new("rustfmt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .args(["--emit", "stdout", "--edition", "2021"])
        .spawn()
        .context("failed to run `rustfmt`; pass --no-fmt to skip formatting")?;
    let mut child_stdin = child.stdin.take().context("`rustfmt` stdin is not piped")?;
    let mut child_stdout = child.stdout.take().context("`rustfmt` stdout is not piped")?;

    // Spawn a thread to write to stdin
    let th = std::thread::spawn(move || child_stdin.write_all(source.as_bytes()));

    let mut fmted = vec![];
    io::copy(&mut child_stdout, &mut fmted)?;

    let status = child.wait()?;
    match th.join() {
        Ok(written) => written.context("failed to feed `rustfmt`")?,
        Err(_) => bail!("thread feeding `rustfmt` panicked"),
    }

    match status.code() {
        Some(0) => {}
        Some(2) => bail!("rustfmt parsing errors"),
        Some(3) => bail!("rustfmt failed to format"),
        _ => bail!("rustfmt exited with {status}"),
    }

    Ok(String::from_utf8(fmted)?)
}
