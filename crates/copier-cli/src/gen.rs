use crate::utils;

use anyhow::{Context, Result};
use clap::Parser;
use copier_codegen::{Config, Output};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct GenCommand {
    /// Rust source file declaring the records
    input: PathBuf,

    /// Where to write the generated file; stdout when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Path of the `copier` runtime crate as seen from the generated code
    #[clap(long, default_value = "::copier")]
    crate_path: String,

    /// Fail when any warning is reported
    #[clap(long)]
    deny_warnings: bool,

    /// Write the generated code without running `rustfmt`
    #[clap(long)]
    no_fmt: bool,
}

impl GenCommand {
    pub(crate) fn exec(self) -> Result<()> {
        let crate_path: syn::Path = syn::parse_str(&self.crate_path)
            .with_context(|| format!("invalid crate path `{}`", self.crate_path))?;
        let config = Config::default().with_crate_path(crate_path);

        let output = utils::load(&self.input, &config)?;
        utils::report(&self.input, &output.diagnostics, self.deny_warnings)?;

        let projections = output.projections.len();
        let mut source = render(output);

        if !self.no_fmt {
            source = utils::rustfmt(source)?;
        }

        match &self.output {
            Some(path) => {
                tracing::info!(output = %path.display(), projections, "writing");
                fs::write(path, source)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            None => print!("{source}"),
        }

        Ok(())
    }
}

fn render(output: Output) -> String {
    let tokens = output.into_token_stream();
    format!("// @generated by copier; do not edit\n\n{tokens}\n")
}
