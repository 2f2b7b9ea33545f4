use crate::utils;

use anyhow::Result;
use clap::Parser;
use copier_codegen::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Rust source file declaring the records
    input: PathBuf,

    /// Fail when any warning is reported
    #[clap(long)]
    deny_warnings: bool,
}

impl CheckCommand {
    pub(crate) fn exec(self) -> Result<()> {
        let output = utils::load(&self.input, &Config::default())?;
        utils::report(&self.input, &output.diagnostics, self.deny_warnings)?;

        tracing::info!(
            input = %self.input.display(),
            projections = output.projections.len(),
            "ok"
        );

        Ok(())
    }
}
