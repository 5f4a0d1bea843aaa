use crate::cli::{
    actions::{Action, FileNotFound},
    start::Program,
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

// return Action based on the program, the upload file must exist before any
// request is made
pub fn dispatch(program: Program, matches: &ArgMatches) -> Result<Action> {
    match program {
        Program::Provision => {
            let file = matches
                .get_one::<PathBuf>("file")
                .cloned()
                .context("file argument missing")?;

            if !file.is_file() {
                return Err(FileNotFound(file).into());
            }

            log::info!("file: {}", file.display());

            Ok(Action::Provision { file })
        }

        Program::Cleanup => Ok(Action::Teardown),
    }
}
