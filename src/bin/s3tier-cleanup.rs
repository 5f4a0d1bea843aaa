use colored::Colorize;
use s3tier::cli::{
    Program,
    actions::{self, error_tag, exit_code},
    start,
};
use std::process;

#[tokio::main]
async fn main() {
    let rs = match start(Program::Cleanup).await {
        Ok((s3, action)) => actions::handle(&s3, action).await,
        Err(e) => Err(e),
    };

    if let Err(e) = rs {
        eprintln!("{} {e:#}", error_tag(&e).red());
        process::exit(exit_code(&e));
    }
}
