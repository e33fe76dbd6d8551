mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use email_learning_admin::{
    api::HttpApi, config::Config, context::AppContext, logging, storage::Storage,
};

use crate::cli::Command;

/// Administration client for the email learning platform.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Config file, defaults to `$XDG_CONFIG_HOME/email-learning-admin/config.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Answer confirmation dialogs with yes
    #[arg(short, long, global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.command.page().map(|page| page.label()));

    let config = Config::load_from_file(args.config.as_deref())?;
    let statedir = config.statedir()?;
    debug!("using state directory {}", statedir.display());
    let storage = Storage::open(&statedir)?;
    config.seed(&storage)?;
    let context = AppContext::load(&storage, config.cookies()?)?;
    let api = HttpApi::new(context.clone());

    cli::run(&args, &context, &storage, &api).await
}
