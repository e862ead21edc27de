// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `plash` — drive the dashboard publishing runtime from the command line

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use plash_core::DisplayProfilePatch;
use plash_runtime::{ApiResponse, Config, Runtime};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plash", version, about = "Template-driven dashboard publishing runtime")]
struct Cli {
    /// JSON config file (falls back to PLASH_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scheduler in the foreground until interrupted
    Daemon,
    /// Template operations
    Template(TemplateArgs),
    /// Run a template immediately, bypassing its schedule
    Run {
        /// Template id
        id: String,
    },
    /// Recent run artifacts for a template
    Runs {
        /// Template id
        id: String,
        /// Number of artifacts to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
    /// Runtime status snapshot
    Status,
    /// Display profile operations
    Profile(ProfileArgs),
}

#[derive(Args)]
struct TemplateArgs {
    #[command(subcommand)]
    command: TemplateCommand,
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// List all templates
    List,
    /// Show one template
    Show { id: String },
    /// Create a template from a JSON file ('-' reads stdin)
    Create { file: PathBuf },
    /// Update an existing template from a JSON file ('-' reads stdin)
    Update { file: PathBuf },
    /// Delete a template (active pointer falls back to the first remaining)
    Delete { id: String },
    /// Copy a template under a new id
    Copy {
        src: String,
        dst: String,
        /// Name for the copy (default: "<source name> Copy")
        #[arg(long)]
        name: Option<String>,
        /// Make the copy the active template
        #[arg(long)]
        activate: bool,
    },
    /// Make a template the active one (does not trigger a run)
    Activate { id: String },
}

#[derive(Args)]
struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommand,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Partially update the display profile
    Set {
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        safe_top: Option<u32>,
        #[arg(long)]
        safe_bottom: Option<u32>,
        #[arg(long)]
        safe_side: Option<u32>,
        #[arg(long)]
        margin: Option<u32>,
    },
}

/// Print the uniform response envelope; nonzero exit on failure.
fn emit<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if !response.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn read_template_file(path: &PathBuf) -> Result<serde_json::Value> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    let runtime = Runtime::from_config(config)?;
    runtime.init()?;

    match cli.command {
        Command::Daemon => {
            runtime.start();
            tracing::info!("plash daemon running, ctrl-c to stop");
            tokio::signal::ctrl_c().await?;
            runtime.stop();
        }
        Command::Template(args) => match args.command {
            TemplateCommand::List => emit(&runtime.template_list())?,
            TemplateCommand::Show { id } => emit(&runtime.template_get(&id))?,
            TemplateCommand::Create { file } => {
                emit(&runtime.template_create(&read_template_file(&file)?).await)?
            }
            TemplateCommand::Update { file } => {
                emit(&runtime.template_update(&read_template_file(&file)?).await)?
            }
            TemplateCommand::Delete { id } => emit(&runtime.template_delete(&id).await)?,
            TemplateCommand::Copy { src, dst, name, activate } => {
                emit(&runtime.template_copy(&src, &dst, name.as_deref(), activate).await)?
            }
            TemplateCommand::Activate { id } => emit(&runtime.template_activate(&id).await)?,
        },
        Command::Run { id } => emit(&runtime.run_now(&id).await)?,
        Command::Runs { id, limit } => emit(&runtime.run_history(&id, limit))?,
        Command::Status => emit(&runtime.status())?,
        Command::Profile(args) => match args.command {
            ProfileCommand::Set { width, height, safe_top, safe_bottom, safe_side, margin } => {
                let patch = DisplayProfilePatch {
                    width_px: width,
                    height_px: height,
                    safe_top_px: safe_top,
                    safe_bottom_px: safe_bottom,
                    safe_side_px: safe_side,
                    layout_safety_margin_px: margin,
                };
                emit(&runtime.display_profile_set(&patch))?
            }
        },
    }
    Ok(())
}
