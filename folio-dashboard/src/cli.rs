use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "folio-dashboard")]
#[command(about = "Edit portfolio projects from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one project
    Show { slug: String },
    /// List all projects, newest first
    List,
    /// Edit a project and save it
    Edit(EditArgs),
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub slug: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub place: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    /// File whose contents replace the HTML content
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,
    /// Project date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Image file to upload as the new thumbnail
    #[arg(long, value_name = "PATH")]
    pub thumbnail: Option<PathBuf>,
}
