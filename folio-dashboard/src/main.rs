mod cli;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use folio_dashboard::{
    config::DashboardConfig, EditForm, ProjectApi, RpcProjectClient, SelectedThumbnail,
    SubmitOutcome,
};
use folio_types::{Project, ProjectField};
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands, EditArgs};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::ConfigPath = cli.command {
        let path = DashboardConfig::config_path()?;
        if !path.exists() {
            DashboardConfig::default().save_to(&path)?;
        }
        println!("{}", path.display());
        return Ok(());
    }

    let config = DashboardConfig::load()?;
    let api = Arc::new(
        RpcProjectClient::new(&config.api_url)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?,
    );

    match cli.command {
        Commands::Show { slug } => {
            let project = api
                .get_project_by_slug(&slug)
                .await
                .context("Failed to fetch project")?;
            match project {
                Some(project) => print_project(&project),
                None => println!("No project '{slug}'"),
            }
        }
        Commands::List => {
            let projects = api
                .list_projects()
                .await
                .context("Failed to list projects")?;
            for project in projects {
                println!("{}  {}  {}", project.date, project.slug, project.title);
            }
        }
        Commands::Edit(args) => edit(api, &config, args).await?,
        Commands::ConfigPath => {}
    }

    Ok(())
}

async fn edit(api: Arc<RpcProjectClient>, config: &DashboardConfig, args: EditArgs) -> Result<()> {
    let Some(project) = api
        .get_project_by_slug(&args.slug)
        .await
        .context("Failed to fetch project")?
    else {
        bail!("No project '{}'", args.slug);
    };

    let uploader = Arc::new(config.cloudinary.upload_client());
    let form = EditForm::mount(project, api, uploader);

    let text_fields = [
        (ProjectField::Title, args.title),
        (ProjectField::Place, args.place),
        (ProjectField::Client, args.client),
        (ProjectField::Summary, args.summary),
        (ProjectField::Date, args.date),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            form.set_field(field, value).await;
        }
    }

    if let Some(path) = args.content_file {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        form.set_field(ProjectField::Content, content).await;
    }

    if let Some(path) = args.thumbnail {
        let thumbnail = SelectedThumbnail::open(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        form.select_thumbnail(thumbnail).await;
    }

    match form.submit().await {
        SubmitOutcome::Saved {
            project,
            toast,
            redirect,
        } => {
            println!("{toast}");
            print_project(&project);
            println!("→ {redirect}");
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field.label(), message);
            }
            bail!("Project is invalid");
        }
        SubmitOutcome::Failed { toast } => {
            for (field, message) in form.errors().await.iter() {
                eprintln!("{}: {}", field.label(), message);
            }
            bail!("{toast}");
        }
        SubmitOutcome::Ignored => {}
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{} ({})", project.title, project.slug);
    println!("  client:    {}", project.client);
    println!("  place:     {}", project.place);
    println!("  date:      {}", project.date);
    println!("  summary:   {}", project.summary);
    println!("  thumbnail: {}", project.thumbnail);
}
