//! ash-compose: AutoSelfHost 命令行：浏览应用目录、生成 docker-compose.yml、查看套餐限制
//!
//! Usage:
//!   ash-compose catalog [--category <name>] [--search <term>]
//!   ash-compose show <slug>
//!   ash-compose generate <slug> [--set key=value]... [--output <path>] [--model <id>]
//!   ash-compose limits [--plan free|pro] [--usage <n>]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use ash_compose::{
    check_entitlement, Catalog, ComposeGenerator, GenerationResult, GeneratorConfig, Plan,
    Resource,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Generate Docker Compose files for self-hosted apps
#[derive(Parser, Debug)]
#[command(name = "ash-compose", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog templates
    Catalog {
        /// Only show templates in this category
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on name, description and tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one template and its fields
    Show { slug: String },
    /// Generate a compose file for a template
    Generate {
        slug: String,
        /// Field override, repeatable (e.g. --set port=8080)
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
        /// Write the compose file here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Override the model (defaults to ASH_AI_MODEL or gpt-4.1-mini)
        #[arg(long)]
        model: Option<String>,
    },
    /// Print plan limits
    Limits {
        #[arg(long)]
        plan: Option<Plan>,
        /// Check whether one more compose config fits at this usage
        #[arg(long)]
        usage: Option<u32>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Catalog { category, search } => cmd_catalog(category, search)?,
        Command::Show { slug } => cmd_show(&slug)?,
        Command::Generate {
            slug,
            values,
            output,
            model,
        } => return cmd_generate(&slug, values, output, model).await,
        Command::Limits { plan, usage } => cmd_limits(plan, usage),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_catalog(category: Option<String>, search: Option<String>) -> anyhow::Result<()> {
    let catalog = Catalog::builtin()?;
    let term = search.unwrap_or_default();
    let mut shown = 0;
    for template in catalog.search(&term) {
        if category.as_deref().is_some_and(|c| c != template.category) {
            continue;
        }
        println!(
            "{} {:<22} {:<13} {}",
            template.emoji, template.slug, template.category, template.description
        );
        shown += 1;
    }
    if shown == 0 {
        println!("No templates match.");
        println!("Categories: {}", catalog.categories().join(", "));
    }
    Ok(())
}

fn cmd_show(slug: &str) -> anyhow::Result<()> {
    let catalog = Catalog::builtin()?;
    let template = catalog
        .get(slug)
        .ok_or_else(|| anyhow!("no template named {slug:?}"))?;

    println!("{} {}", template.emoji, template.name);
    println!("{}", template.description);
    println!("Category: {}", template.category);
    println!("Tags:     {}", template.tags.join(", "));
    if let Some(docs) = &template.links.docs {
        println!("Docs:     {docs}");
    }
    println!();
    println!("Fields:");
    for field in &template.fields {
        let marker = if field.required() { "*" } else { " " };
        let default = field
            .default_value()
            .map(|d| format!(" [default: {d}]"))
            .unwrap_or_default();
        let hint = field
            .placeholder()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        println!(
            "  {marker} {:<16} {:<9} {}{}{}",
            field.id(),
            field.kind().name(),
            field.label(),
            default,
            hint
        );
    }
    Ok(())
}

async fn cmd_generate(
    slug: &str,
    overrides: Vec<(String, String)>,
    output: Option<PathBuf>,
    model: Option<String>,
) -> anyhow::Result<ExitCode> {
    let catalog = Catalog::builtin()?;
    let template = catalog
        .get(slug)
        .ok_or_else(|| anyhow!("no template named {slug:?}"))?;

    let mut values = template.default_values();
    for (key, value) in overrides {
        values.insert(key, value);
    }
    template.validate_values(&values)?;

    let mut config = GeneratorConfig::from_env()?;
    if let Some(model) = model {
        config = config.with_model(model);
    }
    let generator = ComposeGenerator::new(config)?;

    match generator.generate(&template.to_request(values)).await {
        GenerationResult::Success {
            compose,
            model,
            tokens,
        } => {
            match output {
                Some(path) => {
                    std::fs::write(&path, format!("{compose}\n"))
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Wrote {} ({model}, {tokens} tokens)", path.display());
                }
                None => println!("{compose}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        GenerationResult::Failure { error } => {
            eprintln!("Generation failed: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_limits(plan: Option<Plan>, usage: Option<u32>) {
    let plans: Vec<Plan> = match plan {
        Some(p) => vec![p],
        None => Plan::ALL.to_vec(),
    };
    for plan in plans {
        println!("{plan}:");
        for resource in Resource::ALL {
            println!("  {:<22} {}", resource.label(), plan.limit(resource));
        }
        if let Some(usage) = usage {
            let entitlement = check_entitlement(plan, Resource::ComposeConfigs, usage);
            match entitlement.reason {
                Some(reason) => println!("  {reason}"),
                None => println!("  {usage} compose configs in use, another one is allowed"),
            }
        }
    }
}
