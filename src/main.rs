use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use git_versioner::cache::ResolutionCache;
use git_versioner::cli::orchestration::{
    apply_overrides, build_properties, properties_json, restore_properties, run_commit_workflow,
    run_tag_workflow, run_version_workflow, VersionWorkflowArgs, WorkflowResult,
};
use git_versioner::codec::properties::{
    read_properties_file, to_properties_string, write_properties_file,
};
use git_versioner::config::{self, Config};
use git_versioner::domain::VersionBump;
use git_versioner::git::Git2Repository;
use git_versioner::ui;

#[derive(Parser)]
#[command(
    name = "git-versioner",
    version,
    about = "Derive a version string from git tags, commits and working tree state"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        default_value = ".",
        help = "Repository path (searched upwards)"
    )]
    repo: PathBuf,

    #[arg(
        long = "override",
        global = true,
        value_name = "VERSION",
        help = "Use this version instead of resolving one"
    )]
    version_override: Option<String>,

    #[arg(short, long, global = true, help = "Log resolution details to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Print the version (default)
    Print {
        #[arg(short, long, help = "Render this pattern instead of the configured one")]
        pattern: Option<String>,

        #[arg(long, help = "Show how the version was derived")]
        explain: bool,
    },
    /// Emit the resolved state as flat properties
    Properties {
        #[arg(long, help = "Emit nested JSON instead of key=value lines")]
        json: bool,

        #[arg(short, long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Show a properties file written by `properties`
    Inspect { file: PathBuf },
    /// Create an empty commit carrying a version keyword
    Commit {
        #[arg(value_enum)]
        bump: BumpArg,

        #[arg(short, long, help = "Text appended after the keyword")]
        message: Option<String>,
    },
    /// Tag HEAD with the rendered version
    Tag {
        #[arg(long, help = "Text put in front of the version, e.g. 'v'")]
        prefix: Option<String>,

        #[arg(short, long, help = "Create an annotated tag with this message")]
        message: Option<String>,

        #[arg(short, long, help = "Skip confirmation prompt")]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BumpArg {
    Major,
    Minor,
    Patch,
}

impl From<BumpArg> for VersionBump {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::Major => VersionBump::Major,
            BumpArg::Minor => VersionBump::Minor,
            BumpArg::Patch => VersionBump::Patch,
        }
    }
}

fn init_tracing(verbose: bool) {
    // Boundary warnings are shown through `ui`; logs stay quiet unless asked for
    let level = if verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("git_versioner={}", level).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let command = args.command.clone().unwrap_or(Command::Print {
        pattern: None,
        explain: false,
    });

    if let Command::Inspect { file } = &command {
        return inspect(file);
    }

    let mut repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let cache = ResolutionCache::new();
    let workflow_args = VersionWorkflowArgs {
        version_override: args.version_override.clone(),
        pattern: None,
    };

    match command {
        Command::Print { pattern, explain } => {
            let workflow_args = VersionWorkflowArgs {
                pattern,
                ..workflow_args
            };
            let result = resolve(&repo, &workflow_args, &config, &cache);
            if explain {
                ui::display_resolution(&result);
            }
            println!("{}", result.version);
        }
        Command::Properties { json, output } => {
            let result = resolve(&repo, &workflow_args, &config, &cache);
            let config = apply_overrides(config, &workflow_args);
            let flat = build_properties(&result, &config, &cache)?;

            match (json, output) {
                (true, Some(path)) => {
                    fs::write(&path, serde_json::to_string_pretty(&properties_json(&flat))?)?;
                    ui::display_success(&format!("Wrote {}", path.display()));
                }
                (true, None) => {
                    println!("{}", serde_json::to_string_pretty(&properties_json(&flat))?)
                }
                (false, Some(path)) => {
                    write_properties_file(&path, &flat)?;
                    ui::display_success(&format!("Wrote {}", path.display()));
                }
                (false, None) => print!("{}", to_properties_string(&flat)),
            }
        }
        Command::Commit { bump, message } => {
            match run_commit_workflow(&mut repo, &config, bump.into(), message.as_deref()) {
                Ok(oid) => ui::display_success(&format!("Created commit {}", oid)),
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            }
        }
        Command::Tag {
            prefix,
            message,
            force,
        } => {
            let result = resolve(&repo, &workflow_args, &config, &cache);
            let name = format!("{}{}", prefix.as_deref().unwrap_or(""), result.version);

            if !force && !ui::confirm_action(&format!("Create tag '{}' on HEAD?", name))? {
                ui::display_status("Tag creation cancelled.");
                return Ok(());
            }

            ui::display_status(&format!("Creating tag: {}", name));
            match run_tag_workflow(
                &mut repo,
                &result.version,
                prefix.as_deref(),
                message.as_deref(),
            ) {
                Ok(created) => ui::display_success(&format!("Created tag: {}", created)),
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            }
        }
        Command::Inspect { .. } => {}
    }

    Ok(())
}

/// Run the version workflow, surfacing warnings and exiting on failure
fn resolve(
    repo: &Git2Repository,
    args: &VersionWorkflowArgs,
    config: &Config,
    cache: &ResolutionCache,
) -> WorkflowResult {
    match run_version_workflow(repo, args, config, cache) {
        Ok(result) => {
            for warning in &result.warnings {
                ui::display_boundary_warning(warning);
            }
            result
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn inspect(file: &Path) -> Result<()> {
    let flat = match read_properties_file(file) {
        Ok(flat) => flat,
        Err(e) => {
            ui::display_error(&format!("Cannot read '{}': {}", file.display(), e));
            std::process::exit(1);
        }
    };

    let stored = restore_properties(&flat)?;
    let result = WorkflowResult {
        version: stored.version.clone().unwrap_or_default(),
        strategy: stored.strategy_name().to_string(),
        state: stored.state,
        warnings: Vec::new(),
    };
    ui::display_resolution(&result);
    println!("{}", result.version);
    Ok(())
}
