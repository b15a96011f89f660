/*
[INPUT]:  CLI arguments, YAML configuration file, CLOUDTASK_* environment
[OUTPUT]: One page action per invocation, or an interactive session
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or logging setup
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use cloudtask::{App, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "cloudtask", version, about = "CloudTask command-line client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        /// Prompted when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Prompted when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Read or add tasks
    Tasks {
        #[command(subcommand)]
        action: TasksCommand,
    },
    /// Check that the backend is up
    Health,
    /// Menu-driven login/register/dashboard
    Interactive,
    /// Write a configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "cloudtask.yaml")]
        output: PathBuf,
        #[arg(long = "base-url", value_name = "URL")]
        base_url: Option<String>,
        /// Accept defaults without prompting
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TasksCommand {
    /// Show the task list
    List,
    /// Add a task and show the refreshed list
    Add { title: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Command::Init { output, base_url, yes } = args.command {
        return cli::init::run_init(output, base_url, yes);
    }

    let config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    let _guard = init_tracing(&args.log_level, config.log_dir.as_deref())?;

    info!(
        base_url = %config.api.base_url,
        policy = ?config.ui.redirect_policy,
        "starting cloudtask"
    );

    let mut app = App::from_config(&config).await?;

    match args.command {
        Command::Register { email, password } => {
            cli::commands::run_register(&mut app, email, password).await
        }
        Command::Login { email, password } => {
            cli::commands::run_login(&mut app, email, password).await
        }
        Command::Logout => cli::commands::run_logout(&mut app).await,
        Command::Tasks { action } => match action {
            TasksCommand::List => cli::commands::run_tasks_list(&mut app).await,
            TasksCommand::Add { title } => cli::commands::run_tasks_add(&mut app, title).await,
        },
        Command::Health => cli::commands::run_health(&app).await,
        Command::Interactive => cli::interactive::run_interactive(&mut app).await,
        Command::Init { .. } => Ok(()),
    }
}

fn init_tracing(log_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "cloudtask.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
