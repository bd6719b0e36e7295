//! ux-insights: research and UX insight documents for the file you are editing.
//!
//! Usage:
//!   ux-insights --mcp --root <path>        # Start MCP server
//!   ux-insights list --active <file>       # Print the side panel
//!   ux-insights relevant <file>            # Documents relevant to a file
//!   ux-insights render <path>              # Render a document to HTML
//!   ux-insights watch --active <file>      # Live panel, reprinted on change

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use rmcp::ServiceExt;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ux_insights::fmt;
use ux_insights::server::InsightsServer;
use ux_insights::services::detector;
use ux_insights::session::{SessionEvent, Session};
use ux_insights::tools;

#[derive(Parser)]
#[command(name = "ux-insights")]
#[command(about = "Research and UX insight documents for the file you are editing")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Workspace root (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Extra configuration file layered over user and workspace config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the side panel: relevant and all research files
    List {
        /// File treated as the active editor file
        #[arg(short, long)]
        active: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List research files relevant to a source file
    Relevant {
        /// Source file path
        file: String,
    },

    /// Re-scan and report document counts
    Refresh,

    /// Render a research document as HTML
    Render {
        /// Document path (absolute or relative to root)
        path: String,
    },

    /// Pick a research document and render it
    Select {
        /// 0-based index to open (omit to list choices)
        #[arg(short, long)]
        choice: Option<usize>,
    },

    /// Show folders auto-detection would add
    Detect,

    /// Keep a live session, reprinting the panel on every change
    Watch {
        /// File treated as the active editor file
        #[arg(short, long)]
        active: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // CRITICAL: Log to stderr only (stdout is JSON-RPC for MCP)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ux_insights=info".parse()?))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell);
        return Ok(());
    }

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let session = Session::open(&root, cli.config.as_deref())
        .with_context(|| format!("failed to open workspace {}", root.display()))?;

    if cli.mcp {
        run_mcp_server(session).await
    } else if let Some(cmd) = cli.command {
        let color = !cli.no_color && io::stdout().is_terminal();
        run_cli(session, cmd, color).await
    } else {
        eprintln!("Use --mcp to start MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }
}

async fn run_mcp_server(session: Session) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server for root: {}", session.root().display());

    let starter = session.clone();
    tokio::task::spawn_blocking(move || starter.start()).await?;

    let service = InsightsServer::new(session.clone())
        .serve(rmcp::transport::io::stdio())
        .await?;
    service.waiting().await?;

    session.shutdown();
    Ok(())
}

async fn run_cli(session: Session, cmd: Commands, color: bool) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    match cmd {
        Commands::List { active, json } => {
            session.refresh();
            session.set_active_file(active.as_deref());
            if json {
                let view = tools::execute_view(&session, tools::ViewInput::default())
                    .map_err(|e| anyhow::anyhow!(e))?;
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                fmt::fmt_status(&mut out, session.status().as_ref(), color)?;
                fmt::fmt_view(&mut out, &session.view_items(), color)?;
            }
        }

        Commands::Relevant { file } => {
            session.refresh();
            session.set_active_file(Some(&file));
            fmt::fmt_relevant(&mut out, &file, &session.relevant(), color)?;
        }

        Commands::Refresh => {
            let result = tools::execute_refresh(&session, tools::RefreshInput::default())
                .map_err(|e| anyhow::anyhow!(e))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }

        Commands::Render { path } => {
            fmt::fmt_panel(&mut out, &session.open_document(&path))?;
        }

        Commands::Select { choice } => {
            let result = tools::execute_selector(&session, tools::SelectorInput { choice })
                .map_err(|e| anyhow::anyhow!(e))?;
            match result {
                tools::SelectorOutput::Notice { message } => writeln!(out, "{message}")?,
                tools::SelectorOutput::Choices { items } => {
                    fmt::fmt_selector(&mut out, &items, color)?;
                }
                tools::SelectorOutput::Opened { panel } => fmt::fmt_panel(&mut out, &panel)?,
            }
        }

        Commands::Detect => {
            fmt::fmt_paths(&mut out, &detector::detect(session.root()), color)?;
        }

        Commands::Watch { active } => {
            drop(out);
            run_watch(session, active, color).await?;
        }

        Commands::Completions { shell } => {
            drop(out);
            print_completions(shell);
        }
    }

    Ok(())
}

async fn run_watch(session: Session, active: Option<String>, color: bool) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<SessionEvent>();
    let subscription = session.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });

    let starter = session.clone();
    tokio::task::spawn_blocking(move || {
        starter.start();
        starter.set_active_file(active.as_deref());
    })
    .await?;

    print_panel(&session, color)?;
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => {
                    tracing::debug!("Session event: {:?}", event);
                    // Drain the burst; one reprint covers it.
                    while rx.try_recv().is_ok() {}
                    print_panel(&session, color)?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    subscription.dispose();
    session.shutdown();
    Ok(())
}

fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "ux-insights", &mut io::stdout());
}

fn print_panel(session: &Session, color: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "────────────────────────────────────────")?;
    fmt::fmt_status(&mut out, session.status().as_ref(), color)?;
    fmt::fmt_view(&mut out, &session.view_items(), color)?;
    out.flush()
}
