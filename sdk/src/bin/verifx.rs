//! veriFX - file integrity verifier backed by the Verifix program
//!
//! Stores SHA-256 digests of local files on-chain and checks files against
//! them later.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use indicatif::ProgressBar;
use solana_sdk::pubkey::Pubkey;
use std::{
    future::Future,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verifix_sdk::{
    config::parse_program_id, hash, ClientConfig, Cluster, VerifixClient, VerifyOutcome,
};
use walkdir::{DirEntry, WalkDir};

const BANNER: &str = r#"
        _   _           _________   __
 ______| | | |         (_)  ___\ \ / /______
|______| | | | ___ _ __ _| |_   \ V /|______|
 ______| | | |/ _ \ '__| |  _|  /   \ ______
|______\ \_/ /  __/ |  | | |   / /^\ \______|
        \___/ \___|_|  |_\_|   \/   \/
"#;

/// Directories never offered by the interactive picker
const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules"];
const MAX_PICKER_ENTRIES: usize = 200;

#[derive(Parser)]
#[command(name = "verifx")]
#[command(about = "File integrity verifier using the Solana blockchain")]
#[command(version = "0.1.0")]
struct Cli {
    /// RPC endpoint URL (overrides --cluster and VERIFIX_RPC_URL)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Cluster to connect to
    #[arg(long, value_enum)]
    cluster: Option<ClusterArg>,

    /// Path to Solana keypair file
    #[arg(short, long, env = "VERIFIX_KEYPAIR")]
    keypair: Option<PathBuf>,

    /// Verifix program id
    #[arg(long, env = "VERIFIX_PROGRAM_ID")]
    program_id: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Do not print the banner
    #[arg(long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClusterArg {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl From<ClusterArg> for Cluster {
    fn from(arg: ClusterArg) -> Self {
        match arg {
            ClusterArg::Mainnet => Cluster::Mainnet,
            ClusterArg::Testnet => Cluster::Testnet,
            ClusterArg::Devnet => Cluster::Devnet,
            ClusterArg::Localnet => Cluster::Localnet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the Verifix program (once per deployment)
    Init,
    /// Store a file's hash on the blockchain
    Store {
        /// Path to file; interactive selection if omitted
        file: Option<PathBuf>,
    },
    /// Replace the stored hash of a file with its current hash
    Update {
        /// Path to file; interactive selection if omitted
        file: Option<PathBuf>,
    },
    /// Check a file against its stored hash
    Verify {
        /// Path to file; interactive selection if omitted
        file: Option<PathBuf>,
        /// Owner of the record (defaults to the keypair)
        #[arg(long)]
        owner: Option<String>,
        /// Run the comparison as an on-chain instruction
        #[arg(long)]
        on_chain: bool,
    },
    /// Remove a file's stored hash
    Remove {
        /// Path to file; interactive selection if omitted
        file: Option<PathBuf>,
    },
    /// Show a stored record, or the program config when no file is given
    Show {
        /// Path to file
        file: Option<PathBuf>,
        /// Owner of the record (defaults to the keypair)
        #[arg(long)]
        owner: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the SHA-256 of a file without touching the chain
    Hash {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.quiet {
        println!("{BANNER}");
    }

    if let Commands::Hash { file } = &cli.command {
        let digest = hash::compute_file_hash(file)
            .with_context(|| format!("Failed to hash {}", file.display()))?;
        println!("{}  {}", hash::to_hex(&digest), file.display());
        return Ok(());
    }

    let config = build_config(&cli)?;
    debug!(rpc = %config.rpc_url, program = %config.program_id, "Resolved configuration");
    let client = VerifixClient::new(&config).context("Failed to create client")?;

    match cli.command {
        Commands::Init => {
            let signature = with_spinner("Initializing program...", client.initialize())
                .await
                .context("Failed to initialize")?;
            println!("{}", "Program initialized".green());
            println!("Transaction signature: {signature}");
        }
        Commands::Store { file } => {
            let path = resolve_file(file)?;
            let receipt = with_spinner("Storing hash on Solana...", client.store_file(&path))
                .await
                .context("Failed to store hash")?;
            println!("{}", "Hash stored on Solana successfully!".green());
            println!("  File:      {}", receipt.file_name);
            println!("  Hash:      {}", hash::to_hex(&receipt.hash));
            println!("  Record:    {}", receipt.address);
            println!("Transaction signature: {}", receipt.signature);
        }
        Commands::Update { file } => {
            let path = resolve_file(file)?;
            let receipt = with_spinner("Updating hash on Solana...", client.update_file(&path))
                .await
                .context("Failed to update hash")?;
            println!("{} {}", "Hash updated for".green(), receipt.file_name);
            println!("  Hash:      {}", hash::to_hex(&receipt.hash));
            println!("Transaction signature: {}", receipt.signature);
        }
        Commands::Verify {
            file,
            owner,
            on_chain,
        } => {
            let path = resolve_file(file)?;
            let owner = owner.as_deref().map(parse_pubkey).transpose()?;

            if on_chain {
                let signature = with_spinner(
                    "Verifying hash on Solana...",
                    client.verify_file_on_chain(&path, owner),
                )
                .await
                .context("On-chain verification failed")?;
                println!("{}", "File integrity verified on-chain".green());
                println!("Transaction signature: {signature}");
            } else {
                let report = with_spinner(
                    "Fetching hash from Solana...",
                    client.verify_file(&path, owner),
                )
                .await
                .context("Failed to verify the file")?;
                println!("{}: {}", report.file_name, paint_outcome(&report.outcome));
                if report.outcome != VerifyOutcome::Verified {
                    bail!("Verification failed for {}", report.file_name);
                }
            }
        }
        Commands::Remove { file } => {
            let path = resolve_file(file)?;
            let signature = with_spinner("Removing hash from Solana...", client.remove_file(&path))
                .await
                .context("Failed to remove hash")?;
            println!("{}", "Hash removed".green());
            println!("Transaction signature: {signature}");
        }
        Commands::Show { file, owner, json } => {
            let owner = match owner.as_deref() {
                Some(owner) => parse_pubkey(owner)?,
                None => client.payer(),
            };
            show(&client, file.as_deref(), &owner, json).await?;
        }
        // Handled before connecting
        Commands::Hash { .. } => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Environment first, then command-line flags on top
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let config = ClientConfig::from_env().context("Invalid VERIFIX_* environment")?;
    apply_flags(cli, config)
}

fn apply_flags(cli: &Cli, mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(cluster) = cli.cluster {
        config = config.with_cluster(cluster.into());
    }
    if let Some(rpc_url) = &cli.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    if let Some(keypair) = &cli.keypair {
        config.keypair_path = keypair.to_string_lossy().into_owned();
    }
    if let Some(program_id) = &cli.program_id {
        config.program_id = parse_program_id(program_id)?;
    }

    config.validate()?;
    Ok(config)
}

/// Show a spinner on stderr while `future` runs
async fn with_spinner<F: Future>(message: &'static str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}

fn paint_outcome(outcome: &VerifyOutcome) -> ColoredString {
    let text = outcome.to_string();
    match outcome {
        VerifyOutcome::Verified => text.green(),
        VerifyOutcome::Modified { .. } => text.red(),
        VerifyOutcome::InvalidData => text.yellow(),
        VerifyOutcome::NotFound => text.normal(),
    }
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    value
        .parse()
        .with_context(|| format!("Invalid public key: {value}"))
}

async fn show(client: &VerifixClient, file: Option<&Path>, owner: &Pubkey, json: bool) -> Result<()> {
    let Some(file) = file else {
        let Some(config) = client.fetch_config().await? else {
            bail!("Program {} is not initialized", client.program_id());
        };
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!("Program:        {}", client.program_id());
            println!("Authority:      {}", config.authority);
            println!("Records:        {}", config.record_count);
            println!("Initialized at: {}", config.initialized_at);
        }
        return Ok(());
    };

    let file_name = verifix_sdk::pda::file_name_from_path(file)?;
    let Some(record) = client.fetch_record(owner, &file_name).await? else {
        bail!("No hash found for {file_name}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("File:       {file_name}");
        println!("Record:     {}", record.address);
        println!("Owner:      {}", record.owner);
        println!("Hash:       {}", record.hash_hex());
        println!("Stored at:  {}", record.stored_at);
        println!("Updated at: {}", record.updated_at);
    }
    Ok(())
}

fn resolve_file(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => select_file(Path::new(".")),
    }
}

/// Numbered picker over regular files below `root`
fn select_file(root: &Path) -> Result<PathBuf> {
    let mut files = collect_files(root);
    files.sort();

    if files.is_empty() {
        bail!("No files found under {}", root.display());
    }

    let shown = files.len().min(MAX_PICKER_ENTRIES);
    for (index, path) in files.iter().take(shown).enumerate() {
        println!("{:>4}) {}", index + 1, path.display());
    }
    if files.len() > shown {
        println!("... {} more; pass the path explicitly", files.len() - shown);
    }

    print!("Select a file [1-{shown}]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let choice: usize = line
        .trim()
        .parse()
        .with_context(|| format!("Not a number: {}", line.trim()))?;

    if choice == 0 || choice > shown {
        bail!("No file selected");
    }
    Ok(files.swap_remove(choice - 1))
}

/// Regular files below `root`; unreadable entries are skipped
fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
