use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use blackout_wallet::bridge::{CommandHandler, WalletBridge};
use blackout_wallet::utils::logging;
use blackout_wallet::{MnemonicPolicy, SeedMode, WalletContext, WalletSettings, WordCount};

#[derive(Parser)]
#[command(name = "blackout-wallet")]
#[command(about = "Derive Ethereum wallets from BIP-39 mnemonics")]
struct Cli {
    /// Settings JSON file; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    seed_mode: Option<SeedModeArg>,

    #[arg(long, global = true, value_enum)]
    policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new mnemonic and print its address
    Create {
        /// Mnemonic length: 12, 15, 18, 21 or 24
        #[arg(long)]
        words: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Derive the address of an existing mnemonic
    Import {
        mnemonic: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Read one JSON command per stdin line, answer one JSON envelope per line
    Bridge,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,
    /// Also print the mnemonic and private key
    #[arg(long)]
    reveal: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeedModeArg {
    Truncated,
    Bip44,
}

impl From<SeedModeArg> for SeedMode {
    fn from(arg: SeedModeArg) -> Self {
        match arg {
            SeedModeArg::Truncated => SeedMode::Truncated,
            SeedModeArg::Bip44 => SeedMode::Bip44,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Strict,
    Permissive,
}

impl From<PolicyArg> for MnemonicPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => MnemonicPolicy::Strict,
            PolicyArg::Permissive => MnemonicPolicy::Permissive,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => WalletSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => WalletSettings::standard(),
    };
    if let Some(mode) = cli.seed_mode {
        settings.seed_mode = mode.into();
    }
    if let Some(policy) = cli.policy {
        settings.mnemonic_policy = policy.into();
    }
    logging::set_redaction(settings.redact_logs);

    match cli.command {
        Commands::Create { words, output } => {
            if let Some(words) = words {
                settings.word_count = WordCount::try_from(words).map_err(anyhow::Error::msg)?;
            }
            let mut context = WalletContext::with_settings(settings);
            context.create_wallet().context("creating wallet")?;
            print_wallet(&context, &output)
        }
        Commands::Import { mnemonic, output } => {
            let mut context = WalletContext::with_settings(settings);
            context.import_wallet(&mnemonic).context("importing wallet")?;
            print_wallet(&context, &output)
        }
        Commands::Bridge => run_bridge(WalletBridge::with_settings(settings)),
    }
}

fn print_wallet(context: &WalletContext, output: &OutputArgs) -> anyhow::Result<()> {
    let record = context.record().context("no wallet derived")?;

    match (output.json, output.reveal) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&record.export())?),
        (true, false) => println!("{}", serde_json::to_string_pretty(&record.summary())?),
        (false, reveal) => {
            if reveal {
                println!("Mnemonic:    {}", record.mnemonic());
                println!("Private key: {}", record.private_key_hex());
            }
            println!("Address:     {}", record.address());
        }
    }
    Ok(())
}

fn run_bridge(bridge: WalletBridge) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", bridge.dispatch_json(&line))?;
        stdout.flush()?;
    }
    Ok(())
}
