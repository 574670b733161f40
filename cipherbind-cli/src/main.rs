//! cipherbind command-line front end
//!
//! Loads keys and encryption profiles from a TOML settings file and lets an
//! administrator check them before use:
//!
//!   cipherbind --config cipherbind.toml validate
//!   cipherbind methods --with-deprecated
//!   cipherbind encrypt --profile default "some text"
//!   cipherbind keygen
//!
//! Key values are never printed, except by `keygen`, which prints a fresh one.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use cipherbind_crypto::{OsRandomStrings, generate_random_key};
use cipherbind_profile::{
    AlgorithmDefinition, AlgorithmRegistry, DEFAULT_SETTINGS_FILE, EncryptService,
    EncryptionProfile, InMemoryKeyRepository, MethodRegistry, ProfileStore, ProfileValidator,
    Settings,
};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cipherbind")]
#[command(about = "Validate and use encryption profiles")]
struct Args {
    /// Path to the settings file
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configured profiles
    Validate {
        /// Only validate this profile
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// List available encryption methods
    Methods {
        /// Include deprecated methods
        #[arg(long)]
        with_deprecated: bool,
    },
    /// Encrypt text with a profile and print base64
    Encrypt {
        #[arg(short, long)]
        profile: String,
        text: String,
    },
    /// Decrypt base64 text with a profile
    Decrypt {
        #[arg(short, long)]
        profile: String,
        ciphertext: String,
    },
    /// Print a random base64 key suitable for the `encryption` key type
    Keygen,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let registry = MethodRegistry::with_builtin_methods()?;

    match args.command {
        Command::Keygen => {
            println!("{}", generate_random_key().to_base64());
        }
        Command::Methods { with_deprecated } => {
            for def in registry.definitions(with_deprecated) {
                print_method(&def);
            }
        }
        Command::Validate { profile } => {
            let loaded = Loaded::from_path(&args.config)?;
            return validate(&loaded.validator(&registry), &loaded.settings, profile.as_deref());
        }
        Command::Encrypt { profile, text } => {
            let loaded = Loaded::from_path(&args.config)?;
            let profile = loaded.profile(&profile)?;
            let encoded = EncryptService::new(loaded.validator(&registry)).encrypt(profile, &text)?;
            println!("{}", encoded);
        }
        Command::Decrypt {
            profile,
            ciphertext,
        } => {
            let loaded = Loaded::from_path(&args.config)?;
            let profile = loaded.profile(&profile)?;
            let plaintext =
                EncryptService::new(loaded.validator(&registry)).decrypt(profile, &ciphertext)?;
            println!("{}", plaintext);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Settings plus the key repository built from them.
struct Loaded {
    settings: Settings,
    keys: InMemoryKeyRepository,
}

impl Loaded {
    fn from_path(path: &Path) -> Result<Self> {
        let settings = Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {:?}", path))?;
        let keys = settings
            .key_repository()
            .context("failed to build key repository")?;
        Ok(Self { settings, keys })
    }

    fn validator<'a>(&'a self, registry: &'a MethodRegistry) -> ProfileValidator<'a> {
        ProfileValidator::new(registry, &self.keys, &OsRandomStrings)
            .with_probe_length(self.settings.probe_length)
    }

    fn profile(&self, id: &str) -> Result<&EncryptionProfile> {
        self.settings
            .profiles
            .iter()
            .find(|p| p.id == id)
            .with_context(|| format!("no profile named '{}' in settings", id))
    }
}

fn print_method(def: &AlgorithmDefinition) {
    let mut flags = Vec::new();
    if def.deprecated {
        flags.push("deprecated");
    }
    if !def.can_decrypt {
        flags.push("encrypt-only");
    }
    let key_types = if def.allowed_key_types.is_empty() {
        "any".to_string()
    } else {
        def.allowed_key_types
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    };
    println!("{}\t{}\tkeys: {}\t{}", def.id, def.label, key_types, flags.join(","));
}

/// Saves every selected profile into a fresh store; each rejection is
/// reported with its aggregated message.
fn validate(
    validator: &ProfileValidator<'_>,
    settings: &Settings,
    only: Option<&str>,
) -> Result<ExitCode> {
    let selected: Vec<_> = settings
        .profiles
        .iter()
        .filter(|p| only.is_none_or(|id| p.id == id))
        .collect();
    if let Some(id) = only
        && selected.is_empty()
    {
        bail!("no profile named '{}' in settings", id);
    }

    let mut store = ProfileStore::new();
    let mut failed = 0usize;
    for profile in selected {
        match store.save(validator, profile.clone()) {
            Ok(()) => println!("ok      {}", profile.id),
            Err(e) => {
                failed += 1;
                println!("invalid {}: {}", profile.id, e);
            }
        }
    }

    if only.is_none() {
        for entry in &settings.keys {
            if store.profiles_using_key(&entry.id).is_empty() {
                debug!(key_id = %entry.id, "Key is not used by any valid profile");
            }
        }
    }

    if failed > 0 {
        warn!("{} profile(s) failed validation", failed);
        Ok(ExitCode::FAILURE)
    } else {
        info!("All {} profile(s) valid", store.len());
        Ok(ExitCode::SUCCESS)
    }
}
