// src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::{OsRng, StdRng};
use rand::{SeedableRng, TryRngCore};
use sigaba::text::{cipher_lines, wrap_words};
use sigaba::wiring::{big_rotor_symbols, index_rotor_symbols};
use sigaba::{Direction, MachineSettings, MachineType, PermutationChecker, WiringGenerator};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output line width for ciphertext groups and plaintext words.
const LINE_WIDTH: usize = 70;

/// Letters per ciphertext group.
const GROUP_LEN: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "sigaba",
    about = "ECM Mark II (SIGABA) emulator",
    long_about = "ECM Mark II (SIGABA) emulator.\n\nEncrypt and decrypt messages on a CSP-889 or CSP-2900, and build or audit rotor wirings with the internal method.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encrypt plaintext; output is printed in five-letter groups
    Encrypt(KeyArgs),

    /// Decrypt ciphertext; `Z` is printed as a word space
    Decrypt(KeyArgs),

    /// Build random rotor wirings with the internal method
    Generate {
        /// Number of symbols on the rotor (>0)
        #[arg(long, default_value_t = 26, value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,

        /// Seed for a reproducible search (default: operating system entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of wirings to build
        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Audit the built-in rotor catalogs against the internal method
    CheckCatalog,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// JSON key settings; flags given on the command line take precedence
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Cipher rotor order, e.g. 0N1R2N3R4N
    #[arg(long)]
    cipher_order: Option<String>,

    /// Control rotor order, e.g. 5N6N7N8N9N
    #[arg(long)]
    control_order: Option<String>,

    /// Index rotor order, rotors 0-4
    #[arg(long)]
    index_order: Option<String>,

    /// Machine variant
    #[arg(value_enum, long)]
    machine: Option<MachineOpt>,

    /// Cipher rotor positions, five letters
    #[arg(long)]
    cipher_pos: Option<String>,

    /// Control rotor positions, five letters
    #[arg(long)]
    control_pos: Option<String>,

    /// Index rotor positions, five digits
    #[arg(long)]
    index_pos: Option<String>,

    /// Reach the control position with the navy procedure
    #[arg(long, default_value_t = false)]
    navy_init: bool,

    /// Message text (otherwise read from --input or stdin)
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Message file, or `-` for stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log rotor positions after every character
    #[arg(long, default_value_t = false)]
    trace: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum MachineOpt {
    /// CSP-889
    Csp889,
    /// CSP-2900
    Csp2900,
    /// 889/2900 switch in the middle position
    Cspnone,
}

impl From<MachineOpt> for MachineType {
    fn from(opt: MachineOpt) -> Self {
        match opt {
            MachineOpt::Csp889 => MachineType::Csp889,
            MachineOpt::Csp2900 => MachineType::Csp2900,
            MachineOpt::Cspnone => MachineType::CspNone,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Encrypt(key) => run_machine(key, Direction::Encrypt),
        Cmd::Decrypt(key) => run_machine(key, Direction::Decrypt),
        Cmd::Generate { size, seed, count } => match seed {
            Some(seed) => generate(size as usize, count, &mut StdRng::seed_from_u64(seed)),
            None => generate(size as usize, count, &mut OsRng),
        },
        Cmd::CheckCatalog => check_catalog(),
    }
}

/// Initialize tracing with an env-driven filter (default INFO), on stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Merge the settings file (if any) with command-line overrides.
fn load_settings(key: &KeyArgs) -> Result<MachineSettings> {
    let mut settings = match &key.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            MachineSettings::from_json(&json)
                .with_context(|| format!("parsing settings {}", path.display()))?
        }
        None => MachineSettings::default(),
    };

    let overrides = [
        (&key.cipher_order, &mut settings.cipher_order),
        (&key.control_order, &mut settings.control_order),
        (&key.index_order, &mut settings.index_order),
        (&key.cipher_pos, &mut settings.cipher_pos),
        (&key.control_pos, &mut settings.control_pos),
        (&key.index_pos, &mut settings.index_pos),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    if let Some(machine) = key.machine {
        settings.machine = machine.into();
    }
    if key.navy_init {
        settings.navy_init = true;
    }
    Ok(settings)
}

fn read_message(key: &KeyArgs) -> Result<String> {
    if let Some(text) = &key.text {
        return Ok(text.clone());
    }
    let mut buf = String::new();
    match &key.input {
        Some(path) if path.as_os_str() != "-" => {
            buf = std::fs::read_to_string(path)
                .with_context(|| format!("reading message {}", path.display()))?;
        }
        _ => {
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading message from stdin")?;
        }
    }
    Ok(buf)
}

fn run_machine(key: KeyArgs, direction: Direction) -> Result<()> {
    let settings = load_settings(&key)?;
    let mut machine = settings.build().context("invalid machine settings")?;
    if key.trace {
        machine.start_trace();
    }
    info!(
        machine = %settings.machine,
        cipher = %machine.cipher_pos(),
        control = %machine.control_pos(),
        index = %machine.index_pos(),
        ?direction,
        "machine keyed"
    );

    // newlines separate words in multi-line plaintext
    let message = read_message(&key)?.replace(['\n', '\r', '\t'], " ");
    let output = machine.process(&message, direction);

    let lines = match direction {
        Direction::Encrypt => cipher_lines(&output, GROUP_LEN, LINE_WIDTH),
        Direction::Decrypt => wrap_words(&output, LINE_WIDTH),
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn generate<R>(size: usize, count: usize, rng: &mut R) -> Result<()>
where
    R: TryRngCore + ?Sized,
{
    if count == 0 {
        bail!("count must be at least 1");
    }
    let generator = WiringGenerator::new(size)?;
    info!(size, count, "generating wirings");
    for n in 0..count {
        let wiring = generator
            .generate(rng)
            .with_context(|| format!("building wiring {} of {}", n + 1, count))?;
        if let Some(letters) = wiring.to_letters() {
            println!("{letters}");
        }
        println!("{wiring}");
    }
    Ok(())
}

fn check_catalog() -> Result<()> {
    let mut all_ok = true;
    for (num, wiring) in big_rotor_symbols().iter().enumerate() {
        let report = PermutationChecker::check_symbols(wiring, 'A')?;
        all_ok &= report.permutation_ok();
        println!("big rotor {num}: {wiring}");
        println!("{report}");
    }
    for (num, wiring) in index_rotor_symbols().iter().enumerate() {
        let report = PermutationChecker::check_symbols(wiring, '0')?;
        all_ok &= report.permutation_ok();
        println!("index rotor {num}: {wiring}");
        println!("{report}");
    }
    if !all_ok {
        bail!("catalog contains a wiring that is not a permutation");
    }
    Ok(())
}
