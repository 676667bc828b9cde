//! Agent generator CLI
//!
//! Generates one agent from a seed and prints it as JSON on stdout. Logs go to
//! stderr and are filtered with `RUST_LOG`.

use agent_gen::config::DEFAULT_CONFIG_PATH;
use agent_gen::{AgentGenerator, DataSet, GenerationContext, GeneratorConfig};
use agent_model::{DiasporaStatus, TierBand};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the generator
#[derive(Parser, Debug)]
#[command(name = "agent_gen")]
#[command(about = "Deterministic synthetic agent generator")]
struct Args {
    /// Seed string; the same seed always yields the same agent
    #[arg(long)]
    seed: String,

    /// Socioeconomic tier: elite, middle or mass
    #[arg(long)]
    tier: Option<TierBand>,

    /// Role seed tag, repeatable
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Career track tag
    #[arg(long)]
    career: Option<String>,

    /// Home country ISO3 code
    #[arg(long)]
    home: Option<String>,

    /// Diaspora status, e.g. native or refugee
    #[arg(long)]
    diaspora: Option<DiasporaStatus>,

    #[arg(long)]
    birth_year: Option<i32>,

    /// Attach the generation trace
    #[arg(long)]
    trace: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Vocab document replacing the bundled one
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Priors document replacing the bundled one
    #[arg(long)]
    priors: Option<PathBuf>,

    /// Country list replacing the bundled one
    #[arg(long)]
    countries: Option<PathBuf>,

    /// Generator config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

impl Args {
    fn context(&self, seed: String) -> GenerationContext {
        let mut ctx = GenerationContext::new(seed)
            .with_roles(self.roles.iter().cloned())
            .with_trace(self.trace);
        if let Some(tier) = self.tier {
            ctx = ctx.with_tier(tier);
        }
        if let Some(career) = &self.career {
            ctx = ctx.with_career(career.clone());
        }
        if let Some(home) = &self.home {
            ctx = ctx.with_home_country(home.clone());
        }
        if let Some(diaspora) = self.diaspora {
            ctx = ctx.with_diaspora(diaspora);
        }
        if let Some(year) = self.birth_year {
            ctx = ctx.with_birth_year(year);
        }
        ctx
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        GeneratorConfig::from_file(&args.config)?
    } else {
        GeneratorConfig::default()
    };
    let data = DataSet::load(
        args.vocab.as_deref(),
        args.priors.as_deref(),
        args.countries.as_deref(),
    )?;
    let generator = AgentGenerator::from_data(data, config)?;

    let agent = generator.generate(&args.context(args.seed.clone()))?;
    let json = if args.pretty {
        agent.to_json_pretty()?
    } else {
        agent.to_json()?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            ExitCode::FAILURE
        }
    }
}
