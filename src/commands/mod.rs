pub mod batch;
pub mod name;
pub mod trim;

use clap::{Args, Parser, Subcommand};
use common::cli::{CommonArgs, CommonCommands, utils};
use common::{CONFIG, Configuration};
use otlptranslator::MetricNamer;

/// Translate OpenTelemetry metric names into Prometheus metric names
#[derive(Parser, Debug)]
#[command(name = "promname", version, about)]
pub struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one OTel metric into a Prometheus metric name
    Name(name::NameArgs),
    /// Strip Prometheus type and unit suffixes from a metric name
    Trim(trim::TrimArgs),
    /// Translate JSON lines of metric descriptors
    Batch(batch::BatchArgs),
    #[command(flatten)]
    Common(CommonCommands),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let loaded = utils::load_config(self.common.config.as_ref())?;
        utils::init_logging(&self.common, &loaded.logging.level);

        let config = CONFIG.get_or_init(|| loaded);
        tracing::debug!(?config, "Configuration loaded");

        match self.command {
            Commands::Name(args) => args.run(config),
            Commands::Trim(args) => args.run(),
            Commands::Batch(args) => args.run(config),
            Commands::Common(command) => utils::handle_common_command(&command, config),
        }
    }
}

/// Flags that override the `[translator]` configuration section
#[derive(Args, Debug, Clone, Default)]
pub struct NamerArgs {
    /// Prefix for the metric name (not cleaned up)
    #[arg(long)]
    namespace: Option<String>,

    /// Only sanitize characters, do not append unit and type suffixes
    #[arg(long)]
    without_suffixes: bool,

    /// Keep UTF-8 characters and punctuation
    #[arg(long)]
    utf8: bool,
}

impl NamerArgs {
    pub fn metric_namer(&self, config: &Configuration) -> MetricNamer {
        let mut namer = config.metric_namer();
        if let Some(namespace) = &self.namespace {
            namer.namespace = namespace.clone();
        }
        if self.without_suffixes {
            namer.add_metric_suffixes = false;
        }
        if self.utf8 {
            namer.allow_utf8 = true;
        }
        namer
    }
}
