//! CLI argument definitions using clap derive macros.

use clap::Parser;

use crate::config::Variant;

/// LLM-backed crypto market analysis server
#[derive(Parser, Debug, Default)]
#[command(name = "crypto-analyzer", about, version)]
pub struct Cli {
    /// Listen port (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address (overrides BIND)
    #[arg(long)]
    pub bind: Option<String>,

    /// Backend variant to serve (overrides ANALYZER_VARIANT)
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Model identifier (overrides INFERENCE_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["crypto-analyzer", "--port", "4000", "--variant", "report", "-v"]);
        assert_eq!(cli.port, Some(4000));
        assert_eq!(cli.variant, Some(Variant::Report));
        assert!(cli.verbose);
        assert!(cli.model.is_none());
    }
}
