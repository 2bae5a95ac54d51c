use std::path::PathBuf;

use clap::Parser;
use uxtx_core::amount::{Chain, Unit};
use uxtx_core::options::DEFAULT_DATE_FORMAT;

/// uxtx: classify wallet history JSON into send/receive/coinbase records.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Wallet history JSON (a list of transactions). `-` reads stdin.
    pub input: PathBuf,

    /// Wallet name echoed into every record.
    #[arg(long, env = "UXTX_WALLET")]
    pub wallet: Option<String>,

    /// JSON file with classification labels.
    /// If omitted, the built-in English labels are used.
    #[arg(long, env = "UXTX_LABELS")]
    pub labels: Option<PathBuf>,

    /// `time` format description used to render dates.
    #[arg(long, env = "UXTX_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Chain the wallet belongs to (bitcoin, bitcoincash, handshake).
    #[arg(long, env = "UXTX_CHAIN", default_value = "bitcoin")]
    pub chain: Chain,

    /// Display unit for amounts (coin, milli, micro, base).
    #[arg(long, env = "UXTX_UNIT", default_value = "coin")]
    pub unit: Unit,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply_when_flags_absent() {
        let cli = Cli::try_parse_from(["uxtx", "history.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("history.json"));
        assert_eq!(cli.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(cli.chain, Chain::Bitcoin);
        assert_eq!(cli.unit, Unit::Coin);
        assert!(!cli.pretty);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "uxtx",
            "-",
            "--wallet",
            "primary",
            "--chain",
            "handshake",
            "--unit",
            "milli",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.wallet.as_deref(), Some("primary"));
        assert_eq!(cli.chain, Chain::Handshake);
        assert_eq!(cli.unit, Unit::Milli);
        assert!(cli.pretty);
    }

    #[test]
    fn unsupported_chain_and_unit_fail_to_parse() {
        let err = Cli::try_parse_from(["uxtx", "-", "--chain", "dogecoin"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["uxtx", "-", "--unit", "gwei"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn unit_aliases_are_accepted() {
        let cli = Cli::try_parse_from(["uxtx", "-", "--unit", "bits"]).unwrap();
        assert_eq!(cli.unit, Unit::Micro);
    }
}
