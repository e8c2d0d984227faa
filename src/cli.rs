//! Command-line interface for the credit score service
//!
//! `serve` runs the HTTP API; `score` evaluates a single applicant offline
//! with the local engine.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::{
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    handler::credit_score,
    types::{ApplicantInput, ScoreResult},
};

/// Applicant credit scoring service
#[derive(Parser)]
#[command(name = "credit-score")]
#[command(about = "Loan applicant credit scoring service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default if no command specified)
    Serve,

    /// Score one applicant from a JSON document and print the result
    Score {
        /// Path to the applicant JSON; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print only the explanation text
        #[arg(long)]
        text: bool,
    },
}

/// Initialize configuration and return Config
pub fn init_config() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

/// Level for the global subscriber. A failed configuration still gets a
/// subscriber so the failure itself is logged.
pub fn log_level(config: &Result<Config, Error>) -> Level {
    match config {
        Ok(config) => config.log_level,
        Err(_) => Level::INFO,
    }
}

pub fn read_applicant(input: Option<&PathBuf>) -> Result<ApplicantInput, Error> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        },
    };

    parse_applicant(&raw)
}

pub fn parse_applicant(raw: &str) -> Result<ApplicantInput, Error> {
    let applicant: ApplicantInput = serde_json::from_str(raw)?;
    applicant.validate()?;
    Ok(applicant)
}

pub fn render(result: &ScoreResult, text: bool) -> Result<String, Error> {
    if text {
        return Ok(result.explanation.to_owned());
    }

    Ok(serde_json::to_string_pretty(result)?)
}

pub fn run_score(input: Option<PathBuf>, text: bool) -> Result<(), Error> {
    let applicant = read_applicant(input.as_ref())?;
    let result = credit_score::calculate(&applicant);
    println!("{}", render(&result, text)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let raw = r#"{
            "name": "Ravi Kumar",
            "monthly_income": 50000,
            "monthly_expenses": 30000,
            "avg_electricity_bill": 2000,
            "bank_inflow_6m": 300000,
            "bank_outflow_6m": 250000,
            "repayment_history": "Good"
        }"#;

        let applicant = parse_applicant(raw).unwrap();
        let result = credit_score::calculate(&applicant);

        let json = render(&result, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["composite_score"], 74);
        assert_eq!(value["risk_band"], "Low Risk - Low Need");
        assert_eq!(value["decision"], "Auto-Approve");

        let text = render(&result, true).unwrap();
        assert!(text.starts_with("Based on the financial analysis:"));
    }

    #[test]
    fn test_parse_rejects_invalid_applicant() {
        let raw = r#"{
            "name": "Ravi Kumar",
            "monthly_income": -1,
            "monthly_expenses": 30000,
            "avg_electricity_bill": 2000,
            "bank_inflow_6m": 300000,
            "bank_outflow_6m": 250000,
            "repayment_history": "Good"
        }"#;

        assert!(matches!(
            parse_applicant(raw),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            parse_applicant("{"),
            Err(Error::JsonError(_))
        ));
    }

    #[test]
    fn test_log_level_falls_back_on_configuration_error() {
        let config = Config {
            log_level: Level::DEBUG,
            ..Config::default()
        };
        assert_eq!(log_level(&Ok(config)), Level::DEBUG);

        let failed = Err(Error::ConfigurationError(String::from("LOG_LEVEL")));
        assert_eq!(log_level(&failed), Level::INFO);
    }

    #[test]
    fn test_cli_parses_score_command() {
        let cli = Cli::try_parse_from([
            "credit-score",
            "score",
            "--input",
            "applicant.json",
            "--text",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Score { input, text }) => {
                assert_eq!(input, Some(PathBuf::from("applicant.json")));
                assert!(text);
            },
            _ => panic!("expected score command"),
        }

        let cli = Cli::try_parse_from(["credit-score"]).unwrap();
        assert!(cli.command.is_none());
    }
}
