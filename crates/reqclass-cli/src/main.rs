mod display;
mod input;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reqclass_client::{
    AnalyzeForm, BatchClassifyForm, ClassifyForm, ClientConfig, DEFAULT_BASE_URL, HttpTransport,
    OperationState, RequirementsApiClient, SearchForm,
};
use reqclass_core::TOP_N_DEFAULT;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "reqclass", version, about = "Classify and search software requirements")]
struct Cli {
    /// Base URL of the classification API.
    #[arg(long, env = "REQCLASS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Give up on a request after this many seconds.
    #[arg(long, env = "REQCLASS_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Print the result as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one requirement as functional or non-functional.
    Classify { text: String },

    /// Classify every requirement in a CSV file.
    ClassifyFile {
        path: PathBuf,

        /// Declared media type; guessed from the extension when omitted.
        #[arg(long)]
        media_type: Option<String>,
    },

    /// Classify a requirement and list similar ones.
    Analyze {
        text: String,

        /// Number of results, clamped to 1..=20.
        #[arg(long, default_value_t = TOP_N_DEFAULT as i64, allow_negative_numbers = true)]
        top_n: i64,

        /// Ask the server to cluster before searching.
        #[arg(long)]
        cluster: bool,
    },

    /// List stored requirements similar to the given one.
    Search {
        text: String,

        /// Number of results, clamped to 1..=20.
        #[arg(long, default_value_t = TOP_N_DEFAULT as i64, allow_negative_numbers = true)]
        top_n: i64,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url);
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    tracing::info!("reqclass v{}", env!("CARGO_PKG_VERSION"));

    let client =
        RequirementsApiClient::new(cli.client_config()).context("building HTTP client")?;
    let output = run(&cli, &client).await?;
    print!("{output}");
    Ok(())
}

async fn run(cli: &Cli, client: &RequirementsApiClient<HttpTransport>) -> anyhow::Result<String> {
    match &cli.command {
        Command::Classify { text } => {
            let mut form = ClassifyForm::new();
            form.set_requirement(text.as_str());
            form.submit(client).await;
            finish(form.state(), form.error_message(), cli.json, |out, r| {
                display::write_classification(out, r)
            })
        }
        Command::ClassifyFile { path, media_type } => {
            let upload = input::load_upload(path, media_type.as_deref())?;
            let mut form = BatchClassifyForm::new();
            form.select_file(upload);
            form.submit(client).await;
            finish(form.state(), form.error_message(), cli.json, |out, r| {
                display::write_batch_report(out, r)
            })
        }
        Command::Analyze {
            text,
            top_n,
            cluster,
        } => {
            let mut form = AnalyzeForm::new();
            form.set_requirement(text.as_str());
            form.set_top_n(*top_n);
            form.set_use_clustering(*cluster);
            form.submit(client).await;
            finish(form.state(), form.error_message(), cli.json, |out, r| {
                display::write_analysis(out, r)
            })
        }
        Command::Search { text, top_n } => {
            let mut form = SearchForm::new();
            form.set_requirement(text.as_str());
            form.set_top_n(*top_n);
            form.submit(client).await;
            finish(form.state(), form.error_message(), cli.json, |out, r| {
                display::write_search(out, r)
            })
        }
    }
}

/// Render a settled form, or turn its failure into the process error.
fn finish<T, F>(
    state: &OperationState<T>,
    error: Option<String>,
    json: bool,
    render: F,
) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&mut String, &T) -> fmt::Result,
{
    match state {
        OperationState::Success(value) if json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
        OperationState::Success(value) => {
            let mut out = String::new();
            render(&mut out, value)?;
            Ok(out)
        }
        _ => anyhow::bail!(
            "{}",
            error.unwrap_or_else(|| "request did not complete".to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use reqclass_client::OperationError;
    use reqclass_core::{ClassificationResult, RequirementType, ValidationError};

    use super::*;

    fn classification() -> ClassificationResult {
        ClassificationResult {
            kind: RequirementType::NonFunctional,
            confidence: 0.75,
        }
    }

    #[test]
    fn parses_search_with_defaults() {
        let cli = Cli::try_parse_from(["reqclass", "search", "audit trail"]).unwrap();
        assert_eq!(cli.api_url, DEFAULT_BASE_URL);
        assert!(!cli.json);
        match cli.command {
            Command::Search { text, top_n } => {
                assert_eq!(text, "audit trail");
                assert_eq!(top_n, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_negative_top_n_for_clamping() {
        let cli =
            Cli::try_parse_from(["reqclass", "analyze", "x", "--top-n", "-3", "--cluster"]).unwrap();
        match cli.command {
            Command::Analyze { top_n, cluster, .. } => {
                assert_eq!(top_n, -3);
                assert!(cluster);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reqclass",
            "classify",
            "Users can log in",
            "--api-url",
            "http://api.internal:8080/",
            "--timeout-secs",
            "10",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn parses_classify_file() {
        let cli = Cli::try_parse_from([
            "reqclass",
            "classify-file",
            "reqs.csv",
            "--media-type",
            "text/csv",
        ])
        .unwrap();
        match cli.command {
            Command::ClassifyFile { path, media_type } => {
                assert_eq!(path, PathBuf::from("reqs.csv"));
                assert_eq!(media_type.as_deref(), Some("text/csv"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn finish_renders_success() {
        let state = OperationState::Success(classification());
        let out = finish(&state, None, false, |out, r| {
            display::write_classification(out, r)
        })
        .unwrap();
        assert!(out.contains("NonFunctional Requirement"));
        assert!(out.contains("75.0%"));
    }

    #[test]
    fn finish_renders_json() {
        let state = OperationState::Success(classification());
        let out = finish(&state, None, true, |out, r| {
            display::write_classification(out, r)
        })
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["type"], "NonFunctional");
        assert_eq!(parsed["confidence"], 0.75);
    }

    #[test]
    fn finish_surfaces_failure_message() {
        let state: OperationState<ClassificationResult> =
            OperationState::Failed(OperationError::from(ValidationError::EmptyRequirement));
        let err = finish(
            &state,
            Some("Please enter a requirement to classify".into()),
            false,
            |out, r| display::write_classification(out, r),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a requirement to classify");
    }
}
