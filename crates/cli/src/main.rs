//! `trigger-inspect` CLI entry-point.
//!
//! Available sub-commands:
//! - `classify`    — print the trigger capability of each workflow.
//! - `fields`      — print the form fields of form-trigger workflows.
//! - `check`       — report whether workflows accept text or voice input.
//! - `webhook-url` — print the webhook URL of each workflow.
//!
//! Every command reads a workflow document: a single workflow, an array, or
//! a `{ "data": [...] }` listing page.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::models::filter_active;
use engine::{
    ClassifierConfig, FormFieldExtractor, InputKind, TriggerClassifier, Workflow, WorkflowDocument,
};
use nodes::{NodeTypeRegistry, TracingSink};

#[derive(Parser)]
#[command(
    name = "trigger-inspect",
    about = "Classify workflow triggers and extract form fields",
    version
)]
struct Cli {
    #[command(flatten)]
    classifier: ClassifierArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ClassifierArgs {
    /// Extra node-type registry (JSON object of node type → trigger type).
    #[arg(long, env = "TRIGGER_REGISTRY", global = true)]
    registry: Option<PathBuf>,

    /// Match registry entries case-sensitively only.
    #[arg(long, global = true)]
    strict_case: bool,

    /// Do not classify unlisted `*Trigger` nodes as app-specific.
    #[arg(long, global = true)]
    no_app_triggers: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the trigger capability of each workflow as JSON.
    Classify {
        path: PathBuf,
        /// Include inactive workflows.
        #[arg(long)]
        all: bool,
    },
    /// Print the form fields of each form-trigger workflow as JSON.
    Fields { path: PathBuf },
    /// Check whether each workflow accepts the given input; exits 1 if any does not.
    Check {
        path: PathBuf,
        #[arg(long, default_value = "text")]
        input: InputKind,
    },
    /// Print the production webhook URL of each workflow.
    WebhookUrl {
        path: PathBuf,
        #[arg(long, env = "N8N_BASE_URL")]
        base_url: String,
    },
}

fn build_classifier(args: &ClassifierArgs) -> Result<TriggerClassifier> {
    let config = ClassifierConfig {
        case_insensitive_match: !args.strict_case,
        detect_app_triggers: !args.no_app_triggers,
    };
    let sink = Arc::new(TracingSink);

    match &args.registry {
        Some(path) => TriggerClassifier::with_registry_file(path, config, sink)
            .with_context(|| format!("loading registry {}", path.display())),
        None => Ok(TriggerClassifier::new(NodeTypeRegistry::builtin(), config, sink)),
    }
}

fn read_workflows(path: &Path) -> Result<Vec<Workflow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    let document = WorkflowDocument::from_json_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    let workflows = document.into_workflows();
    info!("loaded {} workflow(s) from {}", workflows.len(), path.display());
    Ok(workflows)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let classifier = build_classifier(&cli.classifier)?;

    match cli.command {
        Command::Classify { path, all } => {
            let mut workflows = read_workflows(&path)?;
            if !all {
                workflows = filter_active(workflows);
            }
            let report: Vec<_> = workflows
                .iter()
                .map(|wf| {
                    let capability = classifier.classify(wf);
                    json!({
                        "id": wf.id,
                        "name": wf.name,
                        "label": capability.label(),
                        "tone": capability.badge_tone(),
                        "capability": capability,
                    })
                })
                .collect();
            print_json(&json!(report))?;
        }
        Command::Fields { path } => {
            let extractor = FormFieldExtractor::new(classifier);
            for wf in read_workflows(&path)? {
                match extractor.extract(&wf) {
                    Some(fields) => print_json(&json!({ "id": wf.id, "name": wf.name, "fields": fields }))?,
                    None => eprintln!("{}: not a form trigger", wf.name),
                }
            }
        }
        Command::Check { path, input } => {
            let mut incompatible = 0usize;
            for wf in read_workflows(&path)? {
                match classifier.incompatibility_reason(&wf, input) {
                    Some(reason) => {
                        incompatible += 1;
                        println!("✗ {reason}");
                    }
                    None => println!("✓ \"{}\" accepts {input} input", wf.name),
                }
            }
            if incompatible > 0 {
                std::process::exit(1);
            }
        }
        Command::WebhookUrl { path, base_url } => {
            for wf in read_workflows(&path)? {
                match engine::webhook_url(&wf, &base_url) {
                    Some(url) => println!("{}\t{url}", wf.name),
                    None => eprintln!("{}: no webhook or form trigger with a path", wf.name),
                }
            }
        }
    }

    Ok(())
}
