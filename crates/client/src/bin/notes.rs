use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use client::{ApiClient, Orchestrator, Outcome, SummaryDraft};

#[derive(Parser, Debug)]
#[command(name = "notes", about = "Upload a transcript, summarize it and email the result")]
struct Args {
    /// Base URL of the API server
    #[arg(long, env = "NOTES_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Transcript file to upload. Reads stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(short, long, default_value = "Summarize in bullet points for executives.")]
    instruction: String,

    /// Comma separated recipients. Nothing is sent when omitted.
    #[arg(long)]
    to: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let orchestrator = Orchestrator::new(Arc::new(ApiClient::new(args.server.clone())));

    let transcript = match &args.file {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "transcript.txt".to_string());

            let outcome = orchestrator.upload(&file_name, bytes).await;
            report(&orchestrator);
            expect_done(outcome)?
        }
        None => {
            let mut pasted = String::new();
            tokio::io::stdin()
                .read_to_string(&mut pasted)
                .await
                .context("Failed to read transcript from stdin")?;
            pasted
        }
    };

    eprintln!("{} chars", transcript.chars().count());

    let outcome = orchestrator.summarize(&transcript, &args.instruction).await;
    report(&orchestrator);
    let draft = expect_done(outcome)?;
    print_draft(&draft);

    if let Some(to) = &args.to {
        let outcome = orchestrator.send_email(&draft, to).await;
        report(&orchestrator);
        let sent = expect_done(outcome)?;
        eprintln!("message id: {}", sent.message_id);
    }

    Ok(())
}

fn report(orchestrator: &Orchestrator) {
    if let Some(notice) = orchestrator.notice() {
        eprintln!("» {}", notice);
    }
}

fn expect_done<T>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Done(value) => Ok(value),
        Outcome::Failed(message) => bail!(message),
        Outcome::Discarded | Outcome::Ignored => bail!("request did not complete"),
    }
}

fn print_draft(draft: &SummaryDraft) {
    println!("{}", draft.plain_text());
}
