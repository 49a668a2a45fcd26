//! CLI entrypoint for boardroom
//!
//! This is the main binary that wires together all layers using
//! dependency injection and runs the interactive panel session.

use anyhow::{Context, Result, bail};
use boardroom_application::{
    DocumentAnalyzer, EndSessionUseCase, EngineError, EngineParams, FollowupEvaluator,
    FollowupJudge, NoFollowupJudge, PromptView, QuestionGenerator, QuestionSynthesizer,
    RandomSource, SessionStore, SessionSummary, StartSessionInput, StartSessionUseCase,
    SubmitAnswerInput, SubmitAnswerUseCase,
};
use boardroom_domain::{AnswerModality, Role, SessionLimit, SessionMeta, SessionOptions};
use boardroom_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, OfflineAnalyzer, OpenAiConfig, OpenAiGateway,
    ThreadRandom,
};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boardroom", version)]
#[command(about = "Face a panel of executives who question your business document")]
struct Cli {
    /// Path to the document under review
    document: PathBuf,

    /// Company name used in prompts
    #[arg(long)]
    company: Option<String>,

    /// Industry used in prompts
    #[arg(long)]
    industry: Option<String>,

    /// Kind of document (e.g. "Business Plan", "Pitch Deck")
    #[arg(long)]
    report_type: Option<String>,

    /// Panel roles, comma-separated (ceo, cfo, cto, cmo, coo)
    #[arg(long, default_value = "ceo,cfo,cto")]
    roles: String,

    /// Maximum number of questions
    #[arg(long)]
    limit: Option<u32>,

    /// End the session after this many seconds instead of a question count
    #[arg(long, conflicts_with = "limit")]
    time_limit_secs: Option<u64>,

    /// Never ask clarifying follow-up questions
    #[arg(long)]
    no_followups: bool,

    /// Run without the external AI (template questions only)
    #[arg(long)]
    offline: bool,

    /// Write the transcript to this file when the session ends
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything the interactive loop needs, wired once at startup
struct Engine {
    start: StartSessionUseCase,
    submit: SubmitAnswerUseCase,
    end: EndSessionUseCase,
}

fn wire(cli: &Cli, config: &FileConfig) -> Engine {
    let params = EngineParams {
        generation_timeout: Duration::from_secs(config.generator.timeout_secs),
        ..EngineParams::default()
    };

    let api_key = config
        .generator
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    // Online mode needs a key; otherwise every AI port gets its
    // offline stand-in and the engine runs on templates alone.
    let gateway = match api_key {
        Some(key) if !cli.offline => Some(Arc::new(OpenAiGateway::new(OpenAiConfig {
            base_url: config.generator.base_url.clone(),
            api_key: key,
            model: config.generator.model.clone(),
            temperature: config.generator.temperature,
            max_tokens: config.generator.max_tokens,
        }))),
        _ => None,
    };

    if gateway.is_none() {
        info!("running offline: template questions, no follow-ups, fallback topics");
    }

    let generator: Option<Arc<dyn QuestionGenerator>> =
        gateway.clone().map(|g| g as Arc<dyn QuestionGenerator>);
    let judge: Arc<dyn FollowupJudge> = match &gateway {
        Some(g) => Arc::clone(g) as Arc<dyn FollowupJudge>,
        None => Arc::new(NoFollowupJudge),
    };
    let analyzer: Arc<dyn DocumentAnalyzer> = match &gateway {
        Some(g) => Arc::clone(g) as Arc<dyn DocumentAnalyzer>,
        None => Arc::new(OfflineAnalyzer),
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
    let synthesizer = Arc::new(QuestionSynthesizer::new(
        generator,
        Arc::clone(&random),
        params.clone(),
    ));

    Engine {
        start: StartSessionUseCase::new(
            analyzer,
            Arc::clone(&synthesizer),
            Arc::clone(&store),
            params.clone(),
        ),
        submit: SubmitAnswerUseCase::new(
            Arc::clone(&synthesizer),
            FollowupEvaluator::new(judge, params),
            Arc::clone(&store),
            random,
        ),
        end: EndSessionUseCase::new(store),
    }
}

fn parse_roles(list: &str) -> Result<Vec<Role>> {
    let mut roles = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let role: Role = part
            .parse()
            .with_context(|| format!("invalid role '{part}' (use ceo, cfo, cto, cmo, coo)"))?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        bail!("at least one role is required");
    }
    Ok(roles)
}

fn print_prompt(view: &PromptView) {
    let tag = if view.is_followup { " [follow-up]" } else { "" };
    println!();
    println!("{} {}{}:", view.title, view.speaker, tag);
    println!("  {}", view.text);
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("--- Session summary ---");
    println!("Company:    {}", summary.company_name);
    println!("Document:   {}", summary.report_type);
    println!("Questions:  {}", summary.total_questions);
    println!("Follow-ups: {}", summary.total_followups);
    println!("Answers:    {}", summary.total_answers);
    println!("Panel:      {}", summary.roles_involved.join(", "));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;

    let document = std::fs::read_to_string(&cli.document)
        .with_context(|| format!("failed to read {}", cli.document.display()))?;

    let roles = parse_roles(&cli.roles)?;
    let limit = match cli.time_limit_secs {
        Some(secs) => SessionLimit::Seconds(secs),
        None => SessionLimit::Questions(cli.limit.unwrap_or(config.engine.question_limit)),
    };

    let defaults = SessionMeta::default();
    let meta = SessionMeta {
        company_name: cli.company.clone().unwrap_or(defaults.company_name),
        industry: cli.industry.clone().unwrap_or(defaults.industry),
        report_type: cli.report_type.clone().unwrap_or(defaults.report_type),
    };

    let engine = wire(&cli, &config);

    println!();
    println!("+============================================================+");
    println!("|              boardroom - executive panel                   |");
    println!("+============================================================+");
    println!();
    println!("Company:  {}", meta.company_name);
    println!("Document: {} ({})", meta.report_type, cli.document.display());
    println!(
        "Panel:    {}",
        roles
            .iter()
            .map(|r| r.title())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
    println!("Answer each question, or type /end to stop early.");

    let started = engine
        .start
        .execute(StartSessionInput {
            document,
            meta,
            roles,
            limit,
            options: SessionOptions {
                followups_enabled: !cli.no_followups,
            },
        })
        .await?;
    let session_id = started.session_id.clone();

    let mut prompt = started.first_prompt();
    print_prompt(prompt.view());

    let stdin = std::io::stdin();
    while !prompt.is_closing() {
        print!("\n> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: end the session gracefully.
            break;
        }
        let answer = line.trim();
        if answer == "/end" {
            break;
        }
        if answer.is_empty() {
            println!("(the panel is waiting for an answer)");
            continue;
        }

        match engine
            .submit
            .execute(SubmitAnswerInput {
                session_id: session_id.clone(),
                answer: answer.to_string(),
                modality: AnswerModality::Text,
            })
            .await
        {
            Ok(next) => {
                print_prompt(next.view());
                prompt = next;
            }
            Err(EngineError::SessionEnded(_)) => break,
            Err(e) => return Err(e.into()),
        }
    }

    let summary = engine.end.execute(&session_id).await?;
    print_summary(&summary);

    if let Some(path) = &cli.transcript {
        let transcript = engine.end.transcript(&session_id).await?;
        std::fs::write(path, transcript)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Transcript written to {}", path.display());
    }

    Ok(())
}
