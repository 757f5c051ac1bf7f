use std::process::ExitCode;
use std::sync::Arc;

use symposium::cli::output::Output;
use symposium::cli::{Cli, Commands};
use symposium::comments::LocalCommentService;
use symposium::content::{validate_post_citations, ContentGenerator};
use symposium::debate::{DebateOrchestrator, ReplyResponder};
use symposium::llm::LLMClient;
use symposium::research::{FsDossierStore, ResearchPipeline, WebSearchCollector};
use symposium::run::RunContext;
use symposium::workflows::{InteractionWorkflow, LocalDraftWriter, PostWorkflow};
use symposium::{AgentRoster, AppConfig, AppError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level, cli.verbose, cli.json_logs);

    match run(cli.command, &config, &output).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(level: &str, verbose: bool, json: bool) {
    let fallback = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(command: Commands, config: &AppConfig, output: &Output) -> Result<ExitCode> {
    match command {
        Commands::Research { agent } => {
            let roster = AgentRoster::load_dir(&config.agents_dir)?;
            let agent = roster
                .find(&agent)
                .ok_or_else(|| AppError::NotFound(format!("Agent '{}' is not configured", agent)))?;

            let pipeline = research_pipeline(config)?;
            let run = pipeline.run(agent).await?;

            output.success(&format!("Research dossier for {}", agent.name));
            output.kv("topic", &run.dossier.topic);
            output.kv("sources", &run.dossier.sources.len().to_string());
            output.kv("supported claims", &run.dossier.supported_claims.len().to_string());
            output.kv("dropped claims", &run.dossier.dropped_claims.len().to_string());
            output.kv("attempts", &run.attempts.to_string());
            output.kv("dossier", &run.artifacts.dossier_path);
            output.kv("summary", &run.artifacts.summary_path);
            Ok(ExitCode::SUCCESS)
        }

        Commands::CheckCitations { file, sources } => {
            let body = tokio::fs::read_to_string(&file).await?;
            let report = validate_post_citations(&body, sources);
            output.citation_report(&report);
            Ok(if report.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }

        Commands::Interact { agents, max_rounds } => {
            let roster = AgentRoster::load_dir(&config.agents_dir)?;
            if roster.is_empty() {
                return Err(AppError::Configuration(format!(
                    "No agents configured in {}",
                    config.agents_dir.display()
                )));
            }
            let selected = if agents.is_empty() {
                roster.agents().to_vec()
            } else {
                roster.select(&agents)
            };
            if selected.is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "None of the requested agents are configured: {}",
                    agents.join(", ")
                )));
            }

            let content_client: Arc<dyn LLMClient> =
                Arc::from(config.content_provider()?.create_client()?);
            let content = ContentGenerator::new(content_client);
            let comments = Arc::new(LocalCommentService::with_log(&config.comments_path));
            let dossiers = Arc::new(FsDossierStore::new(&config.research_path));

            let workflow = InteractionWorkflow::new(
                PostWorkflow::new(
                    research_pipeline(config)?,
                    content.clone(),
                    LocalDraftWriter::new(&config.local_drafts_path),
                    config.image_style.clone(),
                ),
                DebateOrchestrator::new(content.clone(), comments.clone(), dossiers),
                ReplyResponder::new(content, comments),
                max_rounds.unwrap_or(config.max_debate_rounds),
            );

            let mut ctx = RunContext::new("interact", roster);
            workflow.run(&mut ctx, &selected).await?;

            let run_id = ctx.run_id.clone();
            let summary = serde_json::json!({
                "runId": run_id,
                "result": ctx.finish(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn research_pipeline(config: &AppConfig) -> Result<ResearchPipeline> {
    let client = config.research_provider()?.openai_client()?;
    Ok(ResearchPipeline::new(
        Arc::new(WebSearchCollector::new(client, &config.research_timezone)),
        Arc::new(FsDossierStore::new(&config.research_path)),
        config.pipeline_options(),
    ))
}
