//! Command-line client for the question review API.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use qreview_core::config::normalize_api_url;
use qreview_core::filter::{FilterState, RequiresImage};
use qreview_core::models::{ApiAck, QuestionDetail, QuestionId, QuestionsPage, StatusMutation};
use qreview_core::view::DetailView;
use qreview_core::{ApiClient, AppError, DashboardState, DEFAULT_API_URL, FALLBACK_CATEGORY_COLOR};
use std::io;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qreview", about = "Question review CLI", version)]
struct Cli {
    /// Server URL (can also be set via QREVIEW_API_URL env var)
    #[arg(short, long, env = "QREVIEW_API_URL")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ImageRequirement {
    All,
    Yes,
    No,
}

impl From<ImageRequirement> for RequiresImage {
    fn from(value: ImageRequirement) -> Self {
        match value {
            ImageRequirement::All => RequiresImage::All,
            ImageRequirement::Yes => RequiresImage::Yes,
            ImageRequirement::No => RequiresImage::No,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List questions passing the given filters
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text search; a leading number also matches the question id
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        requires_image: ImageRequirement,
        /// Scope the collection to one source file
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Show one question with its predictions and consensus
    Show {
        id: QuestionId,
        #[arg(short, long)]
        file: Option<String>,
        /// Print the escaped HTML fragment instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Change a question's review status
    Mark {
        id: QuestionId,
        /// corrected, incorrect, or needs_review
        #[arg(value_parser = parse_mutation)]
        status: StatusMutation,
    },
}

fn parse_mutation(raw: &str) -> Result<StatusMutation, String> {
    StatusMutation::parse(raw).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected corrected, incorrect, or needs_review)",
            raw
        )
    })
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qreview=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn exit_with(action: &str, message: impl std::fmt::Display) -> ! {
    eprintln!("{} failed: {}", action, message);
    std::process::exit(1);
}

fn or_exit<T>(result: Result<T, AppError>, action: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => exit_with(action, err.user_message()),
    }
}

fn resolve_server(server: Option<String>) -> String {
    server
        .filter(|value| !value.trim().is_empty())
        .map(|value| normalize_api_url(&value))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn list_filters(
    status: Option<String>,
    category: Option<String>,
    search: Option<String>,
    requires_image: ImageRequirement,
    file: Option<String>,
) -> FilterState {
    FilterState {
        status,
        category,
        search: search.unwrap_or_default(),
        requires_image: requires_image.into(),
        file_path: file,
    }
}

fn format_list_output(
    page: QuestionsPage,
    filters: FilterState,
    json: bool,
) -> Result<String, String> {
    let scope = filters.file_path.clone();
    let mut dashboard = DashboardState::new(filters);
    dashboard.apply_questions(page, scope, None);
    dashboard.populate(false);

    if json {
        let matches: Vec<_> = dashboard
            .selector_ids()
            .into_iter()
            .filter_map(|id| dashboard.question(id))
            .collect();
        return encode(&matches);
    }

    Ok(dashboard
        .selector()
        .iter()
        .map(|entry| format!("{:<14} {}", entry.status.as_str(), entry.label))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn format_show_output(detail: &QuestionDetail, json: bool, html: bool) -> Result<String, String> {
    if json {
        return encode(detail);
    }
    if let Err(err) = detail.check_answer_key() {
        tracing::warn!("question {} has an inconsistent answer key: {:?}", detail.id, err);
    }
    let view = DetailView::build(detail, FALLBACK_CATEGORY_COLOR);
    if html {
        Ok(view.to_html())
    } else {
        Ok(view.to_text().trim_end().to_string())
    }
}

fn format_mark_output(
    id: QuestionId,
    mutation: StatusMutation,
    ack: &ApiAck,
    json: bool,
) -> Result<String, String> {
    if json {
        return encode(ack);
    }
    Ok(format!(
        "Question {} marked as {}.",
        id,
        mutation.target().label()
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let server = resolve_server(server);
    let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));
    let client = ApiClient::new(&server, timeout)?;

    let output = match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::List {
            status,
            category,
            search,
            requires_image,
            file,
        } => {
            let filters = list_filters(status, category, search, requires_image, file);
            let start = Instant::now();
            let page = or_exit(client.list_questions(filters.file_path.as_deref()), "List");
            log_timing(timing, "list", start.elapsed());
            format_list_output(page, filters, json)
                .unwrap_or_else(|message| exit_with("List", message))
        }
        Commands::Show { id, file, html } => {
            let start = Instant::now();
            let detail = or_exit(client.get_question(id, file.as_deref()), "Show");
            log_timing(timing, "show", start.elapsed());
            format_show_output(&detail, json, html)
                .unwrap_or_else(|message| exit_with("Show", message))
        }
        Commands::Mark { id, status } => {
            let start = Instant::now();
            let ack = or_exit(client.mark_status(id, status), "Mark");
            log_timing(timing, "mark", start.elapsed());
            format_mark_output(id, status, &ack, json)
                .unwrap_or_else(|message| exit_with("Mark", message))
        }
    };
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
