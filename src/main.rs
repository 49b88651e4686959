mod archive;
mod auth;
mod capture;
mod config;
mod conversation;
mod interviewer;
mod session;

use anyhow::Context;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::{LoginPayload, ProfileFields, SessionStore};
use capture::CaptureState;
use capture::camera::{NoCamera, VideoSlot};
use capture::voice::Unsupported;
use config::{Config, Environment};
use conversation::{Language, PriorDocuments, SessionContext};
use interviewer::SessionMode;
use interviewer::openai::OpenAiInterviewer;
use session::{Applied, InterviewSession, SessionState, TurnOutcome, format_elapsed};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "interview-simulator",
    about = "Rehearse a job interview against an AI or scripted interviewer"
)]
struct Args {
    /// Job role the interview is for
    #[structopt(short, long, default_value = "Software Engineer")]
    role: String,

    /// Interview language (en or fr)
    #[structopt(short, long, default_value = "en")]
    language: Language,

    /// Path to configuration TOML file
    #[structopt(short = "c", long)]
    config: Option<PathBuf>,

    /// Plain-text CV shared with the interviewer
    #[structopt(long)]
    cv: Option<PathBuf>,

    /// Plain-text cover letter shared with the interviewer
    #[structopt(long)]
    cover_letter: Option<PathBuf>,

    /// Sign-in credential (JWT) identifying the candidate
    #[structopt(long, conflicts_with = "profile")]
    credential: Option<String>,

    /// Candidate profile as JSON with `email`, `name` and `id` or `sub`
    #[structopt(long)]
    profile: Option<String>,

    /// Use the scripted interviewer even when an API key is configured
    #[structopt(long)]
    scripted: bool,
}

type Turn = Pin<Box<dyn Future<Output = TurnOutcome>>>;

const HELP: &str = "Type an answer and press enter to send it. Commands:
  /start        begin the interview (from the preview)
  /camera       toggle the camera
  /mic          toggle the microphone
  /voice        start or stop voice input
  /voice-lang   switch voice input between en and fr
  /send         send what voice input has captured
  /hint         show a sample answer (scripted interviews)
  /time         show the elapsed time
  /end          end the interview
  /help         show this message";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let environment = envy::from_env::<Environment>()?;
    let args = Args::from_args();
    let config = Config::load(args.config.as_deref()).await?;

    let mut store = SessionStore::default();
    if let Some(payload) = login_payload(&args)? {
        let user = store.login(payload).context("Failed to sign in")?;
        println!("Signed in as {}.", user.name);
    }

    let context = SessionContext {
        role: args.role.clone(),
        language: args.language,
        documents: PriorDocuments {
            cv: read_document(args.cv.as_deref()).await?,
            cover_letter: read_document(args.cover_letter.as_deref()).await?,
        },
    };

    let mode = match environment.openai_api_key {
        Some(api_key) if !args.scripted => SessionMode::Assisted(Arc::new(
            OpenAiInterviewer::new(config.openai.clone(), api_key)
                .context("Failed to build chat completion client")?,
        )),
        Some(_) => SessionMode::Scripted,
        None => {
            tracing::warn!("OPENAI_API_KEY not set, the interview will use scripted questions");
            SessionMode::Scripted
        }
    };

    let capture = CaptureState::new(Arc::new(NoCamera), Arc::new(Unsupported), args.language);
    let mut session = InterviewSession::new(context, mode, config.pacing, capture)
        .with_candidate(store.current().cloned());

    println!(
        "Interview for a {} position. Set up your camera and microphone, then type /start.",
        session.context().role
    );
    println!("{HELP}");

    let Some(summary) = run(&mut session).await? else {
        return Ok(());
    };

    println!(
        "Interview finished after {} with {} messages.",
        format_elapsed(std::time::Duration::from_secs(summary.elapsed_secs)),
        summary.transcript.len()
    );

    if config.archive.enabled {
        let archive = archive::SummaryArchive::new(config.archive.directory.clone()).await?;
        let key = archive.store(&summary).await?;
        println!("Transcript saved for review under key {key}.");
    }

    Ok(())
}

/// Terminal event loop. Returns the summary once the interview is ended,
/// or `None` if input closed before it started.
async fn run(session: &mut InterviewSession) -> anyhow::Result<Option<conversation::SessionSummary>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<Turn> = None;

    loop {
        let turn = async {
            match pending.as_mut() {
                Some(turn) => turn.await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            outcome = turn => {
                pending = None;
                match session.apply(outcome) {
                    Applied::Interviewer(message) => println!("\nInterviewer: {}\n", message.text),
                    Applied::Concluded => println!("\nThe interviewer has no more questions. Type /end to finish."),
                    Applied::Discarded => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    if session.state() == SessionState::Initializing {
                        return Ok(None);
                    }
                    return Ok(Some(session.end()?));
                };

                match line.trim() {
                    "" => {}
                    "/end" => return Ok(Some(session.end()?)),
                    "/help" => println!("{HELP}"),
                    "/camera" => {
                        session.toggle_camera().await;
                        match session.capture().video_slot() {
                            VideoSlot::Live(_) => println!("Camera on."),
                            VideoSlot::Detached => println!("Camera on, paused while listening."),
                            VideoSlot::Placeholder => println!("Camera off."),
                        }
                    }
                    "/mic" => {
                        if session.toggle_microphone() {
                            println!("Microphone on.");
                        } else {
                            println!("Microphone off.");
                        }
                    }
                    "/voice" => {
                        if session.capture().is_capturing_voice() {
                            session.stop_voice();
                            println!("Voice input stopped. Pending answer: {}", session.input());
                        } else {
                            match session.start_voice() {
                                Ok(()) => println!("Listening…"),
                                Err(err) => match session.capture().voice_notice() {
                                    Some(notice) => println!("{notice}"),
                                    None => println!("{err}"),
                                },
                            }
                        }
                    }
                    "/voice-lang" => {
                        let language = match session.capture().voice_language() {
                            Language::En => Language::Fr,
                            Language::Fr => Language::En,
                        };
                        session.capture_mut().set_voice_language(language);
                        println!("Voice input language: {language}.");
                    }
                    "/hint" => match session.hint() {
                        Some(hint) => println!("For example: {hint}"),
                        None => println!("No hint available."),
                    },
                    "/time" => println!("{}", format_elapsed(session.elapsed())),
                    "/start" => match session.begin() {
                        Ok(turn) => pending = Some(Box::pin(turn.resolve())),
                        Err(err) => println!("{err}"),
                    },
                    "/send" => match session.submit() {
                        Ok(turn) => pending = Some(Box::pin(turn.resolve())),
                        Err(err) => println!("{err}"),
                    },
                    answer => {
                        if session.is_input_locked() {
                            println!("Please wait for the interviewer.");
                            continue;
                        }
                        session.append_input(answer);
                        match session.submit() {
                            Ok(turn) => pending = Some(Box::pin(turn.resolve())),
                            Err(err) => println!("{err}"),
                        }
                    }
                }
            }
        }
    }
}

fn login_payload(args: &Args) -> anyhow::Result<Option<LoginPayload>> {
    if let Some(credential) = &args.credential {
        return Ok(Some(LoginPayload::credential(credential.clone())));
    }
    args.profile
        .as_deref()
        .map(|profile| {
            serde_json::from_str::<ProfileFields>(profile)
                .map(LoginPayload::profile)
                .context("Failed to parse candidate profile JSON")
        })
        .transpose()
}

async fn read_document(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    Ok(Some(text.trim().to_owned()).filter(|text| !text.is_empty()))
}
