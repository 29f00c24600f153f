//! Terminal front-end for the coaching session.
//!
//! Runs the session controller with the null speech backends (a terminal
//! has neither synthesis nor recognition) and a typed turn loop:
//! pick `ask` or `roleplay` (then a role), type turns, read replies.
//! `reset` starts over; `quit` exits.

use skillbridge::speech::{NoRecognition, NullSynthesis};
use skillbridge::{AppConfig, DisplaySlot, IdentityStore, Role, Session, SessionState};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    run().await.map_err(|e| {
        tracing::error!(error = %e, "skillbridge exited with error");
        anyhow::anyhow!("skillbridge failed: {e}")
    })
}

async fn run() -> skillbridge::Result<()> {
    let config = AppConfig::load()?;
    let identity = IdentityStore::open_default().load_or_create()?;
    let mut session = Session::new(&config, NullSynthesis, NoRecognition)?;

    let greeting = identity
        .display_name
        .as_deref()
        .map_or_else(String::new, |name| format!(", {name}"));
    println!("Welcome to Skillbridge{greeting}!");
    println!("Choose a mode: `ask` or `roleplay`. `quit` exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        prompt_for(&session, &mut stdout).await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                session.reset();
                println!("Starting over. Choose `ask` or `roleplay`.");
                continue;
            }
            _ => {}
        }

        let outcome = match session.state() {
            SessionState::Idle => match line {
                "ask" => session.choose_ask().map(|()| None),
                "roleplay" => session.choose_roleplay().map(|()| None),
                other => {
                    println!("Unknown choice {other:?}. Try `ask` or `roleplay`.");
                    continue;
                }
            },
            SessionState::RoleplaySelecting => match line {
                "customer" => session.choose_role(Role::Customer).map(|o| {
                    println!("AI ({}): {o}", Role::Customer.label());
                    None
                }),
                "boss" => session.choose_role(Role::Boss).map(|o| {
                    println!("AI ({}): {o}", Role::Boss.label());
                    None
                }),
                other => {
                    println!("Unknown role {other:?}. Try `customer` or `boss`.");
                    continue;
                }
            },
            SessionState::AskMode | SessionState::RoleplayActive { .. } => {
                println!("Thinking...");
                session.submit(line).await.map(Some)
            }
        };

        match outcome {
            Ok(Some(reply)) => {
                let slot = match reply.slot {
                    DisplaySlot::Answer => "answer",
                    DisplaySlot::Feedback => "feedback",
                };
                println!("AI ({slot}): {}", reply.text);
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn prompt_for<S, R>(
    session: &Session<S, R>,
    stdout: &mut tokio::io::Stdout,
) -> std::io::Result<()>
where
    S: skillbridge::speech::SynthesisBackend,
    R: skillbridge::speech::RecognitionBackend,
{
    let hint = match session.state() {
        SessionState::Idle => "mode",
        SessionState::RoleplaySelecting => "role (customer/boss)",
        SessionState::AskMode => "ask",
        SessionState::RoleplayActive { .. } => "roleplay",
    };
    stdout.write_all(format!("[{hint}] > ").as_bytes()).await?;
    stdout.flush().await
}
