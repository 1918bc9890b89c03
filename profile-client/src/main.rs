use profile_client::{logger, Config, Screen, SessionGate};

use std::error::Error;
use std::sync::Arc;

use log::info;
use profile_auth::{IdentityProvider, LocalSessionHub, OAuthProvider, SessionEvent};
use profile_db::{open_pool, run_migrations, ProfileRepository};
use tokio::io::{AsyncBufReadExt, BufReader};

enum Step {
    Event(Option<SessionEvent>),
    Line(Option<String>),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    logger::initialize(
        config.level_filter(),
        config.log_file.clone(),
        config.log_colored,
    )?;

    let pool = open_pool(&config.database_path).await?;
    run_migrations(&pool).await?;
    info!("database ready at {}", config.database_path.display());

    let provider = Arc::new(LocalSessionHub::with_dev_identity(
        config.dev_identity.clone(),
    ));
    let store = Arc::new(ProfileRepository::new(pool));

    // The driver loop listens on its own subscription; the gate holds its
    // own handle for the same stream.
    let mut events = provider.subscribe();

    let mut gate = SessionGate::new(provider, store, config.app_origin.clone());
    gate.start().await;
    gate.load_profile().await;
    print_screen(&gate);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let step = tokio::select! {
            event = events.next() => Step::Event(event),
            line = lines.next_line() => Step::Line(line?),
        };

        match step {
            Step::Event(None) | Step::Line(None) => break,
            Step::Event(Some(event)) => {
                gate.apply_event(event);
                gate.load_profile().await;
            }
            Step::Line(Some(line)) => {
                if !handle_command(&mut gate, line.trim()).await {
                    break;
                }
                gate.load_profile().await;
            }
        }

        print_screen(&gate);
    }

    gate.stop();
    events.stop();
    Ok(())
}

async fn handle_command(gate: &mut SessionGate, line: &str) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" | "show" => {}
        "login" => gate.sign_in(OAuthProvider::Google).await,
        "logout" => {
            if let Some(editor) = gate.editor_mut() {
                editor.sign_out().await;
            }
        }
        "name" => {
            if let Some(editor) = gate.editor_mut() {
                editor.set_username(rest);
            }
        }
        "save" => {
            if let Some(editor) = gate.editor_mut() {
                editor.save().await;
            }
        }
        "quit" | "exit" => return false,
        _ => println!("commands: login, logout, name <value>, save, show, quit"),
    }

    true
}

fn print_screen(gate: &SessionGate) {
    match gate.screen() {
        Screen::SignInPrompt => {
            println!("Signed out. Use `login` to sign in with Google.");
            if let Some(err) = gate.last_error() {
                println!("  ! {}", err);
            }
        }
        Screen::Editor => {
            let Some(editor) = gate.editor() else {
                return;
            };
            println!("Profile Settings - {}", editor.email().unwrap_or("(no email)"));
            if editor.is_loading() {
                println!("  loading profile...");
                return;
            }
            let marker = if editor.is_dirty() { " (unsaved)" } else { "" };
            println!("  username: @{}{}", editor.username().unwrap_or(""), marker);
            if editor.is_saving() {
                println!("  saving...");
            }
            if let Some(err) = editor.error() {
                println!("  ! {}", err);
            }
            if let Some(notice) = editor.notice() {
                println!("  {}", notice);
            }
        }
    }
}
