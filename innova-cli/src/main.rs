use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use innova_core::stats::average_progress;
use innova_core::time::{days_until, to_rfc3339_utc};
use innova_core::{
    achievements, dashboard_summary, user_stats, AgentMessage, AppState, BlobStore, ProfilePatch,
    View, AGENTS,
};
use tracing_subscriber::EnvFilter;

mod chat;
mod coach_cmd;
mod config;
mod projects_cmd;
mod state;

use coach_cmd::{StackArgs, TextInput};
use config::{init_config, load_config, show_config, Config};
use projects_cmd::{print_task_stats, project_line, ProjectCommand, TaskCommand};
use state::{open_state, FileStore};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("INNOVA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "innova",
    version,
    long_version = LONG_VERSION,
    about = "InnovaHack: a hackathon coach for your terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an email (no password; the email is your identity)
    Signin {
        #[arg(long)]
        email: String,

        /// Display name (defaults to the part before '@')
        #[arg(long)]
        name: Option<String>,
    },

    /// Forget the signed-in user (projects stay on disk)
    Signout,

    /// Print the signed-in user
    Whoami,

    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Show the current screen, or switch to one and render it
    View {
        /// landing | dashboard | profile | idea-evaluation | tech-stack |
        /// deadline-management | pitch-optimization | qa-section | task-management
        name: Option<View>,
    },

    /// Projects, progress and agent messages at a glance
    Dashboard,

    /// Agent messages derived from your projects
    Notifications {
        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage tasks inside a project
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Score a project idea
    EvaluateIdea(TextInput),

    /// Score a pitch and simulate judge questions
    Pitch(TextInput),

    /// Suggest a tech stack for a project kind and requirements
    TechStack(StackArgs),

    /// Ask the mentor a single question
    Ask {
        question: Vec<String>,
    },

    /// Interactive chat with the guide (TTY required)
    Chat {
        /// Do not write ~/.innova/chat/YYYY-MM-DD.md
        #[arg(long)]
        no_log: bool,
    },

    /// Manage ~/.innova/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Profile details, stats and achievements
    Show,

    /// Update profile fields (pass an empty string to clear one)
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        github: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("INNOVA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("innova=warn,innova_core=warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .compact()
        .init();

    let cli = Cli::parse();
    let cfg = load_config()?;

    match cli.command {
        Command::Signin { email, name } => {
            let mut app = open_state(&cfg)?;
            let user = app.sign_in(&email, name.as_deref(), Utc::now())?;
            println!("Signed in as {} <{}>", user.name, user.email);
            println!("Next: innova project create --name .. --idea .. --deadline YYYY-MM-DD");
        }

        Command::Signout => {
            let mut app = open_state(&cfg)?;
            app.sign_out()?;
            println!("Signed out.");
        }

        Command::Whoami => {
            let app = open_state(&cfg)?;
            match app.user() {
                Some(u) => println!("{} <{}>  id={}", u.name, u.email, u.id),
                None => println!("Not signed in."),
            }
        }

        Command::Profile { command } => run_profile(&cfg, command)?,

        Command::View { name } => {
            let mut app = open_state(&cfg)?;
            let view = match name {
                Some(v) => app
                    .navigate(v)
                    .with_context(|| format!("cannot open {v}; run: innova signin --email .."))?,
                None => app.view(),
            };
            render_view(&cfg, &app, view)?;
        }

        Command::Dashboard => {
            let mut app = open_state(&cfg)?;
            require_user(&app)?;
            app.navigate(View::Dashboard)?;
            render_view(&cfg, &app, View::Dashboard)?;
        }

        Command::Notifications { watch } => {
            if watch {
                watch_notifications(&cfg).await?;
            } else {
                let app = open_state(&cfg)?;
                require_user(&app)?;
                print_notifications(&app.notifications(Utc::now()));
            }
        }

        Command::Project { command } => projects_cmd::run_project(&cfg, command)?,
        Command::Task { command } => projects_cmd::run_task(&cfg, command)?,

        Command::EvaluateIdea(input) => coach_cmd::run_evaluate_idea(&cfg, input).await?,
        Command::Pitch(input) => coach_cmd::run_pitch(&cfg, input).await?,
        Command::TechStack(args) => coach_cmd::run_tech_stack(&cfg, args)?,
        Command::Ask { question } => coach_cmd::run_ask(&cfg, &question).await?,

        Command::Chat { no_log } => {
            let mut app = open_state(&cfg)?;
            app.navigate(View::QaSection)
                .context("Not signed in. Run: innova signin --email you@example.com")?;
            chat::run_chat(cfg.typing_delay(), !no_log)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => show_config()?,
        },
    }

    Ok(())
}

fn require_user<S: BlobStore>(app: &AppState<S>) -> Result<()> {
    if app.user().is_none() {
        bail!("Not signed in. Run: innova signin --email you@example.com");
    }
    Ok(())
}

fn run_profile(cfg: &Config, command: ProfileCommand) -> Result<()> {
    let mut app = open_state(cfg)?;
    require_user(&app)?;
    match command {
        ProfileCommand::Show => render_view(cfg, &app, View::Profile)?,
        ProfileCommand::Set {
            name,
            avatar,
            bio,
            location,
            website,
            github,
            linkedin,
        } => {
            let patch = ProfilePatch {
                name,
                avatar,
                bio,
                location,
                website,
                github,
                linkedin,
            };
            if patch == ProfilePatch::default() {
                bail!("Nothing to update. Pass at least one of --name --bio --location ..");
            }
            let user = app.update_profile(patch, Utc::now())?;
            println!("Profile updated for {}.", user.name);
        }
    }
    Ok(())
}

fn render_view(cfg: &Config, app: &AppState<FileStore>, view: View) -> Result<()> {
    let now = Utc::now();
    println!("== {} ==\n", view.title());

    match view {
        View::Landing => {
            println!("Your AI-shaped hackathon team, minus the AI:");
            for agent in AGENTS {
                println!("  {agent}");
            }
            println!("\nGet started: innova signin --email you@example.com");
        }

        View::Dashboard => {
            let projects = app.my_projects_owned();
            let summary = dashboard_summary(&projects, now, app.timezone());
            if let Some(u) = app.user() {
                println!("Welcome back, {}.", u.name);
            }
            println!(
                "{} projects, {}% average progress, {} urgent tasks\n",
                summary.projects, summary.average_progress, summary.urgent_tasks
            );
            for p in &projects {
                println!("{}", project_line(p, days_until(p.deadline, now, app.timezone())));
            }
            println!();
            print_notifications(&app.notifications(now));
        }

        View::Profile => {
            let Some(u) = app.user() else {
                bail!("Not signed in.");
            };
            println!("{} <{}>", u.name, u.email);
            let fields = [
                ("Avatar", &u.avatar),
                ("Bio", &u.bio),
                ("Location", &u.location),
                ("Website", &u.website),
                ("GitHub", &u.github),
                ("LinkedIn", &u.linkedin),
            ];
            for (label, value) in fields {
                if let Some(v) = value {
                    println!("{label:<9} {v}");
                }
            }
            println!("Joined    {}", u.joined_date.format("%Y-%m-%d"));
            println!("Active    {}", to_rfc3339_utc(u.last_active));

            let projects = app.my_projects_owned();
            let s = user_stats(&projects);
            println!("\n## Stats");
            println!("Projects:   {} ({} completed)", s.total_projects, s.completed_projects);
            println!("Tasks:      {} ({} completed)", s.total_tasks, s.completed_tasks);
            println!("Avg. progress: {}%", s.average_progress);
            println!(
                "Hackathons: {}  Pitches: {}  Questions: {}",
                s.hackathons_participated, s.pitches_optimized, s.questions_asked
            );

            let unlocked = achievements(&projects, now);
            println!("\n## Achievements");
            if unlocked.is_empty() {
                println!("(none yet; create your first project)");
            }
            for a in unlocked {
                println!("{} {}: {}", a.icon, a.title, a.description);
            }
        }

        View::DeadlineManagement => {
            let projects = app.my_projects_owned();
            println!("Average progress: {}%\n", average_progress(&projects));
            let mut by_deadline: Vec<_> = projects.iter().collect();
            by_deadline.sort_by_key(|p| p.deadline);
            for p in by_deadline {
                println!("{}", project_line(p, days_until(p.deadline, now, app.timezone())));
            }
        }

        View::TaskManagement => {
            print_task_stats(&app.my_projects_owned(), app.today(now));
            println!("\nToggle a task: innova task toggle <project> <number>");
        }

        View::IdeaEvaluation => println!("Score an idea: innova evaluate-idea \"<your idea>\""),
        View::PitchOptimization => println!("Score a pitch: innova pitch --file pitch.txt"),
        View::TechStack => println!("Get a stack: innova tech-stack --kind web --database --auth"),
        View::QaSection => {
            println!("Ask once: innova ask \"<question>\"");
            println!("Or chat:  innova chat (typing delay {}ms)", cfg.chat.typing_delay_ms);
        }
    }

    Ok(())
}

fn print_notifications(messages: &[AgentMessage]) {
    if messages.is_empty() {
        println!("No messages from the team right now.");
        return;
    }
    for m in messages {
        println!("{}: {}", m.agent, m.message);
    }
}

async fn watch_notifications(cfg: &Config) -> Result<()> {
    let mut ticker = tokio::time::interval(cfg.notify_interval());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Reload each tick so changes from other invocations show up.
                let app = open_state(cfg)?;
                require_user(&app)?;
                let now: DateTime<Utc> = Utc::now();
                println!("-- {} --", now.format("%H:%M:%S"));
                print_notifications(&app.notifications(now));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted");
                return Ok(());
            }
        }
    }
}
