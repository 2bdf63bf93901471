use anyhow::{bail, Context, Result};
use clap::Args;
use innova_core::{
    suggest_stack, Agent, AgentKind, IdeaEvaluation, MockIdeaScorer, MockPitchScorer,
    PitchAnalysis, ProjectKind, Requirements, Responder, ScoreBand, Scorer, StackSuggestions,
    View,
};
use innova_core::dice::pick_index;
use innova_core::tech_stack::TechOption;
use rand_core::{OsRng, RngCore};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::state::open_state;

const MENTOR_BASE_MS: u64 = 1500;
const MENTOR_JITTER_MS: usize = 1000;

/// The mentor answers after 1.5s plus up to 1s more.
fn mentor_delay<R: RngCore + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(MENTOR_BASE_MS + pick_index(rng, MENTOR_JITTER_MS) as u64)
}

/// Free text from the command line or from a file (`-` for stdin).
#[derive(Args, Debug)]
pub struct TextInput {
    /// The text itself
    text: Vec<String>,

    /// Read the text from a file instead
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextInput {
    fn read(&self) -> Result<String> {
        let raw = match &self.file {
            Some(p) if p.as_os_str() == "-" => {
                let mut s = String::new();
                std::io::stdin().read_to_string(&mut s).context("read stdin")?;
                s
            }
            Some(p) => {
                std::fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?
            }
            None => self.text.join(" "),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("Nothing to analyze: pass the text or --file <path>");
        }
        Ok(trimmed.to_string())
    }
}

#[derive(Args, Debug)]
pub struct StackArgs {
    /// web | mobile | fullstack | ai | api | game
    #[arg(long, default_value = "web")]
    kind: ProjectKind,

    #[arg(long)]
    realtime: bool,

    #[arg(long)]
    database: bool,

    #[arg(long)]
    mobile: bool,

    #[arg(long)]
    ai: bool,

    #[arg(long)]
    apis: bool,

    #[arg(long = "auth")]
    authentication: bool,
}

impl StackArgs {
    fn requirements(&self) -> Requirements {
        Requirements {
            realtime: self.realtime,
            database: self.database,
            mobile: self.mobile,
            ai: self.ai,
            apis: self.apis,
            authentication: self.authentication,
        }
    }
}

/// Screens past the landing page need a signed-in user.
fn enter(cfg: &Config, view: View) -> Result<()> {
    let mut app = open_state(cfg)?;
    app.navigate(view)
        .context("Not signed in. Run: innova signin --email you@example.com")?;
    Ok(())
}

async fn score_after_latency<S>(agent: Agent, scorer: &mut S, input: &str) -> Result<S::Output>
where
    S: Scorer<Input = str>,
{
    let latency = scorer.latency();
    if !latency.is_zero() {
        eprintln!("{agent} is thinking...");
        tokio::time::sleep(latency).await;
    }
    Ok(scorer.score(input)?)
}

pub async fn run_evaluate_idea(cfg: &Config, input: TextInput) -> Result<()> {
    enter(cfg, View::IdeaEvaluation)?;
    let idea = input.read()?;
    let mut scorer = MockIdeaScorer::new(OsRng, cfg.latency());
    let eval = score_after_latency(Agent::of(AgentKind::Innovation), &mut scorer, &idea).await?;
    print_idea_evaluation(&eval);
    Ok(())
}

pub async fn run_pitch(cfg: &Config, input: TextInput) -> Result<()> {
    enter(cfg, View::PitchOptimization)?;
    let pitch = input.read()?;
    let mut scorer = MockPitchScorer::new(OsRng, cfg.latency());
    let analysis = score_after_latency(Agent::of(AgentKind::Pitch), &mut scorer, &pitch).await?;
    print_pitch_analysis(&analysis);
    Ok(())
}

pub fn run_tech_stack(cfg: &Config, args: StackArgs) -> Result<()> {
    enter(cfg, View::TechStack)?;
    let s = suggest_stack(args.kind, args.requirements());
    print_stack(args.kind, &s);
    Ok(())
}

pub async fn run_ask(cfg: &Config, question: &[String]) -> Result<()> {
    enter(cfg, View::QaSection)?;
    let question = question.join(" ");
    let mentor = Responder::mentor();
    if question.trim().is_empty() {
        println!("{}: {}", mentor.agent, mentor.welcome);
        return Ok(());
    }

    let mut rng = OsRng;
    let reply = mentor.respond(&question, &mut rng);
    tracing::debug!(topic = ?reply.topic, "mentor reply");
    tokio::time::sleep(mentor_delay(&mut rng)).await;
    println!("{}: {}", mentor.agent, reply.text);
    Ok(())
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Strong => "strong",
        ScoreBand::Fair => "fair",
        ScoreBand::Weak => "needs work",
    }
}

fn bullets(title: &str, items: &[String]) {
    println!("\n## {title}");
    for item in items {
        println!("- {item}");
    }
}

fn print_idea_evaluation(e: &IdeaEvaluation) {
    println!(
        "# Idea score: {}/100 ({})\n",
        e.overall_score,
        band_label(ScoreBand::for_idea(e.overall_score))
    );
    for (name, score) in e.categories.entries() {
        println!("{name:<22} {score:>3}  {}", band_label(ScoreBand::for_idea(score)));
    }
    bullets("Strengths", &e.strengths);
    bullets("Improvements", &e.improvements);
    bullets("Next steps", &e.next_steps);
    bullets("Risk factors", &e.risk_factors);
}

fn print_pitch_analysis(a: &PitchAnalysis) {
    println!(
        "# Pitch score: {}/100 ({})\n",
        a.overall_score,
        band_label(ScoreBand::for_pitch(a.overall_score))
    );
    for (name, score) in a.categories.entries() {
        println!("{name:<22} {score:>3}  {}", band_label(ScoreBand::for_pitch(score)));
    }
    bullets("Strengths", &a.strengths);
    bullets("Improvements", &a.improvements);
    bullets("Suggestions", &a.suggestions);
    bullets("Judges may ask", &a.judge_simulation.questions);
    println!("\n> {}", a.judge_simulation.feedback);
}

fn print_options(title: &str, options: &[TechOption]) {
    if options.is_empty() {
        return;
    }
    println!("\n## {title}");
    for o in options {
        println!("- {} [{:?}]: {}", o.name, o.difficulty, o.reason);
    }
}

fn print_stack(kind: ProjectKind, s: &StackSuggestions) {
    println!("# Stack for a {}\n", kind.display_name());
    println!("{}", s.reasoning);
    print_options("Frontend", &s.frontend);
    print_options("Backend", &s.backend);
    print_options("Database", &s.database);
    print_options("Tools", &s.tools);
    print_options("Deployment", &s.deployment);

    let t = &s.timeline;
    println!("\n## Timeline ({}h total)", t.total_hours);
    println!(
        "planning {}h, setup {}h, development {}h, testing {}h, deployment {}h",
        t.planning_hours, t.setup_hours, t.development_hours, t.testing_hours, t.deployment_hours
    );
}
