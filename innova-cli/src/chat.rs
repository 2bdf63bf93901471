use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use innova_core::dice::pick_index;
use innova_core::{Responder, AGENTS};
use rand_core::{OsRng, RngCore};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Upper bound of the random extra typing time.
const TYPING_JITTER_MS: usize = 1500;

#[derive(Clone, Debug)]
struct Msg {
    role: Role,
    content: String,
}

#[derive(Clone, Debug)]
enum Role {
    User,
    Guide,
    System,
}

/// Reply that is "being typed" until `ready_at`.
struct Pending {
    ready_at: Instant,
    text: String,
}

struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today() -> Result<Self> {
        let home = crate::state::ensure_innova_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

/// Base delay plus up to 1.5s of jitter.
fn typing_delay<R: RngCore + ?Sized>(base: Duration, rng: &mut R) -> Duration {
    base + Duration::from_millis(pick_index(rng, TYPING_JITTER_MS) as u64)
}

pub fn run_chat(typing_base: Duration, keep_log: bool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, typing_base, keep_log);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    typing_base: Duration,
    keep_log: bool,
) -> Result<()> {
    let guide = Responder::guide();
    let mut rng = OsRng;

    let mut messages: Vec<Msg> = vec![Msg {
        role: Role::Guide,
        content: guide.welcome.to_string(),
    }];
    let mut pending: Option<Pending> = None;
    let mut input = String::new();
    let mut show_help = true;

    let mut log = if keep_log {
        let mut log = ChatLog::open_today()?;
        log.append("system", "session_start")?;
        Some(log)
    } else {
        None
    };

    loop {
        if pending.as_ref().is_some_and(|p| Instant::now() >= p.ready_at) {
            if let Some(p) = pending.take() {
                if let Some(log) = log.as_mut() {
                    log.append("guide", &p.text)?;
                }
                messages.push(Msg {
                    role: Role::Guide,
                    content: p.text,
                });
            }
        }

        let typing = pending.is_some();
        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "InnovaHack",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw("")),
                Line::from(Span::styled(
                    format!(">_ {} guide", guide.agent),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    "type /help or ? for shortcuts",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let header = Block::default().borders(Borders::ALL).title("conversation");

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Shortcuts: Enter=send, Esc=quit, ?=help",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw("Commands: /help /agents /clear /quit"));
                lines.push(Line::raw(""));
            }

            for m in &messages {
                let (tag, color) = match m.role {
                    Role::User => ("you", Color::Cyan),
                    Role::Guide => ("guide", Color::Magenta),
                    Role::System => ("system", Color::Gray),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", tag), Style::default().fg(color)),
                    Span::raw(m.content.clone()),
                ]));
                lines.push(Line::raw(""));
            }
            if typing {
                lines.push(Line::from(Span::styled(
                    "guide is typing...",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                )));
            }

            let history = Paragraph::new(Text::from(lines))
                .block(header)
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let input_block = Block::default().borders(Borders::ALL).title("message");
            let input_widget = Paragraph::new(input.as_str())
                .block(input_block)
                .style(Style::default().fg(if typing { Color::DarkGray } else { Color::White }));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('?') if input.is_empty() => {
                show_help = !show_help;
            }
            // One question at a time: input is locked while a reply is pending.
            KeyCode::Enter if !typing => {
                let trimmed = input.trim().to_string();
                input.clear();
                if trimmed.is_empty() {
                    continue;
                }
                if let Some(log) = log.as_mut() {
                    log.append("user", &trimmed)?;
                }

                match handle_slash(&trimmed) {
                    Some(SlashAction::Quit) => break,
                    Some(SlashAction::Clear) => {
                        messages.clear();
                    }
                    Some(SlashAction::Say(text)) => messages.push(Msg {
                        role: Role::System,
                        content: text,
                    }),
                    None => {
                        messages.push(Msg {
                            role: Role::User,
                            content: trimmed.clone(),
                        });
                        let reply = guide.respond(&trimmed, &mut rng);
                        tracing::debug!(topic = ?reply.topic, "guide reply queued");
                        pending = Some(Pending {
                            ready_at: Instant::now() + typing_delay(typing_base, &mut rng),
                            text: reply.text.to_string(),
                        });
                    }
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => {
                input.push(c);
            }
            _ => {}
        }
    }

    if let Some(log) = log.as_mut() {
        log.append("system", "session_end")?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum SlashAction {
    Say(String),
    Clear,
    Quit,
}

fn handle_slash(input: &str) -> Option<SlashAction> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    let action = match s {
        "/help" => SlashAction::Say(
            "Commands:\n\
- /help\n\
- /agents (who is on the team)\n\
- /clear (wipe the conversation)\n\
- /quit\n\
\nAsk about ideas, tech stacks, deadlines, pitches, teams or judging."
                .to_string(),
        ),
        "/agents" => SlashAction::Say(
            AGENTS
                .iter()
                .map(|a| format!("{a} ({:?})", a.kind))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        "/clear" => SlashAction::Clear,
        "/quit" | "/exit" => SlashAction::Quit,
        _ => SlashAction::Say("Unknown command. Try /help".to_string()),
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(handle_slash("how do I pitch?"), None);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(handle_slash(" /quit "), Some(SlashAction::Quit));
        assert_eq!(handle_slash("/clear"), Some(SlashAction::Clear));
        match handle_slash("/agents") {
            Some(SlashAction::Say(text)) => {
                assert_eq!(text.lines().count(), AGENTS.len());
                assert!(text.contains("Tempo"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            handle_slash("/nope"),
            Some(SlashAction::Say("Unknown command. Try /help".to_string()))
        );
    }

    #[test]
    fn test_typing_delay_bounds() {
        let base = Duration::from_millis(1000);
        for _ in 0..50 {
            let d = typing_delay(base, &mut OsRng);
            assert!(d >= base);
            assert!(d < base + Duration::from_millis(TYPING_JITTER_MS as u64));
        }
    }
}
