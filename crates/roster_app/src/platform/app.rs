use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use roster_core::{check_palindrome, update, validate_name, FeedId, FeedState, Msg, WelcomeView};
use roster_engine::{ReqwestUserSource, UserSource};
use roster_logging::{roster_debug, roster_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    logging::initialize(
        config.log_destination,
        config.level_filter()?,
        &config.log_file,
    );
    let settings = config.fetch_settings()?;
    let source: Arc<dyn UserSource> =
        Arc::new(ReqwestUserSource::new(settings).context("building http client")?);
    let runner = EffectRunner::new(source).context("starting fetch engine")?;

    // Stdin is read on its own thread so fetch results can render while the
    // user is idle.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut app = App::new(runner);
    emit(&mut out, render::render_form(""))?;

    loop {
        match line_rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                let turn = roster_logging::next_loop_turn();
                roster_debug!("turn {} input {:?}", turn, line);
                if app.handle_line(&line, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        app.pump_engine(&mut out)?;
    }

    app.leave_list(None);
    roster_info!("roster_app exiting");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct ListScreen {
    welcome: WelcomeView,
    state: FeedState,
}

enum Screen {
    Form { name: String },
    Welcome(WelcomeView),
    List(ListScreen),
}

struct App {
    runner: EffectRunner,
    screen: Screen,
    next_feed: FeedId,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            runner,
            screen: Screen::Form {
                name: String::new(),
            },
            next_feed: 1,
        }
    }

    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let command = match commands::parse(line) {
            Ok(command) => command,
            Err(err) => {
                emit(out, vec![err.to_string()])?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.render_screen(out)?,
            Command::SetName(value) => match &mut self.screen {
                Screen::Form { name } => {
                    *name = value;
                    emit(out, render::render_form(name))?;
                }
                _ => unavailable(out, "name")?,
            },
            Command::Check(text) => match &self.screen {
                Screen::Form { .. } => {
                    emit(out, render::render_verdict(check_palindrome(&text)))?;
                }
                _ => unavailable(out, "check")?,
            },
            Command::Next => {
                let Screen::Form { name } = &self.screen else {
                    return unavailable(out, "next").map(|()| Flow::Continue);
                };
                match validate_name(name) {
                    Ok(name) => {
                        let welcome = WelcomeView::new(name);
                        emit(out, render::render_welcome(&welcome))?;
                        self.screen = Screen::Welcome(welcome);
                    }
                    Err(err) => emit(out, vec![format!("Name Required: {err}")])?,
                }
            }
            Command::Choose => match &self.screen {
                Screen::Welcome(welcome) => {
                    let welcome = welcome.clone();
                    self.open_list(welcome, out)?;
                }
                _ => unavailable(out, "choose")?,
            },
            Command::Back => match &self.screen {
                Screen::Welcome(welcome) => {
                    let name = welcome.name.clone();
                    emit(out, render::render_form(&name))?;
                    self.screen = Screen::Form { name };
                }
                Screen::List(_) => {
                    self.leave_list(None);
                    self.render_screen(out)?;
                }
                Screen::Form { .. } => unavailable(out, "back")?,
            },
            Command::Scroll(index) => match &self.screen {
                Screen::List(list) => {
                    let total_rendered_count = list.state.items().len();
                    self.apply_feed(
                        Msg::ScrollPositionChanged {
                            last_visible_index: index,
                            total_rendered_count,
                        },
                        out,
                    )?;
                }
                _ => unavailable(out, "scroll")?,
            },
            Command::More => self.apply_feed(Msg::LoadMoreRequested, out)?,
            Command::Refresh => self.apply_feed(Msg::RefreshRequested, out)?,
            Command::Select(index) => {
                let selected = match &self.screen {
                    Screen::List(list) => list.state.view().select(index),
                    _ => return unavailable(out, "select").map(|()| Flow::Continue),
                };
                match selected {
                    Some(selected) => {
                        roster_info!("selected user {:?}", selected);
                        self.leave_list(Some(selected));
                        self.render_screen(out)?;
                    }
                    None => emit(out, vec![format!("no user at row {index}")])?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn open_list(&mut self, welcome: WelcomeView, out: &mut impl Write) -> io::Result<()> {
        let feed = self.next_feed;
        self.next_feed += 1;
        roster_info!("opening user list as feed {}", feed);
        self.screen = Screen::List(ListScreen {
            welcome,
            state: FeedState::with_feed_id(feed),
        });
        self.apply_feed(Msg::Mounted, out)
    }

    /// Tears the list screen down and hands `selected` back to the welcome
    /// screen. An outstanding fetch is abandoned.
    fn leave_list(&mut self, selected: Option<String>) {
        let placeholder = Screen::Form {
            name: String::new(),
        };
        match std::mem::replace(&mut self.screen, placeholder) {
            Screen::List(list) => {
                if let Some(ticket) = list.state.in_flight() {
                    self.runner.cancel(ticket);
                }
                let mut welcome = list.welcome;
                welcome.accept_selection(selected);
                self.screen = Screen::Welcome(welcome);
            }
            other => self.screen = other,
        }
    }

    fn apply_feed(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<()> {
        let Screen::List(list) = &mut self.screen else {
            return emit(out, vec!["only available on the user list".to_string()]);
        };
        let state = std::mem::take(&mut list.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let dirty = state.consume_dirty();
        let view = state.view();
        list.state = state;
        if dirty {
            emit(out, render::render_feed(&view))?;
        }
        Ok(())
    }

    fn pump_engine(&mut self, out: &mut impl Write) -> io::Result<()> {
        for msg in self.runner.drain() {
            let current = match &self.screen {
                Screen::List(list) => Some(list.state.feed_id()),
                _ => None,
            };
            if belongs_to(current, &msg) {
                self.apply_feed(msg, out)?;
            } else {
                roster_debug!("dropping {:?} for a closed list", msg);
            }
        }
        Ok(())
    }

    fn render_screen(&self, out: &mut impl Write) -> io::Result<()> {
        let lines = match &self.screen {
            Screen::Form { name } => render::render_form(name),
            Screen::Welcome(welcome) => render::render_welcome(welcome),
            Screen::List(list) => render::render_feed(&list.state.view()),
        };
        emit(out, lines)
    }
}

/// Whether a fetch result was issued by the list currently on screen.
fn belongs_to(current: Option<FeedId>, msg: &Msg) -> bool {
    match (current, msg) {
        (Some(feed), Msg::PageLoaded { ticket, .. } | Msg::PageFailed { ticket, .. }) => {
            ticket.feed == feed
        }
        _ => false,
    }
}

fn unavailable(out: &mut impl Write, command: &str) -> io::Result<()> {
    emit(out, vec![format!("`{command}` is not available here")])
}

fn emit(out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
