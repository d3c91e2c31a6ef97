use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Result;
use pathfinder_core::{update, AppState, Msg};
use pathfinder_engine::{ClientSettings, ReqwestApiClient};
use pathfinder_logging::{pf_debug, pf_info};

use super::command::{self, Command, Selector, HELP};
use super::effects::EffectRunner;
use super::render;

pub enum UiEvent {
    Msg(Msg),
    Input(Command),
    InputClosed,
}

pub fn run_app(settings: ClientSettings) -> Result<()> {
    pf_info!("starting front end against {}", settings.base_url);
    let client = ReqwestApiClient::new(settings)?;

    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
    let effects = EffectRunner::new(Arc::new(client), ui_tx.clone())?;
    spawn_input_reader(ui_tx)?;

    let mut app = TerminalApp::new(effects, io::stdout());
    app.write_lines([HELP])?;
    app.dispatch_msg(Msg::Started)?;

    while let Ok(event) = ui_rx.recv() {
        if !app.handle_event(event)? {
            break;
        }
    }
    pf_info!("front end exiting");
    Ok(())
}

fn spawn_input_reader(ui_tx: mpsc::Sender<UiEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("pathfinder-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if let Some(command) = command::parse(&line) {
                    if ui_tx.send(UiEvent::Input(command)).is_err() {
                        return;
                    }
                }
            }
            let _ = ui_tx.send(UiEvent::InputClosed);
        })?;
    Ok(())
}

pub(crate) struct TerminalApp<W: Write> {
    state: AppState,
    effects: EffectRunner,
    out: W,
}

impl<W: Write> TerminalApp<W> {
    pub(crate) fn new(effects: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
        }
    }

    /// Returns `false` once the user asked to leave.
    pub(crate) fn handle_event(&mut self, event: UiEvent) -> io::Result<bool> {
        match event {
            UiEvent::Msg(msg) => self.dispatch_msg(msg)?,
            UiEvent::Input(command) => return self.handle_command(command),
            UiEvent::InputClosed => return Ok(false),
        }
        Ok(true)
    }

    fn handle_command(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::List => {
                let lines = render::render_catalog(&self.state.view());
                self.write_lines(lines)?;
            }
            Command::Know(selector) => {
                if let Some(title) = self.resolve(&selector)? {
                    self.dispatch_msg(Msg::KnownConceptToggled(title))?;
                }
            }
            Command::Target(selector) => {
                if let Some(title) = self.resolve(&selector)? {
                    self.dispatch_msg(Msg::TargetSelected(title))?;
                }
            }
            Command::ForgetAll => self.dispatch_msg(Msg::KnownConceptsCleared)?,
            Command::Submit => self.dispatch_msg(Msg::SubmitClicked)?,
            Command::Help => self.write_lines([HELP])?,
            Command::Quit => return Ok(false),
            Command::Unknown(line) => {
                self.write_lines([format!("Unrecognised command `{line}`; type `help`.")])?
            }
        }
        Ok(true)
    }

    fn resolve(&mut self, selector: &Selector) -> io::Result<Option<String>> {
        let titles = self.state.view().concept_titles;
        match selector.resolve(&titles) {
            Some(title) if titles.iter().any(|t| *t == title) => Ok(Some(title)),
            Some(title) => {
                self.write_lines([format!("Unknown concept `{title}`.")])?;
                Ok(None)
            }
            None => {
                self.write_lines(["No concept with that number.".to_string()])?;
                Ok(None)
            }
        }
    }

    pub(crate) fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        pf_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.run(effects);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            self.write_lines(render::render(&view))?;
        }
        Ok(())
    }

    fn write_lines<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.out, "{}", line.as_ref())?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pathfinder_engine::{ApiClient, ApiError, CatalogEntry};

    use super::*;

    struct StubClient;

    #[async_trait::async_trait]
    impl ApiClient for StubClient {
        async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
            Ok(["A", "B", "C", "D"]
                .iter()
                .map(|t| CatalogEntry {
                    id: t.to_string(),
                    title: t.to_string(),
                })
                .collect())
        }

        async fn get_recommendations(
            &self,
            _known_concepts: &[String],
            _target_concept: &str,
        ) -> Result<Vec<String>, ApiError> {
            Ok(vec!["A".into(), "D".into(), "C".into()])
        }
    }

    fn pump(app: &mut TerminalApp<Vec<u8>>, rx: &mpsc::Receiver<UiEvent>) {
        let event = rx.recv_timeout(Duration::from_secs(5)).expect("engine event");
        assert!(app.handle_event(event).expect("handle"));
    }

    fn output(app: &TerminalApp<Vec<u8>>) -> String {
        String::from_utf8_lossy(app.output()).into_owned()
    }

    #[test]
    fn full_round_trip_renders_path() {
        pathfinder_logging::initialize_for_tests();
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::new(Arc::new(StubClient), tx).expect("engine");
        let mut app = TerminalApp::new(effects, Vec::new());

        app.dispatch_msg(Msg::Started).expect("start");
        pump(&mut app, &rx);
        assert!(output(&app).contains("4 concepts available"));

        for line in ["know 1", "know B", "target C", "submit"] {
            let command = command::parse(line).expect("command");
            assert!(app.handle_event(UiEvent::Input(command)).expect("handle"));
        }
        pump(&mut app, &rx);

        let text = output(&app);
        assert!(text.contains("Known:  A, B"), "{text}");
        assert!(text.ends_with("Recommended path:\n  1. A\n  2. D\n  3. C\n"), "{text}");
    }

    #[test]
    fn unknown_titles_and_quit() {
        pathfinder_logging::initialize_for_tests();
        let (tx, _rx) = mpsc::channel();
        let effects = EffectRunner::new(Arc::new(StubClient), tx).expect("engine");
        let mut app = TerminalApp::new(effects, Vec::new());

        let keep_going = app
            .handle_event(UiEvent::Input(Command::Target(Selector::Title("Z".into()))))
            .expect("handle");
        assert!(keep_going);
        assert!(output(&app).contains("Unknown concept `Z`."));

        assert!(!app.handle_event(UiEvent::Input(Command::Quit)).expect("handle"));
        assert!(!app.handle_event(UiEvent::InputClosed).expect("handle"));
    }
}
