//! 事件循环：绘制、按键分派、保存结果回流

use std::io;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::kernel::editor::EditorAction;
use crate::kernel::services::adapters::{AppMessage, JsonFileSink, SaveRuntime};
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action, AppState, Effect, Store};

use super::input::{map_key, KeyOutcome};
use super::render::{self, Panes};
use super::terminal_guard::{termination_flag, TerminalGuard};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    store: Store,
    runtime: SaveRuntime,
    messages: Receiver<AppMessage>,
    panes: Option<Panes>,
}

impl App {
    pub fn new(settings: &Settings) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let sink = JsonFileSink::new(settings.output_path());
        tracing::info!(output = %sink.path().display(), "save target");
        let runtime = SaveRuntime::new(tx, Box::new(sink))?;

        Ok(Self {
            store: Store::new(AppState::new(settings.session_config())),
            runtime,
            messages: rx,
            panes: None,
        })
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// 分派动作并执行产生的副作用；返回是否需要重绘
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.apply_effect(effect);
        }
        result.state_changed
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Save(payload) => self.runtime.save(payload),
            Effect::Rejected(err) => tracing::debug!(error = %err, "rejection surfaced"),
            Effect::FilesChanged(files) => tracing::trace!(count = files.len(), "files changed"),
            Effect::FileSelected(node) => {
                tracing::trace!(id = ?node.as_ref().map(|n| n.id.clone()), "file selected")
            }
            Effect::ContentsChanged { .. } | Effect::PlaceholdersChanged(_) => {}
        }
    }

    fn drain_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.messages.try_recv() {
            match message {
                AppMessage::SaveFinished { sink, ok, error } => {
                    if let Some(error) = &error {
                        tracing::warn!(sink, error = %error, "save failed");
                    }
                    changed |= self.dispatch(Action::SaveFinished { ok });
                }
            }
        }
        changed
    }

    /// 终端尺寸变化时同步视口大小到内核
    fn sync_layout(&mut self, panes: Panes) {
        if self.panes == Some(panes) {
            return;
        }
        self.panes = Some(panes);
        let (width, height) = panes.editor_inner_size();
        self.dispatch(Action::Editor(EditorAction::SetViewportSize { width, height }));
        self.dispatch(Action::ExplorerSetViewHeight {
            height: panes.explorer_inner_height(),
        });
    }

    pub fn run(&mut self) -> io::Result<()> {
        let guard = TerminalGuard::new()?;
        let terminate = termination_flag()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let mut dirty = true;
        loop {
            if terminate.load(Ordering::SeqCst) {
                tracing::info!("termination signal received");
                break;
            }

            let size = terminal.size()?;
            self.sync_layout(render::layout_for_size(size));
            dirty |= self.drain_messages();

            if dirty {
                let state = self.store.state();
                terminal.draw(|frame| render::render(frame, state))?;
                dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => match map_key(self.store.state(), key) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Dispatch(actions) => {
                        for action in actions {
                            dirty |= self.dispatch(action);
                        }
                    }
                    KeyOutcome::Ignored => {}
                },
                Event::Paste(text) => {
                    if !self.store.state().ui.input_dialog.visible {
                        dirty |= self.dispatch(Action::Editor(EditorAction::InsertText(text)));
                    }
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        if self.store.state().editor.has_changes() {
            tracing::warn!("exiting with unsaved changes");
        }
        guard.restorer().restore()
    }
}
