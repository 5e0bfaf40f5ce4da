//! The Spike Cross guide browser

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use spikeguide::action::Action;
use spikeguide::components::{AppView, AppViewProps, Component, SearchBar, SearchBarProps};
use spikeguide::effect::Effect;
use spikeguide::i18n::DEFAULT_LANGUAGE;
use spikeguide::logging::{self, LogConfig};
use spikeguide::provider::{self, SourceProvider};
use spikeguide::reducer::reducer;
use spikeguide::state::{AppState, DataSources, DEFAULT_CHARACTERS, DEFAULT_TRANSLATIONS};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Character roster, guides and tier list for The Spike Cross
#[derive(Parser, Debug)]
#[command(name = "spikeguide")]
#[command(about = "Browse The Spike Cross character guides in the terminal")]
struct Args {
    /// Character catalog: a JSON file path or an http(s) URL
    #[arg(long, default_value = DEFAULT_CHARACTERS)]
    characters: String,

    /// Translation table: a JSON file path or an http(s) URL
    #[arg(long, default_value = DEFAULT_TRANSLATIONS)]
    translations: String,

    /// Initial language; unsupported codes fall back to English
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Log file (defaults to spikeguide.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `spikeguide=debug`
    #[arg(long, default_value = logging::DEFAULT_FILTER)]
    log_filter: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GuideComponentId {
    Main,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GuideContext {
    Main,
    Search,
}

impl EventRoutingState<GuideComponentId, GuideContext> for AppState {
    fn focused(&self) -> Option<GuideComponentId> {
        if self.chrome().search_editing {
            Some(GuideComponentId::Search)
        } else {
            Some(GuideComponentId::Main)
        }
    }

    fn modal(&self) -> Option<GuideComponentId> {
        self.chrome()
            .search_editing
            .then_some(GuideComponentId::Search)
    }

    fn binding_context(&self, id: GuideComponentId) -> GuideContext {
        match id {
            GuideComponentId::Main => GuideContext::Main,
            GuideComponentId::Search => GuideContext::Search,
        }
    }

    fn default_context(&self) -> GuideContext {
        GuideContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        characters,
        translations,
        lang,
        log_file,
        log_filter,
        debug: debug_args,
    } = Args::parse();

    let _log_guard = logging::init(&LogConfig {
        file: log_file.unwrap_or_else(logging::default_log_file),
        filter: log_filter,
    })?;

    let debug = DebugSession::new(debug_args);

    let sources = DataSources {
        characters,
        translations,
    };
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(sources, &lang))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct GuideUi {
    app: AppView,
    search: SearchBar,
}

impl GuideUi {
    fn new() -> Self {
        Self {
            app: AppView::new(),
            search: SearchBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GuideComponentId>,
    ) {
        let editing = state.chrome().search_editing;
        let (main_area, search_area) = if editing {
            let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        event_ctx.set_component_area(GuideComponentId::Main, main_area);
        self.app.render(
            frame,
            main_area,
            AppViewProps {
                state,
                is_focused: render_ctx.is_focused() && !editing,
            },
        );

        self.search.set_open(editing);
        match search_area {
            Some(search_area) => {
                event_ctx.set_component_area(GuideComponentId::Search, search_area);
                let placeholder = state.texts().or("search_placeholder", "Search...");
                self.search.render(
                    frame,
                    search_area,
                    SearchBarProps {
                        value: state.search(),
                        placeholder: &placeholder,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            None => {
                event_ctx
                    .component_areas
                    .remove(&GuideComponentId::Search);
            }
        }
    }

    fn handle_main_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.app.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.chrome().search_editing);
        let placeholder = state.texts().or("search_placeholder", "Search...");
        let props = SearchBarProps {
            value: state.search(),
            placeholder: &placeholder,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GuideUi::new()));
    let mut bus: EventBus<AppState, Action, GuideComponentId, GuideContext> = EventBus::new();
    let keybindings: Keybindings<GuideContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(GuideComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_main_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(GuideComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadLibrary { sources } => {
            tracing::info!(?sources, "loading startup data");
            ctx.tasks().spawn(TaskKey::new("library"), async move {
                let provider = SourceProvider::new(sources);
                match provider::load_library(&provider).await {
                    Ok(library) => Action::LibraryDidLoad(library),
                    Err(error) => {
                        tracing::warn!(%error, "startup data failed");
                        Action::LibraryDidError(error.to_string())
                    }
                }
            });
        }
    }
}
