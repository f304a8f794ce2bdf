//! Weather & news dashboard - tui-dispatch application

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_news::action::Action;
use weather_news::api;
use weather_news::components::{
    Component, Dashboard, DashboardAreas, DashboardProps, NewsFeedProps, WeatherFeatureProps,
};
use weather_news::config::{
    ApiKey, DEFAULT_API_BASE, DEFAULT_CITY, DEFAULT_IMAGE_HOSTS, FeedConfig,
};
use weather_news::effect::Effect;
use weather_news::news::{self, NewsSource};
use weather_news::reducer::reducer;
use weather_news::state::{AppState, Focus};
use weather_news::theme::Theme;

/// Current weather and top headlines in the terminal
#[derive(Parser, Debug)]
#[command(name = "weather-news")]
#[command(about = "Current weather and top headlines in the terminal")]
struct Args {
    /// City fetched on startup
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// WeatherAPI.com key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Weather API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// JSON file with articles (array, or a NewsAPI response object)
    #[arg(long)]
    news_file: Option<PathBuf>,

    /// NewsAPI.org key; used when no --news-file is given
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,

    /// Country code for NewsAPI top headlines
    #[arg(long, default_value = "us")]
    news_country: String,

    /// Host remote images may be shown from (repeatable, replaces the defaults)
    #[arg(long = "image-host")]
    image_hosts: Vec<String>,

    /// Colour theme
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn feed_config(&self) -> FeedConfig {
        let news = match (&self.news_file, self.news_api_key.as_deref().and_then(ApiKey::new)) {
            (Some(path), _) => NewsSource::File(path.clone()),
            (None, Some(key)) => NewsSource::NewsApi {
                key,
                country: self.news_country.clone(),
            },
            (None, None) => NewsSource::Disabled,
        };

        let image_hosts = if self.image_hosts.is_empty() {
            DEFAULT_IMAGE_HOSTS.iter().map(|h| h.to_string()).collect()
        } else {
            self.image_hosts.clone()
        };

        FeedConfig {
            default_city: self.city.clone(),
            api_key: self.api_key.as_deref().and_then(ApiKey::new),
            api_base: self.api_base.clone(),
            news,
            image_hosts,
            theme: self.theme,
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashboardComponentId {
    Weather,
    News,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashboardContext {
    Weather,
    News,
}

impl EventRoutingState<DashboardComponentId, DashboardContext> for AppState {
    fn focused(&self) -> Option<DashboardComponentId> {
        match self.focus {
            Focus::CityInput | Focus::SearchButton => Some(DashboardComponentId::Weather),
            Focus::News => Some(DashboardComponentId::News),
        }
    }

    fn modal(&self) -> Option<DashboardComponentId> {
        None
    }

    fn binding_context(&self, id: DashboardComponentId) -> DashboardContext {
        match id {
            DashboardComponentId::Weather => DashboardContext::Weather,
            DashboardComponentId::News => DashboardContext::News,
        }
    }

    fn default_context(&self) -> DashboardContext {
        DashboardContext::Weather
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.feed_config();
    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let seed = config.clone();
    let mut state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(AppState::new(seed)) })
        .await
        .map_err(debug_error)?;
    // Snapshots are saved without configuration.
    state.config = config;

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

    Ok(())
}

struct DashboardUi {
    dashboard: Dashboard,
}

impl DashboardUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashboardComponentId>,
    ) {
        let areas = DashboardAreas::split(area);
        event_ctx.set_component_area(DashboardComponentId::Weather, areas.weather);
        event_ctx.set_component_area(DashboardComponentId::News, areas.news);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_weather_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherFeatureProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .feature
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_news_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = NewsFeedProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .news
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
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

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DashboardUi::new()));
    let mut bus: EventBus<AppState, Action, DashboardComponentId, DashboardContext> =
        EventBus::new();
    let keybindings: Keybindings<DashboardContext> = Keybindings::new();

    let ui_weather = Rc::clone(&ui);
    bus.register(DashboardComponentId::Weather, move |event, state| {
        ui_weather
            .borrow_mut()
            .handle_weather_event(&event.kind, state)
    });

    let ui_news = Rc::clone(&ui);
    bus.register(DashboardComponentId::News, move |event, state| {
        ui_news.borrow_mut().handle_news_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key) => match key.code {
            KeyCode::Tab => HandlerResponse::action(Action::FocusNext),
            KeyCode::BackTab => HandlerResponse::action(Action::FocusPrev),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                HandlerResponse::action(Action::Quit)
            }
            _ => HandlerResponse::ignored(),
        },
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

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchWeather {
            request_id,
            api_base,
            api_key,
            city,
        } => {
            // Reusing the key replaces a still-running fetch.
            ctx.tasks().spawn("weather", async move {
                match api::fetch_current(&api_base, &api_key, &city).await {
                    Ok(result) => Action::WeatherDidLoad { request_id, result },
                    Err(e) => Action::WeatherDidError {
                        request_id,
                        message: e.to_string(),
                    },
                }
            });
        }
        Effect::LoadNews { source } => {
            ctx.tasks().spawn("news", async move {
                match news::load_articles(source).await {
                    Ok(articles) => Action::NewsDidLoad(articles),
                    Err(e) => Action::NewsDidError(e.to_string()),
                }
            });
        }
    }
}
