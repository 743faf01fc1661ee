// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use cosmic::app::context_drawer;
use cosmic::cosmic_config;
use cosmic::iced::alignment::{Horizontal, Vertical};
use cosmic::iced::{Alignment, ContentFit, Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, about::About, menu};
use cosmic::{Apply, ApplicationExt, cosmic_theme, theme};

use crate::app::app_menu::MenuAction;
use crate::app::context_page::ContextPage;
use crate::app::route::Route;
use crate::app::utils::SearchFilter;
use crate::app::view_state::{DetailViewState, ListViewState};
use crate::config::{APP_ID, AppTheme, GraphDexConfig};
use crate::core::api::{DetailsKey, PokemonApi};
use crate::core::graphql::GraphQlClient;
use crate::core::image_cache::{self, SpriteCache};
use crate::core::pokemon_queries::{
    DetailsResponse, ListResponse, PokemonDetailsQuery, PokemonListQuery,
};
use crate::entities::{PokemonDetails, PokemonSummary};
use crate::fl;
use crate::flags::Flags;

mod app_menu;
mod context_page;
mod route;
mod utils;
mod view_state;

const APP_ICON: &[u8] = include_bytes!("../res/icons/hicolor/scalable/apps/dev.graphdex.GraphDex.svg");

/// Choices offered by the cards-per-row dropdown
const PER_ROW_CHOICES: std::ops::RangeInclusive<usize> = 2..=6;

/// This is the struct that represents your application.
/// It is used to define the data that will be used by your application.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// About page for the application.
    about: About,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Configuration handler, absent when the config dir is unusable
    config_handler: Option<cosmic_config::Config>,
    /// Application configuration
    config: GraphDexConfig,
    /// Labels for the theme dropdown
    app_themes: Vec<String>,
    /// Labels for the cards-per-row dropdown
    per_row_options: Vec<String>,
    /// Shared HTTP client, used for queries and sprites
    http: reqwest::Client,
    api: PokemonApi<GraphQlClient>,
    /// Current route, carries the selected Pokémon
    route: Route,
    pokemon_list: PokemonListQuery,
    pokemon_details: PokemonDetailsQuery,
    /// Search input value and the Pokémon it lets through
    search: SearchFilter,
    sprites: SpriteCache,
}

#[derive(Debug, Clone)]
pub enum Message {
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    MenuAction(MenuAction),
    UpdateConfig(GraphDexConfig),
    SetAppTheme(usize),
    SetPokemonPerRow(usize),
    PokemonListLoaded(ListResponse),
    Search(String),
    Navigate(Route),
    CloseDetails,
    PokemonDetailsLoaded(DetailsResponse),
    SpriteLoaded(String, Option<widget::image::Handle>),
}

/// Implement the `Application` trait for your application.
/// This is where you define the behavior of your application.
impl cosmic::Application for AppModel {
    type Executor = cosmic::executor::Default;

    type Flags = Flags;

    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    fn init(core: cosmic::Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("CARGO_PKG_VERSION"))
            .license(env!("CARGO_PKG_LICENSE"))
            .links([(fl!("graphql-api"), flags.config.endpoint.clone())]);

        let http = reqwest::Client::new();
        let api = PokemonApi::new(GraphQlClient::new(http.clone(), &flags.config.endpoint));

        tracing::info!(endpoint = api.client().endpoint(), "starting");

        let mut app = AppModel {
            core,
            about,
            context_page: ContextPage::default(),
            key_binds: HashMap::new(),
            config_handler: flags.config_handler,
            app_themes: vec![fl!("match-desktop"), fl!("dark"), fl!("light")],
            per_row_options: PER_ROW_CHOICES.map(|n| n.to_string()).collect(),
            http,
            api,
            route: Route::default(),
            pokemon_list: PokemonListQuery::new(flags.config.list_limit),
            pokemon_details: PokemonDetailsQuery::default(),
            search: SearchFilter::default(),
            sprites: SpriteCache::default(),
            config: flags.config,
        };

        let commands = Task::batch(vec![
            app.update_title(),
            cosmic::command::set_theme(app.config.app_theme.theme()),
            app.load_pokemon_list(),
        ]);

        (app, commands)
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let menu_bar = menu::bar(vec![menu::Tree::with_children(
            menu::root(fl!("view")).apply(Element::from),
            menu::items(
                &self.key_binds,
                vec![
                    menu::Item::Button(fl!("reload"), None, MenuAction::Reload),
                    menu::Item::Divider,
                    menu::Item::Button(fl!("settings"), None, MenuAction::Settings),
                    menu::Item::Button(fl!("about"), None, MenuAction::About),
                ],
            ),
        )]);

        vec![menu_bar.into()]
    }

    fn view(&self) -> Element<'_, Self::Message> {
        widget::container(self.pokemon_list())
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Top)
            .into()
    }

    /// The detail dialog, overlaid on the list whenever the route carries a Pokémon
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        match DetailViewState::evaluate(&self.route, &self.pokemon_details) {
            DetailViewState::Closed => None,
            state => Some(self.pokemon_details_dialog(state)),
        }
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        self.context_page.display(self)
    }

    fn on_escape(&mut self) -> Task<cosmic::Action<Self::Message>> {
        if self.route.pokemon_id().is_some() {
            return self.navigate(Route::List);
        }

        self.core.window.show_context = false;
        Task::none()
    }

    /// Watches for changes made to the config from outside the app
    fn subscription(&self) -> Subscription<Self::Message> {
        self.core()
            .watch_config::<GraphDexConfig>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config))
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::LaunchUrl(url) => {
                if let Err(err) = open::that_detached(&url) {
                    tracing::error!(%url, error = %err, "failed to open url");
                }
            }
            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    // Close the context drawer if the toggled context page is the same.
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    // Open the context drawer to display the requested context page.
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }
            Message::MenuAction(action) => match action {
                MenuAction::Reload => return self.load_pokemon_list(),
                MenuAction::About => {
                    return self.update(Message::ToggleContextPage(ContextPage::About));
                }
                MenuAction::Settings => {
                    return self.update(Message::ToggleContextPage(ContextPage::Settings));
                }
            },
            Message::UpdateConfig(config) => return self.apply_config(config),
            Message::SetAppTheme(index) => {
                let app_theme = AppTheme::ALL.get(index).copied().unwrap_or_default();
                match &self.config_handler {
                    Some(handler) => {
                        if let Err(err) = self.config.set_app_theme(handler, app_theme) {
                            tracing::error!(error = %err, "failed to save theme");
                        }
                    }
                    None => self.config.app_theme = app_theme,
                }
                return cosmic::command::set_theme(app_theme.theme());
            }
            Message::SetPokemonPerRow(index) => {
                let per_row = PER_ROW_CHOICES.start() + index;
                match &self.config_handler {
                    Some(handler) => {
                        if let Err(err) = self.config.set_pokemon_per_row(handler, per_row) {
                            tracing::error!(error = %err, "failed to save cards per row");
                        }
                    }
                    None => self.config.pokemon_per_row = per_row,
                }
            }
            Message::PokemonListLoaded(response) => {
                if self.pokemon_list.resolve(response) {
                    self.search.set_items(self.pokemon_list.items());

                    let urls = self
                        .sprites
                        .claim_missing(self.pokemon_list.items().iter().map(|p| p.image.as_str()));
                    return self.load_sprites(urls);
                }
            }
            Message::Search(search) => self.search.set_search(search),
            Message::Navigate(route) => return self.navigate(route),
            Message::CloseDetails => return self.navigate(Route::List),
            Message::PokemonDetailsLoaded(response) => {
                if self.pokemon_details.resolve(response) {
                    let urls = self.sprites.claim_missing(
                        self.pokemon_details
                            .details()
                            .map(|details| details.summary.image.as_str()),
                    );
                    return self.load_sprites(urls);
                }
            }
            Message::SpriteLoaded(url, handle) => {
                if let Some(handle) = handle {
                    self.sprites.insert(url, handle);
                }
            }
        }
        Task::none()
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        self.set_header_title(fl!("all-pokemon"));

        match self.core.main_window_id() {
            Some(id) => self.set_window_title(fl!("app-title"), id),
            None => Task::none(),
        }
    }

    /// Moves to `route`, pointing the detail query at whatever it selects
    fn navigate(&mut self, route: Route) -> Task<cosmic::Action<Message>> {
        tracing::debug!(from = %self.route, to = %route, "navigating");
        self.route = route;

        let key = DetailsKey::new(self.route.pokemon_id().cloned(), None);
        match self.pokemon_details.select(key, &self.api) {
            Some(fetch) => Task::perform(fetch, |response| {
                cosmic::action::app(Message::PokemonDetailsLoaded(response))
            }),
            None => Task::none(),
        }
    }

    fn load_pokemon_list(&mut self) -> Task<cosmic::Action<Message>> {
        let fetch = self.pokemon_list.fetch(&self.api);
        Task::perform(fetch, |response| {
            cosmic::action::app(Message::PokemonListLoaded(response))
        })
    }

    fn load_sprites(&self, urls: Vec<String>) -> Task<cosmic::Action<Message>> {
        if urls.is_empty() {
            return Task::none();
        }

        Task::run(
            image_cache::load_sprites(self.http.clone(), urls),
            |(url, handle)| cosmic::action::app(Message::SpriteLoaded(url, handle)),
        )
    }

    /// Takes in a config update, refetching when the data source changed
    fn apply_config(&mut self, config: GraphDexConfig) -> Task<cosmic::Action<Message>> {
        let mut tasks = Vec::new();

        if config.app_theme != self.config.app_theme {
            tasks.push(cosmic::command::set_theme(config.app_theme.theme()));
        }

        let source_changed =
            config.endpoint != self.config.endpoint || config.list_limit != self.config.list_limit;
        self.config = config;

        if source_changed {
            tracing::info!(endpoint = %self.config.endpoint, "data source changed");
            self.api = PokemonApi::new(GraphQlClient::new(
                self.http.clone(),
                &self.config.endpoint,
            ));
            self.pokemon_list.set_limit(self.config.list_limit);
            tasks.push(self.load_pokemon_list());
        }

        Task::batch(tasks)
    }

    /// The settings page for this app.
    pub fn settings(&self) -> Element<'_, Message> {
        let per_row_index = self
            .config
            .columns()
            .checked_sub(*PER_ROW_CHOICES.start())
            .filter(|i| *i < self.per_row_options.len());

        widget::settings::view_column(vec![
            widget::settings::section()
                .title(fl!("appearance"))
                .add(widget::settings::item(
                    fl!("theme"),
                    widget::dropdown(
                        &self.app_themes,
                        Some(self.config.app_theme.index()),
                        Message::SetAppTheme,
                    ),
                ))
                .add(widget::settings::item(
                    fl!("pokemon-per-row"),
                    widget::dropdown(
                        &self.per_row_options,
                        per_row_index,
                        Message::SetPokemonPerRow,
                    ),
                ))
                .into(),
            widget::settings::section()
                .title(fl!("data-source"))
                .add(widget::settings::item(
                    fl!("endpoint"),
                    widget::text::body(self.config.endpoint.as_str()),
                ))
                .add(widget::settings::item(
                    fl!("list-limit"),
                    widget::text::body(self.config.list_limit.to_string()),
                ))
                .into(),
        ])
        .into()
    }

    /// The landing page: search box on top of the Pokémon grid
    fn pokemon_list(&self) -> Element<'_, Message> {
        let cosmic_theme::Spacing {
            space_xxs,
            space_s,
            space_m,
            ..
        } = theme::active().cosmic().spacing;

        let content: Element<'_, Message> =
            match ListViewState::evaluate(&self.pokemon_list, &self.search) {
                ListViewState::Loading => return status_page(fl!("loading")),
                ListViewState::Error => return status_page(fl!("list-error")),
                ListViewState::Empty => widget::container(widget::text::body(fl!("no-pokemon-found")))
                    .width(Length::Fill)
                    .align_x(Horizontal::Center)
                    .into(),
                ListViewState::Populated(pokemon) => widget::scrollable(
                    self.pokemon_grid(pokemon, space_s)
                        .apply(widget::container)
                        .padding([0, space_s]),
                )
                .height(Length::Fill)
                .into(),
            };

        let search = widget::search_input(fl!("search-placeholder"), self.search.search())
            .on_input(Message::Search)
            .on_clear(Message::Search(String::new()))
            .width(Length::Fixed(400.0));

        widget::column()
            .push(search)
            .push(content)
            .spacing(space_m)
            .padding([space_m, space_xxs])
            .width(Length::Fill)
            .into()
    }

    fn pokemon_grid<'a>(&'a self, pokemon: Vec<&'a PokemonSummary>, spacing: u16) -> Element<'a, Message> {
        let columns = self.config.columns();

        let rows: Vec<Element<'a, Message>> = pokemon
            .chunks(columns)
            .map(|chunk| {
                let mut row = widget::row().spacing(spacing);
                for pokemon in chunk {
                    row = row.push(self.pokemon_card(pokemon));
                }
                // keeps the last row's cards the same width as the others
                for _ in chunk.len()..columns {
                    row = row.push(widget::column().width(Length::Fill));
                }
                row.into()
            })
            .collect();

        widget::column::with_children(rows).spacing(spacing).into()
    }

    fn pokemon_card<'a>(&'a self, pokemon: &'a PokemonSummary) -> Element<'a, Message> {
        let spacing = theme::active().cosmic().spacing;

        let content = widget::column()
            .push(self.sprite(&pokemon.image, 96))
            .push(widget::text::heading(pokemon.name.as_str()))
            .push(widget::text::caption(format!("#{}", pokemon.number)))
            .push(type_tags(&pokemon.types, spacing.space_xxs))
            .align_x(Alignment::Center)
            .spacing(spacing.space_xxs)
            .width(Length::Fill);

        widget::button::custom(content)
            .on_press(Message::Navigate(Route::Details(pokemon.id.clone())))
            .class(theme::Button::Image)
            .padding(spacing.space_s)
            .width(Length::Fill)
            .into()
    }

    fn pokemon_details_dialog<'a>(&'a self, state: DetailViewState<'a>) -> Element<'a, Message> {
        let body: Element<'a, Message> = match state {
            DetailViewState::Closed | DetailViewState::Loading => {
                widget::text::body(fl!("loading")).into()
            }
            DetailViewState::Error => widget::text::body(fl!("details-error")).into(),
            DetailViewState::Loaded(None) => widget::text::body(fl!("pokemon-not-found")).into(),
            DetailViewState::Loaded(Some(details)) => self.pokemon_details(details),
        };

        widget::dialog()
            .title(fl!("pokemon-details"))
            .control(body)
            .primary_action(widget::button::standard(fl!("close")).on_press(Message::CloseDetails))
            .into()
    }

    fn pokemon_details<'a>(&'a self, details: &'a PokemonDetails) -> Element<'a, Message> {
        let cosmic_theme::Spacing {
            space_xxs, space_s, ..
        } = theme::active().cosmic().spacing;
        let summary = &details.summary;

        let fields = widget::column()
            .push(detail_field(fl!("name"), summary.name.clone(), space_xxs))
            .push(detail_field(fl!("number"), format!("#{}", summary.number), space_xxs))
            .push(detail_field(
                fl!("classification"),
                details.classification.clone(),
                space_xxs,
            ))
            .push(detail_field(fl!("height"), details.height.to_string(), space_xxs))
            .push(detail_field(fl!("weight"), details.weight.to_string(), space_xxs))
            .push(detail_field(fl!("max-cp"), details.max_cp.to_string(), space_xxs))
            .push(detail_field(fl!("max-hp"), details.max_hp.to_string(), space_xxs))
            .push(detail_field(
                fl!("resistant"),
                details.resistant.join(", "),
                space_xxs,
            ))
            .push(detail_field(
                fl!("weaknesses"),
                details.weaknesses.join(", "),
                space_xxs,
            ))
            .push(detail_field(
                fl!("flee-rate"),
                details.flee_rate.to_string(),
                space_xxs,
            ))
            .spacing(space_xxs)
            .width(Length::Fill);

        widget::column()
            .push(self.sprite(&summary.image, 120))
            .push(type_tags(&summary.types, space_xxs))
            .push(fields)
            .align_x(Alignment::Center)
            .spacing(space_s)
            .into()
    }

    /// The downloaded sprite for `url`, or a placeholder icon while there is none
    fn sprite(&self, url: &str, size: u16) -> Element<'_, Message> {
        match self.sprites.get(url) {
            Some(handle) => widget::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fixed(f32::from(size)))
                .height(Length::Fixed(f32::from(size)))
                .into(),
            None => widget::icon::icon(
                widget::icon::from_name("image-missing-symbolic")
                    .size(size)
                    .handle(),
            )
            .size(size)
            .into(),
        }
    }
}

/// Full-page message used while loading and on failure
fn status_page<'a>(text: String) -> Element<'a, Message> {
    widget::text::title3(text)
        .apply(widget::container)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn type_tags<'a>(types: &'a [String], spacing: u16) -> Element<'a, Message> {
    let tags: Vec<Element<'a, Message>> = types
        .iter()
        .map(|pokemon_type| {
            widget::text::caption(pokemon_type.as_str())
                .apply(widget::container)
                .padding([2, 8])
                .class(theme::Container::Card)
                .into()
        })
        .collect();

    widget::row::with_children(tags).spacing(spacing).into()
}

fn detail_field<'a>(label: String, value: String, spacing: u16) -> Element<'a, Message> {
    widget::row()
        .push(widget::text::heading(label))
        .push(widget::text::body(value))
        .spacing(spacing)
        .into()
}
