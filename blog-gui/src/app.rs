use std::sync::Arc;

use blog_core::render::replace_icon_codes;
use blog_core::router::encode_fragment;
use blog_core::{
    handle_location_change, render_markdown, AddressBar, AppConfig, Catalog, ContentStore, Event,
    RequestToken, Route, ViewState,
};
use eframe::egui::{self, Color32, Rounding, Stroke};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub store: ContentStore,
    pub updates: mpsc::Receiver<Event>,
    pub update_tx: mpsc::Sender<Event>,
    pub config: AppConfig,
}

/// Body area of the detail pane. Title, date and tags come straight from
/// catalog metadata and are set before the fetch starts, so a failed
/// fetch only ever replaces this part.
enum BodyState {
    Loading,
    Ready(String),
    Failed(String),
}

struct ArticleDetail {
    filename: String,
    title: String,
    date: String,
    tags: Vec<String>,
    body: BodyState,
}

pub struct BlogApp {
    runtime: Arc<Runtime>,
    store: ContentStore,
    updates: mpsc::Receiver<Event>,
    update_tx: mpsc::Sender<Event>,
    config: AppConfig,
    catalog: Catalog,
    catalog_loading: bool,
    catalog_error: Option<String>,
    state: ViewState,
    address_bar: AddressBar,
    detail: Option<ArticleDetail>,
    latest_token: RequestToken,
}

impl BlogApp {
    pub fn new(init: AppInit) -> Self {
        Self {
            runtime: init.runtime,
            store: init.store,
            updates: init.updates,
            update_tx: init.update_tx,
            config: init.config,
            catalog: Catalog::default(),
            catalog_loading: true,
            catalog_error: None,
            state: ViewState::default(),
            address_bar: AddressBar::default(),
            detail: None,
            latest_token: 0,
        }
    }

    fn refresh_updates(&mut self) {
        while let Ok(evt) = self.updates.try_recv() {
            match evt {
                Event::CatalogLoaded(Ok(catalog)) => {
                    self.catalog_loading = false;
                    self.catalog_error = None;
                    self.catalog = catalog;
                    // Resolve whatever fragment we started with now that
                    // lookups are possible.
                    let route =
                        handle_location_change(self.address_bar.fragment(), &self.catalog);
                    self.apply_route(route);
                }
                Event::CatalogLoaded(Err(err)) => {
                    warn!(error = %err, "failed to load article catalog");
                    self.catalog_loading = false;
                    self.catalog_error =
                        Some("Не вдалося завантажити список статей.".to_string());
                }
                Event::ArticleLoaded {
                    token,
                    filename,
                    result,
                } => {
                    if token != self.latest_token {
                        debug!(%filename, token, "dropping stale article fetch result");
                        continue;
                    }
                    let Some(detail) = self.detail.as_mut() else {
                        continue;
                    };
                    if detail.filename != filename {
                        continue;
                    }
                    detail.body = match result {
                        Ok(raw) => {
                            let markup = replace_icon_codes(&render_markdown(&raw));
                            let text = html2text::from_read(
                                markup.as_bytes(),
                                self.config.ui.article_text_width,
                            );
                            BodyState::Ready(text)
                        }
                        Err(err) => {
                            warn!(%filename, error = %err, "failed to load article body");
                            BodyState::Failed("Помилка завантаження статті.".to_string())
                        }
                    };
                }
            }
        }
    }

    fn reload_catalog(&mut self) {
        self.catalog_loading = true;
        self.catalog_error = None;
        self.store
            .spawn_catalog_load(self.runtime.handle(), self.update_tx.clone());
    }

    /// Switches to the list view, dropping detail state and stripping the
    /// article fragment without adding a history entry.
    fn show_main(&mut self) {
        self.detail = None;
        self.state.show_main();
        self.address_bar.replace("");
    }

    /// Opens an article's detail view. Unknown filenames are a silent
    /// no-op. Metadata fills in immediately; the body arrives through the
    /// update channel and only the newest request's result is kept.
    fn show_article(&mut self, filename: &str) {
        let Some(article) = self.catalog.get(filename) else {
            return;
        };
        let fragment = encode_fragment(article);
        self.detail = Some(ArticleDetail {
            filename: article.filename.clone(),
            title: article.title().to_string(),
            date: article.date.clone(),
            tags: article.tags.clone(),
            body: BodyState::Loading,
        });
        self.state.show_article(filename);
        self.address_bar.navigate(fragment);

        self.latest_token += 1;
        self.store.spawn_article_load(
            self.runtime.handle(),
            filename.to_string(),
            self.latest_token,
            self.update_tx.clone(),
        );
    }

    fn apply_route(&mut self, route: Route) {
        match route {
            Route::Main => self.show_main(),
            Route::Article(filename) => self.show_article(&filename),
        }
    }

    fn go_back(&mut self) {
        if self.address_bar.back().is_some() {
            let fragment = self.address_bar.fragment().to_string();
            let route = handle_location_change(&fragment, &self.catalog);
            self.apply_route(route);
        }
    }

    fn go_forward(&mut self) {
        if self.address_bar.forward().is_some() {
            let fragment = self.address_bar.fragment().to_string();
            let route = handle_location_change(&fragment, &self.catalog);
            self.apply_route(route);
        }
    }

    fn setup_dark_theme(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        let bg_color = Color32::from_rgb(30, 30, 30);
        let panel_color = Color32::from_rgb(37, 37, 38);
        let border_color = Color32::from_rgb(62, 62, 66);
        let text_color = Color32::from_rgb(204, 204, 204);
        let accent_color = Color32::from_rgb(0, 122, 204);
        let hover_color = Color32::from_rgb(46, 46, 46);

        style.visuals.dark_mode = true;
        style.visuals.panel_fill = panel_color;
        style.visuals.window_fill = bg_color;
        style.visuals.extreme_bg_color = Color32::from_rgb(25, 25, 25);
        style.visuals.faint_bg_color = Color32::from_rgb(45, 45, 45);
        style.visuals.override_text_color = Some(text_color);

        style.visuals.widgets.noninteractive.bg_fill = panel_color;
        style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, border_color);
        style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);

        style.visuals.widgets.inactive.bg_fill = Color32::from_rgb(50, 50, 50);
        style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border_color);
        style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);

        style.visuals.widgets.hovered.bg_fill = hover_color;
        style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent_color);
        style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);

        style.visuals.widgets.active.bg_fill = accent_color;
        style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color);
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

        style.visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(0, 122, 204, 60);
        style.visuals.selection.stroke = Stroke::new(1.0, accent_color);

        style.visuals.widgets.noninteractive.rounding = Rounding::same(3.0);
        style.visuals.widgets.inactive.rounding = Rounding::same(3.0);
        style.visuals.widgets.hovered.rounding = Rounding::same(3.0);
        style.visuals.widgets.active.rounding = Rounding::same(3.0);

        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(10.0);

        ctx.set_style(style);
    }

    fn draw_left_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("articles_panel")
            .min_width(self.config.ui.sidebar_width)
            .max_width(self.config.ui.sidebar_width + 60.0)
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                    // History controls, the desktop stand-in for the
                    // browser back/forward buttons.
                    ui.horizontal(|ui| {
                        let back = ui.add_enabled(
                            self.address_bar.can_go_back(),
                            egui::Button::new("◀").small(),
                        );
                        if back.on_hover_text("Назад").clicked() {
                            self.go_back();
                        }
                        let forward = ui.add_enabled(
                            self.address_bar.can_go_forward(),
                            egui::Button::new("▶").small(),
                        );
                        if forward.on_hover_text("Вперед").clicked() {
                            self.go_forward();
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .small_button("⟳")
                                .on_hover_text("Оновити список статей")
                                .clicked()
                            {
                                self.reload_catalog();
                            }
                        });
                    });

                    ui.add_space(6.0);

                    ui.group(|group| {
                        group.vertical(|ui| {
                            ui.label(egui::RichText::new("🔍 Пошук статей").strong().size(15.0));
                            ui.separator();
                            ui.text_edit_singleline(&mut self.state.search_term);
                        });
                    });

                    ui.add_space(6.0);

                    self.draw_tag_buttons(ui);

                    ui.add_space(6.0);

                    ui.group(|group| {
                        group.vertical(|ui| {
                            ui.label(egui::RichText::new("📚 Статті").strong().size(15.0));
                            ui.separator();
                            egui::ScrollArea::vertical()
                                .auto_shrink([false, true])
                                .show(ui, |ui| {
                                    self.draw_article_list(ui);
                                });
                        });
                    });
                });
            });
    }

    fn draw_tag_buttons(&mut self, ui: &mut egui::Ui) {
        let tags = self.catalog.tag_index();
        ui.group(|group| {
            group.vertical(|ui| {
                ui.label(egui::RichText::new("🏷 Теги").strong().size(15.0));
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    let all_active = self.state.active_tag.is_none();
                    if ui.selectable_label(all_active, "всі").clicked() {
                        self.state.set_active_tag(None);
                    }
                    for tag in &tags {
                        let active = self.state.active_tag.as_deref() == Some(tag.as_str());
                        if ui.selectable_label(active, tag).clicked() {
                            self.state.set_active_tag(Some(tag));
                        }
                    }
                });
            });
        });
    }

    fn draw_article_list(&mut self, ui: &mut egui::Ui) {
        if self.catalog_loading {
            ui.label(egui::RichText::new("Завантаження…").weak().size(13.0));
            return;
        }
        if let Some(err) = &self.catalog_error {
            ui.label(
                egui::RichText::new(err.clone())
                    .color(Color32::from_rgb(229, 57, 53))
                    .size(13.0),
            );
            return;
        }

        let visible: Vec<blog_core::Article> = self
            .catalog
            .visible(self.state.active_tag.as_deref(), &self.state.search_term)
            .into_iter()
            .cloned()
            .collect();

        if visible.is_empty() {
            ui.label(egui::RichText::new("Статей не знайдено.").weak().size(13.0));
            return;
        }

        for article in visible {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical(|ui| {
                    let title = ui.add(
                        egui::Label::new(
                            egui::RichText::new(article.title()).strong().size(15.0),
                        )
                        .wrap(true)
                        .sense(egui::Sense::click()),
                    );
                    // Re-clicking the current article is allowed: it is
                    // how a failed body fetch gets retried.
                    if title.clicked() {
                        self.show_article(&article.filename);
                    }
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(format!("📅 {}", article.date))
                                .weak()
                                .size(12.0),
                        );
                        for tag in &article.tags {
                            ui.label(
                                egui::RichText::new(format!("🏷 {tag}")).weak().size(12.0),
                            );
                        }
                    });
                });
            });
            ui.add_space(4.0);
        }
    }

    fn draw_main_content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.current_article().is_some() {
                self.draw_article_detail(ui);
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.heading(egui::RichText::new("📖 ReadBlog").size(22.0));
                    ui.label(
                        egui::RichText::new("Виберіть статтю зі списку ліворуч.")
                            .weak()
                            .size(14.0),
                    );
                });
            }
        });
    }

    fn draw_article_detail(&mut self, ui: &mut egui::Ui) {
        let mut go_main = false;
        ui.horizontal(|ui| {
            if ui.button("← Назад").clicked() {
                go_main = true;
            }
            ui.separator();
            ui.heading(egui::RichText::new("📖 Читання статті").size(18.0));
        });
        if go_main {
            self.show_main();
            return;
        }
        ui.separator();

        let Some(detail) = &self.detail else {
            return;
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.group(|group| {
                    group.vertical(|ui| {
                        ui.label(egui::RichText::new(&detail.title).strong().size(22.0));
                        ui.add_space(4.0);
                        ui.label(
                            egui::RichText::new(format!("Дата публікації: {}", detail.date))
                                .weak()
                                .size(13.0),
                        );
                        ui.separator();

                        match &detail.body {
                            BodyState::Loading => {
                                ui.label(
                                    egui::RichText::new("Завантаження статті…").weak().size(14.0),
                                );
                            }
                            BodyState::Ready(text) => {
                                ui.label(egui::RichText::new(text).size(15.0));
                            }
                            BodyState::Failed(msg) => {
                                ui.label(
                                    egui::RichText::new(msg.clone())
                                        .color(Color32::from_rgb(229, 57, 53))
                                        .size(14.0),
                                );
                            }
                        }

                        if !detail.tags.is_empty() {
                            ui.add_space(12.0);
                            ui.horizontal_wrapped(|ui| {
                                for tag in &detail.tags {
                                    ui.label(
                                        egui::RichText::new(format!("🏷 {tag}"))
                                            .weak()
                                            .size(13.0),
                                    );
                                }
                            });
                        }
                    });
                });
            });
    }
}

impl eframe::App for BlogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.setup_dark_theme(ctx);
        self.refresh_updates();

        self.draw_left_panel(ctx);
        self.draw_main_content(ctx);
    }
}
