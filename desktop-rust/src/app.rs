use std::time::Duration;

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use pda_inbound_common::{
    DeviceSimulator, Event, FlowStep, NoticeKind, RandomDevice, Screen, Session, SessionConfig,
};

use crate::model::{input_event, pad_events, submit_event, Field, UiState, PAD_ROWS};

const SCREEN_SIZE: egui::Vec2 = egui::vec2(320.0, 440.0);
const BODY: Color32 = Color32::from_rgb(38, 41, 48);
const SCREEN_BG: Color32 = Color32::from_rgb(24, 28, 40);
const TRIGGER: Color32 = Color32::from_rgb(246, 196, 69);
const TRIGGER_HOT: Color32 = Color32::from_rgb(255, 221, 120);
const KEY_BLUE: Color32 = Color32::from_rgb(47, 94, 168);
const ACCENT: Color32 = Color32::from_rgb(246, 196, 69);
const OK_GREEN: Color32 = Color32::from_rgb(46, 160, 67);
const ERR_RED: Color32 = Color32::from_rgb(218, 54, 51);
const IDLE_REPAINT: Duration = Duration::from_secs(1);

pub struct DeviceApp {
    session: Session,
    device: RandomDevice,
    ui: UiState,
}

impl DeviceApp {
    pub fn new(config: SessionConfig, device: RandomDevice) -> Self {
        Self {
            session: Session::new(config),
            device,
            ui: UiState::default(),
        }
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            self.session.handle(event, &mut self.device);
        }
    }

    fn repaint_delay(&mut self) -> Duration {
        match self.session.next_deadline() {
            Some(deadline) => {
                let wait = (deadline - self.device.now_millis()).max(0) as u64;
                Duration::from_millis(wait).min(IDLE_REPAINT)
            }
            None => IDLE_REPAINT,
        }
    }

    fn render_chassis(&mut self, ui: &mut egui::Ui, select_mid: bool, events: &mut Vec<Event>) {
        ui.horizontal_top(|ui| {
            ui.add_space(4.0);
            ui.vertical(|ui| {
                ui.add_space(180.0);
                side_trigger(ui, false, events);
            });

            let body = egui::Frame::none()
                .fill(BODY)
                .stroke(egui::Stroke::new(2.0, Color32::from_gray(20)))
                .rounding(egui::Rounding::same(28.0))
                .inner_margin(egui::Margin::same(16.0));
            body.show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Seuic").strong().size(16.0).color(Color32::from_gray(170)));
                    ui.add_space(6.0);
                    self.render_screen_area(ui, select_mid, events);
                    ui.add_space(12.0);
                    key_row(ui, events);
                    ui.add_space(10.0);
                    self.render_numpad(ui, events);
                });
            });

            ui.vertical(|ui| {
                ui.add_space(180.0);
                side_trigger(ui, true, events);
            });
        });
    }

    fn render_screen_area(&mut self, ui: &mut egui::Ui, select_mid: bool, events: &mut Vec<Event>) {
        let bezel = egui::Frame::none()
            .fill(Color32::BLACK)
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(6.0));
        bezel.show(ui, |ui| {
            egui::Frame::none().fill(SCREEN_BG).inner_margin(egui::Margin::same(8.0)).show(ui, |ui| {
                ui.set_min_size(SCREEN_SIZE);
                ui.set_max_size(SCREEN_SIZE);
                status_bar(ui);
                ui.separator();
                if let Some(notice) = self.session.notice() {
                    let color = match notice.kind {
                        NoticeKind::Success => OK_GREEN,
                        NoticeKind::Error => ERR_RED,
                    };
                    egui::Frame::none()
                        .fill(color)
                        .rounding(egui::Rounding::same(6.0))
                        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&notice.message).color(Color32::WHITE));
                        });
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    render_screen(ui, &self.session, &mut self.ui, select_mid, events);
                });
            });
        });
    }

    fn render_numpad(&mut self, ui: &mut egui::Ui, events: &mut Vec<Event>) {
        let key_size = egui::vec2(84.0, 40.0);
        egui::Grid::new("numpad").spacing(egui::vec2(8.0, 8.0)).show(ui, |ui| {
            for row in PAD_ROWS {
                for (key, legend) in row {
                    let text = if legend.is_empty() {
                        key.label()
                    } else {
                        format!("{}\n{}", key.label(), legend)
                    };
                    let button = egui::Button::new(RichText::new(text).color(Color32::from_gray(220)))
                        .fill(Color32::from_gray(60))
                        .min_size(key_size);
                    if ui.add(button).clicked() {
                        events.extend(pad_events(&self.session, self.ui.focus, key));
                    }
                }
                ui.end_row();
            }
        });
    }
}

impl Default for DeviceApp {
    fn default() -> Self {
        Self::new(SessionConfig::default(), RandomDevice::new())
    }
}

impl eframe::App for DeviceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.handle(Event::Tick, &mut self.device);

        let mut events = Vec::new();
        if ctx.input(|i| i.key_pressed(egui::Key::F1)) {
            events.push(Event::Trigger);
        }
        let select_mid = match self.session.screen_mut() {
            Screen::Dashboard(dash) => dash.take_select_request(),
            _ => false,
        };

        let background = egui::Frame::none()
            .fill(Color32::from_gray(14))
            .inner_margin(egui::Margin::same(12.0));
        egui::CentralPanel::default().frame(background).show(ctx, |ui| {
            self.render_chassis(ui, select_mid, &mut events);
        });

        if !events.is_empty() {
            self.dispatch(events);
            ctx.request_repaint();
        }
        let delay = self.repaint_delay();
        ctx.request_repaint_after(delay);
    }
}

/// 側面トリガー。右側だけが押せる
fn side_trigger(ui: &mut egui::Ui, interactive: bool, events: &mut Vec<Event>) {
    let sense = if interactive { egui::Sense::click() } else { egui::Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(14.0, 120.0), sense);
    let color = if interactive && response.hovered() { TRIGGER_HOT } else { TRIGGER };
    ui.painter().rect_filled(rect, egui::Rounding::same(6.0), color);
    if interactive && response.clicked() {
        events.push(Event::Trigger);
    }
}

/// Home / Camera / Back
fn key_row(ui: &mut egui::Ui, events: &mut Vec<Event>) {
    ui.horizontal(|ui| {
        ui.add_space(24.0);
        let home = egui::Button::new(RichText::new("Home").color(Color32::WHITE))
            .fill(KEY_BLUE)
            .min_size(egui::vec2(72.0, 32.0));
        ui.add(home);

        let camera = egui::Button::new(RichText::new("SCAN").strong().color(Color32::BLACK))
            .fill(TRIGGER)
            .rounding(egui::Rounding::same(20.0))
            .min_size(egui::vec2(96.0, 40.0));
        if ui.add(camera).on_hover_text("F1").clicked() {
            events.push(Event::Trigger);
        }

        let back = egui::Button::new(RichText::new("Back").color(Color32::WHITE))
            .fill(KEY_BLUE)
            .min_size(egui::vec2(72.0, 32.0));
        if ui.add(back).clicked() {
            events.push(Event::Cancel);
        }
    });
}

fn status_bar(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let now = chrono::Local::now().format("%H:%M").to_string();
        ui.label(RichText::new(now).small().color(Color32::from_gray(200)));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("4G").small().color(Color32::from_gray(200)));
        });
    });
}

fn render_screen(
    ui: &mut egui::Ui,
    session: &Session,
    state: &mut UiState,
    select_mid: bool,
    events: &mut Vec<Event>,
) {
    match session.screen() {
        Screen::Login(login) => {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("PDA 入庫").color(ACCENT));
            });
            ui.add_space(16.0);
            ui.label("工号");
            text_field(ui, state, Field::EmployeeId, &login.employee_id, "工号を入力", events);
            ui.label("密码");
            text_field(ui, state, Field::Password, &login.password, "密码を入力", events);
            ui.add_space(12.0);
            let label = if login.is_loading() { "ログイン中..." } else { "ログイン" };
            let enabled = !login.is_loading() && !login.employee_id.is_empty();
            let button = egui::Button::new(label).min_size(egui::vec2(SCREEN_SIZE.x - 16.0, 32.0));
            if ui.add_enabled(enabled, button).clicked() {
                events.push(Event::LoginSubmit);
            }
        }
        Screen::Dashboard(dash) => {
            ui.horizontal(|ui| {
                ui.label(RichText::new("入庫").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(session.operator().unwrap_or("-")).color(ACCENT));
                });
            });
            ui.add_space(6.0);
            ui.label("MID");
            let output = text_field(ui, state, Field::Mid, &dash.mid_input, "MIDをスキャンまたは入力", events);
            if select_mid {
                let len = dash.mid_input.chars().count();
                let range = egui::text_selection::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    egui::text::CCursor::new(len),
                );
                let mut text_state = output.state;
                text_state.cursor.set_char_range(Some(range));
                text_state.store(ui.ctx(), output.response.id);
                output.response.request_focus();
            }
            if dash.show_error() {
                ui.label(RichText::new("MIDが一致しません").color(ERR_RED));
            }
            ui.add_space(8.0);
            ui.separator();
            text_field(ui, state, Field::Search, &dash.search_query, "MID / 庫位で検索", events);

            let history = dash.history(session.store());
            if history.is_empty() {
                ui.label(RichText::new("記録なし").weak());
            }
            for entry in history {
                let record = entry.record;
                let stroke = if entry.is_latest {
                    egui::Stroke::new(1.0, ACCENT)
                } else {
                    egui::Stroke::new(1.0, Color32::from_gray(40))
                };
                let card = egui::Frame::none()
                    .fill(Color32::from_rgb(31, 35, 48))
                    .stroke(stroke)
                    .rounding(egui::Rounding::same(6.0))
                    .inner_margin(egui::Margin::same(6.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&record.storage_code).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(RichText::new(format!("#{}", record.short_id())).weak());
                            });
                        });
                        ui.label(format!("MID {}  {}g", record.mid, record.weight));
                        ui.label(
                            RichText::new(pda_inbound_common::format_timestamp(record.timestamp))
                                .small()
                                .weak(),
                        );
                    });
                if card.response.interact(egui::Sense::click()).clicked() {
                    events.push(Event::OpenRecord(record.id.clone()));
                }
                ui.add_space(4.0);
            }
        }
        Screen::Capture(flow) => {
            ui.label(RichText::new(format!("MID {}", flow.draft().mid)).strong());
            ui.add_space(6.0);
            match flow.step() {
                FlowStep::Photo => {
                    photo_box(ui, None);
                    ui.label("トリガーを押して撮影");
                }
                FlowStep::WeightAndStorage => {
                    photo_box(ui, flow.photo_url());
                    ui.label("重量 (g)");
                    text_field(ui, state, Field::Weight, &flow.weight, "重量", events);
                    ui.label("庫位");
                    text_field(ui, state, Field::StorageCode, &flow.storage_code, "庫位をスキャン", events);
                    ui.add_space(8.0);
                    if ui.button("確定").clicked() {
                        events.push(Event::StorageSubmit);
                    }
                }
            }
            ui.add_space(6.0);
            if ui.button("取消").clicked() {
                events.push(Event::Cancel);
            }
        }
        Screen::Detail(edit) => {
            let record = edit.original();
            ui.label(RichText::new(format!("記録 #{}", record.short_id())).strong());
            photo_box(ui, Some(&record.photo_url));
            egui::Grid::new("detail_grid").num_columns(2).show(ui, |ui| {
                ui.label("MID");
                ui.label(&record.mid);
                ui.end_row();
                ui.label("担当者");
                ui.label(&record.operator);
                ui.end_row();
                ui.label("登録日時");
                ui.label(edit.created_at());
                ui.end_row();
            });
            ui.add_space(6.0);
            ui.label("重量 (g)");
            text_field(ui, state, Field::DetailWeight, &edit.weight, "重量", events);
            ui.label("庫位");
            text_field(ui, state, Field::DetailStorageCode, &edit.storage_code, "庫位", events);
            if !edit.storage_code_looks_valid() {
                ui.label(RichText::new("庫位の形式が通常と異なります").small().color(ACCENT));
            }
            if edit.is_modified() {
                ui.label(RichText::new("未保存の変更あり").small().weak());
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("保存").clicked() {
                    events.push(Event::DetailSave);
                }
                if ui.button("戻る").clicked() {
                    events.push(Event::Cancel);
                }
            });
        }
    }
}

fn text_field(
    ui: &mut egui::Ui,
    state: &mut UiState,
    field: Field,
    value: &str,
    hint: &str,
    events: &mut Vec<Event>,
) -> egui::text_edit::TextEditOutput {
    let mut text = value.to_string();
    let output = egui::TextEdit::singleline(&mut text)
        .hint_text(hint)
        .password(field == Field::Password)
        .desired_width(f32::INFINITY)
        .show(ui);
    if output.response.has_focus() {
        state.focus = Some(field);
    }
    if output.response.changed() {
        events.push(input_event(field, text));
    }
    if output.response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        events.extend(submit_event(field));
    }
    output
}

fn photo_box(ui: &mut egui::Ui, photo: Option<&str>) {
    let size = egui::vec2(ui.available_width(), 120.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, egui::Rounding::same(6.0), Color32::from_gray(50));
    let text = photo.unwrap_or("写真なし");
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(12.0),
        Color32::from_gray(180),
    );
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\msyh.ttc",
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    ];

    let Some(data) = candidates.iter().find_map(|path| std::fs::read(path).ok()) else {
        tracing::debug!("no CJK font found, using egui defaults");
        return;
    };
    fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk_fallback".to_string());
    }
    ctx.set_fonts(fonts);
}
