//! egui rendering of a window's widget tree.
//!
//! The header container is drawn as a top panel and the content container as
//! the central panel, each child in pack order. Clicks are returned as
//! [`UiCommand`]s and applied once the frame is finished.

use crate::editor::{Editor, PreviewBlock, Span};
use crate::shell::{Container, HeaderBar, WidgetContent};
use crate::window::MarkerWindow;
use egui::{Align, Color32, FontId, Layout, RichText, ScrollArea, TextEdit, Ui};
use marker_config::ViewMode;

/// Something the UI asks the window to do after the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Activate an action-map entry by id
    Activate(String),
    /// Start moving the window (header bar dragged)
    DragWindow,
    Minimize,
}

const HEADER_HEIGHT: f32 = 38.0;
const INDENT: f32 = 16.0;

pub fn draw(ctx: &egui::Context, window: &mut MarkerWindow) -> Vec<UiCommand> {
    let mut commands = Vec::new();
    let mut view_mode = window.view_mode;
    let font_size = window.font_size;

    {
        let shell = window.shell();
        let header = shell.header_container();
        if !header.is_empty() {
            egui::TopBottomPanel::top("header_container")
                .exact_height(HEADER_HEIGHT)
                .show(ctx, |ui| {
                    draw_container(ui, header, &mut view_mode, font_size, &mut commands)
                });
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            draw_container(
                ui,
                shell.content_container(),
                &mut view_mode,
                font_size,
                &mut commands,
            )
        });
    }
    window.view_mode = view_mode;

    egui::Window::new("About Marker")
        .open(&mut window.overlays.about)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading("Marker");
            ui.label(format!("Version {}", crate::VERSION));
            ui.label("A markdown editor with live preview.");
        });

    let rows = window.shortcut_rows();
    egui::Window::new("Keyboard Shortcuts")
        .open(&mut window.overlays.shortcuts)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (combo, action) in &rows {
                        ui.monospace(combo.as_str());
                        ui.label(describe_action(action));
                        ui.end_row();
                    }
                });
        });

    commands
}

fn describe_action(id: &str) -> &'static str {
    match id {
        "refresh_preview" => "Refresh the preview",
        "open_file" => "Open a file in a new window",
        "save_file" => "Save",
        "toggle_fullscreen" => "Toggle fullscreen",
        _ => "",
    }
}

fn draw_container(
    ui: &mut Ui,
    container: &Container,
    view_mode: &mut ViewMode,
    font_size: f32,
    commands: &mut Vec<UiCommand>,
) {
    for child in container.children() {
        match child.content() {
            WidgetContent::HeaderBar(bar) => {
                // Released before anything else can touch the header bar
                let bar = bar.borrow();
                draw_header_bar(ui, &bar, view_mode, commands);
            }
            WidgetContent::Editor(editor) => {
                let mut editor = editor.borrow_mut();
                draw_editor(ui, &mut editor, *view_mode, font_size);
            }
        }
    }
}

fn draw_header_bar(
    ui: &mut Ui,
    bar: &HeaderBar,
    view_mode: &mut ViewMode,
    commands: &mut Vec<UiCommand>,
) {
    let activate = |commands: &mut Vec<UiCommand>, id: &str| {
        commands.push(UiCommand::Activate(id.to_string()))
    };

    ui.horizontal_centered(|ui| {
        if ui.button("Open").clicked() {
            activate(commands, "open_file");
        }
        if ui.button("Save").clicked() {
            activate(commands, "save_file");
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if bar.show_close_button() {
                if ui.button("✕").on_hover_text("Close").clicked() {
                    activate(commands, "close_window");
                }
                if ui.button("_").on_hover_text("Minimize").clicked() {
                    commands.push(UiCommand::Minimize);
                }
            }
            if bar.unfullscreen_visible()
                && ui.button("⤡").on_hover_text("Exit fullscreen").clicked()
            {
                activate(commands, "exit_fullscreen");
            }

            ui.menu_button("⚙", |ui| {
                for item in bar.window_items() {
                    if ui.button(item.label.as_str()).clicked() {
                        activate(commands, &item.action);
                        ui.close();
                    }
                }
                ui.separator();
                ui.label("View");
                ui.selectable_value(view_mode, ViewMode::Editor, "Editor");
                ui.selectable_value(view_mode, ViewMode::Preview, "Preview");
                ui.selectable_value(view_mode, ViewMode::Dual, "Editor and Preview");
                if !bar.app_menu_items().is_empty() {
                    ui.separator();
                    for item in bar.app_menu_items() {
                        if ui.button(item.label.as_str()).clicked() {
                            activate(commands, &item.action);
                            ui.close();
                        }
                    }
                }
            });

            // Remaining space: title and subtitle, draggable
            let title = ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(RichText::new(bar.title()).strong());
                if !bar.subtitle().is_empty() {
                    ui.label(RichText::new(bar.subtitle()).small().weak());
                }
            });
            let drag = ui.interact(
                title.response.rect,
                ui.id().with("header_drag"),
                egui::Sense::drag(),
            );
            if drag.drag_started() {
                commands.push(UiCommand::DragWindow);
            }
        });
    });
}

fn draw_editor(ui: &mut Ui, editor: &mut Editor, view_mode: ViewMode, font_size: f32) {
    match view_mode {
        ViewMode::Editor => draw_text_area(ui, editor, font_size),
        ViewMode::Preview => draw_preview(ui, editor.preview(), font_size),
        ViewMode::Dual => {
            ui.columns(2, |columns| {
                draw_text_area(&mut columns[0], editor, font_size);
                draw_preview(&mut columns[1], editor.preview(), font_size);
            });
        }
    }
}

fn draw_text_area(ui: &mut Ui, editor: &mut Editor, font_size: f32) {
    ScrollArea::vertical()
        .id_salt("editor_text")
        .show(ui, |ui| {
            editor.edit(|text| {
                ui.add_sized(
                    ui.available_size(),
                    TextEdit::multiline(text)
                        .font(FontId::monospace(font_size))
                        .desired_width(f32::INFINITY)
                        .code_editor(),
                )
                .changed()
            });
        });
}

fn draw_preview(ui: &mut Ui, blocks: &[PreviewBlock], font_size: f32) {
    ScrollArea::vertical()
        .id_salt("editor_preview")
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            for block in blocks {
                draw_block(ui, block, font_size);
                ui.add_space(font_size * 0.4);
            }
        });
}

fn draw_block(ui: &mut Ui, block: &PreviewBlock, font_size: f32) {
    match block {
        PreviewBlock::Heading { level, spans } => {
            let scale = match level {
                1 => 2.0,
                2 => 1.6,
                3 => 1.3,
                4 => 1.15,
                _ => 1.0,
            };
            ui.horizontal_wrapped(|ui| {
                for span in spans {
                    ui.label(span_text(span, font_size * scale).strong());
                }
            });
        }
        PreviewBlock::Paragraph { spans, quote_depth } => {
            ui.horizontal(|ui| {
                for _ in 0..*quote_depth {
                    ui.add_space(INDENT / 2.0);
                    ui.separator();
                }
                ui.horizontal_wrapped(|ui| {
                    for span in spans {
                        ui.label(span_text(span, font_size));
                    }
                });
            });
        }
        PreviewBlock::ListItem {
            depth,
            marker,
            spans,
        } => {
            ui.horizontal(|ui| {
                ui.add_space(INDENT * (*depth as f32 + 1.0));
                ui.label(RichText::new(format!("{:>3}", marker)).size(font_size));
                ui.horizontal_wrapped(|ui| {
                    for span in spans {
                        ui.label(span_text(span, font_size));
                    }
                });
            });
        }
        PreviewBlock::CodeBlock { code, .. } => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(code)
                        .font(FontId::monospace(font_size * 0.9)),
                );
            });
        }
        PreviewBlock::Rule => {
            ui.separator();
        }
    }
}

fn span_text(span: &Span, size: f32) -> RichText {
    let mut text = RichText::new(&span.text).size(size);
    if span.bold {
        text = text.strong();
    }
    if span.italic {
        text = text.italics();
    }
    if span.strikethrough {
        text = text.strikethrough();
    }
    if span.code {
        text = text.code();
    }
    if span.link {
        text = text.underline().color(Color32::from_rgb(0x6c, 0x9e, 0xf8));
    }
    text
}
