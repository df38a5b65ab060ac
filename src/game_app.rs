use crate::game::{GameController, Player, Status};

use eframe::egui;
use std::time::Duration;

pub struct GameApp {
    controller: GameController,
}

impl GameApp {
    pub fn new(controller: GameController) -> Self {
        Self { controller }
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controller.poll() {
            ctx.request_repaint();
        }

        // Keep frames coming while the AI timer runs so `poll` sees it fire.
        if self.controller.ai_pending() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.handle_game_ui(ui);
        });
    }
}

impl GameApp {
    fn handle_game_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.group(|ui| {
                ui.set_width(400.0);
                ui.set_height(500.0);

                self.display_game_status(ui);

                ui.add_space(10.0);

                self.render_board(ui);

                ui.add_space(10.0);

                if self.controller.state().game_over()
                    && ui
                        .add(
                            egui::Button::new(
                                egui::RichText::new("New Game")
                                    .size(25.0)
                                    .color(egui::Color32::from_rgb(240, 148, 0)),
                            )
                            .min_size(egui::vec2(150.0, 40.0)),
                        )
                        .clicked()
                {
                    self.controller.reset();
                }
            });
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let state = *self.controller.state();
        let button_size = 100.0;
        let mut clicked = None;

        ui.vertical_centered(|ui| {
            for row in 0..3 {
                ui.horizontal(|ui| {
                    ui.add_space(40.0);
                    for col in 0..3 {
                        let index = row * 3 + col;
                        let cell = state.board()[index];

                        let can_move = !state.game_over() && state.x_is_next() && cell.is_none();

                        let button = ui.add_enabled(
                            can_move,
                            egui::Button::new(cell_text(cell))
                                .min_size(egui::vec2(button_size, button_size)),
                        );

                        if button.clicked() && can_move {
                            clicked = Some(index);
                        }
                    }
                });
            }
        });

        if let Some(index) = clicked {
            self.controller.click(index);
        }
    }

    fn display_game_status(&self, ui: &mut egui::Ui) {
        let status = self.controller.status();
        let color = match status {
            Status::PlayerTurn => egui::Color32::from_rgb(0, 255, 0),
            Status::AiTurn => egui::Color32::from_rgb(0, 191, 255),
            Status::Winner(_) | Status::Draw => egui::Color32::from_rgb(255, 0, 0),
        };

        ui.label(egui::RichText::new(status.to_string()).size(30.0).color(color));
    }
}

fn cell_text(cell: Option<Player>) -> egui::RichText {
    match cell {
        Some(Player::X) => egui::RichText::new("X")
            .size(50.0)
            .color(egui::Color32::from_rgb(255, 99, 71)),
        Some(Player::O) => egui::RichText::new("O")
            .size(50.0)
            .color(egui::Color32::from_rgb(34, 139, 34)),
        None => egui::RichText::new(" ")
            .size(50.0)
            .color(egui::Color32::from_rgb(180, 180, 180)),
    }
}
