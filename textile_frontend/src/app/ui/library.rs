use eframe::egui::{self, Color32, RichText};

use crate::models::DesignMatch;

use super::super::TextileStudioApp;

pub fn render_library(app: &mut TextileStudioApp, ui: &mut egui::Ui) {
    ui.heading("Design Library");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Query");
        let response = ui.text_edit_singleline(&mut app.library.query);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(!app.library.searching, egui::Button::new("Search"))
            .clicked();
        if (clicked || submitted) && !app.library.searching {
            app.spawn_library_search();
        }
        if app.library.searching {
            ui.add(egui::Spinner::new());
        }
    });

    if let Some(err) = app.library.error.clone() {
        ui.add_space(6.0);
        ui.colored_label(Color32::LIGHT_RED, format!("Error: {err}"));
        if ui.button("Retry").clicked() {
            app.spawn_library_search();
        }
        return;
    }

    if app.library.searching {
        return;
    }

    if !app.library.searched {
        ui.add_space(6.0);
        ui.label(RichText::new("Search the indexed craft collection by description.").weak());
        return;
    }

    ui.add_space(10.0);
    if app.library.results.is_empty() {
        ui.label(RichText::new("No matches found").italics());
        return;
    }

    ui.label(format!("{} match(es)", app.library.results.len()));
    ui.add_space(6.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for design in &app.library.results {
            render_match(ui, design);
            ui.add_space(8.0);
        }
    });
}

fn render_match(ui: &mut egui::Ui, design: &DesignMatch) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(craft_label(design))
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.label(RichText::new(&design.id).small().weak());
            });
            if !design.path.is_empty() {
                ui.label(RichText::new(&design.path).small().monospace());
            }
        });
}

fn craft_label(design: &DesignMatch) -> &str {
    if design.craft.is_empty() {
        "unknown craft"
    } else {
        &design.craft
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::craft_label;
    use crate::models::DesignMatch;

    #[test]
    fn missing_craft_gets_a_placeholder() {
        let with_craft = DesignMatch {
            id: "img_1".into(),
            craft: "gond".into(),
            path: String::new(),
        };
        assert_eq!(craft_label(&with_craft), "gond");

        let without_craft = DesignMatch {
            id: "img_2".into(),
            craft: String::new(),
            path: String::new(),
        };
        assert_eq!(craft_label(&without_craft), "unknown craft");
    }
}
