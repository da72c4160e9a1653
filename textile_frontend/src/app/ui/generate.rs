use eframe::egui::{self, Color32, RichText};

use super::super::{format_timestamp, TextileStudioApp};

pub fn render_generate(app: &mut TextileStudioApp, ui: &mut egui::Ui) {
    ui.heading("Textile Design Generator");
    ui.add_space(10.0);

    ui.add(
        egui::TextEdit::multiline(&mut app.prompt)
            .desired_rows(2)
            .desired_width(f32::INFINITY)
            .hint_text("Enter your prompt (e.g., Ajrakh pattern)"),
    );

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let label = if app.generating {
            "Generating…"
        } else {
            "Generate"
        };
        if ui
            .add_enabled(!app.generating, egui::Button::new(label))
            .clicked()
        {
            app.spawn_generate();
        }
        if app.generating {
            ui.add(egui::Spinner::new());
        }
    });

    if let Some(err) = app.generate_error.clone() {
        ui.add_space(6.0);
        ui.colored_label(Color32::LIGHT_RED, format!("Error: {err}"));
        if ui.button("Retry").clicked() {
            app.spawn_generate();
        }
    }

    ui.add_space(10.0);

    let mut select: Option<usize> = None;
    let mut save_current = false;

    egui::ScrollArea::vertical().show(ui, |ui| {
        if let Some(index) = app.current {
            render_current_design(app, ui, index, &mut save_current);
        }

        if !app.history.is_empty() {
            ui.add_space(12.0);
            ui.separator();
            ui.label(RichText::new("Session history").small().weak());
            for (index, design) in app.history.iter().enumerate().rev() {
                let selected = app.current == Some(index);
                let label = format!(
                    "{} — {}",
                    format_timestamp(&design.created_at),
                    summarize_prompt(&design.prompt)
                );
                if ui.selectable_label(selected, label).clicked() {
                    select = Some(index);
                }
            }
        }
    });

    if save_current {
        app.spawn_save_current();
    }
    if let Some(index) = select {
        app.current = Some(index);
    }
}

fn render_current_design(
    app: &mut TextileStudioApp,
    ui: &mut egui::Ui,
    index: usize,
    save_current: &mut bool,
) {
    let Some(design) = app.history.get_mut(index) else {
        return;
    };

    if design.texture.is_none() {
        let color = egui::ColorImage::from_rgba_unmultiplied(design.image.size, &design.image.pixels);
        let texture = ui.ctx().load_texture(
            format!("design-{}", design.seq),
            color,
            egui::TextureOptions::default(),
        );
        design.texture = Some(texture);
    }

    if let Some(texture) = &design.texture {
        let size = texture.size_vec2();
        let max_width = ui.available_width().min(640.0);
        let scale = if size.x > max_width {
            max_width / size.x
        } else {
            1.0
        };
        ui.add(egui::Image::from_texture(texture).fit_to_exact_size(size * scale));
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new(summarize_prompt(&design.prompt)).strong());
        ui.label(RichText::new(format_timestamp(&design.created_at)).small().weak());
        if ui.button("💾 Save as…").clicked() {
            *save_current = true;
        }
    });
}

fn summarize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return "(empty prompt)".to_string();
    }
    if trimmed.chars().count() > 60 {
        let head: String = trimmed.chars().take(57).collect();
        format!("{head}…")
    } else {
        trimmed.to_string()
    }
}
