//! Demo screen: a clock-face dial with a value readout and a results list.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use egui::{Context, Key};
use rotodial::config::AppConfig;
use rotodial::{DialController, Dispatch};
use tracing::{info, trace, warn};

mod face;
mod surface;

use face::DialFace;
use surface::PointerSurface;

/// Value label and rounded history shared with the dial callbacks.
#[derive(Debug, Default)]
struct Readout {
    value_text: String,
    results: Vec<String>,
}

impl Readout {
    fn show_value(&mut self, value: f64) {
        self.value_text = format!("Value: {value:.2}");
    }

    fn add_result(&mut self, value: f64) {
        self.results.push(format!("{}", value.round()));
    }
}

pub struct DialDemoApp {
    config: AppConfig,
    face: Rc<RefCell<DialFace>>,
    readout: Rc<RefCell<Readout>>,
    dial: DialController<DialFace, PointerSurface>,
    damping: f64,
    animation_secs: f64,
}

impl DialDemoApp {
    pub fn new(config: AppConfig) -> Self {
        let face = Rc::new(RefCell::new(DialFace::new(config.face.radius())));
        let readout = Rc::new(RefCell::new(Readout {
            value_text: "Value: -".to_string(),
            results: Vec::new(),
        }));
        let settings = config.dial_settings();
        let mut dial = DialController::new(&face, PointerSurface::default());
        if let Err(err) = dial.apply_settings(settings) {
            warn!("falling back to default dial settings: {err}");
        }

        let on_tap = Rc::clone(&readout);
        dial.attach_tap(Some(Box::new(move |value| {
            let mut readout = on_tap.borrow_mut();
            readout.show_value(value);
            readout.add_result(value);
        })));
        let on_change = Rc::clone(&readout);
        let on_complete = Rc::clone(&readout);
        dial.attach_drag(
            Some(Box::new(move |value| on_change.borrow_mut().show_value(value))),
            Some(Box::new(move |value| on_complete.borrow_mut().add_result(value))),
        );

        let current = dial.settings();
        Self {
            config,
            face,
            readout,
            dial,
            damping: current.damping,
            animation_secs: current.animation_duration.as_secs_f64(),
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Dial");
        ui.add_space(4.0);
        if ui
            .add(egui::Slider::new(&mut self.damping, 0.05..=1.0).text("damping"))
            .changed()
            && let Err(err) = self.dial.set_damping(self.damping)
        {
            warn!("damping slider rejected: {err}");
        }
        if ui
            .add(egui::Slider::new(&mut self.animation_secs, 0.05..=2.0).text("tap animation (s)"))
            .changed()
            && let Err(err) = self
                .dial
                .set_animation_duration(Duration::from_secs_f64(self.animation_secs))
        {
            warn!("animation slider rejected: {err}");
        }
        ui.separator();
        let settings = self.dial.settings();
        ui.label(format!(
            "range: {} → {}",
            settings.range.lower, settings.range.upper
        ));
        ui.label(format!("angle: {:.3} rad", self.dial.current_angle()));
        if self.dial.is_animating() {
            ui.label("animating…");
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) -> bool {
        let readout = self.readout.borrow();
        let mut clear = false;
        ui.horizontal(|ui| {
            ui.label(format!("[{}]", readout.results.join(", ")));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                clear = ui
                    .add_enabled(!readout.results.is_empty(), egui::Button::new("Clear"))
                    .clicked();
            });
        });
        clear
    }

    fn ui_dial(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        let size = self.face.borrow().size();
        let sense = self.dial.surface().sense();
        let cancel = ctx.input(|i| i.key_pressed(Key::Escape));

        ui.vertical_centered(|ui| {
            ui.add_space(((ui.available_height() - size.y) / 2.0).max(0.0));
            let (rect, response) = ui.allocate_exact_size(size, sense);

            for event in surface::gesture_events(&response, rect, cancel) {
                if let Dispatch::Delivered(value) = self.dial.handle(event) {
                    trace!(?event, value, "demo dial step");
                }
            }

            let mut face = self.face.borrow_mut();
            face.tick(Instant::now());
            if face.is_animating() {
                ctx.request_repaint();
            }
            if ui.is_rect_visible(rect) {
                face.paint(
                    ui.painter(),
                    rect,
                    &self.config.face,
                    ui.visuals().text_color(),
                );
            }
        });
    }
}

impl eframe::App for DialDemoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("value").show(ctx, |ui| {
            ui.add_space(6.0);
            let text = self.readout.borrow().value_text.clone();
            ui.vertical_centered(|ui| ui.heading(text));
            ui.add_space(6.0);
        });
        let mut clear = false;
        egui::TopBottomPanel::bottom("results").show(ctx, |ui| {
            ui.add_space(4.0);
            clear = self.ui_results(ui);
            ui.add_space(4.0);
        });
        if clear {
            info!("clearing {} results", self.readout.borrow().results.len());
            self.readout.borrow_mut().results.clear();
        }
        egui::SidePanel::right("settings")
            .resizable(false)
            .show(ctx, |ui| self.ui_settings(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_dial(ctx, ui));
    }
}
