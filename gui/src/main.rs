use eframe::egui;
use eframe::egui::{Key, ScrollArea, Ui};
use eframe::run_native;
use shared::grid::CellState::Alive;
use shared::{LifeEngine, SimConfig, TopologyMode};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const CELL_SIZE: f32 = 6.0;
const MIN_STEP_MS: u64 = 4;
const MAX_STEP_MS: u64 = 512;
const DEFAULT_SPEED: u32 = 3; // 2^(9-3) = 64 ms between generations

// Density range the digit keys 1-9 sweep through.
const LOW_DENSITY: f64 = 0.15;
const HIGH_DENSITY: f64 = 0.22;

const DIGIT_KEYS: [Key; 9] = [
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

/// Engine plus playback state shared between the UI and the stepper thread.
struct Playback {
    engine: LifeEngine,
    paused: bool,
    step_ms: u64,
}

fn step_interval(speed: u32) -> u64 {
    (1u64 << (9 - speed.clamp(1, 8))).clamp(MIN_STEP_MS, MAX_STEP_MS)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = SimConfig::default();
    let engine = LifeEngine::new(config)?;
    let playback = Arc::new(Mutex::new(Playback {
        engine,
        paused: false,
        step_ms: step_interval(DEFAULT_SPEED),
    }));

    run_native(
        "Random Life",
        eframe::NativeOptions::default(),
        Box::new(|cc| {
            let ctx = cc.egui_ctx.clone();
            let playback_clone = Arc::clone(&playback);

            // Background thread paces the generations; the UI thread only reads.
            thread::spawn(move || loop {
                let sleep_ms = {
                    let mut playback = playback_clone.lock().unwrap();
                    if !playback.paused && playback.engine.step() {
                        ctx.request_repaint();
                    }
                    playback.step_ms
                };
                thread::sleep(Duration::from_millis(sleep_ms));
            });

            Ok(Box::new(RandomLife::new(playback)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to start gui: {err}"))?;
    Ok(())
}

struct RandomLife {
    playback: Arc<Mutex<Playback>>,
    // Pending slider values; applied to the engine by the buttons below.
    density: f64,
    radius: f64,
    mode: TopologyMode,
    speed: u32,
}

impl RandomLife {
    fn new(playback: Arc<Mutex<Playback>>) -> Self {
        let (density, radius, mode) = {
            let playback = playback.lock().unwrap();
            let config = playback.engine.config();
            (config.density, config.neighbor_radius, config.mode)
        };
        Self {
            playback,
            density,
            radius,
            mode,
            speed: DEFAULT_SPEED,
        }
    }

    /// Fresh live/dead scatter over the existing sampling geometry.
    fn rescatter(&mut self) {
        let mut playback = self.playback.lock().unwrap();
        match playback.engine.initialize(self.density) {
            Ok(()) => log::info!("rescattered at density {:.3}", self.density),
            Err(err) => log::warn!("rescatter rejected: {err}"),
        }
    }

    /// New sampling geometry, then a fresh scatter over it.
    fn new_topology(&mut self) {
        let mut playback = self.playback.lock().unwrap();
        match playback.engine.regenerate_topology(self.mode, self.radius) {
            Ok(_) => {
                log::info!(
                    "new {} topology, radius {:.1}",
                    mode_label(self.mode),
                    self.radius
                );
                if let Err(err) = playback.engine.initialize(self.density) {
                    log::warn!("rescatter rejected: {err}");
                }
            }
            Err(err) => log::warn!("topology settings rejected: {err}"),
        }
    }

    fn toggle_pause(&mut self) {
        let mut playback = self.playback.lock().unwrap();
        playback.paused = !playback.paused;
        log::info!("{}", if playback.paused { "paused" } else { "resumed" });
    }

    fn apply_speed(&mut self) {
        self.playback.lock().unwrap().step_ms = step_interval(self.speed);
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let mut pause = false;
        let mut speed_delta = 0i32;
        let mut reseed_density = None;
        ctx.input(|input| {
            if input.key_pressed(Key::Space) || input.key_pressed(Key::P) {
                pause = true;
            }
            // Left slows the run down, right speeds it up, like the original
            // halve/double of the frame delay.
            if input.key_pressed(Key::ArrowLeft) {
                speed_delta -= 1;
            }
            if input.key_pressed(Key::ArrowRight) {
                speed_delta += 1;
            }
            for (n, key) in DIGIT_KEYS.iter().enumerate() {
                if input.key_pressed(*key) {
                    reseed_density =
                        Some(LOW_DENSITY + n as f64 / 8.0 * (HIGH_DENSITY - LOW_DENSITY));
                }
            }
        });

        if pause {
            self.toggle_pause();
        }
        if speed_delta != 0 {
            self.speed = self.speed.saturating_add_signed(speed_delta).clamp(1, 8);
            self.apply_speed();
        }
        if let Some(density) = reseed_density {
            self.density = density;
            self.rescatter();
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        let paused = self.playback.lock().unwrap().paused;
        ui.horizontal(|ui| {
            if ui
                .button(if paused { "Resume" } else { "Pause" })
                .clicked()
            {
                self.toggle_pause();
            }
            if ui.button("Rescatter").clicked() {
                self.rescatter();
            }
            if ui.button("New topology").clicked() {
                self.new_topology();
            }
        });

        ui.add(egui::Slider::new(&mut self.density, 0.0..=1.0).text("initial density"));
        ui.add(egui::Slider::new(&mut self.radius, 1.0..=16.0).text("neighbor radius"));
        if ui
            .add(egui::Slider::new(&mut self.speed, 1..=8).text("speed"))
            .changed()
        {
            self.apply_speed();
        }

        egui::ComboBox::from_label("topology mode")
            .selected_text(mode_label(self.mode))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.mode, TopologyMode::Independent, "per cell");
                ui.selectable_value(&mut self.mode, TopologyMode::Shared, "shared");
            });
    }

    /// Paint the grid and report whether it was clicked.
    fn draw_grid(&mut self, ui: &mut Ui) -> bool {
        let playback = self.playback.lock().unwrap();
        let grid = playback.engine.grid();

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(
                CELL_SIZE * grid.width() as f32,
                CELL_SIZE * grid.height() as f32,
            ),
            egui::Sense::click(),
        );

        let painter = ui.painter();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = rect.min + egui::vec2(x as f32 * CELL_SIZE, y as f32 * CELL_SIZE);
                let color = if grid.get(x, y) == Alive {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::DARK_GRAY
                };
                painter.rect_filled(
                    egui::Rect::from_min_size(pos, egui::vec2(CELL_SIZE, CELL_SIZE)),
                    CELL_SIZE / 4f32,
                    color,
                );
            }
        }

        response.clicked()
    }
}

impl eframe::App for RandomLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                ui.heading("Random Life");
                {
                    let playback = self.playback.lock().unwrap();
                    ui.label(format!(
                        "generation {} — {} live cells",
                        playback.engine.iterations(),
                        playback.engine.grid().live_count()
                    ));
                }

                self.controls(ui);

                // Clicking the grid rescatters, like the original canvas.
                if self.draw_grid(ui) {
                    self.rescatter();
                }
            });
        });
    }
}

fn mode_label(mode: TopologyMode) -> &'static str {
    match mode {
        TopologyMode::Shared => "shared",
        TopologyMode::Independent => "per cell",
    }
}
