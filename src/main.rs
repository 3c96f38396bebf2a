use arboard::Clipboard;
use avoider::config::VisualConfig;
use avoider::{Actor, Config, Encounter, EvaderState, Point2D, Scene, SceneLayout, TickReport};
use log::{error, info};
use macroquad::prelude::*;

type Demo = Encounter<Scene, Actor>;

const HEADLESS_DT: f32 = 1.0 / 60.0;
const OBSTACLE_HALF_SIZE: f32 = 0.75;
const LAYOUT_SAVE_PATH: &str = "scene_layout.json";

/// Install the logger using the level from config.toml (RUST_LOG wins), then load the config
fn init_logging() -> Config {
    let level = Config::from_file("config.toml")
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    Config::load()
}

fn build_encounter(config: &Config) -> avoider::Result<Demo> {
    config.validate()?;
    let layout = match &config.scene.layout_path {
        Some(path) => {
            info!("Loading scene layout from {}", path);
            SceneLayout::load_from_file(path)?
        }
        None => SceneLayout::courtyard(),
    };

    let agents = &config.agents;
    let pursuer = Actor::new(layout.pursuer_start.x, layout.pursuer_start.y, agents.pursuer_speed)
        .with_acceleration(agents.acceleration)
        .with_stopping_distance(agents.pursuer_stopping_distance);
    let evader_body = Actor::new(layout.evader_start.x, layout.evader_start.y, agents.evader_speed)
        .with_acceleration(agents.acceleration)
        .with_stopping_distance(agents.evader_stopping_distance);

    Encounter::builder()
        .config(config.evader.clone())
        .oracle(layout.build_scene(agents.body_radius))
        .pursuer(pursuer)
        .evader_body(evader_body)
        .build()
}

/// One control tick followed by the locomotion step of both agents
fn step(demo: &mut Demo, dt: f32) -> TickReport {
    let report = demo.tick(dt);
    demo.pursuer_mut().update(dt);
    demo.evader_body_mut().update(dt);
    report
}

/// Run without drawing and print a summary
fn run_headless(demo: &mut Demo, ticks: u32, max_points: usize) {
    println!("Running {} headless ticks at {:.4}s\n", ticks, HEADLESS_DT);

    let mut seen_ticks = 0;
    let mut halts = 0;
    let mut destinations = 0;
    for tick in 1..=ticks {
        let report = step(demo, HEADLESS_DT);
        if report.seen {
            seen_ticks += 1;
        }
        if report.halted {
            halts += 1;
        }
        if report.new_destination.is_some() {
            destinations += 1;
        }
        if tick % 60 == 0 {
            println!("[{:5}] {}", tick, demo.snapshot(max_points).summary());
        }
    }

    println!("\n========================================");
    println!("Ticks: {} ({} with pursuer line of sight)", ticks, seen_ticks);
    println!("Destinations chosen: {}, halts: {}", destinations, halts);
    println!("Final: {}", demo.snapshot(max_points).summary());
    println!("========================================");
}

/// World ↔ screen mapping, world origin at the window centre
struct View {
    pixels_per_unit: f32,
}

impl View {
    fn to_screen(&self, p: Point2D) -> (f32, f32) {
        (
            screen_width() / 2.0 + p.x * self.pixels_per_unit,
            screen_height() / 2.0 + p.y * self.pixels_per_unit,
        )
    }

    fn to_world(&self, x: f32, y: f32) -> Point2D {
        Point2D::new(
            (x - screen_width() / 2.0) / self.pixels_per_unit,
            (y - screen_height() / 2.0) / self.pixels_per_unit,
        )
    }

    fn line(&self, from: Point2D, to: Point2D, thickness: f32, color: Color) {
        let (x1, y1) = self.to_screen(from);
        let (x2, y2) = self.to_screen(to);
        draw_line(x1, y1, x2, y2, thickness, color);
    }

    fn disc(&self, center: Point2D, radius: f32, color: Color) {
        let (x, y) = self.to_screen(center);
        draw_circle(x, y, radius * self.pixels_per_unit, color);
    }
}

/// Visualization state
struct VisState {
    demo: Demo,
    view: View,
    visual: VisualConfig,
    snapshot_path: String,
    show_gizmos: bool,
    paused: bool,
    last_report: Option<TickReport>,
}

impl VisState {
    fn new(demo: Demo, config: &Config) -> Self {
        VisState {
            demo,
            view: View {
                pixels_per_unit: config.visual.pixels_per_unit,
            },
            visual: config.visual.clone(),
            snapshot_path: config.logging.snapshot_path.clone(),
            show_gizmos: config.visual.show_gizmos,
            paused: false,
            last_report: None,
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let p = self.view.to_world(mouse_x, mouse_y);

        // Left click: toggle obstacle
        if is_mouse_button_pressed(MouseButton::Left) {
            self.demo.oracle_mut().toggle_obstacle(p, OBSTACLE_HALF_SIZE);
        }
        // Right click: move pursuer
        else if is_mouse_button_pressed(MouseButton::Right) && !self.demo.oracle().is_blocked(p) {
            self.demo.pursuer_mut().place(p);
        }
    }

    fn snapshot_json(&self) -> Option<String> {
        match self.demo.snapshot(usize::MAX).to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                None
            }
        }
    }

    fn copy_to_clipboard(&self) {
        let Some(json) = self.snapshot_json() else {
            return;
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(json) {
                    error!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Evader snapshot copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                error!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn save_snapshot(&self) {
        match self.demo.snapshot(usize::MAX).save_to_file(&self.snapshot_path) {
            Ok(()) => info!("Snapshot saved to {}", self.snapshot_path),
            Err(e) => error!("Failed to save snapshot: {}", e),
        }
    }

    fn save_layout(&self) {
        let layout = SceneLayout::from_scene(
            self.demo.oracle(),
            self.demo.pursuer().ground_position(),
            self.demo.evader_body().ground_position(),
        );
        match layout.save_to_file(LAYOUT_SAVE_PATH) {
            Ok(()) => info!("Layout saved to {}", LAYOUT_SAVE_PATH),
            Err(e) => error!("Failed to save layout: {}", e),
        }
    }

    fn update(&mut self) {
        if !self.paused {
            self.last_report = Some(step(&mut self.demo, get_frame_time()));
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(
            self.visual.background_r,
            self.visual.background_g,
            self.visual.background_b,
            255,
        ));

        let scene = self.demo.oracle();
        let ppu = self.view.pixels_per_unit;
        for rect in &scene.obstacles {
            let (x, y) = self.view.to_screen(rect.min);
            draw_rectangle(x, y, rect.width() * ppu, rect.height() * ppu, GRAY);
        }

        let snapshot = self.demo.snapshot(self.visual.max_drawn_points);
        let evader = snapshot.evader.ground();
        let pursuer = snapshot.pursuer.ground();
        let seen = self.last_report.map_or(false, |r| r.seen);

        if self.show_gizmos {
            let sight = if seen { RED } else { Color::from_rgba(90, 90, 90, 255) };
            self.view.line(pursuer, evader, 2.0, sight);

            for &p in &snapshot.seen {
                self.view.line(evader, p, 1.0, Color::from_rgba(200, 70, 70, 110));
            }
            for &p in &snapshot.hidden {
                self.view.line(evader, p, 1.0, Color::from_rgba(100, 200, 100, 140));
            }
        }
        if let Some(dest) = snapshot.destination {
            self.view.line(evader, dest, 2.0, YELLOW);
            self.view.disc(dest, 0.15, YELLOW);
        }

        self.view.disc(pursuer, scene.pursuer.radius, RED);
        let evader_color = match snapshot.state {
            EvaderState::Running => BLUE,
            EvaderState::Stopped => SKYBLUE,
        };
        self.view.disc(evader, scene.evader.radius, evader_color);

        let info = [
            snapshot.summary(),
            format!("Pursuer sees evader: {}{}", seen, if self.paused { " (paused)" } else { "" }),
            "Left click: toggle obstacle | Right click: move pursuer".to_string(),
            "G: gizmos | Space: pause | C: copy snapshot | S: save snapshot | L: save layout | Esc: quit".to_string(),
        ];
        for (i, line) in info.iter().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    let title = Config::from_file("config.toml")
        .map(|config| config.visual.window_title)
        .unwrap_or_else(|_| VisualConfig::default().window_title);
    Conf {
        window_title: title,
        window_width: 960,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = init_logging();
    let mut demo = match build_encounter(&config) {
        Ok(demo) => demo,
        Err(e) => {
            error!("Cannot start the encounter: {}", e);
            return;
        }
    };

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--headless") {
        let ticks = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(600);
        run_headless(&mut demo, ticks, config.visual.max_drawn_points);
        return;
    }

    let mut state = VisState::new(demo, &config);

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::G) {
            state.show_gizmos = !state.show_gizmos;
        }
        if is_key_pressed(KeyCode::Space) {
            state.paused = !state.paused;
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            state.save_snapshot();
        }
        if is_key_pressed(KeyCode::L) {
            state.save_layout();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }
}
