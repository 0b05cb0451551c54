use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
// macroquad's prelude exports its own `rand` module
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::OnceLock;
use torchlight::map::{self, ViewBounds};
use torchlight::movement::{self, AimState, FrameInput};
use torchlight::save_state::SceneState;
use torchlight::{render_torch, Config, Obstacle, PrimitiveKind, RenderPrimitive, Simulation};

/// Grid spacing of the tactical overlay
const GRID_SIZE: f32 = 0.5;
/// World height seen by the follow camera (a 45 degree view from 5 units up)
const FOLLOW_VIEW_HEIGHT: f32 = 4.14;
const OUTLINE_WIDTH: f32 = 0.01;
const LABEL_FONT_SIZE: f32 = 16.0;
const SITE_FONT_SIZE: u16 = 20;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Snapshot the keyboard once per frame
fn poll_input() -> FrameInput {
    FrameInput {
        up: is_key_down(KeyCode::W),
        down: is_key_down(KeyCode::S),
        left: is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::D),
        rotate_left: is_key_down(KeyCode::K),
        rotate_right: is_key_down(KeyCode::L),
    }
}

/// Visualization state
struct VisState {
    config: &'static Config,
    simulation: Simulation,
    obstacles: Vec<Obstacle>,
    aim: AimState,
    aspect: f32,
    bounds: ViewBounds,
    follow_camera: bool,
    rng: StdRng,
}

impl VisState {
    fn new(config: &'static Config) -> Self {
        let aspect = config.visual.aspect();
        let mut rng = StdRng::from_os_rng();

        let mut simulation = Simulation::new();
        simulation.initialize();

        let spawns = map::spawn_points(aspect);
        let spawn = &spawns[rng.random_range(0..spawns.len())];
        if let Some(p) = simulation.central_particle_mut() {
            p.position = vec3(spawn.position.x, spawn.position.y, 0.0);
            p.velocity = Vec3::ZERO;
        }
        info!("Particle spawned at {} position", spawn.name);

        VisState {
            config,
            simulation,
            obstacles: map::default_layout(aspect),
            aim: AimState::new(0.0),
            aspect,
            bounds: ViewBounds::from_aspect(aspect),
            follow_camera: config.visual.follow_camera,
            rng,
        }
    }

    fn particle_position(&self) -> Vec2 {
        self.simulation
            .central_particle()
            .map(|p| p.position.truncate())
            .unwrap_or(Vec2::ZERO)
    }

    fn update(&mut self, input: &FrameInput) {
        let player = &self.config.player;
        self.aim.update(input, player.rotation_speed);

        let Some(particle) = self.simulation.central_particle_mut() else {
            return;
        };

        let start = particle.position.truncate();
        let moved = movement::resolve_movement(
            &self.obstacles,
            start,
            input,
            player.move_speed,
            player.radius,
            &self.bounds,
        );
        particle.position = moved.position.extend(0.0);
        particle.velocity = moved.velocity.extend(0.0);

        let before_step = moved.position;
        if let Err(e) = self.simulation.step(player.time_step) {
            error!("Simulation step failed: {}", e);
            return;
        }

        if let Some(particle) = self.simulation.central_particle_mut() {
            let settled = movement::settle_after_step(
                &self.obstacles,
                before_step,
                particle.position.truncate(),
                player.radius,
            );
            particle.position = settled.extend(0.0);
            if !input.is_moving() {
                particle.velocity = Vec3::ZERO;
            }
        }
    }

    fn toggle_camera(&mut self) {
        self.follow_camera = !self.follow_camera;
        if self.follow_camera {
            info!("Camera mode: follow");
        } else {
            info!("Camera mode: top-down");
        }
    }

    fn camera(&self) -> Camera2D {
        let screen_aspect = screen_width() / screen_height().max(1.0);
        let (target, view_height) = if self.follow_camera {
            (self.particle_position(), FOLLOW_VIEW_HEIGHT)
        } else {
            (Vec2::ZERO, map::VIEW_HEIGHT)
        };
        // Positive zoom.y keeps world Y pointing up
        Camera2D {
            target,
            zoom: vec2(2.0 / (view_height * screen_aspect), 2.0 / view_height),
            ..Default::default()
        }
    }

    fn scene(&self) -> SceneState {
        SceneState::new(&self.obstacles, self.particle_position(), self.aim.angle)
    }

    fn save_scene(&self) {
        let path = Path::new(&self.config.scene.path);
        match self.scene().save_to_file(path) {
            Ok(()) => info!("Scene saved to {}", path.display()),
            Err(e) => error!("{}", e),
        }
    }

    fn load_scene(&mut self) {
        let path = Path::new(&self.config.scene.path);
        match SceneState::load_from_file(path) {
            Ok(scene) => {
                self.obstacles = scene.obstacles.clone();
                self.aim = AimState::new(scene.aim_angle);
                let position = scene.particle_position();
                if let Some(p) = self.simulation.central_particle_mut() {
                    p.position = position.extend(0.0);
                    p.velocity = Vec3::ZERO;
                }
                info!("Scene loaded from {} ({} obstacles)", path.display(), self.obstacles.len());
            }
            Err(e) => warn!("{}", e),
        }
    }

    fn copy_to_clipboard(&self) {
        let json = match self.scene().to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(json) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Scene copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw_grid(&self) {
        let half = self.bounds.half_extents();
        let color = Color::new(0.2, 0.2, 0.2, 0.3);
        let thickness = 0.01;

        let mut x = -half.x;
        while x <= half.x {
            draw_line(x, -half.y, x, half.y, thickness, color);
            x += GRID_SIZE;
        }
        let mut y = -half.y;
        while y <= half.y {
            draw_line(-half.x, y, half.x, y, thickness, color);
            y += GRID_SIZE;
        }
    }

    fn draw_obstacles(&self) {
        let gray = Color::new(0.5, 0.5, 0.5, 1.0);
        for o in &self.obstacles {
            draw_rectangle(o.left(), o.bottom(), o.width, o.height, gray);
        }
    }

    fn draw_site_markers(&self, camera: &Camera2D) {
        for site in map::site_markers(self.aspect) {
            let p = site.position;
            draw_circle(p.x, p.y, map::SITE_MARKER_RADIUS, Color::new(1.0, 0.3, 0.3, 1.0));
        }
        // Letters are drawn in screen space so they stay upright
        set_default_camera();
        for site in map::site_markers(self.aspect) {
            let p = camera.world_to_screen(site.position);
            let size = measure_text(site.name, None, SITE_FONT_SIZE, 1.0);
            draw_text(
                site.name,
                p.x - size.width / 2.0,
                p.y + size.height / 2.0,
                SITE_FONT_SIZE as f32,
                WHITE,
            );
        }
        set_camera(camera);
    }

    fn draw_labels(&self, camera: &Camera2D) {
        for label in map::location_labels(self.aspect) {
            let p = camera.world_to_screen(label.position);
            draw_text(label.text, p.x, p.y, LABEL_FONT_SIZE, WHITE);
        }
    }

    fn draw(&mut self) {
        let config = self.config;
        let visual = &config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let camera = self.camera();
        set_camera(&camera);

        // Map overlays only make sense in the top-down view
        let top_down = !self.follow_camera;
        if top_down && visual.show_grid {
            self.draw_grid();
        }
        self.draw_obstacles();
        if top_down {
            self.draw_site_markers(&camera);
        }

        let origin = self.particle_position();
        let primitives = render_torch(
            origin,
            self.aim.angle,
            &self.obstacles,
            &config.torch,
            &mut self.rng,
        );
        for primitive in &primitives {
            draw_primitive(primitive);
        }

        draw_circle(origin.x, origin.y, config.player.radius, Color::new(1.0, 0.2, 0.2, 1.0));

        set_default_camera();
        if top_down && visual.show_labels {
            self.draw_labels(&camera);
        }

        let info = format!(
            "Aim: {:.0} deg\nW/A/S/D: move   K/L: rotate torch\nC: toggle camera   F5/F9: save/load scene\nP: copy scene to clipboard   Esc: exit",
            self.aim.angle.to_degrees()
        );
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

/// Hand one torch primitive to macroquad
fn draw_primitive(primitive: &RenderPrimitive) {
    // Mesh indices are 16-bit
    if primitive.len() > u16::MAX as usize {
        warn!("skipping primitive with {} vertices", primitive.len());
        return;
    }
    match primitive.kind {
        PrimitiveKind::LineStrip => {
            for pair in primitive.vertices.windows(2) {
                let (a, b) = (pair[0].position, pair[1].position);
                draw_line(a.x, a.y, b.x, b.y, OUTLINE_WIDTH, pair[1].color);
            }
        }
        PrimitiveKind::TriangleFan | PrimitiveKind::QuadStrip => {
            let vertices = primitive
                .vertices
                .iter()
                .map(|v| Vertex::new(v.position.x, v.position.y, 0.0, 0.0, 0.0, v.color))
                .collect();
            let indices = primitive
                .triangle_indices()
                .into_iter()
                .flat_map(|tri| tri.map(|i| i as u16))
                .collect();
            draw_mesh(&Mesh {
                vertices,
                indices,
                texture: None,
            });
        }
    }
}

fn window_conf() -> Conf {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let visual = &config().visual;
    Conf {
        window_title: visual.window_title.clone(),
        window_width: visual.window_width,
        window_height: visual.window_height,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut state = VisState::new(config());

    info!("Controls: W/A/S/D move, K/L rotate torch, C toggle camera, F5/F9 save/load, P copy scene, Esc exit");

    loop {
        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if is_key_pressed(KeyCode::C) {
            state.toggle_camera();
        }
        if is_key_pressed(KeyCode::F5) {
            state.save_scene();
        }
        if is_key_pressed(KeyCode::F9) {
            state.load_scene();
        }
        if is_key_pressed(KeyCode::P) {
            state.copy_to_clipboard();
        }

        let input = poll_input();
        state.update(&input);
        state.draw();

        next_frame().await
    }

    state.simulation.log_state();
}
