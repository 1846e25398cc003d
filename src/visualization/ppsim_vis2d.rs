use std::collections::{HashMap, HashSet};

use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::simulation::constants::DEFAULT_RADIUS;
use crate::simulation::states::{NVec2, Particle, ParticleHandle};
use crate::simulation::tick::{Input, Renderer, Simulation};

const NEW_PARTICLE_MASS: f64 = 10.0;
const PICK_RADIUS: f64 = 15.0;

#[derive(Resource)]
struct SimResource(Simulation);

#[derive(Component)]
struct ParticleMarker(ParticleHandle);

struct DrawnParticle {
    x: f32,
    y: f32,
    radius: f32,
    color: Color,
}

/// Draw calls of the last frame, keyed by handle
#[derive(Resource, Default)]
struct Frame {
    drawn: HashMap<ParticleHandle, DrawnParticle>,
}

impl Renderer for Frame {
    fn begin_frame(&mut self) {
        self.drawn.clear();
    }

    fn draw_particle(&mut self, handle: ParticleHandle, particle: &Particle) {
        let c = particle.color;
        self.drawn.insert(
            handle,
            DrawnParticle {
                x: particle.x.x as f32,
                y: particle.x.y as f32,
                radius: particle.radius as f32,
                color: Color::srgba(c.r, c.g, c.b, c.a),
            },
        );
    }
}

/// Mouse / keyboard state of one bevy frame.
/// Space pauses, left click adds a particle, right click removes the nearest one
struct ViewerInput<'a> {
    mouse: &'a ButtonInput<MouseButton>,
    keys: &'a ButtonInput<KeyCode>,
    cursor: Option<Vec2>, // window coordinates, top-left origin, same as the simulation
}

impl Input for ViewerInput<'_> {
    fn handle_input(&mut self, sim: &mut Simulation) -> bool {
        if self.keys.just_pressed(KeyCode::Space) {
            sim.toggle_pause();
        }

        let Some(cursor) = self.cursor else {
            return true;
        };
        let (x, y) = (cursor.x as f64, cursor.y as f64);

        if self.mouse.just_pressed(MouseButton::Left) {
            let p = Particle::new(NVec2::new(x, y), NVec2::zeros(), NEW_PARTICLE_MASS, DEFAULT_RADIUS)
                .with_color(crate::simulation::states::Color::SKY);
            if let Err(e) = sim.add_particle(p) {
                log::warn!("could not add particle: {}", e);
            }
        }
        if self.mouse.just_pressed(MouseButton::Right) {
            sim.remove_particle_near(x, y, PICK_RADIUS);
        }
        true
    }
}

pub fn run_2d(sim: Simulation) {
    log::info!("run_2d: starting Bevy 2D viewer with {} particles", sim.system().len());
    let width = sim.parameters().world_width as f32;
    let height = sim.parameters().world_height as f32;

    App::new()
        .insert_resource(SimResource(sim))
        .init_resource::<Frame>()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Particle Physics Simulator".into(),
                        resolution: WindowResolution::new(width, height),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // env_logger owns the `log` facade
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_camera_system)
        .add_systems(
            Update,
            (input_system, physics_step_system, render_system, sync_entities_system).chain(),
        )
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());
}

fn input_system(
    mut sim: ResMut<SimResource>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let cursor = windows.get_single().ok().and_then(|w| w.cursor_position());
    let mut input = ViewerInput {
        mouse: &*mouse,
        keys: &*keys,
        cursor,
    };
    input.handle_input(&mut sim.0);
}

fn physics_step_system(mut sim: ResMut<SimResource>) {
    sim.0.step();
}

fn render_system(sim: Res<SimResource>, mut frame: ResMut<Frame>) {
    sim.0.render(&mut *frame);
}

/// Simulation space is y-down with the origin top-left, bevy is y-up centered
fn to_world(x: f32, y: f32, width: f32, height: f32) -> Vec3 {
    Vec3::new(x - width / 2.0, height / 2.0 - y, 0.0)
}

fn sync_entities_system(
    mut commands: Commands,
    sim: Res<SimResource>,
    frame: Res<Frame>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &ParticleMarker, &mut Transform)>,
) {
    let width = sim.0.parameters().world_width as f32;
    let height = sim.0.parameters().world_height as f32;

    let mut seen = HashSet::new();
    for (entity, ParticleMarker(handle), mut transform) in &mut query {
        match frame.drawn.get(handle) {
            Some(d) => {
                transform.translation = to_world(d.x, d.y, width, height);
                seen.insert(*handle);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for (handle, d) in &frame.drawn {
        if seen.contains(handle) {
            continue;
        }
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(d.radius.max(1.0)))),
                material: materials.add(ColorMaterial::from(d.color)),
                transform: Transform::from_translation(to_world(d.x, d.y, width, height)),
                ..default()
            },
            ParticleMarker(*handle),
        ));
    }
}
