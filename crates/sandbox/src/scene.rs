//! Demo scene: cubes and lights stored in a hecs world.
//!
//! Lights carry a [`Light`] component; plain geometry carries an [`Object`].
//! Animated lights additionally get an [`Orbit`] or [`Pendulum`], and the
//! light that follows the camera is tagged with [`CameraSpotlight`].

use glam::Vec3;
use hecs::World;
use renderer::{Camera, Light, LightKind, ModelId, Object, ShaderSink};

use crate::context::{FrameContext, Toggles};

/// Circles around the world Y axis while `move_light` is on.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub radius: f32,
    pub height: f32,
    /// Radians per second of physics time.
    pub speed: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            radius: 2.5,
            height: 1.25,
            speed: 1.5,
        }
    }
}

impl Orbit {
    /// Position on the circle at physics time `t`.
    pub fn position(&self, t: f32) -> Vec3 {
        let angle = self.speed * t;
        Vec3::new(angle.cos() * self.radius, self.height, angle.sin() * self.radius)
    }
}

/// Small-angle pendulum hanging from `attach`. The light sits at the end of
/// the string and shines along it.
#[derive(Debug, Clone, Copy)]
pub struct Pendulum {
    pub attach: Vec3,
    /// Peak swing in degrees.
    pub amplitude_deg: f32,
    pub length: f32,
    pub gravity: f32,
    /// Time scale applied to physics time.
    pub speed: f32,
}

impl Pendulum {
    pub fn new(attach: Vec3, amplitude_deg: f32, length: f32) -> Self {
        Self {
            attach,
            amplitude_deg,
            length,
            gravity: 9.81,
            speed: 1.5,
        }
    }

    /// Swing angle in degrees at time `t`.
    pub fn angle_deg(&self, t: f32) -> f32 {
        let omega = (self.gravity / self.length.max(f32::EPSILON)).sqrt();
        self.amplitude_deg * (omega * self.speed * t).cos()
    }

    /// Hang `object` from the attach point at time `t`.
    pub fn apply(&self, object: &mut Object, t: f32) {
        // Straight down, then swing in the X/Y plane.
        object.rotator.reset().rotate_x(90.0).rotate_y(self.angle_deg(t));
        let pos = self.attach + object.rotator.front() * self.length;
        object.translator.move_to(pos);
    }
}

/// Spotlight carried just behind the camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraSpotlight;

/// How far behind the eye the camera spotlight sits.
const CAMERA_SPOTLIGHT_OFFSET: f32 = 2.0;
/// Scale of the stencil outline pass.
const BORDER_SCALE: f32 = 1.1;

pub struct Scene {
    pub world: World,
    cube: ModelId,
}

impl Scene {
    /// Empty world; `cube` is the model used for every marker.
    pub fn new(cube: ModelId) -> Self {
        Self {
            world: World::new(),
            cube,
        }
    }

    /// Two cubes, four point lights (the first one orbiting), a directional
    /// light, the camera spotlight and four pendulum spotlights.
    pub fn demo(cube: ModelId) -> Self {
        let mut scene = Self::new(cube);

        for x in [-1.0, 1.0] {
            let mut object = Object::new(cube);
            object.translator.move_to(Vec3::new(x, 0.0, 0.0));
            scene.world.spawn((object,));
        }

        let point_positions = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.7, 0.2, 2.0),
            Vec3::new(2.3, -3.3, -4.0),
            Vec3::new(-4.0, 2.0, -12.0),
        ];
        for (i, pos) in point_positions.into_iter().enumerate() {
            let light = scene.marker(LightKind::Point, pos);
            if i == 0 {
                scene.world.spawn((light, Orbit::default()));
            } else {
                scene.world.spawn((light,));
            }
        }

        let mut sun = scene.marker(LightKind::Directional, Vec3::ZERO);
        sun.object.rotator.rotate_y(90.0);
        let behind = -sun.direction();
        sun.object.translator.move_to(behind);
        scene.world.spawn((sun,));

        let spotlight = scene.marker(LightKind::Spot, Vec3::ZERO);
        scene.world.spawn((spotlight, CameraSpotlight));

        let attach = Vec3::new(0.0, 5.0, 0.0);
        for (amplitude, length) in [(25.0, 3.0), (-25.0, 2.0), (45.0, 0.5), (65.0, 1.0)] {
            let pendulum = Pendulum::new(attach, amplitude, length);
            let mut light = scene.marker(LightKind::Spot, attach);
            pendulum.apply(&mut light.object, 0.0);
            scene.world.spawn((light, pendulum));
        }

        log::info!("Demo scene spawned {} entities", scene.world.len());
        scene
    }

    fn marker(&self, kind: LightKind, pos: Vec3) -> Light {
        let mut light = Light::new(self.cube, kind);
        light.object.translator.move_to(pos);
        light.object.scaler.scale(0.1);
        light
    }

    /// One physics step.
    pub fn update(&mut self, ctx: &FrameContext, camera: &Camera) {
        let t = ctx.physics_time_secs();

        if ctx.toggles.move_light {
            for (_, (light, orbit)) in self.world.query_mut::<(&mut Light, &Orbit)>() {
                light.object.translator.move_to(orbit.position(t));
            }
        }

        for (_, (light, pendulum)) in self.world.query_mut::<(&mut Light, &Pendulum)>() {
            pendulum.apply(&mut light.object, t);
        }

        if ctx.toggles.light_spotlight {
            let behind = camera.position() - camera.front() * CAMERA_SPOTLIGHT_OFFSET;
            for (_, (light, _)) in self.world.query_mut::<(&mut Light, &CameraSpotlight)>() {
                light.object.translator.move_to(behind);
                light.object.rotator.align_to(&camera.rotator);
            }
        }
    }

    /// Upload the camera and active lights, then draw geometry, the optional
    /// outline pass and the light markers.
    pub fn render(&self, sink: &mut impl ShaderSink, camera: &Camera, ctx: &FrameContext) {
        let toggles = &ctx.toggles;
        camera.upload(ctx.aspect_ratio(), sink);

        let mut counts = [0usize; 3];
        let mut query = self
            .world
            .query::<(&Light, Option<&CameraSpotlight>, Option<&Pendulum>)>();
        for (_, (light, camera_spot, pendulum)) in query.iter() {
            if !is_active(light.kind, camera_spot.is_some(), pendulum.is_some(), toggles) {
                continue;
            }
            let slot = &mut counts[kind_slot(light.kind)];
            light.upload(sink, *slot);
            *slot += 1;
        }
        for kind in [LightKind::Point, LightKind::Spot, LightKind::Directional] {
            sink.set_int(kind.count_uniform(), counts[kind_slot(kind)] as i32);
        }

        sink.set_int("debugNormals", toggles.debug as i32);
        for (_, object) in self.world.query::<&Object>().iter() {
            object.draw(sink);
        }

        if toggles.draw_border {
            sink.set_int("outline", 1);
            for (_, object) in self.world.query::<&Object>().iter() {
                let mut border = object.clone();
                border.scaler.scalar *= BORDER_SCALE;
                border.draw(sink);
            }
            sink.set_int("outline", 0);
        }

        for (_, light) in self.world.query::<&Light>().iter() {
            light.object.draw(sink);
        }
    }
}

fn kind_slot(kind: LightKind) -> usize {
    match kind {
        LightKind::Point => 0,
        LightKind::Spot => 1,
        LightKind::Directional => 2,
    }
}

fn is_active(kind: LightKind, camera_spot: bool, pendulum: bool, toggles: &Toggles) -> bool {
    match kind {
        LightKind::Point => true,
        LightKind::Directional => toggles.light_directional,
        LightKind::Spot if camera_spot => toggles.light_spotlight,
        LightKind::Spot if pendulum => toggles.pendulum_spot_lights,
        LightKind::Spot => true,
    }
}
