//! The demo scene: a handful of every shape around a moving "player".

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sketch_engine::draw::DrawQueue;
use sketch_engine::paint::Color;

const CLOUD_POINTS: usize = 100;
const CLOUD_EXTENT: f32 = 10.0;

/// Stand-in for a scene object with a transform.
#[derive(Debug, Copy, Clone)]
pub struct Player {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Player {
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

pub struct DemoScene {
    player: Player,
    arc_angle: f32,
    cloud: Vec<Vec3>,
}

impl DemoScene {
    /// Builds the scene; `seed` fixes the point cloud.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cloud = (0..CLOUD_POINTS)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-CLOUD_EXTENT..CLOUD_EXTENT),
                    rng.random_range(0.0..CLOUD_EXTENT * 0.5),
                    rng.random_range(-CLOUD_EXTENT..CLOUD_EXTENT),
                )
            })
            .collect();

        Self {
            player: Player {
                position: Vec3::new(3.0, 0.0, 0.0),
                rotation: Quat::IDENTITY,
            },
            arc_angle: 40.0,
            cloud,
        }
    }

    /// Orbits the player around the origin and sweeps the arc angle over `0..=360`.
    pub fn update(&mut self, time: f32) {
        let orbit = time * 0.5;
        self.player.position = Vec3::new(orbit.cos() * 3.0, 0.0, orbit.sin() * 3.0);
        self.player.rotation = Quat::from_rotation_y(-orbit);
        self.arc_angle = ((time * 0.25).fract() * 360.0).clamp(0.0, 360.0);
    }

    /// Records one frame of the scene.
    pub fn record(&self, q: &mut DrawQueue) {
        let player = self.player;

        q.point(Vec3::new(0.0, 0.5, 0.0), Some(0.4), Some(Color::WHITE), None);
        q.point(Vec3::new(0.5, 0.5, 0.0), None, None, None);
        q.point(Vec3::new(0.0, 0.5, 0.5), None, None, None);
        q.point(Vec3::new(-0.5, 0.5, 0.0), None, None, None);
        q.point(Vec3::new(0.0, 0.5, -0.5), None, None, None);

        q.diamond(Vec3::new(0.0, 0.5, 0.0), None, None, None);
        q.sphere(Vec3::new(0.0, 1.25, 0.0), 0.25, None, None);
        q.cube_uniform(Vec3::ZERO, 1.0, None, None);
        q.cube_uniform(Vec3::new(0.0, 1.0, 0.0), 2.5, Some(Color::RED), None);

        q.dotted_line(player.position, Vec3::ZERO, None);

        q.points(self.cloud.iter().copied(), Some(0.1), Some(Color::CYAN), None);

        q.solid_arc(player.position, player.forward(), 4.0, self.arc_angle, None, None);

        q.axes(player.position, player.rotation, 1.0);

        q.solid_circle(player.position, 1.0, None, Some(player.rotation));
        q.circle(player.position, 1.5, None, Some(player.rotation));
        q.arrow(player.position + Vec3::Y, player.rotation, None, None);
    }
}
