//! Turning the scene into draw primitives.
//!
//! The graph never talks to a graphics backend. It walks itself in pre-order
//! and hands each visible item, already in world space, to a [`Canvas`].

use glam::{Affine2, Vec2};
use skystrike_common::{Rect, TextureId};

use crate::data::{ParticleKind, particle_data};
use crate::graph::SceneGraph;
use crate::node::{NodeId, NodeKind};

/// Explosion sheets are laid out in rows of this many frames.
const EXPLOSION_COLUMNS: u32 = 4;
const EXPLOSION_FRAME_SIZE: f32 = 256.0;

/// One visible item.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Textured quad. `region` is the source rectangle in the texture;
    /// `transform` maps quad-local coordinates (origin at the top-left of
    /// the region) to world space.
    Quad {
        texture: TextureId,
        region: Rect,
        transform: Affine2,
    },
    /// Batch of particle points for one system.
    Particles {
        kind: ParticleKind,
        color: [u8; 3],
        /// World position and opacity in `0..=1` per particle.
        points: Vec<(Vec2, f32)>,
    },
}

/// Receives draw items in back-to-front order.
pub trait Canvas {
    fn draw(&mut self, item: Drawable);
}

impl<F: FnMut(Drawable)> Canvas for F {
    fn draw(&mut self, item: Drawable) {
        self(item)
    }
}

impl SceneGraph {
    /// Emit every visible node, parents before children.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_node(self.root(), Affine2::IDENTITY, canvas);
    }

    fn draw_node(&self, id: NodeId, parent_world: Affine2, canvas: &mut dyn Canvas) {
        let Some(node) = self.get(id) else {
            return;
        };
        let world = parent_world * node.transform().to_affine();

        match node.kind() {
            NodeKind::Sprite(sprite) => canvas.draw(Drawable::Quad {
                texture: sprite.texture,
                region: sprite.region,
                transform: world,
            }),
            NodeKind::Aircraft(aircraft) if aircraft.is_destroyed() => {
                let frame = aircraft.explosion().current_frame();
                let region = Rect::new(
                    (frame % EXPLOSION_COLUMNS) as f32 * EXPLOSION_FRAME_SIZE,
                    (frame / EXPLOSION_COLUMNS) as f32 * EXPLOSION_FRAME_SIZE,
                    EXPLOSION_FRAME_SIZE,
                    EXPLOSION_FRAME_SIZE,
                );
                canvas.draw(centered_quad(TextureId::Explosion, region, world));
            }
            NodeKind::Aircraft(aircraft) => {
                canvas.draw(centered_quad(TextureId::Entities, aircraft.texture_rect(), world))
            }
            NodeKind::Projectile(projectile) => {
                canvas.draw(centered_quad(TextureId::Entities, projectile.texture_rect(), world))
            }
            NodeKind::Pickup(pickup) => {
                canvas.draw(centered_quad(TextureId::Entities, pickup.texture_rect(), world))
            }
            NodeKind::Particles(system) if !system.is_empty() => {
                let points = system
                    .particles()
                    .iter()
                    .map(|p| (p.position, system.alpha(p)))
                    .collect();
                canvas.draw(Drawable::Particles {
                    kind: system.kind(),
                    color: particle_data(system.kind()).color,
                    points,
                });
            }
            _ => {}
        }

        for child in node.children() {
            self.draw_node(*child, world, canvas);
        }
    }
}

/// Quad whose region is centred on the node's origin.
fn centered_quad(texture: TextureId, region: Rect, world: Affine2) -> Drawable {
    let origin = Affine2::from_translation(-region.size() / 2.0);
    Drawable::Quad {
        texture,
        region,
        transform: world * origin,
    }
}
