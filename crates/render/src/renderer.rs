use glam::Vec2;
use skystrike_common::Rect;
use skystrike_kernel::World;
use skystrike_scene::Drawable;

use crate::draw_list::DrawList;

/// The part of the world a renderer shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// View center in world space.
    pub center: Vec2,
    /// Visible extent in world units.
    pub size: Vec2,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            center: Vec2::new(640.0, 360.0),
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl RenderView {
    /// The world's own camera.
    pub fn of(world: &World) -> Self {
        Self {
            center: world.view_center(),
            size: world.config().view_size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.center - self.size / 2.0, self.size)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view, then produces output. It never
/// mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Human-readable frame dump: mission state, then every visible draw item.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (tick={}, status={:?}) ===\n",
            world.tick(),
            world.mission_status()
        ));
        match world.player_aircraft() {
            Some(player) => out.push_str(&format!(
                "Player: hp={}/{} missiles={} fire_rate={} spread={}\n",
                player.hitpoints(),
                player.hull().max_hitpoints(),
                player.missile_ammo(),
                player.fire_rate_level(),
                player.spread_level()
            )),
            None => out.push_str("Player: gone\n"),
        }
        out.push_str(&format!(
            "View: center=({:.1}, {:.1}) size=({:.0}x{:.0})\n",
            view.center.x, view.center.y, view.size.x, view.size.y
        ));

        let list = DrawList::capture(world);
        let bounds = view.bounds();
        let visible: Vec<&Drawable> = list.visible(&bounds).collect();
        out.push_str(&format!("Visible: {}/{}\n", visible.len(), list.len()));

        for item in visible {
            match item {
                Drawable::Quad {
                    texture,
                    region,
                    transform,
                } => {
                    let p = transform.translation;
                    out.push_str(&format!(
                        "  quad {:?} [{:.0},{:.0} {:.0}x{:.0}] at ({:.1}, {:.1})\n",
                        texture, region.left, region.top, region.width, region.height, p.x, p.y
                    ));
                }
                Drawable::Particles { kind, points, .. } => {
                    out.push_str(&format!("  particles {:?} x{}\n", kind, points.len()));
                }
            }
        }

        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}
