use skystrike_common::Rect;
use skystrike_kernel::World;
use skystrike_scene::{Canvas, Drawable};

/// Draw items of one frame, back to front.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<Drawable>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record everything `world` draws this frame.
    pub fn capture(world: &World) -> Self {
        let mut list = Self::new();
        world.draw(&mut list);
        list
    }

    pub fn items(&self) -> &[Drawable] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that can appear inside `view`. Quads are tested by their world
    /// bounding box; particle batches are kept when any point is inside.
    pub fn visible<'a>(&'a self, view: &'a Rect) -> impl Iterator<Item = &'a Drawable> + 'a {
        self.items.iter().filter(move |item| match item {
            Drawable::Quad {
                region, transform, ..
            } => Rect::new(0.0, 0.0, region.width, region.height)
                .transformed(transform)
                .intersects(view),
            Drawable::Particles { points, .. } => points.iter().any(|(p, _)| view.contains(*p)),
        })
    }
}

impl Canvas for DrawList {
    fn draw(&mut self, item: Drawable) {
        self.items.push(item);
    }
}
