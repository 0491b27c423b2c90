use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use skystrike_common::{Category, Transform};
use skystrike_scene::{Aircraft, AircraftKind, NodeKind, Projectile, ProjectileKind, SceneGraph};

fn make_scene(entity_count: usize, spacing: f32) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let air = graph
        .spawn(root, NodeKind::Layer(Category::SCENE_AIR_LAYER), Transform::default())
        .expect("root is live");
    let side = (entity_count as f32).sqrt().ceil() as usize;
    for i in 0..entity_count {
        let position = Vec2::new((i % side) as f32 * spacing, (i / side) as f32 * spacing);
        let kind = if i % 3 == 0 {
            NodeKind::Aircraft(Aircraft::new(AircraftKind::Raptor))
        } else {
            NodeKind::Projectile(Projectile::new(ProjectileKind::EnemyBullet))
        };
        graph
            .spawn(air, kind, Transform::at(position))
            .expect("layer is live");
    }
    graph
}

fn bench_collision(entity_count: usize, iterations: usize) {
    let graph = make_scene(entity_count, 40.0);

    let start = Instant::now();
    let mut pairs = 0;
    for _ in 0..iterations {
        pairs = black_box(graph.check_scene_collision()).len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  collision ({entity_count} entities, {pairs} pairs, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_world_transform(entity_count: usize, iterations: usize) {
    let graph = make_scene(entity_count, 40.0);
    let nodes = graph.traverse();

    let start = Instant::now();
    for _ in 0..iterations {
        for id in &nodes {
            let _ = black_box(graph.world_transform(black_box(*id)));
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  world transforms ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Scene Collision Benchmarks ===\n");

    println!("Pairwise AABB sweep:");
    bench_collision(50, 1000);
    bench_collision(200, 100);
    bench_collision(500, 20);

    println!("\nWorld transform derivation:");
    bench_world_transform(200, 100);
    bench_world_transform(1000, 20);

    println!("\n=== Done ===");
}
