use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use labyrinth_common::SplitMix64;
use labyrinth_maze::{CollisionField, MazeGenerator};

fn bench_generate(size: usize, iterations: usize) {
    let generator = MazeGenerator::new(size).expect("bench sizes are odd");

    let start = Instant::now();
    for seed in 0..iterations as u64 {
        let mut rng = SplitMix64::new(seed);
        let _ = black_box(generator.generate(black_box(&mut rng)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  generate ({size}x{size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_disc_queries(size: usize, iterations: usize) {
    let maze = MazeGenerator::new(size)
        .expect("bench sizes are odd")
        .generate(&mut SplitMix64::new(42));
    let field = CollisionField::new(&maze.grid);
    let extent = size as f32;

    let start = Instant::now();
    let mut free = 0usize;
    for i in 0..iterations {
        let t = i as f32 / iterations as f32;
        let p = Vec2::new(t * extent, (t * 7.0).fract() * extent);
        if field.is_free_for_disc(black_box(p), black_box(0.2)) {
            free += 1;
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  disc query ({size}x{size}, {iterations} iters, {free} free): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Maze Benchmarks ===\n");

    println!("Generation:");
    bench_generate(15, 10000);
    bench_generate(51, 1000);
    bench_generate(201, 50);

    println!("\nCollision queries:");
    bench_disc_queries(15, 100000);
    bench_disc_queries(201, 100000);

    println!("\n=== Done ===");
}
