use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arrow_kernel::core::{Context, NullAudio, Scene, SimpleRng};
use arrow_kernel::demo::{ShooterKind, ShooterScene};
use arrow_kernel::term::{encode_diff_into, Sprite, Surface};
use arrow_kernel::types::{Color, SCREEN_HEIGHT, SCREEN_WIDTH};

fn full_registry() -> Context<()> {
    let mut ctx = Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, Box::new(NullAudio));
    for i in 0..ctx.entities.capacity() as i32 {
        let sprite = Sprite::from_art(&["\\O/", " | ", "/ \\"], Color::RED).unwrap();
        ctx.entities
            .spawn((i * 5) % 77, (i * 3) % 22, Some(sprite))
            .unwrap();
    }
    ctx
}

fn bench_collisions(c: &mut Criterion) {
    let mut ctx = full_registry();

    c.bench_function("collisions_50_entities", |b| {
        b.iter(|| black_box(ctx.check_collisions()))
    });
}

fn bench_render_entities(c: &mut Criterion) {
    let mut ctx = full_registry();

    c.bench_function("render_50_entities", |b| {
        b.iter(|| {
            ctx.surface.clear();
            ctx.render_entities();
        })
    });
}

fn bench_diff_encode(c: &mut Criterion) {
    let ctx = {
        let mut ctx = full_registry();
        ctx.render_entities();
        ctx
    };
    let prev = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut buf = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_diff_80x25", |b| {
        b.iter(|| {
            buf.clear();
            encode_diff_into(&prev, black_box(&ctx.surface), &mut buf).unwrap();
        })
    });
}

fn bench_shooter_frame(c: &mut Criterion) {
    let mut ctx: Context<ShooterKind> =
        Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, Box::new(NullAudio));
    let mut scene = ShooterScene::with_rng(SimpleRng::new(12345));
    scene.enter(&mut ctx);

    c.bench_function("shooter_update_render", |b| {
        b.iter(|| {
            // Keep the registry from filling up with dead enemies.
            ctx.entities.prune_inactive();
            let _ = scene.update(&mut ctx, Duration::from_millis(16));
            ctx.surface.clear();
            scene.render(&mut ctx);
        })
    });
}

criterion_group!(
    benches,
    bench_collisions,
    bench_render_entities,
    bench_diff_encode,
    bench_shooter_frame
);
criterion_main!(benches);
