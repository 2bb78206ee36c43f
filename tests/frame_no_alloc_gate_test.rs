use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use arrow_kernel::core::{Behavior, Context, Entity, HookContext, NullAudio};
use arrow_kernel::term::{encode_diff_into, Sprite, Surface};
use arrow_kernel::types::{Color, Key, SCREEN_HEIGHT, SCREEN_WIDTH};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Bounces off the screen edges, flips color on contact and toggles on input.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Bouncer;

impl Behavior for Bouncer {
    fn on_update(entity: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        let (w, h) = entity
            .sprite
            .as_ref()
            .map(|s| (s.width() as i32, s.height() as i32))
            .unwrap_or((1, 1));
        let p = entity.position;
        if p.x <= 0 || p.x + w >= cx.width as i32 {
            entity.velocity.x = -entity.velocity.x;
        }
        if p.y <= 0 || p.y + h >= cx.height as i32 {
            entity.velocity.y = -entity.velocity.y;
        }
        if cx.input.just_pressed(Key::Space) {
            entity.health -= 1;
        }
    }

    fn on_collide(this: &mut Entity<Self>, _other: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        if let Some(sprite) = this.sprite.as_mut() {
            sprite.color = if sprite.color == Color::RED { Color::BLUE } else { Color::RED };
        }
        cx.play_tone(440, 5);
    }
}

#[test]
fn frame_hot_path_is_allocation_free_after_warmup() {
    let mut ctx: Context<Bouncer> = Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, Box::new(NullAudio));
    for i in 0..30 {
        let sprite = Sprite::from_art(&["/-\\", "\\-/"], Color::GREEN).unwrap();
        ctx.entities
            .spawn(2 + (i * 7) % 70, 2 + (i * 3) % 20, Some(sprite))
            .unwrap()
            .set_velocity(1 + i % 2, 1 - (i % 3));
    }

    let mut prev = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut buf: Vec<u8> = Vec::with_capacity(256 * 1024);

    let frame = |ctx: &mut Context<Bouncer>, prev: &mut Surface, buf: &mut Vec<u8>| {
        ctx.step_entities();
        ctx.surface.clear();
        ctx.surface.draw_border(Color::GREY);
        ctx.render_entities();
        ctx.surface.draw_text("Score: 0", 2, 1, Color::WHITE);
        buf.clear();
        encode_diff_into(prev, &ctx.surface, buf).unwrap();
        prev.copy_from(&ctx.surface);
        ctx.frame_count += 1;
    };

    // Warm-up.
    frame(&mut ctx, &mut prev, &mut buf);

    let allocs = with_alloc_counting(|| {
        for _ in 0..500 {
            frame(&mut ctx, &mut prev, &mut buf);
        }
    });

    assert!(allocs == 0);
}
