//! Renders the demo scene for a few frames.
//!
//! Uses a headless wgpu device when one is available and otherwise flushes into the
//! recording backend, so the scene runs on machines without a GPU.

mod scene;

use anyhow::Result;
use glam::{Mat4, Vec3};
use sketch_engine::device::{Gpu, GpuInit, OffscreenTarget};
use sketch_engine::draw::{DrawQueue, FlushStats, RecordingBackend};
use sketch_engine::logging::{init_logging, LoggingConfig};
use sketch_engine::paint::Color;
use sketch_engine::render::{GizmoRenderer, RenderCtx, RenderTarget};

use scene::DemoScene;

const FRAMES: u32 = 4;
const FRAME_DT: f32 = 1.0 / 30.0;
const TARGET_SIZE: (u32, u32) = (820, 560);
const CLEAR: Color = Color::new(0.08, 0.08, 0.1, 1.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut scene = DemoScene::new(0x5EED);
    let mut queue = DrawQueue::new();

    match pollster::block_on(Gpu::headless(GpuInit::default())) {
        Ok(gpu) => run_gpu(&gpu, &mut scene, &mut queue)?,
        Err(err) => {
            log::warn!("no GPU available ({err:#}); using the recording backend");
            run_recording(&mut scene, &mut queue);
        }
    }
    Ok(())
}

fn run_gpu(gpu: &Gpu, scene: &mut DemoScene, queue: &mut DrawQueue) -> Result<()> {
    let (width, height) = TARGET_SIZE;
    let target = OffscreenTarget::new(gpu.device(), width, height, OffscreenTarget::DEFAULT_FORMAT)?;
    let mut renderer = GizmoRenderer::new();
    let view_proj = camera(target.aspect());

    for frame in 0..FRAMES {
        scene.update(frame as f32 * FRAME_DT);
        scene.record(queue);
        let stats = queue.flush(&mut renderer);

        let mut encoder = gpu.create_encoder();
        target.clear(&mut encoder, CLEAR);
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), target.format(), view_proj);
        let draws = renderer.render(&ctx, &mut RenderTarget::new(&mut encoder, target.view()));
        gpu.submit(encoder);

        report(frame, &stats);
        log::debug!("frame {frame}: {draws} gpu draw calls");
    }
    Ok(())
}

fn run_recording(scene: &mut DemoScene, queue: &mut DrawQueue) {
    let mut backend = RecordingBackend::new();
    for frame in 0..FRAMES {
        scene.update(frame as f32 * FRAME_DT);
        scene.record(queue);
        let stats = queue.flush(&mut backend);
        report(frame, &stats);
        log::debug!(
            "frame {frame}: {} segments, {} triangles recorded",
            backend.segment_count(),
            backend.triangle_count()
        );
        backend.take();
    }
}

fn camera(aspect: f32) -> Mat4 {
    let proj = Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(8.0, 6.0, -10.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
    proj * view
}

fn report(frame: u32, stats: &FlushStats) {
    log::info!(
        "frame {frame}: {} jobs, {} line calls, {} triangle calls, {} failed, {} skipped",
        stats.jobs,
        stats.line_calls,
        stats.triangle_calls,
        stats.failed,
        stats.skipped
    );
}
