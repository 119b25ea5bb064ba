//! Scanline scheduler.
//!
//! A [`RenderSession`] owns everything one render needs: the framebuffer,
//! a queue of scanlines and a fixed pool of workers. The framebuffer is split
//! into one mutable slice per row before any worker starts, and each slice
//! travels through the queue exactly once, so workers never share pixels.
//! The queue lock is held only to pop the next row.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::renderer::render_scanline;
use crate::{Camera, Color, Framebuffer, RenderError, Scene};
use octray_core::RenderSettings;

/// One row of the image waiting to be rendered.
struct Scanline<'a> {
    row: u32,
    pixels: &'a mut [Color],
}

/// Summary of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    /// Scanlines completed by each worker, indexed by worker
    pub rows_per_worker: Vec<usize>,
    pub elapsed: Duration,
}

impl RenderReport {
    pub fn rows_total(&self) -> usize {
        self.rows_per_worker.iter().sum()
    }
}

/// Per-scanline random stream, independent of which worker renders the row.
pub fn scanline_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A single render: camera, scene and a worker pool of fixed size.
pub struct RenderSession<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    pool: ThreadPool,
    seed: u64,
}

impl<'a> RenderSession<'a> {
    pub fn new(
        camera: &'a Camera,
        scene: &'a Scene,
        workers: usize,
        seed: u64,
    ) -> Result<Self, RenderError> {
        if workers == 0 {
            return Err(RenderError::NoWorkers);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("octray-worker-{i}"))
            .build()?;

        Ok(Self {
            camera,
            scene,
            pool,
            seed,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Render every scanline and return the accumulated framebuffer.
    ///
    /// Blocks until all workers have exited.
    pub fn run(self) -> (Framebuffer, RenderReport) {
        let camera = self.camera;
        let scene = self.scene;

        log::info!(
            "Rendering {}x{} at {} spp, depth {}, {} workers",
            camera.image_width(),
            camera.image_height(),
            camera.samples_per_pixel(),
            camera.max_depth(),
            self.workers()
        );

        let result = self.run_with(|row, pixels, rng| {
            render_scanline(camera, scene, row, pixels, rng);
        });

        log::info!(
            "Render complete: {} scanlines in {:.2?}",
            result.1.rows_total(),
            result.1.elapsed
        );
        result
    }

    /// Drive `work` over every scanline on the pool.
    fn run_with<F>(&self, work: F) -> (Framebuffer, RenderReport)
    where
        F: Fn(u32, &mut [Color], &mut StdRng) + Sync,
    {
        let start = Instant::now();
        let mut framebuffer = Framebuffer::new(
            self.camera.image_width(),
            self.camera.image_height(),
            self.camera.samples_per_pixel(),
        );

        let rows_per_worker = {
            let queue: Mutex<VecDeque<Scanline>> = Mutex::new(
                framebuffer
                    .rows_mut()
                    .map(|(row, pixels)| Scanline { row, pixels })
                    .collect(),
            );

            // Every pool thread runs the same loop; broadcast returns once
            // all of them have drained the queue.
            self.pool.broadcast(|_| {
                let mut completed = 0;

                loop {
                    let (next, remaining) = {
                        let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
                        (queue.pop_front(), queue.len())
                    };

                    let Some(scanline) = next else {
                        break;
                    };
                    log::trace!("Scanlines remaining: {}", remaining);

                    let mut rng = scanline_rng(self.seed, scanline.row);
                    work(scanline.row, scanline.pixels, &mut rng);
                    completed += 1;
                }

                completed
            })
        };

        let report = RenderReport {
            rows_per_worker,
            elapsed: start.elapsed(),
        };
        (framebuffer, report)
    }
}

/// Build a camera from `settings` and render `scene` with a fresh session.
pub fn render(
    scene: &Scene,
    settings: &RenderSettings,
) -> Result<(Framebuffer, RenderReport), RenderError> {
    settings.validate()?;

    let camera = Camera::new(settings);
    let session = RenderSession::new(&camera, scene, settings.worker_count(), settings.seed)?;
    Ok(session.run())
}
