//! Simulated coprocessor feeding a fixed-period steering loop.
//!
//! A producer thread sweeps a target across the field of view and publishes
//! Limelight-style fields one key at a time. The main thread runs a 20 ms
//! control loop that samples the pipeline as PID feedback and prints a
//! report every few ticks.
//!
//! Usage: `closed_loop [config.json]`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::LevelFilter;
use vision_targeting::acquire::MemoryTelemetryStore;
use vision_targeting::core::init_with_level;
use vision_targeting::{
    ProcessVariableSource, TargetInfoProvider, TargetingConfig, TargetingPipeline,
};

const TICK: Duration = Duration::from_millis(20);
const KP: f64 = 0.004;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let cfg = match std::env::args().nth(1) {
        Some(path) => TargetingConfig::load_json(path)?,
        None => TargetingConfig::default(),
    };

    let store = Arc::new(MemoryTelemetryStore::new());
    let running = Arc::new(AtomicBool::new(true));
    let producer = spawn_producer(Arc::clone(&store), Arc::clone(&running));

    let mut pipeline = TargetingPipeline::new(Arc::clone(&store), &cfg)?;

    // settle once before the first decision, then poll fast
    if pipeline.acquire_targets(true) {
        log::info!(
            "initial target at {:.1} deg, {:.1} in",
            pipeline.bearing_deg(),
            pipeline.range_by_vertical_fov()
        );
    } else {
        log::info!("no initial target");
    }

    for tick in 0..150u32 {
        let started = Instant::now();
        let error = pipeline.sample();
        let turn = (KP * error).clamp(-1.0, 1.0);

        if tick % 25 == 0 {
            println!("turn={turn:+.3} {}", pipeline.report().to_json()?);
        }
        if let Some(rest) = TICK.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    running.store(false, Ordering::Relaxed);
    producer.join().map_err(|_| "producer thread panicked")?;
    Ok(())
}

fn spawn_producer(
    store: Arc<MemoryTelemetryStore>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let t0 = Instant::now();
        while running.load(Ordering::Relaxed) {
            let t = t0.elapsed().as_secs_f64();
            // target drifts +-20 deg and approaches the camera
            let tx = 20.0 * (0.8 * t).sin();
            let tvert = 20.0 + 8.0 * t;
            let visible = tx.abs() < 18.0;

            store.set_f64("limelight/ta", tvert * tvert * 2.2 / 768.0);
            store.set_f64("limelight/thor", tvert * 12.0 / 5.5);
            store.set_f64("limelight/tvert", tvert);
            store.set_f64("limelight/tx", tx);
            store.set_f64("limelight/ty", 2.0);
            store.set_f64("limelight/tv", if visible { 1.0 } else { 0.0 });

            thread::sleep(Duration::from_millis(7));
        }
    })
}
