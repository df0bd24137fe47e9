//! CellGuard Core - Service Entry Point
//!
//! Restores persisted state, then drives the monitor with one radio sample
//! per tick. The sample source is a collaborator seam: set
//! `CELLGUARD_REPLAY` to a JSONL file to replay a recorded stream, otherwise
//! the service idles on the null sampler until a platform source is wired in.

use cellguard_core::constants;
use cellguard_core::logic::baseline;
use cellguard_core::logic::monitor::{MonitorConfig, NetworkMonitor};
use cellguard_core::logic::notify::LogNotifier;
use cellguard_core::logic::sampler::{NullSampler, RadioSampler, ReplaySampler};
use cellguard_core::logic::storage::FileBlobStore;
use cellguard_core::logic::telemetry::{EventStore, StoreLimits};

use std::path::PathBuf;
use std::time::Duration;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} core v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let data_dir = constants::get_data_dir();
    let blob_store = match FileBlobStore::new(data_dir.clone()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot open data directory {:?}: {}", data_dir, e);
            std::process::exit(1);
        }
    };

    // Baseline loads before the blob store is handed to the event store's
    // persistence worker.
    let restored_baseline = baseline::load_baseline(&blob_store);
    if restored_baseline.is_some() {
        log::info!("Baseline restored from durable storage");
    } else {
        log::info!("No baseline set - deviation scoring disabled");
    }

    let store = EventStore::restore(Box::new(blob_store), StoreLimits::default());
    let mut monitor = NetworkMonitor::new(store, Box::new(LogNotifier), MonitorConfig::default());
    monitor.set_baseline(restored_baseline);
    monitor.start();

    let mut sampler: Box<dyn RadioSampler> = match std::env::var("CELLGUARD_REPLAY") {
        Ok(path) => match ReplaySampler::open(&PathBuf::from(&path)) {
            Ok(replay) => Box::new(replay),
            Err(e) => {
                log::error!("Cannot open replay file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        Err(_) => {
            log::info!("No sample source configured - idling on null sampler");
            Box::new(NullSampler)
        }
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    rt.block_on(async {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(constants::get_check_interval_secs()));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !monitor.is_monitoring() {
                        continue;
                    }
                    match sampler.sample() {
                        Some(sample) => {
                            let admitted = monitor.check(&sample);
                            let status = monitor.status();
                            log::info!(
                                "Check complete: level={} admitted={} events={}",
                                status.current_threat_level,
                                admitted,
                                monitor.store().event_count()
                            );
                            if let Some(err) = monitor.store().last_persist_error() {
                                log::warn!("Durable write degraded: {}", err);
                            }
                        }
                        None => {
                            log::debug!("No sample available this tick");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Shutdown signal received");
                    break;
                }
            }
        }
    });

    monitor.stop();
    // Drain scheduled writes before the process exits.
    monitor.store().flush();
    log::info!(
        "Stopped. {} events, {} anomalies in history",
        monitor.store().event_count(),
        monitor.store().anomaly_count()
    );
}
