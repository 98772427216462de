use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{SendError, unbounded};

use crate::cancel::CancelToken;
use crate::library::{Sample, Skipped, TagReader, classify_file};

/// One file to classify and the label it will carry.
#[derive(Debug, Clone)]
pub(super) struct Job {
    pub path: PathBuf,
    pub library: String,
}

#[derive(Debug, Default)]
pub(super) struct Classified {
    pub samples: Vec<Sample>,
    pub skipped: Vec<Skipped>,
    pub cancelled: bool,
}

/// Classify `jobs` on at most `workers` threads.
///
/// Each file is independent, so results come back in completion order.
pub(super) fn classify_all(
    jobs: Vec<Job>,
    workers: usize,
    tags: &dyn TagReader,
    cancel: &CancelToken,
) -> Classified {
    let workers = workers.clamp(1, jobs.len().max(1));

    let mut classified = Classified::default();

    let (job_tx, job_rx) = unbounded::<Job>();
    for job in jobs {
        // Only fails once every receiver is gone; the job is handed back.
        if let Err(SendError(job)) = job_tx.send(job) {
            log::warn!("job queue closed before {} was queued", job.path.display());
            classified
                .skipped
                .push(Skipped::new(Some(job.path), "job queue closed".to_string()));
        }
    }
    drop(job_tx);

    let (out_tx, out_rx) = unbounded::<Result<Sample, Skipped>>();

    thread::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let out_tx = out_tx.clone();
            s.spawn(move || {
                for job in job_rx.iter() {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let outcome = classify_file(&job.path, &job.library, tags).map_err(|e| {
                        log::warn!("skipping {}: {e}", job.path.display());
                        Skipped::new(Some(job.path.clone()), e.to_string())
                    });
                    if out_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(out_tx);

    classified.cancelled = cancel.is_cancelled();
    for outcome in out_rx.iter() {
        match outcome {
            Ok(sample) => classified.samples.push(sample),
            Err(skipped) => classified.skipped.push(skipped),
        }
    }
    classified
}
