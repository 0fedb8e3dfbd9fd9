use std::{collections::BTreeMap, io::BufRead, sync::Arc};

use crossbeam_channel::Sender;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::{
    error::Result,
    pair::{PairScorer, ScoredPair},
};

/// Shared input. Chunks are numbered while the lock is held so the collector
/// can put results back in input order.
struct Reader<R> {
    file: R,
    next_chunk: usize,
    next_line: usize,
}

struct Chunk {
    index: usize,
    pairs: Vec<ScoredPair>,
}

pub fn run<R>(
    pair_scorer: PairScorer,
    read_chunk_size: usize,
    file: R,
    jobs: usize,
    progress: ProgressBar,
) -> Result<Vec<ScoredPair>>
where
    R: BufRead + Send + 'static,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("strcmp95-wrk-{}", i))
        .build()?;
    let (tx, rx) = crossbeam_channel::bounded(pool.current_num_threads());

    debug!(threads = pool.current_num_threads(), read_chunk_size, "scoring in parallel");

    let reader = Arc::new(Mutex::new(Reader {
        file,
        next_chunk: 0,
        next_line: 1,
    }));

    for _ in 0..pool.current_num_threads() {
        let pair_scorer = pair_scorer.clone();
        let tx = tx.clone();
        let reader = reader.clone();
        let progress = progress.clone();

        pool.spawn(move || {
            run_single_thread(tx, pair_scorer, read_chunk_size.max(1), reader, progress);
        });
    }

    drop(tx);

    let mut pending = BTreeMap::new();
    let mut next = 0;
    let mut total = Vec::new();

    for chunk in rx {
        let chunk = chunk?;
        pending.insert(chunk.index, chunk.pairs);

        while let Some(pairs) = pending.remove(&next) {
            total.extend(pairs);
            next += 1;
        }
    }

    Ok(total)
}

fn run_single_thread<R: BufRead>(
    tx: Sender<Result<Chunk>>,
    pair_scorer: PairScorer,
    read_chunk_size: usize,
    reader: Arc<Mutex<Reader<R>>>,
    progress: ProgressBar,
) {
    let mut lines = Vec::with_capacity(read_chunk_size);

    loop {
        let mut lock = reader.lock();

        for _ in 0..read_chunk_size {
            let mut line = Vec::new();
            match lock.file.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => lines.push(line),
                Err(e) => {
                    drop(lock);
                    let _ = tx.send(Err(e.into()));
                    return;
                }
            }
        }

        if lines.is_empty() {
            break;
        }

        let index = lock.next_chunk;
        let first_line = lock.next_line;
        lock.next_chunk += 1;
        lock.next_line += lines.len();

        drop(lock);

        let mut size = 0;
        let pairs = lines
            .drain(..)
            .enumerate()
            .filter_map(|(i, line)| {
                size += line.len();
                pair_scorer.process_line(first_line + i, &line)
            })
            .collect();

        progress.inc(size as u64);

        if tx.send(Ok(Chunk { index, pairs })).is_err() {
            // collector bailed out on an earlier error
            return;
        }
    }
}
