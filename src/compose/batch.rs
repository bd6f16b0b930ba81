use rayon::prelude::*;

use crate::{
    compose::engine::{ComposeOpts, composite_with_backend},
    compose::request::{CompositeRequest, CompositeResult},
    foundation::error::{DressError, DressResult},
    plan::layers::LayerOrder,
    render::cpu::CpuBackend,
};

#[derive(Clone, Debug, Default)]
/// Threading controls for batch compositing.
pub struct BatchOpts {
    /// Run requests on a `rayon` pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Composite many independent requests.
///
/// Results come back in input order. A failing request yields its own `Err` entry and never
/// affects the others; the outer error is only for pool construction.
#[tracing::instrument(skip_all, fields(requests = requests.len(), parallel = batch.parallel))]
pub fn composite_batch(
    requests: &[CompositeRequest],
    order: &LayerOrder,
    opts: &ComposeOpts,
    batch: &BatchOpts,
) -> DressResult<Vec<DressResult<CompositeResult>>> {
    if !batch.parallel {
        let mut backend = CpuBackend::new();
        return Ok(requests
            .iter()
            .map(|req| composite_with_backend(req, order, opts, &mut backend))
            .collect());
    }

    let pool = build_thread_pool(batch.threads)?;
    Ok(pool.install(|| {
        requests
            .par_iter()
            .map_init(CpuBackend::new, |backend, req| {
                composite_with_backend(req, order, opts, backend)
            })
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> DressResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(DressError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DressError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/batch.rs"]
mod tests;
