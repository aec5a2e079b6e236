//! Fetch, resolve and render in one call

use tracing::info;

use crate::output::{RenderOptions, render};
use crate::release::pipeline::{self, Options};
use crate::release::source::ReleaseSource;

/// Fetch the release index from `source` and render the selected releases
pub async fn run<S>(
    source: &S,
    options: &Options,
    render_options: RenderOptions,
) -> anyhow::Result<String>
where
    S: ReleaseSource + ?Sized,
{
    let index = source.fetch_index().await?;
    info!("Fetched release index with {} versions", index.versions.len());

    let response = pipeline::run(index, options)?;
    Ok(render(&response, render_options)?)
}
