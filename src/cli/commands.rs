//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppContainer;
use crate::cli::args::{ConvertArgs, HlsArgs, HlsMultiArgs, TranscodeArgs, TrimArgs};
use crate::output::OutputWriter;

/// Execute the trim command
pub async fn trim(container: &dyn AppContainer, writer: &OutputWriter, args: TrimArgs) -> Result<()> {
    info!(input = %args.input.display(), start = %args.start, end = %args.end, "Starting trim operation");

    let request = args.into_request().context("Invalid trim arguments")?;
    let output = container
        .trim_interactor()
        .trim(request)
        .await
        .context("Failed to trim video")?;

    print(writer, &writer.render_media("Trim Result", &output)?)
}

/// Execute the transcode command
pub async fn transcode(
    container: &dyn AppContainer,
    writer: &OutputWriter,
    args: TranscodeArgs,
) -> Result<()> {
    info!(input = %args.input.display(), "Starting transcode operation");

    let request = args.into_request().context("Invalid transcode arguments")?;
    let output = container
        .transcode_interactor()
        .transcode(request)
        .await
        .context("Failed to transcode video")?;

    print(writer, &writer.render_media("Transcode Result", &output)?)
}

/// Execute the convert command
pub async fn convert(container: &dyn AppContainer, writer: &OutputWriter, args: ConvertArgs) -> Result<()> {
    info!(url = %args.url, "Starting convert operation");

    let url = args.url.clone();
    let request = args.into_request().context("Invalid convert arguments")?;
    let output = container
        .convert_interactor()
        .convert_url(request)
        .await
        .with_context(|| format!("Failed to convert {}", url))?;

    print(writer, &writer.render_media("Convert Result", &output)?)
}

/// Execute the hls command
pub async fn hls(container: &dyn AppContainer, writer: &OutputWriter, args: HlsArgs) -> Result<()> {
    info!(input = %args.input, "Starting HLS operation");

    let result = container
        .hls_interactor()
        .convert_to_hls(args.into_request())
        .await
        .context("Failed to convert video to HLS")?;

    print(writer, &writer.render_hls(&result)?)
}

/// Execute the hls-multi command
pub async fn hls_multi(container: &dyn AppContainer, writer: &OutputWriter, args: HlsMultiArgs) -> Result<()> {
    info!(input = %args.input, variants = args.variants.len(), "Starting multi-variant HLS operation");

    let result = container
        .hls_interactor()
        .convert_to_multi_variant_hls(args.into_request())
        .await
        .context("Failed to convert video to multi-variant HLS")?;

    print(writer, &writer.render_hls(&result)?)
}

fn print(writer: &OutputWriter, rendered: &str) -> Result<()> {
    let stdout = std::io::stdout();
    writer
        .emit(&mut stdout.lock(), rendered)
        .context("Failed to print result")
}
