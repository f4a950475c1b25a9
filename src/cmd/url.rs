use anyhow::{anyhow, Result};

use dogan_live::{Config, StreamQuality};

pub async fn cmd_url(
    url: &str,
    quality: Option<&str>,
    manifest: bool,
    config: &Config,
) -> Result<()> {
    let quality_str = quality.unwrap_or(&config.default_quality);
    let stream_quality = StreamQuality::parse(quality_str).ok_or_else(|| {
        anyhow!("Invalid quality: {quality_str}. Use 'best', 'worst' or a height like '720'.")
    })?;

    let streams = super::resolve(url, config).await?;

    if manifest {
        println!("{}", streams.manifest_url);
        return Ok(());
    }

    let variant = streams
        .select(stream_quality)
        .ok_or_else(|| anyhow!("No streams in {}", streams.manifest_url))?;
    tracing::debug!(variant = %variant.name, "Selected variant");
    println!("{}", variant.url);

    Ok(())
}
