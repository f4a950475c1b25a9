use anyhow::Result;

use dogan_live::Config;

pub async fn cmd_streams(url: &str, json: bool, config: &Config) -> Result<()> {
    let streams = super::resolve(url, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&streams)?);
        return Ok(());
    }

    println!("Manifest: {}", streams.manifest_url);
    println!("Streams: {}", streams.variants.len());
    for variant in &streams.variants {
        let resolution = variant
            .height
            .map_or_else(|| "-".to_string(), |h| format!("{h}p"));
        let bitrate = if variant.bandwidth > 0 {
            format!("{} kbps", variant.bandwidth / 1000)
        } else {
            "-".to_string()
        };
        println!(
            "  {:<12} {:>6} {:>11}  {}",
            variant.name, resolution, bitrate, variant.url
        );
    }

    Ok(())
}
