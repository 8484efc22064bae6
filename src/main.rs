use anyhow::Result;
use tracing::info;

use cost_compass::CostCompass;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(product_name) = args.next() else {
        eprintln!("usage: cost-compass <product-name> [term]...");
        std::process::exit(2);
    };
    let terms: Vec<String> = args.collect();

    info!("Starting Cost Compass price query");

    let compass = CostCompass::new()?;
    let report = compass.query_by_specifications(&product_name, &terms).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
