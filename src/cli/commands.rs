//! CLI command implementations

use super::EstimateArgs;
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use llm_sizer::config::MODEL_SIZE_PRESETS;
use llm_sizer::estimate::calculate_requirements_with_catalog;
use llm_sizer::hardware::{group_by_tier, ACCELERATORS};
use llm_sizer::utils::{format_gb, format_size};
use llm_sizer::{
    Config, HubClient, HubConfig, ModelShape, NormalizedMetadata, PrecisionFormat, Requirements,
};
use std::path::Path;
use std::time::Duration;

pub async fn estimate(args: EstimateArgs) -> Result<()> {
    let config = if let Some(path) = &args.config {
        Config::load(path)?
    } else if let Some(preset) = &args.preset {
        Config::for_model(preset)?
    } else {
        Config::default()
    };

    let mut shape = config.model.clone();

    if let Some(model) = &args.model {
        let metadata = fetch_with_spinner(&config.hub, model).await?;
        report_metadata(model, &metadata, &args);

        if needs_precision_choice(&metadata, &args, &config) {
            bail!(
                "precision for '{}' could not be determined; pass --precision ({})",
                model,
                precision_choices(PrecisionFormat::Unknown)
            );
        }
        shape = shape.with_metadata(&metadata);
    }

    let shape = apply_overrides(shape, &args);
    let requirements = calculate_requirements_with_catalog(&shape, config.catalog())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&requirements)?);
    } else {
        print_requirements(&requirements);
    }
    Ok(())
}

pub async fn fetch(model: &str, config: Option<&Path>, json: bool) -> Result<()> {
    let hub = hub_config(config)?;
    let metadata = fetch_with_spinner(&hub, model).await?;

    if json {
        let report = serde_json::json!({
            "parameter_count_billion": metadata.parameter_count_billion,
            "precision": metadata.precision,
            "advisories": metadata.advisories(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match metadata.parameter_count_billion {
        Some(b) => println!("Parameters:   {}B", b),
        None => println!("Parameters:   unknown"),
    }
    println!("Quantization: {}", metadata.precision);
    println!(
        "Selectable:   {}",
        precision_choices(metadata.precision)
    );
    for advisory in metadata.advisories() {
        println!("⚠️  {}", advisory);
    }
    Ok(())
}

pub fn gpus() -> Result<()> {
    println!();
    for (memory_gb, members) in group_by_tier(&ACCELERATORS).iter().rev() {
        println!("{}GB tier", memory_gb);
        for gpu in members {
            println!("  - {} (up to {} per node)", gpu.name, gpu.max_count);
        }
    }
    println!();
    Ok(())
}

pub fn presets() -> Result<()> {
    for (name, billions) in MODEL_SIZE_PRESETS {
        println!("  {:>5}  {} billion parameters", name, billions);
    }
    Ok(())
}

/// Registry settings from the given config file, or the defaults
fn hub_config(path: Option<&Path>) -> Result<HubConfig> {
    match path {
        Some(path) => Ok(Config::load(path)?.hub),
        None => Ok(HubConfig::default()),
    }
}

/// True when the registry left precision open and neither the config file
/// nor a flag supplied one
fn needs_precision_choice(
    metadata: &NormalizedMetadata,
    args: &EstimateArgs,
    config: &Config,
) -> bool {
    metadata.is_precision_ambiguous()
        && args.precision.is_none()
        && config.pinned_precision.is_none()
}

async fn fetch_with_spinner(hub: &HubConfig, model: &str) -> Result<NormalizedMetadata> {
    let client = HubClient::new(hub.clone())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Fetching metadata for {}", model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.fetch_metadata(model).await;
    spinner.finish_and_clear();

    Ok(result?)
}

fn report_metadata(model: &str, metadata: &NormalizedMetadata, args: &EstimateArgs) {
    if args.json {
        return;
    }
    match metadata.parameter_count_billion {
        Some(b) => println!("✅ {}: {}B parameters", model, b),
        None if args.params.is_none() => {
            println!("⚠️  {}: parameter count not published, using configured size", model)
        }
        None => {}
    }
    if metadata.precision.is_known() {
        println!("✅ Quantization: {}", metadata.precision);
        if let Some(chosen) = args.precision {
            if !metadata.precision.selectable_alternatives().contains(&chosen) {
                println!(
                    "⚠️  {} differs from the published {}",
                    chosen, metadata.precision
                );
            }
        }
    }
}

/// Apply explicit command-line values on top of the configured/fetched shape
pub fn apply_overrides(mut shape: ModelShape, args: &EstimateArgs) -> ModelShape {
    if let Some(params) = args.params {
        shape.parameter_count_billion = params;
    }
    if let Some(precision) = args.precision {
        shape.precision = precision;
    }
    if let Some(mode) = args.mode {
        shape.mode = mode;
    }
    if let Some(context_length) = args.context_length {
        shape.context_length = context_length;
    }
    if let Some(batch_size) = args.batch_size {
        shape.batch_size = batch_size;
    }
    if let Some(num_layers) = args.num_layers {
        shape.num_layers = num_layers;
    }
    if let Some(hidden_size) = args.hidden_size {
        shape.hidden_size = hidden_size;
    }
    if args.full_attention {
        shape.efficient_attention = false;
    }
    shape
}

fn precision_choices(detected: PrecisionFormat) -> String {
    detected
        .selectable_alternatives()
        .iter()
        .map(|p| p.short_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_requirements(req: &Requirements) {
    let shape = &req.shape;
    let memory = &req.memory;

    println!();
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  ESTIMATED HARDWARE REQUIREMENTS                                     ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "  Model:        {}B parameters, {} ({})",
        shape.parameter_count_billion, shape.precision, shape.mode
    );
    println!(
        "  Workload:     context {} | batch {} | {} layers | hidden {}{}",
        shape.context_length,
        shape.batch_size,
        shape.num_layers,
        shape.hidden_size,
        if shape.efficient_attention {
            " | efficient attention"
        } else {
            ""
        }
    );
    println!();
    println!("  Total GPU Memory Required:   {}", format_gb(req.total_memory_gb));
    println!("    Weights:                   {}", format_size(memory.params_gb));
    println!("    Activations:               {}", format_size(memory.activations_gb));
    println!("  Recommended Storage Space:   {}", format_gb(req.storage_gb));
    println!();

    if req.configurations.is_empty() {
        println!(
            "  No current configuration available for this model size at this quantization level."
        );
    } else {
        println!("  Possible GPU Configurations:");
        for option in &req.configurations {
            println!("    - {}", option);
        }
    }
    println!();
}
