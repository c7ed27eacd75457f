use llm_sizer::estimate::estimate_memory_breakdown;
use llm_sizer::hardware::{group_by_tier, ACCELERATORS};
use llm_sizer::{
    estimate_memory, estimate_storage, suggest_configurations, ModelShape, PrecisionFormat,
    WorkloadMode,
};
use proptest::prelude::*;

fn precision() -> impl Strategy<Value = PrecisionFormat> {
    prop::sample::select(PrecisionFormat::KNOWN.to_vec())
}

fn shape() -> impl Strategy<Value = ModelShape> {
    (
        0.1f64..1000.0,
        precision(),
        1u64..32_768,
        1u64..64,
        1u64..128,
        1u64..16_384,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(params, precision, context, batch, layers, hidden, training, efficient)| {
                ModelShape {
                    parameter_count_billion: params,
                    precision,
                    context_length: context,
                    batch_size: batch,
                    num_layers: layers,
                    hidden_size: hidden,
                    mode: if training {
                        WorkloadMode::Training
                    } else {
                        WorkloadMode::Inference
                    },
                    efficient_attention: efficient,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn efficient_attention_never_costs_more(shape in shape()) {
        let efficient = estimate_memory(&ModelShape { efficient_attention: true, ..shape.clone() });
        let full = estimate_memory(&ModelShape { efficient_attention: false, ..shape });
        prop_assert!(efficient <= full, "efficient {} > full {}", efficient, full);
    }

    #[test]
    fn training_needs_at_least_inference(shape in shape()) {
        let inference = estimate_memory(&ModelShape { mode: WorkloadMode::Inference, ..shape.clone() });
        let training = estimate_memory(&ModelShape { mode: WorkloadMode::Training, ..shape });
        prop_assert!(training >= inference, "training {} < inference {}", training, inference);
    }

    #[test]
    fn breakdown_sums_to_total(shape in shape()) {
        let b = estimate_memory_breakdown(&shape);
        let expected = match shape.mode {
            WorkloadMode::Inference => b.params_gb + b.activations_gb,
            WorkloadMode::Training => 2.0 * b.params_gb + b.activations_gb,
        };
        prop_assert!((b.total_gb - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn storage_monotone_in_context(
        params in 0.1f64..1000.0,
        precision in precision(),
        context in 1u64..1_000_000,
        extra in 0u64..1_000_000,
    ) {
        let a = estimate_storage(params, precision, context);
        let b = estimate_storage(params, precision, context + extra);
        prop_assert!(b >= a);
    }

    #[test]
    fn storage_monotone_in_params(
        params in 0.1f64..1000.0,
        extra in 0.0f64..1000.0,
        precision in precision(),
        context in 1u64..1_000_000,
    ) {
        let a = estimate_storage(params, precision, context);
        let b = estimate_storage(params + extra, precision, context);
        prop_assert!(b >= a);
    }

    #[test]
    fn suggestions_always_cover_requirement(total in 0.01f64..1000.0) {
        for option in suggest_configurations(total) {
            prop_assert!(option.total_memory_gb() >= total, "{} < {}", option, total);
        }
    }

    #[test]
    fn one_minimal_option_per_viable_tier(total in 0.01f64..1000.0) {
        let options = suggest_configurations(total);
        let tiers = group_by_tier(&ACCELERATORS);

        let mut expected_tiers = Vec::new();
        for (&memory_gb, members) in tiers.iter().rev() {
            let max_count = members.iter().map(|a| a.max_count).max().unwrap();
            let viable = (1..=max_count).find(|&c| f64::from(c) * f64::from(memory_gb) >= total);
            if let Some(minimal) = viable {
                expected_tiers.push(memory_gb);
                let option = options.iter().find(|o| o.tier_memory_gb == memory_gb);
                prop_assert!(option.is_some(), "tier {} missing for {}", memory_gb, total);
                let option = option.unwrap();
                prop_assert_eq!(option.count, minimal);
                if minimal > 1 {
                    prop_assert!(f64::from(minimal - 1) * f64::from(memory_gb) < total);
                }
            }
        }

        let got: Vec<u32> = options.iter().map(|o| o.tier_memory_gb).collect();
        prop_assert_eq!(got, expected_tiers);
    }
}
