//! Integration test: tagged JSON representation of configs

use kolosal_kernels::prelude::*;
use kolosal_kernels::serialization::{kernel_from_value, prior_to_json};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_round_trip_nested_kernel() {
    init_tracing();
    let kernel = ScaleKernel::new(
        MaternKernel::new("1/2")
            .unwrap()
            .with_lengthscale_prior(GammaPrior::new(3.0, 6.0).unwrap())
            .with_lengthscale_initial_value(0.25)
            .unwrap(),
    )
    .with_outputscale_prior(HalfCauchyPrior::new(1.0).unwrap())
    .with_outputscale_initial_value(4.0)
    .unwrap();

    let json = kernel_to_json(&kernel).unwrap();
    let restored = kernel_from_json(&json).unwrap();

    assert_eq!(restored.to_value(), kernel.to_value());
    let ctx = ConversionContext::new().with_dtype(DType::Float64);
    assert_eq!(restored.to_runtime(&ctx).unwrap(), kernel.to_runtime(&ctx).unwrap());
}

#[test]
fn test_scale_base_must_be_kernel() {
    let err = kernel_from_value(&json!({
        "type": "ScaleKernel",
        "base_kernel": { "type": "GammaPrior", "concentration": 1.0, "rate": 1.0 }
    }))
    .unwrap_err();

    match err {
        KernelError::TypeConstraint { field, expected, found } => {
            assert_eq!(field, "base_kernel");
            assert_eq!(expected, "Kernel");
            assert_eq!(found, "GammaPrior");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scale_base_not_an_object() {
    let err = kernel_from_value(&json!({ "type": "ScaleKernel", "base_kernel": 3.0 })).unwrap_err();
    assert!(matches!(err, KernelError::TypeConstraint { .. }));
}

#[test]
fn test_scale_base_required() {
    let err = kernel_from_value(&json!({ "type": "ScaleKernel" })).unwrap_err();
    assert!(matches!(err, KernelError::InvalidInput(_)));
}

#[test]
fn test_validation_reapplied() {
    let err = kernel_from_json(r#"{"type": "MaternKernel", "nu": 3.5}"#).unwrap_err();
    assert!(matches!(err, KernelError::ConstraintViolation { .. }));

    let err = kernel_from_json(r#"{"type": "MaternKernel", "nu": "abc"}"#).unwrap_err();
    assert!(matches!(err, KernelError::InvalidInput(_)));

    let err = prior_from_json(r#"{"type": "GammaPrior", "concentration": -1.0, "rate": 1.0}"#)
        .unwrap_err();
    assert!(matches!(err, KernelError::ConstraintViolation { .. }));
}

#[test]
fn test_unknown_type() {
    let err = kernel_from_json(r#"{"type": "PeriodicKernel"}"#).unwrap_err();
    assert!(matches!(err, KernelError::InvalidInput(_)));
}

#[test]
fn test_malformed_json() {
    let err = kernel_from_json("{ not json").unwrap_err();
    assert!(matches!(err, KernelError::SerializationError(_)));
}

#[test]
fn test_prior_round_trip() {
    let priors: Vec<Box<dyn Prior>> = vec![
        Box::new(GammaPrior::new(2.0, 0.5).unwrap()),
        Box::new(HalfCauchyPrior::new(0.3).unwrap()),
        Box::new(NormalPrior::new(-1.0, 2.0).unwrap()),
        Box::new(HalfNormalPrior::new(1.0).unwrap()),
        Box::new(LogNormalPrior::new(0.0, 1.0).unwrap()),
        Box::new(SmoothedBoxPrior::with_sigma(-1.0, 1.0, 0.1).unwrap()),
    ];

    for prior in priors {
        let json = prior_to_json(prior.as_ref()).unwrap();
        let restored = prior_from_json(&json).unwrap();
        assert_eq!(restored.to_runtime(), prior.to_runtime(), "round trip of {json}");
    }
}
