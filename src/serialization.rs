//! JSON (de)serialization of kernel and prior configs
//!
//! Every config is an object carrying a `"type"` tag naming its class.
//! Deserialization re-runs the same validation as the constructors, and it
//! is the place where a value of the wrong kind (a prior where a kernel is
//! expected, a bare number, ...) is rejected with
//! [`KernelError::TypeConstraint`].

use crate::error::{KernelError, Result};
use crate::kernels::{Kernel, MaternKernel, ScaleKernel, Smoothness, DEFAULT_NU};
use crate::priors::{
    GammaPrior, HalfCauchyPrior, HalfNormalPrior, LogNormalPrior, NormalPrior, Prior,
    SmoothedBoxPrior,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Type tags of all known kernels
pub const KERNEL_TYPES: &[&str] = &["MaternKernel", "ScaleKernel"];

/// Type tags of all known priors
pub const PRIOR_TYPES: &[&str] = &[
    "GammaPrior",
    "HalfCauchyPrior",
    "NormalPrior",
    "HalfNormalPrior",
    "LogNormalPrior",
    "SmoothedBoxPrior",
];

pub fn kernel_from_json(json: &str) -> Result<Box<dyn Kernel>> {
    let value: Value = serde_json::from_str(json)?;
    kernel_from_value(&value)
}

pub fn kernel_from_value(value: &Value) -> Result<Box<dyn Kernel>> {
    kernel_field("kernel", value)
}

pub fn kernel_to_json(kernel: &dyn Kernel) -> Result<String> {
    Ok(serde_json::to_string(&kernel.to_value())?)
}

pub fn prior_from_json(json: &str) -> Result<Box<dyn Prior>> {
    let value: Value = serde_json::from_str(json)?;
    prior_from_value(&value)
}

pub fn prior_from_value(value: &Value) -> Result<Box<dyn Prior>> {
    prior_field("prior", value)
}

pub fn prior_to_json(prior: &dyn Prior) -> Result<String> {
    Ok(serde_json::to_string(&prior.to_value())?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSmoothness {
    Float(f64),
    Text(String),
}

impl From<RawSmoothness> for Smoothness {
    fn from(raw: RawSmoothness) -> Self {
        match raw {
            RawSmoothness::Float(v) => Smoothness::Float(v),
            RawSmoothness::Text(s) => Smoothness::Text(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMatern {
    #[serde(default)]
    nu: Option<RawSmoothness>,
    #[serde(default)]
    lengthscale_prior: Option<Value>,
    #[serde(default)]
    lengthscale_initial_value: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScale {
    base_kernel: Value,
    #[serde(default)]
    outputscale_prior: Option<Value>,
    #[serde(default)]
    outputscale_initial_value: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGamma {
    concentration: f64,
    rate: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScaleOnly {
    scale: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLocScale {
    loc: f64,
    scale: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSmoothedBox {
    a: f64,
    b: f64,
    #[serde(default = "default_sigma")]
    sigma: f64,
}

fn default_sigma() -> f64 {
    SmoothedBoxPrior::DEFAULT_SIGMA
}

/// Name a JSON value's kind for error messages
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without type tag",
    }
}

/// Split a tagged object into its type name and remaining fields.
fn split_tagged<'a>(
    field: &str,
    expected: &str,
    value: &'a Value,
) -> Result<(&'a str, Map<String, Value>)> {
    let obj = value
        .as_object()
        .ok_or_else(|| KernelError::type_constraint(field, expected, json_kind(value)))?;
    let type_name = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
        KernelError::InvalidInput(format!("'{field}' is missing a string \"type\" tag"))
    })?;
    let mut fields = obj.clone();
    fields.remove("type");
    Ok((type_name, fields))
}

fn parse_fields<T: DeserializeOwned>(type_name: &str, fields: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| KernelError::InvalidInput(format!("invalid {type_name}: {e}")))
}

fn kernel_field(field: &str, value: &Value) -> Result<Box<dyn Kernel>> {
    let (type_name, fields) = split_tagged(field, "Kernel", value)?;
    match type_name {
        "MaternKernel" => {
            let raw: RawMatern = parse_fields(type_name, fields)?;
            let nu = raw.nu.map(Smoothness::from).unwrap_or(Smoothness::Float(DEFAULT_NU));
            let prior = optional_prior("lengthscale_prior", raw.lengthscale_prior.as_ref())?;
            Ok(Box::new(MaternKernel::from_parts(nu, prior, raw.lengthscale_initial_value)?))
        }
        "ScaleKernel" => {
            let raw: RawScale = parse_fields(type_name, fields)?;
            let base = kernel_field("base_kernel", &raw.base_kernel)?;
            let prior = optional_prior("outputscale_prior", raw.outputscale_prior.as_ref())?;
            Ok(Box::new(ScaleKernel::from_parts(base, prior, raw.outputscale_initial_value)?))
        }
        other if PRIOR_TYPES.contains(&other) => {
            Err(KernelError::type_constraint(field, "Kernel", other))
        }
        other => Err(KernelError::InvalidInput(format!("unknown kernel type '{other}'"))),
    }
}

fn optional_prior(field: &str, value: Option<&Value>) -> Result<Option<Box<dyn Prior>>> {
    value.map(|v| prior_field(field, v)).transpose()
}

fn prior_field(field: &str, value: &Value) -> Result<Box<dyn Prior>> {
    let (type_name, fields) = split_tagged(field, "Prior", value)?;
    let prior: Box<dyn Prior> = match type_name {
        "GammaPrior" => {
            let raw: RawGamma = parse_fields(type_name, fields)?;
            Box::new(GammaPrior::new(raw.concentration, raw.rate)?)
        }
        "HalfCauchyPrior" => {
            let raw: RawScaleOnly = parse_fields(type_name, fields)?;
            Box::new(HalfCauchyPrior::new(raw.scale)?)
        }
        "NormalPrior" => {
            let raw: RawLocScale = parse_fields(type_name, fields)?;
            Box::new(NormalPrior::new(raw.loc, raw.scale)?)
        }
        "HalfNormalPrior" => {
            let raw: RawScaleOnly = parse_fields(type_name, fields)?;
            Box::new(HalfNormalPrior::new(raw.scale)?)
        }
        "LogNormalPrior" => {
            let raw: RawLocScale = parse_fields(type_name, fields)?;
            Box::new(LogNormalPrior::new(raw.loc, raw.scale)?)
        }
        "SmoothedBoxPrior" => {
            let raw: RawSmoothedBox = parse_fields(type_name, fields)?;
            Box::new(SmoothedBoxPrior::with_sigma(raw.a, raw.b, raw.sigma)?)
        }
        other if KERNEL_TYPES.contains(&other) => {
            return Err(KernelError::type_constraint(field, "Prior", other));
        }
        other => {
            return Err(KernelError::InvalidInput(format!("unknown prior type '{other}'")));
        }
    };
    Ok(prior)
}
