use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lin2d::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod args;
mod provenance;

use args::{matrix_json, parse_transform, transform_json, vector_json};

#[derive(Parser)]
#[command(name = "lin2d")]
#[command(about = "Compose, invert and apply canonical 2D linear transforms")]
struct Cmd {
    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

/// Transforms are JSON: `{"scale":[sx,sy],"angle":r,"shear":h}` or
/// `{"matrix":[[a0,a1],[a2,a3]]}`.
#[derive(Subcommand)]
enum Action {
    /// Canonical parameters, matrix and determinant
    Show {
        #[arg(value_parser = parse_transform)]
        tfm: Lin2,
    },
    /// Closed-form inverse
    Invert {
        #[arg(value_parser = parse_transform)]
        tfm: Lin2,
    },
    /// Left-to-right product t1·t2·…
    Compose {
        #[arg(value_parser = parse_transform, num_args = 2..)]
        tfms: Vec<Lin2>,
    },
    /// a·b⁻¹
    Divide {
        #[arg(value_parser = parse_transform)]
        a: Lin2,
        #[arg(value_parser = parse_transform)]
        b: Lin2,
    },
    /// a⁻¹·b
    LeftDivide {
        #[arg(value_parser = parse_transform)]
        a: Lin2,
        #[arg(value_parser = parse_transform)]
        b: Lin2,
    },
    /// a·b·a⁻¹
    Conjugate {
        #[arg(value_parser = parse_transform)]
        a: Lin2,
        #[arg(value_parser = parse_transform)]
        b: Lin2,
    },
    /// Apply to a point, e.g. `--point 1,-2`
    Apply {
        #[arg(value_parser = parse_transform)]
        tfm: Lin2,
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        point: Vec<f64>,
        /// Apply the inverse instead
        #[arg(long)]
        inverse: bool,
    },
    /// Canonicalize a row-major matrix `a0,a1,a2,a3`
    FromMatrix {
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        matrix: Vec<f64>,
    },
    /// Seeded random transforms
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Show { .. } => "show",
            Action::Invert { .. } => "invert",
            Action::Compose { .. } => "compose",
            Action::Divide { .. } => "divide",
            Action::LeftDivide { .. } => "left-divide",
            Action::Conjugate { .. } => "conjugate",
            Action::Apply { .. } => "apply",
            Action::FromMatrix { .. } => "from-matrix",
            Action::Random { .. } => "random",
            Action::Report => "report",
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let name = cmd.action.name();
    tracing::info!(command = name, out = ?cmd.out, "run");
    let (params, result) = execute(&cmd.action)?;
    emit(cmd.out.as_deref(), name, params, &result)
}

/// Returns `(params, result)`; params feed the provenance sidecar.
fn execute(action: &Action) -> Result<(Value, Value)> {
    let out = match action {
        Action::Show { tfm } => (json!({ "tfm": tfm.to_string() }), transform_json(tfm)),
        Action::Invert { tfm } => (
            json!({ "tfm": tfm.to_string() }),
            transform_json(&tfm.invert()),
        ),
        Action::Compose { tfms } => {
            // empty product is the identity
            let product = tfms.iter().copied().reduce(|acc, t| acc * t).unwrap_or_default();
            let names: Vec<String> = tfms.iter().map(Lin2::to_string).collect();
            (json!({ "tfms": names }), transform_json(&product))
        }
        Action::Divide { a, b } => (pair_params(a, b), transform_json(&a.divide(b))),
        Action::LeftDivide { a, b } => (pair_params(a, b), transform_json(&a.left_divide(b))),
        Action::Conjugate { a, b } => (pair_params(a, b), transform_json(&a.conjugate(b))),
        Action::Apply {
            tfm,
            point,
            inverse,
        } => {
            let v = if *inverse {
                tfm.apply_inverse_slice(point)?
            } else {
                tfm.apply_slice(point)?
            };
            tracing::info!(x = v.x, y = v.y, inverse, "applied");
            (
                json!({ "tfm": tfm.to_string(), "point": point, "inverse": inverse }),
                json!({ "point": vector_json(&v) }),
            )
        }
        Action::FromMatrix { matrix } => {
            let &[a0, a1, a2, a3] = matrix.as_slice() else {
                bail!("--matrix needs 4 comma-separated values, got {}", matrix.len());
            };
            let m = Mat2::new(a0, a1, a2, a3);
            let t = Lin2::from_matrix(&m).context("canonicalizing matrix")?;
            (json!({ "matrix": matrix_json(&m) }), transform_json(&t))
        }
        Action::Random { seed, count } => {
            let draws = draw_lin2_batch(SampleCfg::default(), *seed, *count);
            tracing::info!(seed, count, "random");
            (
                json!({ "seed": seed, "count": count }),
                Value::Array(draws.iter().map(transform_json).collect()),
            )
        }
        Action::Report => (
            json!({}),
            json!({
                "code_rev": provenance::current_git_rev(),
                "lib_version": lin2d::VERSION,
                "cli_version": env!("CARGO_PKG_VERSION"),
            }),
        ),
    };
    Ok(out)
}

fn pair_params(a: &Lin2, b: &Lin2) -> Value {
    json!({ "a": a.to_string(), "b": b.to_string() })
}

fn emit(out: Option<&Path>, command: &str, params: Value, result: &Value) -> Result<()> {
    let Some(path) = out else {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(result)?)
        .with_context(|| format!("writing {}", path.display()))?;
    let sidecar = provenance::write_sidecar(path, provenance::Payload::new(command, params))?;
    tracing::info!(out = %path.display(), sidecar = %sidecar.display(), "wrote");
    Ok(())
}
