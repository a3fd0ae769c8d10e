//! Transform arguments and JSON rendering.
//!
//! Input forms (JSON):
//! - `{"scale":[sx,sy],"angle":r,"shear":h}`; every field defaults to identity.
//! - `{"matrix":[[a0,a1],[a2,a3]]}`.

use anyhow::{Context, Result};
use lin2d::Lin2;
use nalgebra::{Matrix2, Vector2};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamsSpec {
    #[serde(default = "unit_scale")]
    scale: Vec<f64>,
    #[serde(default)]
    angle: f64,
    #[serde(default)]
    shear: f64,
}

fn unit_scale() -> Vec<f64> {
    vec![1.0, 1.0]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixSpec {
    matrix: [[f64; 2]; 2],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransformSpec {
    Matrix(MatrixSpec),
    Params(ParamsSpec),
}

impl TransformSpec {
    fn build(self) -> Result<Lin2> {
        match self {
            TransformSpec::Matrix(MatrixSpec { matrix: [[a0, a1], [a2, a3]] }) => {
                Ok(Lin2::from_matrix(&Matrix2::new(a0, a1, a2, a3))?)
            }
            TransformSpec::Params(p) => {
                let mut t = Lin2::identity();
                t.set_scale(&p.scale)?;
                t.set_angle(p.angle);
                t.set_shear(p.shear)?;
                Ok(t)
            }
        }
    }
}

/// Parse one transform argument.
pub fn parse_transform_json(s: &str) -> Result<Lin2> {
    let spec: TransformSpec =
        serde_json::from_str(s).with_context(|| format!("parsing transform `{s}`"))?;
    spec.build()
}

/// clap adapter for [`parse_transform_json`].
pub fn parse_transform(s: &str) -> std::result::Result<Lin2, String> {
    parse_transform_json(s).map_err(|e| format!("{e:#}"))
}

pub fn matrix_json(m: &Matrix2<f64>) -> Value {
    json!([[m[(0, 0)], m[(0, 1)]], [m[(1, 0)], m[(1, 1)]]])
}

pub fn vector_json(v: &Vector2<f64>) -> Value {
    json!([v.x, v.y])
}

/// `params` is accepted back as input; the rest is informational.
pub fn transform_json(t: &Lin2) -> Value {
    json!({
        "params": {
            "scale": [t.sx(), t.sy()],
            "angle": t.angle(),
            "shear": t.shear(),
        },
        "matrix": matrix_json(&t.to_matrix()),
        "det": t.det(),
        "display": t.to_string(),
    })
}
