use crate::foundation::core::{Axis, Canvas};
use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Travel direction of a directional transition.
///
/// For whip pans this is the apparent camera move; for wipes it names the
/// edge the incoming frame enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
    /// Toward negative y.
    Up,
    /// Toward positive y.
    Down,
}

impl Direction {
    /// Axis the motion runs along.
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Signed unit of travel, negative toward the origin.
    pub fn sign(self) -> i64 {
        match self {
            Self::Left | Self::Up => -1,
            Self::Right | Self::Down => 1,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = WhipcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(WhipcutError::validation(format!(
                "unknown direction '{other}', expected left|right|up|down"
            ))),
        }
    }
}

/// Serialized `{ kind, params }` selector for a transition.
///
/// The loose shape keeps configs forward-compatible: `kind` is matched by
/// name and `params` is interpreted per kind by [`parse_transition`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Transition kind identifier, e.g. `"whip_pan"`.
    pub kind: String,
    /// Kind-specific parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

/// The transition styles the pipeline can render.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Crossfade with cosine-eased alpha.
    Dissolve,
    /// Both frames Gaussian-blurred by the intensity pulse, then dissolved.
    ProgressiveBlur,
    /// Toroidal pan with directional motion blur.
    WhipPan {
        /// Apparent camera move.
        direction: Direction,
    },
    /// Directional reveal of the incoming frame.
    Wipe {
        /// Edge the incoming frame enters from.
        direction: Direction,
        /// Smoothstep ramp half-width as a share of the axis; 0 is a hard edge.
        soft_edge: f64,
    },
    /// Linear and cosine crossfades side by side, at double width.
    Comparison,
}

impl TransitionKind {
    /// Output canvas for a given input canvas.
    ///
    /// Every kind preserves the input size except [`TransitionKind::Comparison`],
    /// which doubles the width.
    pub fn output_canvas(self, input: Canvas) -> Canvas {
        match self {
            Self::Comparison => Canvas {
                width: input.width * 2,
                height: input.height,
            },
            _ => input,
        }
    }
}

/// Resolve a [`TransitionSpec`] into a [`TransitionKind`].
pub fn parse_transition(spec: &TransitionSpec) -> WhipcutResult<TransitionKind> {
    parse_transition_parts(&spec.kind, &spec.params)
}

/// Parse a kind name plus its parameter object.
///
/// Kind names are matched case-insensitively and accept short aliases
/// (`blur`, `whip`, `compare`, `crossfade`). Directional kinds default to
/// [`Direction::Left`] and wipes to a hard edge when `params` omits them;
/// unknown kind names are rejected rather than passed through.
pub fn parse_transition_parts(
    kind: &str,
    params: &serde_json::Value,
) -> WhipcutResult<TransitionKind> {
    let name = kind.trim().to_ascii_lowercase();
    match name.as_str() {
        "" => Err(WhipcutError::validation("transition kind is empty")),
        "dissolve" | "crossfade" => Ok(TransitionKind::Dissolve),
        "progressive_blur" | "progressiveblur" | "blur" => Ok(TransitionKind::ProgressiveBlur),
        "whip_pan" | "whippan" | "whip" => Ok(TransitionKind::WhipPan {
            direction: direction_param(params, "whip_pan")?,
        }),
        "wipe" => Ok(TransitionKind::Wipe {
            direction: direction_param(params, "wipe")?,
            soft_edge: soft_edge_param(params)?,
        }),
        "comparison" | "compare" => Ok(TransitionKind::Comparison),
        _ => Err(WhipcutError::validation(format!(
            "no transition named '{name}', expected dissolve|blur|whip_pan|wipe|comparison"
        ))),
    }
}

fn params_object<'a>(
    params: &'a serde_json::Value,
    kind: &str,
) -> WhipcutResult<Option<&'a serde_json::Map<String, serde_json::Value>>> {
    match params {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(obj) => Ok(Some(obj)),
        _ => Err(WhipcutError::validation(format!(
            "{kind} params must be an object"
        ))),
    }
}

fn direction_param(params: &serde_json::Value, kind: &str) -> WhipcutResult<Direction> {
    match params_object(params, kind)?
        .and_then(|obj| obj.get("direction"))
        .and_then(serde_json::Value::as_str)
    {
        None => Ok(Direction::Left),
        Some(s) => s.parse(),
    }
}

fn soft_edge_param(params: &serde_json::Value) -> WhipcutResult<f64> {
    let raw = params_object(params, "wipe")?
        .and_then(|obj| obj.get("soft_edge"))
        .and_then(serde_json::Value::as_f64);
    match raw {
        None => Ok(0.0),
        Some(v) if v.is_finite() => Ok(v.clamp(0.0, 1.0)),
        Some(_) => Err(WhipcutError::validation(
            "wipe.soft_edge must be a finite number",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/kind.rs"]
mod tests;
