//! Generation parameters, defaults and the settings blob recorded with
//! every generation job.

use serde::Deserialize;
use serde_json::json;

/// Tag stored in the `source` key of every settings blob written by this
/// service.
pub const SETTINGS_SOURCE: &str = "web:v0.01";

pub const DEFAULT_CFG_SCALE: f64 = 7.0;
pub const DEFAULT_STEPS: i32 = 30;
pub const DEFAULT_PREVIEW_STEPS: i32 = 20;
pub const DEFAULT_SAMPLER: &str = "euler";
pub const DEFAULT_SCHEDULER: &str = "normal";
pub const DEFAULT_DIMENSION: i32 = 1024;

/// Job status strings. The worker may report others; these are the ones this
/// service writes on its own.
pub const STATUS_QUEUED: &str = "queued";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// Generation/asset type tag for still images.
pub const KIND_IMAGE: &str = "image";

/// Sampler options as supplied by a client. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerOverrides {
    pub cfg_scale: Option<f64>,
    pub steps: Option<i32>,
    pub seed: Option<i64>,
    pub sampler: Option<String>,
    pub scheduler: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub base_model: Option<String>,
}

/// Fully resolved sampler parameters sent to the worker.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerParams {
    pub cfg_scale: f64,
    pub steps: i32,
    pub seed: Option<i64>,
    pub sampler: String,
    pub scheduler: String,
    pub width: i32,
    pub height: i32,
    pub base_model: Option<String>,
}

impl SamplerOverrides {
    /// Resolve for a full image generation.
    pub fn resolve(&self) -> SamplerParams {
        self.resolve_with_steps(DEFAULT_STEPS)
    }

    /// Resolve for a preview run, which uses fewer default steps.
    pub fn resolve_preview(&self) -> SamplerParams {
        self.resolve_with_steps(DEFAULT_PREVIEW_STEPS)
    }

    fn resolve_with_steps(&self, default_steps: i32) -> SamplerParams {
        SamplerParams {
            cfg_scale: self.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
            steps: self.steps.unwrap_or(default_steps),
            seed: self.seed,
            sampler: self
                .sampler
                .clone()
                .unwrap_or_else(|| DEFAULT_SAMPLER.to_string()),
            scheduler: self
                .scheduler
                .clone()
                .unwrap_or_else(|| DEFAULT_SCHEDULER.to_string()),
            width: self.width.unwrap_or(DEFAULT_DIMENSION),
            height: self.height.unwrap_or(DEFAULT_DIMENSION),
            base_model: self.base_model.clone(),
        }
    }
}

impl SamplerParams {
    /// Settings blob for a one-shot image generation job.
    pub fn settings_json(&self) -> serde_json::Value {
        json!({
            "source": SETTINGS_SOURCE,
            "cfgScale": self.cfg_scale,
            "steps": self.steps,
            "seed": self.seed,
            "sampler": self.sampler,
        })
    }

    /// Settings blob for a preview job.
    pub fn preview_settings_json(&self) -> serde_json::Value {
        json!({
            "source": SETTINGS_SOURCE,
            "mode": "preview",
            "cfgScale": self.cfg_scale,
            "steps": self.steps,
            "seed": self.seed,
        })
    }
}

/// Status recorded for a preview job: previews are only worth keeping when
/// at least one came back.
pub fn preview_status(preview_count: usize) -> &'static str {
    if preview_count > 0 {
        STATUS_COMPLETED
    } else {
        STATUS_FAILED
    }
}
