//! Per-file conversion.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use neuron_paths::{NeuronPaths, PathConfig, build_paths_from_file};
use neuron_scene::{ScenePlan, SceneOptions, plan_scene};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything a run can be configured with from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Segmentation and geometry settings.
    pub paths: PathConfig,
    /// Scene layout settings.
    pub scene: SceneOptions,
}

impl BuildConfig {
    /// Read a configuration file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Files written for one input.
#[derive(Debug)]
pub struct Written {
    /// The `<stem>.paths.json` file.
    pub paths_file: PathBuf,
    /// The `<stem>.scene.json` file, when plans were requested.
    pub scene_file: Option<PathBuf>,
    /// Number of emitted segments.
    pub segments: usize,
    /// Number of skipped segments.
    pub skipped: usize,
}

/// Name used for the scene objects and output files of `input`.
pub fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "neuron".to_string(), |s| s.to_string_lossy().into_owned())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Convert one SWC file.
///
/// All computation happens before anything is written, so a failing input
/// leaves no output behind. Outputs go to `out_dir`, or next to the input
/// when it is `None`.
pub fn process_file(
    input: &Path,
    out_dir: Option<&Path>,
    config: &BuildConfig,
    with_plan: bool,
) -> Result<Written> {
    let stem = file_stem(input);
    let paths: NeuronPaths = build_paths_from_file(input, &config.paths)?;
    let plan: Option<ScenePlan> = if with_plan {
        let plan = plan_scene(&paths, &config.scene, &stem)?;
        debug!("scene for {stem}:\n{plan}");
        Some(plan)
    } else {
        None
    };

    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let paths_file = dir.join(format!("{stem}.paths.json"));
    write_json(&paths_file, &paths)?;

    let scene_file = match &plan {
        Some(plan) => {
            let scene_file = dir.join(format!("{stem}.scene.json"));
            write_json(&scene_file, plan)?;
            Some(scene_file)
        }
        None => None,
    };

    info!(
        input = %input.display(),
        output = %paths_file.display(),
        "converted"
    );
    Ok(Written {
        paths_file,
        scene_file,
        segments: paths.segments.len(),
        skipped: paths.skipped.len(),
    })
}

/// Convert every input in parallel; results are in input order.
pub fn process_all(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    config: &BuildConfig,
    with_plan: bool,
) -> Vec<(PathBuf, Result<Written>)> {
    inputs
        .par_iter()
        .map(|input| {
            let result = process_file(input, out_dir, config, with_plan);
            (input.clone(), result)
        })
        .collect()
}
