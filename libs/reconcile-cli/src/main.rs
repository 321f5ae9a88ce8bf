//! # reconcile
//!
//! Runs one reconciliation command over a scene document.
//!
//! ```text
//! reconcile <scene.ron> <command> [args...]
//! ```
//!
//! The transformed document is written to stdout as RON. Logging goes to
//! stderr and is controlled by `RUST_LOG`.

use anyhow::{anyhow, bail, Context, Result};
use config::constants::{
    ReconcileConfig, DEFAULT_POSITION_THRESHOLD, DEFAULT_SIZE_THRESHOLD_PERCENT, ENVIRONMENT_NODE_NAME,
    UNRENAMED_MATERIAL_TAG,
};
use scene_graph::{MemoryScene, NodeKey, SceneDocument, SceneQuery, TessellationQuality, TessellationSettings};
use scene_reconcile::commands;
use scene_reconcile::progress::TracingProgress;
use scene_reconcile::walker::find_by_name;
use scene_reconcile::{MatchThresholds, RenameMode};

const USAGE: &str = "\
usage: reconcile <scene.ron> <command> [args...]

commands:
  dedupe [node...]                       remove duplicate children
  symmetry [node...]                     split containers across Y=0
  tessellate <quality> [node...]         rough | low | medium | high
  merge [node...]                        flatten subtrees
  rename-reset                           renumber names from scratch
  rename-change                          renumber unnamed children only
  match <reference> <target> [pos] [size%]
  tag-materials [known-name...]          tag materials not in the list
  clear-textures                         disable texture usage
  clear-environment [name]               empty the environment node
  cleanup                                remove empty geometry and groups
";

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path, command, rest @ ..] = args.as_slice() else {
        eprint!("{USAGE}");
        bail!("missing arguments");
    };

    let source = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let document: SceneDocument = ron::from_str(&source).with_context(|| format!("parsing {path}"))?;
    let mut scene = MemoryScene::from_document(&document)?;

    run(&mut scene, command, rest, &ReconcileConfig::default())?;

    let output = ron::ser::to_string_pretty(&scene.to_document()?, ron::ser::PrettyConfig::default())?;
    println!("{output}");
    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

fn run(scene: &mut MemoryScene, command: &str, args: &[String], config: &ReconcileConfig) -> Result<()> {
    match command {
        "dedupe" => {
            let selection = resolve(scene, args)?;
            let removed = commands::remove_duplicates(scene, &selection, config)?;
            tracing::info!(removed, "duplicates removed");
        }
        "symmetry" => {
            let selection = resolve(scene, args)?;
            let pairs = commands::split_symmetry(scene, &selection)?;
            tracing::info!(split = pairs.len(), "symmetry split");
        }
        "tessellate" => {
            let (quality, nodes) = args.split_first().ok_or_else(|| anyhow!("tessellate needs a quality"))?;
            let quality: TessellationQuality = quality.parse()?;
            let selection = resolve(scene, nodes)?;
            let settings = TessellationSettings::from_quality(quality);
            let report = commands::tessellate(scene, &selection, &settings, config)?;
            tracing::info!(targets = report.targets.len(), removed = report.removed.len(), "tessellated");
        }
        "merge" => {
            let selection = resolve(scene, args)?;
            let report = commands::merge(scene, &selection, &mut TracingProgress::new("merge"))?;
            tracing::info!(promoted = report.promoted, removed = report.removed, "merged");
        }
        "rename-reset" => {
            let renamed = commands::rename(scene, RenameMode::Reset, config)?;
            tracing::info!(renamed, "names reset");
        }
        "rename-change" => {
            let renamed = commands::rename(scene, RenameMode::Change, config)?;
            tracing::info!(renamed, "names changed");
        }
        "match" => {
            let [reference, target, thresholds @ ..] = args else {
                bail!("match needs a reference and a target node");
            };
            let root = scene.root();
            let reference = find_by_name(&*scene, root, reference)?;
            let target = find_by_name(&*scene, root, target)?;
            let thresholds = match thresholds {
                [] => MatchThresholds::with_config(DEFAULT_POSITION_THRESHOLD, DEFAULT_SIZE_THRESHOLD_PERCENT, config),
                [position] => {
                    MatchThresholds::with_config(position.parse()?, DEFAULT_SIZE_THRESHOLD_PERCENT, config)
                }
                [position, size, ..] => MatchThresholds::with_config(position.parse()?, size.parse()?, config),
            };
            let report = commands::match_materials(
                scene,
                reference,
                target,
                &thresholds,
                &mut TracingProgress::new("match"),
            )?;
            tracing::info!(matched = report.matched, targets = report.target_leaves, "materials matched");
        }
        "tag-materials" => {
            let tagged = commands::tag_unlisted_materials(scene, args, UNRENAMED_MATERIAL_TAG)?;
            tracing::info!(tagged, "materials tagged");
        }
        "clear-textures" => {
            let cleared = commands::disable_textures(scene)?;
            tracing::info!(cleared, "textures disabled");
        }
        "clear-environment" => {
            let name = args.first().map_or(ENVIRONMENT_NODE_NAME, String::as_str);
            let removed = commands::clear_environment(scene, name)?;
            tracing::info!(removed, "environment cleared");
        }
        "cleanup" => {
            let report = commands::clear_unusable(scene)?;
            tracing::info!(
                geometries = report.empty_geometries,
                containers = report.empty_containers,
                "scene cleaned"
            );
        }
        other => {
            eprint!("{USAGE}");
            bail!("unknown command '{other}'");
        }
    }
    Ok(())
}

/// Resolves node names to handles; no names selects the root.
fn resolve(scene: &MemoryScene, names: &[String]) -> Result<Vec<NodeKey>> {
    if names.is_empty() {
        return Ok(vec![scene.root()]);
    }
    let root = scene.root();
    names
        .iter()
        .map(|name| find_by_name(scene, root, name)?.ok_or_else(|| anyhow!("no node named '{name}'")))
        .collect()
}
