//! Trellis demo - lays out a scene description and logs every node's rect.
//!
//! Usage: `trellis-demo [scene.json]`. Without an argument a built-in scene
//! is used. Set `RUST_LOG=debug` to see the per-strategy passes.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use trellis_layout::{LayoutStrategy, SceneSpec, SharedLayouts};

const BUILTIN_SCENE: &str = r#"{
    "root": {
        "size": [800, 600],
        "layout": {"kind": "canvas"},
        "children": [
            {
                "layout": {"kind": "stack", "orientation": "horizontal"},
                "children": [ {"size": [50, 20]}, {"size": [30, 40]} ]
            },
            {
                "padding": {"top": 8, "right": 8, "bottom": 8, "left": 8},
                "layout": {"kind": "grid", "rows": ["auto", "*"], "columns": ["200", "2*", "1*"]},
                "children": [
                    {"size": [0, 24], "grid": {"row": 0, "column": 0, "column_span": 3}},
                    {"grid": {"row": 1, "column": 0}},
                    {"grid": {"row": 1, "column": 1, "column_span": 2}}
                ]
            }
        ]
    }
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read scene file {path}"))?,
        None => BUILTIN_SCENE.to_string(),
    };

    let shared = SharedLayouts::new();
    let spec = SceneSpec::from_json(&text).context("invalid scene description")?;
    let mut scene = spec.build(&shared).context("failed to build scene")?;

    let report = scene.engine.run(&mut scene.tree);
    tracing::info!(updated = report.updated.len(), "layout pass finished");

    for node in scene.tree.preorder(scene.root)? {
        let rect = scene.tree.node(node)?.layout_rect();
        let strategy = scene.engine.strategy(node).name();
        tracing::info!(
            %node,
            strategy,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "node laid out"
        );
    }

    for failure in &report.failures {
        tracing::error!(node = %failure.node, error = %failure.error, "node failed layout");
    }
    if !report.is_clean() {
        anyhow::bail!("{} node(s) failed layout", report.failures.len());
    }
    Ok(())
}
