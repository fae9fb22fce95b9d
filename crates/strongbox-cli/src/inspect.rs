use std::path::Path;

use nu_ansi_term::Color::{Blue, Cyan, Green};
use strongbox_config::{
    config::{config_path, get_config, Config, MAX_HIERARCHY_DEPTH_LIMIT},
    error::ConfigError,
};
use strongbox_db::{
    coordinates::{artifact_coordinates_adapter, coordinates_registry, ArtifactCoordinates},
    Hierarchy, HierarchyEntity,
};
use strongbox_graph::{MemoryGraph, VertexId};
use strongbox_utils::fs::read_optional;
use tracing::{info, warn};

use crate::{error::CliResult, utils::Colored};

/// Folds the chain ending at `vertex` from the snapshot at `graph_path`.
pub fn load_chain(
    graph_path: &Path,
    vertex: VertexId,
    depth: usize,
) -> CliResult<Hierarchy<ArtifactCoordinates>> {
    if depth > MAX_HIERARCHY_DEPTH_LIMIT {
        return Err(ConfigError::InvalidDepth {
            depth,
            max: MAX_HIERARCHY_DEPTH_LIMIT,
        }
        .into());
    }

    let adapter = artifact_coordinates_adapter(depth)?;
    let graph = MemoryGraph::open(graph_path)?;
    Ok(adapter.fold().execute(&graph, vertex)?)
}

pub fn show(vertex: VertexId, depth: Option<usize>, json: bool) -> CliResult<()> {
    let config = get_config();
    let depth = depth.unwrap_or_else(|| config.max_hierarchy_depth());
    let chain = load_chain(&config.get_graph_path()?, vertex, depth)?;

    if json {
        let entities: Vec<_> = chain.entities().collect();
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }

    for (level, entity) in chain.entities().enumerate() {
        let path = entity
            .path()
            .map(|path| format!(" {}", Colored(Green, path)))
            .unwrap_or_default();
        info!(
            "{}{} {}{}",
            "  ".repeat(level),
            Colored(Cyan, entity.kind()),
            entity.uuid(),
            path
        );
    }
    Ok(())
}

pub fn labels() -> CliResult<()> {
    let registry = coordinates_registry()?;

    for adapter in registry.iter() {
        let depth = registry.depth(adapter.label()).unwrap_or_default();
        match adapter.supertype() {
            Some(supertype) => info!(
                "{}{} extends {}",
                "  ".repeat(depth),
                Colored(Cyan, adapter.label()),
                supertype
            ),
            None => info!(
                "{}{} (root)",
                "  ".repeat(depth),
                Colored(Blue, adapter.label())
            ),
        }
    }
    Ok(())
}

pub fn print_config() -> CliResult<()> {
    let path = config_path();
    let content = match read_optional(&path).map_err(ConfigError::from)? {
        Some(content) => content,
        None => {
            warn!("Config file {} not found", path.display());
            toml::to_string_pretty(&Config::default_config())?
        }
    };
    info!("{}", content);
    Ok(())
}
