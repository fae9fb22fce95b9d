use std::{fs, path::Path};

use nu_ansi_term::Color::{Cyan, Green};
use strongbox_config::config::get_config;
use strongbox_db::{
    coordinates::{artifact_coordinates_adapter, ArtifactCoordinates},
    Hierarchy, HierarchyEntity,
};
use strongbox_graph::{MemoryGraph, VertexId};
use strongbox_utils::path::resolve_path;
use tracing::{debug, info};

use crate::{
    error::{CliError, CliResult, ErrorContext},
    utils::Colored,
};

pub fn read_chain(path: &Path) -> CliResult<Hierarchy<ArtifactCoordinates>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading coordinates chain {}", path.display()))?;
    let chain: Vec<ArtifactCoordinates> =
        serde_json::from_str(&content).map_err(|source| CliError::InvalidChain {
            path: path.to_path_buf(),
            source,
        })?;

    Hierarchy::from_chain(chain).ok_or_else(|| CliError::EmptyChain(path.to_path_buf()))
}

/// Persists `chain` into the snapshot at `graph_path` and returns the leaf vertex.
pub fn store_chain(
    graph_path: &Path,
    chain: &Hierarchy<ArtifactCoordinates>,
    max_depth: usize,
) -> CliResult<VertexId> {
    let adapter = artifact_coordinates_adapter(max_depth)?;
    let mut graph = MemoryGraph::open(graph_path)?;

    let unfold = adapter.unfold(chain)?;
    let leaf = unfold.execute(&mut graph)?;
    graph.save(graph_path)?;

    debug!(
        "graph {} now holds {} vertices, {} edges",
        graph_path.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(leaf)
}

pub fn store(file: &str, json: bool) -> CliResult<()> {
    let config = get_config();
    let graph_path = config.get_graph_path()?;
    let chain = read_chain(&resolve_path(file)?)?;

    let leaf = store_chain(&graph_path, &chain, config.max_hierarchy_depth())?;

    if json {
        println!("{}", serde_json::json!({ "vertex": leaf.0 }));
    } else {
        let entity = chain.leaf();
        info!(
            "Stored {} {} as {}",
            Colored(Cyan, entity.kind()),
            entity.uuid(),
            Colored(Green, leaf)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const CHAIN: &str = r#"[
        { "type": "generic", "uuid": "a-1", "version": "20.1.0" },
        { "type": "npm", "uuid": "a-1", "scope": "@types", "name": "node", "version": "20.1.0" }
    ]"#;

    #[test]
    fn test_store_chain_twice() {
        let dir = tempdir().unwrap();
        let chain_path = dir.path().join("chain.json");
        let graph_path = dir.path().join("graph/graph.json");
        fs::write(&chain_path, CHAIN).unwrap();

        let chain = read_chain(&chain_path).unwrap();
        assert_eq!(chain.len(), 2);

        let first = store_chain(&graph_path, &chain, 5).unwrap();
        let second = store_chain(&graph_path, &chain, 5).unwrap();
        assert_eq!(first, second);

        let graph = MemoryGraph::open(&graph_path).unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_read_chain_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain.json");

        fs::write(&path, "[]").unwrap();
        assert!(matches!(read_chain(&path), Err(CliError::EmptyChain(_))));

        fs::write(&path, r#"[{ "type": "docker" }]"#).unwrap();
        assert!(matches!(
            read_chain(&path),
            Err(CliError::InvalidChain { .. })
        ));

        assert!(matches!(
            read_chain(&dir.path().join("missing.json")),
            Err(CliError::IoError { .. })
        ));
    }
}
