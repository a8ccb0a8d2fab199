//! Grafo regulatorio tal como lo entrega el editor de diseño.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::node::{Edge, Node};
use crate::DomainError;

/// Secuencia ordenada de nodos y aristas. El motor sólo la lee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl RegulatoryGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Validación estructural completa: ids únicos, aristas hacia nodos
    /// existentes y `data` coherente con el tipo de cada nodo.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(DomainError::DuplicateNode(node.id().to_string()));
            }
            node.validate()?;
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(DomainError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
