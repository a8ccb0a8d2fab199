//! Vista consultable de un `RegulatoryGraph`.
//!
//! `RegulatoryNetwork` es dueña de una copia del grafo (snapshot tomado al
//! construirla), de modo que ediciones posteriores del diseño no afectan a
//! una simulación en curso. La adyacencia se indexa por destino y conserva el
//! orden de declaración de las aristas.
use indexmap::IndexMap;

use crate::graph::RegulatoryGraph;
use crate::node::Node;
use crate::part::{GeneFunction, PartKind};

#[derive(Debug, Clone)]
pub struct RegulatoryNetwork {
    graph: RegulatoryGraph,
    incoming: IndexMap<String, Vec<String>>,
    reporters: Vec<usize>,
    repressors: Vec<usize>,
    promoters: Vec<usize>,
}

impl RegulatoryNetwork {
    /// Construye la red a partir de un snapshot del grafo. No valida nada más
    /// allá de los filtros por tipo.
    pub fn new(graph: RegulatoryGraph) -> Self {
        let mut incoming: IndexMap<String, Vec<String>> = IndexMap::new();
        for edge in &graph.edges {
            incoming
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }
        let indices = |pred: &dyn Fn(&Node) -> bool| -> Vec<usize> {
            graph
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| pred(n))
                .map(|(i, _)| i)
                .collect()
        };
        let reporters = indices(&|n: &Node| n.is_gene_with(GeneFunction::Reporter));
        let repressors = indices(&|n: &Node| n.is_gene_with(GeneFunction::Repressor));
        let promoters = indices(&|n: &Node| n.kind() == PartKind::Promoter);
        Self {
            graph,
            incoming,
            reporters,
            repressors,
            promoters,
        }
    }

    pub fn from_graph(graph: &RegulatoryGraph) -> Self {
        Self::new(graph.clone())
    }

    pub fn graph(&self) -> &RegulatoryGraph {
        &self.graph
    }

    /// Genes con `function = reporter`, en orden de declaración.
    pub fn reporters(&self) -> impl Iterator<Item = &Node> + '_ {
        self.reporters.iter().map(move |&i| &self.graph.nodes[i])
    }

    /// Genes con `function = repressor`, en orden de declaración.
    pub fn repressors(&self) -> impl Iterator<Item = &Node> + '_ {
        self.repressors.iter().map(move |&i| &self.graph.nodes[i])
    }

    pub fn promoters(&self) -> impl Iterator<Item = &Node> + '_ {
        self.promoters.iter().map(move |&i| &self.graph.nodes[i])
    }

    /// Ids de los nodos con una arista hacia `node_id`, en orden de aristas.
    /// Un nodo sin aristas entrantes devuelve un slice vacío.
    pub fn sources_targeting(&self, node_id: &str) -> &[String] {
        self.incoming.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nombres visibles de los reporters (puede haber repetidos).
    pub fn reporter_names(&self) -> Vec<String> {
        self.reporters()
            .map(|n| n.display_name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Edge, NodeData};

    fn sample() -> RegulatoryGraph {
        RegulatoryGraph::new(
            vec![
                Node::promoter("p1", NodeData::named("pLac").with_strength("high")),
                Node::gene("g1", NodeData::named("GFP").with_function("reporter")),
                Node::gene("g2", NodeData::named("LacI").with_function("repressor")),
                Node::promoter("p2", NodeData::named("pTet")),
                Node::gene("g3", NodeData::named("RFP").with_function("reporter")),
            ],
            vec![
                Edge::new("e1", "p2", "g1"),
                Edge::new("e2", "p1", "g1"),
                Edge::new("e3", "p1", "g2"),
            ],
        )
    }

    #[test]
    fn typed_lookups_keep_declaration_order() {
        let net = RegulatoryNetwork::new(sample());
        let reporters: Vec<&str> = net.reporters().map(|n| n.id()).collect();
        assert_eq!(reporters, vec!["g1", "g3"]);
        let promoters: Vec<&str> = net.promoters().map(|n| n.id()).collect();
        assert_eq!(promoters, vec!["p1", "p2"]);
        assert_eq!(net.repressors().count(), 1);
    }

    #[test]
    fn sources_follow_edge_order() {
        let net = RegulatoryNetwork::new(sample());
        assert_eq!(net.sources_targeting("g1"), &["p2".to_string(), "p1".to_string()]);
        assert!(net.sources_targeting("g3").is_empty());
        assert!(net.sources_targeting("missing").is_empty());
    }

    #[test]
    fn snapshot_is_independent_of_caller_graph() {
        let mut g = sample();
        let net = RegulatoryNetwork::from_graph(&g);
        g.nodes.clear();
        assert_eq!(
            net.reporter_names(),
            vec!["GFP".to_string(), "RFP".to_string()]
        );
    }
}
