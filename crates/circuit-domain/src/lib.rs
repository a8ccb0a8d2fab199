//! circuit-domain: modelo de partes genéticas y red regulatoria.
//!
//! El editor de diseño produce un `RegulatoryGraph` (nodos + aristas). Este
//! crate lo tipa, lo valida cuando se pide y expone `RegulatoryNetwork`, la
//! vista consultable (adyacencia destino -> fuentes y filtros por tipo) que
//! consume el motor de expresión.
pub mod error;
pub mod graph;
pub mod network;
pub mod node;
pub mod part;

pub use error::DomainError;
pub use graph::RegulatoryGraph;
pub use network::RegulatoryNetwork;
pub use node::{Edge, Node, NodeData};
pub use part::{GeneFunction, PartKind, Strength};
