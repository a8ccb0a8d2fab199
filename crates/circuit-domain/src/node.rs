//! Nodos y aristas tal como los serializa el editor de diseño.
//!
//! `NodeData` conserva la forma de cable (strings para los atributos
//! enumerados, claves extra preservadas) y `Node` expone accesores tipados
//! que reportan valores no reconocidos en vez de ocultarlos.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::part::{GeneFunction, PartKind, Strength};
use crate::DomainError;

/// Atributos específicos del tipo de nodo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id lógico de la parte (distinto del id del nodo en el grafo). Los
    /// represores lo referencian desde `targets`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inducible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    /// Claves que el motor no interpreta (p. ej. `description`, `sequence`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_logical_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_strength(mut self, strength: impl Into<String>) -> Self {
        self.strength = Some(strength.into());
        self
    }

    pub fn with_efficiency(mut self, efficiency: impl Into<String>) -> Self {
        self.efficiency = Some(efficiency.into());
        self
    }

    pub fn with_inducible(mut self, inducible: bool) -> Self {
        self.inducible = Some(inducible);
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }
}

/// Nodo del grafo regulatorio. `kind` no tiene setter: el tipo es fijo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    #[serde(rename = "type")]
    kind: PartKind,
    #[serde(default)]
    data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: PartKind, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind,
            data,
        }
    }

    pub fn promoter(id: impl Into<String>, data: NodeData) -> Self {
        Self::new(id, PartKind::Promoter, data)
    }

    pub fn gene(id: impl Into<String>, data: NodeData) -> Self {
        Self::new(id, PartKind::Gene, data)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Nombre visible del nodo; si `data.name` falta se usa el id del nodo.
    pub fn display_name(&self) -> &str {
        self.data.name.as_deref().unwrap_or(&self.id)
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.data.id.as_deref()
    }

    pub fn is_inducible(&self) -> bool {
        self.data.inducible.unwrap_or(false)
    }

    pub fn color(&self) -> Option<&str> {
        self.data.color.as_deref()
    }

    pub fn targets(&self) -> &[String] {
        self.data.targets.as_deref().unwrap_or(&[])
    }

    /// `Ok(None)` si el atributo falta; error si el valor no es reconocido.
    pub fn strength(&self) -> Result<Option<Strength>, DomainError> {
        self.parse_attr(
            "strength",
            self.data.strength.as_deref(),
            Strength::from_label,
        )
    }

    pub fn efficiency(&self) -> Result<Option<Strength>, DomainError> {
        self.parse_attr(
            "efficiency",
            self.data.efficiency.as_deref(),
            Strength::from_label,
        )
    }

    pub fn function(&self) -> Result<Option<GeneFunction>, DomainError> {
        self.parse_attr(
            "function",
            self.data.function.as_deref(),
            GeneFunction::from_label,
        )
    }

    /// Gen cuya función es exactamente `f`. Funciones no reconocidas nunca
    /// coinciden.
    pub fn is_gene_with(&self, f: GeneFunction) -> bool {
        self.kind == PartKind::Gene && matches!(self.function(), Ok(Some(g)) if g == f)
    }

    /// Comprueba que `data` tenga la forma que corresponde a `kind` y que los
    /// atributos enumerados sean reconocidos.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "node id must not be empty".to_string(),
            ));
        }
        match self.kind {
            PartKind::Promoter | PartKind::Regulatory => {
                self.strength()?;
            }
            PartKind::Gene => {
                self.function()?;
            }
            PartKind::Terminator => {
                self.efficiency()?;
            }
        }
        // `function` de elementos regulatorios es texto libre (binding, translation...)
        let data = &self.data;
        let misplaced: Vec<(&str, bool)> = match self.kind {
            PartKind::Promoter => vec![
                ("function", data.function.is_some()),
                ("targets", data.targets.is_some()),
            ],
            PartKind::Gene => vec![
                ("strength", data.strength.is_some()),
                ("inducible", data.inducible.is_some()),
            ],
            PartKind::Terminator => vec![
                ("function", data.function.is_some()),
                ("inducible", data.inducible.is_some()),
            ],
            PartKind::Regulatory => vec![("inducible", data.inducible.is_some())],
        };
        if let Some((attr, _)) = misplaced.iter().find(|(_, present)| *present) {
            return Err(DomainError::ValidationError(format!(
                "node '{}': attribute '{}' is not valid for a {}",
                self.id, attr, self.kind
            )));
        }
        Ok(())
    }

    fn parse_attr<T>(
        &self,
        attribute: &'static str,
        raw: Option<&str>,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>, DomainError> {
        match raw {
            None => Ok(None),
            Some(v) => parse(v).map(Some).ok_or_else(|| DomainError::UnknownAttribute {
                node: self.id.clone(),
                attribute,
                value: v.to_string(),
            }),
        }
    }
}

/// Arista dirigida: `source` regula/alimenta a `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}
