//! Enumeraciones cerradas de las partes genéticas.
//!
//! El editor guarda `strength`, `efficiency` y `function` como strings. Aquí
//! se parsean a variantes cerradas; un valor no reconocido devuelve `None`
//! para que el llamador decida si aplicar el default o fallar.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de nodo. Inmutable una vez creado el nodo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Promoter,
    Gene,
    Terminator,
    Regulatory,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartKind::Promoter => "promoter",
            PartKind::Gene => "gene",
            PartKind::Terminator => "terminator",
            PartKind::Regulatory => "regulatory",
        };
        f.write_str(s)
    }
}

/// Fuerza de un promotor (o eficiencia de un terminador/RBS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl Strength {
    /// Valor aplicado cuando el atributo falta.
    pub const DEFAULT: Strength = Strength::Medium;

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Strength::Low),
            "medium" => Some(Strength::Medium),
            "high" => Some(Strength::High),
            "very high" => Some(Strength::VeryHigh),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Low => "low",
            Strength::Medium => "medium",
            Strength::High => "high",
            Strength::VeryHigh => "very high",
        }
    }

    /// Nivel base de expresión asociado (tabla fija 20/50/80/100).
    pub fn base_level(&self) -> f64 {
        match self {
            Strength::Low => 20.0,
            Strength::Medium => 50.0,
            Strength::High => 80.0,
            Strength::VeryHigh => 100.0,
        }
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Función biológica de un gen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneFunction {
    Reporter,
    Repressor,
    Activator,
    Enzyme,
    Other,
}

impl GeneFunction {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "reporter" => Some(GeneFunction::Reporter),
            "repressor" => Some(GeneFunction::Repressor),
            "activator" => Some(GeneFunction::Activator),
            "enzyme" => Some(GeneFunction::Enzyme),
            "other" => Some(GeneFunction::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_lookup_table() {
        assert_eq!(Strength::from_label("low").map(|s| s.base_level()), Some(20.0));
        assert_eq!(Strength::from_label("medium").map(|s| s.base_level()), Some(50.0));
        assert_eq!(Strength::from_label("high").map(|s| s.base_level()), Some(80.0));
        assert_eq!(Strength::from_label("very high").map(|s| s.base_level()), Some(100.0));
        assert_eq!(Strength::default(), Strength::Medium);
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(Strength::from_label("High"), None);
        assert_eq!(GeneFunction::from_label("Reporter"), None);
    }

    #[test]
    fn strength_serializes_with_space() {
        let s = serde_json::to_string(&Strength::VeryHigh).unwrap();
        assert_eq!(s, "\"very high\"");
        let k: PartKind = serde_json::from_str("\"regulatory\"").unwrap();
        assert_eq!(k, PartKind::Regulatory);
    }
}
