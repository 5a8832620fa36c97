//! Brazilian federative units.

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Two-letter code and full name of every federative unit (26 states plus
/// the Federal District).
pub const STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AM", "Amazonas"),
    ("AP", "Amapá"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MG", "Minas Gerais"),
    ("MS", "Mato Grosso do Sul"),
    ("MT", "Mato Grosso"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("PR", "Paraná"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("RS", "Rio Grande do Sul"),
    ("SC", "Santa Catarina"),
    ("SE", "Sergipe"),
    ("SP", "São Paulo"),
    ("TO", "Tocantins"),
];

static STATE_NAMES: Lazy<AHashMap<&'static str, &'static str>> =
    Lazy::new(|| STATES.iter().copied().collect());

/// Look up the full name of a state code.
///
/// Codes are matched as stored in the data file (upper case).
pub fn state_name(code: &str) -> Option<&'static str> {
    STATE_NAMES.get(code).copied()
}

/// Iterate over all federative units in code order.
pub fn all_states() -> impl Iterator<Item = (&'static str, &'static str)> {
    STATES.iter().copied()
}
