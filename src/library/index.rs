use std::collections::BTreeMap;

use crate::ontology::{Iri, Ontology};

/// Name to individual lookup, one table per indexed class.
///
/// Names are the local part of the individual IRI. When two individuals of
/// the same class share a name, the first one in store order is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameIndex {
    tables: BTreeMap<Iri, BTreeMap<String, Iri>>,
}

impl NameIndex {
    /// Indexes the instances of every class in `classes`.
    #[must_use]
    pub fn build<'a>(ontology: &Ontology, classes: impl IntoIterator<Item = &'a Iri>) -> Self {
        let mut index = Self::default();
        for class in classes {
            let table = index.tables.entry(class.clone()).or_default();
            for individual in ontology.instances_of(class) {
                table
                    .entry(individual.name().to_string())
                    .or_insert_with(|| individual.id().clone());
            }
        }
        index
    }

    /// Registers a newly created individual. Returns `false` when the name is taken.
    pub fn insert(&mut self, class: &Iri, id: Iri) -> bool {
        let table = self.tables.entry(class.clone()).or_default();
        let name = id.local_name().to_string();
        if table.contains_key(&name) {
            return false;
        }
        table.insert(name, id);
        true
    }

    #[must_use]
    pub fn lookup(&self, class: &Iri, name: &str) -> Option<&Iri> {
        self.tables.get(class)?.get(name)
    }

    /// Number of distinct names indexed for `class`.
    #[must_use]
    pub fn len(&self, class: &Iri) -> usize {
        self.tables.get(class).map_or(0, BTreeMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::NameIndex;
    use crate::ontology::{
        loader::{load_from_reader, OntologyFormat},
        Iri,
    };

    const TURTLE: &str = r#"
@prefix : <http://example.org/myMusic#> .
@prefix other: <http://example.org/other#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .

:Song a owl:Class .
:Person a owl:Class .
:EndOfSummer a :Song .
other:EndOfSummer a :Song .
:Mariya a :Person .
"#;

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    #[test]
    fn first_match_in_store_order_wins() {
        let ontology =
            load_from_reader(TURTLE.as_bytes(), OntologyFormat::Turtle, None).expect("parse");
        let song = iri("http://example.org/myMusic#Song");
        let index = NameIndex::build(&ontology, [&song]);

        assert_eq!(index.len(&song), 1);
        assert_eq!(
            index.lookup(&song, "EndOfSummer").map(Iri::as_str),
            Some("http://example.org/myMusic#EndOfSummer")
        );
        assert!(index.lookup(&song, "Mariya").is_none());
    }

    #[test]
    fn insert_keeps_existing_names() {
        let playlist = iri("http://example.org/myMusic#Playlist");
        let mut index = NameIndex::default();
        assert!(index.insert(&playlist, iri("http://example.org/myMusic#MeFavorites")));
        assert!(!index.insert(&playlist, iri("http://example.org/other#MeFavorites")));
        assert_eq!(
            index.lookup(&playlist, "MeFavorites").map(Iri::as_str),
            Some("http://example.org/myMusic#MeFavorites")
        );
    }
}
