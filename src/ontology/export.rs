//! Serializes the store back into RDF for an external reasoner.

use oxrdf::{vocab::rdf, NamedNode, Triple};
use oxrdfio::{RdfFormat, RdfSerializer};

use super::{entities::Ontology, vocab::owl};

/// Returns the retained axioms followed by the current individual facts.
///
/// Inferred memberships are left out so a reasoner always starts from
/// asserted knowledge.
#[must_use]
pub fn to_triples(ontology: &Ontology) -> Vec<Triple> {
    let mut triples = ontology.axioms().to_vec();

    for individual in ontology.individuals() {
        let subject = individual.id().as_named_node().into_owned();
        triples.push(Triple::new(
            subject.clone(),
            rdf::TYPE.into_owned(),
            owl::NAMED_INDIVIDUAL.into_owned(),
        ));
        for class in individual.types() {
            triples.push(Triple::new(
                subject.clone(),
                rdf::TYPE.into_owned(),
                class.as_named_node().into_owned(),
            ));
        }
        for (property, values) in individual.all_values() {
            let predicate: NamedNode = property.as_named_node().into_owned();
            for value in values {
                triples.push(Triple::new(subject.clone(), predicate.clone(), value.clone()));
            }
        }
    }

    for link in ontology.links() {
        triples.push(Triple::new(
            link.subject.as_named_node().into_owned(),
            link.property.as_named_node().into_owned(),
            link.object.as_named_node().into_owned(),
        ));
    }

    triples
}

/// Serializes [`to_triples`] as an N-Triples document.
pub fn to_ntriples(ontology: &Ontology) -> std::io::Result<Vec<u8>> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::NTriples).for_writer(Vec::new());
    for triple in to_triples(ontology) {
        serializer.serialize_triple(&triple)?;
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::{to_ntriples, to_triples};
    use crate::ontology::{
        loader::{load_from_reader, OntologyFormat},
        value_objects::Iri,
    };

    const TURTLE: &str = r#"
@prefix : <http://example.org/myMusic#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .

:Song a owl:Class .
:PopularSong a owl:Class .
:Playlist a owl:Class .
:inPlaylist a owl:ObjectProperty .
:rating a owl:DatatypeProperty .
:Chill a :Playlist .
:GameOver a :Song ; :rating 4.9 ; :inPlaylist :Chill .
"#;

    #[test]
    fn exports_axioms_and_individual_facts() {
        let mut ontology =
            load_from_reader(TURTLE.as_bytes(), OntologyFormat::Turtle, None).expect("parse");
        ontology
            .infer_type(
                &Iri::new("http://example.org/myMusic#GameOver").expect("iri"),
                &Iri::new("http://example.org/myMusic#PopularSong").expect("iri"),
            )
            .expect("infer");

        let rendered: Vec<_> = to_triples(&ontology)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(rendered
            .iter()
            .any(|triple| triple.ends_with("<http://www.w3.org/2002/07/owl#Class>")
                && triple.starts_with("<http://example.org/myMusic#Song>")));
        assert!(rendered.iter().any(|triple| triple
            == "<http://example.org/myMusic#GameOver> <http://example.org/myMusic#inPlaylist> <http://example.org/myMusic#Chill>"));
        assert!(rendered.iter().any(|triple| triple
            .starts_with("<http://example.org/myMusic#GameOver> <http://example.org/myMusic#rating> \"4.9\"")));
        assert!(!rendered.iter().any(|triple| triple.contains("PopularSong>")
            && triple.starts_with("<http://example.org/myMusic#GameOver>")));
    }

    #[test]
    fn ntriples_output_reloads() {
        let ontology =
            load_from_reader(TURTLE.as_bytes(), OntologyFormat::Turtle, None).expect("parse");
        let bytes = to_ntriples(&ontology).expect("serialize");
        let reloaded =
            load_from_reader(bytes.as_slice(), OntologyFormat::NTriples, None).expect("reload");
        assert_eq!(reloaded.individuals().len(), 2);
        assert_eq!(reloaded.links(), ontology.links());
    }
}
