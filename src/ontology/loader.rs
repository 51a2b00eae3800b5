//! Builds an [`Ontology`] aggregate out of an RDF document.
//!
//! Classes, properties, named individuals and their assertions are lifted into
//! the aggregate. Everything else (class axioms, restrictions, rules,
//! annotations on individuals) is retained verbatim as axiom triples so a
//! reasoner later receives the complete document.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use oxrdf::{
    vocab::{rdf, rdfs},
    Literal, Term, Triple,
};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    entities::{Class, Individual, Ontology, OntologyError, Property, PropertyKind},
    value_objects::{Iri, IriError},
    vocab::owl,
};

const UNNAMED_ONTOLOGY: &str = "urn:music-ontology:unnamed";

/// Serialization formats accepted for the ontology file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OntologyFormat {
    RdfXml,
    Turtle,
    NTriples,
}

impl OntologyFormat {
    /// Guesses the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "owl" | "rdf" | "xml" => Some(Self::RdfXml),
            "ttl" | "turtle" => Some(Self::Turtle),
            "nt" | "ntriples" => Some(Self::NTriples),
            _ => None,
        }
    }

    const fn rdf_format(self) -> RdfFormat {
        match self {
            Self::RdfXml => RdfFormat::RdfXml,
            Self::Turtle => RdfFormat::Turtle,
            Self::NTriples => RdfFormat::NTriples,
        }
    }
}

/// Errors raised while reading an ontology document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read ontology `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot detect the RDF format of `{path}`, set `ontology.format`")]
    UnknownFormat { path: PathBuf },
    #[error("invalid base IRI `{0}`")]
    BaseIri(String),
    #[error("malformed RDF: {0}")]
    Parse(#[from] RdfParseError),
    #[error(transparent)]
    Iri(#[from] IriError),
    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

/// Loads the ontology stored at `path`.
///
/// The format is taken from `format` when given, otherwise from the file extension.
pub fn load_file(path: &Path, format: Option<OntologyFormat>) -> Result<Ontology, LoadError> {
    let format = format
        .or_else(|| OntologyFormat::from_path(path))
        .ok_or_else(|| LoadError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ontology = load_from_reader(BufReader::new(file), format, None)?;
    info!(
        path = %path.display(),
        classes = ontology.classes().len(),
        individuals = ontology.individuals().len(),
        links = ontology.links().len(),
        "ontology_loaded"
    );
    Ok(ontology)
}

/// Parses an ontology document from any reader.
pub fn load_from_reader(
    reader: impl Read,
    format: OntologyFormat,
    base_iri: Option<&str>,
) -> Result<Ontology, LoadError> {
    let mut parser = RdfParser::from_format(format.rdf_format());
    if let Some(base) = base_iri {
        parser = parser
            .with_base_iri(base)
            .map_err(|_| LoadError::BaseIri(base.to_owned()))?;
    }
    let triples = parser
        .for_reader(reader)
        .map(|quad| quad.map(Triple::from))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(triples = triples.len(), ?format, "ontology_parsed");
    build(triples)
}

/// Lifts parsed triples into an ontology aggregate.
pub fn build(triples: Vec<Triple>) -> Result<Ontology, LoadError> {
    let declarations = Declarations::collect(&triples);

    let id = match &declarations.ontology {
        Some(id) => id.clone(),
        None => Iri::new(UNNAMED_ONTOLOGY)?,
    };
    let mut ontology = Ontology::new(id.clone());
    if let Some(label) = declarations.labels.get(&id) {
        ontology = ontology.with_label(label.clone());
    }

    for id in &declarations.classes {
        let mut class = Class::new(id.clone());
        for parent in declarations.parents.get(id).into_iter().flatten() {
            class.add_parent(parent.clone());
        }
        ontology.add_class(class)?;
    }

    for (id, kind) in &declarations.properties {
        let mut property = Property::new(id.clone(), *kind);
        for domain in declarations.domains.get(id).into_iter().flatten() {
            if declarations.is_class(domain) {
                property.add_domain(domain.clone());
            }
        }
        for range in declarations.ranges.get(id).into_iter().flatten() {
            if declarations.is_class(range) {
                property.add_range(range.clone());
            }
        }
        ontology.add_property(property)?;
    }

    for (id, types) in declarations.individuals() {
        let mut individual = Individual::new(id);
        for class in types {
            individual.assert_type(class);
        }
        ontology.add_individual(individual)?;
    }

    for triple in triples {
        match classify(&ontology, &triple) {
            Fact::Type => {}
            Fact::Value {
                subject,
                property,
                value,
            } => ontology.add_value(&subject, &property, value)?,
            Fact::Link {
                subject,
                property,
                object,
            } => {
                if ontology.individual(&object).is_none() {
                    debug!(%object, "ontology_untyped_individual");
                    ontology.add_individual(Individual::new(object.clone()))?;
                }
                ontology.link(&subject, &property, &object)?;
            }
            Fact::Axiom => ontology.add_axiom(triple),
        }
    }

    Ok(ontology)
}

enum Fact {
    Type,
    Value {
        subject: Iri,
        property: Iri,
        value: Literal,
    },
    Link {
        subject: Iri,
        property: Iri,
        object: Iri,
    },
    Axiom,
}

fn classify(ontology: &Ontology, triple: &Triple) -> Fact {
    let Some(subject) = subject_iri(triple).filter(|id| ontology.individual(id).is_some()) else {
        return Fact::Axiom;
    };

    if triple.predicate.as_ref() == rdf::TYPE {
        return match named(&triple.object) {
            Some(class)
                if ontology.class(&class).is_some()
                    || class.as_named_node() == owl::NAMED_INDIVIDUAL =>
            {
                Fact::Type
            }
            _ => Fact::Axiom,
        };
    }

    let property = Iri::from(triple.predicate.clone());
    let Some(kind) = ontology.property(&property).map(Property::kind) else {
        return Fact::Axiom;
    };

    match (kind, &triple.object) {
        (PropertyKind::Data, Term::Literal(value)) => Fact::Value {
            subject,
            property,
            value: value.clone(),
        },
        (PropertyKind::Object, Term::NamedNode(node)) => {
            let object = Iri::from(node.clone());
            if ontology.class(&object).is_some()
                || ontology.property(&object).is_some()
                || object == *ontology.id()
            {
                warn!(%subject, %property, %object, "ontology_link_target_not_individual");
                Fact::Axiom
            } else {
                Fact::Link {
                    subject,
                    property,
                    object,
                }
            }
        }
        _ => {
            warn!(%subject, %property, "ontology_assertion_kind_mismatch");
            Fact::Axiom
        }
    }
}

/// Entity declarations gathered in a first pass over the document.
#[derive(Default)]
struct Declarations {
    ontology: Option<Iri>,
    classes: Vec<Iri>,
    properties: Vec<(Iri, PropertyKind)>,
    named_individuals: BTreeSet<Iri>,
    labels: BTreeMap<Iri, String>,
    parents: BTreeMap<Iri, Vec<Iri>>,
    domains: BTreeMap<Iri, Vec<Iri>>,
    ranges: BTreeMap<Iri, Vec<Iri>>,
    typed: Vec<(Iri, Iri)>,
}

impl Declarations {
    fn collect(triples: &[Triple]) -> Self {
        let mut declarations = Self::default();
        for triple in triples {
            let Some(subject) = subject_iri(triple) else {
                continue;
            };
            let predicate = triple.predicate.as_ref();
            let object = named(&triple.object);

            if predicate == rdf::TYPE {
                let Some(object) = object else { continue };
                let node = object.as_named_node();
                if node == owl::ONTOLOGY {
                    declarations.ontology.get_or_insert(subject);
                } else if node == owl::CLASS || node == rdfs::CLASS {
                    declarations.declare_class(subject);
                } else if node == owl::OBJECT_PROPERTY {
                    declarations.declare_property(subject, PropertyKind::Object);
                } else if node == owl::DATATYPE_PROPERTY {
                    declarations.declare_property(subject, PropertyKind::Data);
                } else if node == owl::NAMED_INDIVIDUAL {
                    declarations.named_individuals.insert(subject.clone());
                    declarations.typed.push((subject, object));
                } else {
                    declarations.typed.push((subject, object));
                }
            } else if predicate == rdfs::SUB_CLASS_OF {
                if let Some(parent) = object {
                    declarations.parents.entry(subject).or_default().push(parent);
                }
            } else if predicate == rdfs::DOMAIN {
                if let Some(domain) = object {
                    declarations.domains.entry(subject).or_default().push(domain);
                }
            } else if predicate == rdfs::RANGE {
                if let Some(range) = object {
                    declarations.ranges.entry(subject).or_default().push(range);
                }
            } else if predicate == rdfs::LABEL {
                if let Term::Literal(label) = &triple.object {
                    declarations
                        .labels
                        .entry(subject)
                        .or_insert_with(|| label.value().to_owned());
                }
            }
        }
        declarations
    }

    fn declare_class(&mut self, id: Iri) {
        if !self.classes.contains(&id) {
            self.classes.push(id);
        }
    }

    fn declare_property(&mut self, id: Iri, kind: PropertyKind) {
        if !self.properties.iter().any(|(known, _)| *known == id) {
            self.properties.push((id, kind));
        }
    }

    fn is_class(&self, id: &Iri) -> bool {
        self.classes.contains(id)
    }

    fn is_schema_entity(&self, id: &Iri) -> bool {
        self.ontology.as_ref() == Some(id)
            || self.is_class(id)
            || self.properties.iter().any(|(known, _)| known == id)
    }

    /// Named individuals with their declared classes, in order of first appearance.
    fn individuals(&self) -> Vec<(Iri, Vec<Iri>)> {
        let mut order: Vec<Iri> = Vec::new();
        let mut types: BTreeMap<Iri, Vec<Iri>> = BTreeMap::new();
        for (subject, class) in &self.typed {
            let is_member = self.is_class(class);
            if !is_member && !self.named_individuals.contains(subject) {
                continue;
            }
            if self.is_schema_entity(subject) {
                continue;
            }
            let entry = types.entry(subject.clone()).or_insert_with(|| {
                order.push(subject.clone());
                Vec::new()
            });
            if is_member && !entry.contains(class) {
                entry.push(class.clone());
            }
        }
        order
            .into_iter()
            .map(|id| {
                let classes = types.remove(&id).unwrap_or_default();
                (id, classes)
            })
            .collect()
    }
}

fn subject_iri(triple: &Triple) -> Option<Iri> {
    named(&Term::from(triple.subject.clone()))
}

fn named(term: &Term) -> Option<Iri> {
    match term {
        Term::NamedNode(node) => Some(Iri::from(node.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{load_file, load_from_reader, LoadError, OntologyFormat};
    use crate::ontology::{value_objects::Iri, PropertyKind};

    const TURTLE: &str = r#"
@prefix : <http://example.org/myMusic#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

<http://example.org/myMusic> a owl:Ontology ; rdfs:label "My music" .
:Song a owl:Class .
:Person a owl:Class .
:Artist a owl:Class ; rdfs:subClassOf :Person .
:hasArtist a owl:ObjectProperty , owl:FunctionalProperty ; rdfs:domain :Song ; rdfs:range :Artist .
:duration a owl:DatatypeProperty ; rdfs:range xsd:integer .

:Asake a owl:NamedIndividual , :Artist ; rdfs:label "Asake" .
:LonelyAtTheTop a :Song ; :hasArtist :Asake ; :duration 189 .
:Ghost :hasArtist :Asake .
"#;

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            OntologyFormat::from_path(Path::new("data/my_music_extended.rdf.owl")),
            Some(OntologyFormat::RdfXml)
        );
        assert_eq!(
            OntologyFormat::from_path(Path::new("music.TTL")),
            Some(OntologyFormat::Turtle)
        );
        assert_eq!(
            OntologyFormat::from_path(Path::new("music.nt")),
            Some(OntologyFormat::NTriples)
        );
        assert_eq!(OntologyFormat::from_path(Path::new("music.json")), None);
    }

    #[test]
    fn lifts_declarations_and_assertions() {
        let ontology = load_from_reader(TURTLE.as_bytes(), OntologyFormat::Turtle, None)
            .expect("ontology parses");

        assert_eq!(ontology.id().as_str(), "http://example.org/myMusic");
        assert_eq!(ontology.label(), Some("My music"));
        assert_eq!(ontology.classes().len(), 3);

        let artist = ontology
            .class(&iri("http://example.org/myMusic#Artist"))
            .expect("artist class");
        assert!(artist
            .parents()
            .contains(&iri("http://example.org/myMusic#Person")));

        let has_artist = ontology
            .property(&iri("http://example.org/myMusic#hasArtist"))
            .expect("hasArtist");
        assert_eq!(has_artist.kind(), PropertyKind::Object);

        let duration = ontology
            .property(&iri("http://example.org/myMusic#duration"))
            .expect("duration");
        assert!(duration.ranges().is_empty(), "datatype ranges are not classes");

        let names: Vec<_> = ontology
            .individuals()
            .iter()
            .map(|individual| individual.name())
            .collect();
        assert_eq!(names, vec!["Asake", "LonelyAtTheTop"]);

        let song = ontology
            .individual(&iri("http://example.org/myMusic#LonelyAtTheTop"))
            .expect("song");
        assert_eq!(
            song.value(&iri("http://example.org/myMusic#duration"))
                .map(|literal| literal.value()),
            Some("189")
        );
        assert_eq!(ontology.links().len(), 1);
    }

    #[test]
    fn keeps_unmodelled_triples_as_axioms() {
        let ontology = load_from_reader(TURTLE.as_bytes(), OntologyFormat::Turtle, None)
            .expect("ontology parses");
        let axioms: Vec<_> = ontology
            .axioms()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(axioms
            .iter()
            .any(|triple| triple.contains("Ghost") && triple.contains("hasArtist")));
        assert!(axioms
            .iter()
            .any(|triple| triple.contains("#Asake") && triple.contains("rdf-schema#label")));
        assert!(!axioms.iter().any(|triple| triple.contains("#duration> \"189")));
    }

    #[test]
    fn untyped_link_targets_become_individuals() {
        let document = r#"
@prefix : <http://example.org/myMusic#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .

:Song a owl:Class .
:hasArtist a owl:ObjectProperty .
:GameOver a :Song ; :hasArtist :Adele .
:EndOfSummer a :Song ; :hasArtist :Song .
"#;
        let ontology = load_from_reader(document.as_bytes(), OntologyFormat::Turtle, None)
            .expect("ontology parses");

        let adele = ontology
            .individual(&iri("http://example.org/myMusic#Adele"))
            .expect("link target kept");
        assert!(adele.types().is_empty());

        let has_artist = iri("http://example.org/myMusic#hasArtist");
        let game_over = iri("http://example.org/myMusic#GameOver");
        let artists: Vec<_> = ontology
            .objects(&game_over, &has_artist)
            .map(Iri::local_name)
            .collect();
        assert_eq!(artists, vec!["Adele"]);

        assert_eq!(ontology.links().len(), 1, "class targets stay axioms");
        assert!(ontology
            .individual(&iri("http://example.org/myMusic#Song"))
            .is_none());
    }

    #[test]
    fn parses_rdf_xml_with_base() {
        let document = r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xmlns:music="http://example.org/myMusic#">
  <owl:Class rdf:about="#Playlist"/>
  <music:Playlist rdf:about="#ChillVibes"/>
</rdf:RDF>"##;
        let ontology = load_from_reader(
            document.as_bytes(),
            OntologyFormat::RdfXml,
            Some("http://example.org/myMusic"),
        )
        .expect("ontology parses");
        assert!(ontology
            .individual(&iri("http://example.org/myMusic#ChillVibes"))
            .is_some());
        assert_eq!(ontology.id().as_str(), "urn:music-ontology:unnamed");
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = load_from_reader(
            "<http://example.org/a> <http://example.org/b> .".as_bytes(),
            OntologyFormat::NTriples,
            None,
        )
        .expect_err("missing object");
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn reports_missing_files() {
        let err = load_file(Path::new("does/not/exist.owl"), None).expect_err("missing file");
        assert!(matches!(err, LoadError::Io { .. }));

        let err = load_file(Path::new("does/not/exist.json"), None).expect_err("unknown format");
        assert!(matches!(err, LoadError::UnknownFormat { .. }));
    }
}
