use std::collections::{BTreeMap, BTreeSet, VecDeque};

use oxrdf::{Literal, Triple};
use serde::Serialize;
use thiserror::Error;

use super::value_objects::Iri;

/// Ontology class definition capturing parent relationships and metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    id: Iri,
    super_classes: BTreeSet<Iri>,
}

impl Class {
    /// Creates a new [`Class`] with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            super_classes: BTreeSet::new(),
        }
    }

    /// Adds a new parent class relation.
    pub fn add_parent(&mut self, parent: Iri) -> bool {
        self.super_classes.insert(parent)
    }

    /// Returns the unique identifier of the class.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the parent classes in lexical order.
    #[must_use]
    pub fn parents(&self) -> &BTreeSet<Iri> {
        &self.super_classes
    }
}

/// Ontology property definition supporting object and data properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    id: Iri,
    kind: PropertyKind,
    domains: BTreeSet<Iri>,
    ranges: BTreeSet<Iri>,
}

impl Property {
    /// Creates a new property with the provided identifier and kind.
    #[must_use]
    pub fn new(id: Iri, kind: PropertyKind) -> Self {
        Self {
            id,
            kind,
            domains: BTreeSet::new(),
            ranges: BTreeSet::new(),
        }
    }

    /// Declares that the property applies to the supplied domain class.
    pub fn add_domain(&mut self, class: Iri) -> bool {
        self.domains.insert(class)
    }

    /// Declares that the property produces values from the supplied range class.
    pub fn add_range(&mut self, class: Iri) -> bool {
        self.ranges.insert(class)
    }

    /// Returns the property identifier.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the property kind.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the registered domain classes.
    #[must_use]
    pub fn domains(&self) -> &BTreeSet<Iri> {
        &self.domains
    }

    /// Returns the registered range classes.
    #[must_use]
    pub fn ranges(&self) -> &BTreeSet<Iri> {
        &self.ranges
    }
}

/// Classifies the type of values a property can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// Object properties link individuals.
    Object,
    /// Data properties capture literal values.
    Data,
}

/// An object property edge between two individuals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub subject: Iri,
    pub property: Iri,
    pub object: Iri,
}

/// Freshness of reasoner-derived class memberships.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceState {
    /// No reasoner ran against the store yet.
    #[default]
    NotRun,
    /// Inferred memberships match the current facts.
    Fresh,
    /// Facts changed after the last reasoner run.
    Stale,
}

impl std::fmt::Display for InferenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotRun => "not run",
            Self::Fresh => "fresh",
            Self::Stale => "stale",
        })
    }
}

/// An ontology individual carrying class memberships and literal values.
///
/// Asserted types come from the source document; inferred types are owned by
/// the reasoner and replaced on every run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    id: Iri,
    types: BTreeSet<Iri>,
    inferred_types: BTreeSet<Iri>,
    values: BTreeMap<Iri, Vec<Literal>>,
}

impl Individual {
    /// Creates a new individual with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            types: BTreeSet::new(),
            inferred_types: BTreeSet::new(),
            values: BTreeMap::new(),
        }
    }

    /// Declares that the individual is an instance of the given class.
    pub fn assert_type(&mut self, class: Iri) -> bool {
        self.types.insert(class)
    }

    /// Attaches a literal value for a data property.
    pub fn add_value(&mut self, property: Iri, value: Literal) {
        self.values.entry(property).or_default().push(value);
    }

    /// Returns the identifier of the individual.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the short name used as lookup key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.local_name()
    }

    /// Returns the asserted types.
    #[must_use]
    pub fn types(&self) -> &BTreeSet<Iri> {
        &self.types
    }

    /// Whether the individual is directly a member of `class`, asserted or inferred.
    #[must_use]
    pub fn has_type(&self, class: &Iri) -> bool {
        self.types.contains(class) || self.inferred_types.contains(class)
    }

    /// Returns all literal values held for `property`.
    #[must_use]
    pub fn values(&self, property: &Iri) -> &[Literal] {
        self.values
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the first literal held for `property`, if any.
    #[must_use]
    pub fn value(&self, property: &Iri) -> Option<&Literal> {
        self.values(property).first()
    }

    /// Returns every data property with its literal values.
    #[must_use]
    pub fn all_values(&self) -> &BTreeMap<Iri, Vec<Literal>> {
        &self.values
    }

    fn infer_type(&mut self, class: Iri) -> bool {
        if self.types.contains(&class) {
            return false;
        }
        self.inferred_types.insert(class)
    }
}

/// Aggregates ontology classes, properties, individuals and their edges.
///
/// Individuals and links are kept in insertion order: loading preserves
/// document order and runtime additions are appended.
#[derive(Clone, Debug, PartialEq)]
pub struct Ontology {
    id: Iri,
    label: Option<String>,
    classes: BTreeMap<Iri, Class>,
    properties: BTreeMap<Iri, Property>,
    individuals: Vec<Individual>,
    positions: BTreeMap<Iri, usize>,
    links: Vec<Link>,
    axioms: Vec<Triple>,
    inference: InferenceState,
}

impl Ontology {
    /// Creates a new ontology aggregate with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            classes: BTreeMap::new(),
            properties: BTreeMap::new(),
            individuals: Vec::new(),
            positions: BTreeMap::new(),
            links: Vec::new(),
            axioms: Vec::new(),
            inference: InferenceState::NotRun,
        }
    }

    /// Sets a human readable label for the ontology.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a class to the ontology, enforcing unique identifiers.
    pub fn add_class(&mut self, class: Class) -> Result<(), OntologyError> {
        let id = class.id().clone();
        if self.classes.contains_key(&id) {
            return Err(OntologyError::DuplicateClass(id));
        }
        self.classes.insert(id, class);
        Ok(())
    }

    /// Adds a property to the ontology, validating references to known classes.
    pub fn add_property(&mut self, property: Property) -> Result<(), OntologyError> {
        let id = property.id().clone();
        if self.properties.contains_key(&id) {
            return Err(OntologyError::DuplicateProperty(id));
        }

        for class in property.domains().iter().chain(property.ranges()) {
            if !self.classes.contains_key(class) {
                return Err(OntologyError::MissingClass {
                    ontology: self.id.clone(),
                    class: class.clone(),
                });
            }
        }

        self.properties.insert(id, property);
        Ok(())
    }

    /// Adds an individual ensuring it references known classes and data properties.
    pub fn add_individual(&mut self, individual: Individual) -> Result<(), OntologyError> {
        let id = individual.id().clone();
        if self.positions.contains_key(&id) {
            return Err(OntologyError::DuplicateIndividual(id));
        }

        for class in individual.types() {
            self.require_class(class)?;
        }
        for property in individual.all_values().keys() {
            self.require_property(property, PropertyKind::Data)?;
        }

        self.positions.insert(id, self.individuals.len());
        self.individuals.push(individual);
        self.touch();
        Ok(())
    }

    /// Appends a literal value to an existing individual.
    pub fn add_value(
        &mut self,
        individual: &Iri,
        property: &Iri,
        value: Literal,
    ) -> Result<(), OntologyError> {
        self.require_property(property, PropertyKind::Data)?;
        let index = self.position(individual)?;
        self.individuals[index].add_value(property.clone(), value);
        self.touch();
        Ok(())
    }

    /// Appends an object property edge.
    ///
    /// Edges behave as a set: asserting an existing edge again leaves the
    /// store untouched and returns `false`.
    pub fn link(
        &mut self,
        subject: &Iri,
        property: &Iri,
        object: &Iri,
    ) -> Result<bool, OntologyError> {
        self.require_property(property, PropertyKind::Object)?;
        self.position(subject)?;
        self.position(object)?;
        if self.has_link(subject, property, object) {
            return Ok(false);
        }
        self.links.push(Link {
            subject: subject.clone(),
            property: property.clone(),
            object: object.clone(),
        });
        self.touch();
        Ok(true)
    }

    /// Whether the `subject -property-> object` edge exists.
    #[must_use]
    pub fn has_link(&self, subject: &Iri, property: &Iri, object: &Iri) -> bool {
        self.links.iter().any(|link| {
            link.subject == *subject && link.property == *property && link.object == *object
        })
    }

    /// Objects reached from `subject` through `property`, in assertion order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Iri,
        property: &'a Iri,
    ) -> impl Iterator<Item = &'a Iri> + 'a {
        self.links
            .iter()
            .filter(move |link| link.subject == *subject && link.property == *property)
            .map(|link| &link.object)
    }

    /// Subjects pointing at `object` through `property`, in assertion order.
    pub fn subjects<'a>(
        &'a self,
        property: &'a Iri,
        object: &'a Iri,
    ) -> impl Iterator<Item = &'a Iri> + 'a {
        self.links
            .iter()
            .filter(move |link| link.property == *property && link.object == *object)
            .map(|link| &link.subject)
    }

    /// Adds an asserted class membership to an existing individual.
    ///
    /// Returns `false` when the membership was already asserted.
    pub fn assert_type(&mut self, individual: &Iri, class: &Iri) -> Result<bool, OntologyError> {
        self.require_class(class)?;
        let index = self.position(individual)?;
        let added = self.individuals[index].assert_type(class.clone());
        if added {
            self.touch();
        }
        Ok(added)
    }

    /// Records a reasoner-derived class membership.
    ///
    /// Returns `false` when the membership is already known, asserted or inferred.
    pub fn infer_type(&mut self, individual: &Iri, class: &Iri) -> Result<bool, OntologyError> {
        self.require_class(class)?;
        let index = self.position(individual)?;
        Ok(self.individuals[index].infer_type(class.clone()))
    }

    /// Drops every inferred membership ahead of a new reasoner run.
    pub fn clear_inferred(&mut self) {
        for individual in &mut self.individuals {
            individual.inferred_types.clear();
        }
    }

    /// Marks inferred memberships as matching the current facts.
    pub fn mark_reasoned(&mut self) {
        self.inference = InferenceState::Fresh;
    }

    #[must_use]
    pub fn inference_state(&self) -> InferenceState {
        self.inference
    }

    /// Keeps a triple the store does not model so it can be handed back to a reasoner.
    pub fn add_axiom(&mut self, triple: Triple) {
        self.axioms.push(triple);
    }

    /// Returns the retained axiom triples in document order.
    #[must_use]
    pub fn axioms(&self) -> &[Triple] {
        &self.axioms
    }

    /// Returns the transitive closure of `class` and all of its subclasses.
    #[must_use]
    pub fn descendants_of(&self, class: &Iri) -> BTreeSet<Iri> {
        let mut visited = BTreeSet::from([class.clone()]);
        let mut queue = VecDeque::from([class.clone()]);
        while let Some(current) = queue.pop_front() {
            for (id, candidate) in &self.classes {
                if candidate.parents().contains(&current) && visited.insert(id.clone()) {
                    queue.push_back(id.clone());
                }
            }
        }
        visited
    }

    /// Returns the instances of `class`, including instances of its subclasses,
    /// in store order.
    pub fn instances_of<'a>(&'a self, class: &Iri) -> impl Iterator<Item = &'a Individual> + 'a {
        let classes = self.descendants_of(class);
        self.individuals.iter().filter(move |individual| {
            classes
                .iter()
                .any(|candidate| individual.has_type(candidate))
        })
    }

    /// Returns the ontology identifier.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the optional label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Retrieves a class by identifier.
    #[must_use]
    pub fn class(&self, id: &Iri) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Retrieves a property by identifier.
    #[must_use]
    pub fn property(&self, id: &Iri) -> Option<&Property> {
        self.properties.get(id)
    }

    /// Retrieves an individual by identifier.
    #[must_use]
    pub fn individual(&self, id: &Iri) -> Option<&Individual> {
        self.positions
            .get(id)
            .and_then(|index| self.individuals.get(*index))
    }

    /// Returns all classes ordered by identifier.
    #[must_use]
    pub fn classes(&self) -> &BTreeMap<Iri, Class> {
        &self.classes
    }

    /// Returns all properties ordered by identifier.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<Iri, Property> {
        &self.properties
    }

    /// Returns all individuals in store order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns all object property edges in assertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    fn position(&self, individual: &Iri) -> Result<usize, OntologyError> {
        self.positions
            .get(individual)
            .copied()
            .ok_or_else(|| OntologyError::MissingIndividual {
                ontology: self.id.clone(),
                individual: individual.clone(),
            })
    }

    fn require_class(&self, class: &Iri) -> Result<(), OntologyError> {
        if self.classes.contains_key(class) {
            Ok(())
        } else {
            Err(OntologyError::MissingClass {
                ontology: self.id.clone(),
                class: class.clone(),
            })
        }
    }

    fn require_property(&self, property: &Iri, kind: PropertyKind) -> Result<(), OntologyError> {
        let Some(definition) = self.properties.get(property) else {
            return Err(OntologyError::MissingProperty {
                ontology: self.id.clone(),
                property: property.clone(),
            });
        };
        if definition.kind() != kind {
            return Err(OntologyError::InvalidPropertyAssertion {
                ontology: self.id.clone(),
                property: property.clone(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        if self.inference == InferenceState::Fresh {
            self.inference = InferenceState::Stale;
        }
    }
}

/// Errors raised when manipulating an ontology aggregate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OntologyError {
    /// Attempted to add a class with an existing identifier.
    #[error("class `{0}` already exists")]
    DuplicateClass(Iri),
    /// Attempted to add a property with an existing identifier.
    #[error("property `{0}` already exists")]
    DuplicateProperty(Iri),
    /// Attempted to add an individual with an existing identifier.
    #[error("individual `{0}` already exists")]
    DuplicateIndividual(Iri),
    /// Referenced class was not part of the ontology.
    #[error("class `{class}` does not exist in ontology `{ontology}`")]
    MissingClass { ontology: Iri, class: Iri },
    /// Referenced property was not part of the ontology.
    #[error("property `{property}` does not exist in ontology `{ontology}`")]
    MissingProperty { ontology: Iri, property: Iri },
    /// Referenced individual was not part of the ontology.
    #[error("individual `{individual}` does not exist in ontology `{ontology}`")]
    MissingIndividual { ontology: Iri, individual: Iri },
    /// Property assertion type did not match the property definition.
    #[error("property assertion does not match property `{property}` in ontology `{ontology}`")]
    InvalidPropertyAssertion { ontology: Iri, property: Iri },
}

#[cfg(test)]
mod tests {
    use oxrdf::Literal;

    use super::{
        Class, Individual, InferenceState, Ontology, OntologyError, Property, PropertyKind,
    };
    use crate::ontology::value_objects::Iri;

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    fn music() -> Ontology {
        let mut ontology = Ontology::new(iri("http://example.org/myMusic"));
        ontology
            .add_class(Class::new(iri("http://example.org/myMusic#Song")))
            .expect("song");
        ontology
            .add_class(Class::new(iri("http://example.org/myMusic#Playlist")))
            .expect("playlist");
        let mut popular = Class::new(iri("http://example.org/myMusic#PopularSong"));
        popular.add_parent(iri("http://example.org/myMusic#Song"));
        ontology.add_class(popular).expect("popular");

        let mut in_playlist = Property::new(
            iri("http://example.org/myMusic#inPlaylist"),
            PropertyKind::Object,
        );
        in_playlist.add_domain(iri("http://example.org/myMusic#Song"));
        in_playlist.add_range(iri("http://example.org/myMusic#Playlist"));
        ontology.add_property(in_playlist).expect("inPlaylist");
        ontology
            .add_property(Property::new(
                iri("http://example.org/myMusic#rating"),
                PropertyKind::Data,
            ))
            .expect("rating");

        for (name, class) in [
            ("EndOfSummer", "Song"),
            ("LonelyAtTheTop", "Song"),
            ("Chill", "Playlist"),
        ] {
            let mut individual = Individual::new(iri(&format!("http://example.org/myMusic#{name}")));
            individual.assert_type(iri(&format!("http://example.org/myMusic#{class}")));
            ontology.add_individual(individual).expect("individual");
        }
        ontology
    }

    #[test]
    fn class_parents_are_tracked() {
        let mut class = Class::new(iri("http://example.org/myMusic#Artist"));
        assert!(class.add_parent(iri("http://example.org/myMusic#Person")));
        assert!(!class.add_parent(iri("http://example.org/myMusic#Person")));
        assert!(class
            .parents()
            .contains(&iri("http://example.org/myMusic#Person")));
    }

    #[test]
    fn property_insertion_rejects_unknown_classes() {
        let mut ontology = Ontology::new(iri("http://example.org/onto"));
        let mut property = Property::new(iri("http://example.org/prop"), PropertyKind::Object);
        property.add_domain(iri("http://example.org/Class"));
        let err = ontology.add_property(property).expect_err("missing class");
        assert!(matches!(err, OntologyError::MissingClass { .. }));
    }

    #[test]
    fn individual_insertion_rejects_unknown_types() {
        let mut ontology = Ontology::new(iri("http://example.org/onto"));
        let mut individual = Individual::new(iri("http://example.org/alice"));
        individual.assert_type(iri("http://example.org/Person"));
        let err = ontology
            .add_individual(individual)
            .expect_err("unknown class");
        assert!(matches!(err, OntologyError::MissingClass { .. }));
    }

    #[test]
    fn individuals_keep_insertion_order() {
        let ontology = music();
        let names: Vec<_> = ontology.individuals().iter().map(Individual::name).collect();
        assert_eq!(names, vec!["EndOfSummer", "LonelyAtTheTop", "Chill"]);
    }

    #[test]
    fn links_are_a_set_in_assertion_order() {
        let mut ontology = music();
        let in_playlist = iri("http://example.org/myMusic#inPlaylist");
        let chill = iri("http://example.org/myMusic#Chill");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");
        let summer = iri("http://example.org/myMusic#EndOfSummer");

        assert!(ontology.link(&lonely, &in_playlist, &chill).expect("link"));
        assert!(ontology.link(&summer, &in_playlist, &chill).expect("link"));
        assert!(!ontology.link(&lonely, &in_playlist, &chill).expect("link"));

        let members: Vec<_> = ontology
            .subjects(&in_playlist, &chill)
            .map(Iri::local_name)
            .collect();
        assert_eq!(members, vec!["LonelyAtTheTop", "EndOfSummer"]);
        assert_eq!(ontology.links().len(), 2);
    }

    #[test]
    fn link_rejects_data_property_and_unknown_individuals() {
        let mut ontology = music();
        let rating = iri("http://example.org/myMusic#rating");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");
        let err = ontology
            .link(&lonely, &rating, &lonely)
            .expect_err("data property");
        assert!(matches!(err, OntologyError::InvalidPropertyAssertion { .. }));

        let err = ontology
            .link(
                &lonely,
                &iri("http://example.org/myMusic#inPlaylist"),
                &iri("http://example.org/myMusic#Nowhere"),
            )
            .expect_err("unknown playlist");
        assert!(matches!(err, OntologyError::MissingIndividual { .. }));
    }

    #[test]
    fn values_are_attached_to_data_properties() {
        let mut ontology = music();
        let rating = iri("http://example.org/myMusic#rating");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");
        ontology
            .add_value(&lonely, &rating, Literal::new_simple_literal("4.8"))
            .expect("value");
        let individual = ontology.individual(&lonely).expect("song");
        assert_eq!(individual.value(&rating).map(Literal::value), Some("4.8"));
        assert!(individual
            .value(&iri("http://example.org/myMusic#duration"))
            .is_none());
    }

    #[test]
    fn instances_include_subclass_and_inferred_members() {
        let mut ontology = music();
        let song = iri("http://example.org/myMusic#Song");
        let popular = iri("http://example.org/myMusic#PopularSong");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");

        assert_eq!(ontology.instances_of(&popular).count(), 0);
        assert!(ontology.infer_type(&lonely, &popular).expect("infer"));
        assert!(!ontology.infer_type(&lonely, &popular).expect("infer again"));
        assert!(!ontology.infer_type(&lonely, &song).expect("already asserted"));

        let popular_names: Vec<_> = ontology.instances_of(&popular).map(Individual::name).collect();
        assert_eq!(popular_names, vec!["LonelyAtTheTop"]);
        assert_eq!(ontology.instances_of(&song).count(), 2);

        ontology.clear_inferred();
        assert_eq!(ontology.instances_of(&popular).count(), 0);
    }

    #[test]
    fn mutations_after_reasoning_mark_inference_stale() {
        let mut ontology = music();
        assert_eq!(ontology.inference_state(), InferenceState::NotRun);
        ontology.mark_reasoned();
        assert_eq!(ontology.inference_state(), InferenceState::Fresh);

        let chill = iri("http://example.org/myMusic#Chill");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");
        let in_playlist = iri("http://example.org/myMusic#inPlaylist");
        ontology.link(&lonely, &in_playlist, &chill).expect("link");
        assert_eq!(ontology.inference_state(), InferenceState::Stale);
    }

    #[test]
    fn asserting_a_type_on_an_existing_individual() {
        let mut ontology = music();
        let song = iri("http://example.org/myMusic#Song");
        let playlist = iri("http://example.org/myMusic#Playlist");
        let summer = iri("http://example.org/myMusic#EndOfSummer");
        ontology.mark_reasoned();

        assert!(ontology.assert_type(&summer, &playlist).expect("assert"));
        assert!(!ontology.assert_type(&summer, &playlist).expect("assert again"));
        assert_eq!(ontology.instances_of(&playlist).count(), 2);
        assert!(ontology
            .individual(&summer)
            .is_some_and(|individual| individual.has_type(&song)));
        assert_eq!(ontology.inference_state(), InferenceState::Stale);

        let err = ontology
            .assert_type(&summer, &iri("http://example.org/myMusic#Nothing"))
            .expect_err("unknown class");
        assert!(matches!(err, OntologyError::MissingClass { .. }));
    }

    #[test]
    fn no_op_link_keeps_inference_fresh() {
        let mut ontology = music();
        let chill = iri("http://example.org/myMusic#Chill");
        let lonely = iri("http://example.org/myMusic#LonelyAtTheTop");
        let in_playlist = iri("http://example.org/myMusic#inPlaylist");
        ontology.link(&lonely, &in_playlist, &chill).expect("link");
        ontology.mark_reasoned();
        ontology.link(&lonely, &in_playlist, &chill).expect("link");
        assert_eq!(ontology.inference_state(), InferenceState::Fresh);
    }
}
