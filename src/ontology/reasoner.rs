use std::{fmt, io};

use oxrdf::{vocab::rdf, Term};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::{
    entities::{Ontology, OntologyError},
    export,
    value_objects::Iri,
};
use crate::config::{ReasonerBackend, ReasonerSettings};

/// Capability deriving class memberships from the facts held in the store.
///
/// Implementations mutate inferred memberships in place. Inference itself is
/// never performed in this crate; it is delegated to the backend.
pub trait Reasoner {
    /// Human readable name announced before a run.
    fn name(&self) -> &str;

    /// Replaces the inferred memberships of `ontology`.
    fn infer(&self, ontology: &mut Ontology) -> Result<InferenceSummary, ReasonerError>;
}

/// Outcome of a reasoner run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InferenceSummary {
    pub reasoner: String,
    /// Memberships that were not already asserted.
    pub inferred: usize,
}

/// Errors surfaced by reasoner backends.
#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("failed to start reasoner `{command}`: {source}")]
    Spawn {
        command: String,
        source: io::Error,
    },
    #[error("reasoner `{command}` exited with status {status}: {stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("failed to serialize the ontology for the reasoner: {0}")]
    Export(#[source] io::Error),
    #[error("reasoner produced unreadable output: {0}")]
    Output(#[from] RdfParseError),
    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

/// Backend that leaves memberships as asserted.
#[derive(Clone, Debug, Default)]
pub struct NoopReasoner;

impl Reasoner for NoopReasoner {
    fn name(&self) -> &str {
        "none"
    }

    fn infer(&self, ontology: &mut Ontology) -> Result<InferenceSummary, ReasonerError> {
        ontology.clear_inferred();
        ontology.mark_reasoned();
        Ok(InferenceSummary {
            reasoner: self.name().to_string(),
            inferred: 0,
        })
    }
}

/// Represents the command line used to start an external reasoner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReasonerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ReasonerCommand {
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl Into<Vec<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into(),
        }
    }
}

impl fmt::Display for ReasonerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Output captured from a finished reasoner process.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessOutput {
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Runs operating system processes.
pub trait ProcessRunner {
    fn run(&self, command: &ReasonerCommand, stdin: &[u8]) -> io::Result<ProcessOutput>;
}

/// [`ProcessRunner`] that spawns the program with `duct`.
#[derive(Clone, Debug, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ReasonerCommand, stdin: &[u8]) -> io::Result<ProcessOutput> {
        let output = duct::cmd(&command.program, &command.args)
            .stdin_bytes(stdin.to_vec())
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()?;

        Ok(ProcessOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Delegates inference to an external program.
///
/// The program reads the ontology as N-Triples on stdin and answers with
/// N-Triples on stdout. Every `rdf:type` triple about a known individual and
/// a declared class becomes an inferred membership; other triples are ignored.
pub struct ExternalReasoner<R = SystemProcessRunner> {
    display_name: String,
    command: ReasonerCommand,
    runner: R,
}

impl ExternalReasoner {
    #[must_use]
    pub fn new(display_name: impl Into<String>, command: ReasonerCommand) -> Self {
        Self::with_runner(display_name, command, SystemProcessRunner)
    }
}

impl<R: ProcessRunner> ExternalReasoner<R> {
    #[must_use]
    pub fn with_runner(display_name: impl Into<String>, command: ReasonerCommand, runner: R) -> Self {
        Self {
            display_name: display_name.into(),
            command,
            runner,
        }
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: ProcessRunner> Reasoner for ExternalReasoner<R> {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn infer(&self, ontology: &mut Ontology) -> Result<InferenceSummary, ReasonerError> {
        let input = export::to_ntriples(ontology).map_err(ReasonerError::Export)?;
        debug!(command = %self.command, bytes = input.len(), "reasoner_started");

        let output = self
            .runner
            .run(&self.command, &input)
            .map_err(|source| ReasonerError::Spawn {
                command: self.command.to_string(),
                source,
            })?;
        if output.status != 0 {
            return Err(ReasonerError::Failed {
                command: self.command.to_string(),
                status: output.status,
                stderr: output.stderr,
            });
        }

        let mut memberships = Vec::new();
        for quad in RdfParser::from_format(RdfFormat::NTriples).for_reader(output.stdout.as_slice())
        {
            let quad = quad?;
            if quad.predicate.as_ref() != rdf::TYPE {
                continue;
            }
            let (Term::NamedNode(subject), Term::NamedNode(class)) =
                (Term::from(quad.subject), quad.object)
            else {
                continue;
            };
            memberships.push((Iri::from(subject), Iri::from(class)));
        }

        ontology.clear_inferred();
        let mut inferred = 0;
        for (individual, class) in memberships {
            if ontology.individual(&individual).is_none() || ontology.class(&class).is_none() {
                continue;
            }
            if ontology.infer_type(&individual, &class)? {
                inferred += 1;
            }
        }
        ontology.mark_reasoned();

        info!(reasoner = %self.display_name, inferred, "reasoner_finished");
        Ok(InferenceSummary {
            reasoner: self.display_name.clone(),
            inferred,
        })
    }
}

/// Builds the reasoner selected by configuration.
pub fn from_settings(settings: &ReasonerSettings) -> Box<dyn Reasoner> {
    match settings.backend {
        ReasonerBackend::None => Box::new(NoopReasoner),
        ReasonerBackend::External => Box::new(ExternalReasoner::new(
            settings.display_name(),
            ReasonerCommand::new(settings.program.clone(), settings.args.clone()),
        )),
    }
}
