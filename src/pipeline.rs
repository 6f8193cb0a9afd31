//! One conversion run: validate -> fetch -> parse -> render -> report.
//!
//! States:
//! Idle -> Validating -> Fetching -> Parsing -> Rendering -> Succeeded
//! Any failure jumps straight to Failed, which is absorbing. Nothing reaches the
//! sink until the run has finished, so a failure never leaves partial output.

use crate::Result;
use crate::action::{ActionDocument, Nwo};
use crate::error::ActionError;
use crate::fetch::{ContentFetcher, fetch_action};
use crate::mermaid::{AddressingContext, Diagram, LinkConfig, render};
use crate::sink::ResultSink;

use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Validating,
    Fetching,
    Parsing,
    Rendering,
    Succeeded,
    Failed,
}

/// Orchestrator for one identifier. `run` consumes it, so a finished run
/// cannot be restarted.
pub struct Pipeline<'a> {
    fetcher: &'a dyn ContentFetcher,
    links: &'a LinkConfig,
    state: State,
}

/// Terminal state of a run together with its result.
#[derive(Debug)]
pub struct Finished {
    pub state: State,
    pub result: std::result::Result<Diagram, ActionError>,
}

impl<'a> Pipeline<'a> {
    pub fn new(fetcher: &'a dyn ContentFetcher, links: &'a LinkConfig) -> Self {
        Self {
            fetcher,
            links,
            state: State::Idle,
        }
    }

    /// Convert the action at `nwo` into a diagram.
    pub fn run(mut self, nwo: &str) -> Finished {
        let result = self.advance(nwo);
        self.enter(match result {
            Ok(_) => State::Succeeded,
            Err(_) => State::Failed,
        });
        Finished {
            state: self.state,
            result,
        }
    }

    fn advance(&mut self, raw_nwo: &str) -> std::result::Result<Diagram, ActionError> {
        self.enter(State::Validating);
        let nwo: Nwo = raw_nwo.parse()?;

        self.enter(State::Fetching);
        let fetched = fetch_action(self.fetcher, &nwo)?;

        self.enter(State::Parsing);
        let doc = ActionDocument::parse(&fetched.text)?;

        self.enter(State::Rendering);
        let ctx = AddressingContext {
            nwo: &nwo,
            file: fetched.file,
            raw: &fetched.text,
        };
        let diagram = render(&doc, &ctx, self.links)?;
        if diagram.is_degenerate() {
            return Err(ActionError::EmptyDefinition);
        }
        Ok(diagram)
    }

    fn enter(&mut self, next: State) {
        debug!("pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Run the pipeline and hand exactly one result to `sink`.
///
/// Returns true on success. The `Err` case is reserved for the sink itself
/// failing, e.g. an unwritable output file.
pub fn run_to_sink(pipeline: Pipeline<'_>, nwo: &str, sink: &mut dyn ResultSink) -> Result<bool> {
    let finished = pipeline.run(nwo);
    debug!("pipeline finished in {:?}", finished.state);
    match finished.result {
        Ok(diagram) => {
            info!("rendered {} edges for {nwo}", diagram.edge_count());
            sink.succeed(diagram.as_str())?;
            Ok(true)
        }
        Err(err) => {
            if let Some(cause) = std::error::Error::source(&err) {
                warn!("{err} caused by: {cause}");
            }
            sink.fail(&err.to_string())?;
            Ok(false)
        }
    }
}
