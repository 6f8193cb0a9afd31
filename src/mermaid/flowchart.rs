//! action.yml -> Mermaid flowchart text.
//!
//! Output shape (one line each, in this order):
//! ````text
//! ```mermaid
//! flowchart LR
//! <input>(<input>):::required|optional--><name>(<name>):::action
//! <name>(<name>)--><output>(<output>):::output
//! classDef required|optional|action|output ...
//! click <input|output> href "<permalink>" _blank
//! ```
//! ````
//!
//! Input and output keys are used verbatim as node ids, and so is the action
//! name. Edges only ever run input -> action -> output.

use crate::action::{ActionDocument, ActionFile, Nwo};
use crate::error::ActionError;
use crate::mermaid::contrast::action_palette;
use crate::mermaid::lines::find_line;
use crate::mermaid::link::LinkConfig;

use log::debug;

pub const FENCE_OPEN: &str = "```mermaid\n";
pub const FENCE_CLOSE: &str = "```";

const DIRECTIVE: &str = "flowchart LR\n";
const STROKE: &str = "stroke:#333,stroke-width:3px";
const REQUIRED_FILL: &str = "#6ba06a";
const OPTIONAL_FILL: &str = "#d9b430";

/// Everything needed to point a node back at its source line.
#[derive(Debug, Clone, Copy)]
pub struct AddressingContext<'a> {
    pub nwo: &'a Nwo,
    pub file: ActionFile,
    pub raw: &'a str,
}

/// Rendered diagram text plus how many edges went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    text: String,
    edges: usize,
}

impl Diagram {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// True when no node or edge lines were produced.
    pub fn is_degenerate(&self) -> bool {
        self.edges == 0
    }
}

/// Render `doc` as a fenced Mermaid flowchart.
pub fn render(
    doc: &ActionDocument,
    ctx: &AddressingContext<'_>,
    links: &LinkConfig,
) -> Result<Diagram, ActionError> {
    let mut out = String::from(FENCE_OPEN);
    out.push_str(DIRECTIVE);

    let name = doc.name()?;
    let mut edges = 0usize;

    for (input, req) in doc.inputs() {
        out.push_str(&format!(
            "{input}({input}):::{}-->{name}({name}):::action\n",
            req.class()
        ));
        edges += 1;
    }

    for output in doc.outputs() {
        out.push_str(&format!("{name}({name})-->{output}({output}):::output\n"));
        edges += 1;
    }

    out.push_str(&class_defs(doc));
    out.push_str(&clicks(doc, ctx, links));
    out.push_str(FENCE_CLOSE);

    debug!("Converted mermaid: {out}");
    Ok(Diagram { text: out, edges })
}

fn class_defs(doc: &ActionDocument) -> String {
    let palette = action_palette(doc.branding_color());
    let mut s = String::new();
    s.push_str(&format!("classDef required fill:{REQUIRED_FILL},{STROKE}\n"));
    s.push_str(&format!("classDef optional fill:{OPTIONAL_FILL},{STROKE}\n"));
    s.push_str(&format!(
        "classDef action fill:{},{STROKE},color:{}\n",
        palette.fill, palette.text
    ));
    s.push_str(&format!("classDef output fill:#fff,{STROKE},color:#333\n"));
    s
}

/// Unresolved lines still get a link, to the file itself.
fn clicks(doc: &ActionDocument, ctx: &AddressingContext<'_>, links: &LinkConfig) -> String {
    let keys = doc.inputs().map(|(key, _)| key).chain(doc.outputs());
    let mut s = String::new();
    for key in keys {
        let line = find_line(ctx.raw, key);
        if line.is_none() {
            debug!("no source line found for {key:?}, linking to file");
        }
        let url = links.permalink(ctx.nwo, ctx.file, line);
        s.push_str(&format!("click {key} href \"{url}\" _blank\n"));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mermaid::contrast::DEFAULT_BACKGROUND;
    use pretty_assertions::assert_eq;

    /// Length of a fenced diagram with nothing inside it.
    const EMPTY_DIAGRAM_LEN: usize = FENCE_OPEN.len() + FENCE_CLOSE.len();

    const GREET: &str = "\
name: Greet
inputs:
  who-to-greet:
    required: true
outputs:
  time:
    description: when
";

    fn nwo() -> Nwo {
        "octo/hello-world".parse().unwrap()
    }

    fn render_text(raw: &str, file: ActionFile) -> Result<Diagram, ActionError> {
        let doc = ActionDocument::parse(raw)?;
        let nwo = nwo();
        let ctx = AddressingContext {
            nwo: &nwo,
            file,
            raw,
        };
        render(&doc, &ctx, &LinkConfig::default())
    }

    #[test]
    fn greet_end_to_end() {
        let diagram = render_text(GREET, ActionFile::Yml).unwrap();
        let expected = "\
```mermaid
flowchart LR
who-to-greet(who-to-greet):::required-->Greet(Greet):::action
Greet(Greet)-->time(time):::output
classDef required fill:#6ba06a,stroke:#333,stroke-width:3px
classDef optional fill:#d9b430,stroke:#333,stroke-width:3px
classDef action fill:#a2a5a9,stroke:#333,stroke-width:3px,color:#000000
classDef output fill:#fff,stroke:#333,stroke-width:3px,color:#333
click who-to-greet href \"https://github.com/octo/hello-world/blob/main/action.yml#L3\" _blank
click time href \"https://github.com/octo/hello-world/blob/main/action.yml#L6\" _blank
```";
        assert_eq!(diagram.as_str(), expected);
        assert_eq!(diagram.edge_count(), 2);
        assert!(diagram.as_str().len() > EMPTY_DIAGRAM_LEN);
    }

    #[test]
    fn empty_sentinel_length() {
        assert_eq!(EMPTY_DIAGRAM_LEN, 14);
    }

    #[test]
    fn deterministic() {
        let a = render_text(GREET, ActionFile::Yml).unwrap();
        let b = render_text(GREET, ActionFile::Yml).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn edge_counts_match_inputs_and_outputs() {
        let raw = "\
name: Multi
inputs:
  a:
    required: true
  b: {}
  c:
    required: false
outputs:
  x: {}
  y: {}
";
        let diagram = render_text(raw, ActionFile::Yml).unwrap();
        let text = diagram.as_str();
        let into_action = text
            .lines()
            .filter(|l| l.ends_with("-->Multi(Multi):::action"))
            .count();
        let from_action = text
            .lines()
            .filter(|l| l.starts_with("Multi(Multi)-->"))
            .count();
        assert_eq!(into_action, 3);
        assert_eq!(from_action, 2);
        assert_eq!(diagram.edge_count(), 5);
    }

    #[test]
    fn required_and_optional_classes() {
        let raw = "name: R\ninputs:\n  a:\n    required: true\n  b:\n    required: false\n  c: {}\n";
        let diagram = render_text(raw, ActionFile::Yml).unwrap();
        let text = diagram.as_str();
        assert!(text.contains("a(a):::required-->R(R):::action\n"));
        assert!(text.contains("b(b):::optional-->R(R):::action\n"));
        assert!(text.contains("c(c):::optional-->R(R):::action\n"));
    }

    #[test]
    fn default_gray_without_branding() {
        let diagram = render_text("name: Plain\ninputs:\n  a: {}\n", ActionFile::Yml).unwrap();
        assert!(diagram.as_str().contains(&format!(
            "classDef action fill:{DEFAULT_BACKGROUND},stroke:#333,stroke-width:3px,color:#000000\n"
        )));
    }

    #[test]
    fn branding_color_fills_action() {
        let raw = "name: B\nbranding:\n  color: '#000000'\noutputs:\n  o: {}\n";
        let diagram = render_text(raw, ActionFile::Yml).unwrap();
        assert!(diagram.as_str().contains(
            "classDef action fill:#000000,stroke:#333,stroke-width:3px,color:#ffffff\n"
        ));
    }

    #[test]
    fn alternate_file_in_links() {
        let diagram = render_text(GREET, ActionFile::Yaml).unwrap();
        assert!(diagram.as_str().contains(
            "click time href \"https://github.com/octo/hello-world/blob/main/action.yaml#L6\" _blank\n"
        ));
    }

    #[test]
    fn unresolved_line_links_to_file() {
        // Escaped key: the raw text never contains `a-b` verbatim.
        let raw = "name: Q\ninputs: {\"a\\x2Db\": {}}\n";
        let diagram = render_text(raw, ActionFile::Yml).unwrap();
        assert!(diagram.as_str().contains(
            "click a-b href \"https://github.com/octo/hello-world/blob/main/action.yml\" _blank\n"
        ));
    }

    #[test]
    fn missing_name_fails() {
        let err = render_text("inputs:\n  a: {}\n", ActionFile::Yml).unwrap_err();
        assert!(matches!(err, ActionError::MissingName));
    }

    #[test]
    fn no_inputs_or_outputs_is_degenerate() {
        let diagram = render_text("name: Lonely\n", ActionFile::Yml).unwrap();
        assert!(diagram.is_degenerate());
        assert!(diagram.as_str().starts_with(FENCE_OPEN));
        assert!(diagram.as_str().ends_with(FENCE_CLOSE));
    }

    #[test]
    fn missing_outputs_renders_only_input_edges() {
        let diagram = render_text("name: P\ninputs:\n  token: {}\n", ActionFile::Yml).unwrap();
        let text = diagram.as_str();
        assert_eq!(diagram.edge_count(), 1);
        assert!(!diagram.is_degenerate());
        assert!(text.contains("token(token):::optional-->P(P):::action\n"));
        assert!(!text.lines().any(|l| l.starts_with("P(P)-->")));
        let clicks: Vec<_> = text.lines().filter(|l| l.starts_with("click ")).collect();
        assert_eq!(
            clicks,
            vec![
                "click token href \"https://github.com/octo/hello-world/blob/main/action.yml#L3\" _blank"
            ]
        );
    }

    #[test]
    fn numeric_name_is_a_node() {
        let diagram = render_text("name: 2048\noutputs:\n  score: the score\n", ActionFile::Yml)
            .unwrap();
        assert!(diagram.as_str().contains("2048(2048)-->score(score):::output\n"));
    }
}
