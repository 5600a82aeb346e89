// GML-style graph text for external visualization tools

use crate::error::Result;
use crate::model::{ArtistGraph, Edge, Node};
use indexmap::IndexMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const GML_EXTENSION: &str = "gml";

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue<'a> {
    Str(&'a str),
    Int(i64),
}

/// Node attributes in the order they are written.
pub trait GmlAttributes {
    fn gml_attributes(&self) -> Vec<(&str, AttrValue<'_>)>;
}

impl GmlAttributes for Node {
    fn gml_attributes(&self) -> Vec<(&str, AttrValue<'_>)> {
        vec![
            ("label", AttrValue::Str(&self.label)),
            ("color", AttrValue::Str(&self.color)),
            ("size", AttrValue::Int(self.size)),
        ]
    }
}

/// Double quotes become single quotes. Nothing else is escaped, so
/// newlines and backslashes pass through as-is.
pub fn quote_string(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "'"))
}

pub fn serialize_gml<A: GmlAttributes>(
    nodes: &IndexMap<i64, A>,
    edges: &[Edge],
    directed: bool,
) -> String {
    let mut out = String::from("graph [\n");
    if directed {
        out.push_str("    directed 1\n");
    }

    for (id, attrs) in nodes {
        out.push_str("    node [\n");
        out.push_str(&format!("        id {}\n", id));
        for (name, value) in attrs.gml_attributes() {
            let line = match value {
                AttrValue::Str(s) => format!("        {} {}\n", name, quote_string(s)),
                AttrValue::Int(n) => format!("        {} {}\n", name, n),
            };
            out.push_str(&line);
        }
        out.push_str("    ]\n");
    }

    for edge in edges {
        out.push_str("    edge [\n");
        out.push_str(&format!("        source {}\n", edge.source));
        out.push_str(&format!("        target {}\n", edge.target));
        out.push_str("    ]\n");
    }

    out.push(']');
    out
}

pub fn write_gml(path: &Path, graph: &ArtistGraph) -> Result<()> {
    let content = serialize_gml(&graph.nodes, &graph.edges, true);
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_replaces_double_quotes() {
        assert_eq!(quote_string("He said \"hi\""), "\"He said 'hi'\"");
    }

    #[test]
    fn test_quote_string_leaves_backslash() {
        assert_eq!(quote_string("AC\\DC"), "\"AC\\DC\"");
    }

    #[test]
    fn test_empty_undirected_graph() {
        let nodes: IndexMap<i64, Node> = IndexMap::new();
        assert_eq!(serialize_gml(&nodes, &[], false), "graph [\n]");
    }
}
