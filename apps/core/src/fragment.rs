use serde::Serialize;

use crate::api::Route;

/// Piece of rendered content. `class` carries the stylesheet class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Text {
        class: &'static str,
        text: String,
    },
    Link {
        class: &'static str,
        label: String,
        target: Route,
    },
    LineBreak,
    Image {
        class: &'static str,
        src: String,
    },
    Table {
        rows: Vec<Vec<Node>>,
    },
    /// Pretty-printed JSON, highlighted by the surface that shows it
    Code {
        class: &'static str,
        json: String,
    },
}

/// Everything displayed for one record, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn text(&mut self, text: impl Into<String>, class: &'static str) -> &mut Self {
        self.push(Node::Text {
            class,
            text: text.into(),
        })
    }

    /// Appends a link followed by a line break
    pub fn link(&mut self, label: impl Into<String>, target: Route, class: &'static str) -> &mut Self {
        self.push(Node::Link {
            class,
            label: label.into(),
            target,
        });
        self.push(Node::LineBreak)
    }

    pub fn table(&mut self, rows: Vec<Vec<Node>>) -> &mut Self {
        self.push(Node::Table { rows })
    }

    pub fn code(&mut self, json: impl Into<String>, class: &'static str) -> &mut Self {
        self.push(Node::Code {
            class,
            json: json.into(),
        })
    }

    /// Links in document order, including any nested in tables
    pub fn links(&self) -> Vec<(&str, &Route)> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<(&'a str, &'a Route)>) {
            for node in nodes {
                match node {
                    Node::Link { label, target, .. } => out.push((label.as_str(), target)),
                    Node::Table { rows } => {
                        for row in rows {
                            collect(row, out);
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut links = Vec::new();
        collect(&self.nodes, &mut links);
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_followed_by_line_break() {
        let mut fragment = Fragment::new();
        fragment.link("Chatelain", Route::Farms, "farm-name");

        assert_eq!(fragment.nodes().len(), 2);
        assert_eq!(fragment.nodes()[1], Node::LineBreak);
    }

    #[test]
    fn links_include_nested_tables() {
        let mut fragment = Fragment::new();
        fragment
            .text("title", "zone-name")
            .link("first", Route::Farms, "scan-name")
            .table(vec![vec![Node::Link {
                class: "scan-name",
                label: "second".to_string(),
                target: Route::Farm {
                    farm: "f".to_string(),
                },
            }]]);

        let labels: Vec<&str> = fragment.links().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }
}
