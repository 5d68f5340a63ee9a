use crate::fragment::{Fragment, Node};
use crate::highlight::highlight_html;

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

impl Fragment {
    /// Static HTML for the fragment. Links point at `#{route}` and carry the
    /// route in `data-route` so a page script can pick them up.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for node in self.nodes() {
            write_node(&mut html, node);
        }
        html
    }
}

fn write_node(html: &mut String, node: &Node) {
    match node {
        Node::Text { class, text } => html.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            escape_attr(class),
            escape_text(text)
        )),
        Node::Link {
            class,
            label,
            target,
        } => {
            let path = escape_attr(&target.path());
            html.push_str(&format!(
                "<a class=\"{}\" href=\"#{path}\" data-route=\"{path}\">{}</a>",
                escape_attr(class),
                escape_text(label)
            ));
        }
        Node::LineBreak => html.push_str("<br>\n"),
        Node::Image { class, src } => html.push_str(&format!(
            "<img class=\"{}\" src=\"{}\">",
            escape_attr(class),
            escape_attr(src)
        )),
        Node::Table { rows } => {
            html.push_str("<table>\n");
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str("<td>");
                    write_node(html, cell);
                    html.push_str("</td>");
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</table>\n");
        }
        Node::Code { class, json } => html.push_str(&format!(
            "<pre class=\"{}\">{}</pre>\n",
            escape_attr(class),
            highlight_html(json)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Route;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_and_links_are_escaped() {
        let mut fragment = Fragment::new();
        fragment
            .text("Tom & <Jerry>", "farm-description")
            .link(
                "Zone \"A\"",
                Route::Zone {
                    farm: "f1".to_string(),
                    zone: "z1".to_string(),
                },
                "zone-name",
            );

        assert_eq!(
            fragment.to_html(),
            "<p class=\"farm-description\">Tom &amp; &lt;Jerry&gt;</p>\n\
             <a class=\"zone-name\" href=\"#farms/f1/zones/z1\" data-route=\"farms/f1/zones/z1\">Zone \"A\"</a><br>\n"
        );
    }

    #[test]
    fn tables_and_code_blocks() {
        let mut fragment = Fragment::new();
        fragment
            .table(vec![vec![Node::Image {
                class: "scan-image",
                src: "http://h/images/f/z/i?size=thumb".to_string(),
            }]])
            .code("null", "analysis-results");

        assert_eq!(
            fragment.to_html(),
            "<table>\n<tr><td><img class=\"scan-image\" src=\"http://h/images/f/z/i?size=thumb\"></td></tr>\n</table>\n\
             <pre class=\"analysis-results\"><span class=\"null\">null</span></pre>\n"
        );
    }

    #[test]
    fn table_cells_nest_any_node() {
        let mut fragment = Fragment::new();
        fragment.table(vec![vec![
            Node::Link {
                class: "scan-name",
                label: "s1".to_string(),
                target: Route::Farms,
            },
            Node::Text {
                class: "scan-date",
                text: "2020".to_string(),
            },
        ]]);

        assert_eq!(
            fragment.to_html(),
            "<table>\n<tr><td><a class=\"scan-name\" href=\"#farms\" data-route=\"farms\">s1</a></td>\
             <td><p class=\"scan-date\">2020</p>\n</td></tr>\n</table>\n"
        );
    }
}
