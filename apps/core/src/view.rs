//! Record -> fragment rendering, one function per resource type
//!
//! Every link carries the identifiers of the resource it opens, so a surface
//! only has to hand the link target back to [`crate::navigate`].

use crate::api::{ImageSize, Route};
use crate::config::ServerRoot;
use crate::fragment::{Fragment, Node};
use crate::highlight::pretty_json;
use crate::model::{text_of, Analysis, Farm, FarmSummary, Resource, Scan, Zone};

/// Thumbnails per row of the scan image table
pub const IMAGES_PER_ROW: usize = 10;

pub fn render(resource: &Resource, root: &ServerRoot) -> Fragment {
    match resource {
        Resource::Farms(farms) => render_farms(farms),
        Resource::Farm(farm) => render_farm(farm),
        Resource::Zone(zone) => render_zone(zone),
        Resource::Scan(scan) => render_scan(scan, root),
        Resource::Analysis(analysis) => render_analysis(analysis, root),
    }
}

pub fn render_farms(farms: &[FarmSummary]) -> Fragment {
    let mut fragment = Fragment::new();
    for farm in farms {
        fragment.link(
            farm.name.clone(),
            Route::Farm {
                farm: farm.id.clone(),
            },
            "farm-name",
        );
    }
    fragment
}

pub fn render_farm(farm: &Farm) -> Fragment {
    let mut fragment = Fragment::new();
    fragment
        .text(farm.name.clone(), "farm-name")
        .text(farm.description.clone(), "farm-description")
        .text("Zones", "farm-zones-title");

    for zone in &farm.zones {
        fragment.link(
            zone.short_name.clone(),
            Route::Zone {
                farm: farm.id.clone(),
                zone: zone.id.clone(),
            },
            "zone-name",
        );
    }
    fragment
}

pub fn render_zone(zone: &Zone) -> Fragment {
    let mut fragment = Fragment::new();
    fragment
        .text(zone.short_name.clone(), "zone-name")
        .text("Scans", "zones-scans-title");

    for scan in &zone.scans {
        fragment.link(
            scan.date.clone(),
            Route::Scan {
                farm: zone.farm.clone(),
                zone: zone.id.clone(),
                scan: scan.id.clone(),
            },
            "scan-name",
        );
    }
    fragment
}

pub fn render_scan(scan: &Scan, root: &ServerRoot) -> Fragment {
    let mut fragment = Fragment::new();
    fragment
        .text(
            format!("Scan of zone {} at {}", scan.zone, scan.date),
            "scan-zone-title",
        )
        .text("Available analyses", "scans-analysis-title");

    for analysis in &scan.analyses {
        fragment.link(
            format!("{} ({})", analysis.name, analysis.state),
            Route::Analysis {
                farm: scan.farm.clone(),
                zone: scan.zone.clone(),
                analysis: analysis.id.clone(),
            },
            "analysis-name",
        );
    }

    let rows = scan
        .images
        .chunks(IMAGES_PER_ROW)
        .map(|chunk| {
            chunk
                .iter()
                .map(|image| Node::Image {
                    class: "scan-image",
                    src: root.image_url(&scan.farm, &scan.zone, image, ImageSize::Thumb),
                })
                .collect()
        })
        .collect();

    fragment.text("Images", "scans-images-title").table(rows);
    fragment
}

pub fn render_analysis(analysis: &Analysis, root: &ServerRoot) -> Fragment {
    let mut fragment = Fragment::new();
    let zone = analysis.zone.as_deref().unwrap_or_default();

    fragment
        .text(analysis.name.clone(), "analysis-name")
        .text(
            format!("Analysis '{}' of zone '{zone}'", analysis.short_name),
            "analysis-summary",
        )
        .text(
            format!("Description: {}", analysis.description),
            "analysis-description",
        )
        .text(format!("State: {}", analysis.state), "analysis-state")
        .text("Results", "analysis-results-title");

    if analysis.is_stitching() {
        let farm = analysis.farm.as_deref().unwrap_or_default();
        let cells = ["map", "mask"]
            .into_iter()
            .filter_map(|key| analysis.results.get(key))
            .filter(|value| !value.is_null())
            .map(text_of)
            .map(|image| Node::Image {
                class: "scan-image",
                src: root.image_url(farm, zone, &image, ImageSize::Large),
            })
            .collect();

        fragment
            .table(vec![cells])
            .text("Results (raw)", "analysis-results-title");
    }

    fragment.code(pretty_json(&analysis.results), "analysis-results");
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisSummary, ScanSummary, ZoneSummary};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn summary(id: &str, name: &str) -> FarmSummary {
        FarmSummary {
            id: id.to_string(),
            short_name: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn farms_list_has_one_link_per_farm() {
        let fragment = render_farms(&[summary("f1", "Chatelain"), summary("f2", "La Ferme")]);

        assert_eq!(
            fragment.links(),
            vec![
                ("Chatelain", &Route::Farm { farm: "f1".to_string() }),
                ("La Ferme", &Route::Farm { farm: "f2".to_string() }),
            ]
        );
    }

    #[test]
    fn farm_links_to_its_zones() {
        let farm = Farm {
            id: "f1".to_string(),
            name: "Chatelain".to_string(),
            description: "Market garden".to_string(),
            zones: vec![ZoneSummary {
                id: "z1".to_string(),
                short_name: "bed-1".to_string(),
            }],
            ..Farm::default()
        };

        let fragment = render_farm(&farm);

        assert_eq!(
            fragment.nodes()[..3].to_vec(),
            vec![
                Node::Text { class: "farm-name", text: "Chatelain".to_string() },
                Node::Text { class: "farm-description", text: "Market garden".to_string() },
                Node::Text { class: "farm-zones-title", text: "Zones".to_string() },
            ]
        );
        assert_eq!(
            fragment.links(),
            vec![(
                "bed-1",
                &Route::Zone { farm: "f1".to_string(), zone: "z1".to_string() }
            )]
        );
    }

    #[test]
    fn zone_links_scans_by_date() {
        let zone = Zone {
            id: "z1".to_string(),
            farm: "f1".to_string(),
            short_name: "bed-1".to_string(),
            scans: vec![ScanSummary {
                id: "s1".to_string(),
                date: "2020-06-01T10:00:00".to_string(),
            }],
        };

        let fragment = render_zone(&zone);

        assert_eq!(
            fragment.links(),
            vec![(
                "2020-06-01T10:00:00",
                &Route::Scan {
                    farm: "f1".to_string(),
                    zone: "z1".to_string(),
                    scan: "s1".to_string()
                }
            )]
        );
    }

    #[test]
    fn scan_images_are_laid_out_ten_per_row() {
        let scan = Scan {
            id: "s1".to_string(),
            farm: "f1".to_string(),
            zone: "z1".to_string(),
            date: "2020-06-01".to_string(),
            images: (0..23).map(|i| format!("img{i}")).collect(),
            analyses: vec![AnalysisSummary {
                id: "a1".to_string(),
                short_name: "stitching".to_string(),
                name: "Stitching".to_string(),
                state: "Finished".to_string(),
            }],
        };

        let fragment = render_scan(&scan, &ServerRoot::default());

        assert_eq!(
            fragment.links(),
            vec![(
                "Stitching (Finished)",
                &Route::Analysis {
                    farm: "f1".to_string(),
                    zone: "z1".to_string(),
                    analysis: "a1".to_string()
                }
            )]
        );
        let Some(Node::Table { rows }) = fragment.nodes().last() else {
            panic!("scan fragment should end with the image table");
        };
        let widths: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(widths, vec![10, 10, 3]);
        assert_eq!(
            rows[2][0],
            Node::Image {
                class: "scan-image",
                src: "http://0.0.0.0:5000/images/f1/z1/img20?size=thumb".to_string(),
            }
        );
    }

    #[test]
    fn stitching_analysis_shows_map_and_mask() {
        let analysis = Analysis {
            id: "a1".to_string(),
            short_name: "stitching".to_string(),
            name: "Stitching".to_string(),
            results: json!({ "map": "m1", "mask": 7 }),
            farm: Some("f1".to_string()),
            zone: Some("z1".to_string()),
            ..Analysis::default()
        };

        let fragment = render_analysis(&analysis, &ServerRoot::default());

        assert!(fragment.nodes().contains(&Node::Table {
            rows: vec![vec![
                Node::Image {
                    class: "scan-image",
                    src: "http://0.0.0.0:5000/images/f1/z1/m1?size=large".to_string(),
                },
                Node::Image {
                    class: "scan-image",
                    src: "http://0.0.0.0:5000/images/f1/z1/7?size=large".to_string(),
                },
            ]]
        }));
        assert_eq!(
            fragment.nodes()[1],
            Node::Text {
                class: "analysis-summary",
                text: "Analysis 'stitching' of zone 'z1'".to_string()
            }
        );
    }

    #[test]
    fn other_analyses_only_show_raw_results() {
        let analysis = Analysis {
            short_name: "plant_analysis".to_string(),
            state: "Running".to_string(),
            results: json!({ "count": 3 }),
            ..Analysis::default()
        };

        let fragment = render_analysis(&analysis, &ServerRoot::default());

        assert!(!fragment
            .nodes()
            .iter()
            .any(|node| matches!(node, Node::Table { .. })));
        assert_eq!(
            fragment.nodes().last(),
            Some(&Node::Code {
                class: "analysis-results",
                json: "{\n    \"count\": 3\n}".to_string()
            })
        );
    }
}
