// templates/pages/map.rs

use crate::templates::desktop_layout;
use crate::views::format::{grouped, money};
use crate::views::map::{Bounds, Marker};
use crate::views::MapView;
use maud::{html, Markup, PreEscaped};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Serialize)]
struct MarkerJs {
    lat: f64,
    lon: f64,
    color: &'static str,
    popup: String,
}

fn popup(m: &Marker) -> String {
    html! {
        b { "Address: " } (m.address) br;
        b { "Rent: " } (money(m.rent_price)) br;
        b { "Bedrooms: " } (m.bedrooms) br;
        b { "Bathrooms: " } (m.bathrooms) br;
        b { "Quality: " } (m.quality) " stars"
        @if let Some(url) = &m.source_url {
            br;
            a href=(url) target="_blank" rel="noopener" { "View listing" }
        }
    }
    .into_string()
}

/// JSON safe to inline in a <script> element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn range_inputs<T: ToString>(label: &str, name: &str, b: &Bounds<T>, step: &str) -> Markup {
    html! {
        fieldset {
            legend { (label) }
            input type="number" name={ (name) "_min" } step=(step) value=(b.min.to_string());
            " to "
            input type="number" name={ (name) "_max" } step=(step) value=(b.max.to_string());
        }
    }
}

pub fn map_page(view: Option<&MapView>) -> Markup {
    let Some(view) = view else {
        return desktop_layout(
            "Map",
            html! {
                p { "No properties yet. " a href="/properties/new" { "Add one" } " to see it on the map." }
            },
        );
    };

    let b = &view.bounds;
    let markers: Vec<MarkerJs> = view
        .markers
        .iter()
        .map(|m| MarkerJs {
            lat: m.position.latitude,
            lon: m.position.longitude,
            color: m.tier.color(),
            popup: popup(m),
        })
        .collect();

    desktop_layout(
        "Map",
        html! {
            link rel="stylesheet" href=(LEAFLET_CSS);
            script src=(LEAFLET_JS) {}

            form method="get" action="/map" {
                (range_inputs("Rent (R$)", "price", &view.selected.price, "100"))
                (range_inputs("Bedrooms", "bedrooms", &view.selected.bedrooms, "1"))
                (range_inputs("Quality (stars)", "quality", &view.selected.quality, "1"))
                button type="submit" { "Filter" }
                " "
                a href="/map" { "Reset" }
            }

            @if b.price.widened {
                p { small { "All properties have the same rent: " (money(b.price.min + 100.0)) } }
            }
            @if b.bedrooms.widened {
                p { small { "All properties have the same number of bedrooms." } }
            }
            @if b.quality.widened {
                p { small { "All properties have the same rating." } }
            }

            @match view.center {
                None => {
                    p { "No properties match the selected filters." }
                }
                Some(center) => {
                    p { small { (view.markers.len()) " properties shown. Price range in data: "
                        (grouped(b.price.min, 0)) " to " (grouped(b.price.max, 0)) } }
                    div id="map" {}
                    script {
                        (PreEscaped(format!(
                            "const markers = {};\n\
                             const map = L.map('map').setView([{}, {}], 12);\n\
                             L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{\n\
                               attribution: '&copy; OpenStreetMap contributors'\n\
                             }}).addTo(map);\n\
                             for (const m of markers) {{\n\
                               L.circleMarker([m.lat, m.lon], {{ radius: 9, color: m.color, fillColor: m.color, fillOpacity: 0.8 }})\n\
                                 .bindPopup(m.popup, {{ maxWidth: 300 }})\n\
                                 .addTo(map);\n\
                             }}",
                            script_json(&markers),
                            center.latitude,
                            center.longitude,
                        )))
                    }
                }
            }
        },
    )
}
