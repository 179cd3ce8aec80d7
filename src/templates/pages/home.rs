// templates/pages/home.rs

use crate::templates::{components::metric, desktop_layout};
use crate::views::format::{money, stars};
use crate::views::Summary;
use maud::{html, Markup};

pub fn home_page(summary: Option<&Summary>) -> Markup {
    desktop_layout(
        "Home",
        html! {
            p { "Record the rentals you visit, see them on a map and compare them." }

            ol {
                li { a href="/properties/new" { "Add a property" } " you visited, optionally auto-filled from its listing page." }
                li { a href="/map" { "See it on the map" } ", filtered by price, bedrooms and quality." }
                li { a href="/properties" { "Manage the list" } ": edit or delete entries." }
                li { a href="/stats" { "Compare" } " prices, sizes and ratings." }
            }

            @if let Some(s) = summary {
                h2 { "Quick summary" }
                div class="metrics" {
                    (metric("Properties", &s.total.to_string()))
                    (metric("Mean rent", &money(s.mean_price)))
                    (metric("Best rating", &stars(s.best_quality)))
                }
            }
        },
    )
}
