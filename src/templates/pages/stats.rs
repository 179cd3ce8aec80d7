// templates/pages/stats.rs

use crate::templates::{card, components::metric, desktop_layout};
use crate::views::format::{grouped, money};
use crate::views::Statistics;
use maud::{html, Markup};

pub fn stats_page(stats: Option<&Statistics<'_>>) -> Markup {
    let Some(s) = stats else {
        return desktop_layout(
            "Statistics",
            html! { p { "No properties yet, so there is nothing to analyse." } },
        );
    };

    let max_bedroom_count = s.bedrooms.iter().map(|b| b.count).max().unwrap_or(1);

    desktop_layout(
        "Statistics",
        html! {
            div class="metrics" {
                (metric("Properties", &s.count.to_string()))
                (metric("Mean rent", &money(s.mean_price)))
                (metric("Mean size (m²)", &grouped(s.mean_size, 2)))
            }

            (card("Rent by quality", html! {
                table {
                    thead {
                        tr {
                            th { "Quality" } th { "Count" } th { "Min" } th { "Q1" }
                            th { "Median" } th { "Q3" } th { "Max" }
                        }
                    }
                    tbody {
                        @for q in &s.price_by_quality {
                            tr {
                                td { (q.quality) " ★" }
                                td { (q.count) }
                                td { (money(q.prices.min)) }
                                td { (money(q.prices.q1)) }
                                td { (money(q.prices.median)) }
                                td { (money(q.prices.q3)) }
                                td { (money(q.prices.max)) }
                            }
                        }
                    }
                }
            }))

            (card("Properties by number of bedrooms", html! {
                table {
                    @for b in &s.bedrooms {
                        tr {
                            td style="width: 8rem" { (b.bedrooms) " bedrooms" }
                            td style="width: 4rem" { (b.count) }
                            td {
                                div class="bar"
                                    style=(format!("width: {}%", b.count * 100 / max_bedroom_count)) {}
                            }
                        }
                    }
                }
            }))

            (card("Best rated", html! {
                table {
                    thead {
                        tr { th { "Address" } th { "Quality" } th { "Rent" } th { "Size (m²)" } }
                    }
                    tbody {
                        @for p in &s.top {
                            tr {
                                td { (p.address) }
                                td { (p.quality) }
                                td { (money(p.rent_price)) }
                                td { (grouped(p.size_sq_m, 2)) }
                            }
                        }
                    }
                }
            }))

            (card("Listing URLs", html! {
                div class="metrics" {
                    (metric("With URL", &s.urls.with_url.to_string()))
                    (metric("Without URL", &s.urls.without_url.to_string()))
                    (metric("Share with URL", &format!("{:.1}%", s.urls.percent_with_url)))
                    @if let Some(q) = s.urls.mean_quality_with_url {
                        (metric("Mean quality (with URL)", &format!("{q:.1} ★")))
                    }
                }

                @for p in &s.with_url {
                    details {
                        summary { (p.address) " · " (money(p.rent_price)) }
                        @if let Some(url) = p.listing_url() {
                            p { "URL: " a href=(url) target="_blank" rel="noopener" { (url) } }
                        } @else {
                            p { "URL: " (p.source_url) }
                        }
                        p { "Quality: " (p.quality) " ★ · Size: " (grouped(p.size_sq_m, 2)) " m²" }
                        p { "Bedrooms: " (p.bedrooms) " · Bathrooms: " (p.bathrooms) }
                        @if !p.notes.is_empty() {
                            p { "Notes: " (p.notes) }
                        }
                    }
                }
            }))
        },
    )
}
