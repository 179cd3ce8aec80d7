// templates/pages/list.rs

use crate::templates::{desktop_layout, notice, Notice};
use crate::views::format::{grouped, money};
use crate::views::ListRow;
use maud::{html, Markup};

pub fn list_page(rows: &[ListRow<'_>], flash: Option<&Notice>) -> Markup {
    desktop_layout(
        "Properties",
        html! {
            @if let Some(n) = flash {
                (notice(n))
            }

            @if rows.is_empty() {
                p { "No properties yet. " a href="/properties/new" { "Add the first one." } }
            } @else {
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Address" }
                            th { "Size (m²)" }
                            th { "Bedrooms" }
                            th { "Bathrooms" }
                            th { "Rent" }
                            th { "Quality" }
                            th { "Visited" }
                            th { "Listing" }
                            th {}
                        }
                    }
                    tbody {
                        @for row in rows {
                            @let p = row.record;
                            tr {
                                td { (row.label) }
                                td { (p.address) }
                                td { (grouped(p.size_sq_m, 2)) }
                                td { (p.bedrooms) }
                                td { (p.bathrooms) }
                                td { (money(p.rent_price)) }
                                td { (p.quality) }
                                td { (p.visit_date.format("%Y-%m-%d").to_string()) }
                                td {
                                    @if let Some(url) = p.listing_url() {
                                        a href=(url) target="_blank" rel="noopener" { "Open" }
                                    }
                                }
                                td {
                                    a href={ "/properties/" (p.id) "/edit" } { "Edit" }
                                    " "
                                    form class="inline" method="post" action={ "/properties/" (p.id) "/delete" }
                                        onsubmit="return confirm('Delete this property?');" {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                            @if !p.notes.is_empty() {
                                tr class="notes" {
                                    td {}
                                    td colspan="9" { small { (p.notes) } }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
