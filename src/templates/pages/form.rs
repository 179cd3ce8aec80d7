// templates/pages/form.rs
//
// One form for create and edit. On the create page the same form also posts
// to the auto-fill route, so whatever the user typed travels with the URL and
// comes back untouched if auto-fill fails.

use crate::domain::property::{QUALITY_MAX, QUALITY_MIN};
use crate::domain::PropertyDraft;
use crate::templates::{desktop_layout, notice, Notice};
use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<'a> {
    Create,
    Edit { id: &'a str },
}

pub struct FormVm<'a> {
    pub mode: FormMode<'a>,
    pub draft: &'a PropertyDraft,
    pub auto_fill_enabled: bool,
    pub notices: Vec<Notice>,
}

pub fn property_form_page(vm: &FormVm<'_>) -> Markup {
    let d = vm.draft;
    let (title, action, submit) = match vm.mode {
        FormMode::Create => ("New property", "/properties".to_string(), "Save property"),
        FormMode::Edit { id } => ("Edit property", format!("/properties/{id}"), "Save changes"),
    };
    let creating = vm.mode == FormMode::Create;

    desktop_layout(
        title,
        html! {
            @for n in &vm.notices {
                (notice(n))
            }

            form method="post" action=(action) {
                fieldset {
                    legend { "Listing" }
                    label for="source_url" { "Listing URL (optional)" }
                    input type="url" id="source_url" name="source_url" size="70"
                        placeholder="https://www.olx.com.br/..." value=(d.source_url);
                    @if creating {
                        " "
                        button type="submit" formaction="/properties/autofill" formnovalidate
                            disabled[!vm.auto_fill_enabled] { "Auto-fill from page" }
                        @if !vm.auto_fill_enabled {
                            p { small { "Auto-fill is disabled: set GROQ_API_KEY to enable it." } }
                        }
                    }
                }

                label for="address" { "Full address" }
                input type="text" id="address" name="address" size="70" required
                    placeholder="Rua da Paz, 123, Centro, São Paulo - SP" value=(d.address);

                label for="size_sq_m" { "Size (m²)" }
                input type="number" id="size_sq_m" name="size_sq_m" min="0.01" step="0.01"
                    value=(format!("{:.2}", d.size_sq_m));

                label for="bedrooms" { "Bedrooms" }
                input type="number" id="bedrooms" name="bedrooms" min="0" step="1" value=(d.bedrooms);

                label for="bathrooms" { "Bathrooms" }
                input type="number" id="bathrooms" name="bathrooms" min="0" step="1" value=(d.bathrooms);

                label for="rent_price" { "Rent (R$)" }
                input type="number" id="rent_price" name="rent_price" min="0" step="0.01"
                    value=(format!("{:.2}", d.rent_price));

                label for="notes" { "Notes" }
                textarea id="notes" name="notes" rows="4" cols="70" { (d.notes) }

                label for="quality" { "Quality (1-5 stars)" }
                input type="range" id="quality" name="quality"
                    min=(QUALITY_MIN) max=(QUALITY_MAX) step="1" value=(d.quality);

                label for="visit_date" { "Visit date" }
                input type="date" id="visit_date" name="visit_date"
                    value=(d.visit_date.format("%Y-%m-%d").to_string());

                p { button type="submit" { (submit) } }
            }
        },
    )
}
