use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { display: flex; align-items: center; gap: 2rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 4px #0002; }
header nav ul { display: flex; gap: 1.25rem; list-style: none; margin: 0; padding: 0; }
header a { color: #524ed2; text-decoration: none; }
main { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.35rem 0.6rem; border-bottom: 1px solid #ddd; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.metrics { display: flex; gap: 1rem; flex-wrap: wrap; }
.metric { flex: 1; min-width: 10rem; border: 1px solid #ddd; border-radius: 8px; padding: 0.75rem; }
.metric .value { font-size: 1.6rem; font-weight: 600; }
.notice { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.notice.success { background: #e6f6ea; }
.notice.warning { background: #fff6da; }
.notice.error { background: #fde8e8; }
.bar { background: #524ed2; height: 0.9rem; border-radius: 3px; }
form.inline { display: inline; }
label { display: block; margin-top: 0.6rem; }
#map { height: 600px; border-radius: 8px; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Rental Visits" }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    strong { "Rental Visits" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/map" { "Map" } }
                            li { a href="/properties/new" { "New property" } }
                            li { a href="/properties" { "List" } }
                            li { a href="/stats" { "Statistics" } }
                            li { a href="/export" { "Export" } }
                        }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}
